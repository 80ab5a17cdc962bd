//! Reminder phrasing for a contact, in a formal or casual register.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::record::Record;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationStyle {
    #[default]
    Formal,
    Casual,
}

impl NotificationStyle {
    pub fn format(self, record: &Record) -> String {
        match self {
            Self::Formal => format!(
                "Dear user, we remind you to contact: {}",
                record.name()
            ),
            Self::Casual => format!("Hey! Don't forget to talk to {} 😊", record.name()),
        }
    }
}

impl FromStr for NotificationStyle {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "formal" => Ok(Self::Formal),
            "casual" => Ok(Self::Casual),
            other => Err(format!("unknown notification style: {other}")),
        }
    }
}
