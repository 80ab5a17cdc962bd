//! Contact records and their two variants.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::memory::MemoryLog;

/// Variant discriminator shared by records, memory tags and the snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RecordKind {
    Basic,
    Trusted,
}

impl RecordKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Basic => "Basic",
            Self::Trusted => "Trusted",
        }
    }

    /// Prefix baked into memories appended by a record of this kind.
    pub fn tag(self) -> &'static str {
        match self {
            Self::Basic => "[Basic] ",
            Self::Trusted => "[Trusted] ",
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Trust level of a trusted contact, always within `1..=10`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TrustLevel(u8);

impl TrustLevel {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 10;

    pub fn new(value: i64) -> Result<Self, ValidationError> {
        u8::try_from(value)
            .ok()
            .filter(|level| (Self::MIN..=Self::MAX).contains(level))
            .map(Self)
            .ok_or(ValidationError::TrustLevelOutOfRange(value))
    }

    pub fn get(self) -> u8 {
        self.0
    }
}

impl fmt::Display for TrustLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Attributes common to both variants, as supplied by a caller.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordFields {
    pub name: String,
    pub birthday: String,
    pub interests: Vec<String>,
    /// Stored verbatim; no kind tag is applied to these.
    pub memories: Vec<String>,
    pub anecdotes: Vec<String>,
}

impl RecordFields {
    pub fn new(name: impl Into<String>, birthday: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            birthday: birthday.into(),
            ..Self::default()
        }
    }

    pub fn interests(mut self, interests: Vec<String>) -> Self {
        self.interests = interests;
        self
    }

    pub fn memories(mut self, memories: Vec<String>) -> Self {
        self.memories = memories;
        self
    }

    pub fn anecdotes(mut self, anecdotes: Vec<String>) -> Self {
        self.anecdotes = anecdotes;
        self
    }

    fn validate(&self) -> Result<(), ValidationError> {
        if self.name.is_empty() {
            return Err(ValidationError::MissingField("name"));
        }
        if self.birthday.is_empty() {
            return Err(ValidationError::MissingField("birthday"));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Variant {
    Basic,
    Trusted { trust_level: TrustLevel },
}

/// A contact. Only constructible through [`Record::basic`] and
/// [`Record::trusted`], so a `Record` value is always valid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    name: String,
    birthday: String,
    interests: Vec<String>,
    memories: MemoryLog,
    anecdotes: Vec<String>,
    variant: Variant,
}

impl Record {
    pub fn basic(fields: RecordFields) -> Result<Self, ValidationError> {
        Self::build(fields, Variant::Basic)
    }

    pub fn trusted(fields: RecordFields, trust_level: i64) -> Result<Self, ValidationError> {
        let trust_level = TrustLevel::new(trust_level)?;
        Self::build(fields, Variant::Trusted { trust_level })
    }

    fn build(fields: RecordFields, variant: Variant) -> Result<Self, ValidationError> {
        fields.validate()?;
        let kind = match variant {
            Variant::Basic => RecordKind::Basic,
            Variant::Trusted { .. } => RecordKind::Trusted,
        };
        Ok(Self {
            name: fields.name,
            birthday: fields.birthday,
            interests: fields.interests,
            memories: MemoryLog::restore(kind, fields.memories),
            anecdotes: fields.anecdotes,
            variant,
        })
    }

    pub fn kind(&self) -> RecordKind {
        match self.variant {
            Variant::Basic => RecordKind::Basic,
            Variant::Trusted { .. } => RecordKind::Trusted,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn birthday(&self) -> &str {
        &self.birthday
    }

    pub fn interests(&self) -> &[String] {
        &self.interests
    }

    pub fn anecdotes(&self) -> &[String] {
        &self.anecdotes
    }

    pub fn memories(&self) -> &MemoryLog {
        &self.memories
    }

    pub fn memories_mut(&mut self) -> &mut MemoryLog {
        &mut self.memories
    }

    /// `None` for basic records.
    pub fn trust_level(&self) -> Option<TrustLevel> {
        match self.variant {
            Variant::Basic => None,
            Variant::Trusted { trust_level } => Some(trust_level),
        }
    }

    pub fn append_memory(&mut self, text: impl Into<String>) -> String {
        self.memories.append(text)
    }

    pub fn describe(&self) -> String {
        match self.variant {
            Variant::Basic => format!("Name: {}", self.name),
            Variant::Trusted { trust_level } => format!(
                "=== TRUSTED CONTACT ===\n\
                 Name: {}\n\
                 Birthday: {}\n\
                 Interests: {}\n\
                 Trust level: {trust_level}/10\n\
                 Anecdotes: {}",
                self.name,
                self.birthday,
                self.interests.join(", "),
                self.anecdotes.len()
            ),
        }
    }

    pub fn notification_text(&self) -> String {
        match self.variant {
            Variant::Basic => format!("Notification for {}", self.name),
            Variant::Trusted { .. } => format!(
                "💙 Important: remember to contact {} (trusted contact)",
                self.name
            ),
        }
    }

    /// Trusted records only.
    pub fn shared_moments(&self) -> Option<String> {
        match self.variant {
            Variant::Basic => None,
            Variant::Trusted { .. } => Some(format!(
                "Shared moments with {}: {}",
                self.name,
                self.memories.count()
            )),
        }
    }
}
