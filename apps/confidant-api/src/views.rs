use confidant_model::{Record, RecordKind};
use serde::Serialize;

/// Response shape of a single contact; field names follow the snapshot.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactView {
    pub kind: RecordKind,
    pub name: String,
    pub birthday: String,
    pub interests: Vec<String>,
    pub memories: Vec<String>,
    pub anecdotes: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trust_level: Option<u8>,
}

impl From<&Record> for ContactView {
    fn from(record: &Record) -> Self {
        Self {
            kind: record.kind(),
            name: record.name().to_owned(),
            birthday: record.birthday().to_owned(),
            interests: record.interests().to_vec(),
            memories: record.memories().entries().to_vec(),
            anecdotes: record.anecdotes().to_vec(),
            trust_level: record.trust_level().map(|level| level.get()),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactDetail {
    pub success: bool,
    #[serde(flatten)]
    pub contact: ContactView,
    pub description: String,
}

impl From<&Record> for ContactDetail {
    fn from(record: &Record) -> Self {
        Self {
            success: true,
            contact: record.into(),
            description: record.describe(),
        }
    }
}
