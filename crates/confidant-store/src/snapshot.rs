//! On-disk snapshot format.
//!
//! The document is a JSON array with one object per record, in store order:
//!
//! ```json
//! [
//!   {
//!     "kind": "Trusted",
//!     "name": "Juan",
//!     "birthday": "15/03/1995",
//!     "interests": ["football"],
//!     "memories": ["[Trusted] concert"],
//!     "anecdotes": [],
//!     "trustLevel": 8
//!   }
//! ]
//! ```
//!
//! `trustLevel` is present only for trusted records. Memories are written as
//! stored, tags included.

use confidant_model::{Record, RecordFields, RecordStore, ValidationError};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("malformed snapshot document: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid record at index {index}: {source}")]
    InvalidEntry {
        index: usize,
        #[source]
        source: ValidationError,
    },
}

/// Attributes shared by both variants. Every list is required.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct EntryFields {
    name: String,
    birthday: String,
    interests: Vec<String>,
    memories: Vec<String>,
    anecdotes: Vec<String>,
}

impl From<EntryFields> for RecordFields {
    fn from(entry: EntryFields) -> Self {
        RecordFields::new(entry.name, entry.birthday)
            .interests(entry.interests)
            .memories(entry.memories)
            .anecdotes(entry.anecdotes)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind")]
enum SnapshotEntry {
    Basic(EntryFields),
    Trusted {
        #[serde(flatten)]
        fields: EntryFields,
        #[serde(rename = "trustLevel")]
        trust_level: i64,
    },
}

impl SnapshotEntry {
    fn from_record(record: &Record) -> Self {
        let fields = EntryFields {
            name: record.name().to_owned(),
            birthday: record.birthday().to_owned(),
            interests: record.interests().to_vec(),
            memories: record.memories().entries().to_vec(),
            anecdotes: record.anecdotes().to_vec(),
        };
        match record.trust_level() {
            None => Self::Basic(fields),
            Some(level) => Self::Trusted {
                fields,
                trust_level: i64::from(level.get()),
            },
        }
    }

    fn into_record(self) -> Result<Record, ValidationError> {
        match self {
            Self::Basic(fields) => Record::basic(fields.into()),
            Self::Trusted {
                fields,
                trust_level,
            } => Record::trusted(fields.into(), trust_level),
        }
    }
}

/// Serializes the whole store as a pretty-printed document.
pub fn encode(store: &RecordStore) -> Result<String, serde_json::Error> {
    let entries: Vec<SnapshotEntry> = store
        .all()
        .iter()
        .map(SnapshotEntry::from_record)
        .collect();
    serde_json::to_string_pretty(&entries)
}

/// Rebuilds a store, validating every entry as it would be at creation time.
pub fn decode(raw: &str) -> Result<RecordStore, SnapshotError> {
    let entries: Vec<SnapshotEntry> = serde_json::from_str(raw)?;
    entries
        .into_iter()
        .enumerate()
        .map(|(index, entry)| {
            entry
                .into_record()
                .map_err(|source| SnapshotError::InvalidEntry { index, source })
        })
        .collect()
}
