//! In-memory, insertion-ordered record collection.

use serde::Serialize;

use crate::record::{Record, RecordKind};

/// Per-variant record totals.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct VariantCounts {
    pub basic: usize,
    pub trusted: usize,
}

/// Records in creation order. Names are not required to be unique; lookups
/// return the first match.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordStore {
    records: Vec<Record>,
}

impl RecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, record: Record) {
        self.records.push(record);
    }

    pub fn find_by_name(&self, name: &str) -> Option<&Record> {
        self.records.iter().find(|record| record.name() == name)
    }

    pub fn find_by_name_mut(&mut self, name: &str) -> Option<&mut Record> {
        self.records.iter_mut().find(|record| record.name() == name)
    }

    pub fn all(&self) -> &[Record] {
        &self.records
    }

    pub fn count(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn count_by_variant(&self) -> VariantCounts {
        self.records
            .iter()
            .fold(VariantCounts::default(), |mut counts, record| {
                match record.kind() {
                    RecordKind::Basic => counts.basic += 1,
                    RecordKind::Trusted => counts.trusted += 1,
                }
                counts
            })
    }
}

impl FromIterator<Record> for RecordStore {
    fn from_iter<I: IntoIterator<Item = Record>>(iter: I) -> Self {
        Self {
            records: iter.into_iter().collect(),
        }
    }
}
