//! Kind-tagged, append-oriented memory log owned by a single record.

use crate::error::IndexOutOfRange;
use crate::record::RecordKind;

/// Rendered in place of a bullet list when the log is empty.
pub const EMPTY_MEMORIES: &str = "No memories recorded";

/// Counts below this are summarized as "a few".
const MANY_MEMORIES_THRESHOLD: usize = 3;

/// Ordered free-text memories.
///
/// Entries added through [`MemoryLog::append`] carry the owner's tag
/// (`[Basic] ` or `[Trusted] `) as part of the stored string. Entries handed
/// to [`MemoryLog::restore`] are kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemoryLog {
    entries: Vec<String>,
    owner: RecordKind,
}

impl MemoryLog {
    pub fn new(owner: RecordKind) -> Self {
        Self::restore(owner, Vec::new())
    }

    pub fn restore(owner: RecordKind, entries: Vec<String>) -> Self {
        Self { entries, owner }
    }

    pub fn owner(&self) -> RecordKind {
        self.owner
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    /// Appends `text` under the owner's tag and echoes the untagged text back.
    pub fn append(&mut self, text: impl Into<String>) -> String {
        let text = text.into();
        self.entries.push(format!("{}{text}", self.owner.tag()));
        format!("Memory added: {text}")
    }

    /// Replaces the entry at `index`. The stored value is `text` as given; no
    /// tag is applied.
    pub fn replace(
        &mut self,
        index: usize,
        text: impl Into<String>,
    ) -> Result<String, IndexOutOfRange> {
        let len = self.entries.len();
        let slot = self
            .entries
            .get_mut(index)
            .ok_or(IndexOutOfRange { index, len })?;
        let text = text.into();
        let previous = std::mem::replace(slot, text.clone());
        Ok(format!("Memory changed from '{previous}' to '{text}'"))
    }

    pub fn render(&self) -> String {
        if self.entries.is_empty() {
            return EMPTY_MEMORIES.to_owned();
        }
        self.entries
            .iter()
            .map(|entry| format!("- {entry}"))
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn count(&self) -> usize {
        self.entries.len()
    }

    pub fn summary(&self) -> String {
        match self.count() {
            0 => "No memories to notify".to_owned(),
            count if count < MANY_MEMORIES_THRESHOLD => {
                format!("You have {count} memory(ies) recorded")
            }
            count => format!("Lots of shared memories! Total: {count}"),
        }
    }

    pub fn saved_notice(&self) -> String {
        format!(
            "Notification saved - kind: {}, memories: {}",
            self.owner,
            self.count()
        )
    }
}
