use async_trait::async_trait;
use confidant_model::RecordStore;
use parking_lot::Mutex;
use tracing::instrument;

use crate::faults::ReadFaults;
use crate::{SnapshotStore, StoreResult, snapshot};

/// Keeps the encoded snapshot in process memory. Shares the wire format and
/// the load/save semantics of [`crate::FileSnapshotStore`], minus durability.
#[derive(Debug, Default)]
pub struct InMemorySnapshotStore {
    document: Mutex<Option<String>>,
    read_faults: ReadFaults,
}

impl InMemorySnapshotStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts from an already-encoded document, valid or not.
    pub fn with_document(raw: impl Into<String>) -> Self {
        Self {
            document: Mutex::new(Some(raw.into())),
            read_faults: ReadFaults::default(),
        }
    }

    pub fn document(&self) -> Option<String> {
        self.document.lock().clone()
    }
}

#[async_trait]
impl SnapshotStore for InMemorySnapshotStore {
    #[instrument(skip_all, fields(backend = "memory"))]
    async fn load(&self) -> RecordStore {
        let Some(raw) = self.document() else {
            return RecordStore::new();
        };
        snapshot::decode(&raw).unwrap_or_else(|error| self.read_faults.recover(&error))
    }

    async fn save(&self, store: &RecordStore) -> StoreResult<()> {
        let payload = snapshot::encode(store)?;
        *self.document.lock() = Some(payload);
        Ok(())
    }

    fn read_faults(&self) -> u64 {
        self.read_faults.count()
    }
}
