//! Read-through access to the latest record store.

use std::path::PathBuf;
use std::sync::Arc;

use confidant_model::RecordStore;
use tokio::sync::Mutex;
use tracing::{debug, instrument};

use crate::{FileSnapshotStore, SnapshotStore, StoreError, StoreResult};

/// Entry point handed to request handlers.
///
/// Callers read through [`Directory::current_store`] right before reading and
/// persist with [`Directory::save`] right after mutating, or use
/// [`Directory::update`] for the whole cycle. Cycles are ordered within one
/// process only; other processes sharing the snapshot are not coordinated.
#[derive(Clone)]
pub struct Directory {
    snapshots: Arc<dyn SnapshotStore>,
    cycle: Arc<Mutex<()>>,
}

impl Directory {
    pub fn new(snapshots: Arc<dyn SnapshotStore>) -> Self {
        Self {
            snapshots,
            cycle: Arc::new(Mutex::new(())),
        }
    }

    pub fn open(path: impl Into<PathBuf>) -> Self {
        Self::new(Arc::new(FileSnapshotStore::new(path)))
    }

    /// Freshly loaded state; never fails.
    pub async fn current_store(&self) -> RecordStore {
        self.snapshots.load().await
    }

    pub async fn save(&self, store: &RecordStore) -> StoreResult<()> {
        self.snapshots.save(store).await
    }

    /// Runs one load → mutate → save cycle. Nothing is written when `mutate`
    /// fails. Concurrent calls on clones of the same directory run one at a
    /// time.
    #[instrument(skip_all)]
    pub async fn update<T, E>(
        &self,
        mutate: impl FnOnce(&mut RecordStore) -> Result<T, E>,
    ) -> Result<T, E>
    where
        E: From<StoreError>,
    {
        let _guard = self.cycle.lock().await;
        let mut store = self.snapshots.load().await;
        let output = mutate(&mut store)?;
        self.snapshots.save(&store).await?;
        debug!(count = store.count(), "update cycle saved");
        Ok(output)
    }

    pub fn read_faults(&self) -> u64 {
        self.snapshots.read_faults()
    }
}
