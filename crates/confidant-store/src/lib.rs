//! Durable snapshot persistence for the contact store.
//!
//! Two independent service processes share state only through one snapshot
//! document. Every request cycle reloads the document, mutates the in-memory
//! [`RecordStore`], and rewrites the whole document. Nothing coordinates the
//! processes: when two saves race, the one that completes last wins and the
//! other's changes are gone.
//!
//! The [`SnapshotStore`] port isolates that strategy so a stronger backend can
//! replace [`FileSnapshotStore`] without touching callers.

use std::path::PathBuf;

use async_trait::async_trait;
use confidant_model::RecordStore;
use thiserror::Error;

pub mod directory;
mod faults;
pub mod file;
pub mod memory;
pub mod snapshot;

pub use directory::Directory;
pub use file::FileSnapshotStore;
pub use memory::InMemorySnapshotStore;
pub use snapshot::SnapshotError;

/// Counter incremented whenever an unreadable snapshot is replaced by an
/// empty store.
pub const READ_FAULTS_METRIC: &str = "confidant_snapshot_read_faults_total";

/// Failures that must reach the caller. Read faults never do.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to encode snapshot: {0}")]
    Encode(#[from] serde_json::Error),
    #[error("failed writing snapshot {path:?}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type StoreResult<T> = Result<T, StoreError>;

#[async_trait]
pub trait SnapshotStore: Send + Sync {
    /// Current durable state. An absent snapshot is an empty store; an
    /// unreadable one is logged, counted, and also yields an empty store.
    async fn load(&self) -> RecordStore;

    /// Replaces the whole durable snapshot with `store`.
    async fn save(&self, store: &RecordStore) -> StoreResult<()>;

    /// Number of loads that fell back to an empty store because the snapshot
    /// could not be read.
    fn read_faults(&self) -> u64;
}
