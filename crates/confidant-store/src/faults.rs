use std::fmt::Display;
use std::sync::atomic::{AtomicU64, Ordering};

use confidant_model::RecordStore;
use tracing::warn;

use crate::READ_FAULTS_METRIC;

/// Read-fault bookkeeping shared by every snapshot backend.
#[derive(Debug, Default)]
pub(crate) struct ReadFaults(AtomicU64);

impl ReadFaults {
    /// Records one unreadable snapshot and hands back the empty store the
    /// caller continues with.
    pub(crate) fn recover(&self, reason: &dyn Display) -> RecordStore {
        let faults = self.0.fetch_add(1, Ordering::Relaxed) + 1;
        metrics::counter!(READ_FAULTS_METRIC).increment(1);
        warn!(
            error = %reason,
            faults,
            "snapshot unreadable, continuing with an empty store"
        );
        RecordStore::new()
    }

    pub(crate) fn count(&self) -> u64 {
        self.0.load(Ordering::Relaxed)
    }
}
