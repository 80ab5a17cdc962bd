//! Error types for record construction and memory editing.

use thiserror::Error;

/// Rejections raised while constructing a [`crate::Record`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("missing required field: {0}")]
    MissingField(&'static str),
    #[error("trust level must be between 1 and 10, got {0}")]
    TrustLevelOutOfRange(i64),
}

/// A memory edit addressed an entry the log does not have.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("invalid memory index {index}: log holds {len} entries")]
pub struct IndexOutOfRange {
    pub index: usize,
    pub len: usize,
}
