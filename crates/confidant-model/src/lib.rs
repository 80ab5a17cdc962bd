//! # confidant-model — contact records and their memories
//!
//! Pure data crate: no I/O and no async runtime, so both services and the
//! persistence layer can depend on it.
//!
//! ## Module Overview
//!
//! - [`record`] — Record, RecordKind, TrustLevel, RecordFields
//! - [`memory`] — MemoryLog with kind-tagged entries
//! - [`store`] — RecordStore, VariantCounts
//! - [`notify`] — NotificationStyle reminder formatter
//! - [`error`] — ValidationError, IndexOutOfRange

pub mod error;
pub mod memory;
pub mod notify;
pub mod record;
pub mod store;

pub use error::{IndexOutOfRange, ValidationError};
pub use memory::MemoryLog;
pub use notify::NotificationStyle;
pub use record::{Record, RecordFields, RecordKind, TrustLevel};
pub use store::{RecordStore, VariantCounts};
