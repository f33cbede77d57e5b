//! `examseat_io_fs` v1:
//! Upload/output storage for the exam seating generator.
//!
//! Modules:
//! - `storage` : directory setup, upload save, download lookup, cleanup
//! - `spec`    : options/errors
//! - `report`  : cleanup report model
//! - `util`    : shared helper functions

pub mod report;
pub mod spec;
pub mod storage;
mod util;

pub use report::{ReportCleanup, ReportCleanupBuilder};
pub use spec::{SpecCleanupError, SpecStorageOptions, StorageError, StorageResult};
pub use storage::SeatingStorage;
