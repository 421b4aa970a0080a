//! Job persistence
//!
//! - [`traits`] - the [`JobStore`] trait the coordinator depends on
//! - [`memory`] - in-process store
//! - [`file`] - JSON-file-per-job directory store

pub mod file;
pub mod memory;
pub mod traits;

pub use file::FileJobStore;
pub use memory::MemoryJobStore;
pub use traits::JobStore;
