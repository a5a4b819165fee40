//! File I/O behind the [`FileStore`] trait
//!
//! - [`store`]: the trait and the local filesystem implementation
//! - [`memory`]: in-memory and dry-run implementations

pub mod memory;
pub mod store;

pub use memory::{DryRunStore, MemoryFileStore, PlannedChange};
pub use store::{FileStore, LocalFileStore, StoreConfig};
