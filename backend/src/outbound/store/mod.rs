//! Key-value store adapters.

mod atomic_io;
mod file_store;
mod memory_store;

pub use file_store::{FileStore, FileStoreError};
pub use memory_store::MemoryStore;
