//! Outbound adapters implementing domain ports.
//!
//! - **store**: [`KeyValueStore`](crate::domain::ports::KeyValueStore)
//!   backends, in memory and as a directory of JSON files.
//! - **mock_data**: [`SeedSource`](crate::domain::ports::SeedSource) backed by
//!   the `example-data` generator.
//!
//! Adapters are thin translators between domain types and their medium. They
//! contain no business logic.

pub mod mock_data;
pub mod store;

pub use mock_data::RandomSeedSource;
pub use store::{FileStore, FileStoreError, MemoryStore};
