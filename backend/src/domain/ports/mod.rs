//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Ports describe what the domain needs from driven adapters: a keyed payload
//! store with revision checks, and a source of seed records for empty stores.
//! Each trait exposes strongly typed errors so adapters map their failures
//! into predictable variants.

mod macros;
pub(crate) use macros::define_port_error;

mod key_value_store;
mod seed_source;

#[cfg(test)]
pub use key_value_store::MockKeyValueStore;
pub use key_value_store::{KeyValueStore, KeyValueStoreError, Revision, VersionedPayload};
#[cfg(test)]
pub use seed_source::MockSeedSource;
pub use seed_source::{SeedSource, SeedSourceError};
