//! Port for keyed payload persistence.
//!
//! The [`KeyValueStore`] trait is the storage contract beneath the record
//! store: opaque string payloads under string keys, each with a revision
//! counter used for optimistic concurrency.
//!
//! # Revision Semantics
//!
//! - An absent key reports revision 0.
//! - Each successful write bumps the key's revision by one.
//! - [`KeyValueStore::compare_and_set`] writes only when the caller's expected
//!   revision equals the current one, otherwise it fails with
//!   [`KeyValueStoreError::RevisionMismatch`]. Expecting revision 0 is a
//!   create-if-absent.

use super::define_port_error;

/// Monotonic per-key write counter.
pub type Revision = u64;

define_port_error! {
    /// Errors raised by key-value store adapters.
    pub enum KeyValueStoreError {
        /// Reading or writing the backing medium failed.
        Io { key: String, message: String } =>
            "store i/o failed for {key}: {message}",
        /// Optimistic concurrency check failed.
        RevisionMismatch { key: String, expected: u64, actual: u64 } =>
            "revision mismatch on {key}: expected {expected}, found {actual}",
    }
}

/// A payload read together with the revision it was read at.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct VersionedPayload {
    /// Stored payload, `None` when the key was never written.
    pub payload: Option<String>,
    /// Revision the payload was observed at.
    pub revision: Revision,
}

impl VersionedPayload {
    /// Snapshot of a key that holds nothing.
    #[must_use]
    pub const fn absent() -> Self {
        Self {
            payload: None,
            revision: 0,
        }
    }
}

/// Port for keyed payload storage.
///
/// Implementations must be safe to share between the refresh task and the
/// callers issuing mutations: a read never observes a half-written payload.
#[cfg_attr(test, mockall::automock)]
pub trait KeyValueStore: Send + Sync {
    /// Read the payload stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns [`KeyValueStoreError::Io`] when the medium cannot be read.
    fn get(&self, key: &str) -> Result<VersionedPayload, KeyValueStoreError>;

    /// Replace the payload under `key` unconditionally.
    ///
    /// Returns the new revision.
    ///
    /// # Errors
    ///
    /// Returns [`KeyValueStoreError::Io`] when the medium cannot be written.
    fn set(&self, key: &str, payload: &str) -> Result<Revision, KeyValueStoreError>;

    /// Replace the payload under `key` if it is still at `expected`.
    ///
    /// Returns the new revision.
    ///
    /// # Errors
    ///
    /// Returns [`KeyValueStoreError::RevisionMismatch`] when another write
    /// landed first, or [`KeyValueStoreError::Io`] on medium failures.
    fn compare_and_set(
        &self,
        key: &str,
        expected: Revision,
        payload: &str,
    ) -> Result<Revision, KeyValueStoreError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn revision_mismatch_names_both_revisions() {
        let err = KeyValueStoreError::revision_mismatch("leads", 2_u64, 3_u64);
        assert_eq!(
            err.to_string(),
            "revision mismatch on leads: expected 2, found 3"
        );
    }

    #[test]
    fn absent_payload_starts_at_revision_zero() {
        let snapshot = VersionedPayload::absent();
        assert!(snapshot.payload.is_none());
        assert_eq!(snapshot.revision, 0);
    }
}
