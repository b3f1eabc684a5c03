//! Typed collections over a [`KeyValueStore`].
//!
//! Each [`Collection`] names a store key and the record type persisted under
//! it as a JSON array. Missing keys read as empty. Malformed payloads read as
//! empty with a warning under [`PayloadPolicy::FailOpen`], or fail under
//! [`PayloadPolicy::Strict`].

use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::{info, warn};

use super::ports::{KeyValueStore, KeyValueStoreError, Revision, SeedSourceError};
use super::{Lead, User};

/// A named, homogeneous record collection.
pub trait Collection {
    /// Store key the collection lives under.
    const KEY: &'static str;
    /// Record type held by the collection.
    type Record: Serialize + DeserializeOwned + Clone + Send + Sync;
}

/// The `users` collection.
#[derive(Debug, Clone, Copy)]
pub struct Users;

impl Collection for Users {
    const KEY: &'static str = "users";
    type Record = User;
}

/// The `leads` collection.
#[derive(Debug, Clone, Copy)]
pub struct Leads;

impl Collection for Leads {
    const KEY: &'static str = "leads";
    type Record = Lead;
}

/// How to treat a payload that does not decode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PayloadPolicy {
    /// Treat it as absent and log a warning.
    #[default]
    FailOpen,
    /// Surface [`RecordStoreError::Malformed`].
    Strict,
}

impl PayloadPolicy {
    /// Policy for the `strict_payloads` setting.
    #[must_use]
    pub const fn from_strict(strict: bool) -> Self {
        if strict { Self::Strict } else { Self::FailOpen }
    }
}

/// Errors raised by [`RecordStore`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordStoreError {
    /// The underlying store failed.
    #[error(transparent)]
    Store(#[from] KeyValueStoreError),
    /// A stored payload could not be decoded.
    #[error("malformed payload under {key}: {message}")]
    Malformed {
        /// Collection key.
        key: &'static str,
        /// Decoder message.
        message: String,
    },
    /// Records could not be encoded.
    #[error("failed to encode {key}: {message}")]
    Encode {
        /// Collection key.
        key: &'static str,
        /// Encoder message.
        message: String,
    },
    /// The seed strategy failed.
    #[error(transparent)]
    Seed(#[from] SeedSourceError),
}

/// Records read together with the revision they were read at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot<R> {
    /// Decoded records.
    pub records: Vec<R>,
    /// Revision to pass to [`RecordStore::write_if_revision`].
    pub revision: Revision,
}

/// Result of [`RecordStore::initialize_if_absent`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InitOutcome {
    /// The collection was absent and has been seeded.
    Seeded {
        /// Number of records written.
        count: usize,
    },
    /// The collection already held a value; nothing changed.
    AlreadyPresent,
}

/// Typed access to the collections held by a [`KeyValueStore`].
pub struct RecordStore<S> {
    store: Arc<S>,
    policy: PayloadPolicy,
}

impl<S> Clone for RecordStore<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            policy: self.policy,
        }
    }
}

impl<S> RecordStore<S> {
    /// Wrap `store` with the given malformed-payload policy.
    pub const fn new(store: Arc<S>, policy: PayloadPolicy) -> Self {
        Self { store, policy }
    }

    /// Active malformed-payload policy.
    #[must_use]
    pub const fn policy(&self) -> PayloadPolicy {
        self.policy
    }
}

impl<S: KeyValueStore> RecordStore<S> {
    /// Read a collection; absent reads as empty.
    ///
    /// # Errors
    ///
    /// Returns [`RecordStoreError`] on store failures, or on undecodable
    /// payloads under [`PayloadPolicy::Strict`].
    pub fn read<C: Collection>(&self) -> Result<Vec<C::Record>, RecordStoreError> {
        self.read_versioned::<C>().map(|snapshot| snapshot.records)
    }

    /// Read a collection along with its revision.
    ///
    /// # Errors
    ///
    /// See [`RecordStore::read`].
    pub fn read_versioned<C: Collection>(&self) -> Result<Snapshot<C::Record>, RecordStoreError> {
        let versioned = self.store.get(C::KEY)?;
        let records = match versioned.payload {
            None => Vec::new(),
            Some(payload) => self.decode::<C>(&payload)?,
        };
        Ok(Snapshot {
            records,
            revision: versioned.revision,
        })
    }

    /// Replace a collection unconditionally.
    ///
    /// # Errors
    ///
    /// Returns [`RecordStoreError`] when encoding or the store write fails.
    pub fn write<C: Collection>(&self, records: &[C::Record]) -> Result<Revision, RecordStoreError> {
        let payload = encode::<C>(records)?;
        Ok(self.store.set(C::KEY, &payload)?)
    }

    /// Replace a collection if it is still at `expected`.
    ///
    /// # Errors
    ///
    /// Returns [`RecordStoreError::Store`] wrapping
    /// [`KeyValueStoreError::RevisionMismatch`] when another write landed
    /// first.
    pub fn write_if_revision<C: Collection>(
        &self,
        expected: Revision,
        records: &[C::Record],
    ) -> Result<Revision, RecordStoreError> {
        let payload = encode::<C>(records)?;
        Ok(self.store.compare_and_set(C::KEY, expected, &payload)?)
    }

    /// Seed a collection with `seed()` unless the key already holds a value.
    ///
    /// `seed` only runs when the key is absent. A present but malformed value
    /// counts as present and is left alone.
    ///
    /// # Errors
    ///
    /// Returns [`RecordStoreError`] when seeding or the store fails.
    pub fn initialize_if_absent<C, F>(&self, seed: F) -> Result<InitOutcome, RecordStoreError>
    where
        C: Collection,
        F: FnOnce() -> Result<Vec<C::Record>, SeedSourceError>,
    {
        let current = self.store.get(C::KEY)?;
        if current.payload.is_some() {
            return Ok(InitOutcome::AlreadyPresent);
        }

        let records = seed()?;
        let payload = encode::<C>(&records)?;
        match self.store.compare_and_set(C::KEY, current.revision, &payload) {
            Ok(_) => {
                info!(collection = C::KEY, count = records.len(), "seeded collection");
                Ok(InitOutcome::Seeded {
                    count: records.len(),
                })
            }
            Err(KeyValueStoreError::RevisionMismatch { .. }) => Ok(InitOutcome::AlreadyPresent),
            Err(err) => Err(err.into()),
        }
    }

    fn decode<C: Collection>(&self, payload: &str) -> Result<Vec<C::Record>, RecordStoreError> {
        match serde_json::from_str(payload) {
            Ok(records) => Ok(records),
            Err(err) => match self.policy {
                PayloadPolicy::FailOpen => {
                    warn!(collection = C::KEY, error = %err, "malformed payload treated as empty");
                    Ok(Vec::new())
                }
                PayloadPolicy::Strict => Err(RecordStoreError::Malformed {
                    key: C::KEY,
                    message: err.to_string(),
                }),
            },
        }
    }
}

fn encode<C: Collection>(records: &[C::Record]) -> Result<String, RecordStoreError> {
    serde_json::to_string(records).map_err(|err| RecordStoreError::Encode {
        key: C::KEY,
        message: err.to_string(),
    })
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::ports::{MockKeyValueStore, VersionedPayload};
    use mockall::predicate::eq;
    use rstest::rstest;

    fn store_returning(payload: Option<&str>, revision: Revision) -> MockKeyValueStore {
        let mut store = MockKeyValueStore::new();
        let owned = payload.map(str::to_owned);
        store.expect_get().returning(move |_| {
            Ok(VersionedPayload {
                payload: owned.clone(),
                revision,
            })
        });
        store
    }

    #[test]
    fn absent_collection_reads_empty() {
        let records = RecordStore::new(Arc::new(store_returning(None, 0)), PayloadPolicy::Strict);
        let users = records.read::<Users>().expect("read succeeds");
        assert!(users.is_empty());
    }

    #[rstest]
    #[case("not json")]
    #[case("{\"users\": []}")]
    #[case("[{\"id\": \"\"}]")]
    fn malformed_payload_fails_open(#[case] payload: &str) {
        let records = RecordStore::new(
            Arc::new(store_returning(Some(payload), 1)),
            PayloadPolicy::FailOpen,
        );
        let snapshot = records.read_versioned::<Users>().expect("fail open");
        assert!(snapshot.records.is_empty());
        assert_eq!(snapshot.revision, 1);
    }

    #[test]
    fn malformed_payload_errors_when_strict() {
        let records = RecordStore::new(
            Arc::new(store_returning(Some("not json"), 1)),
            PayloadPolicy::Strict,
        );
        let err = records.read::<Leads>().expect_err("strict mode rejects");
        assert!(matches!(err, RecordStoreError::Malformed { key: "leads", .. }));
    }

    #[test]
    fn initialize_skips_seed_when_present() {
        let mut store = store_returning(Some("[]"), 1);
        store.expect_compare_and_set().never();
        let records = RecordStore::new(Arc::new(store), PayloadPolicy::FailOpen);

        let outcome = records
            .initialize_if_absent::<Users, _>(|| Err(SeedSourceError::generation("must not run")))
            .expect("initialize");
        assert_eq!(outcome, InitOutcome::AlreadyPresent);
    }

    #[test]
    fn initialize_creates_at_revision_zero() {
        let mut store = store_returning(None, 0);
        store
            .expect_compare_and_set()
            .with(eq("users"), eq(0_u64), eq("[]"))
            .times(1)
            .returning(|_, _, _| Ok(1));
        let records = RecordStore::new(Arc::new(store), PayloadPolicy::FailOpen);

        let outcome = records
            .initialize_if_absent::<Users, _>(|| Ok(Vec::new()))
            .expect("initialize");
        assert_eq!(outcome, InitOutcome::Seeded { count: 0 });
    }

    #[test]
    fn initialize_yields_to_a_concurrent_seeder() {
        let mut store = store_returning(None, 0);
        store
            .expect_compare_and_set()
            .returning(|key, expected, _| {
                Err(KeyValueStoreError::revision_mismatch(key, expected, 1_u64))
            });
        let records = RecordStore::new(Arc::new(store), PayloadPolicy::FailOpen);

        let outcome = records
            .initialize_if_absent::<Leads, _>(|| Ok(Vec::new()))
            .expect("initialize");
        assert_eq!(outcome, InitOutcome::AlreadyPresent);
    }

    #[test]
    fn seed_failures_propagate() {
        let records = RecordStore::new(Arc::new(store_returning(None, 0)), PayloadPolicy::FailOpen);
        let err = records
            .initialize_if_absent::<Users, _>(|| Err(SeedSourceError::generation("exhausted")))
            .expect_err("seed error surfaces");
        assert!(matches!(err, RecordStoreError::Seed(_)));
    }

    #[rstest]
    #[case(false, PayloadPolicy::FailOpen)]
    #[case(true, PayloadPolicy::Strict)]
    fn policy_follows_strict_flag(#[case] strict: bool, #[case] expected: PayloadPolicy) {
        assert_eq!(PayloadPolicy::from_strict(strict), expected);
    }
}
