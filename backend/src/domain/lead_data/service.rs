//! Core entry points: initialisation, reads, and update-by-id.

use std::sync::Arc;

use serde_json::json;
use tracing::{debug, warn};

use crate::domain::ports::{KeyValueStore, KeyValueStoreError, SeedSource};
use crate::domain::record_store::{
    Collection, InitOutcome, Leads, RecordStore, RecordStoreError, Snapshot, Users,
};
use crate::domain::{Actor, DomainError, Lead, LoginCredentials, User, UserId, UserPatch};

/// Attempts an update makes before giving up on a contended collection.
pub const MAX_UPDATE_ATTEMPTS: usize = 5;

/// Result of an update-by-id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateOutcome {
    /// The record was found and the collection rewritten.
    Applied,
    /// No record carries the id; nothing was written.
    NotFound,
}

/// Service over the `users` and `leads` collections.
pub struct LeadDataService<S, G> {
    records: RecordStore<S>,
    seeds: Arc<G>,
}

impl<S, G> Clone for LeadDataService<S, G> {
    fn clone(&self) -> Self {
        Self {
            records: self.records.clone(),
            seeds: Arc::clone(&self.seeds),
        }
    }
}

impl<S, G> LeadDataService<S, G> {
    /// Create a service over `records`, seeding empty stores from `seeds`.
    pub const fn new(records: RecordStore<S>, seeds: Arc<G>) -> Self {
        Self { records, seeds }
    }

    /// Underlying record store.
    #[must_use]
    pub const fn records(&self) -> &RecordStore<S> {
        &self.records
    }
}

impl<S, G> LeadDataService<S, G>
where
    S: KeyValueStore,
    G: SeedSource,
{
    /// Seed the user roster if the store has none.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError`] when the store or the seed source fails.
    pub fn initialize_users(&self) -> Result<InitOutcome, DomainError> {
        self.records
            .initialize_if_absent::<Users, _>(|| self.seeds.users())
            .map_err(map_record_store_error)
    }

    /// Seed users, then leads for the stored users, each only if absent.
    ///
    /// Returns the outcome for the leads collection.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError`] when the store or the seed source fails.
    pub fn initialize_data(&self) -> Result<InitOutcome, DomainError> {
        self.initialize_users()?;
        let users = self.get_users()?;
        self.records
            .initialize_if_absent::<Leads, _>(|| self.seeds.leads(&users))
            .map_err(map_record_store_error)
    }

    /// All stored users; empty when absent.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError`] when the store fails or, in strict mode, the
    /// payload is malformed.
    pub fn get_users(&self) -> Result<Vec<User>, DomainError> {
        self.records.read::<Users>().map_err(map_record_store_error)
    }

    /// All stored leads; empty when absent.
    ///
    /// # Errors
    ///
    /// See [`LeadDataService::get_users`].
    pub fn get_leads(&self) -> Result<Vec<Lead>, DomainError> {
        self.records.read::<Leads>().map_err(map_record_store_error)
    }

    /// Shallow-merge `patch` into the user with `id`.
    ///
    /// An unknown id writes nothing and yields [`UpdateOutcome::NotFound`].
    ///
    /// # Errors
    ///
    /// Returns a [`crate::domain::ErrorCode::Conflict`] error when the
    /// collection kept changing underneath the update.
    pub fn update_user(&self, id: &UserId, patch: &UserPatch) -> Result<UpdateOutcome, DomainError> {
        self.update_collection::<Users, _>(id.as_ref(), |users| {
            let Some(user) = users.iter_mut().find(|user| user.id == *id) else {
                return false;
            };
            patch.apply_to(user);
            true
        })
    }

    /// Replace the stored lead whose id matches `lead.id`.
    ///
    /// An unknown id writes nothing and yields [`UpdateOutcome::NotFound`].
    ///
    /// # Errors
    ///
    /// See [`LeadDataService::update_user`].
    pub fn update_lead(&self, lead: &Lead) -> Result<UpdateOutcome, DomainError> {
        self.update_collection::<Leads, _>(lead.id.as_ref(), |leads| {
            let Some(stored) = leads.iter_mut().find(|stored| stored.id == lead.id) else {
                return false;
            };
            stored.clone_from(lead);
            true
        })
    }

    /// Resolve credentials to the matching user, seeding users first.
    ///
    /// # Errors
    ///
    /// Returns an [`crate::domain::ErrorCode::Unauthorized`] error when no
    /// active user carries the credentials.
    pub fn login(&self, credentials: &LoginCredentials) -> Result<Actor, DomainError> {
        self.initialize_users()?;
        self.get_users()?
            .iter()
            .find(|user| credentials.matches(user))
            .map(Actor::from)
            .ok_or_else(|| DomainError::unauthorized("invalid credentials"))
    }

    /// Read-modify-write with revision checks.
    ///
    /// `apply` edits the freshly read records and returns `false` when the
    /// target is missing. It may run once per attempt.
    pub(super) fn update_collection<C, F>(
        &self,
        id: &str,
        mut apply: F,
    ) -> Result<UpdateOutcome, DomainError>
    where
        C: Collection,
        F: FnMut(&mut [C::Record]) -> bool,
    {
        for attempt in 1..=MAX_UPDATE_ATTEMPTS {
            let Snapshot {
                mut records,
                revision,
            } = self
                .records
                .read_versioned::<C>()
                .map_err(map_record_store_error)?;

            if !apply(&mut records) {
                warn!(collection = C::KEY, id, "update target not found; nothing written");
                return Ok(UpdateOutcome::NotFound);
            }

            match self.records.write_if_revision::<C>(revision, &records) {
                Ok(_) => return Ok(UpdateOutcome::Applied),
                Err(RecordStoreError::Store(KeyValueStoreError::RevisionMismatch {
                    actual, ..
                })) => {
                    debug!(collection = C::KEY, id, attempt, actual, "revision moved; retrying");
                }
                Err(err) => return Err(map_record_store_error(err)),
            }
        }

        Err(DomainError::conflict("collection changed during update").with_details(json!({
            "collection": C::KEY,
            "id": id,
            "attempts": MAX_UPDATE_ATTEMPTS,
            "code": "revision_mismatch",
        })))
    }
}

pub(super) fn map_record_store_error(error: RecordStoreError) -> DomainError {
    match error {
        RecordStoreError::Store(KeyValueStoreError::RevisionMismatch {
            key,
            expected,
            actual,
        }) => DomainError::conflict("revision mismatch").with_details(json!({
            "collection": key,
            "expectedRevision": expected,
            "actualRevision": actual,
            "code": "revision_mismatch",
        })),
        RecordStoreError::Store(KeyValueStoreError::Io { key, message }) => {
            DomainError::internal(format!("record store unavailable: {message}"))
                .with_details(json!({ "collection": key, "code": "store_io" }))
        }
        RecordStoreError::Malformed { key, message } => {
            DomainError::internal(format!("stored {key} are malformed: {message}"))
                .with_details(json!({ "collection": key, "code": "malformed_payload" }))
        }
        RecordStoreError::Encode { key, message } => {
            DomainError::internal(format!("failed to encode {key}: {message}"))
        }
        RecordStoreError::Seed(err) => DomainError::internal(err.to_string()),
    }
}
