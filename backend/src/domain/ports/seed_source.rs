//! Port supplying the records an empty store is seeded with.

use crate::domain::{Lead, User};

use super::define_port_error;

define_port_error! {
    /// Errors raised while producing seed records.
    pub enum SeedSourceError {
        /// The generator could not produce a record set.
        Generation { message: String } => "seed generation failed: {message}",
    }
}

/// Strategy producing initial collection contents.
///
/// Called at most once per collection: only when the collection key is absent
/// from the store.
#[cfg_attr(test, mockall::automock)]
pub trait SeedSource: Send + Sync {
    /// Produce the initial user roster.
    ///
    /// # Errors
    ///
    /// Returns [`SeedSourceError::Generation`] when generation fails.
    fn users(&self) -> Result<Vec<User>, SeedSourceError>;

    /// Produce the initial leads for the given roster.
    ///
    /// # Errors
    ///
    /// Returns [`SeedSourceError::Generation`] when generation fails.
    fn leads(&self, users: &[User]) -> Result<Vec<Lead>, SeedSourceError>;
}
