//! Lead and user data service.
//!
//! [`LeadDataService`] owns the record store and the seed strategy. It
//! provides the six data entry points (initialise, read, update) and builds
//! the actor-scoped feed and team commands on top of them.

mod feed_ops;
pub mod service;
mod team_ops;

pub use service::{LeadDataService, MAX_UPDATE_ATTEMPTS, UpdateOutcome};
pub use team_ops::TEAM_PAGE_SIZE;
