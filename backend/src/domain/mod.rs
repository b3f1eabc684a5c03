//! Domain primitives, services, and ports.
//!
//! Purpose: define the user and lead records, the typed record store over
//! the key-value port, and the service carrying every data entry point.
//! Keep adapters out: nothing here knows about files, Tokio, or the mock
//! data generator.
//!
//! Public surface:
//! - `DomainError` / `ErrorCode`: transport-agnostic failures.
//! - `User`, `UserPatch`, `Lead`, `Actor`: stored records and the session actor.
//! - `RecordStore`: typed collection access with revision checks.
//! - `LeadDataService`: initialise, read, update, feed and team commands.
//! - `views`: pure filtering, scoping, and feed helpers.

pub mod auth;
pub mod error;
pub mod lead;
pub mod lead_data;
pub mod ports;
pub mod record_store;
pub mod user;
pub mod views;

pub use self::auth::{Actor, LoginCredentials, LoginValidationError};
pub use self::error::{DomainError, DomainErrorValidationError, ErrorCode};
pub use self::lead::{Lead, LeadId, LeadKind, LeadValidationError, Person, Reaction, Score};
pub use self::lead_data::{LeadDataService, MAX_UPDATE_ATTEMPTS, TEAM_PAGE_SIZE, UpdateOutcome};
pub use self::record_store::{
    Collection, InitOutcome, Leads, PayloadPolicy, RecordStore, RecordStoreError, Snapshot, Users,
};
pub use self::user::{Role, User, UserId, UserPatch, UserStatus, UserValidationError};
