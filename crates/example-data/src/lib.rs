//! Randomised mock user and lead data for demonstration purposes.
//!
//! This crate fabricates the seed records a fresh leadboard store starts
//! with. It is designed to be independent of backend domain types to avoid
//! circular dependencies: it emits plain seed structs which the backend maps
//! onto its own `User` and `Lead` entities.
//!
//! # Overview
//!
//! The crate supports:
//!
//! - A fixed roster of five users spread over two organizations
//! - Generic network leads plus ten leads per organization
//! - Reproducible output from a named `u64` seed, or fresh entropy
//! - Short random record identifiers that are unique within a run
//!
//! # Example
//!
//! ```
//! use example_data::{MockDataGenerator, OrganizationMember};
//!
//! let mut generator = MockDataGenerator::from_seed(42);
//! let users = generator.generate_users().expect("users generated");
//! let members: Vec<OrganizationMember> = users.iter().map(OrganizationMember::from).collect();
//! let leads = generator.generate_leads(&members).expect("leads generated");
//!
//! assert_eq!(users.len(), 5);
//! // 10 network leads plus 10 for each of the two organizations.
//! assert_eq!(leads.len(), 30);
//! ```

mod catalogue;
mod error;
mod generator;
mod seed;
mod validation;

pub use catalogue::{GROUP_NAMES, LOCATIONS, ORGANIZATION_LEADS_PER_ORG, RECEPTO_NET_LEADS};
pub use error::GenerationError;
pub use generator::MockDataGenerator;
pub use seed::{LeadKindSeed, LeadSeed, OrganizationMember, PersonSeed, RoleSeed, UserSeed};
pub use validation::{RECORD_ID_LENGTH, is_valid_record_id};
