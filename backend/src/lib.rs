//! Leadboard data layer.
//!
//! Persistent `users` and `leads` collections seeded with mock data on first
//! access, update-by-id mutators guarded by revision checks, and the pure
//! filtering and pagination used to build the lead feed and team views.
//!
//! - [`domain`]: entities, services, and the ports adapters implement.
//! - [`outbound`]: in-memory and directory-backed stores, the mock seed source.
//! - [`inbound`]: the periodic feed refresh task.
//! - [`config`]: settings loaded through `OrthoConfig`.

pub mod config;
pub mod domain;
pub mod inbound;
pub mod outbound;
