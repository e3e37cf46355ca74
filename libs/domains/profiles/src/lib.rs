//! Profiles Domain
//!
//! User profiles keyed by the identity service's user id. The user id is a
//! named foreign key only — the identity service is the sole source of
//! truth for user existence, and this crate never talks to it.
//!
//! Lifecycle notes that differ from the catalog:
//! - profiles soft-delete (`is_active = false`, row kept, recoverable)
//! - updates are partial patches (only supplied fields overwrite)
//! - reads through the public view are gated on the `is_public` flag

pub mod entity;
pub mod error;
pub mod handlers;
pub mod models;
pub mod postgres;
pub mod repository;
pub mod service;

// Re-export commonly used types
pub use error::{ProfileError, ProfileResult};
pub use models::{
    CreateProfileRequest, Profile, ProfileResponse, ProfileSearchParams, ProfileStats,
    PublicProfileResponse, UpdateProfileRequest,
};
pub use postgres::PgProfileRepository;
pub use repository::{InMemoryProfileRepository, ProfileRepository};
pub use service::ProfileService;
