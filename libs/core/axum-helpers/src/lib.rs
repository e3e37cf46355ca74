//! # Axum Helpers
//!
//! Shared boundary utilities for the HTTP services in this workspace.
//!
//! ## Modules
//!
//! - **[`envelope`]**: the uniform response envelope every service operation
//!   returns, plus its status classification
//! - **[`extractors`]**: custom extractors (validated JSON/query, UUID path
//!   parameters, gateway-forwarded user id)
//! - **[`responses`]**: reusable OpenAPI error-response documentation
//! - **[`health`]**: liveness endpoint
//! - **[`server`]**: graceful-shutdown signal

pub mod envelope;
pub mod extractors;
pub mod health;
pub mod responses;
pub mod server;

// Re-export the envelope types
pub use envelope::{Envelope, ErrorEnvelope, Status};

// Re-export extractors
pub use extractors::{UserId, UuidPath, ValidatedJson, ValidatedQuery, USER_ID_HEADER};

// Re-export server helpers
pub use health::{health_router, HealthResponse};
pub use server::shutdown_signal;
