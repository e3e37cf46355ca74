//! HTTP boundary for the catalog.
//!
//! Handlers extract and validate inputs, call exactly one service
//! operation, and return its envelope; the envelope's `IntoResponse` impl
//! picks the transport status code.

pub mod categories;
pub mod products;
