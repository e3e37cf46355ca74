//! Business-rule layer for the catalog.
//!
//! Every public operation returns an [`axum_helpers::Envelope`]: business
//! violations and storage faults alike are converted to failure envelopes
//! here, never surfaced as raw errors to the boundary.

mod categories;
mod products;

pub use categories::CategoryService;
pub use products::ProductService;
