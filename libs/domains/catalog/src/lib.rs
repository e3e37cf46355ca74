//! Catalog Domain
//!
//! Categories and products form one referential-integrity boundary: every
//! product references an existing category, and a category cannot be
//! deleted while any product references it. This crate owns both services.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  ← HTTP endpoints
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │  Services   │  ← Business rules, envelope construction
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │ Repositories│  ← Data access (traits + implementations)
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Models    │  ← Domain models, DTOs
//! └─────────────┘
//! ```

pub mod entity;
pub mod error;
pub mod handlers;
pub mod models;
pub mod postgres;
pub mod repository;
pub mod service;

// Re-export commonly used types
pub use error::{CatalogError, CatalogResult};
pub use models::{
    Category, CategoryRequest, CategoryResponse, PageParams, PageRequest, Product,
    ProductRequest, ProductResponse, ProductSearchParams, StockUpdateRequest,
};
pub use postgres::{PgCategoryRepository, PgProductRepository};
pub use repository::{CategoryRepository, InMemoryCatalog, ProductRepository};
pub use service::{CategoryService, ProductService};
