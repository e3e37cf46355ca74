//! PostgreSQL connectivity for the workspace.
//!
//! Provides the connector (pooling, startup retry, migrations, ping), the
//! environment-driven [`postgres::PostgresConfig`], a unified
//! [`DatabaseError`], and the generic [`BaseRepository`] the SeaORM
//! repository implementations build on.
//!
//! # Example
//!
//! ```ignore
//! use database::postgres;
//! use migration::Migrator;
//!
//! let db = postgres::connect_with_retry(&config.database, None).await?;
//! postgres::run_migrations::<Migrator>(&db).await?;
//! ```

pub mod common;
pub mod postgres;
pub mod repository;

pub use common::{DatabaseError, DatabaseResult};
pub use repository::BaseRepository;
