use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr};
use sea_orm_migration::MigratorTrait;
use tracing::info;

use super::PostgresConfig;
use crate::common::{retry_with_backoff, DatabaseError, RetryConfig};

/// Connect to PostgreSQL with the pool settings from `config`.
pub async fn connect(config: PostgresConfig) -> Result<DatabaseConnection, DbErr> {
    connect_with_options(config.into_connect_options()).await
}

/// Connect with custom connection options.
pub async fn connect_with_options(options: ConnectOptions) -> Result<DatabaseConnection, DbErr> {
    let db = Database::connect(options).await?;
    info!("connected to PostgreSQL");
    Ok(db)
}

/// Connect with automatic retry on failure.
///
/// Uses exponential backoff; intended for startup, where the database may
/// still be coming up.
pub async fn connect_with_retry(
    config: &PostgresConfig,
    retry_config: Option<RetryConfig>,
) -> Result<DatabaseConnection, DatabaseError> {
    retry_with_backoff(
        || connect(config.clone()),
        retry_config.unwrap_or_default(),
    )
    .await
    .map_err(|e| DatabaseError::ConnectionFailed(e.to_string()))
}

/// Apply all pending migrations of `M`.
pub async fn run_migrations<M: MigratorTrait>(
    db: &DatabaseConnection,
) -> Result<(), DatabaseError> {
    info!("running database migrations");
    M::up(db, None)
        .await
        .map_err(|e| DatabaseError::MigrationError(e.to_string()))?;
    info!("database migrations complete");
    Ok(())
}
