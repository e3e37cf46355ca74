use sea_orm::DatabaseConnection;
use tracing::debug;

use crate::common::DatabaseError;

/// Verify the database connection is alive.
///
/// Used by readiness probes.
pub async fn check_health(db: &DatabaseConnection) -> Result<(), DatabaseError> {
    debug!("running PostgreSQL health check");

    db.ping()
        .await
        .map_err(|e| DatabaseError::HealthCheckFailed(format!("PostgreSQL ping failed: {}", e)))?;

    debug!("PostgreSQL health check passed");
    Ok(())
}
