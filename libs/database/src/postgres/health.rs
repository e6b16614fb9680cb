use sea_orm::DatabaseConnection;
use std::time::Instant;
use tracing::debug;

use crate::common::DatabaseError;

/// Round-trips to the server; used by `/ready`.
pub async fn check_health(db: &DatabaseConnection) -> Result<(), DatabaseError> {
    let start = Instant::now();

    db.ping()
        .await
        .map_err(|e| DatabaseError::HealthCheckFailed(format!("PostgreSQL ping failed: {e}")))?;

    debug!(elapsed_ms = start.elapsed().as_millis() as u64, "PostgreSQL health check passed");
    Ok(())
}
