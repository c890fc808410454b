//! Database operations for the `search_logs` table.

use cafefind_core::LocationMode;
use sqlx::PgPool;

/// Input record for a search log entry.
#[derive(Debug, Clone, Copy)]
pub struct NewSearchLog {
    pub search_lat: f64,
    pub search_lon: f64,
    pub search_mode: LocationMode,
    pub radius_km: f64,
}

/// Record a search and return the new row's `id`.
///
/// # Errors
///
/// Returns [`sqlx::Error`] if the insert fails.
pub async fn insert_search_log(pool: &PgPool, log: &NewSearchLog) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar::<_, i64>(
        "INSERT INTO search_logs (search_lat, search_lon, search_mode, radius_km) \
         VALUES ($1, $2, $3, $4) \
         RETURNING id",
    )
    .bind(log.search_lat)
    .bind(log.search_lon)
    .bind(log.search_mode.as_str())
    .bind(log.radius_km)
    .fetch_one(pool)
    .await
}
