//! Read operations for the `coffee_shops` table.

use cafefind_core::{SourceType, Venue};
use sqlx::PgPool;

use super::types::VenueRow;
use crate::DbError;

/// Return venues within `radius_km` of a point, nearest first, at most
/// `max_results` of them.
///
/// Backed by the `find_nearby_cafe` SQL function (haversine distance).
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails, or [`DbError::InvalidRow`]
/// if a stored `osm_type` is not a known source type.
pub async fn find_nearby_venues(
    pool: &PgPool,
    lat: f64,
    lon: f64,
    radius_km: f64,
    max_results: u32,
) -> Result<Vec<Venue>, DbError> {
    let max_results = i32::try_from(max_results).unwrap_or(i32::MAX);

    let rows = sqlx::query_as::<_, VenueRow>(
        "SELECT osm_type, osm_id, name, latitude, longitude, address, opening_hours, \
                phone, website, suburb, city, created_at, updated_at, distance_km \
         FROM find_nearby_cafe($1, $2, $3, $4)",
    )
    .bind(lat)
    .bind(lon)
    .bind(radius_km)
    .bind(max_results)
    .fetch_all(pool)
    .await?;

    rows.into_iter()
        .map(|row| Venue::try_from(row).map_err(DbError::from))
        .collect()
}

/// Fetch a single venue by its source key.
///
/// Returns `Ok(None)` when no row matches.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails, or [`DbError::InvalidRow`]
/// if the stored row cannot be converted.
pub async fn get_venue_by_source(
    pool: &PgPool,
    source_type: SourceType,
    source_id: i64,
) -> Result<Option<Venue>, DbError> {
    let row = sqlx::query_as::<_, VenueRow>(
        "SELECT osm_type, osm_id, name, latitude, longitude, address, opening_hours, \
                phone, website, suburb, city, created_at, updated_at, \
                NULL::float8 AS distance_km \
         FROM coffee_shops \
         WHERE osm_type = $1 AND osm_id = $2",
    )
    .bind(source_type.as_str())
    .bind(source_id)
    .fetch_optional(pool)
    .await?;

    row.map(Venue::try_from).transpose().map_err(DbError::from)
}
