//! Write operations for the `coffee_shops` table.

use std::collections::HashSet;

use cafefind_core::{NewVenue, SourceType};
use sqlx::PgPool;

use super::types::UpsertSummary;

/// Insert new venues and overwrite existing ones keyed on `(osm_type, osm_id)`.
///
/// Uses a single `INSERT … SELECT * FROM UNNEST(…) ON CONFLICT` so the batch
/// is written in one round-trip and either lands entirely or not at all.
/// Existing rows get every field replaced and `updated_at = NOW()`.
///
/// Postgres rejects an `ON CONFLICT DO UPDATE` that touches the same row twice,
/// so repeated keys within `venues` are collapsed first; the last occurrence
/// wins.
///
/// # Errors
///
/// Returns [`sqlx::Error`] if the query fails.
pub async fn upsert_venues(
    pool: &PgPool,
    venues: &[NewVenue],
) -> Result<UpsertSummary, sqlx::Error> {
    let venues = dedupe_last_wins(venues);
    if venues.is_empty() {
        return Ok(UpsertSummary::default());
    }

    // Collect each column into a parallel Vec for UNNEST binding.
    let mut osm_types: Vec<&str> = Vec::with_capacity(venues.len());
    let mut osm_ids: Vec<i64> = Vec::with_capacity(venues.len());
    let mut names: Vec<&str> = Vec::with_capacity(venues.len());
    let mut latitudes: Vec<f64> = Vec::with_capacity(venues.len());
    let mut longitudes: Vec<f64> = Vec::with_capacity(venues.len());
    let mut addresses: Vec<Option<&str>> = Vec::with_capacity(venues.len());
    let mut opening_hours: Vec<Option<&str>> = Vec::with_capacity(venues.len());
    let mut phones: Vec<Option<&str>> = Vec::with_capacity(venues.len());
    let mut websites: Vec<Option<&str>> = Vec::with_capacity(venues.len());
    let mut suburbs: Vec<Option<&str>> = Vec::with_capacity(venues.len());
    let mut cities: Vec<Option<&str>> = Vec::with_capacity(venues.len());

    for venue in &venues {
        osm_types.push(venue.source_type.as_str());
        osm_ids.push(venue.source_id);
        names.push(&venue.name);
        latitudes.push(venue.latitude);
        longitudes.push(venue.longitude);
        addresses.push(venue.address.as_deref());
        opening_hours.push(venue.opening_hours.as_deref());
        phones.push(venue.phone.as_deref());
        websites.push(venue.website.as_deref());
        suburbs.push(venue.suburb.as_deref());
        cities.push(venue.city.as_deref());
    }

    let rows: Vec<bool> = sqlx::query_scalar::<_, bool>(
        "INSERT INTO coffee_shops \
             (osm_type, osm_id, name, latitude, longitude, address, opening_hours, \
              phone, website, suburb, city) \
         SELECT * FROM UNNEST(\
              $1::text[], $2::int8[], $3::text[], $4::float8[], $5::float8[], $6::text[], \
              $7::text[], $8::text[], $9::text[], $10::text[], $11::text[]) \
         ON CONFLICT (osm_type, osm_id) DO UPDATE SET \
             name          = EXCLUDED.name, \
             latitude      = EXCLUDED.latitude, \
             longitude     = EXCLUDED.longitude, \
             address       = EXCLUDED.address, \
             opening_hours = EXCLUDED.opening_hours, \
             phone         = EXCLUDED.phone, \
             website       = EXCLUDED.website, \
             suburb        = EXCLUDED.suburb, \
             city          = EXCLUDED.city, \
             updated_at    = NOW() \
         RETURNING (xmax = 0) AS is_new",
    )
    .bind(&osm_types)
    .bind(&osm_ids)
    .bind(&names)
    .bind(&latitudes)
    .bind(&longitudes)
    .bind(&addresses)
    .bind(&opening_hours)
    .bind(&phones)
    .bind(&websites)
    .bind(&suburbs)
    .bind(&cities)
    .fetch_all(pool)
    .await?;

    let inserted = rows.iter().filter(|&&is_new| is_new).count() as u64;
    let updated = rows.len() as u64 - inserted;

    Ok(UpsertSummary { inserted, updated })
}

/// Drop earlier occurrences of repeated `(source_type, source_id)` keys,
/// keeping the relative order of the survivors.
fn dedupe_last_wins(venues: &[NewVenue]) -> Vec<&NewVenue> {
    let mut seen: HashSet<(SourceType, i64)> = HashSet::with_capacity(venues.len());
    let mut kept: Vec<&NewVenue> = venues
        .iter()
        .rev()
        .filter(|v| seen.insert((v.source_type, v.source_id)))
        .collect();
    kept.reverse();
    kept
}
