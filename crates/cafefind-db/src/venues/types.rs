//! Row types for the `coffee_shops` table.

use cafefind_core::{CoreError, Venue};
use chrono::{DateTime, Utc};

/// A row from `coffee_shops`, or from the `find_nearby_cafe` function.
///
/// `distance_km` is only populated by the proximity read; point lookups
/// select `NULL` for it.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct VenueRow {
    pub osm_type: String,
    pub osm_id: i64,
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub address: Option<String>,
    pub opening_hours: Option<String>,
    pub phone: Option<String>,
    pub website: Option<String>,
    pub suburb: Option<String>,
    pub city: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub distance_km: Option<f64>,
}

impl TryFrom<VenueRow> for Venue {
    type Error = CoreError;

    fn try_from(row: VenueRow) -> Result<Self, Self::Error> {
        Ok(Venue {
            source_type: row.osm_type.parse()?,
            source_id: row.osm_id,
            name: row.name,
            latitude: row.latitude,
            longitude: row.longitude,
            address: row.address,
            opening_hours: row.opening_hours,
            phone: row.phone,
            website: row.website,
            suburb: row.suburb,
            city: row.city,
            distance_km: row.distance_km,
            created_at: Some(row.created_at),
            updated_at: Some(row.updated_at),
        })
    }
}

/// Outcome of a batch upsert.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UpsertSummary {
    /// Rows that did not exist before.
    pub inserted: u64,
    /// Rows that already existed and were overwritten.
    pub updated: u64,
}

impl UpsertSummary {
    #[must_use]
    pub fn total(&self) -> u64 {
        self.inserted + self.updated
    }
}
