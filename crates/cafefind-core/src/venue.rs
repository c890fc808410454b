//! Venue records and search locations.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::CoreError;

/// Name stored for venues whose source data carries no `name` tag.
pub const UNNAMED_VENUE: &str = "Unnamed Venue";

/// The OSM element kind a venue was derived from.
///
/// Together with the element id this forms the venue's unique key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceType {
    Node,
    Way,
}

impl SourceType {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            SourceType::Node => "node",
            SourceType::Way => "way",
        }
    }
}

impl fmt::Display for SourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SourceType {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "node" => Ok(SourceType::Node),
            "way" => Ok(SourceType::Way),
            other => Err(CoreError::InvalidSourceType(other.to_string())),
        }
    }
}

/// A point on the map a search is centred on.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub lat: f64,
    pub lon: f64,
}

impl Location {
    /// Build a location, rejecting coordinates outside the WGS84 ranges.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidLocation`] when either coordinate is out of
    /// range or not finite.
    pub fn new(lat: f64, lon: f64) -> Result<Self, CoreError> {
        let invalid = |reason: &str| CoreError::InvalidLocation {
            lat,
            lon,
            reason: reason.to_string(),
        };

        if !lat.is_finite() || !lon.is_finite() {
            return Err(invalid("coordinates must be finite"));
        }
        if !(-90.0..=90.0).contains(&lat) {
            return Err(invalid("latitude must be within [-90, 90]"));
        }
        if !(-180.0..=180.0).contains(&lon) {
            return Err(invalid("longitude must be within [-180, 180]"));
        }

        Ok(Self { lat, lon })
    }
}

/// Input record for upserting a venue.
///
/// Produced by the external data adapter; timestamps are assigned by the
/// store on write.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewVenue {
    pub source_type: SourceType,
    pub source_id: i64,
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub address: Option<String>,
    pub opening_hours: Option<String>,
    pub phone: Option<String>,
    pub website: Option<String>,
    pub suburb: Option<String>,
    pub city: Option<String>,
}

/// A venue as read back from the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Venue {
    pub source_type: SourceType,
    pub source_id: i64,
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub address: Option<String>,
    pub opening_hours: Option<String>,
    pub phone: Option<String>,
    pub website: Option<String>,
    pub suburb: Option<String>,
    pub city: Option<String>,
    /// Great-circle distance from the search point, when read by proximity.
    pub distance_km: Option<f64>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Venue {
    /// The timestamp freshness is judged by: `updated_at`, else `created_at`.
    #[must_use]
    pub fn last_touched(&self) -> Option<DateTime<Utc>> {
        self.updated_at.or(self.created_at)
    }
}
