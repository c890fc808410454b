//! The venue store seam and its Postgres implementation.

use std::future::Future;

use cafefind_core::{Location, LocationMode, NewVenue, Venue};
use cafefind_db::{find_nearby_venues, insert_search_log, upsert_venues, NewSearchLog, UpsertSummary};
use sqlx::PgPool;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum WriteError {
    #[error("failed to save coffee shops: {0}")]
    Database(#[from] sqlx::Error),

    #[error("failed to save coffee shops: {0}")]
    Rejected(String),
}

/// Venue persistence as the search flow sees it.
///
/// Reads are best effort and never fail: an unreadable store looks empty.
/// Writes report failure so the caller can surface it.
pub trait VenueStore: Send + Sync {
    /// Venues within `radius_km` of `location`, nearest first, at most
    /// `max_results` of them.
    fn nearby(
        &self,
        location: Location,
        radius_km: f64,
        max_results: u32,
    ) -> impl Future<Output = Vec<Venue>> + Send;

    /// Insert or overwrite `venues`, keyed on source type and id.
    fn upsert(
        &self,
        venues: &[NewVenue],
    ) -> impl Future<Output = Result<UpsertSummary, WriteError>> + Send;

    /// Record that a search was made. Best effort.
    fn record_search(
        &self,
        _location: Location,
        _mode: LocationMode,
        _radius_km: f64,
    ) -> impl Future<Output = ()> + Send {
        async {}
    }
}

/// [`VenueStore`] backed by the `coffee_shops` table.
#[derive(Debug, Clone)]
pub struct PgVenueStore {
    pool: PgPool,
}

impl PgVenueStore {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    #[must_use]
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

impl VenueStore for PgVenueStore {
    async fn nearby(&self, location: Location, radius_km: f64, max_results: u32) -> Vec<Venue> {
        match find_nearby_venues(&self.pool, location.lat, location.lon, radius_km, max_results)
            .await
        {
            Ok(venues) => venues,
            Err(e) => {
                tracing::error!(error = %e, "failed to read coffee shops from database");
                Vec::new()
            }
        }
    }

    async fn upsert(&self, venues: &[NewVenue]) -> Result<UpsertSummary, WriteError> {
        Ok(upsert_venues(&self.pool, venues).await?)
    }

    async fn record_search(&self, location: Location, mode: LocationMode, radius_km: f64) {
        let log = NewSearchLog {
            search_lat: location.lat,
            search_lon: location.lon,
            search_mode: mode,
            radius_km,
        };
        if let Err(e) = insert_search_log(&self.pool, &log).await {
            tracing::warn!(error = %e, "failed to record search log");
        }
    }
}
