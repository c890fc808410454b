//! Obtaining the search point, and the locate-then-search entry point.

use std::future::Future;

use cafefind_core::{CoreError, Location, LocationMode, SearchSettings, StatusEvent};
use thiserror::Error;

use crate::search::{SearchOutcome, Searcher};
use crate::sink::StatusSink;
use crate::source::VenueSource;
use crate::store::VenueStore;

/// Why a location could not be obtained. Messages are shown to the user as-is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum LocateError {
    #[error("Location access denied by user")]
    PermissionDenied,
    #[error("Location information unavailable")]
    Unavailable,
    #[error("Location request timed out")]
    Timeout,
    #[error("Geolocation is not supported")]
    Unsupported,
}

/// A source of the point to search around.
pub trait LocationProvider: Send + Sync {
    /// How the point was chosen, for the search log.
    fn mode(&self) -> LocationMode;

    fn locate(&self) -> impl Future<Output = Result<Location, LocateError>> + Send;
}

/// A point chosen up front: a map centre or coordinates typed by the user.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedLocation(Location);

impl FixedLocation {
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidLocation`] for out-of-range coordinates.
    pub fn new(lat: f64, lon: f64) -> Result<Self, CoreError> {
        Location::new(lat, lon).map(Self)
    }
}

impl From<Location> for FixedLocation {
    fn from(location: Location) -> Self {
        Self(location)
    }
}

impl LocationProvider for FixedLocation {
    fn mode(&self) -> LocationMode {
        LocationMode::MapCenter
    }

    async fn locate(&self) -> Result<Location, LocateError> {
        Ok(self.0)
    }
}

/// Provider for hosts without a positioning sensor; always unsupported.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoSensor;

impl LocationProvider for NoSensor {
    fn mode(&self) -> LocationMode {
        LocationMode::Current
    }

    async fn locate(&self) -> Result<Location, LocateError> {
        Err(LocateError::Unsupported)
    }
}

/// Locate, log the search, then run it.
///
/// # Errors
///
/// Returns the [`LocateError`] when no location could be obtained; an
/// `Error: <message>` status has already been emitted and no search ran.
pub async fn find_nearby<P, S, F, K>(
    provider: &P,
    searcher: &Searcher<S, F>,
    settings: &SearchSettings,
    sink: &K,
) -> Result<SearchOutcome, LocateError>
where
    P: LocationProvider,
    S: VenueStore,
    F: VenueSource,
    K: StatusSink,
{
    let location = match provider.locate().await {
        Ok(location) => location,
        Err(e) => {
            tracing::warn!(error = %e, "could not determine search location");
            sink.emit(StatusEvent::error(format!("Error: {e}")));
            return Err(e);
        }
    };

    sink.emit(StatusEvent::success(format!(
        "Location found: {:.4}, {:.4}",
        location.lat, location.lon
    )));

    searcher
        .store()
        .record_search(location, provider.mode(), settings.radius_km())
        .await;

    Ok(searcher.search(location, settings, sink).await)
}
