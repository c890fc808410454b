//! The external venue source seam.

use std::future::Future;

use cafefind_core::{Location, NewVenue};
use cafefind_overpass::{OverpassClient, OverpassError};

/// Where venues come from when the local store has too few.
pub trait VenueSource: Send + Sync {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Fetch venues within `radius_m` meters of `location`.
    fn fetch_nearby(
        &self,
        location: Location,
        radius_m: u32,
    ) -> impl Future<Output = Result<Vec<NewVenue>, Self::Error>> + Send;
}

impl VenueSource for OverpassClient {
    type Error = OverpassError;

    async fn fetch_nearby(
        &self,
        location: Location,
        radius_m: u32,
    ) -> Result<Vec<NewVenue>, OverpassError> {
        OverpassClient::fetch_nearby(self, location, radius_m).await
    }
}
