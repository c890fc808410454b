//! Database operations for the `coffee_shops` table.

mod fresh;
mod read;
mod types;
mod write;

pub use fresh::filter_fresh;
pub use read::{find_nearby_venues, get_venue_by_source};
pub use types::{UpsertSummary, VenueRow};
pub use write::upsert_venues;
