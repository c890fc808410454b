//! Overpass API adapter: query building, HTTP transport, and conversion of
//! OSM elements into [`cafefind_core::NewVenue`] records.

pub mod client;
pub mod error;
pub mod parse;
pub mod query;
pub mod types;

pub use client::OverpassClient;
pub use error::OverpassError;
pub use parse::{build_address, parse_elements};
pub use query::{build_query, QueryArea};
pub use types::{Center, Element, OverpassResponse};
