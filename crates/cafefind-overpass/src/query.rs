//! Overpass QL query construction.

use std::fmt::Write as _;

use cafefind_core::Location;

/// Tag criteria that identify a coffee venue. Any one match is enough.
const COFFEE_TAGS: [(&str, &str); 3] = [
    ("amenity", "cafe"),
    ("shop", "coffee"),
    ("cuisine", "coffee_shop"),
];

/// OSM element kinds queried for each tag criterion.
const ELEMENT_KINDS: [&str; 2] = ["node", "way"];

const AROUND_TIMEOUT_SECS: u32 = 25;
const COUNTRY_TIMEOUT_SECS: u32 = 60;

/// The region a query covers.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryArea {
    /// A circle of `radius_m` meters around `location`.
    Around { location: Location, radius_m: u32 },
    /// A whole country, by ISO 3166-1 alpha-2 code (already validated).
    Country { iso_code: String },
}

/// Build the Overpass QL text for coffee venues in `area`.
///
/// The result unions every [`ELEMENT_KINDS`] × [`COFFEE_TAGS`] pair and ends
/// with `out center;` so ways come back with a representative point.
#[must_use]
pub fn build_query(area: &QueryArea) -> String {
    let (timeout, header, filter) = match area {
        QueryArea::Around { location, radius_m } => (
            AROUND_TIMEOUT_SECS,
            String::new(),
            format!("(around:{radius_m},{},{})", location.lat, location.lon),
        ),
        QueryArea::Country { iso_code } => (
            COUNTRY_TIMEOUT_SECS,
            format!("area[\"ISO3166-1\"=\"{iso_code}\"][admin_level=2]->.country;\n"),
            "(area.country)".to_string(),
        ),
    };

    let mut query = format!("[out:json][timeout:{timeout}];\n{header}(\n");
    for (key, value) in COFFEE_TAGS {
        for kind in ELEMENT_KINDS {
            // Writing to a String cannot fail.
            let _ = writeln!(query, "  {kind}[\"{key}\"=\"{value}\"]{filter};");
        }
    }
    query.push_str(");\nout center;\n");
    query
}
