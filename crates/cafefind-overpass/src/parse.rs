//! Conversion of Overpass elements into venue records.

use std::collections::HashMap;

use cafefind_core::{NewVenue, SourceType, UNNAMED_VENUE};

use crate::types::{Element, OverpassResponse};

/// Convert every usable element into a [`NewVenue`].
///
/// Nodes use their own coordinates and ways use their `center`. Elements
/// without a usable coordinate, and element kinds other than node/way, are
/// skipped with a warning.
#[must_use]
pub fn parse_elements(response: OverpassResponse) -> Vec<NewVenue> {
    if response.elements.is_empty() {
        tracing::warn!("no coffee shops found in the Overpass response");
        return Vec::new();
    }

    let venues: Vec<NewVenue> = response
        .elements
        .into_iter()
        .filter_map(element_to_venue)
        .collect();

    tracing::debug!(count = venues.len(), "parsed Overpass elements");
    venues
}

fn element_to_venue(element: Element) -> Option<NewVenue> {
    let (source_type, latitude, longitude) = match element.kind.as_str() {
        "node" => match (element.lat, element.lon) {
            (Some(lat), Some(lon)) => (SourceType::Node, lat, lon),
            _ => {
                tracing::warn!(id = element.id, "node without coordinates found, skipping");
                return None;
            }
        },
        "way" => {
            let Some(center) = element.center else {
                tracing::warn!(id = element.id, "way without center found, skipping");
                return None;
            };
            (SourceType::Way, center.lat, center.lon)
        }
        other => {
            tracing::warn!(id = element.id, kind = other, "unsupported element type, skipping");
            return None;
        }
    };

    let tags = &element.tags;

    Some(NewVenue {
        source_type,
        source_id: element.id,
        name: tag(tags, "name").unwrap_or_else(|| UNNAMED_VENUE.to_string()),
        latitude,
        longitude,
        address: build_address(tags),
        opening_hours: tag(tags, "opening_hours"),
        phone: tag(tags, "phone").or_else(|| tag(tags, "mobile")),
        website: tag(tags, "website"),
        suburb: tag(tags, "addr:suburb"),
        city: tag(tags, "addr:city"),
    })
}

/// Format an address from OSM `addr:*` tags.
///
/// Parts, in order: `"<housenumber> <street>"` (or the street alone when there
/// is no house number), suburb, city. Missing parts are skipped; a house
/// number without a street is dropped. Returns `None` when nothing is left.
#[must_use]
pub fn build_address(tags: &HashMap<String, String>) -> Option<String> {
    let mut parts: Vec<String> = Vec::with_capacity(3);

    match (tag(tags, "addr:housenumber"), tag(tags, "addr:street")) {
        (Some(number), Some(street)) => parts.push(format!("{number} {street}")),
        (None, Some(street)) => parts.push(street),
        _ => {}
    }
    parts.extend(tag(tags, "addr:suburb"));
    parts.extend(tag(tags, "addr:city"));

    if parts.is_empty() {
        None
    } else {
        Some(parts.join(", "))
    }
}

/// A tag's value, treating empty strings as absent.
fn tag(tags: &HashMap<String, String>, key: &str) -> Option<String> {
    tags.get(key)
        .map(|v| v.trim())
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}
