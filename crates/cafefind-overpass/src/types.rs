//! Overpass API JSON response types (`[out:json]` with `out center;`).

use std::collections::HashMap;

use serde::Deserialize;

/// Top-level interpreter response. Only `elements` is consumed.
#[derive(Debug, Deserialize)]
pub struct OverpassResponse {
    #[serde(default)]
    pub elements: Vec<Element>,
}

/// A single OSM element.
///
/// Nodes carry `lat`/`lon` directly; ways carry a precomputed `center` when
/// the query ends with `out center;`.
#[derive(Debug, Clone, Deserialize)]
pub struct Element {
    /// `"node"`, `"way"`, or `"relation"`.
    #[serde(rename = "type")]
    pub kind: String,
    pub id: i64,
    #[serde(default)]
    pub lat: Option<f64>,
    #[serde(default)]
    pub lon: Option<f64>,
    #[serde(default)]
    pub center: Option<Center>,
    #[serde(default)]
    pub tags: HashMap<String, String>,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct Center {
    pub lat: f64,
    pub lon: f64,
}
