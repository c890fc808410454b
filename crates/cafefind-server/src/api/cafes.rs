use std::sync::{Mutex, PoisonError};

use axum::{
    extract::{Path, Query, State},
    Extension, Json,
};
use cafefind_core::{
    AnnotatedVenue, OpeningFilter, SearchSettings, SourceType, StatusEvent, Venue,
};
use cafefind_search::{find_nearby, FixedLocation};
use serde::{Deserialize, Serialize};

use crate::middleware::RequestId;

use super::{ApiError, ApiResponse, AppState, ResponseMeta};

#[derive(Debug, Deserialize)]
pub(super) struct NearbyQuery {
    pub lat: f64,
    pub lon: f64,
    pub radius_m: Option<u32>,
    pub min_results: Option<u32>,
    pub max_results: Option<u32>,
    pub open_now: Option<bool>,
}

impl NearbyQuery {
    /// Layer the query's overrides over `base`.
    fn settings_over(&self, base: SearchSettings) -> SearchSettings {
        SearchSettings {
            radius_m: self.radius_m.unwrap_or(base.radius_m),
            min_results: self.min_results.unwrap_or(base.min_results),
            max_results: self.max_results.unwrap_or(base.max_results),
            opening_filter: match self.open_now {
                Some(true) => OpeningFilter::OpenNow,
                Some(false) => OpeningFilter::Anytime,
                None => base.opening_filter,
            },
        }
    }
}

#[derive(Debug, Serialize)]
pub(super) struct NearbyData {
    pub venues: Vec<AnnotatedVenue>,
    /// Status events in the order the search emitted them.
    pub status: Vec<StatusEvent>,
}

pub(super) async fn nearby(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Query(query): Query<NearbyQuery>,
) -> Result<Json<ApiResponse<NearbyData>>, ApiError> {
    let provider = FixedLocation::new(query.lat, query.lon)
        .map_err(|e| ApiError::validation(req_id.0.clone(), e.to_string()))?;

    let snapshot = *state.settings.read().await;
    let settings = query.settings_over(snapshot);
    settings
        .validate()
        .map_err(|e| ApiError::validation(req_id.0.clone(), e.to_string()))?;

    let sink = Mutex::new(Vec::new());
    let outcome = find_nearby(&provider, state.searcher.as_ref(), &settings, &sink)
        .await
        .map_err(|e| ApiError::new(req_id.0.clone(), "internal_error", e.to_string()))?;
    let status = sink.into_inner().unwrap_or_else(PoisonError::into_inner);

    Ok(Json(ApiResponse {
        data: NearbyData {
            venues: outcome.venues,
            status,
        },
        meta: ResponseMeta::new(req_id.0),
    }))
}

/// `GET /api/v1/cafes/{source_type}/{source_id}`: one cached venue by its OSM key.
pub(super) async fn get_cafe(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Path((source_type, source_id)): Path<(String, i64)>,
) -> Result<Json<ApiResponse<Venue>>, ApiError> {
    let source_type = source_type
        .parse::<SourceType>()
        .map_err(|e| ApiError::new(req_id.0.clone(), "bad_request", e.to_string()))?;

    let venue = cafefind_db::get_venue_by_source(&state.pool, source_type, source_id)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, %source_type, source_id, "venue lookup failed");
            ApiError::new(req_id.0.clone(), "internal_error", "database error")
        })?
        .ok_or_else(|| ApiError::new(req_id.0.clone(), "not_found", "coffee shop not found"))?;

    Ok(Json(ApiResponse {
        data: venue,
        meta: ResponseMeta::new(req_id.0),
    }))
}
