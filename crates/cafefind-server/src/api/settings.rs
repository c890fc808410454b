use axum::{extract::State, Extension, Json};
use cafefind_core::SearchSettings;

use crate::middleware::RequestId;

use super::{ApiError, ApiResponse, AppState, ResponseMeta};

pub(super) async fn get_settings(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> Json<ApiResponse<SearchSettings>> {
    let settings = *state.settings.read().await;
    Json(ApiResponse {
        data: settings,
        meta: ResponseMeta::new(req_id.0),
    })
}

/// Replace the process-wide settings. Searches already running keep the
/// settings they started with.
pub(super) async fn put_settings(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Json(body): Json<SearchSettings>,
) -> Result<Json<ApiResponse<SearchSettings>>, ApiError> {
    body.validate()
        .map_err(|e| ApiError::validation(req_id.0.clone(), e.to_string()))?;

    *state.settings.write().await = body;
    tracing::info!(
        radius_m = body.radius_m,
        min_results = body.min_results,
        max_results = body.max_results,
        opening_filter = ?body.opening_filter,
        "search settings updated"
    );

    Ok(Json(ApiResponse {
        data: body,
        meta: ResponseMeta::new(req_id.0),
    }))
}
