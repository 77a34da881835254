use axum::{extract::State, Extension, Json};

use shopscout_engine::{DiscoveryRequest, DiscoveryResponse, EngineError};

use crate::middleware::RequestId;

use super::{ApiError, ApiResponse, AppState, ResponseMeta};

/// `POST /api/v1/discover` — run one product discovery.
///
/// Per-target and per-task problems inside the engine only reduce yield;
/// the handler surfaces an error only for invalid input or a total
/// upstream wipeout.
pub(super) async fn discover(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Json(request): Json<DiscoveryRequest>,
) -> Result<Json<ApiResponse<DiscoveryResponse>>, ApiError> {
    if request.description.trim().is_empty() {
        return Err(ApiError::new(
            req_id.0,
            "validation_error",
            "description must not be empty",
        ));
    }

    let response = state
        .engine
        .discover(&request)
        .await
        .map_err(|e| map_engine_error(req_id.0.clone(), &e))?;

    Ok(Json(ApiResponse {
        data: response,
        meta: ResponseMeta::new(req_id.0),
    }))
}

fn map_engine_error(request_id: String, error: &EngineError) -> ApiError {
    tracing::error!(error = %error, "discovery failed");
    match error {
        EngineError::AllQueriesFailed { .. } => ApiError::new(
            request_id,
            "upstream_error",
            "the search backend rejected every query",
        ),
        _ => ApiError::new(request_id, "internal_error", "discovery failed"),
    }
}
