use axum::body::Bytes;
use axum::extract::State;
use axum::http::HeaderMap;
use axum::Json;
use tracing::warn;

use tilt_application::commands::session_commands;
use tilt_application::dtos::{AssessMetricsRequest, EvaluateSessionRequest, EvaluateSessionResponse};
use tilt_application::AppState;
use tilt_domain::TiltAssessment;

use crate::error::HttpError;
use crate::middleware::{authorize, parse_json};

pub async fn evaluate_session(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<EvaluateSessionResponse>, HttpError> {
    if !authorize(&state.config, &headers) {
        return Err(HttpError::Unauthorized);
    }
    let request: EvaluateSessionRequest = parse_json(&body).map_err(|err| {
        warn!("rejected session body: {:?}", err);
        err
    })?;
    let response = session_commands::evaluate_session(&state, request).await?;
    Ok(Json(response))
}

pub async fn assess_metrics(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<TiltAssessment>, HttpError> {
    if !authorize(&state.config, &headers) {
        return Err(HttpError::Unauthorized);
    }
    let request: AssessMetricsRequest = parse_json(&body)?;
    let assessment = session_commands::assess_metrics(&state, request).await?;
    Ok(Json(assessment))
}
