use axum::body::Bytes;
use axum::extract::State;
use axum::http::HeaderMap;
use axum::Json;

use tilt_application::commands::detection_commands;
use tilt_application::queries::detection_queries;
use tilt_application::AppState;
use tilt_domain::DetectionConfig;

use crate::error::HttpError;
use crate::middleware::{authorize, parse_json};

pub async fn get_detection_config(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<DetectionConfig>, HttpError> {
    if !authorize(&state.config, &headers) {
        return Err(HttpError::Unauthorized);
    }
    Ok(Json(detection_queries::get_detection_config(&state).await))
}

pub async fn update_detection_config(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<DetectionConfig>, HttpError> {
    if !authorize(&state.config, &headers) {
        return Err(HttpError::Unauthorized);
    }
    let config: DetectionConfig = parse_json(&body)?;
    let active = detection_commands::update_detection_config(&state, config).await?;
    Ok(Json(active))
}
