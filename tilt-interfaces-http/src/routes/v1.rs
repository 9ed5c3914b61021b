use axum::routing::{get, post};
use axum::Router;

use tilt_application::AppState;

use crate::handlers::{detection_handlers, ops_handlers, session_handlers};

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route(
            "/v1/sessions/evaluate",
            post(session_handlers::evaluate_session),
        )
        .route("/v1/metrics/assess", post(session_handlers::assess_metrics))
        .route(
            "/v1/detection/config",
            get(detection_handlers::get_detection_config)
                .put(detection_handlers::update_detection_config),
        )
        .route("/v1/ops/health/live", get(ops_handlers::health_live))
        .route(
            "/v1/ops/metrics/prometheus",
            get(ops_handlers::metrics_prometheus),
        )
        .with_state(state)
}
