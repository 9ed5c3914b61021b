use anyhow::Result;
use axum::Router;
use serde_json::Value;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use tilt_application::commands::session_commands;
use tilt_application::AppState;
use tilt_infrastructure::schedule_session_checks;
use tilt_interfaces_http::build_router;

use crate::context::AppContext;

fn build_router_with_layers(state: AppState) -> Router {
    build_router(state.clone())
        .layer(CorsLayer::permissive())
        .layer(RequestBodyLimitLayer::new(
            usize::try_from(state.config.max_body_bytes).unwrap_or(usize::MAX),
        ))
        .layer(TimeoutLayer::new(std::time::Duration::from_secs(
            state.config.request_timeout_seconds,
        )))
        .layer(TraceLayer::new_for_http())
}

/// HTTP surface plus the periodic agent, until ctrl-c or SIGTERM.
pub async fn run_server(context: AppContext) -> Result<()> {
    let state = context.state.clone();

    let agent = tokio::spawn(schedule_session_checks(state.clone()));

    let app = build_router_with_layers(state.clone());
    let addr: std::net::SocketAddr = state.config.bind_addr.parse()?;
    let listener = TcpListener::bind(addr).await?;
    info!("listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("shutting down, flushing pending alerts");
    agent.abort();
    let _ = agent.await;
    drop(state);
    context.drain().await;
    Ok(())
}

/// One-shot rule evaluation of a session file.
pub async fn run_check(context: AppContext, session_path: &str) -> Result<Value> {
    let report = session_commands::check_session_file(&context.state, session_path).await?;
    context.drain().await;
    Ok(serde_json::to_value(report)?)
}

/// Input of a one-shot assessment.
#[derive(Debug, Clone)]
pub enum AssessSource {
    /// JSON metrics record.
    Metrics(String),
    /// Session event file, aggregated into metrics first.
    Session(String),
}

/// One-shot composite assessment.
pub async fn run_assess(context: AppContext, source: AssessSource, session_id: Option<String>) -> Result<Value> {
    let assessment = match &source {
        AssessSource::Metrics(path) => {
            session_commands::assess_metrics_file(&context.state, path, session_id).await?
        }
        AssessSource::Session(path) => {
            session_commands::assess_session_file(&context.state, path, session_id).await?
        }
    };
    context.drain().await;
    Ok(serde_json::to_value(assessment)?)
}

async fn shutdown_signal() {
    let ctrl_c = async {
        let _ = tokio::signal::ctrl_c().await;
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(_) => std::future::pending::<()>().await,
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
