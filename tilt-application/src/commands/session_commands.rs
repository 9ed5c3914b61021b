use tracing::info;

use tilt_domain::services::assessor::assess_metrics as assess;
use tilt_domain::services::rules::evaluate_session as evaluate_rules;
use tilt_domain::{RiskLevel, RuleSetConfig, Session, SessionMetrics, SessionSummary, TiltAssessment};

use crate::dtos::{AssessMetricsRequest, EvaluateSessionRequest, EvaluateSessionResponse, SessionCheckReport};
use crate::{AppError, AppState};

/// Runs the rule evaluators over a submitted session and queues any alerts.
/// Events must already be in chronological order.
pub async fn evaluate_session(
    state: &AppState,
    request: EvaluateSessionRequest,
) -> Result<EvaluateSessionResponse, AppError> {
    let rules = match request.rules {
        Some(rules) => rules,
        None => state.detection_snapshot().await.rules,
    };
    let session = Session::from_events(request.events).map_err(|err| {
        state.metrics.record_evaluation_error();
        AppError::from(err)
    })?;
    let (summary, alerts) = run_rules(state, &session, &rules)?;
    Ok(EvaluateSessionResponse {
        session_id: request.session_id,
        summary,
        alerts,
    })
}

/// Scores a metrics record. Non-LOW results are queued as composite alerts.
pub async fn assess_metrics(
    state: &AppState,
    request: AssessMetricsRequest,
) -> Result<TiltAssessment, AppError> {
    let active = state.detection_snapshot().await;
    let scoring = request.scoring.unwrap_or(active.scoring);
    let recommendations = request.recommendations.unwrap_or(active.recommendations);

    let assessment = assess(request.session_id, &request.metrics, &scoring, &recommendations)?;
    state.metrics.record_assessment(assessment.risk_level);
    if assessment.risk_level != RiskLevel::LOW {
        state.alerts.dispatch(assessment.to_alert());
    }
    Ok(assessment)
}

/// Loads a session file through the repository and evaluates it with the
/// active rules.
pub async fn check_session_file(state: &AppState, path: &str) -> Result<SessionCheckReport, AppError> {
    let session = match state.session_repo.load_session(path).await {
        Ok(session) => session,
        Err(err) => {
            state.metrics.record_agent_check(false);
            return Err(AppError::Internal(err));
        }
    };
    let rules = state.detection_snapshot().await.rules;
    let (summary, alerts) = run_rules(state, &session, &rules)?;
    state.metrics.record_agent_check(true);
    info!(path, events = session.len(), alerts = alerts.len(), "session check completed");
    Ok(SessionCheckReport {
        source: path.to_string(),
        summary,
        alerts,
    })
}

/// Loads a metrics file through the repository and assesses it.
pub async fn assess_metrics_file(
    state: &AppState,
    path: &str,
    session_id: Option<String>,
) -> Result<TiltAssessment, AppError> {
    let metrics = state
        .session_repo
        .load_metrics(path)
        .await
        .map_err(AppError::Internal)?;
    assess_metrics(
        state,
        AssessMetricsRequest {
            session_id,
            metrics,
            scoring: None,
            recommendations: None,
        },
    )
    .await
}

/// Aggregates a session file into metrics and assesses them, so an event log
/// can feed the composite scorer directly.
pub async fn assess_session_file(
    state: &AppState,
    path: &str,
    session_id: Option<String>,
) -> Result<TiltAssessment, AppError> {
    let session = state
        .session_repo
        .load_session(path)
        .await
        .map_err(AppError::Internal)?;
    let metrics = SessionMetrics::from_events(session.events());
    info!(
        path,
        events = session.len(),
        bet_frequency = metrics.bet_frequency,
        loss_streak = metrics.loss_streak,
        "session aggregated for assessment"
    );
    assess_metrics(
        state,
        AssessMetricsRequest {
            session_id,
            metrics,
            scoring: None,
            recommendations: None,
        },
    )
    .await
}

fn run_rules(
    state: &AppState,
    session: &Session,
    rules: &RuleSetConfig,
) -> Result<(SessionSummary, Vec<tilt_domain::Alert>), AppError> {
    let alerts = evaluate_rules(session.events(), rules).map_err(|err| {
        state.metrics.record_evaluation_error();
        AppError::from(err)
    })?;
    state.metrics.record_session(session.len(), alerts.len());
    state.alerts.dispatch_all(alerts.iter().cloned());
    Ok((SessionSummary::from_events(session.events()), alerts))
}
