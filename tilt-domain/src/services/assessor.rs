use tracing::info;

use crate::entities::{RecommendationConfig, ScoringConfig, SessionMetrics, TiltAssessment};
use crate::error::DomainError;
use crate::services::recommendations::recommend;
use crate::services::scorer::score_metrics;
use crate::utils::now_iso8601;

/// Scores a metrics record and attaches advice.
pub fn assess_metrics(
    session_id: Option<String>,
    metrics: &SessionMetrics,
    scoring: &ScoringConfig,
    recommendations: &RecommendationConfig,
) -> Result<TiltAssessment, DomainError> {
    recommendations.validate()?;
    let score = score_metrics(metrics, scoring)?;
    let advice = recommend(&score, metrics, recommendations);

    info!(
        session_id = session_id.as_deref().unwrap_or("-"),
        tilt_score = score.score,
        risk_level = %score.risk_level,
        "tilt assessment completed"
    );
    Ok(TiltAssessment {
        session_id,
        timestamp: now_iso8601(),
        tilt_score: score.score,
        risk_level: score.risk_level,
        recommendations: advice,
        metrics: *metrics,
    })
}
