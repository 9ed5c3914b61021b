use serde::{Deserialize, Serialize};

use tilt_domain::{
    Alert, RecommendationConfig, RuleSetConfig, ScoringConfig, SessionEvent, SessionMetrics,
    SessionSummary,
};

#[derive(Debug, Clone, Deserialize)]
pub struct EvaluateSessionRequest {
    pub session_id: Option<String>,
    pub events: Vec<SessionEvent>,
    /// Replaces the active rule configuration for this request only.
    pub rules: Option<RuleSetConfig>,
}

#[derive(Debug, Clone, Serialize)]
pub struct EvaluateSessionResponse {
    pub session_id: Option<String>,
    pub summary: SessionSummary,
    pub alerts: Vec<Alert>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AssessMetricsRequest {
    pub session_id: Option<String>,
    pub metrics: SessionMetrics,
    pub scoring: Option<ScoringConfig>,
    pub recommendations: Option<RecommendationConfig>,
}

/// Result of one file-driven rule check.
#[derive(Debug, Clone, Serialize)]
pub struct SessionCheckReport {
    pub source: String,
    pub summary: SessionSummary,
    pub alerts: Vec<Alert>,
}
