// Composite tilt assessment
// Score, tier and recommendations for one metrics record

use serde::Serialize;
use serde_json::json;

use crate::entities::{alert_details, Alert, AlertKind, SessionMetrics};
use crate::value_objects::{Recommendation, RiskLevel};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TiltAssessment {
    pub session_id: Option<String>,
    pub timestamp: String,
    pub tilt_score: u32,
    pub risk_level: RiskLevel,
    pub recommendations: Vec<Recommendation>,
    pub metrics: SessionMetrics,
}

impl TiltAssessment {
    pub fn to_alert(&self) -> Alert {
        let message = match self.risk_level {
            RiskLevel::HIGH => format!(
                "Tilt Alert: Risk score {}. Stop and take a break now.",
                self.tilt_score
            ),
            RiskLevel::MEDIUM => format!(
                "Tilt Warning: Risk score {}. Slow down and review your session.",
                self.tilt_score
            ),
            RiskLevel::LOW => format!("Tilt Check: Risk score {}. No tilt detected.", self.tilt_score),
        };
        Alert::new(
            AlertKind::CompositeScore,
            message,
            self.risk_level,
            alert_details([
                ("session_id", json!(self.session_id)),
                ("tilt_score", json!(self.tilt_score)),
                ("bet_frequency", json!(self.metrics.bet_frequency)),
                ("balance_volatility", json!(self.metrics.balance_volatility)),
                ("session_duration_minutes", json!(self.metrics.session_duration_minutes)),
                ("loss_streak", json!(self.metrics.loss_streak)),
                ("recommendations", json!(self.recommendations)),
            ]),
        )
    }
}
