// Alert entity
// Uniform output of the rule evaluators and the composite scorer

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::utils::now_iso8601;
use crate::value_objects::RiskLevel;

pub type AlertDetails = Map<String, Value>;

/// Builds alert details from key/value pairs.
pub fn alert_details<const N: usize>(pairs: [(&str, Value); N]) -> AlertDetails {
    pairs
        .into_iter()
        .map(|(key, value)| (key.to_string(), value))
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertKind {
    RapidActivity,
    BalanceDrop,
    CompositeScore,
}

impl AlertKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            AlertKind::RapidActivity => "rapid_activity",
            AlertKind::BalanceDrop => "balance_drop",
            AlertKind::CompositeScore => "composite_score",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alert {
    pub kind: AlertKind,
    pub message: String,
    pub risk_level: RiskLevel,
    /// Creation instant, RFC 3339.
    pub timestamp: String,
    pub details: AlertDetails,
}

impl Alert {
    /// Builds an alert stamped with the current time.
    pub fn new(
        kind: AlertKind,
        message: impl Into<String>,
        risk_level: RiskLevel,
        details: AlertDetails,
    ) -> Self {
        Self {
            kind,
            message: message.into(),
            risk_level,
            timestamp: now_iso8601(),
            details,
        }
    }

    pub fn detail(&self, key: &str) -> Option<&Value> {
        self.details.get(key)
    }
}

/// Envelope handed to chat-style transports.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub message: String,
    pub timestamp: String,
    pub alert_type: String,
}

impl From<&Alert> for ChatMessage {
    fn from(alert: &Alert) -> Self {
        Self {
            message: alert.message.clone(),
            timestamp: alert.timestamp.clone(),
            alert_type: alert.risk_level.as_str().to_string(),
        }
    }
}
