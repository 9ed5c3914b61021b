use async_trait::async_trait;
use tracing::{info, warn};

use tilt_domain::{Alert, AlertSink, RiskLevel};

/// Writes every alert to the tracing pipeline.
#[derive(Debug, Default)]
pub struct LogAlertSink;

#[async_trait]
impl AlertSink for LogAlertSink {
    fn name(&self) -> &'static str {
        "log"
    }

    async fn deliver(&self, alert: &Alert) -> anyhow::Result<()> {
        let details = serde_json::to_string(&alert.details)?;
        if alert.risk_level == RiskLevel::HIGH {
            warn!(
                kind = alert.kind.as_str(),
                risk_level = %alert.risk_level,
                timestamp = %alert.timestamp,
                details = %details,
                "TILT ALERT: {}",
                alert.message
            );
        } else {
            info!(
                kind = alert.kind.as_str(),
                risk_level = %alert.risk_level,
                timestamp = %alert.timestamp,
                details = %details,
                "tilt notice: {}",
                alert.message
            );
        }
        Ok(())
    }
}
