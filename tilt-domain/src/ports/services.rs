use async_trait::async_trait;

use crate::entities::Alert;

/// Delivery target for alerts. The core never calls a sink directly; the
/// orchestration layer forwards alerts to every configured sink.
#[async_trait]
pub trait AlertSink: Send + Sync {
    fn name(&self) -> &'static str;
    async fn deliver(&self, alert: &Alert) -> anyhow::Result<()>;
}
