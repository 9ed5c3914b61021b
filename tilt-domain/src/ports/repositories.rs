use async_trait::async_trait;

use crate::entities::{Session, SessionMetrics};

#[async_trait]
pub trait SessionRepository: Send + Sync {
    /// Loads a chronologically ordered session from `path`.
    async fn load_session(&self, path: &str) -> anyhow::Result<Session>;
    async fn load_metrics(&self, path: &str) -> anyhow::Result<SessionMetrics>;
}
