use std::sync::Arc;

use tilt_domain::ports::SessionRepository;
use tilt_domain::{DetectionConfig, RuntimeConfig};
use tokio::sync::RwLock;

use crate::{AlertDispatcher, Metrics};

#[derive(Clone)]
pub struct AppState {
    pub config: RuntimeConfig,
    /// Active detection configuration, replaced as a whole on update.
    pub detection: Arc<RwLock<DetectionConfig>>,
    pub session_repo: Arc<dyn SessionRepository>,
    pub alerts: AlertDispatcher,
    pub metrics: Arc<Metrics>,
}

impl AppState {
    pub fn new(
        config: RuntimeConfig,
        detection: DetectionConfig,
        session_repo: Arc<dyn SessionRepository>,
        alerts: AlertDispatcher,
        metrics: Arc<Metrics>,
    ) -> Self {
        Self {
            config,
            detection: Arc::new(RwLock::new(detection)),
            session_repo,
            alerts,
            metrics,
        }
    }

    pub async fn detection_snapshot(&self) -> DetectionConfig {
        *self.detection.read().await
    }
}
