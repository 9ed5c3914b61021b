use std::sync::Arc;

use anyhow::Result;
use tokio::task::JoinHandle;
use tracing::info;

use tilt_application::{AlertDispatcher, AppState, Metrics};
use tilt_domain::AlertSink;
use tilt_infrastructure::{AppConfig, LogAlertSink, SessionFileRepository, WebhookAlertSink};

pub struct AppContext {
    pub state: AppState,
    dispatcher: JoinHandle<()>,
}

impl AppContext {
    pub fn new(config: &AppConfig) -> Result<Self> {
        let runtime_config = config.to_runtime_config();

        let mut sinks: Vec<Arc<dyn AlertSink>> = vec![Arc::new(LogAlertSink)];
        if let Some(webhook) = WebhookAlertSink::from_config(&runtime_config)? {
            info!(url = webhook.url(), "webhook alert sink enabled");
            sinks.push(Arc::new(webhook));
        }

        let metrics = Arc::new(Metrics::default());
        let (alerts, dispatcher) = AlertDispatcher::spawn(
            sinks,
            runtime_config.alert_channel_capacity,
            metrics.clone(),
        );

        let state = AppState::new(
            runtime_config,
            config.detection,
            Arc::new(SessionFileRepository::new()),
            alerts,
            metrics,
        );

        Ok(Self { state, dispatcher })
    }

    /// Drops the state and waits until every queued alert has been handed
    /// to the sinks. Background tasks holding a state clone must be gone.
    pub async fn drain(self) {
        drop(self.state);
        if let Err(err) = self.dispatcher.await {
            tracing::warn!("alert dispatcher ended abnormally: {}", err);
        }
    }
}
