use std::sync::Arc;

use tilt_domain::ports::AlertSink;
use tilt_domain::Alert;
use tokio::sync::mpsc::{self, error::TrySendError};
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::Metrics;

/// Queues alerts for delivery so the detection path never waits on a sink.
#[derive(Clone)]
pub struct AlertDispatcher {
    tx: mpsc::Sender<Alert>,
    metrics: Arc<Metrics>,
}

impl AlertDispatcher {
    /// Starts the delivery task. It runs until every dispatcher clone is
    /// dropped and the queue is drained.
    pub fn spawn(
        sinks: Vec<Arc<dyn AlertSink>>,
        capacity: usize,
        metrics: Arc<Metrics>,
    ) -> (Self, JoinHandle<()>) {
        let (tx, rx) = mpsc::channel(capacity.max(1));
        let handle = tokio::spawn(deliver_alerts(rx, sinks, metrics.clone()));
        (Self { tx, metrics }, handle)
    }

    pub fn dispatch(&self, alert: Alert) {
        match self.tx.try_send(alert) {
            Ok(()) => self.metrics.record_alert_queued(),
            Err(TrySendError::Full(alert)) => {
                self.metrics.record_alert_dropped();
                warn!(kind = alert.kind.as_str(), "alert queue full, dropping alert");
            }
            Err(TrySendError::Closed(alert)) => {
                self.metrics.record_alert_dropped();
                warn!(kind = alert.kind.as_str(), "alert dispatcher stopped, dropping alert");
            }
        }
    }

    pub fn dispatch_all(&self, alerts: impl IntoIterator<Item = Alert>) {
        for alert in alerts {
            self.dispatch(alert);
        }
    }
}

async fn deliver_alerts(
    mut rx: mpsc::Receiver<Alert>,
    sinks: Vec<Arc<dyn AlertSink>>,
    metrics: Arc<Metrics>,
) {
    while let Some(alert) = rx.recv().await {
        for sink in &sinks {
            match sink.deliver(&alert).await {
                Ok(()) => metrics.record_alert_delivered(),
                Err(err) => {
                    metrics.record_alert_delivery_failure();
                    warn!(sink = sink.name(), kind = alert.kind.as_str(), "alert delivery failed: {}", err);
                }
            }
        }
    }
    debug!("alert dispatcher drained");
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use tilt_domain::{AlertDetails, AlertKind, RiskLevel};
    use tokio::sync::Mutex;

    #[derive(Default)]
    struct RecordingSink {
        delivered: Mutex<Vec<Alert>>,
    }

    #[async_trait]
    impl AlertSink for RecordingSink {
        fn name(&self) -> &'static str {
            "recording"
        }

        async fn deliver(&self, alert: &Alert) -> anyhow::Result<()> {
            self.delivered.lock().await.push(alert.clone());
            Ok(())
        }
    }

    struct FailingSink;

    #[async_trait]
    impl AlertSink for FailingSink {
        fn name(&self) -> &'static str {
            "failing"
        }

        async fn deliver(&self, _alert: &Alert) -> anyhow::Result<()> {
            anyhow::bail!("target unreachable")
        }
    }

    fn alert(kind: AlertKind) -> Alert {
        Alert::new(kind, "test", RiskLevel::HIGH, AlertDetails::new())
    }

    #[tokio::test]
    async fn delivers_in_order_to_every_sink_and_survives_failures() {
        let metrics = Arc::new(Metrics::default());
        let recording = Arc::new(RecordingSink::default());
        let sinks: Vec<Arc<dyn AlertSink>> = vec![Arc::new(FailingSink), recording.clone()];
        let (dispatcher, handle) = AlertDispatcher::spawn(sinks, 8, metrics.clone());

        dispatcher.dispatch_all([alert(AlertKind::RapidActivity), alert(AlertKind::BalanceDrop)]);
        drop(dispatcher);
        handle.await.expect("dispatcher task");

        let delivered = recording.delivered.lock().await;
        let kinds: Vec<AlertKind> = delivered.iter().map(|alert| alert.kind).collect();
        assert_eq!(kinds, vec![AlertKind::RapidActivity, AlertKind::BalanceDrop]);
        assert_eq!(metrics.alerts_delivered(), 2);
        let text = metrics.render_prometheus();
        assert!(text.contains("tilt_alert_delivery_failures_total 2\n"));
        assert!(text.contains("tilt_alerts_queued_total 2\n"));
    }

    #[tokio::test]
    async fn full_queue_drops_instead_of_blocking() {
        let metrics = Arc::new(Metrics::default());
        let (tx, _rx) = mpsc::channel(1);
        let dispatcher = AlertDispatcher {
            tx,
            metrics: metrics.clone(),
        };

        dispatcher.dispatch(alert(AlertKind::RapidActivity));
        dispatcher.dispatch(alert(AlertKind::BalanceDrop));

        let text = metrics.render_prometheus();
        assert!(text.contains("tilt_alerts_queued_total 1\n"));
        assert!(text.contains("tilt_alerts_dropped_total 1\n"));
    }
}
