use std::sync::Arc;

use async_trait::async_trait;
use chrono::{Duration, TimeZone, Utc};
use tokio::sync::Mutex;
use tokio::task::JoinHandle;

use tilt_domain::ports::{AlertSink, SessionRepository};
use tilt_domain::{Alert, DetectionConfig, Outcome, RuntimeConfig, Session, SessionEvent, SessionMetrics};

use crate::{AlertDispatcher, AppState, Metrics};

/// `count` losing events `step_seconds` apart, balance falling by `loss` each.
pub fn events_every(count: usize, step_seconds: i64, start_balance: f64, loss: f64) -> Vec<SessionEvent> {
    let start = Utc.with_ymd_and_hms(2024, 3, 15, 20, 0, 0).unwrap();
    (0..count)
        .map(|i| SessionEvent {
            timestamp: start + Duration::seconds(step_seconds * i as i64),
            bet_amount: 5.0,
            outcome: Outcome::Loss,
            balance: start_balance - loss * i as f64,
        })
        .collect()
}

pub struct StaticSessionRepository {
    events: Option<Vec<SessionEvent>>,
}

impl StaticSessionRepository {
    pub fn empty() -> Self {
        Self { events: None }
    }

    pub fn with_events(events: Vec<SessionEvent>) -> Self {
        Self { events: Some(events) }
    }
}

#[async_trait]
impl SessionRepository for StaticSessionRepository {
    async fn load_session(&self, path: &str) -> anyhow::Result<Session> {
        match &self.events {
            Some(events) => Ok(Session::sorted(events.clone())),
            None => anyhow::bail!("no session at {path}"),
        }
    }

    async fn load_metrics(&self, path: &str) -> anyhow::Result<SessionMetrics> {
        match &self.events {
            Some(events) => Ok(SessionMetrics::from_events(events)),
            None => anyhow::bail!("no metrics at {path}"),
        }
    }
}

#[derive(Default)]
pub struct RecordingSink {
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

pub struct Recorder {
    sink: Arc<RecordingSink>,
    handle: JoinHandle<()>,
}

impl Recorder {
    /// Drops the state so the dispatcher drains, then returns what reached
    /// the sink.
    pub async fn finish(self, state: AppState) -> Vec<Alert> {
        drop(state);
        self.handle.await.expect("dispatcher task");
        self.sink.delivered.lock().await.clone()
    }
}

pub fn test_state(repo: StaticSessionRepository) -> (AppState, Recorder) {
    let metrics = Arc::new(Metrics::default());
    let sink = Arc::new(RecordingSink::default());
    let (alerts, handle) = AlertDispatcher::spawn(vec![sink.clone()], 16, metrics.clone());
    let state = AppState::new(
        RuntimeConfig::default(),
        DetectionConfig::default(),
        Arc::new(repo),
        alerts,
        metrics,
    );
    (state, Recorder { sink, handle })
}
