use std::time::Duration;

use tokio::time::MissedTickBehavior;
use tracing::{info, warn};

use tilt_application::commands::session_commands::check_session_file;
use tilt_application::AppState;

/// Re-reads the configured session file every `check_interval_seconds` and
/// evaluates it. Returns at once when no session file is configured.
pub async fn schedule_session_checks(state: AppState) {
    let Some(path) = state.config.session_path.clone() else {
        info!("session_path not configured, periodic tilt checks disabled");
        return;
    };
    let period = Duration::from_secs(state.config.check_interval_seconds.max(1));
    info!(path = %path, interval_seconds = period.as_secs(), "periodic tilt checks started");

    let mut ticker = tokio::time::interval(period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    loop {
        ticker.tick().await;
        run_session_check(&state, &path).await;
    }
}

/// One agent tick. Failures are logged and the next tick proceeds.
pub async fn run_session_check(state: &AppState, path: &str) -> usize {
    match check_session_file(state, path).await {
        Ok(report) => {
            info!(path, alerts = report.alerts.len(), "periodic tilt check finished");
            report.alerts.len()
        }
        Err(err) => {
            warn!(path, "could not check session data: {}", err);
            0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use tilt_application::{AlertDispatcher, Metrics};
    use tilt_domain::{DetectionConfig, RuntimeConfig};

    use crate::repositories::SessionFileRepository;
    use crate::services::LogAlertSink;

    fn state_with(config: RuntimeConfig) -> AppState {
        let metrics = Arc::new(Metrics::default());
        let (alerts, _handle) = AlertDispatcher::spawn(vec![Arc::new(LogAlertSink)], 8, metrics.clone());
        AppState::new(
            config,
            DetectionConfig::default(),
            Arc::new(SessionFileRepository::new()),
            alerts,
            metrics,
        )
    }

    #[tokio::test]
    async fn tick_evaluates_the_session_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("session.json");
        let lines: Vec<String> = (0..3)
            .map(|i| {
                format!(
                    "{{\"timestamp\":\"2024-01-01T10:0{i}:00Z\",\"bet_amount\":10,\"outcome\":\"loss\",\"balance\":{}}}",
                    1000 - 200 * i
                )
            })
            .collect();
        std::fs::write(&path, lines.join("\n")).expect("write session");

        let state = state_with(RuntimeConfig::default());
        let alerts = run_session_check(&state, &path.to_string_lossy()).await;
        assert_eq!(alerts, 1);
        assert!(state.metrics.render_prometheus().contains("tilt_agent_checks_total 1\n"));
    }

    #[tokio::test]
    async fn missing_file_waits_for_the_next_tick() {
        let dir = tempfile::tempdir().expect("tempdir");
        let state = state_with(RuntimeConfig::default());
        let path = dir.path().join("absent.json");
        assert_eq!(run_session_check(&state, &path.to_string_lossy()).await, 0);
        assert!(state
            .metrics
            .render_prometheus()
            .contains("tilt_agent_check_failures_total 1\n"));
    }

    #[tokio::test]
    async fn disabled_without_session_path() {
        let state = state_with(RuntimeConfig::default());
        tokio::time::timeout(Duration::from_secs(1), schedule_session_checks(state))
            .await
            .expect("returns immediately");
    }
}
