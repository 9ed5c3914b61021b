use std::sync::atomic::{AtomicU64, Ordering};

use tilt_domain::RiskLevel;

#[derive(Debug, Default)]
pub struct Metrics {
    sessions_evaluated: AtomicU64,
    events_evaluated: AtomicU64,
    evaluation_errors: AtomicU64,
    rule_alerts: AtomicU64,
    assessments: AtomicU64,
    high_risk_assessments: AtomicU64,
    agent_checks: AtomicU64,
    agent_check_failures: AtomicU64,
    alerts_queued: AtomicU64,
    alerts_dropped: AtomicU64,
    alerts_delivered: AtomicU64,
    alert_delivery_failures: AtomicU64,
}

impl Metrics {
    pub fn record_session(&self, event_count: usize, alert_count: usize) {
        self.sessions_evaluated.fetch_add(1, Ordering::Relaxed);
        self.events_evaluated
            .fetch_add(event_count as u64, Ordering::Relaxed);
        self.rule_alerts
            .fetch_add(alert_count as u64, Ordering::Relaxed);
    }

    pub fn record_evaluation_error(&self) {
        self.evaluation_errors.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_assessment(&self, risk_level: RiskLevel) {
        self.assessments.fetch_add(1, Ordering::Relaxed);
        if risk_level == RiskLevel::HIGH {
            self.high_risk_assessments.fetch_add(1, Ordering::Relaxed);
        }
    }

    pub fn record_agent_check(&self, ok: bool) {
        self.agent_checks.fetch_add(1, Ordering::Relaxed);
        if !ok {
            self.agent_check_failures.fetch_add(1, Ordering::Relaxed);
        }
    }

    pub fn record_alert_queued(&self) {
        self.alerts_queued.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_alert_dropped(&self) {
        self.alerts_dropped.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_alert_delivered(&self) {
        self.alerts_delivered.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_alert_delivery_failure(&self) {
        self.alert_delivery_failures.fetch_add(1, Ordering::Relaxed);
    }

    pub fn alerts_delivered(&self) -> u64 {
        self.alerts_delivered.load(Ordering::Relaxed)
    }

    pub fn render_prometheus(&self) -> String {
        let counters = [
            ("tilt_sessions_evaluated_total", &self.sessions_evaluated),
            ("tilt_events_evaluated_total", &self.events_evaluated),
            ("tilt_evaluation_errors_total", &self.evaluation_errors),
            ("tilt_rule_alerts_total", &self.rule_alerts),
            ("tilt_assessments_total", &self.assessments),
            ("tilt_high_risk_assessments_total", &self.high_risk_assessments),
            ("tilt_agent_checks_total", &self.agent_checks),
            ("tilt_agent_check_failures_total", &self.agent_check_failures),
            ("tilt_alerts_queued_total", &self.alerts_queued),
            ("tilt_alerts_dropped_total", &self.alerts_dropped),
            ("tilt_alerts_delivered_total", &self.alerts_delivered),
            ("tilt_alert_delivery_failures_total", &self.alert_delivery_failures),
        ];

        let mut out = String::new();
        for (name, counter) in counters {
            out.push_str(&format!(
                "# TYPE {name} counter\n{name} {}\n",
                counter.load(Ordering::Relaxed)
            ));
        }
        out
    }
}
