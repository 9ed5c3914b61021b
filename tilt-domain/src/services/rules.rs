use chrono::{DateTime, Duration, Utc};
use serde_json::json;
use tracing::{debug, warn};

use crate::entities::{
    alert_details, Alert, AlertKind, BalanceDropConfig, RapidActivityConfig, RuleSetConfig, SessionEvent,
};
use crate::error::DomainError;
use crate::value_objects::RiskLevel;

const RAPID_ACTIVITY_MESSAGE: &str = "Tilt Alert: You've been spinning too fast. Take a break.";
const BALANCE_DROP_MESSAGE: &str = "Tilt Alert: Your balance is dropping quickly. Vault some winnings.";

/// Counts events in the trailing window anchored at the latest timestamp and
/// alerts when the count is strictly above `max_events`.
///
/// Returns `Ok(None)` for fewer than two events.
pub fn check_rapid_activity(
    events: &[SessionEvent],
    config: &RapidActivityConfig,
) -> Result<Option<Alert>, DomainError> {
    config.validate()?;
    if events.len() < 2 {
        return Ok(None);
    }
    let Some(window_start) = window_start(events, config.window_minutes) else {
        return Ok(None);
    };

    let spin_count = events
        .iter()
        .filter(|event| event.timestamp >= window_start)
        .count();
    if spin_count <= config.max_events {
        return Ok(None);
    }

    let spin_rate = spin_count as f64 / config.window_minutes as f64;
    warn!(
        spin_count,
        window_minutes = config.window_minutes,
        "rapid spinning detected"
    );
    Ok(Some(Alert::new(
        AlertKind::RapidActivity,
        RAPID_ACTIVITY_MESSAGE,
        RiskLevel::HIGH,
        alert_details([
            ("spin_count", json!(spin_count)),
            ("time_window_minutes", json!(config.window_minutes)),
            ("threshold", json!(config.max_events)),
            ("avg_spin_rate", json!(format!("{:.1} spins/min", spin_rate))),
        ]),
    )))
}

/// Compares the first and last balance inside the trailing window and alerts
/// when the balance fell by at least `drop_fraction`.
///
/// Returns `Ok(None)` when the window holds fewer than two events or starts
/// from a non-positive balance.
pub fn check_balance_drop(
    events: &[SessionEvent],
    config: &BalanceDropConfig,
) -> Result<Option<Alert>, DomainError> {
    config.validate()?;
    if events.len() < 2 {
        return Ok(None);
    }
    let Some(window_start) = window_start(events, config.window_minutes) else {
        return Ok(None);
    };

    let recent: Vec<&SessionEvent> = events
        .iter()
        .filter(|event| event.timestamp >= window_start)
        .collect();
    if recent.len() < 2 {
        return Ok(None);
    }
    let (Some(first), Some(last)) = (recent.first(), recent.last()) else {
        return Ok(None);
    };

    let start_balance = first.balance;
    let end_balance = last.balance;
    if start_balance <= 0.0 {
        return Ok(None);
    }

    let balance_lost = start_balance - end_balance;
    let drop_fraction = balance_lost / start_balance;
    if drop_fraction < config.drop_fraction {
        return Ok(None);
    }

    warn!(
        drop_percentage = drop_fraction * 100.0,
        window_minutes = config.window_minutes,
        "significant balance drop detected"
    );
    Ok(Some(Alert::new(
        AlertKind::BalanceDrop,
        BALANCE_DROP_MESSAGE,
        RiskLevel::HIGH,
        alert_details([
            ("start_balance", json!(start_balance)),
            ("end_balance", json!(end_balance)),
            ("balance_lost", json!(balance_lost)),
            ("drop_percentage", json!(format!("{:.1}%", drop_fraction * 100.0))),
            ("time_window_minutes", json!(config.window_minutes)),
            ("threshold", json!(format!("{:.1}%", config.drop_fraction * 100.0))),
        ]),
    )))
}

/// Runs every rule against one session. Alerts keep evaluation order:
/// rapid activity, then balance drop.
pub fn evaluate_session(events: &[SessionEvent], config: &RuleSetConfig) -> Result<Vec<Alert>, DomainError> {
    let mut alerts = Vec::new();
    if let Some(alert) = check_rapid_activity(events, &config.rapid_activity)? {
        alerts.push(alert);
    }
    if let Some(alert) = check_balance_drop(events, &config.balance_drop)? {
        alerts.push(alert);
    }
    debug!(events = events.len(), alerts = alerts.len(), "tilt rules evaluated");
    Ok(alerts)
}

fn window_start(events: &[SessionEvent], window_minutes: u64) -> Option<DateTime<Utc>> {
    let latest = events.iter().map(|event| event.timestamp).max()?;
    let span = Duration::minutes(i64::try_from(window_minutes).ok()?);
    Some(latest.checked_sub_signed(span).unwrap_or(DateTime::<Utc>::MIN_UTC))
}
