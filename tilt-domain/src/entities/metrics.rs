// Session metrics record
// Pre-aggregated input of the composite scorer

use serde::{Deserialize, Serialize};

use crate::entities::SessionEvent;
use crate::value_objects::Outcome;

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SessionMetrics {
    /// Bets per hour.
    #[serde(default)]
    pub bet_frequency: f64,
    /// Fractional balance swing, 0.5 means a 50% swing.
    #[serde(default)]
    pub balance_volatility: f64,
    #[serde(default, alias = "duration_minutes")]
    pub session_duration_minutes: f64,
    /// Consecutive losses ending the observed span.
    #[serde(default)]
    pub loss_streak: u32,
}

impl SessionMetrics {
    /// Aggregates a chronologically ordered event slice.
    ///
    /// Spans shorter than one minute are rated as one minute so a burst of
    /// events does not produce an unbounded hourly rate.
    pub fn from_events(events: &[SessionEvent]) -> Self {
        let (Some(first), Some(last)) = (events.first(), events.last()) else {
            return Self::default();
        };

        let span_minutes = (last.timestamp - first.timestamp).num_milliseconds().max(0) as f64 / 60_000.0;
        let bet_frequency = events.len() as f64 / (span_minutes.max(1.0) / 60.0);

        let (min_balance, max_balance) = events.iter().fold(
            (f64::INFINITY, f64::NEG_INFINITY),
            |(min, max), event| (min.min(event.balance), max.max(event.balance)),
        );
        let balance_volatility = if first.balance > 0.0 {
            (max_balance - min_balance) / first.balance
        } else {
            0.0
        };

        let loss_streak = events
            .iter()
            .rev()
            .take_while(|event| event.outcome == Outcome::Loss)
            .count();

        Self {
            bet_frequency,
            balance_volatility,
            session_duration_minutes: span_minutes,
            loss_streak: u32::try_from(loss_streak).unwrap_or(u32::MAX),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone, Utc};

    fn event(minute: i64, outcome: Outcome, balance: f64) -> SessionEvent {
        SessionEvent {
            timestamp: Utc.with_ymd_and_hms(2024, 1, 1, 10, 0, 0).unwrap() + Duration::minutes(minute),
            bet_amount: 10.0,
            outcome,
            balance,
        }
    }

    #[test]
    fn empty_events_yield_zeroed_metrics() {
        assert_eq!(SessionMetrics::from_events(&[]), SessionMetrics::default());
    }

    #[test]
    fn aggregates_rate_swing_duration_and_trailing_losses() {
        let events = vec![
            event(0, Outcome::Win, 1000.0),
            event(10, Outcome::Loss, 1200.0),
            event(20, Outcome::Win, 900.0),
            event(40, Outcome::Loss, 800.0),
            event(60, Outcome::Loss, 700.0),
            event(120, Outcome::Loss, 600.0),
        ];
        let metrics = SessionMetrics::from_events(&events);
        assert!((metrics.bet_frequency - 3.0).abs() < 1e-9);
        assert!((metrics.balance_volatility - 0.6).abs() < 1e-9);
        assert!((metrics.session_duration_minutes - 120.0).abs() < 1e-9);
        assert_eq!(metrics.loss_streak, 3);
    }

    #[test]
    fn push_breaks_the_loss_streak() {
        let events = vec![
            event(0, Outcome::Loss, 100.0),
            event(1, Outcome::Push, 100.0),
            event(2, Outcome::Loss, 90.0),
        ];
        assert_eq!(SessionMetrics::from_events(&events).loss_streak, 1);
    }

    #[test]
    fn non_positive_starting_balance_has_no_volatility() {
        let events = vec![event(0, Outcome::Loss, 0.0), event(5, Outcome::Win, 50.0)];
        assert_eq!(SessionMetrics::from_events(&events).balance_volatility, 0.0);
    }

    #[test]
    fn accepts_duration_minutes_alias() {
        let metrics: SessionMetrics =
            serde_json::from_str(r#"{"bet_frequency":45,"duration_minutes":75,"loss_streak":4}"#)
                .expect("metrics");
        assert_eq!(metrics.session_duration_minutes, 75.0);
        assert_eq!(metrics.balance_volatility, 0.0);
        assert_eq!(metrics.loss_streak, 4);
    }
}
