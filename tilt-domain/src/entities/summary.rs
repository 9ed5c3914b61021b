// Session summary
// Descriptive totals shown next to rule findings

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::entities::SessionEvent;
use crate::value_objects::Outcome;

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct SessionSummary {
    pub total_spins: usize,
    pub started_at: Option<DateTime<Utc>>,
    pub ended_at: Option<DateTime<Utc>>,
    pub duration_minutes: f64,
    pub starting_balance: Option<f64>,
    pub ending_balance: Option<f64>,
    pub total_wagered: f64,
    pub wins: usize,
    pub losses: usize,
    pub pushes: usize,
    /// Percentage of events that were wins.
    pub win_rate: f64,
}

impl SessionSummary {
    pub fn from_events(events: &[SessionEvent]) -> Self {
        let (Some(first), Some(last)) = (events.first(), events.last()) else {
            return Self::default();
        };
        let count = |outcome: Outcome| events.iter().filter(|event| event.outcome == outcome).count();
        let wins = count(Outcome::Win);

        Self {
            total_spins: events.len(),
            started_at: Some(first.timestamp),
            ended_at: Some(last.timestamp),
            duration_minutes: (last.timestamp - first.timestamp).num_milliseconds() as f64 / 60_000.0,
            starting_balance: Some(first.balance),
            ending_balance: Some(last.balance),
            total_wagered: events.iter().map(|event| event.bet_amount).sum(),
            wins,
            losses: count(Outcome::Loss),
            pushes: count(Outcome::Push),
            win_rate: wins as f64 / events.len() as f64 * 100.0,
        }
    }
}
