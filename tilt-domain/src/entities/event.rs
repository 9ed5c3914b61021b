// Session event entity
// One wagering action and the account balance right after it

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::utils::deserialize_timestamp;
use crate::value_objects::Outcome;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionEvent {
    #[serde(deserialize_with = "deserialize_timestamp")]
    pub timestamp: DateTime<Utc>,
    pub bet_amount: f64,
    pub outcome: Outcome,
    pub balance: f64,
}

/// Events of one player in one continuous play period, in non-decreasing
/// timestamp order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Session {
    events: Vec<SessionEvent>,
}

impl Session {
    pub fn from_events(events: Vec<SessionEvent>) -> Result<Self, DomainError> {
        if let Some(index) = events
            .windows(2)
            .position(|pair| pair[1].timestamp < pair[0].timestamp)
        {
            return Err(DomainError::UnorderedEvents { index: index + 1 });
        }
        Ok(Self { events })
    }

    /// Stable sort by timestamp, then wrap. Used by ingestion.
    pub fn sorted(mut events: Vec<SessionEvent>) -> Self {
        events.sort_by_key(|event| event.timestamp);
        Self { events }
    }

    pub fn events(&self) -> &[SessionEvent] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}
