//! Event types for profiling.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::ItemId;

/// A profiling event with timestamp and optional duration.
#[derive(Serialize)]
pub struct ProfileEvent {
    /// When the event occurred
    pub timestamp: DateTime<Utc>,
    /// The type of event
    pub event_type: EventType,
    /// Duration in microseconds (for timed events)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_us: Option<u64>,
}

impl ProfileEvent {
    /// Create a new event with the current timestamp.
    pub fn new(event_type: EventType) -> Self {
        Self {
            timestamp: Utc::now(),
            event_type,
            duration_us: None,
        }
    }

    /// Create a new event with duration.
    pub fn with_duration(event_type: EventType, duration: std::time::Duration) -> Self {
        Self {
            timestamp: Utc::now(),
            event_type,
            duration_us: Some(duration.as_micros() as u64),
        }
    }
}

/// Types of events that can be logged.
#[derive(Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EventType {
    /// Profiling log opened
    LogStart {
        log_id: String,
    },
    /// Profiling log closed
    LogEnd {
        total_events: u64,
    },

    /// One graded answer run through SM-2
    SrsCalculation {
        card_id: ItemId,
        quality: u8,
        interval_days: u32,
    },

    /// A practice queue was built
    QueueBuilt {
        due: usize,
        new: usize,
    },

    /// A practice session moved past one card
    SessionProgress {
        position: usize,
        total: usize,
    },

    /// A timed code block completed
    TimedScope {
        name: String,
    },
}
