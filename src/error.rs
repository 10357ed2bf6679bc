//! Error types for scheduling operations.
//!
//! Every variant is recoverable by the caller; nothing in the core panics on
//! bad input.

use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::domain::ItemId;

/// Result type alias for scheduler operations.
pub type SchedulerResult<T> = Result<T, SchedulerError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SchedulerError {
  /// A quality or button value fell outside its accepted range.
  #[error("invalid grade: {value}")]
  InvalidGrade { value: i64 },

  /// Nothing qualifies for a practice session right now.
  #[error("no items due for review{}", format_next_due(.next_due))]
  NoItemsDue { next_due: Option<DateTime<Utc>> },

  /// A session referenced an item the caller did not supply.
  #[error("item not found: {id}")]
  ItemNotFound { id: ItemId },

  /// An answer was submitted after the last queued item.
  #[error("practice session is already complete")]
  SessionComplete,

  /// Configuration could not be read or is inconsistent.
  #[error("configuration error in {path}: {message}")]
  Config { path: String, message: String },
}

fn format_next_due(next_due: &Option<DateTime<Utc>>) -> String {
  match next_due {
    Some(at) => format!(" (next due {})", at.to_rfc3339()),
    None => String::new(),
  }
}

impl SchedulerError {
  /// Returns a short message suitable for showing to a learner.
  pub fn user_message(&self) -> &str {
    match self {
      SchedulerError::InvalidGrade { .. } => "Unrecognised rating",
      SchedulerError::NoItemsDue { .. } => "No cards due for review",
      SchedulerError::ItemNotFound { .. } => "Card not found",
      SchedulerError::SessionComplete => "No more cards",
      SchedulerError::Config { .. } => "Scheduler configuration error",
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use chrono::TimeZone;

  #[test]
  fn test_no_items_due_without_next_due() {
    let err = SchedulerError::NoItemsDue { next_due: None };
    assert_eq!(err.to_string(), "no items due for review");
  }

  #[test]
  fn test_no_items_due_mentions_next_due() {
    let at = Utc.with_ymd_and_hms(2024, 3, 1, 8, 0, 0).unwrap();
    let err = SchedulerError::NoItemsDue { next_due: Some(at) };
    assert_eq!(
      err.to_string(),
      "no items due for review (next due 2024-03-01T08:00:00+00:00)"
    );
  }

  #[test]
  fn test_user_messages_hide_details() {
    let err = SchedulerError::Config {
      path: "/etc/secret/config.toml".into(),
      message: "bad".into(),
    };
    assert!(!err.user_message().contains("/etc"));
    assert_eq!(SchedulerError::ItemNotFound { id: 7 }.user_message(), "Card not found");
  }

  #[test]
  fn test_invalid_grade_display() {
    assert_eq!(SchedulerError::InvalidGrade { value: 9 }.to_string(), "invalid grade: 9");
  }
}
