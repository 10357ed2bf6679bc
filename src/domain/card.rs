use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::config::{SchedulerConfig, DEFAULT_INITIAL_EASINESS};
use crate::srs::sm2;
use crate::text::{first_sentence, normalize_text};

use super::review::Quality;

/// Identifier of a card, assigned by the storage collaborator
pub type ItemId = i64;

/// SM-2 scheduling state owned by exactly one card
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchedulingState {
  pub easiness_factor: f64,
  /// Whole days until the next review
  pub interval: u32,
  /// Consecutive successful recalls since creation or the last failure
  pub repetitions: u32,
  pub next_review: DateTime<Utc>,
  /// Set once at registration; never changed by grading
  pub created_at: DateTime<Utc>,
}

impl SchedulingState {
  pub fn new(initial_easiness: f64, now: DateTime<Utc>) -> Self {
    Self {
      easiness_factor: initial_easiness,
      interval: 0,
      repetitions: 0,
      next_review: now,
      created_at: now,
    }
  }

  /// Fresh state with the classic 2.5 easiness factor
  pub fn default_at(now: DateTime<Utc>) -> Self {
    Self::new(DEFAULT_INITIAL_EASINESS, now)
  }

  /// True until the card has been recalled successfully
  pub fn is_new(&self) -> bool {
    self.repetitions == 0
  }
}

/// Question and answer as shown during practice
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CardPrompt<'a> {
  pub question: &'a str,
  pub answer: &'a str,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Card {
  pub id: ItemId,
  /// Question side, stored normalized
  front: String,
  /// Answer side, stored normalized
  back: String,
  pub definition: Option<String>,
  pub schedule: SchedulingState,
}

impl Card {
  pub fn new(id: ItemId, front: &str, back: &str, now: DateTime<Utc>) -> Self {
    Self::with_schedule(id, front, back, SchedulingState::default_at(now))
  }

  /// New card whose schedule starts from the configured easiness
  pub fn with_config(
    id: ItemId,
    front: &str,
    back: &str,
    now: DateTime<Utc>,
    config: &SchedulerConfig,
  ) -> Self {
    Self::with_schedule(id, front, back, config.initial_state(now))
  }

  /// Build a card around an existing schedule, e.g. one loaded from storage
  pub fn with_schedule(id: ItemId, front: &str, back: &str, schedule: SchedulingState) -> Self {
    Self {
      id,
      front: normalize_text(front),
      back: normalize_text(back),
      definition: None,
      schedule,
    }
  }

  pub fn with_definition(mut self, definition: impl Into<String>) -> Self {
    let definition = definition.into();
    let trimmed = definition.trim();
    self.definition = (!trimmed.is_empty()).then(|| trimmed.to_string());
    self
  }

  pub fn front(&self) -> &str {
    &self.front
  }

  pub fn back(&self) -> &str {
    &self.back
  }

  /// Replace both sides; normalization is applied here rather than on read
  pub fn set_text(&mut self, front: &str, back: &str) {
    self.front = normalize_text(front);
    self.back = normalize_text(back);
  }

  /// Key used by collaborators to skip duplicate cards for the same learner
  pub fn dedup_key(&self) -> (&str, &str) {
    (&self.front, &self.back)
  }

  pub fn prompt(&self) -> CardPrompt<'_> {
    CardPrompt {
      question: first_sentence(&self.front),
      answer: first_sentence(&self.back),
    }
  }

  /// Apply one graded answer and return the updated schedule.
  pub fn review(
    &mut self,
    quality: Quality,
    now: DateTime<Utc>,
    config: &SchedulerConfig,
  ) -> &SchedulingState {
    self.schedule = sm2::advance_with(config, &self.schedule, quality, now);

    #[cfg(feature = "profiling")]
    crate::profile_log!(crate::profiling::EventType::SrsCalculation {
      card_id: self.id,
      quality: quality.value(),
      interval_days: self.schedule.interval,
    });

    tracing::debug!(
      card_id = self.id,
      quality = quality.value(),
      interval = self.schedule.interval,
      repetitions = self.schedule.repetitions,
      "Card reviewed"
    );

    &self.schedule
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::domain::ReviewGrade;
  use chrono::{Duration, TimeZone};

  fn t0() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 10, 9, 30, 0).unwrap()
  }

  #[test]
  fn test_scheduling_state_defaults() {
    let state = SchedulingState::default_at(t0());
    assert!((state.easiness_factor - 2.5).abs() < f64::EPSILON);
    assert_eq!(state.interval, 0);
    assert_eq!(state.repetitions, 0);
    assert_eq!(state.next_review, t0());
    assert_eq!(state.created_at, t0());
    assert!(state.is_new());
  }

  #[test]
  fn test_card_new_normalizes_text() {
    let card = Card::new(1, "  The   HOUSE ", "La Casa", t0());
    assert_eq!(card.front(), "the house");
    assert_eq!(card.back(), "la casa");
    assert!(card.definition.is_none());
  }

  #[test]
  fn test_set_text_normalizes() {
    let mut card = Card::new(1, "a", "b", t0());
    card.set_text("Good  Morning", " BUENOS días ");
    assert_eq!(card.dedup_key(), ("good morning", "buenos días"));
  }

  #[test]
  fn test_dedup_key_ignores_case_and_spacing() {
    let a = Card::new(1, "Dog", "Perro", t0());
    let b = Card::new(2, " dog ", "PERRO", t0());
    assert_eq!(a.dedup_key(), b.dedup_key());
  }

  #[test]
  fn test_with_definition_drops_blank() {
    let card = Card::new(1, "a", "b", t0()).with_definition("   ");
    assert!(card.definition.is_none());

    let card = Card::new(1, "a", "b", t0()).with_definition(" animal doméstico ");
    assert_eq!(card.definition.as_deref(), Some("animal doméstico"));
  }

  #[test]
  fn test_prompt_uses_first_sentence() {
    let card = Card::new(1, "To run. Also: to operate.", "Correr. Ir deprisa.", t0());
    let prompt = card.prompt();
    assert_eq!(prompt.question, "to run");
    assert_eq!(prompt.answer, "correr");
  }

  #[test]
  fn test_review_updates_schedule_and_keeps_created_at() {
    let mut card = Card::new(7, "q", "a", t0());
    let now = t0() + Duration::days(3);

    let state = card.review(ReviewGrade::Good.into(), now, &SchedulerConfig::default()).clone();

    assert_eq!(state.repetitions, 1);
    assert_eq!(state.interval, 1);
    assert_eq!(state.next_review, now + Duration::days(1));
    assert_eq!(card.schedule.created_at, t0());
  }

  #[test]
  fn test_with_config_uses_initial_easiness() {
    let config = SchedulerConfig {
      initial_easiness: 3.0,
      ..SchedulerConfig::default()
    };
    let card = Card::with_config(4, "q", "a", t0(), &config);
    assert!((card.schedule.easiness_factor - 3.0).abs() < f64::EPSILON);
    assert_eq!(card.schedule.created_at, t0());

    let plain = Card::new(5, "q", "a", t0());
    assert!((plain.schedule.easiness_factor - 2.5).abs() < f64::EPSILON);
  }

  #[test]
  fn test_repeated_blackouts_stop_at_configured_floor() {
    let config = SchedulerConfig {
      minimum_easiness: 1.5,
      ..SchedulerConfig::default()
    };
    config.validate().unwrap();
    let mut card = Card::with_config(6, "q", "a", t0(), &config);

    for day in 0..10 {
      card.review(Quality::BLACKOUT, t0() + Duration::days(day), &config);
      assert!(card.schedule.easiness_factor >= 1.5);
    }
    assert!((card.schedule.easiness_factor - 1.5).abs() < 1e-9);
  }

  #[test]
  fn test_card_serde_keeps_schedule() {
    let card = Card::new(3, "q", "a", t0());
    let json = serde_json::to_string(&card).unwrap();
    assert!(json.contains("\"next_review\":\"2024-01-10T09:30:00Z\""));

    let back: Card = serde_json::from_str(&json).unwrap();
    assert_eq!(back.schedule, card.schedule);
    assert_eq!(back.front(), "q");
  }
}
