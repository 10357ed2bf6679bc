//! Due-set selection for a practice session.
//!
//! A session queue is made of two groups, never interleaved:
//! - Due cards: recalled successfully before and now overdue, most overdue first
//! - New cards: never passed yet, oldest registered first
//!
//! Cards that have been passed and are not yet due are left out entirely.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{Card, ItemId, SchedulingState};
use crate::error::{SchedulerError, SchedulerResult};

/// The fields queue construction needs from a card
pub trait Schedulable {
  fn item_id(&self) -> ItemId;
  fn repetitions(&self) -> u32;
  fn next_review(&self) -> DateTime<Utc>;
  fn created_at(&self) -> DateTime<Utc>;
}

impl Schedulable for Card {
  fn item_id(&self) -> ItemId {
    self.id
  }

  fn repetitions(&self) -> u32 {
    self.schedule.repetitions
  }

  fn next_review(&self) -> DateTime<Utc> {
    self.schedule.next_review
  }

  fn created_at(&self) -> DateTime<Utc> {
    self.schedule.created_at
  }
}

/// Minimal scheduling record for callers that don't hold full cards
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueueCandidate {
  pub id: ItemId,
  pub repetitions: u32,
  pub next_review: DateTime<Utc>,
  pub created_at: DateTime<Utc>,
}

impl QueueCandidate {
  pub fn from_schedule(id: ItemId, schedule: &SchedulingState) -> Self {
    Self {
      id,
      repetitions: schedule.repetitions,
      next_review: schedule.next_review,
      created_at: schedule.created_at,
    }
  }
}

impl Schedulable for QueueCandidate {
  fn item_id(&self) -> ItemId {
    self.id
  }

  fn repetitions(&self) -> u32 {
    self.repetitions
  }

  fn next_review(&self) -> DateTime<Utc> {
    self.next_review
  }

  fn created_at(&self) -> DateTime<Utc> {
    self.created_at
  }
}

/// Where a card falls relative to `now`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DueStatus {
  Due,
  New,
  Upcoming,
}

pub fn classify<T: Schedulable>(item: &T, now: DateTime<Utc>) -> DueStatus {
  if item.repetitions() == 0 {
    DueStatus::New
  } else if item.next_review() <= now {
    DueStatus::Due
  } else {
    DueStatus::Upcoming
  }
}

/// Build the ordered queue of card ids for one practice session.
///
/// Returns `NoItemsDue` carrying the soonest upcoming review when nothing
/// qualifies.
pub fn build_queue<T: Schedulable>(items: &[T], now: DateTime<Utc>) -> SchedulerResult<Vec<ItemId>> {
  let mut due: Vec<&T> = Vec::new();
  let mut new: Vec<&T> = Vec::new();

  for item in items {
    match classify(item, now) {
      DueStatus::Due => due.push(item),
      DueStatus::New => new.push(item),
      DueStatus::Upcoming => {}
    }
  }

  if due.is_empty() && new.is_empty() {
    let next_due = next_due(items, now);
    tracing::debug!(total = items.len(), ?next_due, "No cards due");
    return Err(SchedulerError::NoItemsDue { next_due });
  }

  due.sort_by_key(|item| (item.next_review(), item.item_id()));
  new.sort_by_key(|item| (item.created_at(), item.item_id()));

  #[cfg(feature = "profiling")]
  crate::profile_log!(crate::profiling::EventType::QueueBuilt {
    due: due.len(),
    new: new.len(),
  });

  tracing::debug!(due = due.len(), new = new.len(), "Built practice queue");

  Ok(due.iter().chain(new.iter()).map(|item| item.item_id()).collect())
}

/// Soonest review among passed cards that are not yet due
pub fn next_due<T: Schedulable>(items: &[T], now: DateTime<Utc>) -> Option<DateTime<Utc>> {
  items
    .iter()
    .filter(|item| classify(*item, now) == DueStatus::Upcoming)
    .map(|item| item.next_review())
    .min()
}

/// Deck overview used for "nothing due until ..." style messages
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeckSummary {
  pub total: usize,
  pub due: usize,
  pub new: usize,
  pub upcoming: usize,
  pub next_due: Option<DateTime<Utc>>,
}

impl DeckSummary {
  pub fn from_items<T: Schedulable>(items: &[T], now: DateTime<Utc>) -> Self {
    let mut summary = Self {
      total: items.len(),
      due: 0,
      new: 0,
      upcoming: 0,
      next_due: None,
    };

    for item in items {
      match classify(item, now) {
        DueStatus::Due => summary.due += 1,
        DueStatus::New => summary.new += 1,
        DueStatus::Upcoming => {
          summary.upcoming += 1;
          let at = item.next_review();
          summary.next_due = Some(summary.next_due.map_or(at, |current| current.min(at)));
        }
      }
    }

    summary
  }

  /// Number of cards a session started now would contain
  pub fn session_size(&self) -> usize {
    self.due + self.new
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use chrono::{Duration, TimeZone};

  fn today() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 15, 10, 0, 0).unwrap()
  }

  fn candidate(id: ItemId, repetitions: u32, next_review: DateTime<Utc>, created_at: DateTime<Utc>) -> QueueCandidate {
    QueueCandidate {
      id,
      repetitions,
      next_review,
      created_at,
    }
  }

  fn t0() -> DateTime<Utc> {
    today() - Duration::days(60)
  }

  #[test]
  fn test_due_before_new_and_upcoming_excluded() {
    let items = vec![
      candidate(1, 2, today() - Duration::days(1), t0()),
      candidate(2, 0, today(), t0()),
      candidate(3, 3, today() + Duration::days(1), t0()),
    ];

    assert_eq!(build_queue(&items, today()).unwrap(), vec![1, 2]);
  }

  #[test]
  fn test_due_ordered_most_overdue_first() {
    let items = vec![
      candidate(10, 1, today() - Duration::hours(1), t0()),
      candidate(11, 4, today() - Duration::days(9), t0()),
      candidate(12, 2, today() - Duration::days(2), t0()),
    ];

    assert_eq!(build_queue(&items, today()).unwrap(), vec![11, 12, 10]);
  }

  #[test]
  fn test_new_ordered_by_creation() {
    let items = vec![
      candidate(5, 0, today(), t0() + Duration::days(3)),
      candidate(6, 0, today(), t0()),
      candidate(7, 0, today(), t0() + Duration::days(1)),
    ];

    assert_eq!(build_queue(&items, today()).unwrap(), vec![6, 7, 5]);
  }

  #[test]
  fn test_ties_broken_by_id() {
    let due_at = today() - Duration::days(1);
    let items = vec![
      candidate(9, 1, due_at, t0()),
      candidate(4, 1, due_at, t0()),
      candidate(8, 0, today(), t0()),
      candidate(3, 0, today(), t0()),
    ];

    assert_eq!(build_queue(&items, today()).unwrap(), vec![4, 9, 3, 8]);
  }

  #[test]
  fn test_due_exactly_now_is_included() {
    let items = vec![candidate(1, 1, today(), t0())];
    assert_eq!(build_queue(&items, today()).unwrap(), vec![1]);
  }

  #[test]
  fn test_new_card_with_future_review_is_still_new() {
    // A card failed yesterday has repetitions 0 and next_review tomorrow
    let items = vec![candidate(1, 0, today() + Duration::days(1), t0())];
    assert_eq!(build_queue(&items, today()).unwrap(), vec![1]);
  }

  #[test]
  fn test_no_items_due_reports_soonest() {
    let items = vec![
      candidate(1, 2, today() + Duration::days(4), t0()),
      candidate(2, 1, today() + Duration::days(2), t0()),
    ];

    assert_eq!(
      build_queue(&items, today()),
      Err(SchedulerError::NoItemsDue {
        next_due: Some(today() + Duration::days(2))
      })
    );
  }

  #[test]
  fn test_empty_deck() {
    let items: Vec<QueueCandidate> = vec![];
    assert_eq!(
      build_queue(&items, today()),
      Err(SchedulerError::NoItemsDue { next_due: None })
    );
  }

  #[test]
  fn test_build_queue_is_deterministic() {
    let items: Vec<QueueCandidate> = (0..20)
      .map(|i| {
        let reps = (i % 3) as u32;
        candidate(i, reps, today() + Duration::hours(i - 10), t0() + Duration::minutes(i % 4))
      })
      .collect();

    let first = build_queue(&items, today()).unwrap();
    let second = build_queue(&items, today()).unwrap();
    assert_eq!(first, second);
  }

  #[test]
  fn test_works_on_cards() {
    let mut overdue = Card::new(1, "a", "b", t0());
    overdue.schedule.repetitions = 2;
    overdue.schedule.next_review = today() - Duration::days(3);
    let fresh = Card::new(2, "c", "d", t0());

    assert_eq!(build_queue(&[fresh, overdue], today()).unwrap(), vec![1, 2]);
  }

  #[test]
  fn test_next_due_ignores_new_and_due() {
    let items = vec![
      candidate(1, 0, today() + Duration::hours(1), t0()),
      candidate(2, 1, today() - Duration::days(1), t0()),
      candidate(3, 1, today() + Duration::days(5), t0()),
    ];

    assert_eq!(next_due(&items, today()), Some(today() + Duration::days(5)));
  }

  #[test]
  fn test_deck_summary_matches_queue() {
    let items = vec![
      candidate(1, 2, today() - Duration::days(1), t0()),
      candidate(2, 0, today(), t0()),
      candidate(3, 3, today() + Duration::days(1), t0()),
      candidate(4, 1, today() + Duration::days(8), t0()),
    ];

    let summary = DeckSummary::from_items(&items, today());
    assert_eq!(summary.total, 4);
    assert_eq!(summary.due, 1);
    assert_eq!(summary.new, 1);
    assert_eq!(summary.upcoming, 2);
    assert_eq!(summary.next_due, Some(today() + Duration::days(1)));
    assert_eq!(summary.session_size(), build_queue(&items, today()).unwrap().len());
  }

  #[test]
  fn test_candidate_from_schedule() {
    let schedule = SchedulingState::default_at(t0());
    let c = QueueCandidate::from_schedule(42, &schedule);
    assert_eq!(c.id, 42);
    assert_eq!(classify(&c, today()), DueStatus::New);
  }
}
