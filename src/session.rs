//! Practice session cursor.
//!
//! A `StudySession` is a plain value owned by the caller: the queue built at
//! session start plus a position. Callers keep it wherever they keep
//! per-learner state (a cookie, a server-side store) and pass it back in for
//! every answer. The queue is a snapshot; grading a card does not reorder it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::config::{FailedItemPolicy, SchedulerConfig};
use crate::domain::{Card, ItemId, Quality, SchedulingState};
use crate::error::{SchedulerError, SchedulerResult};
use crate::srs::{build_queue, Schedulable};

/// Lifecycle of one practice session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionPhase {
  NotStarted,
  InProgress,
  Complete,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudySession {
  queue: Vec<ItemId>,
  position: usize,
  /// Cards already appended once under `FailedItemPolicy::Requeue`
  requeued: Vec<ItemId>,
  policy: FailedItemPolicy,
}

/// Result of answering the current card
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnswerOutcome {
  pub card_id: ItemId,
  pub schedule: SchedulingState,
  /// True if the card was put back at the end of this session's queue
  pub requeued: bool,
  pub next_card: Option<ItemId>,
  pub is_complete: bool,
}

impl StudySession {
  /// Start a session from the caller's cards. Fails with `NoItemsDue` when
  /// the queue would be empty.
  pub fn start<T: Schedulable>(
    items: &[T],
    now: DateTime<Utc>,
    config: &SchedulerConfig,
  ) -> SchedulerResult<Self> {
    let queue = crate::profile_scope!("build_queue", { build_queue(items, now) })?;
    tracing::debug!(total = queue.len(), "Practice session started");
    Ok(Self::from_queue(queue, config.failed_items))
  }

  /// Resume from a previously built queue
  pub fn from_queue(queue: Vec<ItemId>, policy: FailedItemPolicy) -> Self {
    Self {
      queue,
      position: 0,
      requeued: Vec::new(),
      policy,
    }
  }

  pub fn phase(&self) -> SessionPhase {
    if self.queue.is_empty() {
      SessionPhase::NotStarted
    } else if self.position < self.queue.len() {
      SessionPhase::InProgress
    } else {
      SessionPhase::Complete
    }
  }

  pub fn queue(&self) -> &[ItemId] {
    &self.queue
  }

  pub fn position(&self) -> usize {
    self.position
  }

  pub fn total(&self) -> usize {
    self.queue.len()
  }

  pub fn remaining(&self) -> usize {
    self.queue.len().saturating_sub(self.position)
  }

  /// Id of the card to present next, if any
  pub fn current(&self) -> Option<ItemId> {
    self.queue.get(self.position).copied()
  }

  /// Look up the current card among the caller's cards
  pub fn current_card<'a>(&self, cards: &'a [Card]) -> SchedulerResult<&'a Card> {
    let id = self.current().ok_or(SchedulerError::SessionComplete)?;
    cards
      .iter()
      .find(|card| card.id == id)
      .ok_or(SchedulerError::ItemNotFound { id })
  }

  /// Grade the current card, update its schedule and move to the next one.
  ///
  /// The position does not move when the current card cannot be found, so the
  /// caller can retry after reloading its cards.
  pub fn submit_answer(
    &mut self,
    cards: &mut [Card],
    quality: Quality,
    now: DateTime<Utc>,
    config: &SchedulerConfig,
  ) -> SchedulerResult<AnswerOutcome> {
    let id = self.current().ok_or(SchedulerError::SessionComplete)?;
    let card = cards.iter_mut().find(|card| card.id == id).ok_or_else(|| {
      tracing::warn!(card_id = id, "Card in session queue not found");
      SchedulerError::ItemNotFound { id }
    })?;

    let schedule = card.review(quality, now, config).clone();
    let requeued = !quality.is_passing(config.passing_quality) && self.requeue(id);
    self.position += 1;

    #[cfg(feature = "profiling")]
    crate::profile_log!(crate::profiling::EventType::SessionProgress {
      position: self.position,
      total: self.queue.len(),
    });

    Ok(AnswerOutcome {
      card_id: id,
      schedule,
      requeued,
      next_card: self.current(),
      is_complete: self.phase() == SessionPhase::Complete,
    })
  }

  fn requeue(&mut self, id: ItemId) -> bool {
    if self.policy != FailedItemPolicy::Requeue || self.requeued.contains(&id) {
      return false;
    }
    self.requeued.push(id);
    self.queue.push(id);
    true
  }
}
