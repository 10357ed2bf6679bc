use chrono::{DateTime, Duration, Utc};

use crate::config::SchedulerConfig;
use crate::domain::{Quality, SchedulingState};

/// Advance a schedule by one graded answer using the classic SM-2 parameters.
pub fn advance(state: &SchedulingState, quality: Quality, now: DateTime<Utc>) -> SchedulingState {
  advance_with(&SchedulerConfig::default(), state, quality, now)
}

/// Advance a schedule by one graded answer.
///
/// The easiness factor is updated first and the new value drives interval
/// growth from the third consecutive success onwards. A failed recall resets
/// the card to daily review. `next_review` is always `now + interval` days.
pub fn advance_with(
  config: &SchedulerConfig,
  state: &SchedulingState,
  quality: Quality,
  now: DateTime<Utc>,
) -> SchedulingState {
  let q = quality.value() as f64;

  // EF' = EF + (0.1 - (5 - q) * (0.08 + (5 - q) * 0.02))
  let ease_delta = 0.1 - (5.0 - q) * (0.08 + (5.0 - q) * 0.02);
  let easiness_factor = (state.easiness_factor + ease_delta).max(config.minimum_easiness);

  let (interval, repetitions) = if !quality.is_passing(config.passing_quality) {
    (config.first_interval_days, 0)
  } else {
    let repetitions = state.repetitions.saturating_add(1);
    let interval = match repetitions {
      1 => config.first_interval_days,
      2 => config.second_interval_days,
      // `as` saturates at u32::MAX
      _ => config.rounding.apply(state.interval as f64 * easiness_factor) as u32,
    };
    (interval, repetitions)
  };

  SchedulingState {
    easiness_factor,
    interval,
    repetitions,
    next_review: next_review_at(now, interval),
    created_at: state.created_at,
  }
}

/// `now + interval` days, saturating at the latest representable instant
fn next_review_at(now: DateTime<Utc>, interval: u32) -> DateTime<Utc> {
  now
    .checked_add_signed(Duration::days(interval as i64))
    .unwrap_or(DateTime::<Utc>::MAX_UTC)
}
