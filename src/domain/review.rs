use serde::{Deserialize, Serialize};

use crate::config::{GradeMode, MAX_QUALITY};
use crate::error::{SchedulerError, SchedulerResult};

/// Recall quality on the SM-2 scale, always within 0..=5.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u8")]
pub struct Quality(u8);

impl Quality {
  /// Complete failure to recall
  pub const BLACKOUT: Quality = Quality(0);
  /// Perfect, instant recall
  pub const PERFECT: Quality = Quality(MAX_QUALITY);

  /// Strict constructor: anything outside 0..=5 is an `InvalidGrade`.
  pub fn new(value: i64) -> SchedulerResult<Self> {
    if (0..=MAX_QUALITY as i64).contains(&value) {
      Ok(Self(value as u8))
    } else {
      tracing::warn!(value, "Rejected out-of-range quality");
      Err(SchedulerError::InvalidGrade { value })
    }
  }

  /// Lenient constructor: out-of-range values are pulled to the nearest bound.
  pub fn clamped(value: i64) -> Self {
    Self(value.clamp(0, MAX_QUALITY as i64) as u8)
  }

  /// Construct according to the configured grade handling.
  pub fn with_mode(value: i64, mode: GradeMode) -> SchedulerResult<Self> {
    match mode {
      GradeMode::Strict => Self::new(value),
      GradeMode::Clamp => Ok(Self::clamped(value)),
    }
  }

  pub fn value(self) -> u8 {
    self.0
  }

  /// True if this quality counts as a successful recall
  pub fn is_passing(self, passing_quality: u8) -> bool {
    self.0 >= passing_quality
  }
}

impl TryFrom<i64> for Quality {
  type Error = SchedulerError;

  fn try_from(value: i64) -> SchedulerResult<Self> {
    Self::new(value)
  }
}

impl From<Quality> for u8 {
  fn from(quality: Quality) -> u8 {
    quality.0
  }
}

/// The four answer buttons shown to a learner.
///
/// Buttons map onto the 0-5 scale as Again→0, Hard→3, Good→4, Easy→5.
/// Qualities 1 and 2 are never produced from a button press.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReviewGrade {
  Again,
  Hard,
  Good,
  Easy,
}

impl ReviewGrade {
  /// Button numbers as sent by clients: 1=Again, 2=Hard, 3=Good, 4=Easy
  pub fn from_button(button: i64) -> SchedulerResult<Self> {
    match button {
      1 => Ok(Self::Again),
      2 => Ok(Self::Hard),
      3 => Ok(Self::Good),
      4 => Ok(Self::Easy),
      _ => {
        tracing::warn!(button, "Rejected unknown answer button");
        Err(SchedulerError::InvalidGrade { value: button })
      }
    }
  }

  pub fn from_str(s: &str) -> Option<Self> {
    match s {
      "again" => Some(Self::Again),
      "hard" => Some(Self::Hard),
      "good" => Some(Self::Good),
      "easy" => Some(Self::Easy),
      _ => None,
    }
  }

  pub fn as_str(&self) -> &'static str {
    match self {
      Self::Again => "again",
      Self::Hard => "hard",
      Self::Good => "good",
      Self::Easy => "easy",
    }
  }

  pub fn quality(&self) -> Quality {
    match self {
      Self::Again => Quality(0),
      Self::Hard => Quality(3),
      Self::Good => Quality(4),
      Self::Easy => Quality(5),
    }
  }

  /// True if this button counts as a successful recall under `passing_quality`
  pub fn is_passing(&self, passing_quality: u8) -> bool {
    self.quality().is_passing(passing_quality)
  }
}

impl From<ReviewGrade> for Quality {
  fn from(grade: ReviewGrade) -> Quality {
    grade.quality()
  }
}
