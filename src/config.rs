//! Scheduler configuration.
//!
//! All tunables of the SM-2 core live here. Values come from the
//! `[scheduler]` table of a TOML file; every field has a default so an empty
//! or missing file yields the classic SM-2 parameters.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::domain::{Quality, SchedulingState};
use crate::error::{SchedulerError, SchedulerResult};

// ==================== SM-2 Defaults ====================

/// Easiness factor assigned to a freshly created card
pub const DEFAULT_INITIAL_EASINESS: f64 = 2.5;

/// Floor for the easiness factor
pub const DEFAULT_MINIMUM_EASINESS: f64 = 1.3;

/// Lowest quality that counts as a successful recall
pub const DEFAULT_PASSING_QUALITY: u8 = 3;

/// Interval after the first successful recall
pub const DEFAULT_FIRST_INTERVAL_DAYS: u32 = 1;

/// Interval after the second consecutive successful recall
pub const DEFAULT_SECOND_INTERVAL_DAYS: u32 = 6;

/// Highest quality on the SM-2 scale
pub const MAX_QUALITY: u8 = 5;

// ==================== Config File Location ====================

/// Default config file looked up in the working directory
pub const CONFIG_FILE: &str = "config.toml";

/// Environment variable naming an alternative config file
pub const CONFIG_PATH_ENV: &str = "FLASHCARD_SCHEDULER_CONFIG";

/// Source reported for errors in configs that did not come from a file
pub const INLINE_SOURCE: &str = "<inline>";

/// How `interval * ef` is rounded to whole days.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum RoundingMode {
  /// Halves round up (all operands are positive)
  #[default]
  HalfUp,
  /// Halves round to the nearest even day count
  HalfEven,
}

impl RoundingMode {
  pub fn apply(&self, value: f64) -> f64 {
    match self {
      Self::HalfUp => value.round(),
      Self::HalfEven => value.round_ties_even(),
    }
  }
}

/// What to do with a quality outside 0..=5.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum GradeMode {
  /// Reject with `InvalidGrade`
  #[default]
  Strict,
  /// Clamp into 0..=5
  Clamp,
}

/// Whether a card failed mid-session comes back in the same session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum FailedItemPolicy {
  /// The session queue is a snapshot; failed cards wait for the next session
  #[default]
  NextSession,
  /// A failed card is appended once to the end of the active queue
  Requeue,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchedulerConfig {
  pub initial_easiness: f64,
  pub minimum_easiness: f64,
  pub passing_quality: u8,
  pub first_interval_days: u32,
  pub second_interval_days: u32,
  pub rounding: RoundingMode,
  pub grade_mode: GradeMode,
  pub failed_items: FailedItemPolicy,
}

impl Default for SchedulerConfig {
  fn default() -> Self {
    Self {
      initial_easiness: DEFAULT_INITIAL_EASINESS,
      minimum_easiness: DEFAULT_MINIMUM_EASINESS,
      passing_quality: DEFAULT_PASSING_QUALITY,
      first_interval_days: DEFAULT_FIRST_INTERVAL_DAYS,
      second_interval_days: DEFAULT_SECOND_INTERVAL_DAYS,
      rounding: RoundingMode::default(),
      grade_mode: GradeMode::default(),
      failed_items: FailedItemPolicy::default(),
    }
  }
}

/// Configuration file structure for config.toml
#[derive(Debug, Deserialize)]
struct ConfigFile {
  scheduler: Option<SchedulerConfig>,
}

impl SchedulerConfig {
  /// Parse a TOML document. A missing `[scheduler]` table means defaults.
  pub fn from_toml_str(contents: &str) -> SchedulerResult<Self> {
    Self::parse(contents).map_err(|message| config_error(INLINE_SOURCE, message))
  }

  /// Read and validate a config file.
  pub fn from_path(path: &Path) -> SchedulerResult<Self> {
    let source = path.display().to_string();
    let contents =
      std::fs::read_to_string(path).map_err(|e| config_error(&source, e.to_string()))?;
    Self::parse(&contents).map_err(|message| config_error(&source, message))
  }

  fn parse(contents: &str) -> Result<Self, String> {
    let file: ConfigFile = toml::from_str(contents).map_err(|e| e.to_string())?;
    let config = file.scheduler.unwrap_or_default();
    config.check()?;
    Ok(config)
  }

  /// Load config with priority: env path (.env honored) > config.toml > defaults.
  ///
  /// Problems with a file are logged and the defaults are used instead.
  pub fn load() -> Self {
    let _ = dotenvy::dotenv();

    let candidate = std::env::var(CONFIG_PATH_ENV)
      .map(PathBuf::from)
      .ok()
      .or_else(|| {
        let default = PathBuf::from(CONFIG_FILE);
        default.exists().then_some(default)
      });

    match candidate {
      Some(path) => match Self::from_path(&path) {
        Ok(config) => {
          tracing::info!("Using scheduler config from {}", path.display());
          config
        }
        Err(e) => {
          tracing::warn!("{}; falling back to defaults", e);
          Self::default()
        }
      },
      None => {
        tracing::info!("No scheduler config found, using SM-2 defaults");
        Self::default()
      }
    }
  }

  pub fn validate(&self) -> SchedulerResult<()> {
    self.check().map_err(|message| config_error(INLINE_SOURCE, message))
  }

  fn check(&self) -> Result<(), String> {
    if !self.minimum_easiness.is_finite() || self.minimum_easiness < DEFAULT_MINIMUM_EASINESS {
      return Err(format!(
        "minimum_easiness must be a finite value of at least {}, got {}",
        DEFAULT_MINIMUM_EASINESS, self.minimum_easiness
      ));
    }
    if !self.initial_easiness.is_finite() {
      return Err(format!("initial_easiness must be finite, got {}", self.initial_easiness));
    }
    if self.initial_easiness < self.minimum_easiness {
      return Err(format!(
        "initial_easiness {} is below minimum_easiness {}",
        self.initial_easiness, self.minimum_easiness
      ));
    }
    if self.passing_quality > MAX_QUALITY {
      return Err(format!(
        "passing_quality must be at most {}, got {}",
        MAX_QUALITY, self.passing_quality
      ));
    }
    Ok(())
  }

  /// Turn a raw grade into a `Quality` according to `grade_mode`.
  pub fn quality(&self, value: i64) -> SchedulerResult<Quality> {
    Quality::with_mode(value, self.grade_mode)
  }

  /// Fresh schedule for a card registered at `now`
  pub fn initial_state(&self, now: DateTime<Utc>) -> SchedulingState {
    SchedulingState::new(self.initial_easiness, now)
  }
}

fn config_error(source: &str, message: String) -> SchedulerError {
  SchedulerError::Config {
    path: source.to_string(),
    message,
  }
}
