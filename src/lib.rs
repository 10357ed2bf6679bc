//! SM-2 spaced repetition scheduling core.
//!
//! Pure functions over in-memory cards: [`srs::advance`] grades one answer,
//! [`srs::build_queue`] picks and orders the cards for a practice session,
//! and [`session::StudySession`] is the caller-owned cursor through that queue.
//! Storage, transport and authentication belong to the embedding application.

pub mod config;
pub mod domain;
pub mod error;
pub mod logging;
pub mod profiling;
pub mod session;
pub mod srs;
pub mod text;

pub use config::SchedulerConfig;
pub use domain::{Card, ItemId, Quality, ReviewGrade, SchedulingState};
pub use error::{SchedulerError, SchedulerResult};
pub use session::{AnswerOutcome, SessionPhase, StudySession};
