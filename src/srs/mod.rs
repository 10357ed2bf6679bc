pub mod due_set;
pub mod sm2;

pub use due_set::{
  build_queue, classify, next_due, DeckSummary, DueStatus, QueueCandidate, Schedulable,
};
pub use sm2::{advance, advance_with};
