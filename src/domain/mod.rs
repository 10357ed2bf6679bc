pub mod card;
pub mod review;

pub use card::{Card, CardPrompt, ItemId, SchedulingState};
pub use review::{Quality, ReviewGrade};
