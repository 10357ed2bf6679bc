//! Tracing setup for embedding applications and tools.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Filter used when `RUST_LOG` is not set
pub const DEFAULT_FILTER: &str = "flashcard_scheduler=info";

/// Install a global `fmt` subscriber filtered by `RUST_LOG`.
///
/// Returns false if a global subscriber was already installed.
pub fn init() -> bool {
  tracing_subscriber::registry()
    .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| DEFAULT_FILTER.into()))
    .with(tracing_subscriber::fmt::layer())
    .try_init()
    .is_ok()
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_second_init_is_harmless() {
    let _ = init();
    assert!(!init());
    tracing::info!("logging initialized twice without panicking");
  }
}
