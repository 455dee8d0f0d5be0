//! Diagnostics setup for applications and tests.
//!
//! Library code only emits `tracing` events (bad class names, failed nextTick
//! callbacks, flush activity). Nothing is printed until a subscriber is
//! installed, either by the application or through [`init`].

use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::{SubscriberInitExt, TryInitError};

/// Environment variable read by [`init`].
pub const LOG_ENV: &str = "NEXA_LOG";

const DEFAULT_DIRECTIVE: &str = "warn";

fn filter() -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| DEFAULT_DIRECTIVE.into())
}

/// Installs a formatted subscriber filtered by `NEXA_LOG` (default `warn`).
///
/// Fails if a global subscriber is already set.
pub fn init() -> Result<(), TryInitError> {
    tracing_subscriber::registry()
        .with(filter())
        .with(tracing_subscriber::fmt::layer())
        .try_init()
}
