//! Tracing subscriber setup.

use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, registry};

const DEFAULT_FILTER: &str = "stacks_rs=info";

/// Install the global subscriber: `STACKS_LOG` overrides the default
/// filter. Safe to call at most once per process; later calls are no-ops.
pub fn init() {
    let filter = EnvFilter::try_from_env("STACKS_LOG")
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    let _ = registry()
        .with(filter)
        .with(fmt::layer().with_target(true))
        .try_init();
}
