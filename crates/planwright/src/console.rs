//! Console logging for solver runs.
//!
//! Installs a `tracing` subscriber that prints the solver's structured
//! events (`solve_start`, `new_best`, `solve_end`, ...) to stdout.

use std::sync::OnceLock;

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

const DEFAULT_FILTER: &str = "planwright_solver=info";

static INIT: OnceLock<bool> = OnceLock::new();

/// Initializes console output.
///
/// Safe to call multiple times - only the first call has effect. `RUST_LOG`
/// overrides the default `planwright_solver=info` filter. Returns false if
/// another global subscriber was installed first.
pub fn init() -> bool {
    *INIT.get_or_init(|| {
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_target(false))
            .try_init()
            .is_ok()
    })
}
