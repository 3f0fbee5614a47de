//! Diagnostic logging
//!
//! Diagnostics go to stderr through `tracing`, so they never mix with the
//! command output on stdout. `RUST_LOG` overrides the default level.

use std::sync::Once;

use tracing::Level;
use tracing_subscriber::{fmt, EnvFilter};

static TRACING_INIT: Once = Once::new();

const CRATE_TARGET: &str = "pocket_ledger";

/// Default filter directive when `RUST_LOG` is unset
pub fn default_directive(verbose: bool) -> String {
    let level = if verbose { Level::DEBUG } else { Level::WARN };
    format!("{}={}", CRATE_TARGET, level.as_str().to_lowercase())
}

/// Initializes the global tracing subscriber once per process.
pub fn init_tracing(verbose: bool) {
    TRACING_INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose)));

        // try_init: a test harness may already own the global subscriber
        let _ = fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .try_init();
    });
}
