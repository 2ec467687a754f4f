//! Diagnostic logging to stderr
//!
//! `RUST_LOG` takes precedence; otherwise `--verbose` selects debug output
//! and the default shows warnings (unreadable config files and the like).
//! Reconciliation warnings are printed by the commands as styled lines, not
//! through the log.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

pub fn init_logging(verbose: bool) {
    let default_level = if verbose { "sbom=debug,warn" } else { "warn" };
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false);

    // A subscriber may already be installed when embedded in tests
    let _ = tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init();
}
