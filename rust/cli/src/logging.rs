//! Tracing setup for the `fourfold` binary.
//!
//! Diagnostics go to stderr so they never mix with command output. The filter
//! comes from `RUST_LOG` and defaults to warnings only; per-turn events are
//! available with `RUST_LOG=fourfold_engine::events=debug`.

use tracing_subscriber::fmt;
use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "warn";

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Installs the global subscriber. Returns `false` if one was already set.
pub fn init_logging() -> bool {
    let subscriber = fmt()
        .with_env_filter(env_filter())
        .with_target(true)
        .with_thread_names(true)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber).is_ok()
}
