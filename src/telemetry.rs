//! Structured logging setup.
//!
//! Rotation operations emit `tracing` spans and events; this module only
//! installs a subscriber for binaries and tests that do not bring their own.

use tracing_subscriber::{EnvFilter, fmt::MakeWriter};

/// Directive applied when `RUST_LOG` is unset or invalid.
pub const DEFAULT_FILTER: &str = "rota=info";

/// Installs a formatting subscriber filtered by `RUST_LOG`, writing to
/// standard output.
///
/// Does nothing when a global subscriber is already installed.
pub fn init_tracing() {
    init_tracing_with_writer(std::io::stdout);
}

/// Installs a formatting subscriber filtered by `RUST_LOG`, writing through
/// `writer`.
///
/// Tests pass [`tracing_subscriber::fmt::TestWriter`] so output is captured
/// per test. Does nothing when a global subscriber is already installed.
pub fn init_tracing_with_writer<W>(writer: W)
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    if tracing::dispatcher::has_been_set() {
        return;
    }
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    if tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .try_init()
        .is_err()
    {
        tracing::debug!("global subscriber installed concurrently");
    }
}
