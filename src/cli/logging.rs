use std::io::{self, IsTerminal};

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

use super::args::LogLevel;

/// Install the stderr subscriber; `RUST_LOG` overrides `level` when set
pub fn init_logging(level: LogLevel) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.as_filter()));

    let layer = fmt::layer()
        .with_target(false)
        .with_ansi(io::stderr().is_terminal())
        .with_writer(io::stderr);

    if let Err(e) = tracing_subscriber::registry().with(filter).with(layer).try_init() {
        eprintln!("Warning: Could not initialize logging: {e}");
    }
}
