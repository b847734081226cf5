//! Tracing setup.
//!
//! `RUST_LOG` selects the filter, defaulting to `info`.

use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Log to stderr, for one-shot CLI commands.
pub fn init_stderr() {
    let stderr_layer = fmt::layer().with_writer(std::io::stderr).with_target(false);
    tracing_subscriber::registry()
        .with(env_filter())
        .with(stderr_layer)
        .init();
}

/// Log to a daily-rolling file, for the dashboard which owns the terminal.
///
/// Keep the guard alive until exit or buffered lines are lost.
pub fn init_file(dir: &Path) -> WorkerGuard {
    let file_appender = tracing_appender::rolling::daily(dir, "quiz-engine.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
    let file_layer = fmt::layer().with_writer(non_blocking).with_ansi(false);
    tracing_subscriber::registry()
        .with(env_filter())
        .with(file_layer)
        .init();
    guard
}
