//! Logging configuration using tracing with a file appender.
//!
//! The TUI owns the terminal, so log records always go to a file.

use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, fmt};

/// Log file used when `--log-file` is not given.
pub const DEFAULT_LOG_FILE: &str = "babelterm.log";

/// Directive for `level`, falling back to `info` for unknown levels.
pub fn filter_for(level: &str) -> EnvFilter {
    EnvFilter::try_new(format!("babelterm={level}")).unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Initialize tracing with file output.
///
/// Returns a guard that must be held for the duration of the program; dropping
/// it flushes remaining records. Span enter/exit events are only recorded in
/// debug builds.
pub fn init_logging(log_path: Option<&Path>, level: Option<&str>) -> WorkerGuard {
    let log_path = log_path.unwrap_or(Path::new(DEFAULT_LOG_FILE));
    let level = level.unwrap_or("info");

    let parent = log_path.parent().unwrap_or(Path::new("."));
    let filename = log_path
        .file_name()
        .unwrap_or_else(|| std::ffi::OsStr::new(DEFAULT_LOG_FILE));

    let file_appender = tracing_appender::rolling::never(parent, filename);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let file_layer = fmt::layer()
        .with_writer(non_blocking)
        .with_ansi(false)
        .with_target(true)
        .with_level(true)
        .with_thread_names(true);

    #[cfg(debug_assertions)]
    let file_layer = {
        use tracing_subscriber::fmt::format::FmtSpan;
        file_layer.with_span_events(FmtSpan::ENTER | FmtSpan::CLOSE)
    };

    tracing_subscriber::registry()
        .with(filter_for(level))
        .with(file_layer)
        .init();

    guard
}
