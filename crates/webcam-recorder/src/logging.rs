//! Tracing setup: human-readable output on stderr plus a daily JSON log file.

use crate::config::Config;

use tracing::warn;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Filter used when `RUST_LOG` is unset.
pub(crate) const DEFAULT_LOG_FILTER: &str = "webcam_recorder=debug,webcam_recorder_core=debug";

const LOG_FILE_PREFIX: &str = "webcam-recorder.log";

/// Install the global subscriber.
///
/// The returned guard flushes the file writer; keep it alive until exit.
pub(crate) fn init() -> Option<WorkerGuard> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    let log_dir = Config::log_dir();

    let (file_layer, guard) = match &log_dir {
        Ok(dir) => {
            let appender = tracing_appender::rolling::daily(dir, LOG_FILE_PREFIX);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            (Some(fmt::layer().json().with_writer(writer)), Some(guard))
        }
        Err(_) => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(file_layer)
        .init();

    if let Err(e) = log_dir {
        warn!(error = ?e, "No log directory, logging to stderr only");
    }

    guard
}
