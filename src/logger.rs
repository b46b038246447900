use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::constants::{LOGS_DIR, LOG_FILE_PREFIX};

/// Logs go to stderr and to a daily file under `logs/`, stdout is left for the holder listing.
/// Keep the guard alive until exit so buffered file lines are flushed.
pub fn init_default_logger() -> WorkerGuard {
    let file_appender = tracing_appender::rolling::daily(LOGS_DIR, LOG_FILE_PREFIX);
    let (file_writer, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(fmt::layer().with_writer(file_writer).with_ansi(false))
        .init();

    guard
}
