use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, fmt};

/// Initialize logging.
///
/// Everything at `RUST_LOG` (default `info`) goes to stderr. Setting
/// `CLIPAUDIT_DEBUG` adds a daily log file at debug level; keep the returned
/// guard alive until exit so buffered lines are flushed.
pub fn init_logging(quiet: bool) -> Option<WorkerGuard> {
    let default_level = if quiet { "warn" } else { "info" };
    let stderr_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .with_filter(stderr_filter);

    if std::env::var("CLIPAUDIT_DEBUG").is_ok() {
        let log_dir = std::env::var_os("XDG_DATA_HOME")
            .map(std::path::PathBuf::from)
            .or_else(dirs::data_local_dir)
            .unwrap_or_else(|| std::path::PathBuf::from("."))
            .join("clipaudit");

        let _ = std::fs::create_dir_all(&log_dir);

        let file_appender = tracing_appender::rolling::daily(&log_dir, "clipaudit.log");
        let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

        let file_layer = fmt::layer()
            .with_writer(non_blocking)
            .with_ansi(false)
            .with_filter(EnvFilter::new("debug"));

        tracing_subscriber::registry()
            .with(stderr_layer)
            .with(file_layer)
            .init();

        tracing::debug!("Debug log file in {}", log_dir.display());
        Some(guard)
    } else {
        tracing_subscriber::registry().with(stderr_layer).init();
        None
    }
}
