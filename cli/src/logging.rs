use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

const DEFAULT_FILTER: &str = "info,service=debug,database=info";

/// Initializes logging for the command line tool.
///
/// Console output is compact and goes to stderr so stdout only carries command output.
/// When the log directory is available, JSON logs are also written there and rotated daily.
///
/// The default filter can be overridden with RUST_LOG, for example
/// `RUST_LOG=service=trace,database=debug node-unpublish unpublish 3`.
///
/// The returned guard must be kept alive for file logging to keep working.
pub fn init_logging() -> Option<tracing_appender::non_blocking::WorkerGuard> {
    let console_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_level(true)
        .compact();

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let log_dir = match file_system::get_log_dir() {
        Ok(log_dir) => log_dir,
        Err(e) => {
            eprintln!("Warning: Failed to create log directory: {}", e);
            eprintln!("Logs will only be written to console.");
            tracing_subscriber::registry()
                .with(env_filter)
                .with(console_layer)
                .init();
            return None;
        }
    };

    let file_appender = RollingFileAppender::new(Rotation::DAILY, &log_dir, "unpublish.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking)
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_file(true)
        .with_line_number(true);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer)
        .with(file_layer)
        .init();

    tracing::debug!("Writing logs to {}", log_dir.display());
    Some(guard)
}
