use std::fs;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

const LOG_DIR: &str = "logs";
const LOG_FILE: &str = "ncaa_sponsorship.log";

/// Initializes the logging system with both console and file output.
///
/// Console output goes to stderr; stdout carries only the run summary.
/// When the log directory cannot be created the file layer is skipped and only
/// the console layer is installed. The returned guard, if any, must stay alive
/// until the run ends so the file layer flushes.
pub fn init_logging() -> Option<WorkerGuard> {
    let appender = fs::create_dir_all(LOG_DIR)
        .map_err(|e| e.to_string())
        .and_then(|_| {
            RollingFileAppender::builder()
                .rotation(Rotation::DAILY)
                .filename_prefix(LOG_FILE)
                .build(LOG_DIR)
                .map_err(|e| e.to_string())
        });

    let (file_layer, guard, file_error) = match appender {
        Ok(appender) => {
            let (non_blocking_writer, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer().json().with_writer(non_blocking_writer);
            (Some(layer), Some(guard), None)
        }
        Err(e) => (None, None, Some(e)),
    };

    let console_layer = fmt::layer().with_writer(std::io::stderr);

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("ncaa_sponsorship=info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .with(console_layer)
        .init();

    if let Some(e) = file_error {
        tracing::debug!(dir = LOG_DIR, error = %e, "File logging disabled");
    }

    guard
}
