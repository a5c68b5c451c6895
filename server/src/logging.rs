use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::config::LoggingConfig;
use crate::error::AppError;

/// Installs the global subscriber.
///
/// `RUST_LOG` wins over `logging.level`. When `logging.file` is set, events
/// are also appended to that file; keep the returned guard alive until exit so
/// buffered lines are flushed.
pub fn init_logging(config: &LoggingConfig) -> Result<Option<WorkerGuard>, AppError> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.level))
        .map_err(|e| AppError::Internal(format!("Failed to create log filter: {e}")))?;

    let registry = tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_target(true));

    match &config.file {
        Some(file) => {
            let path = Path::new(file);
            let directory = path
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .unwrap_or_else(|| Path::new("."));
            let file_name = path.file_name().ok_or_else(|| {
                AppError::Internal(format!("Log file path has no file name: {file}"))
            })?;

            std::fs::create_dir_all(directory)?;
            let appender = tracing_appender::rolling::never(directory, file_name);
            let (writer, guard) = tracing_appender::non_blocking(appender);

            registry
                .with(fmt::layer().with_writer(writer).with_ansi(false))
                .try_init()
                .map_err(|e| AppError::Internal(format!("Failed to initialize logging: {e}")))?;

            Ok(Some(guard))
        }
        None => {
            registry
                .try_init()
                .map_err(|e| AppError::Internal(format!("Failed to initialize logging: {e}")))?;
            Ok(None)
        }
    }
}
