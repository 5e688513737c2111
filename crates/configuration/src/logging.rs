use crate::error::ConfigError;
use crate::settings::LoggingSettings;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Installs the global tracing subscriber.
///
/// `RUST_LOG` wins over `logging.level`. When a log directory is configured a
/// daily rolling file is added next to stdout; the returned guard must be kept
/// alive for the lifetime of the process or buffered lines are lost.
pub fn init_tracing(settings: &LoggingSettings) -> Result<Option<WorkerGuard>, ConfigError> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&settings.level))
        .map_err(|e| ConfigError::LoggingError(e.to_string()))?;

    let stdout_layer = fmt::layer().with_target(true);

    match &settings.directory {
        Some(directory) => {
            let appender = tracing_appender::rolling::daily(directory, "schooldir.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            tracing_subscriber::registry()
                .with(filter)
                .with(stdout_layer)
                .with(fmt::layer().with_ansi(false).with_writer(writer))
                .try_init()
                .map_err(|e| ConfigError::LoggingError(e.to_string()))?;
            Ok(Some(guard))
        }
        None => {
            tracing_subscriber::registry()
                .with(filter)
                .with(stdout_layer)
                .try_init()
                .map_err(|e| ConfigError::LoggingError(e.to_string()))?;
            Ok(None)
        }
    }
}
