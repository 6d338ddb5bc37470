use std::fs;
use std::io;
use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

use crate::domain::config::LoggingConfig;
use crate::domain::DomainError;

const LOG_FILE_PREFIX: &str = "currency-sense";

/// Initialize the logging system with console output and file rotation.
///
/// Console output goes to stderr; stdout belongs to the command protocol.
/// Returns a guard that must be kept alive for the duration of the application.
/// When the guard is dropped, any remaining logs are flushed.
pub fn init_logging(
    logs_dir: &Path,
    config: &LoggingConfig,
) -> Result<Option<WorkerGuard>, DomainError> {
    let level = config.level.as_str();

    // Environment filter with default from config
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(level)));

    let console_layer = tracing_subscriber::fmt::layer()
        .with_writer(io::stderr)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(true)
        .with_line_number(true)
        .with_span_events(FmtSpan::NONE)
        .with_filter(env_filter);

    if config.file_logging {
        let (non_blocking, guard) =
            tracing_appender::non_blocking(file_appender(logs_dir, config.max_files)?);

        // File layer with JSON format
        let file_layer = tracing_subscriber::fmt::layer()
            .with_writer(non_blocking)
            .with_ansi(false)
            .json()
            .with_span_events(FmtSpan::CLOSE)
            .with_filter(EnvFilter::new(format!("currency_sense={}", level)));

        // Combine layers - use try_init to avoid panic if called twice
        if tracing_subscriber::registry()
            .with(console_layer)
            .with(file_layer)
            .try_init()
            .is_ok()
        {
            tracing::info!(
                logs_dir = ?logs_dir,
                level = level,
                max_files = config.max_files,
                "Logging initialized with file output"
            );
        }

        Ok(Some(guard))
    } else {
        let _ = tracing_subscriber::registry()
            .with(console_layer)
            .try_init();

        tracing::info!(level = level, "Logging initialized (console only)");

        Ok(None)
    }
}

fn default_directives(level: &str) -> String {
    format!("currency_sense={},warn", level)
}

/// Daily rotating appender keeping at most `max_files` files.
fn file_appender(logs_dir: &Path, max_files: u32) -> Result<RollingFileAppender, DomainError> {
    fs::create_dir_all(logs_dir)?;

    RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix(LOG_FILE_PREFIX)
        .filename_suffix("log")
        .max_log_files(max_files.max(1) as usize)
        .build(logs_dir)
        .map_err(|e| DomainError::Config(format!("Failed to create log appender: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;

    #[test]
    fn test_default_directives_scope_crate() {
        assert_eq!(default_directives("debug"), "currency_sense=debug,warn");
        assert!(EnvFilter::try_new(default_directives("info")).is_ok());
    }

    #[test]
    fn test_file_appender_creates_logs_dir() {
        let logs_dir = env::temp_dir().join("currency_sense_log_test");
        let _ = fs::remove_dir_all(&logs_dir);

        // Can't install a global subscriber twice in tests, so build the appender only
        let appender = file_appender(&logs_dir, 7);
        assert!(appender.is_ok());
        assert!(logs_dir.is_dir());

        let _ = fs::remove_dir_all(&logs_dir);
    }
}
