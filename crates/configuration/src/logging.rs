use crate::error::ConfigError;
use crate::settings::LoggingSettings;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// Installs the global tracing subscriber.
///
/// `RUST_LOG` wins over the configured level. When a log directory is set the
/// output goes to a daily-rolling file instead of stdout, and the returned
/// guard must be held for the lifetime of the process so buffered lines are
/// flushed.
pub fn init_tracing(settings: &LoggingSettings) -> Result<Option<WorkerGuard>, ConfigError> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&settings.level));

    match &settings.directory {
        Some(directory) => {
            let appender = tracing_appender::rolling::daily(directory, "pulse.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let subscriber = FmtSubscriber::builder()
                .with_env_filter(filter)
                .with_writer(writer)
                .with_ansi(false)
                .finish();
            tracing::subscriber::set_global_default(subscriber)?;
            Ok(Some(guard))
        }
        None => {
            let subscriber = FmtSubscriber::builder().with_env_filter(filter).finish();
            tracing::subscriber::set_global_default(subscriber)?;
            Ok(None)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Installs the process-wide subscriber, so this is the only test here that
    // calls `init_tracing`.
    #[test]
    fn test_log_directory_receives_output() {
        let dir = tempfile::tempdir().unwrap();
        let settings = LoggingSettings {
            level: "info".to_string(),
            directory: Some(dir.path().to_string_lossy().into_owned()),
        };

        let guard = init_tracing(&settings).unwrap();
        assert!(guard.is_some());
        tracing::info!("rolling file check");
        drop(guard);

        let contents: String = std::fs::read_dir(dir.path())
            .unwrap()
            .map(|entry| std::fs::read_to_string(entry.unwrap().path()).unwrap())
            .collect();
        assert!(contents.contains("rolling file check"));
    }
}
