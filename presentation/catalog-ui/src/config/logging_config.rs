use std::env;
use std::path::{Path, PathBuf};

use tracing_appender::non_blocking::WorkerGuard;

/// Log file configuration
///
/// The terminal UI owns stdout, so logs always go to a daily rolling file.
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub log_dir: PathBuf,
    pub filter: String,
}

impl LoggingConfig {
    const FILE_PREFIX: &'static str = "catalog-ui.log";

    /// Load logging configuration from environment variables
    ///
    /// Environment variables:
    /// - CATALOG_LOG_DIR: directory for log files (default: "<data dir>/logs")
    /// - RUST_LOG: tracing filter directive (default: "info")
    pub fn from_env(data_dir: &Path) -> Self {
        let log_dir = env::var("CATALOG_LOG_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| data_dir.join("logs"));
        let filter = env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());

        Self { log_dir, filter }
    }

    /// Installs the global subscriber. Keep the guard alive until exit or
    /// buffered lines are lost.
    pub fn init_tracing(&self) -> anyhow::Result<WorkerGuard> {
        std::fs::create_dir_all(&self.log_dir)?;

        let file_appender = tracing_appender::rolling::daily(&self.log_dir, Self::FILE_PREFIX);
        let (writer, guard) = tracing_appender::non_blocking(file_appender);

        let env_filter = tracing_subscriber::EnvFilter::try_new(&self.filter)
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_writer(writer)
            .with_ansi(false)
            .try_init()
            .map_err(|e| anyhow::anyhow!("failed to install tracing subscriber: {}", e))?;

        Ok(guard)
    }
}
