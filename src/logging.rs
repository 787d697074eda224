//! Tracing subscriber setup for hosts embedding the analyzer

use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, fmt};

use crate::config::{LogConfig, LogFormat};

#[derive(Debug, thiserror::Error)]
pub enum LoggingError {
    #[error("Invalid log filter: {0}")]
    Filter(#[from] tracing_subscriber::filter::ParseError),

    #[error("Failed to create log directory {path:?}: {source}")]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to install subscriber: {0}")]
    Init(#[from] tracing_subscriber::util::TryInitError),
}

/// Install the global subscriber described by `config`
///
/// `RUST_LOG` takes precedence over the configured level. When logging to a
/// file, the returned guard must be kept alive to flush buffered records.
pub fn init(config: &LogConfig) -> Result<Option<WorkerGuard>, LoggingError> {
    let filter = env_filter(config)?;

    let (writer, guard) = match &config.file {
        Some(path) => {
            let (writer, guard) = file_writer(path)?;
            (BoxMakeWriter::new(writer), Some(guard))
        }
        None => (BoxMakeWriter::new(std::io::stderr), None),
    };

    let layer = fmt::layer()
        .with_writer(writer)
        .with_ansi(config.file.is_none());

    match config.format {
        LogFormat::Text => tracing_subscriber::registry()
            .with(filter)
            .with(layer)
            .try_init()?,
        LogFormat::Json => tracing_subscriber::registry()
            .with(filter)
            .with(layer.json())
            .try_init()?,
    }

    Ok(guard)
}

/// Build the filter from `RUST_LOG`, falling back to the configured level
pub fn env_filter(config: &LogConfig) -> Result<EnvFilter, LoggingError> {
    env_filter_with(std::env::var(EnvFilter::DEFAULT_ENV).ok(), config)
}

fn env_filter_with(
    rust_log: Option<String>,
    config: &LogConfig,
) -> Result<EnvFilter, LoggingError> {
    let directives = rust_log
        .filter(|s| !s.trim().is_empty())
        .unwrap_or_else(|| config.level.clone());

    Ok(EnvFilter::try_new(directives)?)
}

fn file_writer(
    path: &Path,
) -> Result<(tracing_appender::non_blocking::NonBlocking, WorkerGuard), LoggingError> {
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(Path::new("."));
    std::fs::create_dir_all(dir).map_err(|source| LoggingError::CreateDir {
        path: dir.to_path_buf(),
        source,
    })?;

    let file_name = path
        .file_name()
        .unwrap_or(OsStr::new("lang-analyzer.log"));
    let appender = tracing_appender::rolling::never(dir, file_name);

    Ok(tracing_appender::non_blocking(appender))
}
