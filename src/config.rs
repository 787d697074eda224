use serde::Deserialize;
use std::path::PathBuf;

/// Default log level when `RUST_LOG` is not set
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Top-level configuration structure
#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct AnalyzerConfig {
    pub analyzer: AnalyzerOptions,
    pub log: LogConfig,
}

impl AnalyzerConfig {
    /// Parse configuration from a JSON document; missing fields use defaults
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid configuration: {0}")]
    Invalid(#[from] serde_json::Error),
}

/// Options controlling how parser output is normalized
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct AnalyzerOptions {
    /// Keep libraries the parser flagged as development-only
    pub include_dev_deps: bool,
    /// Attach the SHA-256 digest of the file to libraries found by package analysis
    pub file_checksum: bool,
}

impl Default for AnalyzerOptions {
    fn default() -> Self {
        Self {
            include_dev_deps: true,
            file_checksum: false,
        }
    }
}

/// Output format of log records
#[derive(Debug, Clone, Copy, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct LogConfig {
    /// Filter directive used when `RUST_LOG` is not set (e.g., "debug", "lang_analyzer=trace")
    pub level: String,
    pub format: LogFormat,
    /// Write logs to this file instead of stderr
    pub file: Option<PathBuf>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: DEFAULT_LOG_LEVEL.to_string(),
            format: LogFormat::Text,
            file: None,
        }
    }
}

/// Returns the path to the data directory for lang-analyzer.
/// Uses $XDG_DATA_HOME/lang-analyzer if XDG_DATA_HOME is set,
/// otherwise falls back to ~/.local/share/lang-analyzer,
/// or ./lang-analyzer if neither is available.
pub fn data_dir() -> PathBuf {
    data_dir_with_env(std::env::var("XDG_DATA_HOME").ok(), dirs::home_dir())
}

/// Returns the default path of the log file.
pub fn log_path() -> PathBuf {
    data_dir().join("lang-analyzer.log")
}

fn data_dir_with_env(xdg_data_home: Option<String>, home_dir: Option<PathBuf>) -> PathBuf {
    let data_dir = xdg_data_home
        .map(PathBuf::from)
        .or_else(|| home_dir.map(|home| home.join(".local/share")))
        .unwrap_or_else(|| PathBuf::from("."));

    data_dir.join("lang-analyzer")
}
