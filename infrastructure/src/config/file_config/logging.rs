//! Logging configuration from TOML (`[logging]` section)

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileLoggingConfig {
    /// JSONL file receiving one line per debate event
    pub event_log: Option<PathBuf>,
    /// Directory for the daily-rotated tracing log
    pub log_dir: Option<PathBuf>,
}
