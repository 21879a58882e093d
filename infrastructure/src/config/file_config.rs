//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! Every field has a default, so a partial (or absent) file is fine.

use parley_application::config::ProviderParams;
use parley_domain::DEFAULT_GREETING;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Chat behavior settings
    pub chat: FileChatConfig,
    /// Completion backend settings
    pub provider: FileProviderConfig,
    /// REPL settings
    pub repl: FileReplConfig,
    /// Output settings
    pub output: FileOutputConfig,
}

/// Chat behavior settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileChatConfig {
    /// Assistant greeting seeded into every fresh transcript.
    pub greeting: String,
}

impl Default for FileChatConfig {
    fn default() -> Self {
        Self {
            greeting: DEFAULT_GREETING.to_string(),
        }
    }
}

/// Completion backend settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileProviderConfig {
    /// Artificial reply latency in milliseconds.
    pub reply_delay_ms: u64,
    /// Bound on a single completion call, in seconds.
    pub timeout_secs: u64,
}

impl Default for FileProviderConfig {
    fn default() -> Self {
        Self {
            reply_delay_ms: 1000,
            timeout_secs: 30,
        }
    }
}

impl FileProviderConfig {
    /// Convert into the application-layer parameter object.
    pub fn params(&self) -> ProviderParams {
        ProviderParams::default()
            .with_reply_delay(Duration::from_millis(self.reply_delay_ms))
            .with_request_timeout(Duration::from_secs(self.timeout_secs))
    }
}

/// REPL settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileReplConfig {
    /// Path to the input history file (defaults to the platform data dir).
    pub history_file: Option<String>,
}

/// Output settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileOutputConfig {
    /// Enable colored terminal output.
    pub color: bool,
}

impl Default for FileOutputConfig {
    fn default() -> Self {
        Self { color: true }
    }
}
