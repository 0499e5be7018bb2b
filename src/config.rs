use crate::error;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const WRITE_TRACES_ENV: &str = "PROXY_WRITE_TRACES";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputMode {
    /// One canonical chunk per input chunk
    #[default]
    Canonical,
    /// Flat generic chunks, one per choice and tool call
    Generic,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TraceSettings {
    pub enabled: bool,
    pub dir: String,
}

impl Default for TraceSettings {
    fn default() -> Self {
        TraceSettings {
            enabled: false,
            dir: ".traces".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub output: OutputMode,
    pub error_highlight: Option<bool>,
    pub traces: TraceSettings,
    pub log_level: Option<String>,
    pub log_file: Option<String>,
}

impl Config {
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    pub fn from_yaml(content: &str) -> Result<Self, ConfigError> {
        if content.trim().is_empty() {
            return Ok(Config::default());
        }
        let config: Config = serde_yaml::from_str(content)?;
        Ok(config)
    }

    /// Applies overrides from the process environment.
    pub fn apply_env(self) -> Self {
        self.apply_env_with(|key| std::env::var(key).ok())
    }

    pub fn apply_env_with(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        let default = if self.traces.enabled { "true" } else { "false" };
        self.traces.enabled = env_var_to_bool(lookup(WRITE_TRACES_ENV).as_deref(), default);
        if self.error_highlight.is_none() {
            if let Some(value) = lookup(error::ERROR_HIGHLIGHT_ENV) {
                self.error_highlight = Some(error::parse_highlight(Some(&value)));
            }
        }
        self
    }

    pub fn error_highlight_enabled(&self) -> bool {
        self.error_highlight.unwrap_or_else(error::highlight_from_env)
    }
}

/// `true`, `1`, `on`, `yes` and `y` count as true; `default` is used when unset.
pub fn env_var_to_bool(value: Option<&str>, default: &str) -> bool {
    matches!(
        value.unwrap_or(default).to_lowercase().as_str(),
        "true" | "1" | "on" | "yes" | "y"
    )
}
