use serde_json::Value;
use std::fmt;

pub const ERROR_HIGHLIGHT_ENV: &str = "PROXY_ERROR_HIGHLIGHT";

#[derive(Debug, thiserror::Error)]
pub enum NormalizeError {
    #[error("invalid input: expected a JSON object at the top level, found {found}")]
    InvalidInput { found: &'static str },

    #[error("failed to parse chunk JSON: {0}")]
    Json(#[from] serde_json::Error),
}

impl NormalizeError {
    pub fn invalid_input(value: &Value) -> Self {
        let found = match value {
            Value::Null => "null",
            Value::Bool(_) => "boolean",
            Value::Number(_) => "number",
            Value::String(_) => "string",
            Value::Array(_) => "array",
            Value::Object(_) => "object",
        };
        NormalizeError::InvalidInput { found }
    }
}

/// Error message for terminal output, optionally highlighted in bold red so it
/// stands out in long logs.
#[derive(Debug, Clone)]
pub struct ProxyError {
    message: String,
}

impl ProxyError {
    pub fn with_highlight(error: impl fmt::Display, highlight: bool) -> Self {
        let message = if highlight {
            format!("\x1b[1;31m{}\x1b[0m", error)
        } else {
            error.to_string()
        };
        ProxyError { message }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for ProxyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for ProxyError {}

pub fn highlight_from_env() -> bool {
    parse_highlight(std::env::var(ERROR_HIGHLIGHT_ENV).ok().as_deref())
}

/// Unset means highlighted; only `false`, `0` and `no` turn it off.
pub fn parse_highlight(value: Option<&str>) -> bool {
    let value = value.unwrap_or("True").to_lowercase();
    !matches!(value.as_str(), "false" | "0" | "no")
}
