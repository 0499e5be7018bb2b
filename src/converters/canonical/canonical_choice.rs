use crate::converters::canonical::CanonicalDelta;
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CanonicalChoice {
    #[serde(default)]
    pub index: Value,
    #[serde(default)]
    pub delta: CanonicalDelta,
    #[serde(default)]
    pub finish_reason: Value,
    #[serde(default)]
    pub logprobs: Value,
}

impl CanonicalChoice {
    pub fn finish_reason(&self) -> Option<&str> {
        self.finish_reason.as_str()
    }
}
