use crate::converters::canonical::CanonicalChoice;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// 统一的流式响应块。`choices` 始终是数组；`usage` 仅在原始块带有该键时输出。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CanonicalChunk {
    #[serde(default)]
    pub id: Value,
    #[serde(default)]
    pub created: Value,
    #[serde(default)]
    pub model: Value,
    #[serde(default)]
    pub object: Value,
    #[serde(default)]
    pub system_fingerprint: Value,
    #[serde(default)]
    pub provider_specific_fields: Value,
    #[serde(default)]
    pub citations: Value,
    #[serde(default)]
    pub choices: Vec<CanonicalChoice>,
    // A present `"usage": null` stays `Some(Value::Null)`.
    #[serde(
        default,
        deserialize_with = "crate::converters::helpers::deserialize_present",
        skip_serializing_if = "Option::is_none"
    )]
    pub usage: Option<Value>,
}

impl CanonicalChunk {
    pub fn to_value(&self) -> Value {
        serde_json::to_value(self).unwrap_or(Value::Null)
    }
}
