use crate::converters::openai::openai_stream_choice::OpenAIStreamChoice;
use crate::converters::source::ChunkFields;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};
use std::borrow::Cow;

/// Typed chunk record, the object-shaped counterpart of a raw JSON chunk.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OpenAIStreamChunk {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub object: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system_fingerprint: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub choices: Option<Vec<OpenAIStreamChoice>>,
    /// A present `"usage": null` stays `Some(Value::Null)`.
    #[serde(
        default,
        deserialize_with = "crate::converters::helpers::deserialize_present",
        skip_serializing_if = "Option::is_none"
    )]
    pub usage: Option<Value>,
    /// `provider_specific_fields`, `citations` and anything else
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ChunkFields for OpenAIStreamChunk {
    fn field(&self, key: &str) -> Option<Cow<'_, Value>> {
        let value = match key {
            "id" => self.id.as_ref().map(|id| json!(id)),
            "object" => self.object.as_ref().map(|object| json!(object)),
            "created" => self.created.map(|created| json!(created)),
            "model" => self.model.as_ref().map(|model| json!(model)),
            "system_fingerprint" => self.system_fingerprint.as_ref().map(|fp| json!(fp)),
            "choices" => self
                .choices
                .as_ref()
                .map(|choices| serde_json::to_value(choices).unwrap_or_default()),
            "usage" => self.usage.clone(),
            other => return self.extra.get(other).map(Cow::Borrowed),
        };
        value.map(Cow::Owned)
    }
}
