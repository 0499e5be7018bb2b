use crate::converters::openai::openai_stream_delta::OpenAIStreamDelta;
use crate::converters::source::ChunkFields;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::borrow::Cow;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OpenAIStreamChoice {
    #[serde(
        default,
        deserialize_with = "crate::converters::helpers::deserialize_present",
        skip_serializing_if = "Option::is_none"
    )]
    pub index: Option<Value>,
    #[serde(
        default,
        deserialize_with = "crate::converters::helpers::deserialize_present",
        skip_serializing_if = "Option::is_none"
    )]
    pub delta: Option<Option<OpenAIStreamDelta>>,
    #[serde(
        default,
        deserialize_with = "crate::converters::helpers::deserialize_present",
        skip_serializing_if = "Option::is_none"
    )]
    pub finish_reason: Option<Value>,
    #[serde(
        default,
        deserialize_with = "crate::converters::helpers::deserialize_present",
        skip_serializing_if = "Option::is_none"
    )]
    pub logprobs: Option<Value>,
    #[serde(
        default,
        deserialize_with = "crate::converters::helpers::deserialize_present",
        skip_serializing_if = "Option::is_none"
    )]
    pub text: Option<Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ChunkFields for OpenAIStreamChoice {
    fn field(&self, key: &str) -> Option<Cow<'_, Value>> {
        let value = match key {
            "index" => self.index.as_ref(),
            "finish_reason" => self.finish_reason.as_ref(),
            "logprobs" => self.logprobs.as_ref(),
            "text" => self.text.as_ref(),
            "delta" => {
                return self
                    .delta
                    .as_ref()
                    .map(|delta| Cow::Owned(serde_json::to_value(delta).unwrap_or_default()));
            }
            other => self.extra.get(other),
        };
        value.map(Cow::Borrowed)
    }
}
