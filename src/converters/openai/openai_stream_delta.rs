use crate::converters::openai::openai_stream_tool_call::OpenAIStreamToolCall;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Typed delta as emitted by OpenAI-compatible clients. Anything the struct
/// does not name (`tool_use`, `function_call`, `audio`, ...) lands in `extra`.
///
/// Named fields are `Option<Option<_>>`: the outer `None` means the key was
/// absent, `Some(None)` means it was explicitly null.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OpenAIStreamDelta {
    #[serde(
        default,
        deserialize_with = "crate::converters::helpers::deserialize_present",
        skip_serializing_if = "Option::is_none"
    )]
    pub role: Option<Option<String>>,
    #[serde(
        default,
        deserialize_with = "crate::converters::helpers::deserialize_present",
        skip_serializing_if = "Option::is_none"
    )]
    pub content: Option<Option<String>>,
    #[serde(
        default,
        deserialize_with = "crate::converters::helpers::deserialize_present",
        skip_serializing_if = "Option::is_none"
    )]
    pub reasoning_content: Option<Option<String>>,
    #[serde(
        default,
        deserialize_with = "crate::converters::helpers::deserialize_present",
        skip_serializing_if = "Option::is_none"
    )]
    pub tool_calls: Option<Option<Vec<OpenAIStreamToolCall>>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
