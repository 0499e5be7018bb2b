use crate::converters::openai::openai_stream_tool_call_function::OpenAIStreamToolCallFunction;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

// `index`、`id` 可能是字符串或数字，保留原始值交给规范化逻辑处理
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OpenAIStreamToolCall {
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
    pub id: Option<Value>,
    #[serde(
        default,
        deserialize_with = "crate::converters::helpers::deserialize_present",
        skip_serializing_if = "Option::is_none"
    )]
    pub r#type: Option<Value>,
    #[serde(
        default,
        deserialize_with = "crate::converters::helpers::deserialize_present",
        skip_serializing_if = "Option::is_none"
    )]
    pub function: Option<Option<OpenAIStreamToolCallFunction>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
