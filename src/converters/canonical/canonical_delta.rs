use crate::converters::canonical::CanonicalToolCall;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

/// Final state of the `tool_calls` key on a delta.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum ToolCalls {
    /// The raw delta never had a `tool_calls` key and nothing contributed a call.
    #[default]
    Absent,
    /// `tool_calls` was explicitly null and nothing else contributed a call.
    Null,
    List(Vec<CanonicalToolCall>),
}

impl ToolCalls {
    pub fn is_absent(&self) -> bool {
        matches!(self, ToolCalls::Absent)
    }

    pub fn as_slice(&self) -> &[CanonicalToolCall] {
        match self {
            ToolCalls::List(calls) => calls,
            _ => &[],
        }
    }
}

impl Serialize for ToolCalls {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            ToolCalls::Absent | ToolCalls::Null => serializer.serialize_none(),
            ToolCalls::List(calls) => calls.serialize(serializer),
        }
    }
}

impl<'de> Deserialize<'de> for ToolCalls {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let calls = Option::<Vec<CanonicalToolCall>>::deserialize(deserializer)?;
        Ok(match calls {
            Some(calls) => ToolCalls::List(calls),
            None => ToolCalls::Null,
        })
    }
}

/// 规范化后的 delta：保留原始键（按原顺序），`tool_calls` 始终在最后输出。
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CanonicalDelta {
    #[serde(flatten)]
    pub fields: Map<String, Value>,
    #[serde(default, skip_serializing_if = "ToolCalls::is_absent")]
    pub tool_calls: ToolCalls,
}

impl CanonicalDelta {
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    pub fn content(&self) -> Option<&str> {
        self.fields.get("content").and_then(Value::as_str)
    }

    pub fn tool_calls(&self) -> &[CanonicalToolCall] {
        self.tool_calls.as_slice()
    }
}
