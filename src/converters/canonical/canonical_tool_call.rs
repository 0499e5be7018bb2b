use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CanonicalFunction {
    pub name: Option<String>,
    pub arguments: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// 统一后的工具调用，来源可以是 `tool_calls`、`tool_use` 或 `function_call`。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CanonicalToolCall {
    pub index: i64,
    pub id: Option<String>,
    pub r#type: String,
    pub function: Option<CanonicalFunction>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl CanonicalToolCall {
    pub fn name(&self) -> Option<&str> {
        self.function.as_ref().and_then(|f| f.name.as_deref())
    }

    pub fn arguments(&self) -> Option<&str> {
        self.function.as_ref().and_then(|f| f.arguments.as_deref())
    }
}
