use crate::converters::canonical::{CanonicalFunction, CanonicalToolCall};
use crate::converters::helpers::{
    as_object_or_empty, coerce_index, is_truthy, normalize_arguments, passthrough_fields,
    string_or_none, value_to_string,
};
use serde_json::{Map, Value, json};

const TOOL_CALL_KEYS: [&str; 4] = ["index", "id", "type", "function"];
const FUNCTION_KEYS: [&str; 2] = ["name", "arguments"];

/// 工具调用的三种来源，最终都经过 [`normalize_tool_call`] 统一处理。
#[derive(Debug, Clone)]
pub enum ToolCallSource<'a> {
    /// OpenAI 风格 `tool_calls` 中的一项
    Native(&'a Value),
    /// Anthropic 风格 `tool_use`：`{id, name, input, index?, type?}`
    AnthropicUse(&'a Map<String, Value>),
    /// 旧版 `function_call`，已经规范化过
    LegacyFunction(&'a CanonicalFunction),
}

impl ToolCallSource<'_> {
    pub fn normalize(&self) -> CanonicalToolCall {
        match self {
            ToolCallSource::Native(value) => normalize_tool_call(&as_object_or_empty(Some(value))),
            ToolCallSource::AnthropicUse(tool_use) => {
                let synthetic = json!({
                    "index": tool_use.get("index").cloned().unwrap_or(json!(0)),
                    "id": tool_use.get("id").cloned().unwrap_or(Value::Null),
                    "type": tool_use.get("type").cloned().unwrap_or(json!("function")),
                    "function": {
                        "name": tool_use.get("name").cloned().unwrap_or(Value::Null),
                        "arguments": tool_use.get("input").cloned().unwrap_or(Value::Null),
                    },
                });
                normalize_tool_call(&as_object_or_empty(Some(&synthetic)))
            }
            ToolCallSource::LegacyFunction(function) => {
                let synthetic = json!({
                    "index": 0,
                    "id": null,
                    "type": "function",
                    "function": function,
                });
                normalize_tool_call(&as_object_or_empty(Some(&synthetic)))
            }
        }
    }
}

/// 将 `tool_calls` 的值展开为工具调用列表；单个值视为只有一项的列表。
pub fn native_tool_calls(value: &Value) -> Vec<CanonicalToolCall> {
    match value {
        Value::Null => Vec::new(),
        Value::Array(items) => items
            .iter()
            .map(|item| ToolCallSource::Native(item).normalize())
            .collect(),
        single => vec![ToolCallSource::Native(single).normalize()],
    }
}

/// `tool_use` 为空或不是对象时不产生工具调用。
pub fn anthropic_tool_use(value: &Value) -> Option<CanonicalToolCall> {
    match value {
        Value::Object(tool_use) if !tool_use.is_empty() => {
            Some(ToolCallSource::AnthropicUse(tool_use).normalize())
        }
        _ => None,
    }
}

/// `function_call` 为空或不是对象时返回 None。
pub fn legacy_function_call(value: &Value) -> Option<CanonicalFunction> {
    match value {
        Value::Object(function_call) if is_truthy(value) => Some(normalize_function(function_call)),
        _ => None,
    }
}

pub fn normalize_function(function: &Map<String, Value>) -> CanonicalFunction {
    CanonicalFunction {
        name: string_or_none(function.get("name")),
        arguments: normalize_arguments(function.get("arguments")),
        extra: passthrough_fields(function, &FUNCTION_KEYS),
    }
}

/// 所有来源共用的工具调用规范化逻辑。
pub fn normalize_tool_call(tool_call: &Map<String, Value>) -> CanonicalToolCall {
    let r#type = tool_call
        .get("type")
        .and_then(Value::as_str)
        .filter(|t| !t.is_empty())
        .unwrap_or("function")
        .to_string();

    let id = match tool_call.get("id") {
        None | Some(Value::Null) => None,
        Some(id) => Some(value_to_string(id)),
    };

    CanonicalToolCall {
        index: coerce_index(tool_call.get("index")),
        id,
        r#type,
        function: resolve_function(tool_call),
        extra: passthrough_fields(tool_call, &TOOL_CALL_KEYS),
    }
}

fn resolve_function(tool_call: &Map<String, Value>) -> Option<CanonicalFunction> {
    match tool_call.get("function") {
        Some(Value::Object(function)) => Some(normalize_function(function)),
        Some(Value::Null) | None => {
            // 扁平结构：name/arguments 直接放在工具调用顶层
            if FUNCTION_KEYS.iter().any(|key| tool_call.contains_key(*key)) {
                Some(CanonicalFunction {
                    name: string_or_none(tool_call.get("name")),
                    arguments: normalize_arguments(tool_call.get("arguments")),
                    extra: Map::new(),
                })
            } else {
                None
            }
        }
        Some(_) => None,
    }
}
