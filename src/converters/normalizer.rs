use crate::converters::canonical::{
    CanonicalChoice, CanonicalChunk, CanonicalDelta, GenericChunks, GenericStreamingChunk,
    ToolCalls,
};
use crate::converters::helpers::{is_truthy, value_to_string};
use crate::converters::source::ChunkFields;
use crate::converters::tool_call_source::{
    ToolCallSource, anthropic_tool_use, legacy_function_call, native_tool_calls,
};
use crate::error::NormalizeError;
use serde_json::{Map, Value};
use std::borrow::Cow;
use tracing::debug;

const PASSTHROUGH_FIELDS: [&str; 7] = [
    "id",
    "created",
    "model",
    "object",
    "system_fingerprint",
    "provider_specific_fields",
    "citations",
];

/// 将任意供应商的流式响应块转换为统一格式。不会修改输入。
pub fn normalize<S: ChunkFields + ?Sized>(raw: &S) -> CanonicalChunk {
    let [id, created, model, object, system_fingerprint, provider_specific_fields, citations] =
        PASSTHROUGH_FIELDS.map(|key| raw.field_or_null(key));

    let choices = match raw.field("choices") {
        Some(choices) if is_truthy(&choices) => match &*choices {
            Value::Array(items) => items.iter().map(|item| normalize_choice(item)).collect(),
            single => vec![normalize_choice(single)],
        },
        _ => Vec::new(),
    };

    // 区分"没有 usage"和"usage 为 null"
    let usage = raw.field("usage").map(Cow::into_owned);

    CanonicalChunk {
        id,
        created,
        model,
        object,
        system_fingerprint,
        provider_specific_fields,
        citations,
        choices,
        usage,
    }
}

/// 顶层不是 JSON 对象时返回 [`NormalizeError::InvalidInput`]。
pub fn normalize_value(raw: &Value) -> Result<CanonicalChunk, NormalizeError> {
    match raw {
        Value::Object(obj) => Ok(normalize(obj)),
        other => Err(NormalizeError::invalid_input(other)),
    }
}

pub fn normalize_str(data: &str) -> Result<CanonicalChunk, NormalizeError> {
    let raw: Value = serde_json::from_str(data)?;
    normalize_value(&raw)
}

pub fn normalize_choice<S: ChunkFields + ?Sized>(choice: &S) -> CanonicalChoice {
    let mut delta = match choice.field("delta").as_deref() {
        Some(Value::Object(delta)) => normalize_delta(delta),
        _ => CanonicalDelta::default(),
    };

    // 有些供应商把文本放在 choice.text 而不是 delta.content
    let has_content = delta.get("content").is_some_and(is_truthy);
    if !has_content {
        if let Some(text) = choice.field("text").filter(|text| is_truthy(text)) {
            delta
                .fields
                .insert("content".to_string(), Value::String(value_to_string(&text)));
        }
    }

    CanonicalChoice {
        index: choice.field_or_null("index"),
        delta,
        finish_reason: choice.field_or_null("finish_reason"),
        logprobs: choice.field_or_null("logprobs"),
    }
}

/// 合并 `tool_calls`、`tool_use`、`function_call` 为同一个 `tool_calls` 列表，
/// 顺序与原始键的遍历顺序一致；其余键原样保留。
pub fn normalize_delta(delta: &Map<String, Value>) -> CanonicalDelta {
    let mut fields = Map::new();
    let mut collected = Vec::new();
    let mut tool_calls_was_null = false;

    for (key, value) in delta {
        match key.as_str() {
            "tool_calls" => {
                if value.is_null() {
                    tool_calls_was_null = true;
                } else {
                    collected.extend(native_tool_calls(value));
                }
            }
            "tool_use" => {
                if let Some(call) = anthropic_tool_use(value) {
                    fields.insert(key.clone(), serde_json::to_value(&call).unwrap_or_default());
                    collected.push(call);
                } else {
                    debug!("dropping empty tool_use: {}", value);
                }
            }
            "function_call" => {
                if let Some(function) = legacy_function_call(value) {
                    collected.push(ToolCallSource::LegacyFunction(&function).normalize());
                    fields.insert(key.clone(), serde_json::to_value(&function).unwrap_or_default());
                } else {
                    debug!("dropping empty function_call: {}", value);
                }
            }
            _ => {
                fields.insert(key.clone(), value.clone());
            }
        }
    }

    let tool_calls = if !collected.is_empty() {
        ToolCalls::List(collected)
    } else if tool_calls_was_null {
        ToolCalls::Null
    } else if delta.contains_key("tool_calls") {
        ToolCalls::List(Vec::new())
    } else {
        ToolCalls::Absent
    };

    CanonicalDelta { fields, tool_calls }
}

/// 转换为 GenericStreamingChunk 序列，每个 choice、每个工具调用各产生一个块。
pub fn to_generic_chunks<S: ChunkFields + ?Sized>(raw: &S) -> GenericChunks {
    GenericStreamingChunk::from_canonical(normalize(raw))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn delta_of(raw: Value) -> Value {
        let chunk = normalize_value(&json!({"choices": [{"index": 0, "delta": raw}]})).unwrap();
        serde_json::to_value(&chunk).unwrap()["choices"][0]["delta"].clone()
    }

    #[test]
    fn test_normalize_openai_chunk() {
        let raw = json!({
            "id": "chatcmpl-123",
            "object": "chat.completion.chunk",
            "created": 1677652288,
            "model": "gpt-4",
            "system_fingerprint": "fp_44709d6fcb",
            "choices": [
                {
                    "index": 0,
                    "delta": {
                        "role": "assistant",
                        "content": "Hello"
                    },
                    "logprobs": null,
                    "finish_reason": null
                }
            ]
        });

        let chunk = normalize_value(&raw).unwrap();
        let value = serde_json::to_value(&chunk).unwrap();

        assert_eq!(value["id"], "chatcmpl-123");
        assert_eq!(value["object"], "chat.completion.chunk");
        assert_eq!(value["created"], 1677652288);
        assert_eq!(value["model"], "gpt-4");
        assert_eq!(value["system_fingerprint"], "fp_44709d6fcb");
        assert_eq!(value["provider_specific_fields"], Value::Null);
        assert_eq!(value["citations"], Value::Null);
        assert_eq!(value["choices"][0]["delta"], json!({"role": "assistant", "content": "Hello"}));
        assert!(value.get("usage").is_none());
    }

    #[test]
    fn test_passthrough_fields_identity() {
        let raw = json!({
            "id": 7,
            "created": "yesterday",
            "model": {"name": "custom"},
            "object": null,
            "system_fingerprint": ["fp"],
            "citations": ["https://example.com"],
            "provider_specific_fields": {"x": 1}
        });

        let chunk = normalize_value(&raw).unwrap();
        for key in PASSTHROUGH_FIELDS {
            assert_eq!(chunk.to_value()[key], raw[key], "field {}", key);
        }
    }

    #[test]
    fn test_usage_presence() {
        let without = normalize_value(&json!({"id": "a"})).unwrap();
        assert_eq!(without.usage, None);
        assert!(without.to_value().get("usage").is_none());

        let null_usage = normalize_value(&json!({"id": "a", "usage": null})).unwrap();
        assert_eq!(null_usage.usage, Some(Value::Null));
        assert_eq!(null_usage.to_value().get("usage"), Some(&Value::Null));

        let usage = json!({"prompt_tokens": 10, "completion_tokens": 5, "total_tokens": 15});
        let with = normalize_value(&json!({"usage": usage.clone()})).unwrap();
        assert_eq!(with.usage, Some(usage));
    }

    #[test]
    fn test_choices_coercion() {
        let single = normalize_value(&json!({"choices": {"index": 0}})).unwrap();
        let list = normalize_value(&json!({"choices": [{"index": 0}]})).unwrap();
        assert_eq!(single.choices, list.choices);
        assert_eq!(single.choices.len(), 1);

        assert!(normalize_value(&json!({})).unwrap().choices.is_empty());
        assert!(normalize_value(&json!({"choices": null})).unwrap().choices.is_empty());
        assert!(normalize_value(&json!({"choices": []})).unwrap().choices.is_empty());

        // choices 始终序列化为数组
        assert_eq!(normalize_value(&json!({})).unwrap().to_value()["choices"], json!([]));
    }

    #[test]
    fn test_malformed_choice_becomes_empty() {
        let chunk = normalize_value(&json!({"choices": ["oops", 3]})).unwrap();
        assert_eq!(chunk.choices.len(), 2);
        for choice in &chunk.choices {
            assert_eq!(choice.index, Value::Null);
            assert_eq!(choice.finish_reason, Value::Null);
            assert_eq!(choice.delta, CanonicalDelta::default());
        }

        let chunk = normalize_value(&json!({"choices": [{"delta": "not a mapping"}]})).unwrap();
        assert_eq!(chunk.to_value()["choices"][0]["delta"], json!({}));
    }

    #[test]
    fn test_choice_fields_copied() {
        let chunk = normalize_value(&json!({
            "choices": [{
                "index": 2,
                "finish_reason": "tool_calls",
                "logprobs": {"content": []},
                "delta": {}
            }]
        }))
        .unwrap();

        let choice = &chunk.choices[0];
        assert_eq!(choice.index, json!(2));
        assert_eq!(choice.finish_reason(), Some("tool_calls"));
        assert_eq!(choice.logprobs, json!({"content": []}));
    }

    #[test]
    fn test_text_fallback() {
        let chunk = normalize_value(&json!({"choices": [{"text": "hello", "delta": {}}]})).unwrap();
        assert_eq!(chunk.choices[0].delta.content(), Some("hello"));

        let chunk = normalize_value(&json!({
            "choices": [{"text": "hello", "delta": {"content": "existing"}}]
        }))
        .unwrap();
        assert_eq!(chunk.choices[0].delta.content(), Some("existing"));

        let chunk = normalize_value(&json!({
            "choices": [{"text": "hello", "delta": {"content": ""}}]
        }))
        .unwrap();
        assert_eq!(chunk.choices[0].delta.content(), Some("hello"));

        let chunk = normalize_value(&json!({"choices": [{"text": 42}]})).unwrap();
        assert_eq!(chunk.choices[0].delta.content(), Some("42"));

        let chunk = normalize_value(&json!({"choices": [{"text": "", "delta": {}}]})).unwrap();
        assert_eq!(chunk.choices[0].delta.get("content"), None);
    }

    #[test]
    fn test_text_fallback_key_order() {
        let chunk = normalize_value(&json!({
            "choices": [{
                "text": "hi",
                "delta": {
                    "role": "assistant",
                    "tool_calls": [{"index": 0, "function": {"name": "f", "arguments": "{}"}}]
                }
            }]
        }))
        .unwrap();
        let text = serde_json::to_string(&chunk.choices[0].delta).unwrap();
        assert!(text.starts_with("{\"role\":\"assistant\",\"content\":\"hi\",\"tool_calls\":["));

        // 已存在的空 content 原位替换
        let chunk = normalize_value(&json!({
            "choices": [{"text": "hi", "delta": {"content": "", "role": "assistant"}}]
        }))
        .unwrap();
        let text = serde_json::to_string(&chunk.choices[0].delta).unwrap();
        assert_eq!(text, "{\"content\":\"hi\",\"role\":\"assistant\"}");
    }

    #[test]
    fn test_tool_calls_explicit_null_absent_and_empty() {
        assert_eq!(delta_of(json!({"tool_calls": null})), json!({"tool_calls": null}));
        assert_eq!(delta_of(json!({})), json!({}));
        assert_eq!(delta_of(json!({"tool_calls": []})), json!({"tool_calls": []}));
    }

    #[test]
    fn test_tool_use_and_function_call_union() {
        let delta = delta_of(json!({
            "tool_use": {"id": "a", "name": "f", "input": "{}"},
            "function_call": {"name": "g", "arguments": "{}"}
        }));

        let tool_calls = delta["tool_calls"].as_array().unwrap();
        assert_eq!(tool_calls.len(), 2);
        assert_eq!(tool_calls[0]["function"]["name"], "f");
        assert_eq!(tool_calls[0]["id"], "a");
        assert_eq!(tool_calls[1]["function"]["name"], "g");
        assert_eq!(tool_calls[1]["id"], Value::Null);

        // 两种原始形状也保留在原来的键下
        assert_eq!(delta["tool_use"], tool_calls[0]);
        assert_eq!(delta["function_call"], json!({"name": "g", "arguments": "{}"}));
    }

    #[test]
    fn test_tool_call_order_follows_key_order() {
        let delta = delta_of(json!({
            "function_call": {"name": "legacy", "arguments": "{}"},
            "tool_calls": [
                {"index": 0, "id": "call_1", "function": {"name": "first", "arguments": ""}},
                {"index": 1, "id": "call_2", "function": {"name": "second", "arguments": ""}}
            ],
            "tool_use": {"id": "toolu_1", "name": "anthropic", "input": {}}
        }));

        let names: Vec<&str> = delta["tool_calls"]
            .as_array()
            .unwrap()
            .iter()
            .map(|call| call["function"]["name"].as_str().unwrap())
            .collect();
        assert_eq!(names, vec!["legacy", "first", "second", "anthropic"]);
    }

    #[test]
    fn test_tool_calls_null_overridden_by_other_sources() {
        let delta = delta_of(json!({
            "tool_calls": null,
            "tool_use": {"id": "toolu_1", "name": "f", "input": {"a": 1}}
        }));
        assert_eq!(delta["tool_calls"].as_array().unwrap().len(), 1);
        assert_eq!(delta["tool_calls"][0]["function"]["arguments"], "{\"a\":1}");
    }

    #[test]
    fn test_empty_tool_use_and_function_call_dropped() {
        let delta = delta_of(json!({"tool_use": null, "function_call": {}, "content": "hi"}));
        assert_eq!(delta, json!({"content": "hi"}));

        let delta = delta_of(json!({"function_call": null, "tool_calls": []}));
        assert_eq!(delta, json!({"tool_calls": []}));
    }

    #[test]
    fn test_unknown_keys_survive_in_place() {
        let delta = delta_of(json!({
            "role": "assistant",
            "reasoning_content": "thinking",
            "tool_calls": [{
                "index": 0,
                "function": {"name": "f", "arguments": "{}", "custom": {"x": 1}}
            }],
            "provider_specific_fields": {"citations": []},
            "content": null
        }));

        let keys: Vec<&String> = delta.as_object().unwrap().keys().collect();
        assert_eq!(
            keys,
            vec!["role", "reasoning_content", "provider_specific_fields", "content", "tool_calls"]
        );
        assert_eq!(delta["reasoning_content"], "thinking");
        assert_eq!(delta["provider_specific_fields"], json!({"citations": []}));
        assert_eq!(delta["tool_calls"][0]["function"]["custom"], json!({"x": 1}));
    }

    #[test]
    fn test_index_coercion_through_chunk() {
        let delta = delta_of(json!({"tool_calls": [{"index": "2"}, {"index": "not-a-number"}]}));
        assert_eq!(delta["tool_calls"][0]["index"], 2);
        assert_eq!(delta["tool_calls"][1]["index"], 0);
    }

    #[test]
    fn test_input_not_mutated_and_deterministic() {
        let raw = json!({
            "choices": {"text": "hi", "delta": {"tool_use": {"id": 1, "name": "f", "input": {}}}}
        });
        let before = raw.clone();
        let first = normalize_value(&raw).unwrap();
        let second = normalize_value(&raw).unwrap();
        assert_eq!(raw, before);
        assert_eq!(first, second);
        assert_eq!(first.choices[0].delta.tool_calls()[0].id.as_deref(), Some("1"));
    }

    #[test]
    fn test_invalid_top_level_input() {
        let err = normalize_value(&json!([1, 2, 3])).unwrap_err();
        assert!(matches!(err, NormalizeError::InvalidInput { found: "array" }));

        assert!(matches!(normalize_str("not json"), Err(NormalizeError::Json(_))));
        assert!(normalize_str("{\"id\": \"x\"}").is_ok());
    }

    #[test]
    fn test_canonical_chunk_deserializes_back() {
        let chunk = normalize_value(&json!({
            "id": "c",
            "usage": null,
            "choices": [{"delta": {"tool_calls": null, "content": "x"}}]
        }))
        .unwrap();
        let parsed: CanonicalChunk = serde_json::from_value(chunk.to_value()).unwrap();
        assert_eq!(parsed, chunk);
    }
}
