use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};

/// 键存在即为 Some，即使值为 null；需配合 `#[serde(default)]` 使用。
pub fn deserialize_present<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}

/// 判断一个值是否为"真值"：null、false、0、空字符串、空数组和空对象均视为假。
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(arr) => !arr.is_empty(),
        Value::Object(obj) => !obj.is_empty(),
    }
}

/// 字符串原样返回，其他值使用紧凑 JSON 文本。
pub fn value_to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// 将 index 强制转换为整数，无法转换时返回 0。
/// 超出 i64 范围的值（例如大于 `i64::MAX` 的 u64）同样返回 0。
pub fn coerce_index(value: Option<&Value>) -> i64 {
    match value {
        Some(Value::Number(n)) => n
            .as_i64()
            .or_else(|| n.as_u64().and_then(|u| i64::try_from(u).ok()))
            .or_else(|| {
                n.as_f64()
                    .filter(|f| f.is_finite() && f.abs() < i64::MAX as f64)
                    .map(|f| f.trunc() as i64)
            })
            .unwrap_or(0),
        Some(Value::String(s)) => s.trim().parse::<i64>().unwrap_or(0),
        Some(Value::Bool(b)) => i64::from(*b),
        _ => 0,
    }
}

/// arguments 保持字符串或 null，其他结构化值编码为 JSON 文本。
pub fn normalize_arguments(value: Option<&Value>) -> Option<String> {
    match value {
        None | Some(Value::Null) => None,
        Some(v) => Some(value_to_string(v)),
    }
}

/// 只接受字符串类型的 name。
pub fn string_or_none(value: Option<&Value>) -> Option<String> {
    value.and_then(Value::as_str).map(str::to_string)
}

/// 非对象值视为空对象。
pub fn as_object_or_empty(value: Option<&Value>) -> Map<String, Value> {
    match value {
        Some(Value::Object(obj)) => obj.clone(),
        _ => Map::new(),
    }
}

/// 复制除 `skip` 以外的所有键，保持原顺序。
pub fn passthrough_fields(source: &Map<String, Value>, skip: &[&str]) -> Map<String, Value> {
    source
        .iter()
        .filter(|(key, _)| !skip.contains(&key.as_str()))
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect()
}
