use serde_json::{Map, Value};
use std::borrow::Cow;

/// Read-only view over a raw chunk or choice.
///
/// Upstream clients hand us either loosely typed JSON or typed records such as
/// [`OpenAIStreamChunk`](crate::converters::openai::OpenAIStreamChunk). Both are
/// adapted here so the normalizer only ever asks for a field by name.
pub trait ChunkFields {
    /// Value stored under `key`, `None` when the key is absent.
    fn field(&self, key: &str) -> Option<Cow<'_, Value>>;

    /// Like [`field`](Self::field) but absent keys read as null.
    fn field_or_null(&self, key: &str) -> Value {
        self.field(key).map(Cow::into_owned).unwrap_or(Value::Null)
    }
}

impl ChunkFields for Map<String, Value> {
    fn field(&self, key: &str) -> Option<Cow<'_, Value>> {
        self.get(key).map(Cow::Borrowed)
    }
}

/// Non-object values expose no fields at all.
impl ChunkFields for Value {
    fn field(&self, key: &str) -> Option<Cow<'_, Value>> {
        match self {
            Value::Object(obj) => obj.field(key),
            _ => None,
        }
    }
}
