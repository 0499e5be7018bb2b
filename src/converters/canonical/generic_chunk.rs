use crate::converters::canonical::{CanonicalChoice, CanonicalChunk, CanonicalToolCall, ToolCalls};
use crate::converters::helpers::{coerce_index, value_to_string};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::iter::Peekable;
use std::vec;

/// Flat chunk shape for consumers that handle one tool call at a time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenericStreamingChunk {
    pub text: String,
    pub tool_use: Option<CanonicalToolCall>,
    pub is_finished: bool,
    pub finish_reason: String,
    pub usage: Option<Value>,
    pub index: i64,
    pub provider_specific_fields: Value,
}

impl GenericStreamingChunk {
    fn empty(index: i64, provider_specific_fields: Value) -> Self {
        GenericStreamingChunk {
            text: String::new(),
            tool_use: None,
            is_finished: false,
            finish_reason: String::new(),
            usage: None,
            index,
            provider_specific_fields,
        }
    }

    /// Fans a canonical chunk out into generic chunks.
    ///
    /// A chunk without choices still yields one chunk carrying the chunk-level
    /// fields. Every choice yields one chunk per tool call (or one chunk when it
    /// has none); its text rides on the first of them and its finish reason on
    /// the last. Usage, when reported, rides on the very last chunk.
    ///
    /// Chunks are built on demand as the iterator is advanced.
    pub fn from_canonical(chunk: CanonicalChunk) -> GenericChunks {
        let CanonicalChunk {
            choices,
            usage,
            provider_specific_fields,
            ..
        } = chunk;

        GenericChunks {
            placeholder: choices.is_empty(),
            choices: choices.into_iter().peekable(),
            current: None,
            provider_specific_fields,
            usage: usage.filter(|usage| !usage.is_null()),
        }
    }
}

/// Iterator returned by [`GenericStreamingChunk::from_canonical`].
#[derive(Debug)]
pub struct GenericChunks {
    choices: Peekable<vec::IntoIter<CanonicalChoice>>,
    current: Option<ChoiceChunks>,
    provider_specific_fields: Value,
    usage: Option<Value>,
    placeholder: bool,
}

impl Iterator for GenericChunks {
    type Item = GenericStreamingChunk;

    fn next(&mut self) -> Option<Self::Item> {
        let mut chunk = if self.placeholder {
            self.placeholder = false;
            GenericStreamingChunk::empty(0, self.provider_specific_fields.clone())
        } else {
            loop {
                let provider_specific_fields = &self.provider_specific_fields;
                if let Some(chunk) = self
                    .current
                    .as_mut()
                    .and_then(|current| current.next_chunk(provider_specific_fields))
                {
                    break chunk;
                }
                self.current = Some(ChoiceChunks::new(self.choices.next()?));
            }
        };

        let exhausted = self.current.as_mut().is_none_or(ChoiceChunks::is_done)
            && self.choices.peek().is_none();
        if exhausted {
            chunk.usage = self.usage.take();
        }
        Some(chunk)
    }
}

/// 单个 choice 的展开状态：每个工具调用一个块，没有工具调用时一个块。
#[derive(Debug)]
struct ChoiceChunks {
    index: i64,
    text: Option<String>,
    finish_reason: String,
    calls: Peekable<vec::IntoIter<CanonicalToolCall>>,
    started: bool,
}

impl ChoiceChunks {
    fn new(choice: CanonicalChoice) -> Self {
        let index = coerce_index(Some(&choice.index));
        let finish_reason = text_of(&choice.finish_reason);
        let text = choice.delta.get("content").map(text_of).unwrap_or_default();
        let calls = match choice.delta.tool_calls {
            ToolCalls::List(calls) => calls,
            ToolCalls::Absent | ToolCalls::Null => Vec::new(),
        };
        ChoiceChunks {
            index,
            text: Some(text),
            finish_reason,
            calls: calls.into_iter().peekable(),
            started: false,
        }
    }

    fn is_done(&mut self) -> bool {
        self.started && self.calls.peek().is_none()
    }

    fn next_chunk(&mut self, provider_specific_fields: &Value) -> Option<GenericStreamingChunk> {
        let tool_use = if self.started {
            Some(self.calls.next()?)
        } else {
            self.started = true;
            self.calls.next()
        };

        let mut chunk = GenericStreamingChunk {
            tool_use,
            ..GenericStreamingChunk::empty(self.index, provider_specific_fields.clone())
        };
        chunk.text = self.text.take().unwrap_or_default();
        if self.calls.peek().is_none() {
            chunk.is_finished = !self.finish_reason.is_empty();
            chunk.finish_reason = std::mem::take(&mut self.finish_reason);
        }
        Some(chunk)
    }
}

fn text_of(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        other => value_to_string(other),
    }
}
