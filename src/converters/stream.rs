use crate::converters::canonical::{CanonicalChunk, GenericStreamingChunk};
use crate::converters::normalizer::normalize_value;
use crate::error::NormalizeError;
use futures::{Stream, StreamExt, stream};
use serde_json::Value;

/// 解析一行 SSE 数据。空行、注释、非 data 字段以及 `[DONE]` 返回 None；
/// 不带 `data:` 前缀的行按 JSON Lines 处理。
pub fn parse_sse_data_line(line: &str) -> Result<Option<Value>, NormalizeError> {
    let line = line.trim();
    if line.is_empty() || line.starts_with(':') {
        return Ok(None);
    }
    let payload = match line.strip_prefix("data:") {
        Some(data) => data.trim(),
        None if ["event:", "id:", "retry:"].iter().any(|field| line.starts_with(field)) => {
            return Ok(None);
        }
        None => line,
    };
    if payload.is_empty() || payload == "[DONE]" {
        return Ok(None);
    }
    Ok(Some(serde_json::from_str(payload)?))
}

/// 惰性地将原始块流转换为统一格式的块流。
pub fn canonical_chunk_stream<S>(raw: S) -> impl Stream<Item = Result<CanonicalChunk, NormalizeError>>
where
    S: Stream<Item = Value>,
{
    raw.map(|value| normalize_value(&value))
}

/// 每个原始块展开为零个或多个 GenericStreamingChunk。
pub fn generic_chunk_stream<S>(
    raw: S,
) -> impl Stream<Item = Result<GenericStreamingChunk, NormalizeError>>
where
    S: Stream<Item = Value>,
{
    raw.flat_map(|value| {
        let items: Vec<Result<GenericStreamingChunk, NormalizeError>> = match normalize_value(&value) {
            Ok(chunk) => GenericStreamingChunk::from_canonical(chunk).map(Ok).collect(),
            Err(e) => vec![Err(e)],
        };
        stream::iter(items)
    })
}
