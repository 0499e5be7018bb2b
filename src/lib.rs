//! Normalizes streaming chunks from OpenAI-style, Anthropic-style and legacy
//! `function_call` providers into one canonical chunk shape.

pub mod config;
pub mod converters;
pub mod error;
pub mod logging;
pub mod trace;

pub use converters::{
    CanonicalChunk, ChunkFields, GenericStreamingChunk, normalize, normalize_str,
    normalize_value, to_generic_chunks,
};
pub use error::{NormalizeError, ProxyError};
