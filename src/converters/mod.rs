pub mod canonical;
pub mod helpers;
pub mod normalizer;
pub mod openai;
pub mod source;
pub mod stream;
pub mod tool_call_source;

pub use canonical::{
    CanonicalChoice, CanonicalChunk, CanonicalDelta, CanonicalFunction, CanonicalToolCall,
    GenericChunks, GenericStreamingChunk, ToolCalls,
};
pub use normalizer::{
    normalize, normalize_choice, normalize_delta, normalize_str, normalize_value,
    to_generic_chunks,
};
pub use source::ChunkFields;
pub use tool_call_source::ToolCallSource;
