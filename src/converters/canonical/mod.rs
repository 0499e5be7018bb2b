pub mod canonical_chunk;
pub mod canonical_choice;
pub mod canonical_delta;
pub mod canonical_tool_call;
pub mod generic_chunk;

pub use canonical_chunk::CanonicalChunk;
pub use canonical_choice::CanonicalChoice;
pub use canonical_delta::{CanonicalDelta, ToolCalls};
pub use canonical_tool_call::{CanonicalFunction, CanonicalToolCall};
pub use generic_chunk::{GenericChunks, GenericStreamingChunk};
