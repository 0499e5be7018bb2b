pub mod openai_stream_choice;
pub mod openai_stream_chunk;
pub mod openai_stream_delta;
pub mod openai_stream_tool_call;
pub mod openai_stream_tool_call_function;

pub use openai_stream_choice::OpenAIStreamChoice;
pub use openai_stream_chunk::OpenAIStreamChunk;
pub use openai_stream_delta::OpenAIStreamDelta;
pub use openai_stream_tool_call::OpenAIStreamToolCall;
pub use openai_stream_tool_call_function::OpenAIStreamToolCallFunction;
