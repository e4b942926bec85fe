//! LLM abstraction layer
//!
//! A provider-neutral request/response model plus the OpenAI-compatible
//! chat-completions client the reasoning engine talks to.

pub mod provider;
pub mod providers;

pub use provider::{
    LLMError, LLMProvider, LLMRequest, LLMResponse, Message, MessageRole, ToolCall,
    ToolDefinition,
};
pub use providers::OpenAIProvider;
