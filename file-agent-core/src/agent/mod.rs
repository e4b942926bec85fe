//! Conversation state, the reasoning engine boundary and the orchestration loop

pub mod engine;
pub mod runloop;
pub mod types;

pub use engine::{LlmReasoningEngine, ReasoningEngine};
pub use runloop::{AgentLoop, ExecutedOperation, RunOutcome, StopReason};
pub use types::{ConversationState, Decision, Message, OperationRequest};
