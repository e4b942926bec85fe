//! The reasoning engine boundary and its LLM-backed implementation.

use super::types::{ConversationState, Decision, Message, OperationRequest};
use crate::config::AgentConfig;
use crate::llm::provider::{self as llm, LLMError, LLMProvider, LLMRequest, ToolCall, ToolDefinition};
use crate::llm::providers::OpenAIProvider;
use crate::tools::FunctionDeclaration;
use async_trait::async_trait;
use tracing::debug;

/// Maps the conversation so far to a final answer or a batch of tool requests
#[async_trait]
pub trait ReasoningEngine: Send + Sync {
    async fn reason(
        &self,
        state: &ConversationState,
        tools: &[FunctionDeclaration],
    ) -> Result<Decision, LLMError>;
}

/// [`ReasoningEngine`] backed by a chat-completions [`LLMProvider`]
pub struct LlmReasoningEngine {
    provider: Box<dyn LLMProvider>,
    model: String,
    temperature: Option<f32>,
}

impl LlmReasoningEngine {
    pub fn new(provider: Box<dyn LLMProvider>, model: String, temperature: Option<f32>) -> Self {
        Self {
            provider,
            model,
            temperature,
        }
    }

    /// OpenAI-compatible engine configured from `config`; requires an API key
    pub fn from_config(config: &AgentConfig) -> anyhow::Result<Self> {
        let api_key = config.require_api_key()?.to_string();
        let provider = OpenAIProvider::with_base_url(api_key, config.base_url.clone());
        Ok(Self::new(
            Box::new(provider),
            config.model.clone(),
            Some(config.temperature),
        ))
    }

    fn build_request(&self, state: &ConversationState, tools: &[FunctionDeclaration]) -> LLMRequest {
        let messages = state
            .messages()
            .iter()
            .map(|message| match message {
                Message::System { text } => llm::Message::system(text.clone()),
                Message::User { text } => llm::Message::user(text.clone()),
                Message::Assistant { text, requests } if requests.is_empty() => {
                    llm::Message::assistant(text.clone())
                }
                Message::Assistant { text, requests } => llm::Message::assistant_with_tools(
                    text.clone(),
                    requests
                        .iter()
                        .map(|request| {
                            ToolCall::function(
                                request.id.clone(),
                                request.name.clone(),
                                request.arguments.to_string(),
                            )
                        })
                        .collect(),
                ),
                Message::OperationResult { request_id, text } => {
                    llm::Message::tool_response(request_id.clone(), text.clone())
                }
            })
            .collect();

        let tools = tools
            .iter()
            .map(|declaration| {
                ToolDefinition::function(
                    declaration.name.clone(),
                    declaration.description.clone(),
                    declaration.parameters.clone(),
                )
            })
            .collect();

        LLMRequest {
            messages,
            tools: Some(tools),
            model: self.model.clone(),
            temperature: self.temperature,
        }
    }
}

#[async_trait]
impl ReasoningEngine for LlmReasoningEngine {
    async fn reason(
        &self,
        state: &ConversationState,
        tools: &[FunctionDeclaration],
    ) -> Result<Decision, LLMError> {
        let request = self.build_request(state, tools);
        let response = self.provider.generate(request).await?;
        debug!(
            provider = self.provider.name(),
            finish_reason = ?response.finish_reason,
            total_tokens = ?response.usage.as_ref().map(|usage| usage.total_tokens),
            "reasoning engine responded"
        );

        let text = response.content.unwrap_or_default();
        let calls = response.tool_calls.unwrap_or_default();
        if calls.is_empty() {
            return Ok(Decision::FinalAnswer(text));
        }

        let requests = calls
            .into_iter()
            .map(|call| {
                let arguments = call.parsed_arguments().map_err(|err| {
                    LLMError::MalformedResponse(format!(
                        "Invalid JSON arguments for tool call '{}': {err}",
                        call.function.name
                    ))
                })?;
                Ok(OperationRequest::new(call.id, call.function.name, arguments))
            })
            .collect::<Result<Vec<_>, LLMError>>()?;

        Ok(Decision::Requests { text, requests })
    }
}
