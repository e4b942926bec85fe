use super::super::provider::{
    FinishReason, LLMError, LLMProvider, LLMRequest, LLMResponse, MessageRole, ToolCall, Usage,
};
use crate::config::constants::defaults;
use async_trait::async_trait;
use reqwest::{Client as HttpClient, StatusCode};
use serde_json::{Value, json};

/// Chat-completions client for OpenAI and compatible endpoints
pub struct OpenAIProvider {
    api_key: String,
    http_client: HttpClient,
    base_url: String,
}

impl OpenAIProvider {
    pub fn new(api_key: String) -> Self {
        Self::with_base_url(api_key, defaults::DEFAULT_BASE_URL.to_string())
    }

    pub fn with_base_url(api_key: String, base_url: String) -> Self {
        Self {
            api_key,
            http_client: HttpClient::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl LLMProvider for OpenAIProvider {
    fn name(&self) -> &str {
        "openai"
    }

    async fn generate(&self, request: LLMRequest) -> Result<LLMResponse, LLMError> {
        let openai_request = self.convert_to_openai_format(&request);

        let url = format!("{}/chat/completions", self.base_url);

        let response = self
            .http_client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&openai_request)
            .send()
            .await
            .map_err(|e| LLMError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(match status {
                StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                    LLMError::Authentication(format!("HTTP {status}: {error_text}"))
                }
                StatusCode::TOO_MANY_REQUESTS => LLMError::RateLimit,
                StatusCode::BAD_REQUEST => {
                    LLMError::InvalidRequest(format!("HTTP {status}: {error_text}"))
                }
                _ => LLMError::Provider(format!("HTTP {status}: {error_text}")),
            });
        }

        let openai_response: Value = response
            .json()
            .await
            .map_err(|e| LLMError::MalformedResponse(e.to_string()))?;

        self.convert_from_openai_format(openai_response)
    }
}

impl OpenAIProvider {
    fn convert_to_openai_format(&self, request: &LLMRequest) -> Value {
        let mut messages = Vec::new();

        for message in &request.messages {
            let mut msg = json!({
                "role": message.role.as_openai_str(),
                "content": message.content
            });

            if message.role == MessageRole::Tool {
                if let Some(tool_call_id) = &message.tool_call_id {
                    msg["tool_call_id"] = json!(tool_call_id);
                }
            }

            if let Some(tool_calls) = message.tool_calls.as_ref().filter(|calls| !calls.is_empty()) {
                if message.content.is_empty() {
                    msg["content"] = Value::Null;
                }
                msg["tool_calls"] = json!(tool_calls);
            }

            messages.push(msg);
        }

        let mut openai_request = json!({
            "model": request.model,
            "messages": messages
        });

        if let Some(temperature) = request.temperature {
            openai_request["temperature"] = json!(temperature);
        }

        if let Some(tools) = request.tools.as_ref().filter(|tools| !tools.is_empty()) {
            openai_request["tools"] = json!(tools);
        }

        openai_request
    }

    fn convert_from_openai_format(&self, response: Value) -> Result<LLMResponse, LLMError> {
        let choice = response["choices"]
            .as_array()
            .and_then(|choices| choices.first())
            .ok_or_else(|| LLMError::MalformedResponse("No choices in response".to_string()))?;

        let message = &choice["message"];
        let content = message["content"].as_str().map(|s| s.to_string());

        let tool_calls = match message["tool_calls"].as_array() {
            Some(calls) => Some(
                calls
                    .iter()
                    .map(parse_tool_call)
                    .collect::<Result<Vec<_>, _>>()?,
            ),
            None => None,
        };

        let usage = response["usage"].as_object().map(|u| Usage {
            prompt_tokens: u["prompt_tokens"].as_u64().unwrap_or(0) as u32,
            completion_tokens: u["completion_tokens"].as_u64().unwrap_or(0) as u32,
            total_tokens: u["total_tokens"].as_u64().unwrap_or(0) as u32,
        });

        let finish_reason = match choice["finish_reason"].as_str() {
            Some("stop") => FinishReason::Stop,
            Some("length") => FinishReason::Length,
            Some("tool_calls") => FinishReason::ToolCalls,
            Some("content_filter") => FinishReason::ContentFilter,
            Some(other) => FinishReason::Error(other.to_string()),
            None => FinishReason::Stop,
        };

        Ok(LLMResponse {
            content,
            tool_calls,
            usage,
            finish_reason,
        })
    }
}

fn parse_tool_call(call: &Value) -> Result<ToolCall, LLMError> {
    let id = call["id"]
        .as_str()
        .ok_or_else(|| LLMError::MalformedResponse("Tool call without id".to_string()))?;
    let name = call["function"]["name"]
        .as_str()
        .ok_or_else(|| LLMError::MalformedResponse(format!("Tool call {id} without name")))?;
    let arguments = call["function"]["arguments"].as_str().unwrap_or_default();

    Ok(ToolCall::function(
        id.to_string(),
        name.to_string(),
        arguments.to_string(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::provider::{Message, ToolDefinition};
    use mockito::Matcher;

    fn request() -> LLMRequest {
        LLMRequest {
            messages: vec![
                Message::system("You are a file assistant.".to_string()),
                Message::user("make notes".to_string()),
                Message::assistant_with_tools(
                    String::new(),
                    vec![ToolCall::function(
                        "call_1".into(),
                        "create_file".into(),
                        r#"{"path":"n.md","content":"x"}"#.into(),
                    )],
                ),
                Message::tool_response("call_1".into(), "File created successfully: n.md".into()),
            ],
            tools: Some(vec![ToolDefinition::function(
                "create_file".into(),
                "Create a file".into(),
                json!({"type": "object"}),
            )]),
            model: "gpt-4o".to_string(),
            temperature: Some(0.5),
        }
    }

    #[test]
    fn request_uses_openai_wire_format() {
        let provider = OpenAIProvider::new("key".into());
        let body = provider.convert_to_openai_format(&request());

        assert_eq!(body["messages"][0]["role"], "system");
        assert_eq!(body["messages"][1]["role"], "user");
        assert_eq!(body["messages"][2]["content"], Value::Null);
        assert_eq!(body["messages"][2]["tool_calls"][0]["id"], "call_1");
        assert_eq!(body["messages"][2]["tool_calls"][0]["type"], "function");
        assert_eq!(body["messages"][3]["role"], "tool");
        assert_eq!(body["messages"][3]["tool_call_id"], "call_1");
        assert_eq!(body["tools"][0]["function"]["name"], "create_file");
        assert_eq!(body["temperature"], json!(0.5));
        assert_eq!(body["messages"].as_array().map(Vec::len), Some(4));
        assert!(body.get("max_tokens").is_none());
    }

    #[tokio::test]
    async fn parses_tool_calls_from_response() -> Result<(), LLMError> {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/chat/completions")
            .match_header("authorization", "Bearer test-key")
            .match_body(Matcher::PartialJson(json!({"model": "gpt-4o"})))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                json!({
                    "choices": [{
                        "message": {
                            "role": "assistant",
                            "content": null,
                            "tool_calls": [{
                                "id": "call_42",
                                "type": "function",
                                "function": {"name": "show_file", "arguments": "{\"path\":\"a.txt\"}"}
                            }]
                        },
                        "finish_reason": "tool_calls"
                    }],
                    "usage": {"prompt_tokens": 10, "completion_tokens": 5, "total_tokens": 15}
                })
                .to_string(),
            )
            .create_async()
            .await;

        let provider = OpenAIProvider::with_base_url("test-key".into(), server.url());
        let response = provider.generate(request()).await?;
        mock.assert_async().await;

        let calls = response.tool_calls.unwrap_or_default();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].id, "call_42");
        assert_eq!(calls[0].function.name, "show_file");
        assert_eq!(response.finish_reason, FinishReason::ToolCalls);
        assert!(response.content.is_none());
        assert_eq!(response.usage.map(|usage| usage.total_tokens), Some(15));
        Ok(())
    }

    #[tokio::test]
    async fn maps_http_errors() {
        let mut server = mockito::Server::new_async().await;
        let _unauthorized = server
            .mock("POST", "/chat/completions")
            .with_status(401)
            .with_body("{\"error\":\"bad key\"}")
            .create_async()
            .await;

        let provider = OpenAIProvider::with_base_url("wrong".into(), server.url());
        let result = provider.generate(request()).await;
        assert!(matches!(result, Err(LLMError::Authentication(_))));
    }

    #[tokio::test]
    async fn empty_choices_are_malformed() {
        let mut server = mockito::Server::new_async().await;
        let _empty = server
            .mock("POST", "/chat/completions")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body("{\"choices\": []}")
            .create_async()
            .await;

        let provider = OpenAIProvider::with_base_url("key".into(), server.url());
        let result = provider.generate(request()).await;
        assert!(matches!(result, Err(LLMError::MalformedResponse(_))));
    }
}
