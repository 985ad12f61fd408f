//! Groq chat-completions client (OpenAI-compatible API).

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::{
    ChatMessage, ChatResponse, LlmClient, LlmError, RetryPolicy, TokenUsage, ToolCall,
    ToolDefinition,
};
use crate::config::ModelConfig;

/// Client for any OpenAI-compatible `/chat/completions` endpoint.
pub struct GroqClient {
    http: reqwest::Client,
    api_key: String,
    config: ModelConfig,
    retry: RetryPolicy,
}

impl GroqClient {
    pub fn new(api_key: String, config: ModelConfig) -> Result<Self, LlmError> {
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()?;
        let retry = RetryPolicy::with_max_retries(config.max_retries);

        Ok(Self {
            http,
            api_key,
            config,
            retry,
        })
    }

    /// Override the backoff schedule.
    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.config.base_url.trim_end_matches('/'))
    }

    async fn send_once(&self, body: &CompletionRequest<'_>) -> Result<ChatResponse, LlmError> {
        let response = self
            .http
            .post(self.completions_url())
            .bearer_auth(&self.api_key)
            .json(body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    LlmError::Timeout(self.config.request_timeout)
                } else {
                    LlmError::Network(e)
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(LlmError::Status {
                status: status.as_u16(),
                body: truncate_body(&body),
            });
        }

        let parsed: CompletionResponse = response
            .json()
            .await
            .map_err(|e| LlmError::InvalidResponse(e.to_string()))?;

        let choice = parsed
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| LlmError::InvalidResponse("no choices in response".to_string()))?;

        Ok(ChatResponse {
            content: choice.message.content,
            tool_calls: choice.message.tool_calls,
            usage: parsed.usage,
        })
    }
}

#[async_trait]
impl LlmClient for GroqClient {
    async fn chat_completion(
        &self,
        messages: &[ChatMessage],
        tools: Option<&[ToolDefinition]>,
    ) -> Result<ChatResponse, LlmError> {
        let body = CompletionRequest {
            model: &self.config.model,
            messages,
            tools: tools.filter(|t| !t.is_empty()),
            temperature: self.config.temperature,
            max_tokens: self.config.max_tokens,
        };

        let mut retry = 0;
        loop {
            match self.send_once(&body).await {
                Ok(response) => {
                    if let Some(usage) = &response.usage {
                        tracing::debug!(
                            model = %self.config.model,
                            prompt_tokens = usage.prompt_tokens,
                            completion_tokens = usage.completion_tokens,
                            "Model call completed"
                        );
                    }
                    return Ok(response);
                }
                Err(e) if e.is_retryable() && retry < self.retry.max_retries => {
                    let delay = self.retry.delay_for(retry);
                    tracing::warn!(
                        error = %e,
                        retry = retry + 1,
                        delay_ms = delay.as_millis() as u64,
                        "Model call failed, retrying"
                    );
                    tokio::time::sleep(delay).await;
                    retry += 1;
                }
                Err(e) => return Err(e),
            }
        }
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 500;
    if body.chars().count() <= MAX {
        body.to_string()
    } else {
        let cut: String = body.chars().take(MAX).collect();
        format!("{}... [truncated]", cut)
    }
}

#[derive(Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    #[serde(skip_serializing_if = "Option::is_none")]
    tools: Option<&'a [ToolDefinition]>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Deserialize)]
struct CompletionResponse {
    #[serde(default)]
    choices: Vec<CompletionChoice>,
    #[serde(default)]
    usage: Option<TokenUsage>,
}

#[derive(Deserialize)]
struct CompletionChoice {
    message: CompletionMessage,
}

#[derive(Deserialize)]
struct CompletionMessage {
    #[serde(default)]
    content: Option<String>,
    #[serde(default)]
    tool_calls: Option<Vec<ToolCall>>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::time::Duration;

    use axum::{extract::State, http::StatusCode, routing::post, Json, Router};
    use serde_json::{json, Value};

    async fn spawn_fake(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{}", addr)
    }

    fn client_for(base_url: String) -> GroqClient {
        let config = ModelConfig {
            base_url,
            request_timeout: Duration::from_secs(5),
            ..ModelConfig::default()
        };
        GroqClient::new("test-key".to_string(), config)
            .unwrap()
            .with_retry_policy(RetryPolicy {
                max_retries: 2,
                base_delay: Duration::from_millis(1),
                max_delay: Duration::from_millis(2),
                multiplier: 1.0,
            })
    }

    #[tokio::test]
    async fn parses_tool_calls_and_content() {
        async fn handler(Json(body): Json<Value>) -> Json<Value> {
            assert_eq!(body["model"], "llama-3.3-70b-versatile");
            assert_eq!(body["tools"][0]["function"]["name"], "get_current_datetime");
            Json(json!({
                "choices": [{
                    "message": {
                        "role": "assistant",
                        "content": null,
                        "tool_calls": [{
                            "id": "call_9",
                            "type": "function",
                            "function": {"name": "get_current_datetime", "arguments": "{}"}
                        }]
                    }
                }],
                "usage": {"prompt_tokens": 12, "completion_tokens": 3}
            }))
        }
        let base = spawn_fake(Router::new().route("/chat/completions", post(handler))).await;
        let client = client_for(base);
        let tools = vec![ToolDefinition {
            tool_type: "function",
            function: super::super::FunctionDefinition {
                name: "get_current_datetime".into(),
                description: "now".into(),
                parameters: json!({"type": "object", "properties": {}}),
            },
        }];

        let response = client
            .chat_completion(&[ChatMessage::user("what time is it")], Some(&tools))
            .await
            .unwrap();

        let calls = response.tool_calls.unwrap();
        assert_eq!(calls[0].id, "call_9");
        assert!(response.content.is_none());
        assert_eq!(response.usage.unwrap().prompt_tokens, 12);
    }

    #[tokio::test]
    async fn retries_server_errors_then_succeeds() {
        async fn handler(State(hits): State<Arc<AtomicUsize>>) -> (StatusCode, Json<Value>) {
            if hits.fetch_add(1, Ordering::SeqCst) == 0 {
                (StatusCode::SERVICE_UNAVAILABLE, Json(json!({"error": "busy"})))
            } else {
                (
                    StatusCode::OK,
                    Json(json!({"choices": [{"message": {"content": "hello"}}]})),
                )
            }
        }
        let hits = Arc::new(AtomicUsize::new(0));
        let router = Router::new()
            .route("/chat/completions", post(handler))
            .with_state(Arc::clone(&hits));
        let client = client_for(spawn_fake(router).await);

        let response = client
            .chat_completion(&[ChatMessage::user("hi")], None)
            .await
            .unwrap();

        assert_eq!(response.content.as_deref(), Some("hello"));
        assert_eq!(hits.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn client_errors_are_not_retried() {
        async fn handler(State(hits): State<Arc<AtomicUsize>>) -> (StatusCode, &'static str) {
            hits.fetch_add(1, Ordering::SeqCst);
            (StatusCode::UNAUTHORIZED, "invalid api key")
        }
        let hits = Arc::new(AtomicUsize::new(0));
        let router = Router::new()
            .route("/chat/completions", post(handler))
            .with_state(Arc::clone(&hits));
        let client = client_for(spawn_fake(router).await);

        let err = client
            .chat_completion(&[ChatMessage::user("hi")], None)
            .await
            .unwrap_err();

        assert!(matches!(err, LlmError::Status { status: 401, .. }));
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }
}
