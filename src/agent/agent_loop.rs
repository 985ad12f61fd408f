//! Core agent loop implementation.

use std::sync::Arc;

use async_trait::async_trait;

use crate::config::{Config, LoopLimits};
use crate::llm::{ChatMessage, GroqClient, LlmClient, ToolCall};
use crate::search::{TavilyClient, WebSearch};
use crate::tools::ToolRegistry;

use super::prompt::build_system_prompt;
use super::{AgentError, AgentResponse, ConversationLoop, LoopFactory, LoopRequest};

/// Tool-calling agent over a chat-completion model.
pub struct Agent {
    llm: Arc<dyn LlmClient>,
    tools: ToolRegistry,
    limits: LoopLimits,
}

impl Agent {
    pub fn new(llm: Arc<dyn LlmClient>, tools: ToolRegistry, limits: LoopLimits) -> Self {
        Self { llm, tools, limits }
    }

    async fn run(&self, request: LoopRequest<'_>) -> Result<AgentResponse, AgentError> {
        let mut messages = Vec::with_capacity(request.history.len() + 2);
        messages.push(ChatMessage::system(build_system_prompt(
            request.instruction,
            &self.tools,
        )));
        messages.extend_from_slice(request.history);
        messages.push(ChatMessage::user(request.message));

        let tool_schemas = self.tools.get_tool_schemas();

        for iteration in 0..self.limits.max_iterations {
            tracing::debug!("Agent iteration {}", iteration + 1);

            let response = self
                .llm
                .chat_completion(&messages, Some(&tool_schemas))
                .await?;

            if let Some(usage) = &response.usage {
                tracing::debug!(
                    prompt_tokens = usage.prompt_tokens,
                    completion_tokens = usage.completion_tokens,
                    "Model usage"
                );
            }

            match response.tool_calls {
                Some(tool_calls) if !tool_calls.is_empty() => {
                    messages.push(ChatMessage::assistant_tool_calls(
                        response.content,
                        tool_calls.clone(),
                    ));

                    for tool_call in &tool_calls {
                        let result = match self.execute_tool_call(tool_call).await {
                            Ok(output) => output,
                            Err(e) => {
                                tracing::warn!(
                                    tool = %tool_call.function.name,
                                    error = %e,
                                    "Tool call failed"
                                );
                                format!("Error: {}", e)
                            }
                        };
                        messages.push(ChatMessage::tool_result(&tool_call.id, result));
                    }
                }
                _ => {
                    return Ok(AgentResponse::Structured {
                        output: response.content,
                    })
                }
            }
        }

        Err(AgentError::IterationLimit(self.limits.max_iterations))
    }

    /// Execute a single tool call.
    async fn execute_tool_call(&self, tool_call: &ToolCall) -> anyhow::Result<String> {
        let args: serde_json::Value = serde_json::from_str(&tool_call.function.arguments)
            .unwrap_or(serde_json::Value::Null);

        self.tools.execute(&tool_call.function.name, args).await
    }
}

#[async_trait]
impl ConversationLoop for Agent {
    async fn invoke(&self, request: LoopRequest<'_>) -> Result<AgentResponse, AgentError> {
        let budget = self.limits.max_execution_time;
        match tokio::time::timeout(budget, self.run(request)).await {
            Ok(result) => result,
            Err(_) => Err(AgentError::Timeout(budget)),
        }
    }
}

/// Builds [`Agent`]s against the configured model and search providers.
pub struct AgentFactory {
    config: Config,
}

impl AgentFactory {
    pub fn new(config: Config) -> Self {
        Self { config }
    }
}

impl LoopFactory for AgentFactory {
    fn build(&self) -> Result<Arc<dyn ConversationLoop>, AgentError> {
        let llm = GroqClient::new(self.config.groq_api_key.clone(), self.config.model.clone())
            .map_err(|e| AgentError::Construction(e.to_string()))?;
        let search: Arc<dyn WebSearch> = Arc::new(
            TavilyClient::new(
                self.config.tavily_api_key.clone(),
                self.config.tavily_base_url.clone(),
            )
            .map_err(|e| AgentError::Construction(e.to_string()))?,
        );

        tracing::info!(model = %self.config.model.model, "Mentor agent ready");

        Ok(Arc::new(Agent::new(
            Arc::new(llm),
            ToolRegistry::mentor_catalog(search),
            self.config.limits.clone(),
        )))
    }
}
