use anyhow::{anyhow, Result};
use async_openai::config::OpenAIConfig;
use async_openai::types::{
    ChatCompletionRequestAssistantMessageArgs, ChatCompletionRequestMessage,
    ChatCompletionRequestSystemMessageArgs, ChatCompletionRequestUserMessageArgs,
    CreateChatCompletionRequestArgs,
};
use async_openai::Client;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::config::AppConfig;
use crate::models::chat_message::{ChatMessage, Role};

const MAX_TOKENS: u32 = 1024;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenUsage {
    pub input_tokens: u32,
    pub output_tokens: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Completion {
    pub content: String,
    pub model: String,
    pub usage: TokenUsage,
}

/// What gets persisted alongside an assistant reply.
#[derive(Debug, Serialize)]
pub struct CompletionMetadata {
    pub model: String,
    pub tokens: TokenUsage,
}

impl Completion {
    pub fn metadata_json(&self) -> Result<String> {
        Ok(serde_json::to_string(&CompletionMetadata {
            model: self.model.clone(),
            tokens: self.usage,
        })?)
    }
}

#[async_trait]
pub trait CompletionService: Send + Sync {
    /// Generates the next assistant turn for `history` (oldest first).
    async fn complete(&self, history: &[ChatMessage], system_prompt: &str) -> Result<Completion>;
}

pub struct OpenAICompletions {
    client: Client<OpenAIConfig>,
    model: String,
}

impl OpenAICompletions {
    pub fn new(app_config: &AppConfig) -> Self {
        let mut oai_config = OpenAIConfig::new().with_api_key(&app_config.openai_api_key);
        if let Some(api_base) = &app_config.openai_api_base {
            oai_config = oai_config.with_api_base(api_base);
        }

        OpenAICompletions {
            client: Client::with_config(oai_config),
            model: app_config.chat_model.clone(),
        }
    }
}

pub fn build_messages(
    history: &[ChatMessage],
    system_prompt: &str,
) -> Result<Vec<ChatCompletionRequestMessage>> {
    let mut messages: Vec<ChatCompletionRequestMessage> =
        vec![ChatCompletionRequestSystemMessageArgs::default()
            .content(system_prompt)
            .build()?
            .into()];

    for message in history {
        let request_message: ChatCompletionRequestMessage = match message.role {
            Role::User => ChatCompletionRequestUserMessageArgs::default()
                .content(message.content.clone())
                .build()?
                .into(),
            Role::Assistant => ChatCompletionRequestAssistantMessageArgs::default()
                .content(message.content.clone())
                .build()?
                .into(),
        };
        messages.push(request_message);
    }

    Ok(messages)
}

#[async_trait]
impl CompletionService for OpenAICompletions {
    async fn complete(&self, history: &[ChatMessage], system_prompt: &str) -> Result<Completion> {
        let request = CreateChatCompletionRequestArgs::default()
            .max_tokens(MAX_TOKENS)
            .model(&self.model)
            .messages(build_messages(history, system_prompt)?)
            .build()?;

        debug!(
            "Requesting completion from {} with {} history messages",
            self.model,
            history.len()
        );
        let response = self.client.chat().create(request).await?;

        let content = response
            .choices
            .first()
            .ok_or_else(|| anyhow!("No choices in completion response"))?
            .message
            .content
            .clone()
            .unwrap_or_default();

        let usage = response
            .usage
            .map(|usage| TokenUsage {
                input_tokens: usage.prompt_tokens,
                output_tokens: usage.completion_tokens,
            })
            .unwrap_or_default();

        info!(
            "Completion from {}: {} input / {} output tokens",
            response.model, usage.input_tokens, usage.output_tokens
        );

        Ok(Completion {
            content,
            model: response.model,
            usage,
        })
    }
}
