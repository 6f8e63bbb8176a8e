use async_openai::{
    Client,
    config::OpenAIConfig,
    error::OpenAIError,
    types::{
        ChatCompletionRequestSystemMessageArgs, ChatCompletionRequestUserMessageArgs,
        CreateChatCompletionRequestArgs,
    },
};
use async_trait::async_trait;
use thiserror::Error;

/// A single chat-completion call: one system message, one user message,
/// a hard token ceiling, and an optional sampling temperature.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    pub system: String,
    pub user: String,
    pub max_tokens: u32,
    pub temperature: Option<f32>,
}

/// Errors produced while obtaining a completion from the upstream model.
#[derive(Debug, Error)]
pub enum LlmError {
    /// The model answered but the first choice carried no usable text.
    #[error("LLM response contained no content.")]
    EmptyCompletion,
    /// The upstream API call itself failed.
    #[error(transparent)]
    Upstream(#[from] OpenAIError),
}

/// A generic client for chat-completion models.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ChatClient: Send + Sync {
    /// Makes a single, non-streaming completion call and returns the
    /// trimmed text of the first choice.
    async fn complete(&self, request: CompletionRequest) -> Result<String, LlmError>;
}

/// An implementation of `ChatClient` for any OpenAI-compatible API.
pub struct OpenAiChatClient {
    client: Client<OpenAIConfig>,
    model: String,
}

impl OpenAiChatClient {
    /// Creates a new client for an OpenAI-compatible service.
    ///
    /// # Arguments
    ///
    /// * `config` - The configuration for the OpenAI client, including API key and base URL.
    /// * `model` - The specific model identifier to use for chat completions (e.g., "gpt-3.5-turbo").
    pub fn new(config: OpenAIConfig, model: String) -> Self {
        Self {
            client: Client::with_config(config),
            model,
        }
    }
}

#[async_trait]
impl ChatClient for OpenAiChatClient {
    async fn complete(&self, request: CompletionRequest) -> Result<String, LlmError> {
        let messages = vec![
            ChatCompletionRequestSystemMessageArgs::default()
                .content(request.system)
                .build()?
                .into(),
            ChatCompletionRequestUserMessageArgs::default()
                .content(request.user)
                .build()?
                .into(),
        ];

        let mut builder = CreateChatCompletionRequestArgs::default();
        builder
            .model(&self.model)
            .messages(messages)
            .max_tokens(request.max_tokens);
        if let Some(temperature) = request.temperature {
            builder.temperature(temperature);
        }
        let request = builder.build()?;

        let response = self.client.chat().create(request).await?;

        response
            .choices
            .first()
            .and_then(|choice| choice.message.content.as_deref())
            .map(str::trim)
            .filter(|text| !text.is_empty())
            .map(str::to_owned)
            .ok_or(LlmError::EmptyCompletion)
    }
}
