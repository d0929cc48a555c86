use async_trait::async_trait;

use crate::completions::{CompletionsClient, CompletionsProviderConfig};
use crate::core::{
    ChatRequest, ChatResponse, CompletionProvider, Credential, HttpClientConfig, LlmError,
};
use crate::provider::{Provider, constants::openai};

/// OpenAI-specific configuration for the chat completions client.
///
/// No credential lives here: it is supplied per call so the key typed into
/// the form is only held for as long as the session needs it.
#[derive(Debug, Clone)]
pub struct OpenAiConfig {
    pub base_url: String,
    pub http_config: HttpClientConfig,
}

impl Default for OpenAiConfig {
    fn default() -> Self {
        Self {
            base_url: openai::API_BASE.to_string(),
            http_config: HttpClientConfig::default(),
        }
    }
}

impl OpenAiConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_http_config(mut self, config: HttpClientConfig) -> Self {
        self.http_config = config;
        self
    }
}

impl CompletionsProviderConfig for OpenAiConfig {
    fn provider(&self) -> Provider {
        Provider::OpenAI
    }

    fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self) -> &str {
        openai::CHAT_COMPLETIONS_ENDPOINT
    }

    fn http_config(&self) -> HttpClientConfig {
        self.http_config.clone()
    }
}

pub struct OpenAiClient {
    completions_client: CompletionsClient<OpenAiConfig>,
}

impl OpenAiClient {
    pub fn new(config: OpenAiConfig) -> Result<Self, LlmError> {
        Ok(Self {
            completions_client: CompletionsClient::new(config)?,
        })
    }
}

#[async_trait]
impl CompletionProvider for OpenAiClient {
    async fn complete(
        &self,
        credential: &Credential,
        request: ChatRequest,
    ) -> Result<ChatResponse, LlmError> {
        self.completions_client.complete(credential, request).await
    }
}
