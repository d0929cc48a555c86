//! Shared client logic for providers that speak the OpenAI-style chat
//! completions API.
//!
//! This module contains reusable functionality for:
//! - Building wire requests from core types
//! - Sending them through the shared [`HttpClient`]
//! - Converting the first returned choice back into a [`ChatResponse`]

use crate::{
    completions::{
        request::{Request, RequestMessage, RequestMessageRole},
        response::Response,
    },
    core::{
        ChatRequest, ChatResponse, ChatRole, Credential, HttpClient, HttpClientConfig,
        LanguageModelUsage, LlmError, ResponseMetadata,
    },
    provider::Provider,
};

/// Configuration trait for providers that use the chat completions API
pub trait CompletionsProviderConfig: Send + Sync {
    /// Model Provider
    fn provider(&self) -> Provider;

    /// Base URL for the API (e.g., `https://api.openai.com/v1`)
    fn base_url(&self) -> &str;

    /// API endpoint for chat completions (e.g., `/chat/completions`)
    fn endpoint(&self) -> &str;

    /// Authentication header as (header_name, header_value) tuple
    fn auth_header(&self, credential: &Credential) -> (String, String) {
        (
            "Authorization".to_string(),
            format!("Bearer {}", credential.expose()),
        )
    }

    /// Additional headers to include with each request
    fn extra_headers(&self) -> Vec<(String, String)> {
        Vec::new()
    }

    fn http_config(&self) -> HttpClientConfig {
        HttpClientConfig::default()
    }
}

/// Shared client for providers using the chat completions API
pub struct CompletionsClient<P: CompletionsProviderConfig> {
    pub config: P,
    http: HttpClient,
}

impl<P: CompletionsProviderConfig> CompletionsClient<P> {
    pub fn new(config: P) -> Result<Self, LlmError> {
        let http = HttpClient::new(&config.http_config())?;
        Ok(Self { config, http })
    }

    /// Send one request to the chat completions endpoint
    #[tracing::instrument(
        name = "chat_completion",
        skip(self, credential, request),
        fields(
            base_url = %self.config.base_url(),
            model = %request.model
        ),
        err(level = "debug")
    )]
    pub(crate) async fn make_api_request(
        &self,
        credential: &Credential,
        request: Request,
    ) -> Result<Response, LlmError> {
        let url = format!("{}{}", self.config.base_url(), self.config.endpoint());

        let mut headers = vec![self.config.auth_header(credential)];
        headers.extend(self.config.extra_headers());

        self.http.post_json(&url, &headers, &request).await
    }

    pub async fn complete(
        &self,
        credential: &Credential,
        request: ChatRequest,
    ) -> Result<ChatResponse, LlmError> {
        let api_request = build_request(request);
        let api_response = self.make_api_request(credential, api_request).await?;
        convert_to_chat_response(api_response, self.config.provider())
    }
}

pub(crate) fn build_request(request: ChatRequest) -> Request {
    let messages = request
        .messages
        .into_iter()
        .map(|m| RequestMessage {
            role: match m.role {
                ChatRole::System => RequestMessageRole::System,
                ChatRole::User => RequestMessageRole::User,
                ChatRole::Assistant => RequestMessageRole::Assistant,
            },
            content: m.content,
        })
        .collect();

    let generation = request.generation_config.unwrap_or_default();

    Request {
        model: request.model,
        messages,
        temperature: generation.temperature,
        max_tokens: generation.max_tokens,
    }
}

/// Take the first choice of a chat completions response.
pub(crate) fn convert_to_chat_response(
    res: Response,
    provider: Provider,
) -> Result<ChatResponse, LlmError> {
    let choice = res.choices.into_iter().next().ok_or_else(|| LlmError::Parse {
        message: "No choices in response".to_string(),
        source: None,
    })?;

    let text = match (choice.message.content, choice.message.refusal) {
        (Some(content), _) => content,
        (None, Some(refusal)) => {
            return Err(LlmError::Api {
                message: format!("Model refused: {refusal}"),
                status_code: None,
            });
        }
        (None, None) => {
            return Err(LlmError::Parse {
                message: "No content in message".to_string(),
                source: None,
            });
        }
    };

    Ok(ChatResponse {
        text,
        usage: res.usage.map(|usage| LanguageModelUsage {
            prompt_tokens: usage.prompt_tokens,
            completion_tokens: usage.completion_tokens,
            total_tokens: usage.total_tokens,
        }),
        metadata: ResponseMetadata {
            provider,
            model: res.model,
            id: res.id,
        },
    })
}
