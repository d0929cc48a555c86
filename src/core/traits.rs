use async_trait::async_trait;

use super::{
    credential::Credential,
    error::LlmError,
    types::{ChatRequest, ChatResponse},
};

/// A backend that turns one chat request into one completion.
///
/// Implementations send exactly one upstream request per call and report
/// rejections through the [`LlmError`] variants rather than retrying.
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    async fn complete(
        &self,
        credential: &Credential,
        request: ChatRequest,
    ) -> Result<ChatResponse, LlmError>;
}
