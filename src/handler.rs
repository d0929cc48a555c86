//! Turns one form submission into exactly one completion request and
//! classifies what came back.

use std::fmt;

use thiserror::Error;
use tracing::{debug, info};

use crate::core::{
    ChatRequest, CompletionProvider, Credential, GenerationConfig, LlmError, Message,
};
use crate::provider::DEFAULT_MODEL;
use crate::roles::Role;

pub const TEMPERATURE: f32 = 0.7;
pub const MAX_TOKENS: u32 = 500;

/// Input rejected before any request is made.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Please enter your OpenAI API key.")]
    MissingCredential,
    #[error("Please enter a question.")]
    MissingQuestion,
}

/// Result of a single submission.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Invalid(ValidationError),
    /// Content of the first returned choice, verbatim.
    Success(String),
    AuthFailure,
    RateLimited,
    OtherFailure(String),
}

impl Outcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success(_))
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Invalid(err) => write!(f, "{err}"),
            Outcome::Success(text) => f.write_str(text),
            Outcome::AuthFailure => {
                f.write_str("Invalid API key. Please check your OpenAI API key.")
            }
            Outcome::RateLimited => f.write_str("Rate limit exceeded. Please try again later."),
            Outcome::OtherFailure(message) => write!(f, "An error occurred: {message}"),
        }
    }
}

impl From<ValidationError> for Outcome {
    fn from(err: ValidationError) -> Self {
        Outcome::Invalid(err)
    }
}

impl From<LlmError> for Outcome {
    fn from(err: LlmError) -> Self {
        match err {
            LlmError::Authentication { .. } => Outcome::AuthFailure,
            LlmError::RateLimited { .. } => Outcome::RateLimited,
            other @ (LlmError::ProviderConfiguration(_)
            | LlmError::Network { .. }
            | LlmError::Api { .. }
            | LlmError::Parse { .. }) => Outcome::OtherFailure(other.to_string()),
        }
    }
}

/// Check the submission in the order the form reports problems.
pub fn validate(credential: &Credential, question: &str) -> Result<(), ValidationError> {
    if credential.is_empty() {
        return Err(ValidationError::MissingCredential);
    }
    if question.trim().is_empty() {
        return Err(ValidationError::MissingQuestion);
    }
    Ok(())
}

/// Model and sampling parameters sent with every request.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionSettings {
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
}

impl Default for CompletionSettings {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            temperature: TEMPERATURE,
            max_tokens: MAX_TOKENS,
        }
    }
}

/// The two-message prompt for `role`: its description as the system message,
/// then the question exactly as typed.
pub fn build_request(settings: &CompletionSettings, role: Role, question: &str) -> ChatRequest {
    ChatRequest {
        model: settings.model.clone(),
        messages: vec![
            Message::system(role.describe().description),
            Message::user(question),
        ],
        generation_config: Some(GenerationConfig {
            max_tokens: Some(settings.max_tokens),
            temperature: Some(settings.temperature),
        }),
    }
}

pub struct CompletionHandler<P> {
    provider: P,
    settings: CompletionSettings,
}

impl<P: CompletionProvider> CompletionHandler<P> {
    pub fn new(provider: P) -> Self {
        Self {
            provider,
            settings: CompletionSettings::default(),
        }
    }

    pub fn with_settings(mut self, settings: CompletionSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    pub fn settings(&self) -> &CompletionSettings {
        &self.settings
    }

    /// Validate, send one request, and classify the result.
    ///
    /// Nothing is cached: identical calls each reach the provider.
    #[tracing::instrument(
        name = "generate",
        skip(self, credential, question),
        fields(role = %role)
    )]
    pub async fn generate(&self, credential: &Credential, role: Role, question: &str) -> Outcome {
        if let Err(err) = validate(credential, question) {
            debug!(error = %err, "Submission rejected before sending");
            return err.into();
        }

        let request = build_request(&self.settings, role, question);
        match self.provider.complete(credential, request).await {
            Ok(response) => {
                info!(
                    model = %response.metadata.model,
                    total_tokens = response.usage.as_ref().map(|u| u.total_tokens),
                    "Completion received"
                );
                Outcome::Success(response.text)
            }
            Err(err) => {
                debug!(status = ?err.status_code(), error = %err, "Completion failed");
                err.into()
            }
        }
    }
}
