use thiserror::Error;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Errors produced while talking to a completion provider.
///
/// Authentication and rate-limit rejections get their own variants so callers
/// can match on them instead of inspecting status codes.
#[derive(Error, Debug)]
pub enum LlmError {
    #[error("Provider configuration error: {0}")]
    ProviderConfiguration(String),

    #[error("{message}")]
    Network {
        message: String,
        #[source]
        source: Option<BoxError>,
    },

    /// The provider rejected the credential (HTTP 401).
    #[error("{message}")]
    Authentication { message: String },

    /// The provider signaled request-rate or quota exhaustion (HTTP 429).
    #[error("{message}")]
    RateLimited { message: String },

    #[error("{message}")]
    Api {
        message: String,
        status_code: Option<u16>,
    },

    #[error("{message}")]
    Parse {
        message: String,
        #[source]
        source: Option<BoxError>,
    },
}

impl LlmError {
    pub fn status_code(&self) -> Option<u16> {
        match self {
            LlmError::Authentication { .. } => Some(401),
            LlmError::RateLimited { .. } => Some(429),
            LlmError::Api { status_code, .. } => *status_code,
            _ => None,
        }
    }
}
