//! Shared HTTP client for all providers.
//!
//! Every call is a single attempt: failures are classified and returned to the
//! caller, never retried.

use std::time::Duration;

use serde::{Deserialize, Serialize, de::DeserializeOwned};
use tracing::debug;

use super::error::LlmError;

/// Configuration for the underlying HTTP transport
#[derive(Debug, Clone, Default)]
pub struct HttpClientConfig {
    /// Total time allowed for one request. `None` keeps the transport default,
    /// which waits until the server answers or the connection fails.
    pub timeout: Option<Duration>,
    pub user_agent: Option<String>,
}

/// Thin wrapper around `reqwest::Client` that maps HTTP failures to [`LlmError`].
pub struct HttpClient {
    client: reqwest::Client,
}

impl HttpClient {
    pub fn new(config: &HttpClientConfig) -> Result<Self, LlmError> {
        let default_ua = format!("rolechat/{}", env!("CARGO_PKG_VERSION"));
        let ua = config.user_agent.as_deref().unwrap_or(&default_ua);

        let mut builder = reqwest::Client::builder().user_agent(ua);
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }

        let client = builder.build().map_err(|e| {
            LlmError::ProviderConfiguration(format!("Failed to build reqwest client: {e}"))
        })?;

        Ok(Self { client })
    }

    /// Make one POST request with a JSON body and decode the JSON response.
    ///
    /// 401 maps to [`LlmError::Authentication`], 429 to [`LlmError::RateLimited`],
    /// every other non-success status to [`LlmError::Api`].
    #[tracing::instrument(
        name = "http_post_json",
        skip(self, headers, body),
        fields(url = %url),
        err(level = "debug")
    )]
    pub async fn post_json<Req, Res>(
        &self,
        url: &str,
        headers: &[(String, String)],
        body: &Req,
    ) -> Result<Res, LlmError>
    where
        Req: Serialize,
        Res: DeserializeOwned,
    {
        let mut req_builder = self.client.post(url).json(body);
        for (name, value) in headers {
            req_builder = req_builder.header(name, value);
        }

        let res = req_builder.send().await.map_err(|e| LlmError::Network {
            message: format!("Request failed: {e}"),
            source: Some(Box::new(e)),
        })?;

        let status = res.status();
        let response_text = res.text().await.map_err(|e| LlmError::Network {
            message: format!("Failed to read response body: {e}"),
            source: Some(Box::new(e)),
        })?;

        if status.is_success() {
            debug!(status = %status, "HTTP request successful");
            return serde_json::from_str(&response_text).map_err(|e| LlmError::Parse {
                message: format!("Failed to parse API response: {e}"),
                source: Some(Box::new(e)),
            });
        }

        debug!(status = %status, "API returned error status");
        let message = error_message(status, &response_text);

        Err(match status {
            reqwest::StatusCode::UNAUTHORIZED => LlmError::Authentication { message },
            reqwest::StatusCode::TOO_MANY_REQUESTS => LlmError::RateLimited { message },
            _ => LlmError::Api {
                message,
                status_code: Some(status.as_u16()),
            },
        })
    }
}

#[derive(Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: String,
}

/// Pull the human-readable message out of an `{"error": {"message": ...}}`
/// envelope, falling back to the status line and raw body.
fn error_message(status: reqwest::StatusCode, body: &str) -> String {
    if let Ok(envelope) = serde_json::from_str::<ErrorEnvelope>(body) {
        if !envelope.error.message.is_empty() {
            return envelope.error.message;
        }
    }

    let body = body.trim();
    if body.is_empty() {
        format!("API returned error status {status}")
    } else {
        format!("API returned error status {status}: {body}")
    }
}
