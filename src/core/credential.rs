use std::fmt;

use crate::provider::Provider;

/// Secret token used to authorize requests against a provider.
///
/// `Debug` and `Display` never print the token. Only [`Credential::expose`]
/// hands it out, and only the HTTP layer calls it.
#[derive(Clone, PartialEq, Eq, Default)]
pub struct Credential(String);

impl Credential {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Read the provider's API key environment variable, ignoring empty values.
    pub fn from_env(provider: Provider) -> Option<Self> {
        std::env::var(provider.default_api_key_env_var())
            .ok()
            .filter(|value| !value.is_empty())
            .map(Self)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub(crate) fn expose(&self) -> &str {
        &self.0
    }
}

impl From<String> for Credential {
    fn from(token: String) -> Self {
        Self(token)
    }
}

impl From<&str> for Credential {
    fn from(token: &str) -> Self {
        Self(token.to_string())
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(<redacted>)")
    }
}

impl fmt::Display for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("<redacted>")
    }
}
