//! Chat completions API plumbing shared by OpenAI-compatible providers.

pub mod client;
pub(crate) mod request;
pub(crate) mod response;

pub use client::{CompletionsClient, CompletionsProviderConfig};
