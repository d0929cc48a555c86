//! # rolechat
//!
//! Ask one of a fixed set of creative personas a question. The persona's
//! description becomes the system prompt, the question becomes the user
//! message, and a single chat-completion request is sent upstream.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use rolechat::{CompletionHandler, Credential, OpenAiClient, OpenAiConfig, Outcome, Role};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let handler = CompletionHandler::new(OpenAiClient::new(OpenAiConfig::new())?);
//!     let credential = Credential::new("sk-...");
//!
//!     match handler
//!         .generate(&credential, Role::VideoDirector, "How can I shoot a dream sequence?")
//!         .await
//!     {
//!         Outcome::Success(text) => println!("{text}"),
//!         failure => eprintln!("{failure}"),
//!     }
//!     Ok(())
//! }
//! ```

pub mod completions;
pub mod core;
pub mod form;
pub mod handler;
pub mod provider;
pub mod roles;

pub use crate::core::{
    ChatRequest, ChatResponse, ChatRole, CompletionProvider, Credential, GenerationConfig,
    HttpClientConfig, LlmError, Message,
};
pub use form::ChatForm;
pub use handler::{CompletionHandler, CompletionSettings, Outcome, ValidationError};
pub use provider::{OpenAiClient, OpenAiConfig, Provider};
pub use roles::{Role, RoleProfile};
