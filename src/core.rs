pub mod credential;
pub mod error;
pub mod http;
pub mod traits;
pub mod types;

pub use credential::Credential;
pub use error::LlmError;
pub use http::{HttpClient, HttpClientConfig};
pub use traits::CompletionProvider;
pub use types::{
    ChatRequest, ChatResponse, ChatRole, GenerationConfig, LanguageModelUsage, Message,
    ResponseMetadata,
};
