use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct Request {
    pub model: String,

    pub messages: Vec<RequestMessage>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestMessageRole {
    System,
    User,
    Assistant,
}

#[derive(Debug, Clone, Serialize)]
pub struct RequestMessage {
    pub role: RequestMessageRole,
    pub content: String,
}
