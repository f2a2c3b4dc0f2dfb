//! Wire types for the `/chat/completions` endpoint. Only the fields the
//! generators read or write are modelled; everything else is ignored.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CreateChatCompletionRequest {
    pub model: String,
    pub messages: Vec<ChatCompletionRequestMessage>,
    pub temperature: f64,
    pub max_tokens: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChatCompletionRequestMessage {
    pub role: ChatRole,
    pub content: String,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    System,
    User,
}

/// The response envelope. Every field is optional because proxies and
/// relays may return an `error` object in place of the usual body.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateChatCompletionResponse {
    #[serde(default)]
    pub choices: Option<Vec<ChatCompletionChoice>>,
    #[serde(default)]
    pub error: Option<ApiError>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChatCompletionChoice {
    #[serde(default)]
    pub message: Option<ChatCompletionResponseMessage>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChatCompletionResponseMessage {
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub refusal: Option<String>,
}

/// Providers send `{"message": ...}`; the deployment proxy sends a bare
/// string for requests it rejects itself.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ApiError {
    Text(String),
    Object {
        #[serde(default)]
        message: Option<String>,
    },
}

impl ApiError {
    pub fn message(&self) -> Option<&str> {
        match self {
            Self::Text(message) => Some(message.as_str()),
            Self::Object { message } => message.as_deref(),
        }
    }
}
