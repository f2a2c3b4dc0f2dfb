use crate::GenieResult;
use futures::future::BoxFuture;
use serde::{Deserialize, Serialize};

/// Sampling parameters sent with a chat completion.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "utoipa", derive(utoipa::ToSchema))]
pub struct SamplingParams {
    pub temperature: f64,
    pub max_tokens: u32,
}

/// A single-turn request: one system instruction and one user message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatInput {
    pub system_prompt: String,
    pub user_prompt: String,
    pub params: SamplingParams,
}

/// A chat-completion backend that turns a [`ChatInput`] into the text of the
/// model's reply.
pub trait ChatModel: Send + Sync {
    fn provider(&self) -> &'static str;
    fn model_id(&self) -> String;
    fn complete(&self, input: ChatInput) -> BoxFuture<'_, GenieResult<String>>;
}
