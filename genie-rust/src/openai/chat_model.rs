use super::chat_api::{
    ChatCompletionRequestMessage, ChatRole, CreateChatCompletionRequest,
    CreateChatCompletionResponse,
};
use crate::{client_utils, ChatInput, ChatModel, Endpoint, GenieError, GenieResult};
use futures::future::BoxFuture;
use reqwest::{
    header::{self, HeaderMap, HeaderName, HeaderValue},
    Client,
};
use std::collections::HashMap;

const PROVIDER: &str = "openai";

/// A [`ChatModel`] backed by an `OpenAI`-compatible chat-completion
/// endpoint.
pub struct OpenAIChatModel {
    model_id: String,
    api_key: String,
    endpoint: Endpoint,
    client: Client,
    headers: HashMap<String, String>,
}

#[derive(Clone, Default)]
pub struct OpenAIChatModelOptions {
    pub endpoint: Option<Endpoint>,
    pub api_key: String,
    pub headers: Option<HashMap<String, String>>,
    /// Injected to configure timeouts or proxies; a default client sets no
    /// timeout of its own.
    pub client: Option<Client>,
}

impl OpenAIChatModel {
    #[must_use]
    pub fn new(model_id: impl Into<String>, options: OpenAIChatModelOptions) -> Self {
        let OpenAIChatModelOptions {
            endpoint,
            api_key,
            headers,
            client,
        } = options;

        Self {
            model_id: model_id.into(),
            api_key,
            endpoint: endpoint.unwrap_or_default(),
            client: client.unwrap_or_else(Client::new),
            headers: headers.unwrap_or_default(),
        }
    }

    #[must_use]
    pub fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }

    fn request_headers(&self) -> GenieResult<HeaderMap> {
        let mut headers = HeaderMap::new();

        let auth_header =
            HeaderValue::from_str(&format!("Bearer {}", self.api_key)).map_err(|error| {
                GenieError::InvalidInput(format!("Invalid API key header value: {error}"))
            })?;
        headers.insert(header::AUTHORIZATION, auth_header);

        for (key, value) in &self.headers {
            let header_name = HeaderName::from_bytes(key.as_bytes()).map_err(|error| {
                GenieError::InvalidInput(format!("Invalid header name '{key}': {error}"))
            })?;
            let header_value = HeaderValue::from_str(value).map_err(|error| {
                GenieError::InvalidInput(format!("Invalid header value for '{key}': {error}"))
            })?;
            headers.insert(header_name, header_value);
        }

        Ok(headers)
    }
}

impl ChatModel for OpenAIChatModel {
    fn provider(&self) -> &'static str {
        PROVIDER
    }

    fn model_id(&self) -> String {
        self.model_id.clone()
    }

    fn complete(&self, input: ChatInput) -> BoxFuture<'_, GenieResult<String>> {
        Box::pin(async move {
            let request = convert_to_openai_create_params(input, &self.model_id);
            let headers = self.request_headers()?;
            let url = self.endpoint.url();
            tracing::debug!(mode = self.endpoint.mode(), %url, "sending chat completion");

            let response: CreateChatCompletionResponse =
                client_utils::send_json(&self.client, &url, &request, headers, |body| {
                    serde_json::from_str::<CreateChatCompletionResponse>(body)
                        .ok()
                        .and_then(|envelope| envelope.error)
                        .and_then(|error| error.message().map(ToString::to_string))
                })
                .await?;

            map_openai_response(response)
        })
    }
}

fn convert_to_openai_create_params(
    input: ChatInput,
    model_id: &str,
) -> CreateChatCompletionRequest {
    CreateChatCompletionRequest {
        model: model_id.to_string(),
        messages: vec![
            ChatCompletionRequestMessage {
                role: ChatRole::System,
                content: input.system_prompt,
            },
            ChatCompletionRequestMessage {
                role: ChatRole::User,
                content: input.user_prompt,
            },
        ],
        temperature: input.params.temperature,
        max_tokens: input.params.max_tokens,
    }
}

fn map_openai_response(response: CreateChatCompletionResponse) -> GenieResult<String> {
    if let Some(error) = response.error {
        return Err(GenieError::Remote {
            status: None,
            message: error.message().unwrap_or_default().to_string(),
        });
    }

    let message = response
        .choices
        .unwrap_or_default()
        .into_iter()
        .next()
        .and_then(|choice| choice.message)
        .ok_or_else(|| GenieError::Protocol("No choices in response".to_string()))?;

    match message.content {
        Some(content) => Ok(content),
        None => match message.refusal.filter(|refusal| !refusal.is_empty()) {
            Some(refusal) => Err(GenieError::Remote {
                status: None,
                message: refusal,
            }),
            None => Err(GenieError::Protocol(
                "Response message has no content".to_string(),
            )),
        },
    }
}
