use crate::{GenieError, GenieResult};
use reqwest::Client;
use serde::{de::DeserializeOwned, Serialize};

/// Create a JSON request, parse the response.
/// Non-success statuses become [`GenieError::Remote`]; `error_message`
/// extracts a provider message from the error body when it has one.
pub async fn send_json<T, R>(
    client: &Client,
    url: &str,
    data: &T,
    headers: reqwest::header::HeaderMap,
    error_message: impl FnOnce(&str) -> Option<String>,
) -> GenieResult<R>
where
    T: Serialize,
    R: DeserializeOwned,
{
    let response = client.post(url).headers(headers).json(data).send().await?;
    let status = response.status();

    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        tracing::debug!(%status, body = %body, "chat completion request failed");
        let message = error_message(&body).unwrap_or_else(|| format!("API error: {status}"));
        return Err(GenieError::Remote {
            status: Some(status),
            message,
        });
    }

    let body = response.text().await?;
    serde_json::from_str(&body).map_err(|error| {
        tracing::debug!(body = %body, "response body is not JSON");
        GenieError::Protocol(format!("Failed to parse API response as JSON: {error}"))
    })
}
