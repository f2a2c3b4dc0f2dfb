use serde::{Deserialize, Serialize};

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_RELAY_URL: &str = "https://cors-anywhere.herokuapp.com";
pub const DEFAULT_PROXY_PATH: &str = "/api";

/// Where chat-completion requests are sent.
///
/// Browser deployments cannot call the provider directly because of
/// cross-origin restrictions, so requests go either through a same-origin
/// proxy or through a public CORS relay. Local and server-side callers use
/// [`Endpoint::Direct`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "utoipa", derive(utoipa::ToSchema))]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum Endpoint {
    /// A proxy that accepts the chat-completion body unchanged.
    Proxy { url: String },
    /// A relay that forwards to the URL appended to its own.
    Relay {
        relay_url: String,
        upstream_url: String,
    },
    Direct { base_url: String },
}

impl Default for Endpoint {
    fn default() -> Self {
        Self::direct(DEFAULT_BASE_URL)
    }
}

impl Endpoint {
    pub fn direct(base_url: impl Into<String>) -> Self {
        Self::Direct {
            base_url: base_url.into(),
        }
    }

    pub fn proxy(url: impl Into<String>) -> Self {
        Self::Proxy { url: url.into() }
    }

    /// Relay in front of the default provider URL.
    pub fn relay(relay_url: impl Into<String>) -> Self {
        Self::Relay {
            relay_url: relay_url.into(),
            upstream_url: chat_completions_url(DEFAULT_BASE_URL),
        }
    }

    #[must_use]
    pub fn mode(&self) -> &'static str {
        match self {
            Self::Proxy { .. } => "proxy",
            Self::Relay { .. } => "relay",
            Self::Direct { .. } => "direct",
        }
    }

    #[must_use]
    pub fn url(&self) -> String {
        match self {
            Self::Proxy { url } => url.clone(),
            Self::Relay {
                relay_url,
                upstream_url,
            } => format!("{}/{}", relay_url.trim_end_matches('/'), upstream_url),
            Self::Direct { base_url } => chat_completions_url(base_url),
        }
    }
}

fn chat_completions_url(base_url: &str) -> String {
    format!("{}/chat/completions", base_url.trim_end_matches('/'))
}
