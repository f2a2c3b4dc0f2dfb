use reqwest::StatusCode;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GenieError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    /// The request never produced a status code (connection refused, DNS,
    /// timeouts enforced by an injected client, ...).
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),
    /// The provider rejected the request, either with a non-success status
    /// or with an `error` object inside an otherwise successful envelope.
    #[error("{message}")]
    Remote {
        status: Option<StatusCode>,
        message: String,
    },
    /// The envelope returned by the endpoint could not be read as a
    /// chat-completion response.
    #[error("Protocol error: {0}")]
    Protocol(String),
    /// The generated text did not contain the expected JSON shape.
    #[error("Parse error: {0}")]
    Parse(String),
}

impl GenieError {
    /// The HTTP status attached to a remote failure, if any.
    #[must_use]
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Remote { status, .. } => *status,
            Self::Transport(error) => error.status(),
            _ => None,
        }
    }

    pub(crate) fn or_default_message(self, default: &str) -> Self {
        match self {
            Self::Remote { status, message } if message.trim().is_empty() => Self::Remote {
                status,
                message: default.to_string(),
            },
            other => other,
        }
    }
}

pub type GenieResult<T> = Result<T, GenieError>;
