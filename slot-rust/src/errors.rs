use genie_sdk::GenieError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SlotError {
    #[error("Failed to generate idea: {0}")]
    Idea(#[source] GenieError),
    #[error("Failed to generate code: {0}")]
    Code(#[source] GenieError),
    #[error("Store error at {}: {source}", path.display())]
    Store {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Store file {} is not valid JSON: {source}", path.display())]
    StoreFormat {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("Could not write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Could not read idea file {}: {source}", path.display())]
    IdeaFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Idea file {} is not a valid idea: {reason}", path.display())]
    IdeaFormat { path: PathBuf, reason: String },
    #[error("Invalid configuration: {0}")]
    Config(String),
}

pub type SlotResult<T> = Result<T, SlotError>;
