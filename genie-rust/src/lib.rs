mod catalog;
mod chat_model;
mod client_utils;
mod endpoint;
mod errors;
mod extract;
mod generator;
pub mod genie_sdk_test;
pub mod openai;
mod opentelemetry;
mod prompts;
mod session;
mod types;

pub use catalog::{sample_idea, SampleIdea, SAMPLE_IDEAS};
pub use chat_model::{ChatInput, ChatModel, SamplingParams};
pub use endpoint::{Endpoint, DEFAULT_BASE_URL, DEFAULT_PROXY_PATH, DEFAULT_RELAY_URL};
pub use errors::*;
pub use extract::{extract_json_object, parse_embedded};
pub use generator::{
    generate_code, generate_idea, sample_code_bundle, GenerationMode, Genie, GenieConfig,
    CODE_PARAMS, DEFAULT_MODEL_ID, IDEA_PARAMS, RAW_RESPONSE_FILE_NAME,
};
pub use session::Session;
pub use types::*;
