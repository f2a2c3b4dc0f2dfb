use crate::{
    catalog,
    extract::parse_embedded,
    openai::{OpenAIChatModel, OpenAIChatModelOptions},
    opentelemetry::{trace_generation, GenerationKind},
    prompts, CategoryFilter, ChatInput, ChatModel, CodeBundle, Endpoint, FileArtifact,
    GenieError, GenieResult, Idea, SamplingParams,
};
use reqwest::Client;
use std::{collections::HashMap, sync::Arc};
use tracing::Span;
use tracing_opentelemetry::OpenTelemetrySpanExt;

pub const DEFAULT_MODEL_ID: &str = "gpt-3.5-turbo";
pub const RAW_RESPONSE_FILE_NAME: &str = "response.txt";

/// High temperature: ideas are meant to be surprising.
pub const IDEA_PARAMS: SamplingParams = SamplingParams {
    temperature: 1.0,
    max_tokens: 1000,
};

/// Near-deterministic, with room for several source files.
pub const CODE_PARAMS: SamplingParams = SamplingParams {
    temperature: 0.2,
    max_tokens: 4000,
};

/// Settings shared by every remote generation.
#[derive(Clone)]
pub struct GenieConfig {
    pub model_id: String,
    pub endpoint: Endpoint,
    pub idea_params: SamplingParams,
    pub code_params: SamplingParams,
    pub headers: HashMap<String, String>,
    pub client: Option<Client>,
}

impl Default for GenieConfig {
    fn default() -> Self {
        Self {
            model_id: DEFAULT_MODEL_ID.to_string(),
            endpoint: Endpoint::default(),
            idea_params: IDEA_PARAMS,
            code_params: CODE_PARAMS,
            headers: HashMap::new(),
            client: None,
        }
    }
}

/// How a generation request is served.
#[derive(Clone)]
pub enum GenerationMode {
    /// Offline: the built-in catalog and placeholder code.
    Sample,
    /// A chat-completion model with its sampling parameters.
    Remote {
        model: Arc<dyn ChatModel>,
        idea_params: SamplingParams,
        code_params: SamplingParams,
    },
}

impl GenerationMode {
    pub fn remote(model: Arc<dyn ChatModel>) -> Self {
        Self::Remote {
            model,
            idea_params: IDEA_PARAMS,
            code_params: CODE_PARAMS,
        }
    }

    /// Sample mode when `credential` is missing or blank, otherwise an
    /// `OpenAI` chat model configured from `config`.
    #[must_use]
    pub fn from_credential(credential: Option<&str>, config: &GenieConfig) -> Self {
        match credential.map(str::trim).filter(|key| !key.is_empty()) {
            None => Self::Sample,
            Some(api_key) => Self::Remote {
                model: Arc::new(OpenAIChatModel::new(
                    config.model_id.clone(),
                    OpenAIChatModelOptions {
                        endpoint: Some(config.endpoint.clone()),
                        api_key: api_key.to_string(),
                        headers: Some(config.headers.clone()),
                        client: config.client.clone(),
                    },
                )),
                idea_params: config.idea_params,
                code_params: config.code_params,
            },
        }
    }

    #[must_use]
    pub fn is_sample(&self) -> bool {
        matches!(self, Self::Sample)
    }
}

/// Produces one idea for `filter`, avoiding the titles in `history`.
pub async fn generate_idea(
    mode: &GenerationMode,
    filter: CategoryFilter,
    history: &[String],
) -> GenieResult<Idea> {
    let (model, params) = match mode {
        GenerationMode::Sample => {
            return Ok(catalog::sample_idea(
                &mut rand::thread_rng(),
                filter,
                history,
            ))
        }
        GenerationMode::Remote {
            model, idea_params, ..
        } => (model, *idea_params),
    };

    let input = ChatInput {
        system_prompt: prompts::idea_system_prompt(filter, history),
        user_prompt: prompts::IDEA_USER_PROMPT.to_string(),
        params,
    };

    trace_generation(
        GenerationKind::Idea,
        model.provider(),
        &model.model_id(),
        params,
        async move {
            let reply = model
                .complete(input)
                .await
                .map_err(|error| error.or_default_message("Error generating idea"))?;

            let idea: Idea = parse_embedded(&reply).map_err(|error| {
                GenieError::Parse(format!("Failed to parse idea from model reply: {error}"))
            })?;
            idea.validate().map_err(GenieError::Parse)?;
            Ok(idea)
        },
    )
    .await
}

/// Produces source files implementing `idea`.
///
/// A remote reply that holds no usable bundle is returned as a single
/// [`RAW_RESPONSE_FILE_NAME`] file containing the reply verbatim.
pub async fn generate_code(mode: &GenerationMode, idea: &Idea) -> GenieResult<CodeBundle> {
    let (model, params) = match mode {
        GenerationMode::Sample => return Ok(sample_code_bundle(idea)),
        GenerationMode::Remote {
            model, code_params, ..
        } => (model, *code_params),
    };

    let input = ChatInput {
        system_prompt: prompts::CODE_SYSTEM_PROMPT.to_string(),
        user_prompt: prompts::code_user_prompt(idea),
        params,
    };

    trace_generation(
        GenerationKind::Code,
        model.provider(),
        &model.model_id(),
        params,
        async move {
            let reply = model
                .complete(input)
                .await
                .map_err(|error| error.or_default_message("Error generating code"))?;

            let parsed = parse_embedded::<CodeBundle>(&reply)
                .and_then(|bundle| bundle.validate().map(|()| bundle));

            match parsed {
                Ok(bundle) => Ok(bundle),
                Err(error) => {
                    tracing::debug!(%error, "returning raw reply as a single file");
                    Span::current().set_attribute("genie_sdk.raw_fallback", true);
                    Ok(CodeBundle {
                        files: vec![FileArtifact::new(RAW_RESPONSE_FILE_NAME, reply)],
                    })
                }
            }
        },
    )
    .await
}

/// Placeholder files shown when no API key is configured.
#[must_use]
pub fn sample_code_bundle(idea: &Idea) -> CodeBundle {
    let title = &idea.title;
    CodeBundle {
        files: vec![
            FileArtifact::new(
                "index.html",
                format!(
                    r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8">
  <meta name="viewport" content="width=device-width, initial-scale=1.0">
  <title>{title}</title>
  <link rel="stylesheet" href="styles.css">
</head>
<body>
  <h1>Sample Code for {title}</h1>
  <p>This is a placeholder. Please provide an API key to generate real code.</p>
  <script src="script.js"></script>
</body>
</html>"#
                ),
            ),
            FileArtifact::new(
                "styles.css",
                format!(
                    "/* Styles for {title} */
body {{
  font-family: Arial, sans-serif;
  max-width: 800px;
  margin: 0 auto;
  padding: 20px;
}}

h1 {{
  color: #333;
}}"
                ),
            ),
            FileArtifact::new(
                "script.js",
                format!(
                    "// Sample code for {title}
console.log('Please provide an API key to generate real code');"
                ),
            ),
        ],
    }
}

/// Entry point taking the caller's credential on every call.
#[derive(Clone, Default)]
pub struct Genie {
    config: GenieConfig,
}

impl Genie {
    #[must_use]
    pub fn new(config: GenieConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub fn config(&self) -> &GenieConfig {
        &self.config
    }

    #[must_use]
    pub fn mode(&self, credential: Option<&str>) -> GenerationMode {
        GenerationMode::from_credential(credential, &self.config)
    }

    pub async fn generate_idea(
        &self,
        credential: Option<&str>,
        filter: CategoryFilter,
        history: &[String],
    ) -> GenieResult<Idea> {
        generate_idea(&self.mode(credential), filter, history).await
    }

    pub async fn generate_code(
        &self,
        idea: &Idea,
        credential: Option<&str>,
    ) -> GenieResult<CodeBundle> {
        generate_code(&self.mode(credential), idea).await
    }
}
