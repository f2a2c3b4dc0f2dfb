use crate::{
    errors::{SlotError, SlotResult},
    store::{KeyValueStore, API_KEY},
};
use clap::{Args, ValueEnum};
use genie_sdk::{
    CategoryFilter, Endpoint, GenieConfig, DEFAULT_BASE_URL, DEFAULT_MODEL_ID,
    DEFAULT_PROXY_PATH, DEFAULT_RELAY_URL,
};
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum EndpointMode {
    /// Call the provider directly
    Direct,
    /// Go through a public CORS relay
    Relay,
    /// Go through a deployment proxy
    Proxy,
}

#[derive(Debug, Clone, Args)]
pub struct GlobalArgs {
    /// Idea category: all, personal, work, productivity, entertainment, utility
    #[arg(short, long, global = true, default_value = "all")]
    pub category: CategoryFilter,

    /// Provider API key; falls back to the stored key
    #[arg(long, global = true, env = "OPENAI_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Chat model identifier
    #[arg(long, global = true, env = "GENIE_MODEL", default_value = DEFAULT_MODEL_ID)]
    pub model: String,

    /// How requests reach the provider
    #[arg(long, global = true, value_enum, default_value = "direct")]
    pub endpoint: EndpointMode,

    /// Provider base URL for direct mode
    #[arg(long, global = true, env = "GENIE_BASE_URL", default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// Relay prefix for relay mode
    #[arg(long, global = true, default_value = DEFAULT_RELAY_URL)]
    pub relay_url: String,

    /// Full proxy URL for proxy mode, e.g. https://my-app.example.com/api
    #[arg(long, global = true, env = "GENIE_PROXY_URL")]
    pub proxy_url: Option<String>,

    /// Credential store location
    #[arg(long, global = true, env = "GENIE_STORE")]
    pub store: Option<PathBuf>,
}

impl GlobalArgs {
    pub fn endpoint(&self) -> SlotResult<Endpoint> {
        match self.endpoint {
            EndpointMode::Direct => Ok(Endpoint::direct(self.base_url.clone())),
            EndpointMode::Relay => Ok(Endpoint::Relay {
                relay_url: self.relay_url.clone(),
                upstream_url: Endpoint::direct(self.base_url.clone()).url(),
            }),
            EndpointMode::Proxy => self
                .proxy_url
                .clone()
                .map(Endpoint::proxy)
                .ok_or_else(|| {
                    SlotError::Config(format!(
                        "--proxy-url is required in proxy mode (the proxy is usually served at {DEFAULT_PROXY_PATH})"
                    ))
                }),
        }
    }

    pub fn genie_config(&self) -> SlotResult<GenieConfig> {
        Ok(GenieConfig {
            model_id: self.model.clone(),
            endpoint: self.endpoint()?,
            ..GenieConfig::default()
        })
    }

    pub fn store_path(&self) -> SlotResult<PathBuf> {
        self.store
            .clone()
            .or_else(KeyValueStore::default_path)
            .ok_or_else(|| {
                SlotError::Config(
                    "No config directory found; pass --store to choose a store file".to_string(),
                )
            })
    }

    pub fn open_store(&self) -> SlotResult<KeyValueStore> {
        KeyValueStore::open(self.store_path()?)
    }

    /// The key from the flag or environment, else the stored one.
    pub fn credential(&self) -> SlotResult<Option<String>> {
        if let Some(key) = self.api_key.as_deref().map(str::trim) {
            if !key.is_empty() {
                return Ok(Some(key.to_string()));
            }
        }
        let store = self.open_store()?;
        Ok(store.get(API_KEY).map(ToString::to_string))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser)]
    struct TestCli {
        #[command(flatten)]
        global: GlobalArgs,
    }

    fn parse(args: &[&str]) -> GlobalArgs {
        let mut argv = vec!["genie-slot"];
        argv.extend_from_slice(args);
        TestCli::parse_from(argv).global
    }

    #[test]
    fn relay_wraps_base_url() {
        let args = parse(&["--endpoint", "relay", "--base-url", "https://api.example.com/v1"]);
        assert_eq!(
            args.endpoint().unwrap().url(),
            format!("{DEFAULT_RELAY_URL}/https://api.example.com/v1/chat/completions")
        );
    }

    #[test]
    fn proxy_requires_url() {
        let args = parse(&["--endpoint", "proxy"]);
        assert!(matches!(args.endpoint(), Err(SlotError::Config(_))));

        let args = parse(&["--endpoint", "proxy", "--proxy-url", "https://genie.example.com/api"]);
        assert_eq!(
            args.endpoint().unwrap(),
            Endpoint::proxy("https://genie.example.com/api")
        );
    }

    #[test]
    fn flag_key_wins_over_store() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");
        let mut store = KeyValueStore::open(&path).unwrap();
        store.set(API_KEY, "sk-stored");
        store.save().unwrap();

        let store_arg = path.to_str().unwrap();
        let args = parse(&["--store", store_arg, "--api-key", "sk-flag"]);
        assert_eq!(args.credential().unwrap().as_deref(), Some("sk-flag"));

        let args = parse(&["--store", store_arg, "--api-key", "  "]);
        assert_eq!(args.credential().unwrap().as_deref(), Some("sk-stored"));
    }

    #[test]
    fn category_parses_from_flag() {
        let args = parse(&["--category", "entertainment"]);
        assert_eq!(args.category.to_string(), "entertainment");
    }
}
