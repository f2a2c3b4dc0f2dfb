use crate::errors::{SlotError, SlotResult};
use std::{
    collections::BTreeMap,
    fs, io,
    path::{Path, PathBuf},
};

/// Key under which the provider credential is persisted.
pub const API_KEY: &str = "apiKey";

/// A small string key-value store persisted as one JSON object.
#[derive(Debug)]
pub struct KeyValueStore {
    path: PathBuf,
    values: BTreeMap<String, String>,
}

impl KeyValueStore {
    /// `$XDG_CONFIG_HOME/dollar-genie/store.json` or the platform
    /// equivalent.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("dollar-genie").join("store.json"))
    }

    /// Loads the store, starting empty when the file does not exist yet.
    pub fn open(path: impl Into<PathBuf>) -> SlotResult<Self> {
        let path = path.into();
        let values = match fs::read_to_string(&path) {
            Ok(text) if text.trim().is_empty() => BTreeMap::new(),
            Ok(text) => serde_json::from_str(&text).map_err(|source| SlotError::StoreFormat {
                path: path.clone(),
                source,
            })?,
            Err(error) if error.kind() == io::ErrorKind::NotFound => BTreeMap::new(),
            Err(source) => return Err(SlotError::Store { path, source }),
        };

        Ok(Self { path, values })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.insert(key.into(), value.into());
    }

    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.values.remove(key)
    }

    pub fn save(&self) -> SlotResult<()> {
        let store_error = |source| SlotError::Store {
            path: self.path.clone(),
            source,
        };

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(store_error)?;
        }
        let text = serde_json::to_string_pretty(&self.values).map_err(|source| {
            SlotError::StoreFormat {
                path: self.path.clone(),
                source,
            }
        })?;
        fs::write(&self.path, text).map_err(store_error)
    }
}

/// Shows enough of a key to recognise it without revealing it.
pub fn mask_key(key: &str) -> String {
    let chars: Vec<char> = key.chars().collect();
    if chars.len() <= 8 {
        return "*".repeat(chars.len());
    }
    let head: String = chars[..3].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{head}...{tail}")
}
