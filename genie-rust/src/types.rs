use serde::{de::Error as _, Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::{fmt, str::FromStr};

/// The domain an idea belongs to.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "utoipa", derive(utoipa::ToSchema))]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Personal,
    Work,
    Productivity,
    Entertainment,
    Utility,
}

impl Category {
    pub const ALL: [Self; 5] = [
        Self::Personal,
        Self::Work,
        Self::Productivity,
        Self::Entertainment,
        Self::Utility,
    ];

    #[must_use]
    pub fn id(self) -> &'static str {
        match self {
            Self::Personal => "personal",
            Self::Work => "work",
            Self::Productivity => "productivity",
            Self::Entertainment => "entertainment",
            Self::Utility => "utility",
        }
    }

    /// Human readable name shown in category pickers.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Personal => "Personal Development",
            Self::Work => "Work Automation",
            Self::Productivity => "Productivity",
            Self::Entertainment => "Entertainment",
            Self::Utility => "Utility",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|category| category.id() == normalized)
            .ok_or_else(|| format!("Unknown category '{s}'"))
    }
}

/// Narrows which categories an idea may be drawn from.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(try_from = "String", into = "String")]
pub enum CategoryFilter {
    #[default]
    All,
    Only(Category),
}

impl CategoryFilter {
    #[must_use]
    pub fn matches(self, category: Option<Category>) -> bool {
        match self {
            Self::All => true,
            Self::Only(expected) => category == Some(expected),
        }
    }

    #[must_use]
    pub fn category(self) -> Option<Category> {
        match self {
            Self::All => None,
            Self::Only(category) => Some(category),
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::All => "All Categories",
            Self::Only(category) => category.label(),
        }
    }
}

impl From<Category> for CategoryFilter {
    fn from(category: Category) -> Self {
        Self::Only(category)
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str("all"),
            Self::Only(category) => category.fmt(f),
        }
    }
}

impl FromStr for CategoryFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            Ok(Self::All)
        } else {
            s.parse().map(Self::Only)
        }
    }
}

impl TryFrom<String> for CategoryFilter {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<CategoryFilter> for String {
    fn from(filter: CategoryFilter) -> Self {
        filter.to_string()
    }
}

/// A generated software idea.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[cfg_attr(feature = "utoipa", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct Idea {
    pub title: String,
    pub description: String,
    #[serde(default, deserialize_with = "lenient_features")]
    pub features: Vec<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub tech_stack: String,
    /// Models occasionally invent categories; those are treated as unset.
    #[serde(
        default,
        deserialize_with = "lenient_category",
        skip_serializing_if = "Option::is_none"
    )]
    pub category: Option<Category>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub api_cost: String,
    /// Detailed instructions for a code generator to build this idea.
    #[serde(default, deserialize_with = "lenient_text")]
    pub system_prompt: String,
}

impl Idea {
    /// Checks the fields every caller relies on being present.
    pub fn validate(&self) -> Result<(), String> {
        if self.title.trim().is_empty() {
            return Err("Idea title must not be empty".to_string());
        }
        if self.description.trim().is_empty() {
            return Err("Idea description must not be empty".to_string());
        }
        Ok(())
    }
}

fn lenient_category<'de, D>(deserializer: D) -> Result<Option<Category>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.and_then(|value| value.parse().ok()))
}

fn value_to_text(value: Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(text) => text,
        other => other.to_string(),
    }
}

/// `null` becomes empty and scalars such as `"apiCost": 0.5` become text.
fn lenient_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(value_to_text)
}

/// Accepts `null`, a single string, or a list of scalars.
fn lenient_features<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Null => Ok(Vec::new()),
        Value::String(feature) if feature.trim().is_empty() => Ok(Vec::new()),
        Value::String(feature) => Ok(vec![feature]),
        Value::Array(items) => Ok(items
            .into_iter()
            .filter(|item| !item.is_null())
            .map(value_to_text)
            .collect()),
        Value::Object(_) => Err(D::Error::custom("features must be a list of strings")),
        other => Ok(vec![value_to_text(other)]),
    }
}

/// A single generated source file.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[cfg_attr(feature = "utoipa", derive(utoipa::ToSchema))]
pub struct FileArtifact {
    /// File name including its extension.
    pub name: String,
    pub content: String,
}

impl FileArtifact {
    pub fn new(name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            content: content.into(),
        }
    }
}

/// The set of files generated for an idea.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[cfg_attr(feature = "utoipa", derive(utoipa::ToSchema))]
pub struct CodeBundle {
    pub files: Vec<FileArtifact>,
}

impl CodeBundle {
    pub fn validate(&self) -> Result<(), String> {
        if self.files.is_empty() {
            return Err("Code bundle must contain at least one file".to_string());
        }
        if let Some(index) = self.files.iter().position(|f| f.name.trim().is_empty()) {
            return Err(format!("File at index {index} has an empty name"));
        }
        Ok(())
    }
}
