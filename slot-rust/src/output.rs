use crate::errors::{SlotError, SlotResult};
use genie_sdk::{CodeBundle, Idea};
use std::{
    fmt::Write as _,
    fs,
    path::{Component, Path, PathBuf},
};

pub fn render_idea(idea: &Idea) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "✨ {}", idea.title);
    if let Some(category) = idea.category {
        let _ = writeln!(out, "   [{}]", category.label());
    }
    let _ = writeln!(out, "\n{}", idea.description);

    if !idea.features.is_empty() {
        out.push_str("\nFeatures:\n");
        for feature in &idea.features {
            let _ = writeln!(out, "  • {feature}");
        }
    }
    if !idea.tech_stack.is_empty() {
        let _ = writeln!(out, "\nTech stack: {}", idea.tech_stack);
    }
    if !idea.api_cost.is_empty() {
        let _ = writeln!(out, "Estimated cost: {}", idea.api_cost);
    }
    if !idea.system_prompt.is_empty() {
        let _ = writeln!(out, "\nGeneration prompt:\n{}", idea.system_prompt);
    }
    out
}

/// Writes `idea` as pretty JSON so a later `build --idea` can pick it up.
pub fn save_idea(idea: &Idea, path: &Path) -> SlotResult<()> {
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|source| SlotError::Write {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    let mut json = serde_json::to_string_pretty(idea).map_err(|error| SlotError::IdeaFormat {
        path: path.to_path_buf(),
        reason: error.to_string(),
    })?;
    json.push('\n');
    fs::write(path, json).map_err(|source| SlotError::Write {
        path: path.to_path_buf(),
        source,
    })
}

/// Reads an idea saved by [`save_idea`] or written by hand.
pub fn load_idea(path: &Path) -> SlotResult<Idea> {
    let text = fs::read_to_string(path).map_err(|source| SlotError::IdeaFile {
        path: path.to_path_buf(),
        source,
    })?;
    let format_error = |reason: String| SlotError::IdeaFormat {
        path: path.to_path_buf(),
        reason,
    };

    let idea: Idea = serde_json::from_str(&text).map_err(|error| format_error(error.to_string()))?;
    idea.validate().map_err(format_error)?;
    Ok(idea)
}

/// Maps a generated file name onto a relative path that cannot leave the
/// output directory. Absolute prefixes and `..` segments are dropped.
pub fn safe_relative_path(name: &str) -> Option<PathBuf> {
    let path: PathBuf = Path::new(name.trim())
        .components()
        .filter_map(|component| match component {
            Component::Normal(part) => Some(part),
            _ => None,
        })
        .collect();

    if path.as_os_str().is_empty() {
        None
    } else {
        Some(path)
    }
}

/// Writes every file of `bundle` below `dir`, returning the written paths.
pub fn write_bundle(bundle: &CodeBundle, dir: &Path) -> SlotResult<Vec<PathBuf>> {
    let mut written = Vec::with_capacity(bundle.files.len());

    for (index, file) in bundle.files.iter().enumerate() {
        let relative = safe_relative_path(&file.name)
            .unwrap_or_else(|| PathBuf::from(format!("file-{}.txt", index + 1)));
        let path = dir.join(relative);

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|source| SlotError::Write {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        fs::write(&path, &file.content).map_err(|source| SlotError::Write {
            path: path.clone(),
            source,
        })?;
        tracing::debug!(path = %path.display(), bytes = file.content.len(), "wrote file");
        written.push(path);
    }

    Ok(written)
}
