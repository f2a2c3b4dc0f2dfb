use serde::de::DeserializeOwned;
use serde_json::Value;

/// Finds a JSON object embedded in free-form model output.
///
/// The span between the first `{` and the last `}` is tried first, which
/// covers replies like `Sure! {...} Enjoy.` and fenced code blocks. If that
/// span is not valid JSON, each `{` is scanned for a balanced object,
/// skipping braces inside string literals, and the first one that parses is
/// returned.
#[must_use]
pub fn extract_json_object(text: &str) -> Option<&str> {
    candidates(text).find(|candidate| is_json_object(candidate))
}

/// Parses `text` as `T`. When the whole reply is not a `T`, the embedded
/// objects are tried in the order [`extract_json_object`] visits them and
/// the first one that deserializes as `T` wins.
pub fn parse_embedded<T: DeserializeOwned>(text: &str) -> Result<T, String> {
    let direct_error = match serde_json::from_str::<T>(text.trim()) {
        Ok(value) => return Ok(value),
        Err(error) => error,
    };

    let mut shape_error = None;
    for candidate in candidates(text).filter(|candidate| is_json_object(candidate)) {
        match serde_json::from_str::<T>(candidate) {
            Ok(value) => return Ok(value),
            Err(error) => {
                shape_error.get_or_insert(error);
            }
        }
    }

    match shape_error {
        Some(error) => Err(format!(
            "Embedded JSON does not match the expected shape: {error}"
        )),
        None => Err(format!("No JSON object found in reply ({direct_error})")),
    }
}

/// The greedy first-to-last brace span, then every balanced object in
/// order of its opening brace.
fn candidates(text: &str) -> impl Iterator<Item = &str> {
    let greedy = match (text.find('{'), text.rfind('}')) {
        (Some(start), Some(end)) if end > start => Some(&text[start..=end]),
        _ => None,
    };

    greedy.into_iter().chain(
        text.match_indices('{')
            .filter_map(|(index, _)| balanced_object_at(text, index)),
    )
}

fn is_json_object(candidate: &str) -> bool {
    matches!(serde_json::from_str::<Value>(candidate), Ok(Value::Object(_)))
}

fn balanced_object_at(text: &str, start: usize) -> Option<&str> {
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (offset, ch) in text[start..].char_indices() {
        if in_string {
            if escaped {
                escaped = false;
            } else if ch == '\\' {
                escaped = true;
            } else if ch == '"' {
                in_string = false;
            }
            continue;
        }

        match ch {
            '"' => in_string = true,
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(&text[start..=start + offset]);
                }
            }
            _ => {}
        }
    }

    None
}
