// Embedded JSON metadata stored in the audio file's comment frame
use regex::Regex;
use serde_json::{Map, Value};
use std::sync::OnceLock;

/// JSON object pulled out of a comment, plus the free text that preceded it
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EmbeddedMetadata {
    pub data: Map<String, Value>,
    pub prefix: String,
}

fn get_json_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    // Outermost brace span, across newlines
    REGEX.get_or_init(|| Regex::new(r"(?s)\{.*\}").unwrap())
}

/// Parse every comment text attached to a file.
///
/// Objects from several comments are merged in order, later keys winning.
/// The prefix is taken from the first comment that carried JSON. Returns
/// `None` when no comment holds a JSON object.
pub fn parse_comment_texts<I, S>(texts: I) -> Option<EmbeddedMetadata>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut found: Option<EmbeddedMetadata> = None;

    for text in texts {
        let text = text.as_ref();
        let Some(m) = get_json_regex().find(text) else {
            continue;
        };
        let object = match serde_json::from_str::<Value>(m.as_str()) {
            Ok(Value::Object(object)) => object,
            Ok(_) => continue,
            Err(e) => {
                tracing::debug!("Skipping comment with invalid JSON: {}", e);
                continue;
            }
        };

        let entry = found.get_or_insert_with(|| EmbeddedMetadata {
            data: Map::new(),
            prefix: text[..m.start()].to_string(),
        });
        entry.data.extend(object);
    }

    found
}

/// Compose the comment text written back to a file: the prefix verbatim,
/// then the compact JSON object.
pub fn compose_comment(prefix: &str, data: &Map<String, Value>) -> String {
    // Serializing a map of JSON values cannot fail
    let json = serde_json::to_string(data).unwrap_or_else(|_| "{}".to_string());
    format!("{}{}", prefix, json)
}
