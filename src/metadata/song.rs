// Song record: one audio file's editable metadata snapshot
use serde_json::{Map, Value};
use std::fmt;
use std::path::{Path, PathBuf};

use super::fields::Field;

/// Identity key grouping versions of the same song: `title|artist|coverartist`
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SongIdentity(String);

impl SongIdentity {
    pub fn new(title: &str, artist: &str, cover_artist: &str) -> Self {
        Self(format!("{}|{}|{}", title, artist, cover_artist))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SongIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Immutable metadata snapshot for one file.
///
/// Holds the raw embedded JSON object so keys outside [`Field`] stay
/// reachable, plus any non-JSON text that preceded it in the comment.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SongRecord {
    path: PathBuf,
    data: Map<String, Value>,
    prefix: String,
}

impl SongRecord {
    pub fn new(path: impl Into<PathBuf>, data: Map<String, Value>) -> Self {
        Self {
            path: path.into(),
            data,
            prefix: String::new(),
        }
    }

    /// Build from any JSON value; non-objects produce an empty record
    pub fn from_value(path: impl Into<PathBuf>, value: Value) -> Self {
        match value {
            Value::Object(map) => Self::new(path, map),
            _ => Self::new(path, Map::new()),
        }
    }

    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn raw_data(&self) -> &Map<String, Value> {
        &self.data
    }

    pub fn has_metadata(&self) -> bool {
        !self.data.is_empty()
    }

    /// Title, falling back to the file stem when missing or empty
    pub fn title(&self) -> String {
        let title = self.json_text("Title");
        if !title.is_empty() {
            return title;
        }
        self.path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    pub fn artist(&self) -> String {
        self.json_text("Artist")
    }

    pub fn cover_artist(&self) -> String {
        self.json_text("CoverArtist")
    }

    pub fn disc(&self) -> String {
        self.json_text("Discnumber")
    }

    pub fn track(&self) -> String {
        self.json_text("Track")
    }

    pub fn date(&self) -> String {
        self.json_text("Date")
    }

    pub fn comment(&self) -> String {
        self.json_text("Comment")
    }

    pub fn special(&self) -> String {
        self.json_text("Special")
    }

    /// Numeric version; 0 when absent or unparseable
    pub fn version(&self) -> f64 {
        let parsed = match self.data.get("Version") {
            Some(Value::Number(n)) => n.as_f64(),
            Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
            _ => None,
        };
        parsed.filter(|v| v.is_finite()).unwrap_or(0.0)
    }

    /// Version for display: `2.0` shows as `2`, `2.5` stays `2.5`
    pub fn version_str(&self) -> String {
        format_number(self.version())
    }

    /// Version text as written in the source data, `"0"` when absent.
    ///
    /// Unlike [`version`](Self::version) this keeps strings such as `"1.10"`
    /// or `"v3"` intact for component-wise comparison.
    pub fn raw_version(&self) -> String {
        match self.data.get("Version") {
            None | Some(Value::Null) => "0".to_string(),
            Some(Value::Number(n)) => match n.as_f64() {
                Some(v) if n.is_f64() => format_number(v),
                _ => n.to_string(),
            },
            Some(other) => value_to_string(other),
        }
    }

    /// File name of the record's path
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    pub fn identity(&self) -> SongIdentity {
        SongIdentity::new(&self.title(), &self.artist(), &self.cover_artist())
    }

    pub fn field(&self, field: Field) -> String {
        match field {
            Field::Title => self.title(),
            Field::Artist => self.artist(),
            Field::CoverArtist => self.cover_artist(),
            Field::Version => self.version_str(),
            Field::Disc => self.disc(),
            Field::Track => self.track(),
            Field::Date => self.date(),
            Field::Comment => self.comment(),
            Field::Special => self.special(),
            Field::File => self.file_name(),
        }
    }

    /// Look up a field by name. Never fails: unknown names fall back to the
    /// raw JSON key, and anything missing is the empty string.
    pub fn get(&self, name: &str) -> String {
        match Field::parse(name) {
            Some(field) => self.field(field),
            None => self.json_text(name),
        }
    }

    fn json_text(&self, key: &str) -> String {
        self.data.get(key).map(value_to_string).unwrap_or_default()
    }
}

/// Render a JSON value the way it is displayed in the editor
pub(crate) fn value_to_string(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn format_number(v: f64) -> String {
    if v.fract() == 0.0 && v.abs() < 1e15 {
        format!("{}", v as i64)
    } else {
        format!("{}", v)
    }
}
