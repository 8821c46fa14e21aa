// Search query parsing and record filtering
use regex::Regex;
use std::cmp::Ordering;
use std::fmt;
use std::sync::OnceLock;

use crate::library::versions::VersionIndex;
use crate::metadata::{Field, SongRecord};

/// `field op value`, value optionally single- or double-quoted
fn get_filter_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| {
        Regex::new(r#"\b([A-Za-z_]+)\s*(==|!=|>=|<=|!~|=|~|>|<)\s*(?:"([^"]*)"|'([^']*)'|(\S+))"#).unwrap()
    })
}

/// Comparison used by a structured filter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterOp {
    /// `=` or `~`
    Contains,
    /// `!~`
    NotContains,
    /// `==`
    Equals,
    /// `!=`
    NotEquals,
    Greater,
    GreaterOrEqual,
    Less,
    LessOrEqual,
}

impl FilterOp {
    pub fn parse(symbol: &str) -> Option<Self> {
        match symbol {
            "=" | "~" => Some(FilterOp::Contains),
            "!~" => Some(FilterOp::NotContains),
            "==" => Some(FilterOp::Equals),
            "!=" => Some(FilterOp::NotEquals),
            ">" => Some(FilterOp::Greater),
            ">=" => Some(FilterOp::GreaterOrEqual),
            "<" => Some(FilterOp::Less),
            "<=" => Some(FilterOp::LessOrEqual),
            _ => None,
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            FilterOp::Contains => "=",
            FilterOp::NotContains => "!~",
            FilterOp::Equals => "==",
            FilterOp::NotEquals => "!=",
            FilterOp::Greater => ">",
            FilterOp::GreaterOrEqual => ">=",
            FilterOp::Less => "<",
            FilterOp::LessOrEqual => "<=",
        }
    }
}

/// One `field op value` term of a query
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchFilter {
    pub field: Field,
    pub op: FilterOp,
    pub value: String,
}

impl SearchFilter {
    /// `version=latest` style filters test latest-version status instead of
    /// text. Returns the wanted status, or None for an ordinary filter.
    fn latest_predicate(&self) -> Option<bool> {
        if self.field != Field::Version || !self.value.eq_ignore_ascii_case("latest") {
            return None;
        }
        match self.op {
            FilterOp::Contains | FilterOp::Equals => Some(true),
            FilterOp::NotContains | FilterOp::NotEquals => Some(false),
            _ => None,
        }
    }

    pub fn matches(&self, record: &SongRecord, versions: &VersionIndex) -> bool {
        if let Some(want) = self.latest_predicate() {
            return versions.is_latest(record) == want;
        }

        let actual = record.field(self.field).to_lowercase();
        let expected = self.value.to_lowercase();

        match self.op {
            FilterOp::Contains => actual.contains(&expected),
            FilterOp::NotContains => !actual.contains(&expected),
            FilterOp::Equals => compare_values(&actual, &expected) == Ordering::Equal,
            FilterOp::NotEquals => compare_values(&actual, &expected) != Ordering::Equal,
            FilterOp::Greater => compare_values(&actual, &expected) == Ordering::Greater,
            FilterOp::GreaterOrEqual => compare_values(&actual, &expected) != Ordering::Less,
            FilterOp::Less => compare_values(&actual, &expected) == Ordering::Less,
            FilterOp::LessOrEqual => compare_values(&actual, &expected) != Ordering::Greater,
        }
    }
}

impl fmt::Display for SearchFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.field.name(), self.op.symbol(), self.value)
    }
}

/// Numeric when both sides parse as numbers, text otherwise
fn compare_values(actual: &str, expected: &str) -> Ordering {
    match (actual.trim().parse::<f64>(), expected.trim().parse::<f64>()) {
        (Ok(a), Ok(b)) => a.partial_cmp(&b).unwrap_or(Ordering::Equal),
        _ => actual.cmp(expected),
    }
}

/// A search box query split into structured filters and free-text terms
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedQuery {
    pub filters: Vec<SearchFilter>,
    pub free_terms: Vec<String>,
}

impl ParsedQuery {
    pub fn is_empty(&self) -> bool {
        self.filters.is_empty() && self.free_terms.is_empty()
    }

    /// All filters and all free terms must match
    pub fn matches(&self, record: &SongRecord, versions: &VersionIndex) -> bool {
        if !self.filters.iter().all(|f| f.matches(record, versions)) {
            return false;
        }
        if self.free_terms.is_empty() {
            return true;
        }
        let haystack = search_text(record);
        self.free_terms.iter().all(|term| haystack.contains(term.as_str()))
    }

    /// `artist = neuro, 'karaoke'`
    pub fn describe(&self) -> String {
        self.filters
            .iter()
            .map(|f| f.to_string())
            .chain(self.free_terms.iter().map(|t| format!("'{}'", t)))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Parse a query such as `artist=neuro version>2 "duet"`.
///
/// Only known field names become filters; anything else, including a
/// `name=value` pair with an unknown name, is kept as free text.
pub fn parse_query(text: &str) -> ParsedQuery {
    let mut filters = Vec::new();
    let mut remaining = String::with_capacity(text.len());
    let mut last = 0;

    for caps in get_filter_regex().captures_iter(text) {
        let (Some(whole), Some(name), Some(symbol)) = (caps.get(0), caps.get(1), caps.get(2)) else {
            continue;
        };
        let (Some(field), Some(op)) = (Field::parse(name.as_str()), FilterOp::parse(symbol.as_str())) else {
            continue;
        };
        let value = caps
            .get(3)
            .or_else(|| caps.get(4))
            .or_else(|| caps.get(5))
            .map(|m| m.as_str())
            .unwrap_or_default();

        remaining.push_str(&text[last..whole.start()]);
        remaining.push(' ');
        last = whole.end();

        filters.push(SearchFilter {
            field,
            op,
            value: value.to_string(),
        });
    }
    remaining.push_str(&text[last..]);

    let free_terms = remaining
        .split_whitespace()
        .map(|term| term.trim_matches(|c: char| c == '"' || c == '\''))
        .filter(|term| !term.is_empty())
        .map(str::to_lowercase)
        .collect();

    ParsedQuery { filters, free_terms }
}

/// Lowercased display values that free-text terms search
pub fn search_text(record: &SongRecord) -> String {
    Field::ALL
        .iter()
        .map(|field| record.field(*field))
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Records matching the query, in input order
pub fn filter_records<'a>(
    records: &'a [SongRecord],
    query: &ParsedQuery,
    versions: &VersionIndex,
) -> Vec<&'a SongRecord> {
    records
        .iter()
        .filter(|record| query.matches(record, versions))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    fn song(name: &str, data: Value) -> SongRecord {
        SongRecord::from_value(format!("/music/{}.mp3", name), data)
    }

    fn library() -> Vec<SongRecord> {
        vec![
            song("a", json!({"Title": "Life", "Artist": "Neuro", "Version": 1, "Discnumber": "2"})),
            song("b", json!({"Title": "Life", "Artist": "Neuro", "Version": 2, "Discnumber": "10"})),
            song("c", json!({"Title": "Duet Song", "Artist": "Evil", "Version": 1})),
            song("d", json!({"Title": "Karaoke", "Artist": "Neuro x Evil", "Comment": "Live"})),
        ]
    }

    fn found(query: &str) -> Vec<String> {
        let records = library();
        let index = VersionIndex::resolve(&records);
        filter_records(&records, &parse_query(query), &index)
            .iter()
            .map(|r| r.file_name().replace(".mp3", ""))
            .collect()
    }

    #[test]
    fn test_parse_filters_and_terms() {
        let q = parse_query(r#"artist=Neuro version >= 2 "duet" Live title~'Life Song'"#);
        assert_eq!(q.filters.len(), 3);
        assert_eq!(q.filters[0].field, Field::Artist);
        assert_eq!(q.filters[0].op, FilterOp::Contains);
        assert_eq!(q.filters[1].op, FilterOp::GreaterOrEqual);
        assert_eq!(q.filters[1].value, "2");
        assert_eq!(q.filters[2].value, "Life Song");
        assert_eq!(q.free_terms, vec!["duet", "live"]);
    }

    #[test]
    fn test_unknown_field_stays_free_text() {
        let q = parse_query("album=Best");
        assert!(q.filters.is_empty());
        assert_eq!(q.free_terms, vec!["album=best"]);
    }

    #[test]
    fn test_empty_query_matches_everything() {
        assert!(parse_query("   ").is_empty());
        assert_eq!(found(""), vec!["a", "b", "c", "d"]);
    }

    #[test]
    fn test_contains_is_case_insensitive() {
        assert_eq!(found("artist=neuro"), vec!["a", "b", "d"]);
        assert_eq!(found("artist!~neuro"), vec!["c"]);
    }

    #[test]
    fn test_equality_and_numeric_comparison() {
        assert_eq!(found("artist==neuro"), vec!["a", "b"]);
        assert_eq!(found("disc>2"), vec!["b"]);
        assert_eq!(found("disc>=2"), vec!["a", "b"]);
        // Blank discs compare as text and sort below any digit
        assert_eq!(found("disc<2"), vec!["c", "d"]);
        assert_eq!(found("version!=1"), vec!["b", "d"]);
    }

    #[test]
    fn test_free_terms_all_must_match() {
        assert_eq!(found("life"), vec!["a", "b"]);
        assert_eq!(found("neuro live"), vec!["d"]);
        assert_eq!(found("c.mp3"), vec!["c"]);
    }

    #[test]
    fn test_filters_and_free_terms_must_both_match() {
        let records = vec![
            song("neuro", json!({"Title": "Special Contents", "Artist": "Neuro"})),
            song("evil", json!({"Title": "Special Contents", "Artist": "Evil"})),
        ];
        let index = VersionIndex::resolve(&records);
        let count = |q: &str| filter_records(&records, &parse_query(q), &index).len();

        assert_eq!(count("artist=Neuro special contents"), 1);
        assert_eq!(count("artist=Evil2 special contents"), 0);
        assert_eq!(count("artist=Neuro missing"), 0);
    }

    #[test]
    fn test_version_latest_filter() {
        assert_eq!(found("version=latest"), vec!["b", "c", "d"]);
        assert_eq!(found("version!=latest"), vec!["a"]);
    }

    #[test]
    fn test_filtering_subset_and_order() {
        let all = found("");
        let some = found("artist=neuro life");
        assert!(some.iter().all(|name| all.contains(name)));
        assert_eq!(some, vec!["a", "b"]);
    }

    #[test]
    fn test_describe() {
        let q = parse_query("artist=Neuro duet");
        assert_eq!(q.describe(), "artist = Neuro, 'duet'");
    }
}
