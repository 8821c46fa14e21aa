// Library view: search filter, then multi-level sort
pub mod search;
pub mod sort;

pub use search::{filter_records, parse_query, FilterOp, ParsedQuery, SearchFilter};
pub use sort::{sort_records, SortOrder, SortRule, SortRules, DEFAULT_MAX_SORT_RULES};

use crate::library::versions::VersionIndex;
use crate::metadata::SongRecord;

/// Rows shown in the song list, with the query that selected them
#[derive(Debug, Clone)]
pub struct View<'a> {
    pub rows: Vec<&'a SongRecord>,
    pub query: ParsedQuery,
}

impl View<'_> {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Status line, e.g. `3 songs found | artist = neuro, 'duet'`
    pub fn summary(&self) -> String {
        let mut out = format!("{} songs found", self.rows.len());
        if !self.query.is_empty() {
            out.push_str(" | ");
            out.push_str(&self.query.describe());
        }
        out
    }
}

/// Filter `records` by `query_text`, then sort the survivors
pub fn apply_view<'a>(
    records: &'a [SongRecord],
    query_text: &str,
    sort_rules: &[SortRule],
    versions: &VersionIndex,
) -> View<'a> {
    let query = parse_query(query_text);
    let rows = sort::sort_refs(filter_records(records, &query, versions), sort_rules);
    tracing::debug!("View: {} of {} songs", rows.len(), records.len());
    View { rows, query }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_apply_view_filters_then_sorts() {
        let records = vec![
            SongRecord::from_value("/m/1.mp3", json!({"Title": "Zed", "Artist": "Neuro"})),
            SongRecord::from_value("/m/2.mp3", json!({"Title": "Alpha", "Artist": "Evil"})),
            SongRecord::from_value("/m/3.mp3", json!({"Title": "Beta", "Artist": "Neuro"})),
        ];
        let index = VersionIndex::resolve(&records);
        let view = apply_view(&records, "artist=neuro", &[SortRule::asc("title")], &index);

        let titles: Vec<_> = view.rows.iter().map(|r| r.title()).collect();
        assert_eq!(titles, vec!["Beta", "Zed"]);
        assert_eq!(view.summary(), "2 songs found | artist = neuro");
    }

    #[test]
    fn test_summary_without_query() {
        let records = vec![SongRecord::from_value("/m/1.mp3", json!({}))];
        let view = apply_view(&records, "", &[], &VersionIndex::default());
        assert_eq!(view.summary(), "1 songs found");
        assert_eq!(view.len(), 1);
    }
}
