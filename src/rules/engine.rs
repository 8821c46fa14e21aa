// Rule engine: first matching block renders the output
use serde::{Deserialize, Serialize};

use crate::library::versions::VersionIndex;
use crate::metadata::SongRecord;

use super::condition::evaluate_block;
use super::grouping::group_rules;
use super::model::Rule;
use super::preset::{Preset, RuleTab};
use super::template::render;

/// What happens when a block matches but its template renders blank
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FallthroughPolicy {
    /// The first matching block wins even if its output is blank
    #[default]
    StopAtFirstMatch,
    /// Keep looking at later blocks while the output is whitespace-only
    SkipBlankOutput,
}

/// Rendered output of the three rule tabs; empty means "keep original"
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct OutputPreview {
    pub title: String,
    pub artist: String,
    pub album: String,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct RuleEngine {
    policy: FallthroughPolicy,
}

impl RuleEngine {
    pub fn new(policy: FallthroughPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> FallthroughPolicy {
        self.policy
    }

    /// Apply an ordered rule list to one song.
    ///
    /// Blocks are tried in order, each short-circuiting on its first failing
    /// condition. The winning block's last rule supplies the template. An
    /// empty string tells the caller to keep the original value.
    pub fn apply(&self, rules: &[Rule], record: &SongRecord, versions: &VersionIndex) -> String {
        for block in group_rules(rules) {
            if !evaluate_block(&block, record, versions) {
                continue;
            }
            let Some(last) = block.last() else {
                continue;
            };

            let output = render(&last.template, record);
            match self.policy {
                FallthroughPolicy::StopAtFirstMatch => return output,
                FallthroughPolicy::SkipBlankOutput if !output.trim().is_empty() => return output,
                FallthroughPolicy::SkipBlankOutput => {}
            }
        }
        String::new()
    }

    /// Render every tab of a preset for one song
    pub fn preview(&self, preset: &Preset, record: &SongRecord, versions: &VersionIndex) -> OutputPreview {
        OutputPreview {
            title: self.apply(preset.rules(RuleTab::Title), record, versions),
            artist: self.apply(preset.rules(RuleTab::Artist), record, versions),
            album: self.apply(preset.rules(RuleTab::Album), record, versions),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::model::Operator;
    use serde_json::json;

    fn record() -> SongRecord {
        SongRecord::from_value(
            "/music/x.mp3",
            json!({"Title": "Song", "Artist": "Neuro", "CoverArtist": "Evil", "Version": 1}),
        )
    }

    fn apply(engine: RuleEngine, rules: &[Rule]) -> String {
        engine.apply(rules, &record(), &VersionIndex::default())
    }

    #[test]
    fn test_first_match_wins() {
        let rules = vec![
            Rule::new("Artist", Operator::Is, "Neuro", "X"),
            Rule::new("Title", Operator::Is, "Song", "Y").or(),
        ];
        assert_eq!(apply(RuleEngine::default(), &rules), "X");
    }

    #[test]
    fn test_last_rule_of_block_supplies_template() {
        let rules = vec![
            Rule::new("Artist", Operator::Is, "Neuro", "ignored"),
            Rule::new("CoverArtist", Operator::Contains, "Evil", "{CoverArtist} - {Title}"),
        ];
        assert_eq!(apply(RuleEngine::default(), &rules), "Evil - Song");
    }

    #[test]
    fn test_failed_block_falls_to_next() {
        let rules = vec![
            Rule::new("Artist", Operator::Is, "Someone", "A"),
            Rule::new("Title", Operator::Is, "Song", "B"),
            Rule::new("Title", Operator::IsNotEmpty, "", "{Title} (cover)").or(),
        ];
        assert_eq!(apply(RuleEngine::default(), &rules), "Song (cover)");
    }

    #[test]
    fn test_no_match_and_empty_rules() {
        let rules = vec![Rule::new("Artist", Operator::Is, "Someone", "A")];
        assert_eq!(apply(RuleEngine::default(), &rules), "");
        assert_eq!(apply(RuleEngine::default(), &[]), "");
    }

    #[test]
    fn test_blank_match_stops_by_default() {
        let rules = vec![
            Rule::new("Artist", Operator::Is, "Neuro", "   "),
            Rule::new("Title", Operator::Is, "Song", "fallback").or(),
        ];
        assert_eq!(apply(RuleEngine::default(), &rules), "   ");
    }

    #[test]
    fn test_blank_match_skipped_when_configured() {
        let rules = vec![
            Rule::new("Artist", Operator::Is, "Neuro", "{Missing}"),
            Rule::new("Title", Operator::Is, "Song", "fallback").or(),
        ];
        let engine = RuleEngine::new(FallthroughPolicy::SkipBlankOutput);
        assert_eq!(apply(engine, &rules), "fallback");

        let only_blank = vec![Rule::new("Artist", Operator::Is, "Neuro", " ")];
        assert_eq!(apply(engine, &only_blank), "");
    }

    #[test]
    fn test_preview_renders_each_tab() {
        let preset = Preset {
            title: vec![Rule::new("Title", Operator::IsNotEmpty, "", "{Title} [{CoverArtist}]")],
            artist: vec![],
            album: vec![Rule::new("Version", Operator::IsLatestVersion, "", "Latest")],
        };
        let preview = RuleEngine::default().preview(&preset, &record(), &VersionIndex::default());
        assert_eq!(preview.title, "Song [Evil]");
        assert_eq!(preview.artist, "");
        assert_eq!(preview.album, "Latest");
    }
}
