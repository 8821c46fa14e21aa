// Presets: named bundles of per-tab rule lists, one JSON file each
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

use super::model::Rule;

/// Default cap on rules loaded per tab
pub const DEFAULT_MAX_RULES_PER_TAB: usize = 50;

/// Output tab a rule list drives
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RuleTab {
    Title,
    Artist,
    Album,
}

impl RuleTab {
    pub const ALL: [RuleTab; 3] = [RuleTab::Title, RuleTab::Artist, RuleTab::Album];

    pub fn key(self) -> &'static str {
        match self {
            RuleTab::Title => "title",
            RuleTab::Artist => "artist",
            RuleTab::Album => "album",
        }
    }
}

/// `{"title": [...], "artist": [...], "album": [...]}`; missing tabs are empty
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Preset {
    pub title: Vec<Rule>,
    pub artist: Vec<Rule>,
    pub album: Vec<Rule>,
}

impl Preset {
    pub fn rules(&self, tab: RuleTab) -> &[Rule] {
        match tab {
            RuleTab::Title => &self.title,
            RuleTab::Artist => &self.artist,
            RuleTab::Album => &self.album,
        }
    }

    pub fn rules_mut(&mut self, tab: RuleTab) -> &mut Vec<Rule> {
        match tab {
            RuleTab::Title => &mut self.title,
            RuleTab::Artist => &mut self.artist,
            RuleTab::Album => &mut self.album,
        }
    }

    /// Drop rules beyond `max` in every tab
    pub fn truncate(&mut self, max: usize) {
        for tab in RuleTab::ALL {
            let rules = self.rules_mut(tab);
            if rules.len() > max {
                tracing::warn!(
                    "Preset {} tab has {} rules, keeping the first {}",
                    tab.key(),
                    rules.len(),
                    max
                );
                rules.truncate(max);
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        RuleTab::ALL.iter().all(|tab| self.rules(*tab).is_empty())
    }
}

/// Folder of `<name>.json` preset files
#[derive(Debug, Clone)]
pub struct PresetStore {
    dir: PathBuf,
    max_rules_per_tab: usize,
}

impl PresetStore {
    pub fn new(dir: impl Into<PathBuf>, max_rules_per_tab: usize) -> Self {
        Self {
            dir: dir.into(),
            max_rules_per_tab,
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Save (or overwrite) a preset as pretty-printed JSON
    pub fn save(&self, name: &str, preset: &Preset) -> Result<()> {
        let path = self.preset_path(name)?;
        fs::create_dir_all(&self.dir)?;

        let content = serde_json::to_string_pretty(preset)?;
        fs::write(&path, content)?;

        tracing::info!("Saved preset {:?} to {:?}", name, path);
        Ok(())
    }

    /// Load a preset, capping each tab at the configured rule count
    pub fn load(&self, name: &str) -> Result<Preset> {
        let path = self.preset_path(name)?;
        if !path.exists() {
            return Err(Error::NotFound(format!("Preset file '{}.json' not found", name)));
        }

        let content = fs::read_to_string(&path)?;
        let mut preset: Preset = serde_json::from_str(&content)?;
        preset.truncate(self.max_rules_per_tab);

        tracing::info!("Loaded preset {:?} from {:?}", name, path);
        Ok(preset)
    }

    pub fn delete(&self, name: &str) -> Result<()> {
        let path = self.preset_path(name)?;
        if !path.exists() {
            return Err(Error::NotFound(format!("Preset '{}' not found", name)));
        }
        fs::remove_file(&path)?;
        tracing::info!("Deleted preset {:?}", name);
        Ok(())
    }

    /// Preset names, sorted; an absent folder has none
    pub fn list(&self) -> Result<Vec<String>> {
        if !self.dir.exists() {
            return Ok(Vec::new());
        }

        let mut names = Vec::new();
        for entry in fs::read_dir(&self.dir)? {
            let path = entry?.path();
            let is_json = path
                .extension()
                .map(|ext| ext.eq_ignore_ascii_case("json"))
                .unwrap_or(false);
            if !is_json || !path.is_file() {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                names.push(stem.to_string());
            }
        }
        names.sort();
        Ok(names)
    }

    fn preset_path(&self, name: &str) -> Result<PathBuf> {
        let name = name.trim();
        if name.is_empty() {
            return Err(Error::InvalidInput("Preset name is empty".to_string()));
        }
        if name.contains(|c: char| c == '/' || c == '\\') || name == "." || name == ".." {
            return Err(Error::InvalidInput(format!("Invalid preset name: {}", name)));
        }
        Ok(self.dir.join(format!("{}.json", name)))
    }
}
