// Settings management and persistence
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::rules::preset::DEFAULT_MAX_RULES_PER_TAB;
use crate::rules::FallthroughPolicy;
use crate::view::sort::{SortRule, SortRules, DEFAULT_MAX_SORT_RULES};

/// Folder loading settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LibrarySettings {
    pub last_folder: Option<PathBuf>,
    pub include_subfolders: bool,
    pub cache_capacity: usize,
}

impl Default for LibrarySettings {
    fn default() -> Self {
        Self {
            last_folder: None,
            include_subfolders: true,
            cache_capacity: 4096,
        }
    }
}

/// Rule editor settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuleSettings {
    pub max_rules_per_tab: usize,
    pub fallthrough: FallthroughPolicy,
}

impl Default for RuleSettings {
    fn default() -> Self {
        Self {
            max_rules_per_tab: DEFAULT_MAX_RULES_PER_TAB,
            fallthrough: FallthroughPolicy::default(),
        }
    }
}

/// Sort bar settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SortSettings {
    pub max_sort_rules: usize,
    pub rules: Vec<SortRule>,
}

impl Default for SortSettings {
    fn default() -> Self {
        Self {
            max_sort_rules: DEFAULT_MAX_SORT_RULES,
            rules: vec![SortRule::asc("title")],
        }
    }
}

impl SortSettings {
    /// Saved levels as an editable list, capped at `max_sort_rules`
    pub fn to_sort_rules(&self) -> SortRules {
        SortRules::from_saved(self.rules.clone(), self.max_sort_rules)
    }
}

/// Log output settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// `tracing_subscriber::EnvFilter` directives; `RUST_LOG` overrides
    pub filter: String,
    pub include_target: bool,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            filter: "info".to_string(),
            include_target: false,
        }
    }
}

/// Main application settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppSettings {
    pub version: i32, // Settings schema version for future migrations
    pub library: LibrarySettings,
    pub rules: RuleSettings,
    pub sorting: SortSettings,
    pub logging: LoggingSettings,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            version: 1,
            library: LibrarySettings::default(),
            rules: RuleSettings::default(),
            sorting: SortSettings::default(),
            logging: LoggingSettings::default(),
        }
    }
}

impl AppSettings {
    /// Get the settings file path
    pub fn get_settings_path(app_dir: &Path) -> PathBuf {
        app_dir.join("settings.json")
    }

    /// Folder holding saved presets
    pub fn presets_dir(app_dir: &Path) -> PathBuf {
        app_dir.join("presets")
    }

    /// Load settings from file, or return defaults if file doesn't exist
    pub fn load(app_dir: &Path) -> Result<Self> {
        let path = Self::get_settings_path(app_dir);

        if !path.exists() {
            tracing::info!("No settings file found, using defaults");
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&path)?;
        let settings: AppSettings = serde_json::from_str(&content)
            .map_err(|e| Error::Config(format!("Failed to parse settings: {}", e)))?;

        tracing::info!("Loaded settings from {:?}", path);
        Ok(settings)
    }

    /// Save settings to file
    pub fn save(&self, app_dir: &Path) -> Result<()> {
        // Ensure directory exists
        fs::create_dir_all(app_dir)?;

        let path = Self::get_settings_path(app_dir);
        let content = serde_json::to_string_pretty(self)?;
        fs::write(&path, content)?;

        tracing::info!("Saved settings to {:?}", path);
        Ok(())
    }
}
