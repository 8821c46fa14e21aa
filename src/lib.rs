// Metadata Customizer - rule-driven batch editor for embedded song metadata
// Module declarations
pub mod error;
pub mod library;
pub mod logging;
pub mod metadata;
pub mod rules;
pub mod settings;
pub mod view;

pub use error::{Error, Result};
pub use library::{DirectoryScanner, LibraryLoader, VersionIndex};
pub use metadata::{Field, SongIdentity, SongRecord};
pub use rules::{FallthroughPolicy, Preset, PresetStore, Rule, RuleEngine};
pub use settings::AppSettings;
pub use view::{apply_view, View};
