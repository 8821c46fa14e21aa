// Library management module
// Scanning folders, loading metadata, resolving versions and writing results back

pub mod apply;
pub mod duplicates;
pub mod export;
pub mod loader;
pub mod rename;
pub mod scanner;
pub mod stats;
pub mod versions;

pub use apply::{apply_preset, ApplyReport};
pub use duplicates::{audio_hash, find_duplicates, DuplicateReport};
pub use export::{export_json, ExportReport};
pub use loader::{LibraryLoader, LoadProgress, LoadResult};
pub use rename::rename_file;
pub use scanner::DirectoryScanner;
pub use stats::LibraryStats;
pub use versions::{VersionGroup, VersionIndex};
