use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Extensions the editor can read and write tags for
const SUPPORTED_EXTENSIONS: &[&str] = &["mp3"];

/// Scanner for finding editable audio files in a folder
pub struct DirectoryScanner;

impl DirectoryScanner {
    /// List audio files under `directory`, sorted by path.
    ///
    /// Only the folder itself is read unless `include_subfolders` is set.
    /// Unreadable entries are skipped.
    pub fn scan<P: AsRef<Path>>(directory: P, include_subfolders: bool) -> Result<Vec<PathBuf>, anyhow::Error> {
        let directory = directory.as_ref();
        if !directory.is_dir() {
            anyhow::bail!("Not a folder: {}", directory.display());
        }

        let mut walker = WalkDir::new(directory).follow_links(false);
        if !include_subfolders {
            walker = walker.max_depth(1);
        }

        let mut audio_files = Vec::new();
        for entry in walker.into_iter().filter_map(|e| e.ok()) {
            let path = entry.path();
            if !entry.file_type().is_file() {
                continue;
            }
            if Self::is_supported(path) {
                audio_files.push(path.to_path_buf());
            }
        }

        audio_files.sort();
        tracing::info!("Found {} audio files in {}", audio_files.len(), directory.display());
        Ok(audio_files)
    }

    pub fn is_supported(path: &Path) -> bool {
        path.extension()
            .map(|ext| ext.to_string_lossy().to_lowercase())
            .map(|ext| SUPPORTED_EXTENSIONS.contains(&ext.as_str()))
            .unwrap_or(false)
    }
}
