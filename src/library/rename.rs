// Rename a song file in place
use anyhow::{bail, Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

use crate::metadata::MetadataCache;

/// Rename `path` to `new_name` within the same folder and return the new path.
///
/// The name is trimmed and gets an `.mp3` extension if it lacks one. A blank
/// or unchanged name is rejected, as is an existing target unless `overwrite`
/// is set. The old path is dropped from `cache`.
pub fn rename_file(
    path: &Path,
    new_name: &str,
    overwrite: bool,
    cache: Option<&MetadataCache>,
) -> Result<PathBuf> {
    let new_name = new_name.trim();
    if new_name.is_empty() {
        bail!("New file name is empty");
    }
    if new_name.contains(|c: char| c == '/' || c == '\\') {
        bail!("File name cannot contain a path separator: {}", new_name);
    }

    let current = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    if new_name == current {
        bail!("File name is unchanged: {}", new_name);
    }

    let mut file_name = new_name.to_string();
    if !file_name.to_lowercase().ends_with(".mp3") {
        file_name.push_str(".mp3");
    }

    let target = path.with_file_name(&file_name);
    if target.exists() && !overwrite {
        bail!("A file named {} already exists", file_name);
    }

    fs::rename(path, &target)
        .with_context(|| format!("Failed to rename {} to {}", path.display(), file_name))?;
    if let Some(cache) = cache {
        cache.invalidate(path);
    }

    tracing::info!("Renamed {:?} to {:?}", path, target);
    Ok(target)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::EmbeddedMetadata;

    fn song(dir: &tempfile::TempDir, name: &str) -> PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, name.as_bytes()).unwrap();
        path
    }

    #[test]
    fn test_rename_adds_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = song(&dir, "old.mp3");

        let target = rename_file(&path, "  New Name ", false, None).unwrap();
        assert_eq!(target, dir.path().join("New Name.mp3"));
        assert!(target.exists());
        assert!(!path.exists());

        let kept = rename_file(&target, "Other.MP3", false, None).unwrap();
        assert_eq!(kept, dir.path().join("Other.MP3"));
    }

    #[test]
    fn test_rename_rejects_blank_unchanged_and_separators() {
        let dir = tempfile::tempdir().unwrap();
        let path = song(&dir, "song.mp3");

        assert!(rename_file(&path, "   ", false, None).is_err());
        assert!(rename_file(&path, "song.mp3", false, None).is_err());
        assert!(rename_file(&path, "../up", false, None).is_err());
        assert!(path.exists());
    }

    #[test]
    fn test_rename_existing_target() {
        let dir = tempfile::tempdir().unwrap();
        let path = song(&dir, "a.mp3");
        let other = song(&dir, "b.mp3");

        assert!(rename_file(&path, "b", false, None).is_err());
        assert_eq!(fs::read(&other).unwrap(), b"b.mp3");

        rename_file(&path, "b", true, None).unwrap();
        assert_eq!(fs::read(&other).unwrap(), b"a.mp3");
    }

    #[test]
    fn test_rename_invalidates_cache() {
        let dir = tempfile::tempdir().unwrap();
        let path = song(&dir, "a.mp3");
        let cache = MetadataCache::new(4);
        cache
            .get_or_load(&path, |_| -> Result<Option<EmbeddedMetadata>> { Ok(None) })
            .unwrap();
        assert_eq!(cache.len(), 1);

        rename_file(&path, "c", false, Some(&cache)).unwrap();
        assert!(cache.is_empty());
    }
}
