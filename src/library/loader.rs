use rayon::prelude::*;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::metadata::{MetadataCache, MetadataExtractor, SongRecord};

/// Progress update for loading
#[derive(Debug, Clone, serde::Serialize)]
pub struct LoadProgress {
    pub current: usize,
    pub total: usize,
    pub current_file: String,
}

/// Result of a loading operation
#[derive(Debug, Clone, Default)]
pub struct LoadResult {
    /// One record per input path, in input order
    pub records: Vec<SongRecord>,
    pub failed: usize,
    pub errors: Vec<String>,
}

/// Reads embedded metadata for a folder's worth of files
pub struct LibraryLoader;

impl LibraryLoader {
    /// Load every path into a [`SongRecord`] on the rayon pool.
    ///
    /// A file that cannot be read still yields a record (empty metadata, so
    /// its title is the file stem) and is counted in `failed`. `progress` is
    /// called once per file from worker threads; `current` counts completed
    /// files, not input positions.
    pub fn load<P, F>(paths: &[P], cache: &MetadataCache, progress: F) -> LoadResult
    where
        P: AsRef<Path> + Sync,
        F: Fn(LoadProgress) + Sync,
    {
        let total = paths.len();
        let done = AtomicUsize::new(0);

        let outcomes: Vec<(SongRecord, Option<String>)> = paths
            .par_iter()
            .map(|path| {
                let path = path.as_ref();
                let outcome = Self::load_single_file(path, cache);

                progress(LoadProgress {
                    current: done.fetch_add(1, Ordering::Relaxed) + 1,
                    total,
                    current_file: path
                        .file_name()
                        .and_then(|n| n.to_str())
                        .unwrap_or("unknown")
                        .to_string(),
                });
                outcome
            })
            .collect();

        let mut result = LoadResult::default();
        for (record, error) in outcomes {
            if let Some(error) = error {
                result.failed += 1;
                result.errors.push(error);
            }
            result.records.push(record);
        }

        tracing::info!(
            "Loaded {} files ({} failed)",
            result.records.len(),
            result.failed
        );
        result
    }

    fn load_single_file(path: &Path, cache: &MetadataCache) -> (SongRecord, Option<String>) {
        match cache.get_or_load(path, MetadataExtractor::extract_embedded) {
            Ok(meta) => (MetadataExtractor::to_record(path, meta), None),
            Err(e) => {
                tracing::warn!("Failed to load {}: {:#}", path.display(), e);
                (
                    MetadataExtractor::to_record(path, None),
                    Some(format!("{}: {:#}", path.display(), e)),
                )
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::writer::{TagUpdate, TagWriter};
    use std::fs;
    use std::sync::Mutex;

    #[test]
    fn test_load_keeps_order_and_reports_progress() {
        let dir = tempfile::tempdir().unwrap();
        let tagged = dir.path().join("tagged.mp3");
        let plain = dir.path().join("plain song.mp3");
        fs::write(&tagged, b"audio").unwrap();
        fs::write(&plain, b"audio").unwrap();

        TagWriter::write(
            &tagged,
            &TagUpdate {
                json_comment: Some(r#"note {"Title": "Real Title", "Version": 2}"#.to_string()),
                ..Default::default()
            },
        )
        .unwrap();

        let missing = dir.path().join("missing.mp3");
        let paths = vec![tagged.clone(), plain.clone(), missing];
        let cache = MetadataCache::new(16);
        let seen = Mutex::new(Vec::new());

        let result = LibraryLoader::load(&paths, &cache, |p| seen.lock().unwrap().push(p.current));

        assert_eq!(result.records.len(), 3);
        assert_eq!(result.records[0].title(), "Real Title");
        assert_eq!(result.records[0].prefix(), "note ");
        assert_eq!(result.records[1].title(), "plain song");
        assert!(!result.records[1].has_metadata());
        assert_eq!(result.records[2].title(), "missing");

        assert_eq!(result.failed, 1);
        assert!(result.errors[0].contains("missing.mp3"));

        let mut seen = seen.into_inner().unwrap();
        seen.sort();
        assert_eq!(seen, vec![1, 2, 3]);
    }

    #[test]
    fn test_load_uses_cache() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a.mp3");
        fs::write(&path, b"audio").unwrap();

        let cache = MetadataCache::new(16);
        LibraryLoader::load(&[&path], &cache, |_| {});
        assert_eq!(cache.len(), 1);
    }
}
