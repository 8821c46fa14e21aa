// Cache of embedded metadata keyed by file path
use anyhow::{Context, Result};
use parking_lot::Mutex;
use std::collections::{HashMap, VecDeque};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use super::embedded::EmbeddedMetadata;

/// Size and modification time; a change in either invalidates the entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct FileStamp {
    len: u64,
    modified: Option<SystemTime>,
}

impl FileStamp {
    fn of(path: &Path) -> Result<Self> {
        let meta = fs::metadata(path)
            .with_context(|| format!("Failed to stat {}", path.display()))?;
        Ok(Self {
            len: meta.len(),
            modified: meta.modified().ok(),
        })
    }
}

#[derive(Debug, Clone)]
struct CacheEntry {
    stamp: FileStamp,
    value: Option<EmbeddedMetadata>,
}

#[derive(Debug, Default)]
struct CacheInner {
    entries: HashMap<PathBuf, CacheEntry>,
    order: VecDeque<PathBuf>,
}

/// Bounded FIFO cache shared by loader workers.
///
/// Owned by the file layer; the rule and sort code never sees it.
#[derive(Debug)]
pub struct MetadataCache {
    capacity: usize,
    inner: Mutex<CacheInner>,
}

impl MetadataCache {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            inner: Mutex::new(CacheInner::default()),
        }
    }

    /// Return the cached metadata for `path`, calling `loader` on a miss or
    /// when the file changed on disk since it was cached.
    pub fn get_or_load<F>(&self, path: &Path, loader: F) -> Result<Option<EmbeddedMetadata>>
    where
        F: FnOnce(&Path) -> Result<Option<EmbeddedMetadata>>,
    {
        let stamp = FileStamp::of(path)?;

        if let Some(entry) = self.inner.lock().entries.get(path) {
            if entry.stamp == stamp {
                return Ok(entry.value.clone());
            }
        }

        // Load without holding the lock so other workers keep going
        let value = loader(path)?;
        self.insert(path, stamp, value.clone());
        Ok(value)
    }

    /// Drop the entry for `path`, e.g. after writing new tags to it
    pub fn invalidate(&self, path: &Path) {
        let mut inner = self.inner.lock();
        if inner.entries.remove(path).is_some() {
            inner.order.retain(|p| p != path);
        }
    }

    pub fn clear(&self) {
        let mut inner = self.inner.lock();
        inner.entries.clear();
        inner.order.clear();
    }

    pub fn len(&self) -> usize {
        self.inner.lock().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn insert(&self, path: &Path, stamp: FileStamp, value: Option<EmbeddedMetadata>) {
        let mut inner = self.inner.lock();
        let entry = CacheEntry { stamp, value };
        if inner.entries.insert(path.to_path_buf(), entry).is_none() {
            inner.order.push_back(path.to_path_buf());
        }
        while inner.entries.len() > self.capacity {
            let Some(oldest) = inner.order.pop_front() else {
                break;
            };
            inner.entries.remove(&oldest);
        }
    }
}

impl Default for MetadataCache {
    fn default() -> Self {
        Self::new(4096)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Map};
    use std::cell::Cell;

    fn meta(title: &str) -> Option<EmbeddedMetadata> {
        let mut data = Map::new();
        data.insert("Title".to_string(), json!(title));
        Some(EmbeddedMetadata {
            data,
            prefix: String::new(),
        })
    }

    #[test]
    fn test_second_lookup_hits_cache() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a.mp3");
        fs::write(&path, b"abc").unwrap();

        let cache = MetadataCache::new(8);
        let calls = Cell::new(0);
        let load = |_: &Path| -> Result<Option<EmbeddedMetadata>> {
            calls.set(calls.get() + 1);
            Ok(meta("A"))
        };

        assert_eq!(cache.get_or_load(&path, load).unwrap(), meta("A"));
        assert_eq!(cache.get_or_load(&path, load).unwrap(), meta("A"));
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn test_changed_file_reloads() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a.mp3");
        fs::write(&path, b"abc").unwrap();

        let cache = MetadataCache::new(8);
        cache.get_or_load(&path, |_| Ok(meta("Old"))).unwrap();

        fs::write(&path, b"abcdef").unwrap();
        let value = cache.get_or_load(&path, |_| Ok(meta("New"))).unwrap();
        assert_eq!(value, meta("New"));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_invalidate_and_eviction() {
        let dir = tempfile::tempdir().unwrap();
        let cache = MetadataCache::new(2);
        let paths: Vec<PathBuf> = (0..3)
            .map(|i| {
                let p = dir.path().join(format!("{}.mp3", i));
                fs::write(&p, b"x").unwrap();
                p
            })
            .collect();

        for p in &paths {
            cache.get_or_load(p, |_| Ok(None)).unwrap();
        }
        assert_eq!(cache.len(), 2);

        cache.invalidate(&paths[2]);
        assert_eq!(cache.len(), 1);

        cache.clear();
        assert!(cache.is_empty());
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let cache = MetadataCache::new(2);
        assert!(cache
            .get_or_load(&dir.path().join("missing.mp3"), |_| Ok(None))
            .is_err());
    }
}
