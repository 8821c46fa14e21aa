// Find files carrying identical audio under different tags
use anyhow::{Context, Result};
use rayon::prelude::*;
use std::collections::BTreeMap;
use std::fs;
use std::io::Cursor;
use std::path::{Path, PathBuf};

/// Files grouped by audio hash; only groups with two or more files
#[derive(Debug, Clone, Default, serde::Serialize)]
pub struct DuplicateReport {
    pub groups: Vec<Vec<PathBuf>>,
    pub errors: Vec<String>,
}

/// BLAKE3 hash of a file's bytes with its ID3v2 and ID3v1 tags removed.
///
/// Tag editing therefore never changes the hash.
pub fn audio_hash(path: &Path) -> Result<String> {
    let bytes = fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;
    let mut cursor = Cursor::new(bytes);

    id3::Tag::remove_from_file(&mut cursor)
        .with_context(|| format!("Failed to strip ID3v2 tag of {}", path.display()))?;
    id3::v1::Tag::remove_from_file(&mut cursor)
        .with_context(|| format!("Failed to strip ID3v1 tag of {}", path.display()))?;

    let audio = cursor.into_inner();
    Ok(blake3::hash(&audio).to_hex().to_string())
}

/// Hash every path in parallel and report files sharing audio.
///
/// Groups keep input order and are ordered by their first file.
pub fn find_duplicates<P: AsRef<Path> + Sync>(paths: &[P]) -> DuplicateReport {
    let hashed: Vec<(usize, Result<String>)> = paths
        .par_iter()
        .enumerate()
        .map(|(i, path)| (i, audio_hash(path.as_ref())))
        .collect();

    let mut report = DuplicateReport::default();
    let mut by_hash: BTreeMap<String, Vec<usize>> = BTreeMap::new();
    for (i, result) in hashed {
        match result {
            Ok(hash) => by_hash.entry(hash).or_default().push(i),
            Err(e) => {
                tracing::warn!("Failed to hash {}: {:#}", paths[i].as_ref().display(), e);
                report.errors.push(format!("{}: {:#}", paths[i].as_ref().display(), e));
            }
        }
    }

    let mut groups: Vec<Vec<usize>> = by_hash.into_values().filter(|g| g.len() > 1).collect();
    groups.sort_by_key(|g| g[0]);
    report.groups = groups
        .into_iter()
        .map(|g| g.into_iter().map(|i| paths[i].as_ref().to_path_buf()).collect())
        .collect();

    tracing::info!("Found {} duplicate groups in {} files", report.groups.len(), paths.len());
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::{TagUpdate, TagWriter};

    fn write_song(dir: &tempfile::TempDir, name: &str, audio: &[u8], title: Option<&str>) -> PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, audio).unwrap();
        if let Some(title) = title {
            let update = TagUpdate {
                title: Some(title.to_string()),
                json_comment: Some(format!(r#"{{"Title":"{}"}}"#, title)),
                ..Default::default()
            };
            TagWriter::write(&path, &update).unwrap();
        }
        path
    }

    #[test]
    fn test_hash_ignores_tags() {
        let dir = tempfile::tempdir().unwrap();
        let bare = write_song(&dir, "bare.mp3", b"same audio frames", None);
        let tagged = write_song(&dir, "tagged.mp3", b"same audio frames", Some("Song"));
        let other = write_song(&dir, "other.mp3", b"different audio", Some("Song"));

        assert_eq!(audio_hash(&bare).unwrap(), audio_hash(&tagged).unwrap());
        assert_ne!(audio_hash(&bare).unwrap(), audio_hash(&other).unwrap());
    }

    #[test]
    fn test_find_duplicates_groups() {
        let dir = tempfile::tempdir().unwrap();
        let a = write_song(&dir, "a.mp3", b"audio one", Some("A"));
        let b = write_song(&dir, "b.mp3", b"audio two", None);
        let c = write_song(&dir, "c.mp3", b"audio one", Some("C (cover)"));
        let d = write_song(&dir, "d.mp3", b"audio two", Some("D"));
        let e = write_song(&dir, "e.mp3", b"unique", None);
        let missing = dir.path().join("missing.mp3");

        let report = find_duplicates(&[a.clone(), b.clone(), c.clone(), d.clone(), e, missing]);
        assert_eq!(report.groups, vec![vec![a, c], vec![b, d]]);
        assert_eq!(report.errors.len(), 1);
        assert!(report.errors[0].contains("missing.mp3"));
    }
}
