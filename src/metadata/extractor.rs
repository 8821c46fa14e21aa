// Embedded metadata extractor using lofty with id3 fallback for problematic MP3 files
use anyhow::{Context, Result};
use id3::TagLike;
use lofty::prelude::{ItemKey, TaggedFileExt};
use lofty::probe::Probe;
use std::path::Path;

use super::embedded::{parse_comment_texts, EmbeddedMetadata};
use super::song::SongRecord;

pub struct MetadataExtractor;

impl MetadataExtractor {
    /// Read the JSON metadata embedded in a file's comment frames.
    ///
    /// `Ok(None)` means the file was readable but carries no JSON comment.
    pub fn extract_embedded(file_path: &Path) -> Result<Option<EmbeddedMetadata>> {
        // Try to read the file with lofty first
        let probe = Probe::open(file_path)
            .with_context(|| format!("Failed to open {}", file_path.display()))?;
        let probe = probe
            .guess_file_type()
            .with_context(|| format!("Failed to probe {}", file_path.display()))?;
        let tagged_file = match probe.read() {
            Ok(f) => f,
            Err(e) => {
                tracing::debug!("lofty could not read {:?}: {}", file_path, e);
                // Fallback: the id3 crate copes with more malformed MP3 tags
                return Self::extract_with_id3(file_path);
            }
        };

        let mut texts: Vec<String> = Vec::new();
        for tag in tagged_file.tags() {
            texts.extend(tag.get_strings(&ItemKey::Comment).map(str::to_string));
        }

        if texts.is_empty() && Self::is_mp3(file_path) {
            // lofty drops COMM frames it cannot map; the id3 crate is more lenient
            return Self::extract_with_id3(file_path);
        }

        Ok(parse_comment_texts(texts))
    }

    /// Read a file into a [`SongRecord`]; files without JSON give an empty record
    pub fn extract_record(file_path: &Path) -> Result<SongRecord> {
        Ok(Self::to_record(file_path, Self::extract_embedded(file_path)?))
    }

    /// Wrap already-extracted metadata (e.g. from the cache) in a record
    pub fn to_record(file_path: &Path, meta: Option<EmbeddedMetadata>) -> SongRecord {
        match meta {
            Some(meta) => SongRecord::new(file_path, meta.data).with_prefix(meta.prefix),
            None => SongRecord::new(file_path, Default::default()),
        }
    }

    /// Fallback extraction using the id3 crate (more lenient with malformed tags)
    pub(crate) fn extract_with_id3(file_path: &Path) -> Result<Option<EmbeddedMetadata>> {
        let tag = match id3::Tag::read_from_path(file_path) {
            Ok(tag) => tag,
            Err(e) if matches!(e.kind, id3::ErrorKind::NoTag) => return Ok(None),
            Err(e) => {
                return Err(e)
                    .with_context(|| format!("Failed to read ID3 tag of {}", file_path.display()))
            }
        };

        let texts: Vec<&str> = tag.comments().map(|c| c.text.as_str()).collect();
        Ok(parse_comment_texts(texts))
    }

    fn is_mp3(file_path: &Path) -> bool {
        file_path
            .extension()
            .and_then(|s| s.to_str())
            .map(|ext| ext.eq_ignore_ascii_case("mp3"))
            .unwrap_or(false)
    }
}
