// Write rule output back to files
use crate::library::versions::VersionIndex;
use crate::metadata::embedded::compose_comment;
use crate::metadata::{MetadataCache, SongRecord, TagUpdate, TagWriter};
use crate::rules::{Preset, RuleEngine};

/// Outcome of applying a preset to a set of files
#[derive(Debug, Clone, Default, serde::Serialize)]
pub struct ApplyReport {
    pub written: usize,
    pub skipped: usize,
    pub errors: Vec<String>,
}

/// Frames to write for one record.
///
/// Blank title or artist output keeps the record's current value; blank
/// album output leaves the album frame alone.
pub fn build_update(
    record: &SongRecord,
    preset: &Preset,
    versions: &VersionIndex,
    engine: &RuleEngine,
) -> TagUpdate {
    let preview = engine.preview(preset, record, versions);

    let or_current = |output: String, current: String| {
        if output.trim().is_empty() {
            current
        } else {
            output
        }
    };
    let non_empty = |value: String| if value.is_empty() { None } else { Some(value) };

    TagUpdate {
        title: Some(or_current(preview.title, record.title())),
        artist: Some(or_current(preview.artist, record.artist())),
        album: non_empty(preview.album).filter(|a| !a.trim().is_empty()),
        track: non_empty(record.track()),
        disc: non_empty(record.disc()),
        date: non_empty(record.date()),
        json_comment: Some(compose_comment(record.prefix(), record.raw_data())),
    }
}

/// Render `preset` for every record and write the result to its file.
///
/// Records without embedded metadata are skipped. A failed write is reported
/// and does not stop the batch. Written files are dropped from `cache`.
pub fn apply_preset(
    records: &[SongRecord],
    preset: &Preset,
    versions: &VersionIndex,
    engine: &RuleEngine,
    cache: Option<&MetadataCache>,
) -> ApplyReport {
    let mut report = ApplyReport::default();

    for record in records {
        if !record.has_metadata() {
            report.skipped += 1;
            report.errors.push(format!("No metadata: {}", record.file_name()));
            continue;
        }

        let update = build_update(record, preset, versions, engine);
        match TagWriter::write(record.path(), &update) {
            Ok(()) => {
                report.written += 1;
                if let Some(cache) = cache {
                    cache.invalidate(record.path());
                }
            }
            Err(e) => {
                tracing::warn!("Failed to write {}: {:#}", record.path().display(), e);
                report.errors.push(format!("{}: {:#}", record.file_name(), e));
            }
        }
    }

    tracing::info!(
        "Applied preset: {} written, {} skipped, {} errors",
        report.written,
        report.skipped,
        report.errors.len()
    );
    report
}
