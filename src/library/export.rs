// Export embedded JSON to sidecar files
use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

use crate::metadata::SongRecord;

/// Outcome of an export run
#[derive(Debug, Clone, Default, serde::Serialize)]
pub struct ExportReport {
    pub exported: usize,
    pub skipped: usize,
    pub errors: Vec<String>,
}

/// Output path for one song: its path relative to `library_root` (or just
/// the file name when it lies outside) under `export_dir`, with a `.json`
/// extension.
pub fn export_path(song_path: &Path, library_root: Option<&Path>, export_dir: &Path) -> PathBuf {
    let relative = library_root
        .and_then(|root| song_path.strip_prefix(root).ok())
        .map(Path::to_path_buf)
        .or_else(|| song_path.file_name().map(PathBuf::from))
        .unwrap_or_default();
    export_dir.join(relative).with_extension("json")
}

/// Write each record's embedded JSON as pretty-printed UTF-8 JSON.
///
/// Records without metadata are skipped. A failed write is reported and does
/// not stop the run.
pub fn export_json(records: &[SongRecord], library_root: Option<&Path>, export_dir: &Path) -> ExportReport {
    let mut report = ExportReport::default();

    for record in records {
        if !record.has_metadata() {
            report.skipped += 1;
            continue;
        }

        let out_path = export_path(record.path(), library_root, export_dir);
        match write_record(record, &out_path) {
            Ok(()) => report.exported += 1,
            Err(e) => {
                tracing::warn!("Failed to export {}: {:#}", record.path().display(), e);
                report.errors.push(format!("{}: {:#}", record.file_name(), e));
            }
        }
    }

    tracing::info!(
        "Exported {} files to {} ({} skipped)",
        report.exported,
        export_dir.display(),
        report.skipped
    );
    report
}

fn write_record(record: &SongRecord, out_path: &Path) -> Result<()> {
    if let Some(parent) = out_path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    let content = serde_json::to_string_pretty(record.raw_data())?;
    fs::write(out_path, content).with_context(|| format!("Failed to write {}", out_path.display()))?;
    Ok(())
}
