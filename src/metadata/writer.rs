//! Write rule output and embedded JSON back to an MP3's ID3 tag.

use anyhow::{Context, Result};
use id3::frame::Comment;
use id3::{Frame, Tag, TagLike, Version};
use std::path::Path;

/// Comment language marking the embedded JSON frame
pub const JSON_COMMENT_LANG: &str = "ved";

/// Fields to write; `None` leaves the existing frame untouched
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TagUpdate {
    pub title: Option<String>,
    pub artist: Option<String>,
    pub album: Option<String>,
    pub track: Option<String>,
    pub disc: Option<String>,
    pub date: Option<String>,
    /// Full comment text (prefix + JSON) for the embedded metadata frame
    pub json_comment: Option<String>,
}

pub struct TagWriter;

impl TagWriter {
    /// Apply `update` to the file at `path`, writing ID3v2.4.
    pub fn write(path: &Path, update: &TagUpdate) -> Result<()> {
        // Load existing tag if possible; otherwise start fresh.
        let mut tag = match Tag::read_from_path(path) {
            Ok(tag) => tag,
            Err(e) if matches!(e.kind, id3::ErrorKind::NoTag) => Tag::new(),
            Err(e) => {
                return Err(e).with_context(|| format!("Failed to read tag of {}", path.display()))
            }
        };

        if let Some(title) = &update.title {
            tag.set_title(title.as_str());
        }
        if let Some(artist) = &update.artist {
            tag.set_artist(artist.as_str());
        }
        if let Some(album) = &update.album {
            tag.set_album(album.as_str());
        }
        set_text(&mut tag, "TRCK", &update.track);
        set_text(&mut tag, "TPOS", &update.disc);
        set_text(&mut tag, "TDRC", &update.date);

        if let Some(text) = &update.json_comment {
            replace_json_comment(&mut tag, text);
        }

        tag.write_to_path(path, Version::Id3v24)
            .with_context(|| format!("Failed to write tag to {}", path.display()))?;
        tracing::debug!("Wrote tags to {:?}", path);
        Ok(())
    }
}

fn set_text(tag: &mut Tag, id: &str, value: &Option<String>) {
    if let Some(v) = value {
        tag.set_text(id, v.as_str());
    }
}

/// Replace only our own comment frames; other comments survive
fn replace_json_comment(tag: &mut Tag, text: &str) {
    let removed: Vec<Frame> = tag.remove("COMM");
    for frame in removed {
        let ours = frame
            .content()
            .comment()
            .map(|c| c.lang == JSON_COMMENT_LANG)
            .unwrap_or(false);
        if !ours {
            let _ = tag.add_frame(frame);
        }
    }

    let _ = tag.add_frame(Comment {
        lang: JSON_COMMENT_LANG.to_string(),
        description: String::new(),
        text: text.to_string(),
    });
}
