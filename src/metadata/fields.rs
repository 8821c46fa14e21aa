// Recognized metadata fields
use serde::{Deserialize, Serialize};

/// Closed set of fields the editor knows about.
///
/// Names are matched case-insensitively. Anything else is still reachable
/// through the raw lookup on [`SongRecord::get`](super::song::SongRecord::get).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Field {
    Title,
    Artist,
    #[serde(rename = "coverartist")]
    CoverArtist,
    Version,
    Disc,
    Track,
    Date,
    Comment,
    Special,
    /// File name of the record's path; display/sort/search only
    File,
}

impl Field {
    /// Every field, in table column order
    pub const ALL: [Field; 10] = [
        Field::Title,
        Field::Artist,
        Field::CoverArtist,
        Field::Version,
        Field::Disc,
        Field::Track,
        Field::Date,
        Field::Comment,
        Field::Special,
        Field::File,
    ];

    /// Case-insensitive; surrounding whitespace is not stripped, so `" Title "`
    /// is not a known field.
    pub fn parse(name: &str) -> Option<Field> {
        let field = match name.to_lowercase().as_str() {
            "title" => Field::Title,
            "artist" => Field::Artist,
            "coverartist" => Field::CoverArtist,
            "version" => Field::Version,
            "disc" | "discnumber" => Field::Disc,
            "track" => Field::Track,
            "date" => Field::Date,
            "comment" => Field::Comment,
            "special" => Field::Special,
            "file" | "filename" => Field::File,
            _ => return None,
        };
        Some(field)
    }

    /// Key used inside the embedded JSON object, `None` for derived fields
    pub fn json_key(self) -> Option<&'static str> {
        match self {
            Field::Title => Some("Title"),
            Field::Artist => Some("Artist"),
            Field::CoverArtist => Some("CoverArtist"),
            Field::Version => Some("Version"),
            Field::Disc => Some("Discnumber"),
            Field::Track => Some("Track"),
            Field::Date => Some("Date"),
            Field::Comment => Some("Comment"),
            Field::Special => Some("Special"),
            Field::File => None,
        }
    }

    /// Lowercase name as used in search queries and sort settings
    pub fn name(self) -> &'static str {
        match self {
            Field::Title => "title",
            Field::Artist => "artist",
            Field::CoverArtist => "coverartist",
            Field::Version => "version",
            Field::Disc => "disc",
            Field::Track => "track",
            Field::Date => "date",
            Field::Comment => "comment",
            Field::Special => "special",
            Field::File => "file",
        }
    }
}
