// Metadata module
// Song records and field access, plus reading/writing the embedded JSON comment

pub mod cache;
pub mod embedded;
pub mod extractor;
pub mod fields;
pub mod parser;
pub mod song;
pub mod writer;

pub use cache::MetadataCache;
pub use embedded::EmbeddedMetadata;
pub use extractor::MetadataExtractor;
pub use fields::Field;
pub use song::{SongIdentity, SongRecord};
pub use writer::{TagUpdate, TagWriter};
