// Library statistics shown in the status bar
use serde::Serialize;
use std::collections::{BTreeMap, HashSet};

use crate::metadata::parser::parse_artists;
use crate::metadata::{SongIdentity, SongRecord};

/// Songs in a bucket, and how many distinct identities they cover
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Count {
    pub total: usize,
    pub unique: usize,
}

#[derive(Debug, Default)]
struct Bucket {
    total: usize,
    identities: HashSet<SongIdentity>,
}

impl Bucket {
    fn add(&mut self, identity: SongIdentity) {
        self.total += 1;
        self.identities.insert(identity);
    }

    fn count(&self) -> Count {
        Count {
            total: self.total,
            unique: self.identities.len(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LibraryStats {
    pub songs: usize,
    pub without_metadata: usize,
    /// Distinct (title, artist) pairs
    pub unique_title_artist: usize,
    /// Distinct (title, artist, cover artist) identities
    pub unique_identities: usize,
    /// Songs credited to exactly one artist, by artist
    pub solo: BTreeMap<String, Count>,
    /// Songs credited to two or more artists
    pub collaborations: Count,
    /// Songs with an empty artist
    pub uncredited: Count,
}

impl LibraryStats {
    pub fn calculate(records: &[SongRecord]) -> Self {
        let mut pairs = HashSet::new();
        let mut identities = HashSet::new();
        let mut solo: BTreeMap<String, Bucket> = BTreeMap::new();
        let mut collaborations = Bucket::default();
        let mut uncredited = Bucket::default();
        let mut without_metadata = 0;

        for record in records {
            if !record.has_metadata() {
                without_metadata += 1;
            }
            let title = record.title();
            let artist = record.artist();
            let identity = record.identity();

            let mut artists = parse_artists(&artist);
            match artists.len() {
                0 => uncredited.add(identity.clone()),
                1 => solo.entry(artists.remove(0)).or_default().add(identity.clone()),
                _ => collaborations.add(identity.clone()),
            }

            pairs.insert((title, artist));
            identities.insert(identity);
        }

        Self {
            songs: records.len(),
            without_metadata,
            unique_title_artist: pairs.len(),
            unique_identities: identities.len(),
            solo: solo.into_iter().map(|(name, b)| (name, b.count())).collect(),
            collaborations: collaborations.count(),
            uncredited: uncredited.count(),
        }
    }

    /// `12 songs | 10 unique | 9 identities`
    pub fn summary(&self) -> String {
        format!(
            "{} songs | {} unique | {} identities",
            self.songs, self.unique_title_artist, self.unique_identities
        )
    }
}
