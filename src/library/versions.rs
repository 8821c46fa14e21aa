//! Latest-version resolution across a song collection.
//!
//! Songs sharing a [`SongIdentity`] are versions of each other. Their version
//! strings are split into digit runs and compared as integer sequences, so
//! `"1.10"` beats `"1.9"` and `"2"` beats both.

use std::collections::hash_map::Entry;
use std::collections::HashMap;

use crate::metadata::parser::parse_version_components;
use crate::metadata::{SongIdentity, SongRecord};

/// All versions seen for one identity and the one that won
#[derive(Debug, Clone, PartialEq)]
pub struct VersionGroup {
    versions: Vec<String>,
    latest: String,
    latest_parsed: Vec<u64>,
}

impl VersionGroup {
    fn new(version: String) -> Self {
        Self {
            latest_parsed: parse_version_components(&version),
            latest: version.clone(),
            versions: vec![version],
        }
    }

    fn push(&mut self, version: String) {
        let parsed = parse_version_components(&version);
        // Strictly greater: on a tie the first one seen stays latest
        if parsed > self.latest_parsed {
            self.latest_parsed = parsed;
            self.latest = version.clone();
        }
        self.versions.push(version);
    }

    pub fn latest(&self) -> &str {
        &self.latest
    }

    /// Every version string in input order, duplicates included
    pub fn versions(&self) -> &[String] {
        &self.versions
    }
}

/// Side table of latest versions, rebuilt from the full collection
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VersionIndex {
    groups: HashMap<SongIdentity, VersionGroup>,
}

impl VersionIndex {
    pub fn resolve<'a, I>(records: I) -> Self
    where
        I: IntoIterator<Item = &'a SongRecord>,
    {
        let mut groups: HashMap<SongIdentity, VersionGroup> = HashMap::new();
        for record in records {
            let version = record.raw_version();
            match groups.entry(record.identity()) {
                Entry::Occupied(mut entry) => entry.get_mut().push(version),
                Entry::Vacant(entry) => {
                    entry.insert(VersionGroup::new(version));
                }
            }
        }

        tracing::debug!("Resolved versions for {} unique songs", groups.len());
        Self { groups }
    }

    pub fn group(&self, identity: &SongIdentity) -> Option<&VersionGroup> {
        self.groups.get(identity)
    }

    /// Winning version string for an identity
    pub fn latest(&self, identity: &SongIdentity) -> Option<&str> {
        self.group(identity).map(VersionGroup::latest)
    }

    /// Versions seen for an identity, empty when unknown
    pub fn versions(&self, identity: &SongIdentity) -> &[String] {
        self.group(identity)
            .map(VersionGroup::versions)
            .unwrap_or(&[])
    }

    /// Whether `record` carries its group's latest version.
    ///
    /// Records whose identity was never resolved count as latest, so songs
    /// outside the index are not hidden.
    pub fn is_latest(&self, record: &SongRecord) -> bool {
        match self.latest(&record.identity()) {
            Some(latest) => latest == record.raw_version(),
            None => true,
        }
    }

    /// Number of unique identities
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}
