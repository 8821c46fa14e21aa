// Multi-level sort over song records
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use crate::error::{Error, Result};
use crate::metadata::parser::{leading_version_number, parse_int_or_zero, parse_slash_pair};
use crate::metadata::{Field, SongRecord};

/// Default cap on sort levels
pub const DEFAULT_MAX_SORT_RULES: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

/// One sort level. `field` is a name so settings can hold fields this
/// version does not know; those sort as empty text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortRule {
    pub field: String,
    #[serde(default)]
    pub order: SortOrder,
}

impl SortRule {
    pub fn asc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            order: SortOrder::Asc,
        }
    }

    pub fn desc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            order: SortOrder::Desc,
        }
    }
}

/// Coerced value for one sort level
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
enum SortKey {
    Int(i64),
    /// Track number and total from `N/M`
    Pair(i64, i64),
    Text(String),
}

fn sort_key(record: &SongRecord, rule: &SortRule) -> SortKey {
    match Field::parse(&rule.field) {
        Some(Field::Disc) => SortKey::Int(parse_int_or_zero(&record.disc())),
        Some(Field::Special) => SortKey::Int(parse_int_or_zero(&record.special())),
        Some(Field::Track) => {
            let (number, total) = parse_slash_pair(&record.track());
            SortKey::Pair(number, total)
        }
        // Only the first digit run counts here, unlike latest-version resolution
        Some(Field::Version) => {
            let n = leading_version_number(&record.raw_version());
            SortKey::Int(i64::try_from(n).unwrap_or(0))
        }
        Some(field) => SortKey::Text(record.field(field).to_lowercase()),
        None => SortKey::Text(record.get(&rule.field).to_lowercase()),
    }
}

/// Sort records by the given levels. Stable; each level's direction applies
/// to that level only. No levels leaves the input order untouched.
pub fn sort_records<'a>(records: &'a [SongRecord], rules: &[SortRule]) -> Vec<&'a SongRecord> {
    sort_refs(records.iter().collect(), rules)
}

/// [`sort_records`] over an already-selected subset
pub fn sort_refs<'a>(rows: Vec<&'a SongRecord>, rules: &[SortRule]) -> Vec<&'a SongRecord> {
    if rules.is_empty() {
        return rows;
    }

    let mut keyed: Vec<(Vec<SortKey>, &'a SongRecord)> = rows
        .into_iter()
        .map(|record| (rules.iter().map(|rule| sort_key(record, rule)).collect(), record))
        .collect();

    keyed.sort_by(|(a, _), (b, _)| compare_keys(a, b, rules));
    keyed.into_iter().map(|(_, record)| record).collect()
}

fn compare_keys(a: &[SortKey], b: &[SortKey], rules: &[SortRule]) -> Ordering {
    for ((ka, kb), rule) in a.iter().zip(b).zip(rules) {
        let ord = match rule.order {
            SortOrder::Asc => ka.cmp(kb),
            SortOrder::Desc => kb.cmp(ka),
        };
        if ord != Ordering::Equal {
            return ord;
        }
    }
    Ordering::Equal
}

/// Ordered sort levels as edited in the sort bar.
///
/// The primary level (index 0) always exists, cannot be removed and never
/// changes position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortRules {
    rules: Vec<SortRule>,
    max: usize,
}

impl SortRules {
    pub fn new(primary: SortRule, max: usize) -> Self {
        Self {
            rules: vec![primary],
            max: max.max(1),
        }
    }

    /// Rebuild from saved rules; extra levels are dropped, and an empty list
    /// gets a `title` ascending primary.
    pub fn from_saved(rules: Vec<SortRule>, max: usize) -> Self {
        let mut out = Self::new(SortRule::asc(Field::Title.name()), max);
        if !rules.is_empty() {
            out.rules = rules;
            out.rules.truncate(out.max);
        }
        out
    }

    pub fn push(&mut self, rule: SortRule) -> Result<()> {
        if self.rules.len() >= self.max {
            return Err(Error::InvalidInput(format!(
                "Maximum of {} sort levels reached",
                self.max
            )));
        }
        self.rules.push(rule);
        Ok(())
    }

    /// Remove a secondary level; returns whether anything changed
    pub fn remove(&mut self, index: usize) -> bool {
        if index == 0 || index >= self.rules.len() {
            return false;
        }
        self.rules.remove(index);
        true
    }

    /// Move a secondary level by `delta` places; the primary slot is fixed
    pub fn move_rule(&mut self, index: usize, delta: isize) -> bool {
        if index == 0 || index >= self.rules.len() {
            return false;
        }
        let Some(target) = index.checked_add_signed(delta) else {
            return false;
        };
        if target < 1 || target >= self.rules.len() {
            return false;
        }
        let rule = self.rules.remove(index);
        self.rules.insert(target, rule);
        true
    }

    /// Replace a level in place (field/order dropdown change)
    pub fn set(&mut self, index: usize, rule: SortRule) -> bool {
        match self.rules.get_mut(index) {
            Some(slot) => {
                *slot = rule;
                true
            }
            None => false,
        }
    }

    pub fn as_slice(&self) -> &[SortRule] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.rules.len() >= self.max
    }
}
