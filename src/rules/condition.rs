// Evaluate a single rule condition against a song
use crate::library::versions::VersionIndex;
use crate::metadata::SongRecord;

use super::model::{Operator, Rule};

/// Evaluate one condition. Pure; unknown operators fail closed.
///
/// Text comparisons are case-sensitive. An unknown field reads as the empty
/// string, so `is empty` matches it.
pub fn evaluate(rule: &Rule, record: &SongRecord, versions: &VersionIndex) -> bool {
    let actual = || record.get(&rule.field);
    let expected = rule.value.as_str();

    match &rule.operator {
        Operator::Is => actual() == expected,
        Operator::Contains => actual().contains(expected),
        Operator::StartsWith => actual().starts_with(expected),
        Operator::EndsWith => actual().ends_with(expected),
        Operator::IsEmpty => actual().is_empty(),
        Operator::IsNotEmpty => !actual().is_empty(),
        Operator::IsLatestVersion => versions.is_latest(record),
        Operator::IsNotLatestVersion => !versions.is_latest(record),
        Operator::Unknown(op) => {
            tracing::trace!("Unknown rule operator {:?}", op);
            false
        }
    }
}

/// AND over a block; an empty block never matches
pub fn evaluate_block(block: &[&Rule], record: &SongRecord, versions: &VersionIndex) -> bool {
    !block.is_empty() && block.iter().all(|rule| evaluate(rule, record, versions))
}
