// Split an ordered rule list into AND blocks at OR boundaries
use super::model::{Logic, Rule};

/// Group rules into blocks evaluated with AND semantics.
///
/// The first rule always opens block 0 whatever its stored logic. Each later
/// `OR` rule closes the current block and opens a new one. Blocks are never
/// empty and keep declaration order.
pub fn group_rules(rules: &[Rule]) -> Vec<Vec<&Rule>> {
    let mut blocks: Vec<Vec<&Rule>> = Vec::new();
    let mut current: Vec<&Rule> = Vec::new();

    for (i, rule) in rules.iter().enumerate() {
        if i > 0 && rule.logic == Logic::Or {
            blocks.push(std::mem::take(&mut current));
        }
        current.push(rule);
    }
    if !current.is_empty() {
        blocks.push(current);
    }

    blocks
}
