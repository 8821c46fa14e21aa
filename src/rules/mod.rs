// Rules module
// Conditional templates grouped with AND/OR logic, and presets that store them

pub mod condition;
pub mod engine;
pub mod grouping;
pub mod model;
pub mod preset;
pub mod template;

pub use engine::{FallthroughPolicy, OutputPreview, RuleEngine};
pub use model::{Logic, Operator, Rule};
pub use preset::{Preset, PresetStore, RuleTab};
