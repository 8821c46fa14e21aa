// Rule data model as stored in presets
use serde::{Deserialize, Serialize};
use std::fmt;

/// How a rule joins the rule before it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Logic {
    #[default]
    And,
    Or,
}

impl Logic {
    pub fn as_str(self) -> &'static str {
        match self {
            Logic::And => "AND",
            Logic::Or => "OR",
        }
    }
}

impl From<String> for Logic {
    /// Missing or `AND` (any case) joins the current block; anything else
    /// opens a new one.
    fn from(value: String) -> Self {
        let value = value.trim();
        if value.is_empty() || value.eq_ignore_ascii_case("and") {
            Logic::And
        } else {
            Logic::Or
        }
    }
}

impl From<Logic> for String {
    fn from(logic: Logic) -> Self {
        logic.as_str().to_string()
    }
}

impl Serialize for Logic {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Logic {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Option::<String>::deserialize(deserializer)?;
        Ok(Logic::from(value.unwrap_or_default()))
    }
}

/// Condition operator.
///
/// Strings outside the known set are kept verbatim so a preset written by a
/// newer version survives a load/save cycle; they never match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Operator {
    Is,
    Contains,
    StartsWith,
    EndsWith,
    IsEmpty,
    IsNotEmpty,
    IsLatestVersion,
    IsNotLatestVersion,
    Unknown(String),
}

impl Operator {
    /// Known operators in the order the rule builder lists them
    pub const ALL: [Operator; 8] = [
        Operator::Is,
        Operator::Contains,
        Operator::StartsWith,
        Operator::EndsWith,
        Operator::IsEmpty,
        Operator::IsNotEmpty,
        Operator::IsLatestVersion,
        Operator::IsNotLatestVersion,
    ];

    pub fn as_str(&self) -> &str {
        match self {
            Operator::Is => "is",
            Operator::Contains => "contains",
            Operator::StartsWith => "starts with",
            Operator::EndsWith => "ends with",
            Operator::IsEmpty => "is empty",
            Operator::IsNotEmpty => "is not empty",
            Operator::IsLatestVersion => "is latest version",
            Operator::IsNotLatestVersion => "is not latest version",
            Operator::Unknown(s) => s,
        }
    }
}

impl From<&str> for Operator {
    fn from(value: &str) -> Self {
        match value {
            "is" => Operator::Is,
            "contains" => Operator::Contains,
            "starts with" => Operator::StartsWith,
            "ends with" => Operator::EndsWith,
            "is empty" => Operator::IsEmpty,
            "is not empty" => Operator::IsNotEmpty,
            "is latest version" => Operator::IsLatestVersion,
            "is not latest version" => Operator::IsNotLatestVersion,
            other => Operator::Unknown(other.to_string()),
        }
    }
}

impl From<String> for Operator {
    fn from(value: String) -> Self {
        Operator::from(value.as_str())
    }
}

impl From<Operator> for String {
    fn from(op: Operator) -> Self {
        op.as_str().to_string()
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Default for Operator {
    fn default() -> Self {
        Operator::Is
    }
}

/// One row of the rule builder: IF `field` `operator` `value` THEN `template`
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Rule {
    pub logic: Logic,
    #[serde(rename = "if_field")]
    pub field: String,
    #[serde(rename = "if_operator")]
    pub operator: Operator,
    #[serde(rename = "if_value")]
    pub value: String,
    #[serde(rename = "then_template")]
    pub template: String,
}

impl Rule {
    pub fn new(
        field: impl Into<String>,
        operator: Operator,
        value: impl Into<String>,
        template: impl Into<String>,
    ) -> Self {
        Self {
            logic: Logic::And,
            field: field.into(),
            operator,
            value: value.into(),
            template: template.into(),
        }
    }

    /// Same rule, opening a new OR block
    pub fn or(mut self) -> Self {
        self.logic = Logic::Or;
        self
    }
}
