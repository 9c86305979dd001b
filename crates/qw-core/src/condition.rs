//! The condition grammar shared by quest prerequisites, outcomes, and dialogues.
//!
//! Persisted conditions arrive as loosely shaped [`ConditionRecord`]s. They are
//! parsed into the closed [`Condition`] type; anything that does not fit the
//! grammar is reported as a [`ConditionError`] instead of being passed through.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::record::RecordId;

/// A condition value: a flag, a number, or a name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ConditionValue {
    /// A boolean value.
    Bool(bool),
    /// A numeric value.
    Number(f64),
    /// A textual value.
    Text(String),
}

impl ConditionValue {
    /// Numeric view of the value, if it has one.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            Self::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
            Self::Text(s) => s.trim().parse().ok(),
        }
    }

    /// Boolean view of the value. Text other than "true"/"false" has none.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            Self::Number(n) => Some(*n != 0.0),
            Self::Text(s) => match s.trim().to_lowercase().as_str() {
                "true" => Some(true),
                "false" => Some(false),
                _ => None,
            },
        }
    }
}

impl fmt::Display for ConditionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(b) => write!(f, "{b}"),
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => write!(f, "{s}"),
        }
    }
}

/// A condition exactly as persisted. Every field is optional because the
/// authoring backend stores conditions as free-form JSON.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConditionRecord {
    /// Condition type tag (`stat`, `inventory`, `flag`, `quest`, `reputation`).
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    /// Operator tag (`eq`, `gt`, `lt`, `gte`, `lte`, `ne`, `has`, `not_has`).
    #[serde(default)]
    pub operator: Option<String>,
    /// The stat, item, flag, quest, or faction the condition inspects.
    #[serde(default)]
    pub target: Option<String>,
    /// Quest reference used by `quest` conditions.
    #[serde(default)]
    pub quest_id: Option<RecordId>,
    /// The value compared against.
    #[serde(default)]
    pub value: Option<ConditionValue>,
    /// Author note.
    #[serde(default)]
    pub description: Option<String>,
}

impl ConditionRecord {
    /// A well-formed "quest must be completed" prerequisite.
    pub fn quest_completed(quest: impl Into<RecordId>) -> Self {
        Self {
            kind: Some("quest".to_string()),
            operator: Some("has".to_string()),
            target: None,
            quest_id: Some(quest.into()),
            value: Some(ConditionValue::Text("completed".to_string())),
            description: None,
        }
    }

    /// A condition built from raw tags.
    pub fn new(kind: &str, operator: &str, target: &str, value: ConditionValue) -> Self {
        Self {
            kind: Some(kind.to_string()),
            operator: Some(operator.to_string()),
            target: Some(target.to_string()),
            quest_id: None,
            value: Some(value),
            description: None,
        }
    }

    /// The quest id this condition points at, if it references a quest.
    pub fn referenced_quest(&self) -> Option<&str> {
        if let Some(id) = &self.quest_id {
            return Some(id.as_str());
        }
        let is_quest = self
            .kind
            .as_deref()
            .is_some_and(|k| k.eq_ignore_ascii_case("quest"));
        if is_quest { self.target.as_deref() } else { None }
    }
}

/// What part of the player state a condition inspects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConditionType {
    /// A numeric player stat.
    Stat,
    /// Items carried by the player.
    Inventory,
    /// Boolean story flags.
    Flag,
    /// Progress of another quest.
    Quest,
    /// Standing with a faction.
    Reputation,
}

impl ConditionType {
    /// Parse a type tag. `item` is accepted for inventory conditions.
    pub fn parse(tag: &str) -> Option<Self> {
        match tag.trim().to_lowercase().as_str() {
            "stat" => Some(Self::Stat),
            "inventory" | "item" => Some(Self::Inventory),
            "flag" => Some(Self::Flag),
            "quest" => Some(Self::Quest),
            "reputation" => Some(Self::Reputation),
            _ => None,
        }
    }

    /// Whether membership operators (`has`, `not_has`) apply to this type.
    pub fn supports_membership(self) -> bool {
        matches!(self, Self::Inventory | Self::Flag | Self::Quest)
    }
}

impl fmt::Display for ConditionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Stat => "stat",
            Self::Inventory => "inventory",
            Self::Flag => "flag",
            Self::Quest => "quest",
            Self::Reputation => "reputation",
        };
        write!(f, "{s}")
    }
}

/// Comparison operator of a condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operator {
    /// Equal.
    Eq,
    /// Greater than.
    Gt,
    /// Less than.
    Lt,
    /// Greater than or equal.
    Gte,
    /// Less than or equal.
    Lte,
    /// Not equal.
    Ne,
    /// Target is present.
    Has,
    /// Target is absent.
    NotHas,
}

impl Operator {
    /// Parse an operator tag, accepting symbolic spellings.
    pub fn parse(tag: &str) -> Option<Self> {
        match tag.trim().to_lowercase().as_str() {
            "eq" | "==" | "=" => Some(Self::Eq),
            "gt" | ">" => Some(Self::Gt),
            "lt" | "<" => Some(Self::Lt),
            "gte" | ">=" => Some(Self::Gte),
            "lte" | "<=" => Some(Self::Lte),
            "ne" | "!=" => Some(Self::Ne),
            "has" => Some(Self::Has),
            "not_has" | "nothas" | "not-has" => Some(Self::NotHas),
            _ => None,
        }
    }

    /// Whether this is `has` or `not_has`.
    pub fn is_membership(self) -> bool {
        matches!(self, Self::Has | Self::NotHas)
    }

    /// Apply the operator to two numbers. Membership operators never hold
    /// on numbers.
    pub fn compare(self, lhs: f64, rhs: f64) -> bool {
        match self {
            Self::Eq => (lhs - rhs).abs() < f64::EPSILON,
            Self::Ne => (lhs - rhs).abs() >= f64::EPSILON,
            Self::Gt => lhs > rhs,
            Self::Lt => lhs < rhs,
            Self::Gte => lhs >= rhs,
            Self::Lte => lhs <= rhs,
            Self::Has | Self::NotHas => false,
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Eq => "eq",
            Self::Gt => "gt",
            Self::Lt => "lt",
            Self::Gte => "gte",
            Self::Lte => "lte",
            Self::Ne => "ne",
            Self::Has => "has",
            Self::NotHas => "not_has",
        };
        write!(f, "{s}")
    }
}

/// Why a [`ConditionRecord`] does not fit the grammar.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConditionError {
    /// No `type` tag.
    #[error("condition is missing a type")]
    MissingType,

    /// No `operator` tag.
    #[error("condition is missing an operator")]
    MissingOperator,

    /// No `value`.
    #[error("condition is missing a value")]
    MissingValue,

    /// The `type` tag is not part of the grammar.
    #[error("unknown condition type \"{0}\"")]
    UnknownType(String),

    /// The `operator` tag is not part of the grammar.
    #[error("unknown operator \"{0}\"")]
    UnknownOperator(String),

    /// A membership operator applied to a numeric condition type.
    #[error("operator {operator} cannot be used with {kind} conditions")]
    IncompatibleOperator {
        /// The offending operator.
        operator: Operator,
        /// The condition type it was applied to.
        kind: ConditionType,
    },
}

/// A parsed, well-formed condition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Condition {
    /// What is inspected.
    pub kind: ConditionType,
    /// How it is compared.
    pub operator: Operator,
    /// The stat, item, flag, quest, or faction name.
    pub target: String,
    /// The value compared against.
    pub value: ConditionValue,
}

impl Condition {
    /// Check a persisted condition against the grammar.
    pub fn parse(record: &ConditionRecord) -> Result<Self, ConditionError> {
        let kind_tag = record.kind.as_deref().ok_or(ConditionError::MissingType)?;
        let kind = ConditionType::parse(kind_tag)
            .ok_or_else(|| ConditionError::UnknownType(kind_tag.to_string()))?;

        let op_tag = record
            .operator
            .as_deref()
            .ok_or(ConditionError::MissingOperator)?;
        let operator = Operator::parse(op_tag)
            .ok_or_else(|| ConditionError::UnknownOperator(op_tag.to_string()))?;

        if operator.is_membership() && !kind.supports_membership() {
            return Err(ConditionError::IncompatibleOperator { operator, kind });
        }

        let value = record.value.clone().ok_or(ConditionError::MissingValue)?;

        let target = record
            .target
            .clone()
            .or_else(|| record.quest_id.as_ref().map(|q| q.0.clone()))
            .unwrap_or_default();

        Ok(Self {
            kind,
            operator,
            target,
            value,
        })
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {} {}", self.kind, self.target, self.operator, self.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_quest_prerequisite() {
        let cond = Condition::parse(&ConditionRecord::quest_completed("q1")).unwrap();
        assert_eq!(cond.kind, ConditionType::Quest);
        assert_eq!(cond.operator, Operator::Has);
        assert_eq!(cond.target, "q1");
    }

    #[test]
    fn item_is_an_inventory_alias() {
        let rec = ConditionRecord::new("item", "has", "puzzle_key", ConditionValue::Bool(true));
        assert_eq!(Condition::parse(&rec).unwrap().kind, ConditionType::Inventory);
    }

    #[test]
    fn membership_rejected_for_stats_and_reputation() {
        for kind in ["stat", "reputation"] {
            for op in ["has", "not_has"] {
                let rec = ConditionRecord::new(kind, op, "x", ConditionValue::Number(1.0));
                assert!(matches!(
                    Condition::parse(&rec),
                    Err(ConditionError::IncompatibleOperator { .. })
                ));
            }
        }
    }

    #[test]
    fn membership_accepted_for_inventory_flag_quest() {
        for kind in ["inventory", "flag", "quest"] {
            let rec = ConditionRecord::new(kind, "not_has", "x", ConditionValue::Bool(true));
            assert!(Condition::parse(&rec).is_ok(), "{kind} should accept not_has");
        }
    }

    #[test]
    fn missing_fields_are_reported() {
        let mut rec = ConditionRecord::new("stat", "gte", "level", ConditionValue::Number(3.0));
        rec.value = None;
        assert_eq!(Condition::parse(&rec), Err(ConditionError::MissingValue));
        rec.operator = None;
        assert_eq!(Condition::parse(&rec), Err(ConditionError::MissingOperator));
        rec.kind = None;
        assert_eq!(Condition::parse(&rec), Err(ConditionError::MissingType));
    }

    #[test]
    fn unknown_tags_are_rejected() {
        let rec = ConditionRecord::new("weather", "eq", "rain", ConditionValue::Bool(true));
        assert_eq!(
            Condition::parse(&rec),
            Err(ConditionError::UnknownType("weather".into()))
        );
        let rec = ConditionRecord::new("stat", "approx", "level", ConditionValue::Number(1.0));
        assert_eq!(
            Condition::parse(&rec),
            Err(ConditionError::UnknownOperator("approx".into()))
        );
    }

    #[test]
    fn referenced_quest_uses_target_for_quest_type() {
        let rec = ConditionRecord::new("quest", "has", "q9", ConditionValue::Bool(true));
        assert_eq!(rec.referenced_quest(), Some("q9"));
        let rec = ConditionRecord::new("flag", "has", "q9", ConditionValue::Bool(true));
        assert_eq!(rec.referenced_quest(), None);
    }

    #[test]
    fn value_views() {
        assert_eq!(ConditionValue::Text("12".into()).as_f64(), Some(12.0));
        assert_eq!(ConditionValue::Text("charisma".into()).as_f64(), None);
        assert_eq!(ConditionValue::Number(0.0).as_bool(), Some(false));
        assert!(Operator::Gte.compare(5.0, 5.0));
        assert!(!Operator::Has.compare(1.0, 1.0));
    }
}
