//! Serialized form of a conversion table.

use serde::{Deserialize, Serialize};

use crate::core::TypeSystem;

/// Root configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TableConfig {
    /// Rule sets, one per (from, to) pair.
    pub conversions: Vec<PairConfig>,
}

/// Ordered rules for one type-system pair.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PairConfig {
    pub from: TypeSystem,
    pub to: TypeSystem,
    /// Rules in resolution order.
    #[serde(default)]
    pub rules: Vec<RuleConfig>,
}

/// One conversion rule.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RuleConfig {
    pub source: PatternConfig,
    pub target: PatternConfig,

    /// Convert template (default: "{code}").
    #[serde(default = "default_convert")]
    pub convert: String,

    /// Argument handed to `convert` by initializer lookups.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub init: Option<String>,
}

/// A bare string is a literal; `{ pattern: ... }` is a structural pattern.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PatternConfig {
    Literal(String),
    Pattern { pattern: String },
}

fn default_convert() -> String {
    "{code}".to_string()
}
