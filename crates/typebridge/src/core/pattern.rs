//! Type-name patterns and the matcher that tests candidates against them.
//!
//! A [`TypePattern`] is either a literal type name, compared by exact string
//! equality, or a structural pattern backed by a [`Regex`]. Structural
//! patterns use search semantics: a candidate matches when it *contains* a
//! match, so `int(8|16)` matches `uint16`. Anchor with `^`/`$` to require a
//! whole-name match. Literals never match on substrings.

use std::fmt;

use regex::Regex;

use crate::error::{ConvertError, Result};

/// One side (source or target) of a conversion rule.
#[derive(Debug, Clone)]
pub enum TypePattern {
    /// Exact type name.
    Literal(String),
    /// Structural pattern, searched anywhere in the candidate.
    Pattern(Regex),
}

impl TypePattern {
    /// Create a literal pattern.
    pub fn literal(name: impl Into<String>) -> Self {
        TypePattern::Literal(name.into())
    }

    /// Compile a structural pattern.
    pub fn pattern(expression: &str) -> Result<Self> {
        Regex::new(expression)
            .map(TypePattern::Pattern)
            .map_err(|e| ConvertError::pattern(expression, e))
    }

    /// Whether `candidate` satisfies this pattern.
    pub fn matches(&self, candidate: &str) -> bool {
        match self {
            TypePattern::Literal(name) => name == candidate,
            TypePattern::Pattern(regex) => regex.is_match(candidate),
        }
    }

    /// The literal name, or the pattern's expression text.
    pub fn as_str(&self) -> &str {
        match self {
            TypePattern::Literal(name) => name,
            TypePattern::Pattern(regex) => regex.as_str(),
        }
    }

    pub fn is_literal(&self) -> bool {
        matches!(self, TypePattern::Literal(_))
    }
}

impl fmt::Display for TypePattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypePattern::Literal(name) => f.write_str(name),
            TypePattern::Pattern(regex) => write!(f, "/{}/", regex.as_str()),
        }
    }
}
