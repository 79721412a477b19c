//! Type-system identifiers used as conversion table keys.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{ConvertError, Result};

/// One of the closed set of type systems the registry translates between.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum TypeSystem {
    /// External interface (contract ABI) types, e.g. `uint256`, `address[]`.
    Abi,
    /// Compiled-module runtime types, e.g. `BigInt`, `Array<Address>`.
    Runtime,
    /// Internal generic value representation, e.g. `Bytes`, `[BigInt]`.
    Value,
}

impl TypeSystem {
    /// All type systems, in declaration order.
    pub const ALL: [TypeSystem; 3] = [TypeSystem::Abi, TypeSystem::Runtime, TypeSystem::Value];

    /// Canonical lower-case name.
    pub fn as_str(&self) -> &'static str {
        match self {
            TypeSystem::Abi => "abi",
            TypeSystem::Runtime => "runtime",
            TypeSystem::Value => "value",
        }
    }

    /// Normalize a type-system name or alias.
    ///
    /// - "abi", "ethereum" → Abi
    /// - "runtime", "assemblyscript", "asc" → Runtime
    /// - "value" → Value
    pub fn normalize(name: &str) -> Result<Self> {
        match name.trim().to_lowercase().as_str() {
            "abi" | "ethereum" => Ok(TypeSystem::Abi),
            "runtime" | "assemblyscript" | "asc" => Ok(TypeSystem::Runtime),
            "value" => Ok(TypeSystem::Value),
            other => Err(ConvertError::Config(format!(
                "Unknown type system: '{}'. Supported type systems: abi, runtime, value",
                other
            ))),
        }
    }
}

impl fmt::Display for TypeSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TypeSystem {
    type Err = ConvertError;

    fn from_str(s: &str) -> Result<Self> {
        Self::normalize(s)
    }
}

impl TryFrom<String> for TypeSystem {
    type Error = ConvertError;

    fn try_from(value: String) -> Result<Self> {
        Self::normalize(&value)
    }
}

impl From<TypeSystem> for String {
    fn from(system: TypeSystem) -> Self {
        system.as_str().to_string()
    }
}

/// Which side of a conversion rule a lookup probes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Match the rule's source pattern.
    Source,
    /// Match the rule's target pattern.
    Target,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Source => f.write_str("source"),
            Direction::Target => f.write_str("target"),
        }
    }
}
