//! Error types for the conversion registry.

use thiserror::Error;

use crate::core::system::{Direction, TypeSystem};

/// Main error type for conversion lookups and table loading.
#[derive(Error, Debug)]
pub enum ConvertError {
    /// No rule set is registered for the (from, to) type-system pair.
    #[error("Conversions from '{from}' to '{to}' are not supported")]
    UnsupportedTypeSystemPair { from: TypeSystem, to: TypeSystem },

    /// The pair is registered but no rule matches the probed type.
    #[error("Conversion from '{from}' to '{to}' for {direction} type '{probed}' is not supported")]
    NoMatchingConversion {
        from: TypeSystem,
        to: TypeSystem,
        probed: String,
        direction: Direction,
    },

    /// Configuration error (invalid table file, unknown type system, etc.)
    #[error("Configuration error: {0}")]
    Config(String),

    /// A structural pattern failed to compile
    #[error("Invalid type pattern '{expression}': {source}")]
    Pattern {
        expression: String,
        #[source]
        source: regex::Error,
    },

    /// IO error (file operations)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML serialization/deserialization error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Exit code for configuration and input errors.
pub const EXIT_CONFIG_ERROR: u8 = 1;
/// Exit code for lookups on an unregistered type-system pair (2 is taken by
/// clap usage errors).
pub const EXIT_UNSUPPORTED_PAIR: u8 = 4;
/// Exit code for lookups that matched no rule.
pub const EXIT_NO_MATCH: u8 = 3;
/// Exit code for file system errors.
pub const EXIT_IO_ERROR: u8 = 7;

impl ConvertError {
    /// Create an unsupported-pair error.
    pub fn unsupported_pair(from: TypeSystem, to: TypeSystem) -> Self {
        ConvertError::UnsupportedTypeSystemPair { from, to }
    }

    /// Create a no-matching-conversion error.
    pub fn no_match(
        from: TypeSystem,
        to: TypeSystem,
        probed: impl Into<String>,
        direction: Direction,
    ) -> Self {
        ConvertError::NoMatchingConversion {
            from,
            to,
            probed: probed.into(),
            direction,
        }
    }

    /// Create a Pattern error
    pub fn pattern(expression: impl Into<String>, source: regex::Error) -> Self {
        ConvertError::Pattern {
            expression: expression.into(),
            source,
        }
    }

    /// Process exit code for this error.
    pub fn exit_code(&self) -> u8 {
        match self {
            ConvertError::UnsupportedTypeSystemPair { .. } => EXIT_UNSUPPORTED_PAIR,
            ConvertError::NoMatchingConversion { .. } => EXIT_NO_MATCH,
            ConvertError::Io(_) => EXIT_IO_ERROR,
            ConvertError::Config(_)
            | ConvertError::Pattern { .. }
            | ConvertError::Yaml(_)
            | ConvertError::Json(_) => EXIT_CONFIG_ERROR,
        }
    }

    /// Format error with full details including error chain
    pub fn format_detailed(&self) -> String {
        let mut output = format!("Error: {}\n", self);

        let mut source = std::error::Error::source(self);
        let mut depth = 1;
        while let Some(err) = source {
            output.push_str(&format!("\nCaused by:\n  {}: {}", depth, err));
            source = err.source();
            depth += 1;
        }

        output
    }
}

/// Result type alias for conversion operations.
pub type Result<T> = std::result::Result<T, ConvertError>;
