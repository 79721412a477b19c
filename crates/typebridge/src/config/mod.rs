//! Conversion table loading and validation.

mod types;
mod validation;

pub use types::*;

use std::path::Path;

use tracing::debug;

use crate::core::{ConversionRule, ConversionTable, Template, TypePattern};
use crate::error::Result;

impl TableConfig {
    /// Load a table description from a YAML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        debug!(path = %path.display(), "loaded conversion table file");
        Self::from_yaml(&content)
    }

    /// Parse a table description from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: TableConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        validation::validate(self)
    }

    /// Compile patterns and templates into an immutable table.
    pub fn build(&self) -> Result<ConversionTable> {
        let mut builder = ConversionTable::builder();
        for pair in &self.conversions {
            let rules = pair
                .rules
                .iter()
                .map(RuleConfig::compile)
                .collect::<Result<Vec<_>>>()?;
            builder = builder.rules(pair.from, pair.to, rules);
        }
        Ok(builder.build())
    }
}

impl RuleConfig {
    fn compile(&self) -> Result<ConversionRule> {
        let mut rule = ConversionRule::with_template(
            self.source.compile()?,
            self.target.compile()?,
            Template::parse(&self.convert)?,
        );
        rule.init_arg = self.init.clone();
        Ok(rule)
    }
}

impl PatternConfig {
    /// Turn the serialized form into a matcher.
    pub fn compile(&self) -> Result<TypePattern> {
        match self {
            PatternConfig::Literal(name) => Ok(TypePattern::literal(name.as_str())),
            PatternConfig::Pattern { pattern } => TypePattern::pattern(pattern),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::TypeConversions;
    use crate::core::TypeSystem;
    use crate::error::ConvertError;
    use std::io::Write;

    const TABLE: &str = r#"
conversions:
  - from: abi
    to: runtime
    rules:
      - source: bool
        target: boolean
      - source: { pattern: "^int(8|16|24|32)$" }
        target: i32
        convert: "{code}.toI32()"
      - source: { pattern: "^u?int[0-9]+$" }
        target: BigInt
        convert: "{code}.toBigInt()"
  - from: AssemblyScript
    to: value
    rules:
      - source: { pattern: "Array<.*>" }
        target: "[Value]"
        convert: "Value.fromArray({code})"
        init: "[]"
"#;

    #[test]
    fn test_from_yaml_builds_table() {
        let config = TableConfig::from_yaml(TABLE).unwrap();
        assert_eq!(config.conversions.len(), 2);
        assert_eq!(config.conversions[1].from, TypeSystem::Runtime);
        assert_eq!(config.conversions[0].rules[0].convert, "{code}");

        let table = config.build().unwrap();
        let api = TypeConversions::new(&table);
        assert_eq!(api.runtime_type_for_abi("bool").unwrap(), "boolean");
        assert_eq!(api.abi_to_runtime("x", "int16", None).unwrap(), "x.toI32()");
        assert_eq!(api.abi_to_runtime("x", "uint64", None).unwrap(), "x.toBigInt()");
        assert_eq!(
            api.initialized_value_from_runtime("Array<string>").unwrap(),
            "Value.fromArray([])"
        );
    }

    #[test]
    fn test_pattern_config_forms() {
        let config = TableConfig::from_yaml(TABLE).unwrap();
        let rules = &config.conversions[0].rules;
        assert_eq!(rules[0].source, PatternConfig::Literal("bool".to_string()));
        assert!(matches!(rules[1].source, PatternConfig::Pattern { .. }));
        assert!(rules[0].source.compile().unwrap().is_literal());
    }

    #[test]
    fn test_invalid_pattern_fails_build() {
        let yaml = r#"
conversions:
  - from: abi
    to: runtime
    rules:
      - source: { pattern: "int(" }
        target: i32
"#;
        let config = TableConfig::from_yaml(yaml).unwrap();
        let err = config.build().unwrap_err();
        assert!(matches!(err, ConvertError::Pattern { .. }));
    }

    #[test]
    fn test_unknown_type_system() {
        let yaml = r#"
conversions:
  - from: abi
    to: wasm
    rules:
      - source: bool
        target: bool
"#;
        assert!(matches!(
            TableConfig::from_yaml(yaml),
            Err(ConvertError::Yaml(_))
        ));
    }

    #[test]
    fn test_unknown_field_rejected() {
        let yaml = r#"
conversions:
  - from: abi
    to: runtime
    rules:
      - source: bool
        target: boolean
        priority: 1
"#;
        assert!(TableConfig::from_yaml(yaml).is_err());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{}", TABLE).unwrap();
        let config = TableConfig::load(file.path()).unwrap();
        assert_eq!(config.build().unwrap().len(), 4);
    }

    #[test]
    fn test_load_missing_file() {
        let err = TableConfig::load("does/not/exist.yaml").unwrap_err();
        assert!(matches!(err, ConvertError::Io(_)));
    }
}
