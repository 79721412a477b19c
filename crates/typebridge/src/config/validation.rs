//! Configuration validation.

use std::collections::HashSet;

use super::{PatternConfig, TableConfig};
use crate::core::Template;
use crate::error::{ConvertError, Result};

/// Validate the configuration.
pub fn validate(config: &TableConfig) -> Result<()> {
    if config.conversions.is_empty() {
        return Err(ConvertError::Config(
            "conversions must contain at least one type-system pair".into(),
        ));
    }

    let mut seen = HashSet::new();
    for (i, pair) in config.conversions.iter().enumerate() {
        if !seen.insert((pair.from, pair.to)) {
            return Err(ConvertError::Config(format!(
                "conversions[{}]: duplicate pair {} → {}",
                i, pair.from, pair.to
            )));
        }
        if pair.rules.is_empty() {
            return Err(ConvertError::Config(format!(
                "conversions[{}] ({} → {}): rules must not be empty",
                i, pair.from, pair.to
            )));
        }

        for (j, rule) in pair.rules.iter().enumerate() {
            for (side, pattern) in [("source", &rule.source), ("target", &rule.target)] {
                let empty = match pattern {
                    PatternConfig::Literal(name) => name.is_empty(),
                    PatternConfig::Pattern { pattern } => pattern.is_empty(),
                };
                if empty {
                    return Err(ConvertError::Config(format!(
                        "conversions[{}].rules[{}].{} must not be empty",
                        i, j, side
                    )));
                }
            }

            Template::parse(&rule.convert).map_err(|e| {
                ConvertError::Config(format!("conversions[{}].rules[{}].convert: {}", i, j, e))
            })?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{PairConfig, RuleConfig};
    use crate::core::TypeSystem;

    fn rule(source: &str, target: &str) -> RuleConfig {
        RuleConfig {
            source: PatternConfig::Literal(source.to_string()),
            target: PatternConfig::Literal(target.to_string()),
            convert: "{code}".to_string(),
            init: None,
        }
    }

    fn valid_config() -> TableConfig {
        TableConfig {
            conversions: vec![PairConfig {
                from: TypeSystem::Abi,
                to: TypeSystem::Runtime,
                rules: vec![rule("bool", "boolean")],
            }],
        }
    }

    #[test]
    fn test_valid_config() {
        assert!(validate(&valid_config()).is_ok());
    }

    #[test]
    fn test_no_pairs() {
        let config = TableConfig { conversions: vec![] };
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_duplicate_pair() {
        let mut config = valid_config();
        config.conversions.push(config.conversions[0].clone());
        let err = validate(&config).unwrap_err();
        assert!(err.to_string().contains("duplicate pair abi → runtime"));
    }

    #[test]
    fn test_empty_rules() {
        let mut config = valid_config();
        config.conversions[0].rules.clear();
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_empty_literal() {
        let mut config = valid_config();
        config.conversions[0].rules[0].target = PatternConfig::Literal(String::new());
        let err = validate(&config).unwrap_err();
        assert!(err.to_string().contains("rules[0].target"));
    }

    #[test]
    fn test_bad_template() {
        let mut config = valid_config();
        config.conversions[0].rules[0].convert = "{value}.toBoolean()".to_string();
        let err = validate(&config).unwrap_err();
        assert!(err.to_string().contains("rules[0].convert"));
    }
}
