//! Conversion rules and the descriptors built from matched rules.

use std::fmt;
use std::sync::Arc;

use serde::Serialize;

use super::convert::{Converter, Template};
use super::pattern::TypePattern;
use super::system::{Direction, TypeSystem};

/// One ordered entry in a pair's rule sequence.
#[derive(Clone)]
pub struct ConversionRule {
    /// Pattern for types in the source system.
    pub source: TypePattern,
    /// Pattern for types in the target system.
    pub target: TypePattern,
    /// Emits the conversion code.
    pub convert: Arc<dyn Converter>,
    /// Argument handed to `convert` by initializer lookups.
    pub init_arg: Option<String>,
}

impl ConversionRule {
    /// Create a rule with an arbitrary converter.
    pub fn new(source: TypePattern, target: TypePattern, convert: impl Converter + 'static) -> Self {
        Self {
            source,
            target,
            convert: Arc::new(convert),
            init_arg: None,
        }
    }

    /// Create a rule whose converter is a parsed template.
    pub fn with_template(source: TypePattern, target: TypePattern, template: Template) -> Self {
        Self::new(source, target, template)
    }

    /// Attach the init argument used by initializer lookups.
    pub fn init(mut self, arg: impl Into<String>) -> Self {
        self.init_arg = Some(arg.into());
        self
    }

    /// The pattern probed by a lookup in the given direction.
    pub fn side(&self, direction: Direction) -> &TypePattern {
        match direction {
            Direction::Source => &self.source,
            Direction::Target => &self.target,
        }
    }

    /// Whether `candidate` satisfies the probed side.
    pub fn matches(&self, direction: Direction, candidate: &str) -> bool {
        self.side(direction).matches(candidate)
    }
}

impl fmt::Debug for ConversionRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConversionRule")
            .field("source", &self.source)
            .field("target", &self.target)
            .field("init_arg", &self.init_arg)
            .finish_non_exhaustive()
    }
}

/// A type in a specific type system.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TypeRef {
    pub type_system: TypeSystem,
    #[serde(rename = "type")]
    pub type_name: String,
}

/// Resolved result of a successful lookup.
///
/// The probed side carries the caller's concrete type name. The other side
/// carries the rule's literal name, or the expression text when that side is
/// a structural pattern.
#[derive(Clone, Serialize)]
pub struct ConversionDescriptor {
    pub from: TypeRef,
    pub to: TypeRef,
    #[serde(skip)]
    pub convert: Arc<dyn Converter>,
}

impl ConversionDescriptor {
    /// Package a matched rule.
    pub fn new(
        from: TypeSystem,
        to: TypeSystem,
        rule: &ConversionRule,
        direction: Direction,
        probed: &str,
    ) -> Self {
        let (source_type, target_type) = match direction {
            Direction::Source => (probed.to_string(), rule.target.as_str().to_string()),
            Direction::Target => (rule.source.as_str().to_string(), probed.to_string()),
        };

        Self {
            from: TypeRef {
                type_system: from,
                type_name: source_type,
            },
            to: TypeRef {
                type_system: to,
                type_name: target_type,
            },
            convert: Arc::clone(&rule.convert),
        }
    }

    /// Invoke the rule's converter.
    pub fn convert(&self, code: &str, context: Option<&str>) -> String {
        self.convert.convert(code, context)
    }
}

impl fmt::Debug for ConversionDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConversionDescriptor")
            .field("from", &self.from)
            .field("to", &self.to)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::convert::Identity;

    fn array_rule() -> ConversionRule {
        ConversionRule::new(
            TypePattern::literal("Array<Address>"),
            TypePattern::pattern(r"^address\[([0-9]+)?\]$").unwrap(),
            |code: &str, _: Option<&str>| format!("ethereum.Value.fromAddressArray({})", code),
        )
    }

    #[test]
    fn test_descriptor_by_source_uses_probed_name() {
        let rule = ConversionRule::new(TypePattern::pattern("^int(8|16)$").unwrap(), TypePattern::literal("i32"), Identity);
        let d = ConversionDescriptor::new(TypeSystem::Abi, TypeSystem::Runtime, &rule, Direction::Source, "int16");
        assert_eq!(d.from.type_system, TypeSystem::Abi);
        assert_eq!(d.from.type_name, "int16");
        assert_eq!(d.to.type_system, TypeSystem::Runtime);
        assert_eq!(d.to.type_name, "i32");
    }

    #[test]
    fn test_descriptor_by_target_uses_probed_name() {
        let d = ConversionDescriptor::new(
            TypeSystem::Runtime,
            TypeSystem::Abi,
            &array_rule(),
            Direction::Target,
            "address[4]",
        );
        assert_eq!(d.from.type_name, "Array<Address>");
        assert_eq!(d.to.type_name, "address[4]");
        assert_eq!(d.convert("xs", None), "ethereum.Value.fromAddressArray(xs)");
    }

    #[test]
    fn test_descriptor_unprobed_pattern_side_is_expression_text() {
        let rule = array_rule();
        let d = ConversionDescriptor::new(TypeSystem::Runtime, TypeSystem::Abi, &rule, Direction::Source, "Array<Address>");
        assert_eq!(d.to.type_name, r"^address\[([0-9]+)?\]$");
    }

    #[test]
    fn test_descriptor_serializes_endpoints() {
        let rule = ConversionRule::new(TypePattern::literal("bool"), TypePattern::literal("boolean"), Identity);
        let d = ConversionDescriptor::new(TypeSystem::Abi, TypeSystem::Runtime, &rule, Direction::Source, "bool");
        let json = serde_json::to_value(&d).unwrap();
        assert_eq!(json["from"]["type_system"], "abi");
        assert_eq!(json["from"]["type"], "bool");
        assert_eq!(json["to"]["type"], "boolean");
        assert!(json.get("convert").is_none());
    }

    #[test]
    fn test_init_arg() {
        let rule = array_rule().init("[]");
        assert_eq!(rule.init_arg.as_deref(), Some("[]"));
        assert!(rule.matches(Direction::Target, "address[]"));
        assert!(!rule.matches(Direction::Source, "Array<Bytes>"));
    }
}
