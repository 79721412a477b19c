//! Named conversion operations for the code generator.
//!
//! [`TypeConversions`] composes table resolution, descriptor construction and
//! converter invocation into one method per type-system pair and direction.
//! Every method is a pure function of its inputs and the borrowed table.

use crate::core::{ConversionDescriptor, ConversionTable, Direction, TypeSystem};
use crate::error::Result;
use crate::typemap;

/// Conversion operations over a borrowed table.
#[derive(Debug, Clone, Copy)]
pub struct TypeConversions<'t> {
    table: &'t ConversionTable,
}

impl TypeConversions<'static> {
    /// Operations over the built-in table.
    pub fn builtin() -> Self {
        Self::new(typemap::builtin())
    }
}

impl Default for TypeConversions<'static> {
    fn default() -> Self {
        Self::builtin()
    }
}

impl<'t> TypeConversions<'t> {
    pub fn new(table: &'t ConversionTable) -> Self {
        Self { table }
    }

    pub fn table(&self) -> &'t ConversionTable {
        self.table
    }

    // =========================================================================
    // Generic operations
    // =========================================================================

    /// Resolve by source type and build the descriptor.
    pub fn find_from_type(
        &self,
        from: TypeSystem,
        to: TypeSystem,
        source_type: &str,
    ) -> Result<ConversionDescriptor> {
        self.table.descriptor(from, to, Direction::Source, source_type)
    }

    /// Resolve by target type and build the descriptor.
    pub fn find_to_type(
        &self,
        from: TypeSystem,
        to: TypeSystem,
        target_type: &str,
    ) -> Result<ConversionDescriptor> {
        self.table.descriptor(from, to, Direction::Target, target_type)
    }

    /// Target type name for a source type.
    ///
    /// When the matched rule's target side is a regex, the expression text
    /// is returned (e.g. `^\[.+\]$`), since a pattern names no single type.
    pub fn type_for(&self, from: TypeSystem, to: TypeSystem, source_type: &str) -> Result<String> {
        Ok(self.find_from_type(from, to, source_type)?.to.type_name)
    }

    /// Resolve by source type and run the converter on `code`.
    pub fn convert_forward(
        &self,
        from: TypeSystem,
        to: TypeSystem,
        code: &str,
        source_type: &str,
        context: Option<&str>,
    ) -> Result<String> {
        Ok(self
            .find_from_type(from, to, source_type)?
            .convert(code, context))
    }

    /// Resolve by target type and run the converter on `code`.
    pub fn convert_backward(
        &self,
        from: TypeSystem,
        to: TypeSystem,
        code: &str,
        target_type: &str,
    ) -> Result<String> {
        Ok(self.find_to_type(from, to, target_type)?.convert(code, None))
    }

    /// Initialized default for a type via the initializer path.
    pub fn initialized_value(&self, from: TypeSystem, to: TypeSystem, type_name: &str) -> Result<String> {
        self.table.resolve_initializer(from, to, type_name)
    }

    // =========================================================================
    // ABI <-> runtime
    // =========================================================================

    pub fn runtime_type_for_abi(&self, abi_type: &str) -> Result<String> {
        self.type_for(TypeSystem::Abi, TypeSystem::Runtime, abi_type)
    }

    pub fn abi_type_for_runtime(&self, runtime_type: &str) -> Result<String> {
        self.type_for(TypeSystem::Runtime, TypeSystem::Abi, runtime_type)
    }

    /// Code converting an ABI value to its runtime type.
    ///
    /// `internal_type` names the generated class for tuple types.
    pub fn abi_to_runtime(&self, code: &str, abi_type: &str, internal_type: Option<&str>) -> Result<String> {
        self.convert_forward(TypeSystem::Abi, TypeSystem::Runtime, code, abi_type, internal_type)
    }

    /// Code converting a runtime value back into the given ABI type.
    pub fn abi_from_runtime(&self, code: &str, abi_type: &str) -> Result<String> {
        self.convert_backward(TypeSystem::Runtime, TypeSystem::Abi, code, abi_type)
    }

    // =========================================================================
    // Value <-> runtime
    // =========================================================================

    pub fn runtime_type_for_value(&self, value_type: &str) -> Result<String> {
        self.type_for(TypeSystem::Value, TypeSystem::Runtime, value_type)
    }

    pub fn value_type_for_runtime(&self, runtime_type: &str) -> Result<String> {
        self.type_for(TypeSystem::Runtime, TypeSystem::Value, runtime_type)
    }

    pub fn value_to_runtime(&self, code: &str, value_type: &str) -> Result<String> {
        self.convert_forward(TypeSystem::Value, TypeSystem::Runtime, code, value_type, None)
    }

    pub fn value_from_runtime(&self, code: &str, value_type: &str) -> Result<String> {
        self.convert_backward(TypeSystem::Runtime, TypeSystem::Value, code, value_type)
    }

    /// Default-initialized value for a runtime type.
    pub fn initialized_value_from_runtime(&self, runtime_type: &str) -> Result<String> {
        self.initialized_value(TypeSystem::Runtime, TypeSystem::Value, runtime_type)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{ConversionRule, Identity, TypePattern};
    use crate::error::ConvertError;

    fn bool_only() -> ConversionTable {
        ConversionTable::builder()
            .rule(
                TypeSystem::Abi,
                TypeSystem::Runtime,
                ConversionRule::new(TypePattern::literal("bool"), TypePattern::literal("boolean"), Identity),
            )
            .build()
    }

    #[test]
    fn test_single_rule_type_lookup() {
        let table = bool_only();
        let api = TypeConversions::new(&table);
        assert_eq!(api.runtime_type_for_abi("bool").unwrap(), "boolean");

        match api.runtime_type_for_abi("int8").unwrap_err() {
            ConvertError::NoMatchingConversion { from, to, probed, .. } => {
                assert_eq!((from, to), (TypeSystem::Abi, TypeSystem::Runtime));
                assert_eq!(probed, "int8");
            }
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_missing_pair_fails_every_operation() {
        let table = bool_only();
        let api = TypeConversions::new(&table);
        let results = [
            api.value_type_for_runtime("boolean"),
            api.value_from_runtime("x", "Boolean"),
            api.initialized_value_from_runtime("boolean"),
        ];
        for result in results {
            assert!(matches!(
                result,
                Err(ConvertError::UnsupportedTypeSystemPair {
                    from: TypeSystem::Runtime,
                    to: TypeSystem::Value
                })
            ));
        }
    }

    #[test]
    fn test_initializer_returns_converter_result_unchanged() {
        let table = ConversionTable::builder()
            .rule(
                TypeSystem::Runtime,
                TypeSystem::Value,
                ConversionRule::new(
                    TypePattern::pattern("Array<.*>").unwrap(),
                    TypePattern::literal("[Value]"),
                    |arg: &str, _: Option<&str>| format!("initToEmptyArray({})", arg),
                )
                .init("[]"),
            )
            .build();
        let api = TypeConversions::new(&table);
        assert_eq!(
            api.initialized_value_from_runtime("Array<BigInt>").unwrap(),
            "initToEmptyArray([])"
        );
    }

    #[test]
    fn test_round_trip_abi_runtime() {
        let api = TypeConversions::builtin();
        for abi in ["address", "bool", "string", "tuple"] {
            let runtime = api.runtime_type_for_abi(abi).unwrap();
            assert_eq!(api.abi_type_for_runtime(&runtime).unwrap(), abi);
        }
    }

    #[test]
    fn test_round_trip_value_runtime() {
        let api = TypeConversions::builtin();
        for value in ["Bytes", "Boolean", "Int", "BigInt", "String", "BigDecimal"] {
            let runtime = api.runtime_type_for_value(value).unwrap();
            assert_eq!(api.value_type_for_runtime(&runtime).unwrap(), value);
        }
    }

    #[test]
    fn test_builtin_abi_code() {
        let api = TypeConversions::builtin();
        assert_eq!(
            api.abi_to_runtime("event.params.value", "uint256", None).unwrap(),
            "event.params.value.toBigInt()"
        );
        assert_eq!(
            api.abi_to_runtime("call.inputs.order", "tuple", Some("PlaceOrderCallOrderStruct"))
                .unwrap(),
            "changetype<PlaceOrderCallOrderStruct>(call.inputs.order.toTuple())"
        );
        assert_eq!(
            api.abi_from_runtime("amount", "uint128").unwrap(),
            "ethereum.Value.fromUnsignedBigInt(amount)"
        );
        assert_eq!(
            api.abi_from_runtime("delta", "int64").unwrap(),
            "ethereum.Value.fromSignedBigInt(delta)"
        );
        assert_eq!(
            api.abi_from_runtime("owners", "address[2]").unwrap(),
            "ethereum.Value.fromAddressArray(owners)"
        );
    }

    #[test]
    fn test_builtin_value_code() {
        let api = TypeConversions::builtin();
        assert_eq!(api.value_to_runtime("value", "BigInt").unwrap(), "value.toBigInt()");
        assert_eq!(api.value_to_runtime("value", "[Bytes]").unwrap(), "value.toBytesArray()");
        assert_eq!(
            api.value_from_runtime("this.get('owner')", "Bytes").unwrap(),
            "Value.fromBytes(this.get('owner'))"
        );
        assert_eq!(
            api.value_from_runtime("ids", "[Token]").unwrap(),
            "Value.fromStringArray(ids)"
        );
    }

    #[test]
    fn test_builtin_initialized_values() {
        let api = TypeConversions::builtin();
        assert_eq!(
            api.initialized_value_from_runtime("BigInt").unwrap(),
            "Value.fromBigInt(BigInt.zero())"
        );
        assert_eq!(api.initialized_value_from_runtime("boolean").unwrap(), "Value.fromBoolean(false)");
        assert_eq!(
            api.initialized_value_from_runtime("Array<Address>").unwrap(),
            "Value.fromArray(new Array(0))"
        );
        assert!(matches!(
            api.initialized_value_from_runtime("u64"),
            Err(ConvertError::NoMatchingConversion { .. })
        ));
    }

    #[test]
    fn test_descriptor_exposes_endpoints() {
        let api = TypeConversions::builtin();
        let d = api
            .find_to_type(TypeSystem::Runtime, TypeSystem::Abi, "bytes8")
            .unwrap();
        assert_eq!(d.from.type_system, TypeSystem::Runtime);
        assert_eq!(d.from.type_name, "Bytes");
        assert_eq!(d.to.type_system, TypeSystem::Abi);
        assert_eq!(d.to.type_name, "bytes8");
    }
}
