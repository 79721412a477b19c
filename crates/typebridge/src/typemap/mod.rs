//! Built-in type map between ABI, runtime and value types.
//!
//! Registers the four pairs the [`TypeConversions`](crate::api::TypeConversions)
//! facade uses:
//!
//! | Pair              | Example                         |
//! | ----------------- | ------------------------------- |
//! | abi → runtime     | `uint256` → `BigInt`            |
//! | runtime → abi     | `Array<Address>` → `address[]`  |
//! | value → runtime   | `[Bytes]` → `Array<Bytes>`      |
//! | runtime → value   | `BigInt` → `BigInt`             |
//!
//! Rule order is significant: narrower rules (e.g. small integers mapping to
//! `i32`) come before the wider patterns that would also match them.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::core::{ConversionRule, ConversionTable, TypePattern, TypeSystem};

static BUILTIN: Lazy<ConversionTable> = Lazy::new(builtin_table);

/// The process-wide built-in table.
pub fn builtin() -> &'static ConversionTable {
    &BUILTIN
}

fn lit(name: &str) -> TypePattern {
    TypePattern::literal(name)
}

// Every expression below is a fixed literal; `test_builtin_table_compiles`
// builds the table outside the `Lazy` so a bad one fails in tests.
fn re(expression: &'static str) -> TypePattern {
    TypePattern::Pattern(Regex::new(expression).expect("built-in type pattern must compile"))
}

/// `code => <code>.<method>()`
fn call(method: &'static str) -> impl Fn(&str, Option<&str>) -> String + Send + Sync {
    move |code: &str, _: Option<&str>| format!("{}.{}()", code, method)
}

/// `code => <func>(<code>)`
fn wrap(func: &'static str) -> impl Fn(&str, Option<&str>) -> String + Send + Sync {
    move |code: &str, _: Option<&str>| format!("{}({})", func, code)
}

fn abi_to_runtime() -> Vec<ConversionRule> {
    vec![
        ConversionRule::new(lit("address"), lit("Address"), call("toAddress")),
        ConversionRule::new(lit("bool"), lit("boolean"), call("toBoolean")),
        ConversionRule::new(lit("byte"), lit("Bytes"), call("toBytes")),
        ConversionRule::new(re(r"^bytes([0-9]+)?$"), lit("Bytes"), call("toBytes")),
        ConversionRule::new(re(r"^int(8|16|24|32)$"), lit("i32"), call("toI32")),
        ConversionRule::new(re(r"^uint(8|16|24)$"), lit("i32"), call("toI32")),
        ConversionRule::new(re(r"^u?int[0-9]+$"), lit("BigInt"), call("toBigInt")),
        ConversionRule::new(lit("string"), lit("string"), call("toString")),
        ConversionRule::new(re(r"^address\[([0-9]+)?\]$"), lit("Array<Address>"), call("toAddressArray")),
        ConversionRule::new(re(r"^bool\[([0-9]+)?\]$"), lit("Array<boolean>"), call("toBooleanArray")),
        ConversionRule::new(re(r"^byte\[([0-9]+)?\]$"), lit("Array<Bytes>"), call("toBytesArray")),
        ConversionRule::new(re(r"^bytes([0-9]+)?\[([0-9]+)?\]$"), lit("Array<Bytes>"), call("toBytesArray")),
        ConversionRule::new(re(r"^int(8|16|24|32)\[([0-9]+)?\]$"), lit("Array<i32>"), call("toI32Array")),
        ConversionRule::new(re(r"^uint(8|16|24)\[([0-9]+)?\]$"), lit("Array<i32>"), call("toI32Array")),
        ConversionRule::new(re(r"^u?int[0-9]+\[([0-9]+)?\]$"), lit("Array<BigInt>"), call("toBigIntArray")),
        ConversionRule::new(re(r"^string\[([0-9]+)?\]$"), lit("Array<string>"), call("toStringArray")),
        ConversionRule::new(
            lit("tuple"),
            lit("ethereum.Tuple"),
            |code: &str, tuple_class: Option<&str>| {
                format!(
                    "changetype<{}>({}.toTuple())",
                    tuple_class.unwrap_or("ethereum.Tuple"),
                    code
                )
            },
        ),
        ConversionRule::new(
            re(r"^tuple\[([0-9]+)?\]$"),
            lit("Array<ethereum.Tuple>"),
            |code: &str, tuple_class: Option<&str>| {
                format!(
                    "{}.toTupleArray<{}>()",
                    code,
                    tuple_class.unwrap_or("ethereum.Tuple")
                )
            },
        ),
    ]
}

fn runtime_to_abi() -> Vec<ConversionRule> {
    vec![
        ConversionRule::new(lit("Address"), lit("address"), wrap("ethereum.Value.fromAddress")),
        ConversionRule::new(lit("boolean"), lit("bool"), wrap("ethereum.Value.fromBoolean")),
        ConversionRule::new(lit("Bytes"), lit("bytes"), wrap("ethereum.Value.fromBytes")),
        ConversionRule::new(lit("Bytes"), lit("byte"), wrap("ethereum.Value.fromFixedBytes")),
        ConversionRule::new(lit("Bytes"), re(r"^bytes[0-9]+$"), wrap("ethereum.Value.fromFixedBytes")),
        ConversionRule::new(lit("i32"), re(r"^int(8|16|24|32)$"), wrap("ethereum.Value.fromI32")),
        ConversionRule::new(
            lit("i32"),
            re(r"^uint(8|16|24)$"),
            |code: &str, _: Option<&str>| {
                format!("ethereum.Value.fromUnsignedBigInt(BigInt.fromI32({}))", code)
            },
        ),
        ConversionRule::new(lit("BigInt"), re(r"^uint[0-9]+$"), wrap("ethereum.Value.fromUnsignedBigInt")),
        ConversionRule::new(lit("BigInt"), re(r"^int[0-9]+$"), wrap("ethereum.Value.fromSignedBigInt")),
        ConversionRule::new(lit("string"), lit("string"), wrap("ethereum.Value.fromString")),
        ConversionRule::new(lit("Array<Address>"), re(r"^address\[([0-9]+)?\]$"), wrap("ethereum.Value.fromAddressArray")),
        ConversionRule::new(lit("Array<boolean>"), re(r"^bool\[([0-9]+)?\]$"), wrap("ethereum.Value.fromBooleanArray")),
        ConversionRule::new(lit("Array<Bytes>"), re(r"^byte\[([0-9]+)?\]$"), wrap("ethereum.Value.fromFixedBytesArray")),
        ConversionRule::new(lit("Array<Bytes>"), re(r"^bytes\[([0-9]+)?\]$"), wrap("ethereum.Value.fromBytesArray")),
        ConversionRule::new(lit("Array<Bytes>"), re(r"^bytes[0-9]+\[([0-9]+)?\]$"), wrap("ethereum.Value.fromFixedBytesArray")),
        ConversionRule::new(lit("Array<i32>"), re(r"^int(8|16|24|32)\[([0-9]+)?\]$"), wrap("ethereum.Value.fromI32Array")),
        ConversionRule::new(lit("Array<i32>"), re(r"^uint(8|16|24)\[([0-9]+)?\]$"), wrap("ethereum.Value.fromI32Array")),
        ConversionRule::new(lit("Array<BigInt>"), re(r"^uint[0-9]+\[([0-9]+)?\]$"), wrap("ethereum.Value.fromUnsignedBigIntArray")),
        ConversionRule::new(lit("Array<BigInt>"), re(r"^int[0-9]+\[([0-9]+)?\]$"), wrap("ethereum.Value.fromSignedBigIntArray")),
        ConversionRule::new(lit("Array<string>"), re(r"^string\[([0-9]+)?\]$"), wrap("ethereum.Value.fromStringArray")),
        ConversionRule::new(lit("ethereum.Tuple"), lit("tuple"), wrap("ethereum.Value.fromTuple")),
        ConversionRule::new(lit("Array<ethereum.Tuple>"), re(r"^tuple\[([0-9]+)?\]$"), wrap("ethereum.Value.fromTupleArray")),
    ]
}

fn value_to_runtime() -> Vec<ConversionRule> {
    vec![
        ConversionRule::new(lit("Bytes"), lit("Bytes"), call("toBytes")),
        ConversionRule::new(lit("Boolean"), lit("boolean"), call("toBoolean")),
        ConversionRule::new(lit("Int"), lit("i32"), call("toI32")),
        ConversionRule::new(lit("Int8"), lit("i64"), call("toI64")),
        ConversionRule::new(lit("BigInt"), lit("BigInt"), call("toBigInt")),
        ConversionRule::new(lit("ID"), lit("string"), call("toString")),
        ConversionRule::new(lit("String"), lit("string"), call("toString")),
        ConversionRule::new(lit("BigDecimal"), lit("BigDecimal"), call("toBigDecimal")),
        ConversionRule::new(re(r"^\[Bytes\]$"), lit("Array<Bytes>"), call("toBytesArray")),
        ConversionRule::new(re(r"^\[Boolean\]$"), lit("Array<boolean>"), call("toBooleanArray")),
        ConversionRule::new(re(r"^\[Int\]$"), lit("Array<i32>"), call("toI32Array")),
        ConversionRule::new(re(r"^\[BigInt\]$"), lit("Array<BigInt>"), call("toBigIntArray")),
        ConversionRule::new(re(r"^\[(ID|String)\]$"), lit("Array<string>"), call("toStringArray")),
        ConversionRule::new(re(r"^\[BigDecimal\]$"), lit("Array<BigDecimal>"), call("toBigDecimalArray")),
        // Entity references are stored by ID.
        ConversionRule::new(re(r"^\[.+\]$"), lit("Array<string>"), call("toStringArray")),
        ConversionRule::new(re(r".+"), lit("string"), call("toString")),
    ]
}

fn runtime_to_value() -> Vec<ConversionRule> {
    vec![
        ConversionRule::new(lit("Bytes"), lit("Bytes"), wrap("Value.fromBytes")).init("Bytes.empty()"),
        ConversionRule::new(lit("Address"), lit("Bytes"), wrap("Value.fromBytes")).init("Address.zero()"),
        ConversionRule::new(lit("boolean"), lit("Boolean"), wrap("Value.fromBoolean")).init("false"),
        ConversionRule::new(lit("i32"), lit("Int"), wrap("Value.fromI32")).init("0"),
        ConversionRule::new(lit("i64"), lit("Int8"), wrap("Value.fromI64")).init("0"),
        ConversionRule::new(lit("BigInt"), lit("BigInt"), wrap("Value.fromBigInt")).init("BigInt.zero()"),
        ConversionRule::new(lit("string"), lit("String"), wrap("Value.fromString")).init("''"),
        ConversionRule::new(lit("BigDecimal"), lit("BigDecimal"), wrap("Value.fromBigDecimal"))
            .init("BigDecimal.zero()"),
        ConversionRule::new(lit("Array<Bytes>"), re(r"^\[Bytes\]$"), wrap("Value.fromBytesArray"))
            .init("new Array(0)"),
        ConversionRule::new(lit("Array<boolean>"), re(r"^\[Boolean\]$"), wrap("Value.fromBooleanArray"))
            .init("new Array(0)"),
        ConversionRule::new(lit("Array<i32>"), re(r"^\[Int\]$"), wrap("Value.fromI32Array"))
            .init("new Array(0)"),
        ConversionRule::new(lit("Array<BigInt>"), re(r"^\[BigInt\]$"), wrap("Value.fromBigIntArray"))
            .init("new Array(0)"),
        ConversionRule::new(lit("Array<BigDecimal>"), re(r"^\[BigDecimal\]$"), wrap("Value.fromBigDecimalArray"))
            .init("new Array(0)"),
        ConversionRule::new(lit("Array<string>"), re(r"^\[.+\]$"), wrap("Value.fromStringArray"))
            .init("new Array(0)"),
        ConversionRule::new(re(r"^Array<.+>$"), re(r"^\[.+\]$"), wrap("Value.fromArray"))
            .init("new Array(0)"),
        ConversionRule::new(lit("Value"), re(r".+"), |code: &str, _: Option<&str>| code.to_string())
            .init("Value.fromNull()"),
    ]
}

/// Build the built-in table.
pub fn builtin_table() -> ConversionTable {
    ConversionTable::builder()
        .rules(TypeSystem::Abi, TypeSystem::Runtime, abi_to_runtime())
        .rules(TypeSystem::Runtime, TypeSystem::Abi, runtime_to_abi())
        .rules(TypeSystem::Value, TypeSystem::Runtime, value_to_runtime())
        .rules(TypeSystem::Runtime, TypeSystem::Value, runtime_to_value())
        .build()
}
