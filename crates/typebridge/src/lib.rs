//! # typebridge
//!
//! Bidirectional type-conversion registry for code generators.
//!
//! Translates type names and values between three type systems:
//!
//! - **Abi**: external interface types (`uint256`, `address[]`, `tuple`)
//! - **Runtime**: compiled-module types (`BigInt`, `Array<Address>`)
//! - **Value**: the internal generic value representation (`Bytes`, `[BigInt]`)
//!
//! A [`ConversionTable`] holds an ordered rule list per `(from, to)` pair.
//! Lookups scan that list and take the **first** rule whose pattern matches;
//! the matched rule is packaged as a [`ConversionDescriptor`] and its
//! converter emits the code for the conversion.
//!
//! ## Example
//!
//! ```rust
//! use typebridge::TypeConversions;
//!
//! let api = TypeConversions::builtin();
//! assert_eq!(api.runtime_type_for_abi("uint256")?, "BigInt");
//! assert_eq!(
//!     api.abi_to_runtime("event.params.value", "uint256", None)?,
//!     "event.params.value.toBigInt()"
//! );
//! assert_eq!(
//!     api.initialized_value_from_runtime("BigInt")?,
//!     "Value.fromBigInt(BigInt.zero())"
//! );
//! # Ok::<(), typebridge::ConvertError>(())
//! ```

pub mod api;
pub mod config;
pub mod core;
pub mod error;
pub mod typemap;

// Re-exports for convenient access
pub use api::TypeConversions;
pub use config::{PairConfig, PatternConfig, RuleConfig, TableConfig};
pub use crate::core::{
    ConversionDescriptor, ConversionRule, ConversionTable, Converter, Direction, Identity,
    Template, TypePattern, TypeRef, TypeSystem,
};
pub use error::{ConvertError, Result};
pub use typemap::builtin;
