//! Core abstractions of the conversion registry.
//!
//! - [`system`]: type-system identifiers and lookup direction
//! - [`pattern`]: literal and structural type patterns
//! - [`convert`]: the opaque convert functions attached to rules
//! - [`rule`]: conversion rules and resolved descriptors
//! - [`table`]: the pair-keyed rule table and first-match resolution

pub mod convert;
pub mod pattern;
pub mod rule;
pub mod system;
pub mod table;

pub use convert::{Converter, Identity, Template};
pub use pattern::TypePattern;
pub use rule::{ConversionDescriptor, ConversionRule, TypeRef};
pub use system::{Direction, TypeSystem};
pub use table::{ConversionTable, ConversionTableBuilder};
