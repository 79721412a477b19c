//! Conversion table and rule resolution.
//!
//! The [`ConversionTable`] maps an ordered `(from, to)` type-system pair to an
//! ordered sequence of [`ConversionRule`]s. Resolution scans a pair's rules in
//! stored order and returns the first one whose probed side matches; there is
//! no specificity scoring, so table order decides precedence.
//!
//! Tables are assembled with [`ConversionTableBuilder`] and are immutable once
//! built, so a single table can be shared across threads without locking.

use std::collections::HashMap;
use std::fmt;

use tracing::debug;

use super::rule::{ConversionDescriptor, ConversionRule};
use super::system::{Direction, TypeSystem};
use crate::error::{ConvertError, Result};

/// Immutable registry of conversion rules keyed by type-system pair.
#[derive(Clone, Default)]
pub struct ConversionTable {
    rules: HashMap<(TypeSystem, TypeSystem), Vec<ConversionRule>>,
}

impl ConversionTable {
    /// Start building a table.
    pub fn builder() -> ConversionTableBuilder {
        ConversionTableBuilder::default()
    }

    /// Rules registered for a pair, in resolution order.
    pub fn rules(&self, from: TypeSystem, to: TypeSystem) -> Result<&[ConversionRule]> {
        self.rules
            .get(&(from, to))
            .map(Vec::as_slice)
            .ok_or_else(|| ConvertError::unsupported_pair(from, to))
    }

    /// Check if a rule set is registered for a pair.
    pub fn has_pair(&self, from: TypeSystem, to: TypeSystem) -> bool {
        self.rules.contains_key(&(from, to))
    }

    /// All registered pairs, sorted.
    pub fn pairs(&self) -> Vec<(TypeSystem, TypeSystem)> {
        let mut pairs: Vec<_> = self.rules.keys().copied().collect();
        pairs.sort();
        pairs
    }

    /// Total number of rules across all pairs.
    pub fn len(&self) -> usize {
        self.rules.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Find the first rule whose `direction` side matches `probed`.
    pub fn resolve(
        &self,
        from: TypeSystem,
        to: TypeSystem,
        direction: Direction,
        probed: &str,
    ) -> Result<&ConversionRule> {
        let rules = self.rules(from, to)?;

        match rules
            .iter()
            .enumerate()
            .find(|(_, rule)| rule.matches(direction, probed))
        {
            Some((index, rule)) => {
                debug!(
                    %from, %to, %direction, probed,
                    rule = index,
                    "resolved conversion"
                );
                Ok(rule)
            }
            None => Err(ConvertError::no_match(from, to, probed, direction)),
        }
    }

    /// First rule whose source pattern matches `source_type`.
    pub fn resolve_by_source(
        &self,
        from: TypeSystem,
        to: TypeSystem,
        source_type: &str,
    ) -> Result<&ConversionRule> {
        self.resolve(from, to, Direction::Source, source_type)
    }

    /// First rule whose target pattern matches `target_type`.
    pub fn resolve_by_target(
        &self,
        from: TypeSystem,
        to: TypeSystem,
        target_type: &str,
    ) -> Result<&ConversionRule> {
        self.resolve(from, to, Direction::Target, target_type)
    }

    /// Resolve by source type and run the rule's converter on its init argument.
    ///
    /// A rule without an init argument is invoked with an empty string.
    pub fn resolve_initializer(
        &self,
        from: TypeSystem,
        to: TypeSystem,
        type_name: &str,
    ) -> Result<String> {
        let rule = self.resolve_by_source(from, to, type_name)?;
        let descriptor = ConversionDescriptor::new(from, to, rule, Direction::Source, type_name);
        Ok(descriptor.convert(rule.init_arg.as_deref().unwrap_or_default(), None))
    }

    /// Resolve and package the matched rule as a descriptor.
    pub fn descriptor(
        &self,
        from: TypeSystem,
        to: TypeSystem,
        direction: Direction,
        probed: &str,
    ) -> Result<ConversionDescriptor> {
        let rule = self.resolve(from, to, direction, probed)?;
        Ok(ConversionDescriptor::new(from, to, rule, direction, probed))
    }
}

impl fmt::Debug for ConversionTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut map = f.debug_map();
        for (from, to) in self.pairs() {
            let count = self.rules.get(&(from, to)).map(Vec::len).unwrap_or_default();
            map.entry(&format_args!("{} → {}", from, to), &count);
        }
        map.finish()
    }
}

/// Accumulates rules before freezing them into a [`ConversionTable`].
#[derive(Default)]
pub struct ConversionTableBuilder {
    rules: HashMap<(TypeSystem, TypeSystem), Vec<ConversionRule>>,
}

impl ConversionTableBuilder {
    /// Append a rule to the end of a pair's sequence.
    pub fn rule(mut self, from: TypeSystem, to: TypeSystem, rule: ConversionRule) -> Self {
        self.rules.entry((from, to)).or_default().push(rule);
        self
    }

    /// Append several rules to a pair's sequence, preserving their order.
    pub fn rules(
        mut self,
        from: TypeSystem,
        to: TypeSystem,
        rules: impl IntoIterator<Item = ConversionRule>,
    ) -> Self {
        self.rules.entry((from, to)).or_default().extend(rules);
        self
    }

    pub fn build(self) -> ConversionTable {
        debug!(
            pairs = self.rules.len(),
            rules = self.rules.values().map(Vec::len).sum::<usize>(),
            "built conversion table"
        );
        ConversionTable { rules: self.rules }
    }
}
