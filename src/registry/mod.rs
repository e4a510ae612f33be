//! The flag registry.
//!
//! A [`FlagRegistry`] is built once from an ordered declaration list and
//! never mutated afterwards. It holds:
//! - every symbol in declaration order,
//! - name -> symbol and value -> symbols (aliases, sorted by name),
//! - one [`GroupInfo`] per usage group.
//!
//! The registry for the compiled-in table is published process-wide
//! through [`FlagRegistry::builtin`].

mod builder;
mod group_index;

use std::collections::HashMap;
use std::sync::OnceLock;

pub use group_index::GroupInfo;

use crate::error::RegistryError;
use crate::group::UsageGroup;
use crate::symbol::{FlagDecl, FlagSymbol};
use crate::table::FLAG_DECLARATIONS;

static BUILTIN: OnceLock<FlagRegistry> = OnceLock::new();

/// Immutable indices over a validated set of flag declarations.
#[derive(Debug, Clone)]
pub struct FlagRegistry {
    symbols: Vec<FlagSymbol>,
    by_name: HashMap<String, usize>,
    by_value: HashMap<u64, Vec<usize>>,
    groups: Vec<GroupInfo>,
}

impl FlagRegistry {
    /// Returns the registry for the compiled-in declaration table.
    ///
    /// The table is validated and indexed on first call; every caller, on
    /// any thread, observes the same fully built registry.
    ///
    /// # Panics
    ///
    /// Panics if the compiled-in table is invalid. The table is a constant,
    /// so this only happens when a declaration was edited incorrectly.
    #[must_use]
    pub fn builtin() -> &'static Self {
        BUILTIN.get_or_init(|| match Self::try_builtin_table() {
            Ok(registry) => registry,
            Err(err) => panic!("built-in flag table is invalid: {err}"),
        })
    }

    /// Builds a fresh registry from the compiled-in table.
    ///
    /// # Errors
    ///
    /// Any [`RegistryError`] the table triggers.
    pub fn try_builtin_table() -> Result<Self, RegistryError> {
        Self::from_declarations(FLAG_DECLARATIONS.iter().copied())
    }

    /// Builds a registry from declarations, in order.
    ///
    /// # Errors
    ///
    /// Returns a [`RegistryError`] on duplicate names, unknown or forward
    /// aggregate references, bits outside 0..64, empty aggregates, flags
    /// without a group, or two names for one value within a group.
    pub fn from_declarations<'a, I>(decls: I) -> Result<Self, RegistryError>
    where
        I: IntoIterator<Item = FlagDecl<'a>>,
    {
        builder::build(decls)
    }

    /// Number of registered symbols.
    #[must_use]
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    /// Returns true if no symbol is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Returns the index for one usage group.
    #[must_use]
    pub fn group(&self, group: UsageGroup) -> &GroupInfo {
        &self.groups[group.index()]
    }

    /// Returns every group index, in group bit order.
    #[must_use]
    pub fn groups(&self) -> &[GroupInfo] {
        &self.groups
    }

    pub(crate) fn symbol_at(&self, idx: usize) -> &FlagSymbol {
        &self.symbols[idx]
    }

    pub(crate) fn symbols(&self) -> &[FlagSymbol] {
        &self.symbols
    }

    pub(crate) fn index_of(&self, name: &str) -> Option<usize> {
        self.by_name.get(name).copied()
    }

    /// Symbols whose value is exactly `value`, sorted by name.
    pub(crate) fn matching(&self, value: u64) -> impl Iterator<Item = &FlagSymbol> {
        self.by_value
            .get(&value)
            .into_iter()
            .flatten()
            .map(move |&idx| &self.symbols[idx])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table;

    #[test]
    fn test_builtin_table_is_valid() {
        let registry = FlagRegistry::try_builtin_table().unwrap();
        assert_eq!(registry.len(), FLAG_DECLARATIONS.len());
    }

    #[test]
    fn test_builtin_is_shared() {
        let a = FlagRegistry::builtin();
        let b = FlagRegistry::builtin();
        assert!(std::ptr::eq(a, b));
    }

    #[test]
    fn test_group_maps_are_injective() {
        let registry = FlagRegistry::builtin();
        for info in registry.groups() {
            assert_eq!(info.by_name().len(), info.by_value().len(), "{}", info.group());
            for (value, name) in info.by_value() {
                assert_eq!(info.by_name().get(name), Some(value));
            }
        }
    }

    #[test]
    fn test_matching_is_sorted_by_name() {
        let registry = FlagRegistry::builtin();
        let names: Vec<_> = registry
            .matching(table::SEARCH_INCLUDE_NAME_ONLY)
            .map(FlagSymbol::name)
            .collect();
        assert_eq!(names, vec!["ExportIncludeNameOnly", "SearchIncludeNameOnly"]);
        assert_eq!(registry.matching(1 << 17).count(), 0);
    }

    #[test]
    fn test_every_group_has_members() {
        let registry = FlagRegistry::builtin();
        for info in registry.groups() {
            assert!(!info.is_empty(), "{} has no flags", info.group());
        }
    }
}
