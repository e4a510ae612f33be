//! Per-group indices.

use std::collections::btree_map::Entry;
use std::collections::BTreeMap;

use crate::error::RegistryError;
use crate::group::UsageGroup;

/// Cached lookups for one usage group.
///
/// `by_value` is injective: within a group every value has exactly one
/// name. Aliased bits are therefore only ambiguous when formatting
/// without a group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupInfo {
    group: UsageGroup,
    aggregate: u64,
    by_name: BTreeMap<String, u64>,
    by_value: BTreeMap<u64, String>,
}

impl GroupInfo {
    pub(crate) fn new(group: UsageGroup) -> Self {
        Self {
            group,
            aggregate: 0,
            by_name: BTreeMap::new(),
            by_value: BTreeMap::new(),
        }
    }

    /// Adds a member, rejecting a second name for an existing value.
    pub(crate) fn insert(&mut self, name: &str, value: u64) -> Result<(), RegistryError> {
        match self.by_value.entry(value) {
            Entry::Occupied(existing) => {
                return Err(RegistryError::GroupCollision {
                    group: self.group,
                    value,
                    existing: existing.get().clone(),
                    incoming: name.to_string(),
                });
            }
            Entry::Vacant(slot) => {
                slot.insert(name.to_string());
            }
        }
        self.by_name.insert(name.to_string(), value);
        self.aggregate |= value;
        Ok(())
    }

    /// The group this index belongs to.
    #[must_use]
    pub const fn group(&self) -> UsageGroup {
        self.group
    }

    /// Union of every member's value.
    #[must_use]
    pub const fn aggregate(&self) -> u64 {
        self.aggregate
    }

    /// Member names mapped to their values.
    #[must_use]
    pub const fn by_name(&self) -> &BTreeMap<String, u64> {
        &self.by_name
    }

    /// Member values mapped to their (unique) names.
    #[must_use]
    pub const fn by_value(&self) -> &BTreeMap<u64, String> {
        &self.by_value
    }

    /// Returns the group-scoped name for `value`, if any.
    #[must_use]
    pub fn name_of(&self, value: u64) -> Option<&str> {
        self.by_value.get(&value).map(String::as_str)
    }

    /// Number of member flags.
    #[must_use]
    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    /// Returns true if no flag belongs to this group.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }
}
