//! Membership queries over a [`FlagRegistry`].
//!
//! All queries are reads over the immutable indices. Name lookups fail
//! with [`UsageError::NotFound`]; single-group queries reject an empty or
//! multi-group argument with [`UsageError::InvalidArgument`] instead of
//! returning an empty map.

use std::collections::BTreeMap;

use crate::error::UsageError;
use crate::group::{GroupSet, UsageGroup};
use crate::registry::{FlagRegistry, GroupInfo};
use crate::symbol::{set_bits, FlagSymbol};

/// How one set bit of a value resolves to symbols.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedBit<'r> {
    /// Bit index, 0..64.
    pub bit: u32,
    /// Candidate symbols for `1 << bit`: none when unknown, one when the
    /// bit resolves, several (sorted by name) when aliased.
    pub candidates: Vec<&'r FlagSymbol>,
}

impl ResolvedBit<'_> {
    /// The single-bit value this entry describes.
    #[must_use]
    pub const fn value(&self) -> u64 {
        1u64 << self.bit
    }

    /// Returns true if no symbol is registered for this bit.
    #[must_use]
    pub fn is_unknown(&self) -> bool {
        self.candidates.is_empty()
    }

    /// Returns true if several names remain for this bit.
    #[must_use]
    pub fn is_ambiguous(&self) -> bool {
        self.candidates.len() > 1
    }
}

/// A value split into its set bits, each resolved against the registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decomposition<'r> {
    value: u64,
    bits: Vec<ResolvedBit<'r>>,
}

impl<'r> Decomposition<'r> {
    /// The value that was decomposed.
    #[must_use]
    pub const fn value(&self) -> u64 {
        self.value
    }

    /// Per-bit resolutions, ascending by bit index.
    #[must_use]
    pub fn bits(&self) -> &[ResolvedBit<'r>] {
        &self.bits
    }

    /// Symbols for the bits that resolved to exactly one name.
    #[must_use]
    pub fn symbols(&self) -> Vec<&'r FlagSymbol> {
        self.bits
            .iter()
            .filter(|b| b.candidates.len() == 1)
            .map(|b| b.candidates[0])
            .collect()
    }

    /// Bits with no registered symbol.
    #[must_use]
    pub fn unknown_bits(&self) -> u64 {
        self.bits
            .iter()
            .filter(|b| b.is_unknown())
            .fold(0, |acc, b| acc | b.value())
    }

    /// Returns true if any bit resolved to more than one name.
    #[must_use]
    pub fn is_ambiguous(&self) -> bool {
        self.bits.iter().any(ResolvedBit::is_ambiguous)
    }
}

impl FlagRegistry {
    /// Every registered symbol, in declaration order.
    #[must_use]
    pub fn list_flags(&self) -> &[FlagSymbol] {
        self.symbols()
    }

    /// Looks up a symbol by exact name.
    #[must_use]
    pub fn get_flag(&self, name: &str) -> Option<&FlagSymbol> {
        self.index_of(name).map(|idx| self.symbol_at(idx))
    }

    /// Returns the groups a named flag was declared in.
    ///
    /// # Errors
    ///
    /// [`UsageError::NotFound`] if no flag has this name.
    pub fn groups_of_name(&self, name: &str) -> Result<GroupSet, UsageError> {
        self.get_flag(name)
            .map(FlagSymbol::groups)
            .ok_or_else(|| UsageError::not_found(name))
    }

    /// Returns the groups that `value` belongs to.
    ///
    /// A value equal to one or more declared symbols yields the union of
    /// their groups. Any other value is split into bits and each bit that
    /// is a declared single-bit symbol contributes its groups. Bits with no
    /// symbol, and zero, contribute nothing.
    #[must_use]
    pub fn groups_of_value(&self, value: u64) -> GroupSet {
        let mut whole = None;
        for symbol in self.matching(value) {
            *whole.get_or_insert(GroupSet::empty()) |= symbol.groups();
        }
        if let Some(groups) = whole {
            return groups;
        }

        set_bits(value)
            .flat_map(|bit| self.matching(1u64 << bit))
            .fold(GroupSet::empty(), |acc, symbol| acc | symbol.groups())
    }

    /// Returns the union of the member values of every group in `groups`.
    #[must_use]
    pub fn flags_of(&self, groups: impl Into<GroupSet>) -> u64 {
        let groups = groups.into();
        groups
            .groups()
            .fold(0, |acc, group| acc | self.group(group).aggregate())
    }

    /// Returns `name -> value` for the members of exactly one group.
    ///
    /// # Errors
    ///
    /// [`UsageError::InvalidArgument`] if `groups` is empty or holds more
    /// than one group.
    pub fn names_of(&self, groups: impl Into<GroupSet>) -> Result<&BTreeMap<String, u64>, UsageError> {
        self.single_group(groups.into()).map(GroupInfo::by_name)
    }

    /// Returns `value -> name` for the members of exactly one group.
    ///
    /// # Errors
    ///
    /// [`UsageError::InvalidArgument`] if `groups` is empty or holds more
    /// than one group.
    pub fn values_of(&self, groups: impl Into<GroupSet>) -> Result<&BTreeMap<u64, String>, UsageError> {
        self.single_group(groups.into()).map(GroupInfo::by_value)
    }

    fn single_group(&self, groups: GroupSet) -> Result<&GroupInfo, UsageError> {
        groups
            .single()
            .map(|group| self.group(group))
            .ok_or_else(|| UsageError::not_single_group(groups))
    }

    /// Returns every name registered for exactly `value`, sorted.
    #[must_use]
    pub fn aliases_of(&self, value: u64) -> Vec<&str> {
        self.matching(value).map(FlagSymbol::name).collect()
    }

    /// ORs together the values of the named flags.
    ///
    /// # Errors
    ///
    /// [`UsageError::NotFound`] for the first unknown name.
    pub fn combine<I, S>(&self, names: I) -> Result<u64, UsageError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        names.into_iter().try_fold(0u64, |acc, name| {
            let name = name.as_ref();
            self.get_flag(name)
                .map(|symbol| acc | symbol.value())
                .ok_or_else(|| UsageError::not_found(name))
        })
    }

    /// Resolves one single-bit value, preferring the group-scoped name.
    pub(crate) fn resolve_bit(&self, bit_value: u64, group: Option<UsageGroup>) -> BitName<'_> {
        if let Some(name) = group.and_then(|g| self.group(g).name_of(bit_value)) {
            return BitName::Scoped(name);
        }
        let mut candidates = self.matching(bit_value);
        match (candidates.next(), candidates.next()) {
            (None, _) => BitName::Unknown,
            (Some(only), None) => BitName::Unique(only.name()),
            (Some(_), Some(_)) => BitName::Ambiguous,
        }
    }

    /// Splits `value` into set bits and resolves each against the registry.
    ///
    /// Resolution follows the formatter: a name registered in `group` wins,
    /// otherwise every symbol registered for the bit is a candidate.
    #[must_use]
    pub fn decompose(&self, value: u64, group: Option<UsageGroup>) -> Decomposition<'_> {
        let bits = set_bits(value)
            .map(|bit| {
                let bit_value = 1u64 << bit;
                let candidates = match self.resolve_bit(bit_value, group) {
                    BitName::Scoped(name) => self.get_flag(name).into_iter().collect(),
                    _ => self.matching(bit_value).collect(),
                };
                ResolvedBit { bit, candidates }
            })
            .collect();
        Decomposition { value, bits }
    }

    /// Returns the bits of `value` that no flag of `group` covers.
    #[must_use]
    pub fn unsupported_bits(&self, value: u64, group: UsageGroup) -> u64 {
        value & !self.group(group).aggregate()
    }

    /// Returns true if every bit of `value` is meaningful for `group`.
    #[must_use]
    pub fn is_applicable(&self, value: u64, group: UsageGroup) -> bool {
        self.unsupported_bits(value, group) == 0
    }
}

/// Outcome of resolving a single bit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum BitName<'r> {
    /// Named by the supplied group.
    Scoped(&'r str),
    /// The only symbol registered for the bit.
    Unique(&'r str),
    /// Several symbols share the bit; see `FlagRegistry::matching`.
    Ambiguous,
    /// No symbol is registered for the bit.
    Unknown,
}
