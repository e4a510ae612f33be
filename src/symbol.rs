//! Flag symbols and the declarations they are built from.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::group::GroupSet;

/// How a declaration computes its value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeclDefinition<'a> {
    /// A single bit: `1 << index`.
    Bit(u32),

    /// The bitwise OR of previously declared flags, by name.
    Compose(&'a [&'a str]),
}

/// One entry of a declaration table.
///
/// Declarations borrow their strings so the built-in table can live in a
/// `static`; registries copy what they keep.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlagDecl<'a> {
    /// Unique symbolic name.
    pub name: &'a str,
    /// Value definition.
    pub definition: DeclDefinition<'a>,
    /// Usage groups the flag belongs to.
    pub groups: GroupSet,
}

impl<'a> FlagDecl<'a> {
    /// Declares a single-bit flag.
    #[must_use]
    pub const fn bit(name: &'a str, index: u32, groups: GroupSet) -> Self {
        Self {
            name,
            definition: DeclDefinition::Bit(index),
            groups,
        }
    }

    /// Declares an aggregate flag composed of earlier declarations.
    #[must_use]
    pub const fn compose(name: &'a str, parts: &'a [&'a str], groups: GroupSet) -> Self {
        Self {
            name,
            definition: DeclDefinition::Compose(parts),
            groups,
        }
    }
}

/// The recorded definition of a registered flag.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "of", rename_all = "snake_case")]
pub enum FlagDefinition {
    /// A single bit at the given index.
    Bit(u32),
    /// The OR of the named flags.
    Compose(Vec<String>),
}

impl fmt::Display for FlagDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bit(index) => write!(f, "1 << {index}"),
            Self::Compose(parts) => f.write_str(&parts.join(" | ")),
        }
    }
}

/// A registered flag: a named 64-bit value and the groups it applies to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlagSymbol {
    pub(crate) name: String,
    pub(crate) value: u64,
    pub(crate) groups: GroupSet,
    pub(crate) definition: FlagDefinition,
}

impl FlagSymbol {
    /// Returns the symbolic name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the 64-bit value.
    #[must_use]
    pub const fn value(&self) -> u64 {
        self.value
    }

    /// Returns the usage groups this flag was declared in.
    #[must_use]
    pub const fn groups(&self) -> GroupSet {
        self.groups
    }

    /// Returns how the value was defined.
    #[must_use]
    pub const fn definition(&self) -> &FlagDefinition {
        &self.definition
    }

    /// Returns true if the flag was declared as a composition of other flags.
    #[must_use]
    pub const fn is_aggregate(&self) -> bool {
        matches!(self.definition, FlagDefinition::Compose(_))
    }

    /// Returns true if the value has exactly one bit set.
    #[must_use]
    pub const fn is_single_bit(&self) -> bool {
        self.value.is_power_of_two()
    }

    /// Returns true if the flag belongs to any group in `groups`.
    #[must_use]
    pub const fn applies_to(&self, groups: GroupSet) -> bool {
        self.groups.intersects(groups)
    }

    /// Returns the indices of the set bits of the value, ascending.
    #[must_use]
    pub fn bits(&self) -> Vec<u32> {
        set_bits(self.value).collect()
    }
}

impl fmt::Display for FlagSymbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// Iterates the indices of the set bits of `value`, ascending.
pub(crate) fn set_bits(value: u64) -> impl Iterator<Item = u32> {
    (0..u64::BITS).filter(move |bit| value & (1u64 << bit) != 0)
}
