//! Canonical rendering of flag values.
//!
//! A value renders as its set bits, lowest first, joined by `" | "`, then
//! the full value in hex:
//!
//! ```text
//! SearchIncludeResolved | IncludeFeatureScores [0000 0000 0400 0001]
//! ```
//!
//! Each bit takes the name registered for it in the requested group. With
//! no group (or a group that does not name the bit) a bit shared by several
//! names renders as `{ a / b }`, and a bit with no name renders as its own
//! hex value. Zero renders as `{ NONE }`. Rendering never fails.

use std::fmt;

use crate::algebra::BitName;
use crate::group::UsageGroup;
use crate::hex_format::write_hex;
use crate::registry::FlagRegistry;
use crate::symbol::set_bits;

/// Token emitted for a zero value.
pub const NONE_TOKEN: &str = "{ NONE }";

/// Separator between per-bit tokens.
pub const TOKEN_SEPARATOR: &str = " | ";

/// Lazily formatted flag value; see [`FlagRegistry::display`].
#[derive(Debug, Clone, Copy)]
pub struct FlagsDisplay<'r> {
    registry: &'r FlagRegistry,
    value: u64,
    group: Option<UsageGroup>,
}

impl fmt::Display for FlagsDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.value == 0 {
            f.write_str(NONE_TOKEN)?;
        } else {
            for (i, bit) in set_bits(self.value).enumerate() {
                if i > 0 {
                    f.write_str(TOKEN_SEPARATOR)?;
                }
                self.write_bit(f, 1u64 << bit)?;
            }
        }
        f.write_str(" [")?;
        write_hex(f, self.value)?;
        f.write_str("]")
    }
}

impl FlagsDisplay<'_> {
    fn write_bit(&self, f: &mut fmt::Formatter<'_>, bit_value: u64) -> fmt::Result {
        match self.registry.resolve_bit(bit_value, self.group) {
            BitName::Scoped(name) | BitName::Unique(name) => f.write_str(name),
            BitName::Ambiguous => {
                f.write_str("{ ")?;
                for (i, symbol) in self.registry.matching(bit_value).enumerate() {
                    if i > 0 {
                        f.write_str(" / ")?;
                    }
                    f.write_str(symbol.name())?;
                }
                f.write_str(" }")
            }
            BitName::Unknown => write_hex(f, bit_value),
        }
    }
}

impl FlagRegistry {
    /// Returns a [`fmt::Display`] adapter rendering `value` in `group`.
    ///
    /// `None` is rendered like zero.
    #[must_use]
    pub fn display(&self, value: Option<u64>, group: Option<UsageGroup>) -> FlagsDisplay<'_> {
        FlagsDisplay {
            registry: self,
            value: value.unwrap_or(0),
            group,
        }
    }

    /// Renders `value` in the canonical format, scoped to `group` if given.
    ///
    /// # Examples
    ///
    /// ```
    /// use resolver_flags::{table, FlagRegistry, UsageGroup};
    ///
    /// let registry = FlagRegistry::builtin();
    /// assert_eq!(
    ///     registry.format(Some(table::SEARCH_INCLUDE_NAME_ONLY), Some(UsageGroup::Search)),
    ///     "SearchIncludeNameOnly [0000 0000 0000 0008]"
    /// );
    /// assert_eq!(registry.format(None, None), "{ NONE } [0000 0000 0000 0000]");
    /// ```
    #[must_use]
    pub fn format(&self, value: Option<u64>, group: Option<UsageGroup>) -> String {
        self.display(value, group).to_string()
    }
}
