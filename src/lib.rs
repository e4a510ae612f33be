//! # resolver-flags - option flags for entity-resolution calls
//!
//! Entity-resolution operations (add, search, export, why, how, ...) take
//! a 64-bit option value built by OR-ing flag constants. This crate is the
//! metadata around those values: which flags exist, which operations
//! (usage groups) each flag applies to, and how to render any value back
//! into a readable, unambiguous string.
//!
//! ## Core Concepts
//!
//! - **Flag symbol**: a named 64-bit constant, either one bit or an aggregate
//!   of earlier flags
//! - **Usage group**: the category of operation a flag applies to
//! - **Bit alias**: one bit declared under several names, each valid in
//!   different groups; the group disambiguates
//! - **Registry**: immutable indices over the declaration table, built once
//!
//! ## Usage
//!
//! ```rust
//! use resolver_flags::{format_flags, groups_of_value, table, GroupSet, UsageGroup};
//!
//! let flags = table::SEARCH_INCLUDE_RESOLVED | table::INCLUDE_FEATURE_SCORES;
//! assert!(groups_of_value(flags).contains(GroupSet::SEARCH));
//!
//! assert_eq!(
//!     format_flags(Some(flags), Some(UsageGroup::Search)),
//!     "SearchIncludeResolved | IncludeFeatureScores [0000 0000 0400 0001]"
//! );
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod algebra;
#[cfg(feature = "descriptions")]
pub mod description;
pub mod error;
pub mod format;
pub mod group;
pub mod hex_format;
pub mod registry;
pub mod symbol;
pub mod table;

use std::collections::BTreeMap;

// Re-export primary types at crate root for convenience
pub use algebra::{Decomposition, ResolvedBit};
#[cfg(feature = "descriptions")]
pub use description::{
    load_descriptions, parse_descriptions, DescriptionDefinition, Discrepancy, FlagDescription,
};
#[cfg(feature = "descriptions")]
pub use error::DescriptionError;
pub use error::{FlagError, FlagResult, RegistryError, UsageError};
pub use format::FlagsDisplay;
pub use group::{GroupSet, UsageGroup};
pub use hex_format::{to_hex, write_hex, HEX_WIDTH};
pub use registry::{FlagRegistry, GroupInfo};
pub use symbol::{DeclDefinition, FlagDecl, FlagDefinition, FlagSymbol};

/// Every built-in flag, in declaration order.
#[must_use]
pub fn list_flags() -> &'static [FlagSymbol] {
    FlagRegistry::builtin().list_flags()
}

/// Looks up a built-in flag by exact name.
#[must_use]
pub fn get_flag(name: &str) -> Option<&'static FlagSymbol> {
    FlagRegistry::builtin().get_flag(name)
}

/// Returns the groups of a built-in flag.
///
/// # Errors
///
/// [`UsageError::NotFound`] if no built-in flag has this name.
pub fn groups_of_name(name: &str) -> Result<GroupSet, UsageError> {
    FlagRegistry::builtin().groups_of_name(name)
}

/// Returns the groups a value belongs to; see [`FlagRegistry::groups_of_value`].
#[must_use]
pub fn groups_of_value(value: u64) -> GroupSet {
    FlagRegistry::builtin().groups_of_value(value)
}

/// Returns the union of the flags of every group in `groups`.
#[must_use]
pub fn flags_of(groups: impl Into<GroupSet>) -> u64 {
    FlagRegistry::builtin().flags_of(groups)
}

/// Returns `name -> value` for exactly one group.
///
/// # Errors
///
/// [`UsageError::InvalidArgument`] for an empty or multi-group argument.
pub fn names_of(groups: impl Into<GroupSet>) -> Result<&'static BTreeMap<String, u64>, UsageError> {
    FlagRegistry::builtin().names_of(groups)
}

/// Returns `value -> name` for exactly one group.
///
/// # Errors
///
/// [`UsageError::InvalidArgument`] for an empty or multi-group argument.
pub fn values_of(groups: impl Into<GroupSet>) -> Result<&'static BTreeMap<u64, String>, UsageError> {
    FlagRegistry::builtin().values_of(groups)
}

/// Renders a value against the built-in registry; see [`FlagRegistry::format`].
#[must_use]
pub fn format_flags(value: Option<u64>, group: Option<UsageGroup>) -> String {
    FlagRegistry::builtin().format(value, group)
}
