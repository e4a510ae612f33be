//! Error types for the flag registry.
//!
//! Errors are strongly typed using thiserror. Registry build failures
//! (configuration errors) are kept apart from query failures (usage
//! errors) so callers can pattern match on the class they care about.
//! The formatter never produces either.

use thiserror::Error;

use crate::group::{GroupSet, UsageGroup};

/// Configuration errors raised while building a registry from declarations.
///
/// These describe a broken declaration table, not a bad call. The
/// built-in table is validated on first use and a failure there aborts.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("Flag '{name}' is declared more than once")]
    DuplicateName {
        name: String,
    },

    #[error("Aggregate flag '{name}' references undeclared flag '{constituent}'")]
    UnknownConstituent {
        name: String,
        constituent: String,
    },

    #[error("Aggregate flag '{name}' references '{constituent}' before it is declared")]
    ForwardReference {
        name: String,
        constituent: String,
    },

    #[error(
        "Flags '{existing}' and '{incoming}' both map value {value:#x} in usage group {group}"
    )]
    GroupCollision {
        group: UsageGroup,
        value: u64,
        existing: String,
        incoming: String,
    },

    #[error("Flag '{name}' uses bit {bit}, which does not fit in 64 bits")]
    BitOutOfRange {
        name: String,
        bit: u32,
    },

    #[error("Aggregate flag '{name}' has no constituents")]
    EmptyAggregate {
        name: String,
    },

    #[error("Flag '{name}' does not belong to any usage group")]
    NoGroups {
        name: String,
    },
}

/// Usage errors raised by registry queries.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UsageError {
    #[error("Flag not found: {name}")]
    NotFound {
        name: String,
    },

    #[error("Invalid argument: {message}")]
    InvalidArgument {
        message: String,
    },
}

impl UsageError {
    /// Creates a `NotFound` error for a flag name.
    #[must_use]
    pub fn not_found(name: impl Into<String>) -> Self {
        Self::NotFound { name: name.into() }
    }

    /// Creates the error for a group argument that is not exactly one group.
    #[must_use]
    pub fn not_single_group(groups: GroupSet) -> Self {
        let message = if groups.is_empty() {
            "expected exactly one usage group, got none".to_string()
        } else {
            format!("expected exactly one usage group, got {}", groups.count())
        };
        Self::InvalidArgument { message }
    }
}

/// Errors raised while reading external flag descriptions.
#[cfg(feature = "descriptions")]
#[derive(Debug, Error)]
pub enum DescriptionError {
    #[error("Malformed description JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Failed to read description file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Flag '{name}' names unknown usage group '{group}'")]
    UnknownGroup {
        name: String,
        group: String,
    },

    #[error("Flag '{name}' has an unparseable definition: {definition}")]
    InvalidDefinition {
        name: String,
        definition: String,
    },
}

/// Top-level error type for the flag registry.
#[derive(Debug, Error)]
pub enum FlagError {
    #[error("Registry configuration error: {0}")]
    Registry(#[from] RegistryError),

    #[error("Usage error: {0}")]
    Usage(#[from] UsageError),

    #[cfg(feature = "descriptions")]
    #[error("Description error: {0}")]
    Description(#[from] DescriptionError),
}

impl FlagError {
    /// Returns true if this is a registry build (configuration) error.
    #[must_use]
    pub const fn is_configuration(&self) -> bool {
        matches!(self, Self::Registry(_))
    }

    /// Returns true if this is a query (usage) error.
    #[must_use]
    pub const fn is_usage(&self) -> bool {
        matches!(self, Self::Usage(_))
    }

    /// Returns true if a flag name was not recognized.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::Usage(UsageError::NotFound { .. }))
    }

    /// Returns true if a group argument was rejected.
    #[must_use]
    pub const fn is_invalid_argument(&self) -> bool {
        matches!(self, Self::Usage(UsageError::InvalidArgument { .. }))
    }
}

/// Result type alias for flag registry operations.
pub type FlagResult<T> = Result<T, FlagError>;
