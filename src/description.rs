//! External flag descriptions.
//!
//! The flag table is also maintained as a JSON array, one entry per
//! symbol, outside this crate. This module reads and writes that format,
//! builds a registry from it, and compares it against a registry so the
//! compiled-in table and the external description cannot drift apart.
//!
//! ```json
//! {
//!   "name": "ExportIncludeAllEntities",
//!   "bits": [0, 5],
//!   "value": 33,
//!   "definition": ["ExportIncludeMultiRecordEntities", "ExportIncludeSingleRecordEntities"],
//!   "groups": ["EXPORT"],
//!   "base_flags": ["ExportIncludeMultiRecordEntities", "ExportIncludeSingleRecordEntities"]
//! }
//! ```
//!
//! Single-bit entries carry a shift expression (`"1 << 3"`, `"1L << 3"`)
//! as their definition and no base flags.

use std::collections::{BTreeSet, HashMap, HashSet};
use std::path::Path;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::error::{DescriptionError, FlagResult};
use crate::group::{GroupSet, UsageGroup};
use crate::registry::FlagRegistry;
use crate::symbol::{set_bits, DeclDefinition, FlagDecl, FlagDefinition, FlagSymbol};

static SHIFT_EXPR: OnceLock<Regex> = OnceLock::new();

/// One entry of an external flag description.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlagDescription {
    /// Symbolic name.
    pub name: String,
    /// Indices of the set bits of `value`, ascending.
    pub bits: Vec<u32>,
    /// Numeric value.
    pub value: u64,
    /// Shift expression or constituent names.
    pub definition: DescriptionDefinition,
    /// Usage group names.
    pub groups: Vec<String>,
    /// Single-bit flags making up an aggregate.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_flags: Option<Vec<String>>,
}

/// Definition of a described flag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DescriptionDefinition {
    /// `1 << n`, optionally written `1L << n`.
    Shift(String),
    /// Names of previously described flags.
    Compose(Vec<String>),
}

impl DescriptionDefinition {
    /// Returns the bit index of a shift expression.
    #[must_use]
    pub fn shift_bit(&self) -> Option<u32> {
        match self {
            Self::Shift(expr) => parse_shift(expr),
            Self::Compose(_) => None,
        }
    }
}

fn parse_shift(expr: &str) -> Option<u32> {
    let re = SHIFT_EXPR.get_or_init(|| {
        Regex::new(r"^\s*1[lL]?\s*<<\s*(\d{1,3})\s*$").expect("shift expression pattern is valid")
    });
    re.captures(expr)?.get(1)?.as_str().parse().ok()
}

/// A difference between a registry and an external description.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Discrepancy {
    #[error("'{name}' is registered but not described")]
    Missing {
        name: String,
    },

    #[error("'{name}' is described but not registered")]
    Unexpected {
        name: String,
    },

    #[error("'{name}' is described more than once")]
    DuplicateEntry {
        name: String,
    },

    #[error("'{name}' has value {registered:#x}, described as {described:#x}")]
    Value {
        name: String,
        registered: u64,
        described: u64,
    },

    #[error("'{name}' has bits {registered:?}, described as {described:?}")]
    Bits {
        name: String,
        registered: Vec<u32>,
        described: Vec<u32>,
    },

    #[error("'{name}' is in groups {registered:?}, described as {described:?}")]
    Groups {
        name: String,
        registered: Vec<String>,
        described: Vec<String>,
    },

    #[error("'{name}' is defined as '{registered}', described as '{described}'")]
    Definition {
        name: String,
        registered: String,
        described: String,
    },

    #[error("'{name}' has inconsistent base flags: {reason}")]
    BaseFlags {
        name: String,
        reason: String,
    },
}

/// Parses a JSON array of flag descriptions.
pub fn parse_descriptions(json: &str) -> Result<Vec<FlagDescription>, DescriptionError> {
    Ok(serde_json::from_str(json)?)
}

/// Reads a JSON array of flag descriptions from a file.
pub fn load_descriptions(path: impl AsRef<Path>) -> Result<Vec<FlagDescription>, DescriptionError> {
    let text = std::fs::read_to_string(path)?;
    parse_descriptions(&text)
}

/// Serializes flag descriptions as pretty JSON.
pub fn to_json_pretty(descriptions: &[FlagDescription]) -> Result<String, DescriptionError> {
    Ok(serde_json::to_string_pretty(descriptions)?)
}

enum PendingDefinition<'a> {
    Bit(u32),
    Compose(Vec<&'a str>),
}

impl FlagRegistry {
    /// Builds a registry from external descriptions, in order.
    ///
    /// Only names, definitions and groups are used; `bits`, `value` and
    /// `base_flags` are derived data and are checked by
    /// [`FlagRegistry::check_descriptions`] instead.
    ///
    /// # Errors
    ///
    /// A [`DescriptionError`] for unknown group names or unparseable shift
    /// expressions, or any [`crate::RegistryError`] the declarations trigger.
    pub fn from_descriptions(descriptions: &[FlagDescription]) -> FlagResult<Self> {
        let mut pending = Vec::with_capacity(descriptions.len());
        for desc in descriptions {
            let definition = match &desc.definition {
                DescriptionDefinition::Shift(expr) => {
                    let bit = parse_shift(expr).ok_or_else(|| DescriptionError::InvalidDefinition {
                        name: desc.name.clone(),
                        definition: expr.clone(),
                    })?;
                    PendingDefinition::Bit(bit)
                }
                DescriptionDefinition::Compose(parts) => {
                    PendingDefinition::Compose(parts.iter().map(String::as_str).collect())
                }
            };
            let mut groups = GroupSet::empty();
            for group in &desc.groups {
                let group = UsageGroup::from_name(group).ok_or_else(|| DescriptionError::UnknownGroup {
                    name: desc.name.clone(),
                    group: group.clone(),
                })?;
                groups |= group.as_set();
            }
            pending.push((desc.name.as_str(), definition, groups));
        }

        let decls = pending.iter().map(|(name, definition, groups)| FlagDecl {
            name,
            definition: match definition {
                PendingDefinition::Bit(bit) => DeclDefinition::Bit(*bit),
                PendingDefinition::Compose(parts) => DeclDefinition::Compose(parts),
            },
            groups: *groups,
        });
        Ok(Self::from_declarations(decls)?)
    }

    /// Describes every registered symbol in the external format.
    #[must_use]
    pub fn describe(&self) -> Vec<FlagDescription> {
        self.list_flags()
            .iter()
            .map(|symbol| FlagDescription {
                name: symbol.name().to_string(),
                bits: symbol.bits(),
                value: symbol.value(),
                definition: match symbol.definition() {
                    FlagDefinition::Bit(bit) => DescriptionDefinition::Shift(format!("1 << {bit}")),
                    FlagDefinition::Compose(parts) => DescriptionDefinition::Compose(parts.clone()),
                },
                groups: symbol.groups().names().into_iter().map(str::to_string).collect(),
                base_flags: symbol.is_aggregate().then(|| self.base_flags(symbol)),
            })
            .collect()
    }

    /// Names of the single-bit flags making up `symbol`, one per bit.
    ///
    /// An aliased bit takes the name registered in one of the symbol's own
    /// groups.
    fn base_flags(&self, symbol: &FlagSymbol) -> Vec<String> {
        set_bits(symbol.value())
            .filter_map(|bit| {
                let bit_value = 1u64 << bit;
                symbol
                    .groups()
                    .groups()
                    .find_map(|g| self.group(g).name_of(bit_value))
                    .or_else(|| self.aliases_of(bit_value).first().copied())
                    .map(str::to_string)
            })
            .collect()
    }

    /// Compares this registry against an external description.
    ///
    /// Returns every difference found; an empty list means the two agree.
    #[must_use]
    pub fn check_descriptions(&self, descriptions: &[FlagDescription]) -> Vec<Discrepancy> {
        let mut found = Vec::new();
        let mut seen: HashSet<&str> = HashSet::with_capacity(descriptions.len());
        let by_name: HashMap<&str, &FlagDescription> =
            descriptions.iter().map(|d| (d.name.as_str(), d)).collect();

        for desc in descriptions {
            if !seen.insert(desc.name.as_str()) {
                found.push(Discrepancy::DuplicateEntry {
                    name: desc.name.clone(),
                });
            }
        }

        for symbol in self.list_flags() {
            match by_name.get(symbol.name()) {
                Some(desc) => self.compare(symbol, desc, &mut found),
                None => found.push(Discrepancy::Missing {
                    name: symbol.name().to_string(),
                }),
            }
        }

        for desc in descriptions {
            if self.get_flag(&desc.name).is_none() {
                found.push(Discrepancy::Unexpected {
                    name: desc.name.clone(),
                });
            }
        }
        found
    }

    fn compare(&self, symbol: &FlagSymbol, desc: &FlagDescription, found: &mut Vec<Discrepancy>) {
        let name = || symbol.name().to_string();

        if symbol.value() != desc.value {
            found.push(Discrepancy::Value {
                name: name(),
                registered: symbol.value(),
                described: desc.value,
            });
        }

        let bits = symbol.bits();
        if bits != desc.bits {
            found.push(Discrepancy::Bits {
                name: name(),
                registered: bits,
                described: desc.bits.clone(),
            });
        }

        let registered: BTreeSet<&str> = symbol.groups().names().into_iter().collect();
        let described: BTreeSet<&str> = desc.groups.iter().map(String::as_str).collect();
        if registered != described {
            found.push(Discrepancy::Groups {
                name: name(),
                registered: registered.into_iter().map(str::to_string).collect(),
                described: described.into_iter().map(str::to_string).collect(),
            });
        }

        let same_definition = match (symbol.definition(), &desc.definition) {
            (FlagDefinition::Bit(bit), DescriptionDefinition::Shift(expr)) => parse_shift(expr) == Some(*bit),
            (FlagDefinition::Compose(parts), DescriptionDefinition::Compose(described)) => {
                parts.iter().collect::<BTreeSet<_>>() == described.iter().collect::<BTreeSet<_>>()
            }
            _ => false,
        };
        if !same_definition {
            let described = match &desc.definition {
                DescriptionDefinition::Shift(expr) => expr.clone(),
                DescriptionDefinition::Compose(parts) => parts.join(" | "),
            };
            found.push(Discrepancy::Definition {
                name: name(),
                registered: symbol.definition().to_string(),
                described,
            });
        }

        if let Some(base) = &desc.base_flags {
            if let Some(reason) = self.base_flags_problem(symbol, base) {
                found.push(Discrepancy::BaseFlags { name: name(), reason });
            }
        }
    }

    fn base_flags_problem(&self, symbol: &FlagSymbol, base: &[String]) -> Option<String> {
        let mut value = 0u64;
        for name in base {
            let Some(flag) = self.get_flag(name) else {
                return Some(format!("'{name}' is not registered"));
            };
            if !flag.is_single_bit() {
                return Some(format!("'{name}' is not a single-bit flag"));
            }
            value |= flag.value();
        }
        (value != symbol.value())
            .then(|| format!("base flags combine to {value:#x}, expected {:#x}", symbol.value()))
    }
}
