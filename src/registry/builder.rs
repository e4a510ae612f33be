//! Validated construction of a [`FlagRegistry`] from declarations.

use std::collections::{HashMap, HashSet};

use tracing::{debug, trace, warn};

use crate::error::RegistryError;
use crate::group::{GroupSet, UsageGroup};
use crate::registry::group_index::GroupInfo;
use crate::registry::FlagRegistry;
use crate::symbol::{DeclDefinition, FlagDecl, FlagDefinition, FlagSymbol};

/// Builds a registry, logging the rejection if the declarations are invalid.
pub(crate) fn build<'a, I>(decls: I) -> Result<FlagRegistry, RegistryError>
where
    I: IntoIterator<Item = FlagDecl<'a>>,
{
    let decls: Vec<FlagDecl<'a>> = decls.into_iter().collect();
    build_from(&decls).map_err(|err| {
        warn!(error = %err, "rejected flag declarations");
        err
    })
}

fn build_from(decls: &[FlagDecl<'_>]) -> Result<FlagRegistry, RegistryError> {
    let declared_anywhere: HashSet<&str> = decls.iter().map(|d| d.name).collect();

    let mut symbols: Vec<FlagSymbol> = Vec::with_capacity(decls.len());
    let mut by_name: HashMap<String, usize> = HashMap::with_capacity(decls.len());
    let mut by_value: HashMap<u64, Vec<usize>> = HashMap::with_capacity(decls.len());
    let mut groups: Vec<GroupInfo> = UsageGroup::ALL.into_iter().map(GroupInfo::new).collect();

    for decl in decls {
        if by_name.contains_key(decl.name) {
            return Err(RegistryError::DuplicateName {
                name: decl.name.to_string(),
            });
        }

        let member_of = decl.groups & GroupSet::all();
        if member_of.is_empty() {
            return Err(RegistryError::NoGroups {
                name: decl.name.to_string(),
            });
        }

        let (value, definition) = resolve_value(decl, &symbols, &by_name, &declared_anywhere)?;

        for group in member_of.groups() {
            groups[group.index()].insert(decl.name, value)?;
        }

        trace!(flag = decl.name, value, groups = %member_of, "registered flag");

        let idx = symbols.len();
        symbols.push(FlagSymbol {
            name: decl.name.to_string(),
            value,
            groups: member_of,
            definition,
        });
        by_name.insert(decl.name.to_string(), idx);
        by_value.entry(value).or_default().push(idx);
    }

    for indices in by_value.values_mut() {
        indices.sort_by(|a, b| symbols[*a].name.cmp(&symbols[*b].name));
    }

    let alias_count = by_value.values().filter(|v| v.len() > 1).count();
    debug!(
        symbols = symbols.len(),
        groups = groups.iter().filter(|g| !g.is_empty()).count(),
        aliased_values = alias_count,
        "flag registry built"
    );

    Ok(FlagRegistry {
        symbols,
        by_name,
        by_value,
        groups,
    })
}

fn resolve_value(
    decl: &FlagDecl<'_>,
    symbols: &[FlagSymbol],
    by_name: &HashMap<String, usize>,
    declared_anywhere: &HashSet<&str>,
) -> Result<(u64, FlagDefinition), RegistryError> {
    match decl.definition {
        DeclDefinition::Bit(index) => {
            if index >= u64::BITS {
                return Err(RegistryError::BitOutOfRange {
                    name: decl.name.to_string(),
                    bit: index,
                });
            }
            Ok((1u64 << index, FlagDefinition::Bit(index)))
        }
        DeclDefinition::Compose(parts) => {
            if parts.is_empty() {
                return Err(RegistryError::EmptyAggregate {
                    name: decl.name.to_string(),
                });
            }
            let mut value = 0u64;
            for part in parts {
                let Some(&idx) = by_name.get(*part) else {
                    let name = decl.name.to_string();
                    let constituent = (*part).to_string();
                    return Err(if declared_anywhere.contains(part) {
                        RegistryError::ForwardReference { name, constituent }
                    } else {
                        RegistryError::UnknownConstituent { name, constituent }
                    });
                };
                value |= symbols[idx].value;
            }
            let names = parts.iter().map(|p| (*p).to_string()).collect();
            Ok((value, FlagDefinition::Compose(names)))
        }
    }
}
