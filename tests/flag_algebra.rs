//! End-to-end checks of the flag algebra against the built-in table.

use resolver_flags::table::{self, names};
use resolver_flags::{
    flags_of, format_flags, get_flag, groups_of_name, groups_of_value, list_flags, names_of,
    values_of, FlagRegistry, GroupSet, UsageError, UsageGroup,
};

fn registry() -> &'static FlagRegistry {
    FlagRegistry::builtin()
}

#[test]
fn every_group_value_map_is_injective() {
    for group in UsageGroup::ALL {
        let by_value = values_of(group).unwrap();
        let by_name = names_of(group).unwrap();
        assert_eq!(by_value.len(), by_name.len(), "{group}");
        for (name, value) in by_name {
            assert_eq!(by_value.get(value), Some(name), "{group}: {name}");
        }
    }
}

#[test]
fn names_of_requires_exactly_one_group() {
    let empty = names_of(GroupSet::empty()).unwrap_err();
    assert!(matches!(empty, UsageError::InvalidArgument { .. }));

    let multi = names_of(GroupSet::SEARCH | GroupSet::WHY_SEARCH).unwrap_err();
    assert!(matches!(multi, UsageError::InvalidArgument { .. }));

    assert!(values_of(GroupSet::all()).is_err());
}

#[test]
fn unrecognized_name_is_not_found() {
    assert_eq!(
        groups_of_name("UNRECOGNIZED_NAME"),
        Err(UsageError::NotFound {
            name: "UNRECOGNIZED_NAME".to_string()
        })
    );
    assert!(get_flag("UNRECOGNIZED_NAME").is_none());
}

#[test]
fn flags_of_distributes_over_group_union() {
    for a in UsageGroup::ALL {
        for b in UsageGroup::ALL {
            if a == b {
                continue;
            }
            assert_eq!(
                flags_of(a) | flags_of(b),
                flags_of(a.as_set() | b.as_set()),
                "{a} / {b}"
            );
        }
    }
}

#[test]
fn groups_of_composite_is_union_of_bit_groups() {
    let composites = [
        table::WITH_INFO | table::INCLUDE_FEATURE_SCORES,
        table::ENTITY_INCLUDE_RECORD_DATES | table::FIND_NETWORK_INCLUDE_MATCHING_INFO,
        table::SEARCH_INCLUDE_NAME_ONLY | table::SEARCH_INCLUDE_STATS,
        table::EXPORT_INCLUDE_DISCLOSED | table::ENTITY_INCLUDE_DISCLOSED_RELATIONS | (1 << 40),
    ];
    for value in composites {
        assert!(
            list_flags().iter().all(|f| f.value() != value),
            "{value:#x} must not be a declared symbol"
        );
        let expected = (0..64)
            .filter(|bit| value & (1u64 << bit) != 0)
            .fold(GroupSet::empty(), |acc, bit| acc | groups_of_value(1u64 << bit));
        assert_eq!(groups_of_value(value), expected, "{value:#x}");
    }
}

#[test]
fn declared_symbols_report_their_own_groups() {
    for flag in list_flags() {
        assert_eq!(groups_of_name(flag.name()).unwrap(), flag.groups());
        assert!(
            groups_of_value(flag.value()).contains(flag.groups()),
            "{}",
            flag.name()
        );
    }
}

#[test]
fn search_alias_scenario() {
    let value = get_flag(names::SEARCH_INCLUDE_NAME_ONLY).unwrap().value();
    assert_eq!(value, get_flag(names::EXPORT_INCLUDE_NAME_ONLY).unwrap().value());

    assert_eq!(
        format_flags(Some(value), Some(UsageGroup::Search)),
        "SearchIncludeNameOnly [0000 0000 0000 0008]"
    );
    assert_eq!(
        format_flags(Some(value), None),
        "{ ExportIncludeNameOnly / SearchIncludeNameOnly } [0000 0000 0000 0008]"
    );
}

#[test]
fn constants_match_registry() {
    let pairs = [
        (names::EXPORT_INCLUDE_ALL_ENTITIES, table::EXPORT_INCLUDE_ALL_ENTITIES),
        (names::ENTITY_DEFAULT_FLAGS, table::ENTITY_DEFAULT_FLAGS),
        (names::ENTITY_BRIEF_DEFAULT_FLAGS, table::ENTITY_BRIEF_DEFAULT_FLAGS),
        (names::EXPORT_DEFAULT_FLAGS, table::EXPORT_DEFAULT_FLAGS),
        (names::FIND_PATH_DEFAULT_FLAGS, table::FIND_PATH_DEFAULT_FLAGS),
        (names::FIND_NETWORK_DEFAULT_FLAGS, table::FIND_NETWORK_DEFAULT_FLAGS),
        (names::SEARCH_BY_ATTRIBUTES_ALL, table::SEARCH_BY_ATTRIBUTES_ALL),
        (names::SEARCH_BY_ATTRIBUTES_STRONG, table::SEARCH_BY_ATTRIBUTES_STRONG),
        (names::WHY_SEARCH_DEFAULT_FLAGS, table::WHY_SEARCH_DEFAULT_FLAGS),
        (names::WITH_INFO, table::WITH_INFO),
    ];
    for (name, value) in pairs {
        assert_eq!(get_flag(name).unwrap().value(), value, "{name}");
    }
}

#[test]
fn default_flags_apply_to_their_operation() {
    let reg = registry();
    assert!(reg.is_applicable(table::ENTITY_DEFAULT_FLAGS, UsageGroup::Entity));
    assert!(reg.is_applicable(table::EXPORT_DEFAULT_FLAGS, UsageGroup::Export));
    assert!(reg.is_applicable(table::FIND_PATH_DEFAULT_FLAGS, UsageGroup::FindPath));
    assert!(reg.is_applicable(table::FIND_NETWORK_DEFAULT_FLAGS, UsageGroup::FindNetwork));
    assert!(reg.is_applicable(table::SEARCH_BY_ATTRIBUTES_ALL, UsageGroup::Search));
    assert!(reg.is_applicable(table::WHY_SEARCH_DEFAULT_FLAGS, UsageGroup::WhySearch));
    assert!(reg.is_applicable(table::WITH_INFO, UsageGroup::ProcessRedo));
}

#[test]
fn aggregate_renders_with_group_scoped_names() {
    assert_eq!(
        format_flags(Some(table::FIND_PATH_DEFAULT_FLAGS), Some(UsageGroup::FindPath)),
        "EntityIncludeEntityName | EntityIncludeRecordSummary | FindPathIncludeMatchingInfo \
         [0000 0000 4000 3000]"
    );
}
