//! Property tests for flag rendering and group lookup.

use proptest::prelude::*;
use resolver_flags::{
    flags_of, format_flags, groups_of_value, list_flags, to_hex, FlagRegistry, GroupSet,
    UsageGroup,
};

fn group_strategy() -> impl Strategy<Value = Option<UsageGroup>> {
    prop::option::of(prop::sample::select(UsageGroup::ALL.to_vec()))
}

/// Values mixing declared bits, aggregate values and arbitrary noise.
fn value_strategy() -> impl Strategy<Value = u64> {
    let declared: Vec<u64> = list_flags().iter().map(|f| f.value()).collect();
    prop_oneof![
        any::<u64>(),
        prop::sample::select(declared.clone()),
        prop::collection::vec(prop::sample::select(declared), 1..6)
            .prop_map(|values| values.into_iter().fold(0, |acc, v| acc | v)),
    ]
}

fn tokens(rendered: &str) -> Vec<&str> {
    let (body, _) = rendered.rsplit_once(" [").unwrap();
    body.split(" | ").collect()
}

proptest! {
    #[test]
    fn rendering_ends_with_the_hex_value(value in value_strategy(), group in group_strategy()) {
        let rendered = format_flags(Some(value), group);
        let suffix = format!(" [{}]", to_hex(value));
        prop_assert!(rendered.ends_with(&suffix), "{}", rendered);
    }

    #[test]
    fn one_token_per_set_bit(value in value_strategy(), group in group_strategy()) {
        prop_assume!(value != 0);
        let rendered = format_flags(Some(value), group);
        prop_assert_eq!(tokens(&rendered).len(), value.count_ones() as usize);
    }

    #[test]
    fn rendering_is_deterministic(value in value_strategy(), group in group_strategy()) {
        prop_assert_eq!(format_flags(Some(value), group), format_flags(Some(value), group));
    }

    #[test]
    fn group_members_render_by_their_group_name(
        group in prop::sample::select(UsageGroup::ALL.to_vec()),
        seed in any::<u64>(),
    ) {
        let registry = FlagRegistry::builtin();
        let value = seed & flags_of(group);
        prop_assume!(value != 0);

        let rendered = registry.format(Some(value), Some(group));
        let info = registry.group(group);
        let expected: Vec<&str> = (0..64)
            .map(|bit| 1u64 << bit)
            .filter(|bit| value & bit != 0)
            .filter_map(|bit| info.name_of(bit))
            .collect();
        let rendered_tokens = tokens(&rendered);
        for name in &expected {
            prop_assert!(rendered_tokens.contains(name), "{} missing from {}", name, rendered);
        }
    }

    #[test]
    fn unknown_bits_add_no_groups(value in any::<u64>()) {
        let known = flags_of(GroupSet::all());
        let registry = FlagRegistry::builtin();
        prop_assume!(registry.aliases_of(value).is_empty());
        prop_assume!(registry.aliases_of(value & known).is_empty());
        prop_assert_eq!(groups_of_value(value), groups_of_value(value & known));
    }

    #[test]
    fn unsupported_bits_are_outside_the_group(
        value in any::<u64>(),
        group in prop::sample::select(UsageGroup::ALL.to_vec()),
    ) {
        let registry = FlagRegistry::builtin();
        let unsupported = registry.unsupported_bits(value, group);
        prop_assert_eq!(unsupported & flags_of(group), 0);
        prop_assert_eq!(unsupported | (value & flags_of(group)), value);
        prop_assert_eq!(registry.is_applicable(value, group), unsupported == 0);
    }
}

#[test]
fn none_and_zero_render_identically() {
    let expected = "{ NONE } [0000 0000 0000 0000]";
    assert_eq!(format_flags(None, None), expected);
    assert_eq!(format_flags(Some(0), Some(UsageGroup::Search)), expected);
}
