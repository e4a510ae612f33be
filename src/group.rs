//! Usage groups and group sets.
//!
//! A usage group is the category of engine operation a flag applies to
//! (search, export, find-path, ...). Each group owns one bit of a
//! [`GroupSet`], so unions and intersections of groups are plain integer
//! arithmetic.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::UsageError;

/// A single category of operations that flags can apply to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UsageGroup {
    /// Adding a record.
    AddRecord,
    /// Deleting a record.
    DeleteRecord,
    /// Reevaluating a single record.
    ReevaluateRecord,
    /// Reevaluating a resolved entity.
    ReevaluateEntity,
    /// Processing a pending redo record.
    ProcessRedo,
    /// Retrieving an entity by ID or by record key.
    Entity,
    /// Retrieving a single record.
    Record,
    /// Previewing how a record would be loaded.
    RecordPreview,
    /// Finding a path between two entities.
    FindPath,
    /// Finding the network around a set of entities.
    FindNetwork,
    /// Searching by attributes.
    Search,
    /// Exporting entities.
    Export,
    /// Explaining why a record resolved into an entity.
    WhyRecordInEntity,
    /// Explaining why two records did or did not resolve.
    WhyRecords,
    /// Explaining why two entities did or did not resolve.
    WhyEntities,
    /// Explaining why an entity matched a search.
    WhySearch,
    /// Explaining how an entity was built.
    How,
    /// Building a virtual entity from a set of records.
    VirtualEntity,
}

impl UsageGroup {
    /// Every usage group, in bit order.
    pub const ALL: [Self; 18] = [
        Self::AddRecord,
        Self::DeleteRecord,
        Self::ReevaluateRecord,
        Self::ReevaluateEntity,
        Self::ProcessRedo,
        Self::Entity,
        Self::Record,
        Self::RecordPreview,
        Self::FindPath,
        Self::FindNetwork,
        Self::Search,
        Self::Export,
        Self::WhyRecordInEntity,
        Self::WhyRecords,
        Self::WhyEntities,
        Self::WhySearch,
        Self::How,
        Self::VirtualEntity,
    ];

    /// Number of declared usage groups.
    pub const COUNT: usize = Self::ALL.len();

    /// Returns the bit position of this group inside a [`GroupSet`].
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Returns the single-bit set for this group.
    #[must_use]
    pub const fn as_set(self) -> GroupSet {
        GroupSet::from_bits_retain(1 << self.index())
    }

    /// Returns the canonical name of this group.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::AddRecord => "ADD_RECORD",
            Self::DeleteRecord => "DELETE_RECORD",
            Self::ReevaluateRecord => "REEVALUATE_RECORD",
            Self::ReevaluateEntity => "REEVALUATE_ENTITY",
            Self::ProcessRedo => "PROCESS_REDO",
            Self::Entity => "ENTITY",
            Self::Record => "RECORD",
            Self::RecordPreview => "RECORD_PREVIEW",
            Self::FindPath => "FIND_PATH",
            Self::FindNetwork => "FIND_NETWORK",
            Self::Search => "SEARCH",
            Self::Export => "EXPORT",
            Self::WhyRecordInEntity => "WHY_RECORD_IN_ENTITY",
            Self::WhyRecords => "WHY_RECORDS",
            Self::WhyEntities => "WHY_ENTITIES",
            Self::WhySearch => "WHY_SEARCH",
            Self::How => "HOW",
            Self::VirtualEntity => "VIRTUAL_ENTITY",
        }
    }

    /// Looks up a group by its canonical name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|g| g.name() == name)
    }
}

impl fmt::Display for UsageGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for UsageGroup {
    type Err = UsageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s).ok_or_else(|| UsageError::InvalidArgument {
            message: format!("unknown usage group '{s}'"),
        })
    }
}

bitflags::bitflags! {
    /// A set of usage groups.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct GroupSet: u64 {
        const ADD_RECORD = 1 << 0;
        const DELETE_RECORD = 1 << 1;
        const REEVALUATE_RECORD = 1 << 2;
        const REEVALUATE_ENTITY = 1 << 3;
        const PROCESS_REDO = 1 << 4;
        const ENTITY = 1 << 5;
        const RECORD = 1 << 6;
        const RECORD_PREVIEW = 1 << 7;
        const FIND_PATH = 1 << 8;
        const FIND_NETWORK = 1 << 9;
        const SEARCH = 1 << 10;
        const EXPORT = 1 << 11;
        const WHY_RECORD_IN_ENTITY = 1 << 12;
        const WHY_RECORDS = 1 << 13;
        const WHY_ENTITIES = 1 << 14;
        const WHY_SEARCH = 1 << 15;
        const HOW = 1 << 16;
        const VIRTUAL_ENTITY = 1 << 17;
    }
}

// Group families shared by many flags. Kept outside the bitflags block so
// they never show up when iterating named flags.
impl GroupSet {
    /// Operations that modify the repository and can return affected-entity info.
    pub const MODIFY: Self = Self::ADD_RECORD
        .union(Self::DELETE_RECORD)
        .union(Self::REEVALUATE_RECORD)
        .union(Self::REEVALUATE_ENTITY)
        .union(Self::PROCESS_REDO);

    /// Operations whose output describes relationships between entities.
    pub const RELATIONS: Self = Self::ENTITY
        .union(Self::EXPORT)
        .union(Self::FIND_PATH)
        .union(Self::FIND_NETWORK);

    /// Operations whose output contains entity details.
    pub const ENTITY_DETAIL: Self = Self::RELATIONS
        .union(Self::SEARCH)
        .union(Self::WHY_RECORD_IN_ENTITY)
        .union(Self::WHY_RECORDS)
        .union(Self::WHY_ENTITIES)
        .union(Self::WHY_SEARCH)
        .union(Self::VIRTUAL_ENTITY);

    /// Operations whose output contains per-record details.
    pub const RECORD_DETAIL: Self = Self::ENTITY_DETAIL
        .union(Self::RECORD)
        .union(Self::RECORD_PREVIEW);

    /// Operations that can report match scoring.
    pub const SCORING: Self = Self::FIND_PATH
        .union(Self::FIND_NETWORK)
        .union(Self::SEARCH)
        .union(Self::WHY_RECORD_IN_ENTITY)
        .union(Self::WHY_RECORDS)
        .union(Self::WHY_ENTITIES)
        .union(Self::WHY_SEARCH)
        .union(Self::HOW);

    /// Search-style operations.
    pub const SEARCH_DETAIL: Self = Self::SEARCH.union(Self::WHY_SEARCH);

    /// Number of groups in this set.
    #[must_use]
    pub const fn count(self) -> u32 {
        self.bits().count_ones()
    }

    /// Returns the group if this set holds exactly one declared group.
    #[must_use]
    pub fn single(self) -> Option<UsageGroup> {
        if self.count() != 1 {
            return None;
        }
        UsageGroup::ALL.get(self.bits().trailing_zeros() as usize).copied()
    }

    /// Iterates the declared groups in this set, in bit order.
    pub fn groups(self) -> impl Iterator<Item = UsageGroup> {
        UsageGroup::ALL
            .into_iter()
            .filter(move |g| self.contains(g.as_set()))
    }

    /// Returns the group names in this set, in bit order.
    #[must_use]
    pub fn names(self) -> Vec<&'static str> {
        self.groups().map(UsageGroup::name).collect()
    }
}

impl From<UsageGroup> for GroupSet {
    fn from(group: UsageGroup) -> Self {
        group.as_set()
    }
}

impl FromIterator<UsageGroup> for GroupSet {
    fn from_iter<I: IntoIterator<Item = UsageGroup>>(iter: I) -> Self {
        let mut set = Self::empty();
        for group in iter {
            set |= group.as_set();
        }
        set
    }
}

impl fmt::Display for GroupSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return f.write_str("{ }");
        }
        f.write_str("{ ")?;
        for (i, group) in self.groups().enumerate() {
            if i > 0 {
                f.write_str(" | ")?;
            }
            f.write_str(group.name())?;
        }
        f.write_str(" }")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_bits_match_named_flags() {
        for group in UsageGroup::ALL {
            let named = GroupSet::from_name(group.name()).expect("named flag");
            assert_eq!(named, group.as_set(), "{group}");
        }
        assert_eq!(GroupSet::all().count() as usize, UsageGroup::COUNT);
    }

    #[test]
    fn test_single() {
        assert_eq!(GroupSet::SEARCH.single(), Some(UsageGroup::Search));
        assert_eq!(GroupSet::empty().single(), None);
        assert_eq!((GroupSet::SEARCH | GroupSet::EXPORT).single(), None);
        assert_eq!(GroupSet::from_bits_retain(1 << 40).single(), None);
    }

    #[test]
    fn test_groups_iterates_in_bit_order() {
        let set = GroupSet::EXPORT | GroupSet::ADD_RECORD | GroupSet::SEARCH;
        let groups: Vec<_> = set.groups().collect();
        assert_eq!(
            groups,
            vec![UsageGroup::AddRecord, UsageGroup::Search, UsageGroup::Export]
        );
        assert_eq!(set.names(), vec!["ADD_RECORD", "SEARCH", "EXPORT"]);
    }

    #[test]
    fn test_families() {
        assert_eq!(GroupSet::MODIFY.count(), 5);
        assert!(GroupSet::ENTITY_DETAIL.contains(GroupSet::RELATIONS));
        assert!(GroupSet::RECORD_DETAIL.contains(GroupSet::ENTITY_DETAIL));
        assert!(!GroupSet::RELATIONS.contains(GroupSet::SEARCH));
    }

    #[test]
    fn test_from_str() {
        assert_eq!("WHY_SEARCH".parse::<UsageGroup>().unwrap(), UsageGroup::WhySearch);
        assert!("why_search".parse::<UsageGroup>().is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!(GroupSet::empty().to_string(), "{ }");
        assert_eq!(
            (GroupSet::EXPORT | GroupSet::SEARCH).to_string(),
            "{ SEARCH | EXPORT }"
        );
        assert_eq!(UsageGroup::FindPath.to_string(), "FIND_PATH");
    }

    #[test]
    fn test_serialization() {
        let json = serde_json::to_string(&UsageGroup::WhyRecordInEntity).unwrap();
        assert_eq!(json, "\"WHY_RECORD_IN_ENTITY\"");

        let group: UsageGroup = serde_json::from_str("\"FIND_NETWORK\"").unwrap();
        assert_eq!(group, UsageGroup::FindNetwork);
    }
}
