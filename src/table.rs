//! The built-in flag declaration table.
//!
//! Every flag is declared once here and expanded into three things:
//! a `pub const` holding its 64-bit value, a string constant in [`names`],
//! and an entry of [`FLAG_DECLARATIONS`] that the registry validates and
//! indexes on first use.
//!
//! Aggregates must list only flags declared above them. Bits 0-3 are
//! intentionally declared twice, once for export and once for search; the
//! two names never share a usage group.

use crate::group::GroupSet;
use crate::symbol::FlagDecl;

macro_rules! flag_table {
    (@value bit ($bit:literal)) => { 1u64 << $bit };
    (@value any ($($part:ident),+ $(,)?)) => { 0 $(| $part)+ };
    (@decl $name:literal, bit ($bit:literal), $groups:expr) => {
        FlagDecl::bit($name, $bit, $groups)
    };
    (@decl $name:literal, any ($($part:ident),+ $(,)?), $groups:expr) => {
        FlagDecl::compose($name, &[$(names::$part),+], $groups)
    };
    (
        $(
            $(#[$meta:meta])*
            $ident:ident = $name:literal => $kind:ident ( $($arg:tt)* ) in $groups:expr;
        )*
    ) => {
        $(
            $(#[$meta])*
            pub const $ident: u64 = flag_table!(@value $kind ( $($arg)* ));
        )*

        /// Symbolic names of the built-in flags.
        pub mod names {
            $(
                #[allow(missing_docs)]
                pub const $ident: &str = $name;
            )*
        }

        /// The built-in declarations, in declaration order.
        pub static FLAG_DECLARATIONS: &[FlagDecl<'static>] = &[
            $( flag_table!(@decl $name, $kind ( $($arg)* ), $groups), )*
        ];
    };
}

flag_table! {
    // Export selection.

    /// Export entities resolved from more than one record.
    EXPORT_INCLUDE_MULTI_RECORD_ENTITIES = "ExportIncludeMultiRecordEntities" => bit(0) in GroupSet::EXPORT;
    /// Export entities with a possibly-same relationship.
    EXPORT_INCLUDE_POSSIBLY_SAME = "ExportIncludePossiblySame" => bit(1) in GroupSet::EXPORT;
    /// Export entities with a possibly-related relationship.
    EXPORT_INCLUDE_POSSIBLY_RELATED = "ExportIncludePossiblyRelated" => bit(2) in GroupSet::EXPORT;
    /// Export entities with a name-only relationship.
    EXPORT_INCLUDE_NAME_ONLY = "ExportIncludeNameOnly" => bit(3) in GroupSet::EXPORT;
    /// Export entities with a disclosed relationship.
    EXPORT_INCLUDE_DISCLOSED = "ExportIncludeDisclosed" => bit(4) in GroupSet::EXPORT;
    /// Export entities made of a single record.
    EXPORT_INCLUDE_SINGLE_RECORD_ENTITIES = "ExportIncludeSingleRecordEntities" => bit(5) in GroupSet::EXPORT;

    // Relationship detail.

    /// Include possibly-same relations.
    ENTITY_INCLUDE_POSSIBLY_SAME_RELATIONS = "EntityIncludePossiblySameRelations" => bit(6) in GroupSet::RELATIONS;
    /// Include possibly-related relations.
    ENTITY_INCLUDE_POSSIBLY_RELATED_RELATIONS = "EntityIncludePossiblyRelatedRelations" => bit(7) in GroupSet::RELATIONS;
    /// Include name-only relations.
    ENTITY_INCLUDE_NAME_ONLY_RELATIONS = "EntityIncludeNameOnlyRelations" => bit(8) in GroupSet::RELATIONS;
    /// Include disclosed relations.
    ENTITY_INCLUDE_DISCLOSED_RELATIONS = "EntityIncludeDisclosedRelations" => bit(9) in GroupSet::RELATIONS;

    // Entity detail.

    /// Include every feature value of the entity.
    ENTITY_INCLUDE_ALL_FEATURES = "EntityIncludeAllFeatures" => bit(10) in GroupSet::ENTITY_DETAIL;
    /// Include one representative value per feature.
    ENTITY_INCLUDE_REPRESENTATIVE_FEATURES = "EntityIncludeRepresentativeFeatures" => bit(11) in GroupSet::ENTITY_DETAIL;
    /// Include the entity's best name.
    ENTITY_INCLUDE_ENTITY_NAME = "EntityIncludeEntityName" => bit(12) in GroupSet::ENTITY_DETAIL;
    /// Include a per-data-source record count.
    ENTITY_INCLUDE_RECORD_SUMMARY = "EntityIncludeRecordSummary" => bit(13) in GroupSet::ENTITY_DETAIL;
    /// Include basic record data.
    ENTITY_INCLUDE_RECORD_DATA = "EntityIncludeRecordData" => bit(14) in GroupSet::ENTITY_DETAIL;
    /// Include how each record matched into the entity.
    ENTITY_INCLUDE_RECORD_MATCHING_INFO = "EntityIncludeRecordMatchingInfo" => bit(15) in GroupSet::ENTITY_DETAIL;
    /// Include the original JSON of each record.
    ENTITY_INCLUDE_RECORD_JSON_DATA = "EntityIncludeRecordJsonData" => bit(16) in GroupSet::RECORD_DETAIL;
    /// Include the features of each record.
    ENTITY_INCLUDE_RECORD_FEATURES = "EntityIncludeRecordFeatures" => bit(18) in GroupSet::RECORD_DETAIL;
    /// Include the best name of related entities.
    ENTITY_INCLUDE_RELATED_ENTITY_NAME = "EntityIncludeRelatedEntityName" => bit(19) in GroupSet::RELATIONS;
    /// Include why related entities are related.
    ENTITY_INCLUDE_RELATED_MATCHING_INFO = "EntityIncludeRelatedMatchingInfo" => bit(20) in GroupSet::RELATIONS;
    /// Include the record summary of related entities.
    ENTITY_INCLUDE_RELATED_RECORD_SUMMARY = "EntityIncludeRelatedRecordSummary" => bit(21) in GroupSet::RELATIONS;
    /// Include basic record data of related entities.
    ENTITY_INCLUDE_RELATED_RECORD_DATA = "EntityIncludeRelatedRecordData" => bit(22) in GroupSet::RELATIONS;
    /// Include internal feature identifiers.
    ENTITY_INCLUDE_INTERNAL_FEATURES = "EntityIncludeInternalFeatures" => bit(23) in GroupSet::ENTITY_DETAIL;
    /// Include feature usage statistics.
    ENTITY_INCLUDE_FEATURE_STATS = "EntityIncludeFeatureStats" => bit(24) in GroupSet::ENTITY_DETAIL;

    // Operation specific.

    /// Treat avoided entities as forbidden when finding a path.
    FIND_PATH_STRICT_AVOID = "FindPathStrictAvoid" => bit(25) in GroupSet::FIND_PATH;
    /// Include feature scores.
    INCLUDE_FEATURE_SCORES = "IncludeFeatureScores" => bit(26) in GroupSet::SCORING;
    /// Include candidate statistics for a search.
    SEARCH_INCLUDE_STATS = "SearchIncludeStats" => bit(27) in GroupSet::SEARCH_DETAIL;
    /// Include the record types making up the entity.
    ENTITY_INCLUDE_RECORD_TYPES = "EntityIncludeRecordTypes" => bit(28) in GroupSet::ENTITY_DETAIL;
    /// Include the record types of related entities.
    ENTITY_INCLUDE_RELATED_RECORD_TYPES = "EntityIncludeRelatedRecordTypes" => bit(29) in GroupSet::RELATIONS;
    /// Include why the entities on a path are linked.
    FIND_PATH_INCLUDE_MATCHING_INFO = "FindPathIncludeMatchingInfo" => bit(30) in GroupSet::FIND_PATH;
    /// Include record attributes that were not mapped to features.
    ENTITY_INCLUDE_RECORD_UNMAPPED_DATA = "EntityIncludeRecordUnmappedData" => bit(31) in GroupSet::RECORD_DETAIL;
    /// Include candidates that did not score as matches.
    SEARCH_INCLUDE_ALL_CANDIDATES = "SearchIncludeAllCandidates" => bit(32) in GroupSet::SEARCH_DETAIL;
    /// Include why the entities of a network are linked.
    FIND_NETWORK_INCLUDE_MATCHING_INFO = "FindNetworkIncludeMatchingInfo" => bit(33) in GroupSet::FIND_NETWORK;
    /// Include the detailed breakdown of match keys.
    INCLUDE_MATCH_KEY_DETAILS = "IncludeMatchKeyDetails" => bit(34)
        in GroupSet::SCORING.union(GroupSet::ENTITY).union(GroupSet::EXPORT);
    /// Include per-feature detail for each record.
    ENTITY_INCLUDE_RECORD_FEATURE_DETAILS = "EntityIncludeRecordFeatureDetails" => bit(35) in GroupSet::RECORD_DETAIL;
    /// Include per-feature statistics for each record.
    ENTITY_INCLUDE_RECORD_FEATURE_STATS = "EntityIncludeRecordFeatureStats" => bit(36) in GroupSet::RECORD_DETAIL;
    /// Echo the search request.
    SEARCH_INCLUDE_REQUEST = "SearchIncludeRequest" => bit(37) in GroupSet::SEARCH_DETAIL;
    /// Echo the search request with its resolved features.
    SEARCH_INCLUDE_REQUEST_DETAILS = "SearchIncludeRequestDetails" => bit(38) in GroupSet::SEARCH_DETAIL;
    /// Include first-seen and last-seen dates of each record.
    ENTITY_INCLUDE_RECORD_DATES = "EntityIncludeRecordDates" => bit(39) in GroupSet::RECORD_DETAIL;
    /// Return the entities affected by a modification.
    WITH_INFO = "WithInfo" => bit(62) in GroupSet::MODIFY;

    // Search selection. Same bits as the export selection flags.

    /// Return entities that resolved with the search candidate.
    SEARCH_INCLUDE_RESOLVED = "SearchIncludeResolved" => bit(0) in GroupSet::SEARCH;
    /// Return possibly-same candidates.
    SEARCH_INCLUDE_POSSIBLY_SAME = "SearchIncludePossiblySame" => bit(1) in GroupSet::SEARCH;
    /// Return possibly-related candidates.
    SEARCH_INCLUDE_POSSIBLY_RELATED = "SearchIncludePossiblyRelated" => bit(2) in GroupSet::SEARCH;
    /// Return name-only candidates.
    SEARCH_INCLUDE_NAME_ONLY = "SearchIncludeNameOnly" => bit(3) in GroupSet::SEARCH;

    // Aggregates.

    /// Export every entity.
    EXPORT_INCLUDE_ALL_ENTITIES = "ExportIncludeAllEntities" => any(
        EXPORT_INCLUDE_MULTI_RECORD_ENTITIES,
        EXPORT_INCLUDE_SINGLE_RECORD_ENTITIES,
    ) in GroupSet::EXPORT;
    /// Export every entity that has a relationship.
    EXPORT_INCLUDE_ALL_HAVING_RELATIONSHIPS = "ExportIncludeAllHavingRelationships" => any(
        EXPORT_INCLUDE_POSSIBLY_SAME,
        EXPORT_INCLUDE_POSSIBLY_RELATED,
        EXPORT_INCLUDE_NAME_ONLY,
        EXPORT_INCLUDE_DISCLOSED,
    ) in GroupSet::EXPORT;
    /// Include every kind of relation.
    ENTITY_INCLUDE_ALL_RELATIONS = "EntityIncludeAllRelations" => any(
        ENTITY_INCLUDE_POSSIBLY_SAME_RELATIONS,
        ENTITY_INCLUDE_POSSIBLY_RELATED_RELATIONS,
        ENTITY_INCLUDE_NAME_ONLY_RELATIONS,
        ENTITY_INCLUDE_DISCLOSED_RELATIONS,
    ) in GroupSet::RELATIONS;
    /// Return every class of search candidate.
    SEARCH_INCLUDE_ALL_ENTITIES = "SearchIncludeAllEntities" => any(
        SEARCH_INCLUDE_RESOLVED,
        SEARCH_INCLUDE_POSSIBLY_SAME,
        SEARCH_INCLUDE_POSSIBLY_RELATED,
        SEARCH_INCLUDE_NAME_ONLY,
    ) in GroupSet::SEARCH;
    /// Default detail for entity retrieval.
    ENTITY_DEFAULT_FLAGS = "EntityDefaultFlags" => any(
        ENTITY_INCLUDE_ALL_RELATIONS,
        ENTITY_INCLUDE_REPRESENTATIVE_FEATURES,
        ENTITY_INCLUDE_ENTITY_NAME,
        ENTITY_INCLUDE_RECORD_SUMMARY,
        ENTITY_INCLUDE_RECORD_DATA,
        ENTITY_INCLUDE_RECORD_MATCHING_INFO,
        ENTITY_INCLUDE_RELATED_ENTITY_NAME,
        ENTITY_INCLUDE_RELATED_RECORD_SUMMARY,
        ENTITY_INCLUDE_RELATED_MATCHING_INFO,
    ) in GroupSet::ENTITY.union(GroupSet::VIRTUAL_ENTITY);
    /// Minimal entity detail: matching info and relations only.
    ENTITY_BRIEF_DEFAULT_FLAGS = "EntityBriefDefaultFlags" => any(
        ENTITY_INCLUDE_RECORD_MATCHING_INFO,
        ENTITY_INCLUDE_ALL_RELATIONS,
        ENTITY_INCLUDE_RELATED_MATCHING_INFO,
    ) in GroupSet::ENTITY;
    /// Default selection and detail for exports.
    EXPORT_DEFAULT_FLAGS = "ExportDefaultFlags" => any(
        EXPORT_INCLUDE_ALL_ENTITIES,
        ENTITY_DEFAULT_FLAGS,
    ) in GroupSet::EXPORT;
    /// Default detail for path finding.
    FIND_PATH_DEFAULT_FLAGS = "FindPathDefaultFlags" => any(
        FIND_PATH_INCLUDE_MATCHING_INFO,
        ENTITY_INCLUDE_ENTITY_NAME,
        ENTITY_INCLUDE_RECORD_SUMMARY,
    ) in GroupSet::FIND_PATH;
    /// Default detail for network finding.
    FIND_NETWORK_DEFAULT_FLAGS = "FindNetworkDefaultFlags" => any(
        FIND_NETWORK_INCLUDE_MATCHING_INFO,
        ENTITY_INCLUDE_ENTITY_NAME,
        ENTITY_INCLUDE_RECORD_SUMMARY,
    ) in GroupSet::FIND_NETWORK;
    /// Search returning every candidate class with summary detail.
    SEARCH_BY_ATTRIBUTES_ALL = "SearchByAttributesAll" => any(
        SEARCH_INCLUDE_ALL_ENTITIES,
        ENTITY_INCLUDE_REPRESENTATIVE_FEATURES,
        ENTITY_INCLUDE_ENTITY_NAME,
        ENTITY_INCLUDE_RECORD_SUMMARY,
        INCLUDE_FEATURE_SCORES,
    ) in GroupSet::SEARCH;
    /// Search returning strong candidates with summary detail.
    SEARCH_BY_ATTRIBUTES_STRONG = "SearchByAttributesStrong" => any(
        SEARCH_INCLUDE_RESOLVED,
        SEARCH_INCLUDE_POSSIBLY_SAME,
        ENTITY_INCLUDE_REPRESENTATIVE_FEATURES,
        ENTITY_INCLUDE_ENTITY_NAME,
        ENTITY_INCLUDE_RECORD_SUMMARY,
        INCLUDE_FEATURE_SCORES,
    ) in GroupSet::SEARCH;
    /// Search returning strong candidates without detail.
    SEARCH_BY_ATTRIBUTES_MINIMAL_STRONG = "SearchByAttributesMinimalStrong" => any(
        SEARCH_INCLUDE_RESOLVED,
        SEARCH_INCLUDE_POSSIBLY_SAME,
    ) in GroupSet::SEARCH;
    /// Default detail for explaining a search result.
    WHY_SEARCH_DEFAULT_FLAGS = "WhySearchDefaultFlags" => any(
        INCLUDE_FEATURE_SCORES,
        SEARCH_INCLUDE_REQUEST_DETAILS,
        SEARCH_INCLUDE_STATS,
    ) in GroupSet::WHY_SEARCH;
}
