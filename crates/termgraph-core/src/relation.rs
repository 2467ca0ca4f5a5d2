//! Relation type catalog and traversal direction

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

/// Semantic label on a directed child -> parent edge.
///
/// The set is closed: every ontology namespace (GO, ECO, ...) uses the same catalog.
/// Each variant has a short code, as found in relationship source files, and a long
/// canonical name, as used in request parameters and serialized output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum RelationType {
    Undefined,
    Identity,
    IsA,
    PartOf,
    Regulates,
    PositiveRegulates,
    NegativeRegulates,
    ReplacedBy,
    Consider,
    HasPart,
    OccursIn,
    UsedIn,
    CapableOf,
    CapableOfPartOf,
}

/// Relation types followed when a caller supplies no filter.
pub const DEFAULT_TRAVERSAL_TYPES: [RelationType; 4] = [
    RelationType::IsA,
    RelationType::PartOf,
    RelationType::OccursIn,
    RelationType::Regulates,
];

/// Relation types followed when slimming with no explicit filter.
pub const DEFAULT_SLIM_TRAVERSAL_TYPES: [RelationType; 3] = [
    RelationType::IsA,
    RelationType::PartOf,
    RelationType::OccursIn,
];

static SHORT_NAMES: Lazy<HashMap<&'static str, RelationType>> = Lazy::new(|| {
    RelationType::ALL
        .iter()
        .map(|r| (r.short_name(), *r))
        .collect()
});

static LONG_NAMES: Lazy<HashMap<&'static str, RelationType>> = Lazy::new(|| {
    RelationType::ALL
        .iter()
        .map(|r| (r.long_name(), *r))
        .collect()
});

impl RelationType {
    /// Every variant, in declaration order
    pub const ALL: [RelationType; 14] = [
        RelationType::Undefined,
        RelationType::Identity,
        RelationType::IsA,
        RelationType::PartOf,
        RelationType::Regulates,
        RelationType::PositiveRegulates,
        RelationType::NegativeRegulates,
        RelationType::ReplacedBy,
        RelationType::Consider,
        RelationType::HasPart,
        RelationType::OccursIn,
        RelationType::UsedIn,
        RelationType::CapableOf,
        RelationType::CapableOfPartOf,
    ];

    pub fn short_name(&self) -> &'static str {
        match self {
            Self::Undefined => "?",
            Self::Identity => "=",
            Self::IsA => "I",
            Self::PartOf => "P",
            Self::Regulates => "R",
            Self::PositiveRegulates => "PR",
            Self::NegativeRegulates => "NR",
            Self::ReplacedBy => "replaced_by",
            Self::Consider => "consider",
            Self::HasPart => "H",
            Self::OccursIn => "OI",
            Self::UsedIn => "UI",
            Self::CapableOf => "CO",
            Self::CapableOfPartOf => "CP",
        }
    }

    pub fn long_name(&self) -> &'static str {
        match self {
            Self::Undefined => "ancestor",
            Self::Identity => "equals",
            Self::IsA => "is_a",
            Self::PartOf => "part_of",
            Self::Regulates => "regulates",
            Self::PositiveRegulates => "positively_regulates",
            Self::NegativeRegulates => "negatively_regulates",
            Self::ReplacedBy => "replaced_by",
            Self::Consider => "consider",
            Self::HasPart => "has_part",
            Self::OccursIn => "occurs_in",
            Self::UsedIn => "used_in",
            Self::CapableOf => "capable_of",
            Self::CapableOfPartOf => "capable_of_part_of",
        }
    }

    /// Look up a relation type by its short code
    pub fn by_short_name(name: &str) -> Result<Self> {
        SHORT_NAMES
            .get(name)
            .copied()
            .ok_or_else(|| Error::UnknownRelationType(name.to_string()))
    }

    /// Look up a relation type by its canonical long name
    pub fn by_long_name(name: &str) -> Result<Self> {
        LONG_NAMES
            .get(name)
            .copied()
            .ok_or_else(|| Error::UnknownRelationType(name.to_string()))
    }

    /// Look up a relation type by either its short code or its long name.
    ///
    /// Long names win when a string is both (e.g. `replaced_by`), which is harmless
    /// since such names always denote the same variant.
    pub fn by_name(name: &str) -> Result<Self> {
        LONG_NAMES
            .get(name)
            .or_else(|| SHORT_NAMES.get(name))
            .copied()
            .ok_or_else(|| Error::UnknownRelationType(name.to_string()))
    }

    /// Parse a comma-separated list of relation names, as supplied in request parameters.
    ///
    /// Surrounding whitespace and empty segments are ignored, so `""` yields an empty list.
    pub fn parse_csv(csv: &str) -> Result<Vec<Self>> {
        csv.split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(Self::by_name)
            .collect()
    }

    /// Whether this relation satisfies a query for `candidate`.
    ///
    /// Not symmetric: `PositiveRegulates.has_type(Regulates)` holds, while
    /// `Regulates.has_type(PositiveRegulates)` does not. `Undefined` as the candidate
    /// matches anything, and an `Identity` edge matches every candidate.
    pub fn has_type(self, candidate: RelationType) -> bool {
        candidate == Self::Undefined
            || self == Self::Identity
            || candidate == self
            || (candidate == Self::Regulates
                && matches!(self, Self::PositiveRegulates | Self::NegativeRegulates))
    }

    /// Whether [`has_type`](Self::has_type) holds for any of `candidates`
    pub fn has_type_any(self, candidates: &[RelationType]) -> bool {
        candidates.iter().any(|c| self.has_type(*c))
    }

    /// Returns `filter`, or the default traversal set when `filter` is empty
    pub fn effective_filter(filter: &[RelationType]) -> &[RelationType] {
        if filter.is_empty() {
            &DEFAULT_TRAVERSAL_TYPES
        } else {
            filter
        }
    }
}

impl fmt::Display for RelationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.long_name())
    }
}

impl FromStr for RelationType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::by_name(s)
    }
}

impl TryFrom<String> for RelationType {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        Self::by_name(&value)
    }
}

impl From<RelationType> for String {
    fn from(value: RelationType) -> Self {
        value.long_name().to_string()
    }
}

/// Direction for graph traversal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Follow child -> parent edges
    #[default]
    Ancestors,
    /// Follow parent -> child edges
    Descendants,
    Both,
}

impl FromStr for Direction {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "ancestors" | "up" => Ok(Self::Ancestors),
            "descendants" | "down" => Ok(Self::Descendants),
            "both" => Ok(Self::Both),
            other => Err(Error::Validation(format!("Unknown direction: {}", other))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_by_short_and_long_name() {
        assert_eq!(RelationType::by_short_name("I").unwrap(), RelationType::IsA);
        assert_eq!(RelationType::by_long_name("part_of").unwrap(), RelationType::PartOf);
        assert_eq!(RelationType::by_name("OI").unwrap(), RelationType::OccursIn);
        assert_eq!(
            RelationType::by_name("negatively_regulates").unwrap(),
            RelationType::NegativeRegulates
        );
        assert_eq!(RelationType::by_name("?").unwrap(), RelationType::Undefined);
        assert_eq!(RelationType::by_name("ancestor").unwrap(), RelationType::Undefined);
    }

    #[test]
    fn test_unknown_name_fails() {
        let err = RelationType::by_name("sibling_of").unwrap_err();
        assert!(matches!(err, Error::UnknownRelationType(ref n) if n == "sibling_of"));
        assert!(RelationType::by_short_name("is_a").is_err());
        assert!(RelationType::by_long_name("I").is_err());
    }

    #[test]
    fn test_names_round_trip_for_every_variant() {
        for r in RelationType::ALL {
            assert_eq!(RelationType::by_short_name(r.short_name()).unwrap(), r);
            assert_eq!(RelationType::by_long_name(r.long_name()).unwrap(), r);
        }
    }

    #[test]
    fn test_name_tables_cover_every_variant() {
        assert_eq!(SHORT_NAMES.len(), RelationType::ALL.len());
        assert_eq!(LONG_NAMES.len(), RelationType::ALL.len());
    }

    #[test]
    fn test_undefined_candidate_matches_everything() {
        for r in RelationType::ALL {
            assert!(r.has_type(RelationType::Undefined), "{r} should match ancestor");
        }
    }

    #[test]
    fn test_identity_matches_every_candidate() {
        for r in RelationType::ALL {
            assert!(RelationType::Identity.has_type(r), "equals should match {r}");
        }
    }

    #[test]
    fn test_regulates_subsumption_is_asymmetric() {
        assert!(RelationType::PositiveRegulates.has_type(RelationType::Regulates));
        assert!(RelationType::NegativeRegulates.has_type(RelationType::Regulates));
        assert!(!RelationType::Regulates.has_type(RelationType::PositiveRegulates));
        assert!(!RelationType::Regulates.has_type(RelationType::NegativeRegulates));
    }

    #[test]
    fn test_distinct_types_do_not_match() {
        assert!(!RelationType::IsA.has_type(RelationType::PartOf));
        assert!(!RelationType::HasPart.has_type(RelationType::PartOf));
        assert!(!RelationType::Undefined.has_type(RelationType::IsA));
    }

    #[test]
    fn test_has_type_any() {
        let filter = [RelationType::IsA, RelationType::Regulates];
        assert!(RelationType::IsA.has_type_any(&filter));
        assert!(RelationType::PositiveRegulates.has_type_any(&filter));
        assert!(!RelationType::PartOf.has_type_any(&filter));
        assert!(!RelationType::PartOf.has_type_any(&[]));
    }

    #[test]
    fn test_parse_csv() {
        let parsed = RelationType::parse_csv("is_a, part_of,OI").unwrap();
        assert_eq!(
            parsed,
            vec![RelationType::IsA, RelationType::PartOf, RelationType::OccursIn]
        );
        assert!(RelationType::parse_csv("").unwrap().is_empty());
        assert!(RelationType::parse_csv("is_a,bogus").is_err());
    }

    #[test]
    fn test_effective_filter_defaults_when_empty() {
        assert_eq!(RelationType::effective_filter(&[]), &DEFAULT_TRAVERSAL_TYPES);
        assert_eq!(
            RelationType::effective_filter(&[RelationType::HasPart]),
            &[RelationType::HasPart]
        );
    }

    #[test]
    fn test_serializes_as_long_name() {
        let json = serde_json::to_string(&RelationType::PositiveRegulates).unwrap();
        assert_eq!(json, "\"positively_regulates\"");
        let back: RelationType = serde_json::from_str("\"PR\"").unwrap();
        assert_eq!(back, RelationType::PositiveRegulates);
    }

    #[test]
    fn test_direction_from_str() {
        assert_eq!("ancestors".parse::<Direction>().unwrap(), Direction::Ancestors);
        assert_eq!("Descendants".parse::<Direction>().unwrap(), Direction::Descendants);
        assert_eq!("both".parse::<Direction>().unwrap(), Direction::Both);
        assert!("sideways".parse::<Direction>().is_err());
    }
}
