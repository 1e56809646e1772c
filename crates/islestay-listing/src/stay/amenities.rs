//! Amenity lists and maps, normalized to a set.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Amenities as they arrive from the listings service.
///
/// Older listings send an ordered list of names, newer ones a map of name to
/// presence flag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Amenities {
    /// Ordered list of amenity names.
    List(Vec<String>),
    /// Amenity name to presence flag.
    Map(BTreeMap<String, bool>),
}

impl Default for Amenities {
    fn default() -> Self {
        Amenities::List(Vec::new())
    }
}

impl Amenities {
    /// Normalize to the set of amenities that are present.
    pub fn normalize(&self) -> AmenitySet {
        match self {
            Amenities::List(names) => names.iter().cloned().collect(),
            Amenities::Map(flags) => flags
                .iter()
                .filter(|(_, present)| **present)
                .map(|(name, _)| name.clone())
                .collect(),
        }
    }

    /// Check membership without building a set.
    pub fn has(&self, name: &str) -> bool {
        match self {
            Amenities::List(names) => names.iter().any(|n| n == name),
            Amenities::Map(flags) => flags.get(name).copied().unwrap_or(false),
        }
    }

    /// Check that every amenity in `required` is present.
    pub fn has_all(&self, required: &AmenitySet) -> bool {
        required.iter().all(|name| self.has(name))
    }
}

impl From<Vec<&str>> for Amenities {
    fn from(names: Vec<&str>) -> Self {
        Amenities::List(names.into_iter().map(str::to_string).collect())
    }
}

/// Canonical set of present amenities.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct AmenitySet(BTreeSet<String>);

impl AmenitySet {
    /// Create an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Check membership.
    pub fn contains(&self, name: &str) -> bool {
        self.0.contains(name)
    }

    /// Check that every amenity in `required` is present.
    pub fn contains_all(&self, required: &AmenitySet) -> bool {
        required.0.is_subset(&self.0)
    }

    /// Add an amenity.
    pub fn insert(&mut self, name: impl Into<String>) -> bool {
        self.0.insert(name.into())
    }

    /// Number of amenities.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Check if empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate names in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

impl FromIterator<String> for AmenitySet {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> FromIterator<&'a str> for AmenitySet {
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
        Self(iter.into_iter().map(str::to_string).collect())
    }
}
