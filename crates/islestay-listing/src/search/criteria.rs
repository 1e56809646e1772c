//! Filter criteria held by the filters modal.

use crate::stay::{AmenitySet, PropertyType, StayType};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Amenity sub-groups shown in the filters modal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AmenityGroup {
    Essentials,
    Luxury,
    FamilyFriendly,
    Safety,
}

/// Required amenities, grouped as the modal displays them.
///
/// Groups only affect presentation; matching flattens them into one set.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AmenityCriteria {
    pub essentials: BTreeMap<String, bool>,
    pub luxury: BTreeMap<String, bool>,
    pub family_friendly: BTreeMap<String, bool>,
    pub safety: BTreeMap<String, bool>,
}

impl AmenityCriteria {
    fn group_mut(&mut self, group: AmenityGroup) -> &mut BTreeMap<String, bool> {
        match group {
            AmenityGroup::Essentials => &mut self.essentials,
            AmenityGroup::Luxury => &mut self.luxury,
            AmenityGroup::FamilyFriendly => &mut self.family_friendly,
            AmenityGroup::Safety => &mut self.safety,
        }
    }

    /// Set whether an amenity is required.
    pub fn set(&mut self, group: AmenityGroup, name: impl Into<String>, required: bool) {
        self.group_mut(group).insert(name.into(), required);
    }

    /// Every amenity flagged as required, across all groups.
    pub fn required(&self) -> AmenitySet {
        [
            &self.essentials,
            &self.luxury,
            &self.family_friendly,
            &self.safety,
        ]
        .into_iter()
        .flat_map(|group| group.iter())
        .filter(|(_, required)| **required)
        .map(|(name, _)| name.as_str())
        .collect()
    }

    /// Clear all groups.
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// Criteria applied by the facet matcher.
///
/// Unset options and `false` flags impose no constraint. `min_price <= max_price`
/// is a caller invariant (see [`PriceHistogram::clamp_selection`]).
///
/// [`PriceHistogram::clamp_selection`]: crate::search::PriceHistogram::clamp_selection
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterCriteria {
    /// Required stay type (None = "All").
    #[serde(alias = "type", with = "all_choice")]
    pub stay_type: Option<StayType>,
    /// Required subtype for `Airbnb` stays (None = "All").
    #[serde(with = "all_choice")]
    pub property_type: Option<PropertyType>,
    /// Lower trip price bound.
    pub min_price: Option<i64>,
    /// Upper trip price bound.
    pub max_price: Option<i64>,
    /// Minimum bedrooms.
    pub bedrooms: Option<u32>,
    /// Minimum bathrooms.
    pub bathrooms: Option<u32>,
    /// Minimum beds.
    pub beds: Option<u32>,
    pub is_luxury: bool,
    pub is_guest_favorite: bool,
    pub instant_book: bool,
    pub self_check_in: bool,
    pub pet_allowed: bool,
    pub amenities: AmenityCriteria,
}

impl FilterCriteria {
    /// Criteria that match everything.
    pub fn new() -> Self {
        Self::default()
    }

    /// Require a stay type.
    pub fn with_stay_type(mut self, stay_type: impl Into<StayType>) -> Self {
        self.stay_type = Some(stay_type.into());
        self
    }

    /// Require an `Airbnb` subtype.
    pub fn with_property_type(mut self, property_type: impl Into<PropertyType>) -> Self {
        self.property_type = Some(property_type.into());
        self
    }

    /// Set trip price bounds.
    pub fn with_price_range(mut self, min: Option<i64>, max: Option<i64>) -> Self {
        self.min_price = min;
        self.max_price = max;
        self
    }

    /// Require a minimum number of bedrooms.
    pub fn with_min_bedrooms(mut self, bedrooms: u32) -> Self {
        self.bedrooms = Some(bedrooms);
        self
    }

    /// Require an amenity.
    pub fn with_amenity(mut self, group: AmenityGroup, name: impl Into<String>) -> Self {
        self.amenities.set(group, name, true);
        self
    }

    /// Check if either price bound is set.
    pub fn has_price_bounds(&self) -> bool {
        self.min_price.is_some() || self.max_price.is_some()
    }

    /// Required amenities flattened across groups.
    pub fn required_amenities(&self) -> AmenitySet {
        self.amenities.required()
    }

    /// Number of active filters, excluding price bounds.
    ///
    /// Shown as the badge on the filters button.
    pub fn active_filter_count(&self) -> usize {
        let choices = [self.stay_type.is_some(), self.property_type.is_some()];
        let rooms = [self.bedrooms, self.bathrooms, self.beds].map(|n| n.unwrap_or(0) > 0);
        let flags = [
            self.is_luxury,
            self.is_guest_favorite,
            self.instant_book,
            self.self_check_in,
            self.pet_allowed,
        ];

        choices.iter().chain(&rooms).chain(&flags).filter(|on| **on).count()
            + self.required_amenities().len()
    }

    /// Clear every filter.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Parse a type or subtype choice; `"All"` or an empty string means no constraint.
pub fn parse_choice<T: From<String>>(raw: &str) -> Option<T> {
    let raw = raw.trim();
    if raw.is_empty() || raw == all_choice::ALL {
        None
    } else {
        Some(T::from(raw.to_string()))
    }
}

/// Serde adapter mapping `"All"` (or an empty string) to `None`.
mod all_choice {
    use serde::{Deserialize, Deserializer, Serializer};

    pub const ALL: &str = "All";

    pub fn serialize<S, T>(value: &Option<T>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
        T: AsRef<str>,
    {
        serializer.serialize_str(value.as_ref().map_or(ALL, |v| AsRef::<str>::as_ref(v)))
    }

    pub fn deserialize<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
    where
        D: Deserializer<'de>,
        T: From<String>,
    {
        let raw = Option::<String>::deserialize(deserializer)?;
        Ok(raw.as_deref().and_then(super::parse_choice))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_matches_everything() {
        let criteria = FilterCriteria::new();
        assert!(criteria.stay_type.is_none());
        assert!(!criteria.has_price_bounds());
        assert_eq!(criteria.active_filter_count(), 0);
    }

    #[test]
    fn test_required_amenities_flatten_groups() {
        let mut criteria = FilterCriteria::new()
            .with_amenity(AmenityGroup::Essentials, "wifi")
            .with_amenity(AmenityGroup::Safety, "smoke_alarm");
        criteria.amenities.set(AmenityGroup::Luxury, "pool", false);

        let required = criteria.required_amenities();
        assert_eq!(required.len(), 2);
        assert!(required.contains("wifi"));
        assert!(required.contains("smoke_alarm"));
        assert!(!required.contains("pool"));
    }

    #[test]
    fn test_active_filter_count() {
        let mut criteria = FilterCriteria::new()
            .with_stay_type(StayType::Villa)
            .with_min_bedrooms(2)
            .with_price_range(Some(100), Some(900))
            .with_amenity(AmenityGroup::Essentials, "wifi");
        criteria.instant_book = true;
        criteria.bathrooms = Some(0);

        assert_eq!(criteria.active_filter_count(), 4);

        criteria.reset();
        assert_eq!(criteria, FilterCriteria::default());
    }

    #[test]
    fn test_deserialize_all_as_none() {
        let criteria: FilterCriteria =
            serde_json::from_str(r#"{"type": "All", "property_type": "House"}"#).unwrap();
        assert!(criteria.stay_type.is_none());
        assert_eq!(criteria.property_type, Some(PropertyType::House));
    }

    #[test]
    fn test_deserialize_nested_amenities() {
        let criteria: FilterCriteria = serde_json::from_str(
            r#"{"stay_type": "Airbnb", "bedrooms": 2, "instant_book": true,
                "amenities": {"essentials": {"wifi": true, "kitchen": false}}}"#,
        )
        .unwrap();
        assert_eq!(criteria.stay_type, Some(StayType::Airbnb));
        assert_eq!(criteria.bedrooms, Some(2));
        assert!(criteria.instant_book);
        assert_eq!(criteria.required_amenities().len(), 1);
    }

    #[test]
    fn test_parse_choice() {
        assert_eq!(parse_choice::<StayType>("All"), None);
        assert_eq!(parse_choice::<StayType>("  "), None);
        assert_eq!(parse_choice::<StayType>("Villa"), Some(StayType::Villa));
        assert_eq!(
            parse_choice::<PropertyType>("Guesthouse"),
            Some(PropertyType::Guesthouse)
        );
    }

    #[test]
    fn test_serialize_unset_choice_as_all() {
        let value = serde_json::to_value(FilterCriteria::new()).unwrap();
        assert_eq!(value["stay_type"], "All");
        assert_eq!(value["property_type"], "All");
    }
}
