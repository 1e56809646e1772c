//! Stay records.

use super::amenities::{Amenities, AmenitySet};
use super::discount::DiscountConfig;
use crate::ids::StayId;
use crate::ListingError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of stay.
///
/// Unknown values from the listings service are kept verbatim in `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum StayType {
    Hotel,
    Villa,
    Airbnb,
    Other(String),
}

impl StayType {
    /// Get the type as it appears in listings.
    pub fn as_str(&self) -> &str {
        match self {
            StayType::Hotel => "Hotel",
            StayType::Villa => "Villa",
            StayType::Airbnb => "Airbnb",
            StayType::Other(other) => other,
        }
    }
}

impl From<String> for StayType {
    fn from(s: String) -> Self {
        match s.as_str() {
            "Hotel" => StayType::Hotel,
            "Villa" => StayType::Villa,
            "Airbnb" => StayType::Airbnb,
            _ => StayType::Other(s),
        }
    }
}

impl From<&str> for StayType {
    fn from(s: &str) -> Self {
        StayType::from(s.to_string())
    }
}

impl From<StayType> for String {
    fn from(t: StayType) -> Self {
        match t {
            StayType::Other(other) => other,
            known => known.as_str().to_string(),
        }
    }
}

impl AsRef<str> for StayType {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for StayType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Property subtype, meaningful for `Airbnb` stays.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum PropertyType {
    House,
    Apartment,
    Guesthouse,
    Other(String),
}

impl PropertyType {
    /// Get the subtype as it appears in listings.
    pub fn as_str(&self) -> &str {
        match self {
            PropertyType::House => "House",
            PropertyType::Apartment => "Apartment",
            PropertyType::Guesthouse => "Guesthouse",
            PropertyType::Other(other) => other,
        }
    }
}

impl From<String> for PropertyType {
    fn from(s: String) -> Self {
        match s.as_str() {
            "House" => PropertyType::House,
            "Apartment" => PropertyType::Apartment,
            "Guesthouse" => PropertyType::Guesthouse,
            _ => PropertyType::Other(s),
        }
    }
}

impl From<&str> for PropertyType {
    fn from(s: &str) -> Self {
        PropertyType::from(s.to_string())
    }
}

impl From<PropertyType> for String {
    fn from(t: PropertyType) -> Self {
        match t {
            PropertyType::Other(other) => other,
            known => known.as_str().to_string(),
        }
    }
}

impl AsRef<str> for PropertyType {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for PropertyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Booking conveniences a host offers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BookingOptions {
    pub instant_book: bool,
    pub self_check_in: bool,
    #[serde(alias = "allowPets", alias = "petsAllowed")]
    pub pet_allowed: bool,
}

/// Editorial tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StayTags {
    pub is_luxury: bool,
    pub is_guest_favorite: bool,
}

/// A bookable property listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stay {
    /// Unique stay identifier.
    #[serde(alias = "_id")]
    pub id: StayId,
    /// Price per night.
    #[serde(alias = "price")]
    pub nightly_price: f64,
    /// Kind of stay.
    #[serde(rename = "type")]
    pub stay_type: StayType,
    /// Subtype for `Airbnb` stays.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub property_type: Option<PropertyType>,
    #[serde(default)]
    pub bedrooms: u32,
    #[serde(default)]
    pub bathrooms: u32,
    #[serde(default)]
    pub beds: u32,
    /// Maximum occupancy.
    #[serde(default)]
    pub max_guests: u32,
    /// Island the stay is on.
    #[serde(default)]
    pub island: String,
    #[serde(default)]
    pub amenities: Amenities,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub booking_options: Option<BookingOptions>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<StayTags>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discounts: Option<DiscountConfig>,
}

impl Stay {
    /// Create a stay with no rooms, amenities, tags or discounts.
    pub fn new(id: impl Into<StayId>, nightly_price: f64, stay_type: impl Into<StayType>) -> Self {
        Self {
            id: id.into(),
            nightly_price,
            stay_type: stay_type.into(),
            property_type: None,
            bedrooms: 0,
            bathrooms: 0,
            beds: 0,
            max_guests: 0,
            island: String::new(),
            amenities: Amenities::default(),
            booking_options: None,
            tags: None,
            discounts: None,
        }
    }

    /// Set the property subtype.
    pub fn with_property_type(mut self, property_type: impl Into<PropertyType>) -> Self {
        self.property_type = Some(property_type.into());
        self
    }

    /// Set room counts.
    pub fn with_rooms(mut self, bedrooms: u32, bathrooms: u32, beds: u32) -> Self {
        self.bedrooms = bedrooms;
        self.bathrooms = bathrooms;
        self.beds = beds;
        self
    }

    /// Set maximum occupancy.
    pub fn with_max_guests(mut self, max_guests: u32) -> Self {
        self.max_guests = max_guests;
        self
    }

    /// Set the island.
    pub fn with_island(mut self, island: impl Into<String>) -> Self {
        self.island = island.into();
        self
    }

    /// Set amenities.
    pub fn with_amenities(mut self, amenities: impl Into<Amenities>) -> Self {
        self.amenities = amenities.into();
        self
    }

    /// Set booking options.
    pub fn with_booking_options(mut self, options: BookingOptions) -> Self {
        self.booking_options = Some(options);
        self
    }

    /// Set tags.
    pub fn with_tags(mut self, tags: StayTags) -> Self {
        self.tags = Some(tags);
        self
    }

    /// Set discount configuration.
    pub fn with_discounts(mut self, discounts: DiscountConfig) -> Self {
        self.discounts = Some(discounts);
        self
    }

    /// Present amenities as a set.
    pub fn amenity_set(&self) -> AmenitySet {
        self.amenities.normalize()
    }

    /// Booking options, all off when absent.
    pub fn booking(&self) -> BookingOptions {
        self.booking_options.unwrap_or_default()
    }

    /// Tags, all off when absent.
    pub fn tag_flags(&self) -> StayTags {
        self.tags.unwrap_or_default()
    }

    /// Check if the stay is on the given island (case-insensitive).
    pub fn is_on_island(&self, island: &str) -> bool {
        self.island.trim().eq_ignore_ascii_case(island.trim())
    }
}

/// Listings payload wrapped as `{"stays": [...]}`.
#[derive(Deserialize)]
struct WrappedStays {
    stays: Vec<Stay>,
}

/// Decode a listings payload, either a bare array or `{"stays": [...]}`.
///
/// The shape is picked from the first token so decode errors name the
/// offending field and position.
pub fn parse_stays(json: &str) -> Result<Vec<Stay>, ListingError> {
    if json.trim_start().starts_with('[') {
        Ok(serde_json::from_str(json)?)
    } else {
        let wrapped: WrappedStays = serde_json::from_str(json)?;
        Ok(wrapped.stays)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stay_type_from_string() {
        assert_eq!(StayType::from("Hotel"), StayType::Hotel);
        assert_eq!(StayType::from("Airbnb"), StayType::Airbnb);
        assert_eq!(
            StayType::from("Treehouse"),
            StayType::Other("Treehouse".to_string())
        );
        // Matching is exact.
        assert_eq!(StayType::from("hotel"), StayType::Other("hotel".to_string()));
    }

    #[test]
    fn test_decode_listing_record() {
        let json = r#"{
            "_id": "65f0c1",
            "price": 180,
            "type": "Airbnb",
            "propertyType": "Apartment",
            "bedrooms": 2,
            "bathrooms": 1,
            "beds": 3,
            "maxGuests": 4,
            "island": "Mahe",
            "amenities": {"wifi": true, "pool": false},
            "bookingOptions": {"instantBook": true, "allowPets": true},
            "tags": {"isGuestFavorite": true},
            "discounts": {"weekly": 10}
        }"#;

        let stay: Stay = serde_json::from_str(json).unwrap();
        assert_eq!(stay.id.as_str(), "65f0c1");
        assert_eq!(stay.nightly_price, 180.0);
        assert_eq!(stay.stay_type, StayType::Airbnb);
        assert_eq!(stay.property_type, Some(PropertyType::Apartment));
        assert_eq!(stay.max_guests, 4);
        assert!(stay.amenity_set().contains("wifi"));
        assert!(!stay.amenity_set().contains("pool"));
        assert!(stay.booking().instant_book);
        assert!(stay.booking().pet_allowed);
        assert!(!stay.booking().self_check_in);
        assert!(stay.tag_flags().is_guest_favorite);
        assert!(!stay.tag_flags().is_luxury);
        assert_eq!(stay.discounts.unwrap().weekly, Some(10.0));
    }

    #[test]
    fn test_decode_minimal_record() {
        let stay: Stay =
            serde_json::from_str(r#"{"id": "s1", "nightlyPrice": 90.5, "type": "Hotel"}"#).unwrap();
        assert_eq!(stay.bedrooms, 0);
        assert!(stay.amenity_set().is_empty());
        assert_eq!(stay.booking(), BookingOptions::default());
        assert!(stay.discounts.is_none());
    }

    #[test]
    fn test_parse_stays_both_shapes() {
        let bare = r#"[{"id": "a", "price": 100, "type": "Villa"}]"#;
        let wrapped = r#"{"stays": [{"id": "a", "price": 100, "type": "Villa"}]}"#;
        assert_eq!(parse_stays(bare).unwrap(), parse_stays(wrapped).unwrap());
    }

    #[test]
    fn test_parse_stays_rejects_garbage() {
        let err = parse_stays("{not json").unwrap_err();
        assert!(matches!(err, ListingError::Decode(_)));
    }

    #[test]
    fn test_island_match_ignores_case() {
        let stay = Stay::new("s1", 100.0, StayType::Villa).with_island("Praslin");
        assert!(stay.is_on_island("praslin"));
        assert!(!stay.is_on_island("Mahe"));
    }

    #[test]
    fn test_serializes_type_as_string() {
        let stay = Stay::new("s1", 100.0, "Villa");
        let value = serde_json::to_value(&stay).unwrap();
        assert_eq!(value["type"], "Villa");
        assert_eq!(value["nightlyPrice"], 100.0);
    }

    #[test]
    fn test_parse_stays_tolerates_broken_special() {
        let json = r#"[
            {"_id": "ok-hotel", "price": 120, "type": "Hotel"},
            {"_id": "villa", "price": 400, "type": "Villa",
             "discounts": {"specials": [
                {"title": "Summer", "percentage": 30,
                 "startDate": "2025-07-01", "endDate": null}
             ]}}
        ]"#;

        let stays = parse_stays(json).unwrap();
        assert_eq!(stays.len(), 2);

        let discounts = stays[1].discounts.as_ref().unwrap();
        assert_eq!(discounts.specials[0].end_date, None);
        let check_in = crate::dates::parse_instant("2025-07-05");
        let check_out = crate::dates::parse_instant("2025-07-10");
        assert!(discounts
            .first_overlapping_special(check_in, check_out)
            .is_none());
    }

    #[test]
    fn test_parse_stays_reports_field_error() {
        let bare = parse_stays(r#"[{"_id": "a", "price": "cheap", "type": "Hotel"}]"#);
        let wrapped = parse_stays(r#"{"stays": [{"_id": "a", "type": "Hotel"}]}"#);

        let Err(ListingError::Decode(message)) = bare else {
            panic!("expected a decode error");
        };
        assert!(message.contains("line 1"), "{}", message);
        assert!(!message.contains("untagged"), "{}", message);

        let Err(ListingError::Decode(message)) = wrapped else {
            panic!("expected a decode error");
        };
        assert!(message.contains("nightlyPrice"), "{}", message);
    }
}
