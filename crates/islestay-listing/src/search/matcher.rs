//! Facet matching: pure predicates over a stay and filter criteria.
//!
//! All predicates are AND-combined. The price predicate is the only one that
//! needs a trip price, so it runs last and can be skipped for the histogram
//! subset.

use super::criteria::FilterCriteria;
use crate::config::EngineConfig;
use crate::pricing::{resolve_trip_price_with, TripPrice, TripWindow};
use crate::stay::{AmenitySet, Stay, StayType};

/// Options for a single match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchOptions {
    /// Whether the price bounds are evaluated.
    pub include_price: bool,
}

impl MatchOptions {
    /// Evaluate every predicate (final result list).
    pub const WITH_PRICE: MatchOptions = MatchOptions {
        include_price: true,
    };

    /// Skip price bounds (histogram subset).
    pub const WITHOUT_PRICE: MatchOptions = MatchOptions {
        include_price: false,
    };
}

impl Default for MatchOptions {
    fn default() -> Self {
        Self::WITH_PRICE
    }
}

/// Criteria prepared for matching many stays against one trip.
#[derive(Debug, Clone)]
pub struct FacetMatcher<'a> {
    criteria: &'a FilterCriteria,
    trip: &'a TripWindow,
    config: &'a EngineConfig,
    required_amenities: AmenitySet,
}

impl<'a> FacetMatcher<'a> {
    /// Prepare criteria for a trip.
    pub fn new(criteria: &'a FilterCriteria, trip: &'a TripWindow, config: &'a EngineConfig) -> Self {
        Self {
            criteria,
            trip,
            config,
            required_amenities: criteria.required_amenities(),
        }
    }

    /// Check if a stay passes every predicate.
    pub fn matches(&self, stay: &Stay, options: MatchOptions) -> bool {
        passes_type(stay, self.criteria)
            && passes_property_type(stay, self.criteria)
            && passes_rooms(stay, self.criteria)
            && passes_tags(stay, self.criteria)
            && passes_booking_options(stay, self.criteria)
            && passes_amenities(stay, &self.required_amenities)
            && (!options.include_price || passes_price(&self.price(stay), self.criteria))
    }

    /// Match a stay and price it once.
    ///
    /// Returns `None` when a non-price predicate fails; otherwise the trip
    /// price and whether it lies within the price bounds.
    pub fn evaluate(&self, stay: &Stay) -> Option<(TripPrice, bool)> {
        if !self.matches(stay, MatchOptions::WITHOUT_PRICE) {
            return None;
        }
        let price = self.price(stay);
        let in_bounds = passes_price(&price, self.criteria);
        Some((price, in_bounds))
    }

    /// Trip price of a stay for this matcher's trip.
    pub fn price(&self, stay: &Stay) -> TripPrice {
        resolve_trip_price_with(stay, self.trip, self.config)
    }
}

/// Match a single stay with the default engine settings.
pub fn matches(
    stay: &Stay,
    criteria: &FilterCriteria,
    trip: &TripWindow,
    options: MatchOptions,
) -> bool {
    let config = EngineConfig::default();
    FacetMatcher::new(criteria, trip, &config).matches(stay, options)
}

/// Checks if the stay has the required type.
pub fn passes_type(stay: &Stay, criteria: &FilterCriteria) -> bool {
    criteria
        .stay_type
        .as_ref()
        .map_or(true, |wanted| stay.stay_type == *wanted)
}

/// Checks the property subtype; only `Airbnb` stays are constrained.
pub fn passes_property_type(stay: &Stay, criteria: &FilterCriteria) -> bool {
    let Some(wanted) = criteria.property_type.as_ref() else {
        return true;
    };
    if stay.stay_type != StayType::Airbnb {
        return true;
    }
    stay.property_type.as_ref() == Some(wanted)
}

/// Checks the trip price against the price bounds.
pub fn passes_price(price: &TripPrice, criteria: &FilterCriteria) -> bool {
    let price = price.final_price;
    criteria.min_price.map_or(true, |min| price >= min)
        && criteria.max_price.map_or(true, |max| price <= max)
}

/// Checks room counts against minimum thresholds.
pub fn passes_rooms(stay: &Stay, criteria: &FilterCriteria) -> bool {
    at_least(stay.bedrooms, criteria.bedrooms)
        && at_least(stay.bathrooms, criteria.bathrooms)
        && at_least(stay.beds, criteria.beds)
}

/// Checks required editorial tags.
pub fn passes_tags(stay: &Stay, criteria: &FilterCriteria) -> bool {
    let tags = stay.tag_flags();
    required(criteria.is_luxury, tags.is_luxury)
        && required(criteria.is_guest_favorite, tags.is_guest_favorite)
}

/// Checks required booking options.
pub fn passes_booking_options(stay: &Stay, criteria: &FilterCriteria) -> bool {
    let booking = stay.booking();
    required(criteria.instant_book, booking.instant_book)
        && required(criteria.self_check_in, booking.self_check_in)
        && required(criteria.pet_allowed, booking.pet_allowed)
}

/// Checks that every required amenity is present.
pub fn passes_amenities(stay: &Stay, required: &AmenitySet) -> bool {
    stay.amenities.has_all(required)
}

fn at_least(have: u32, minimum: Option<u32>) -> bool {
    minimum.map_or(true, |min| have >= min)
}

fn required(wanted: bool, have: bool) -> bool {
    !wanted || have
}
