//! Search module.
//!
//! Contains filter criteria, facet matching, the price histogram, and the
//! listing orchestrator that ties them together.

mod criteria;
mod histogram;
mod listing;
mod matcher;

pub use criteria::{parse_choice, AmenityCriteria, AmenityGroup, FilterCriteria};
pub use histogram::{build_histogram, price_domain, seed_default_range_if_unset, PriceHistogram};
pub use listing::{
    recompute, ListingEngine, ListingInputs, ListingView, PricedStay, QuickFilters, StaySource,
};
pub use matcher::{
    matches, passes_amenities, passes_booking_options, passes_price, passes_property_type,
    passes_rooms, passes_tags, passes_type, FacetMatcher, MatchOptions,
};
