//! Stay pricing and facet-filtering engine for IsleStay listings.
//!
//! This crate provides the computation behind the stays listing page:
//!
//! - **Stay**: Stay records, amenities, discount configuration
//! - **Pricing**: Trip windows and discount resolution (special > monthly > weekly)
//! - **Search**: Filter criteria, facet matching, price histogram, listing orchestration
//!
//! # Example
//!
//! ```rust,ignore
//! use islestay_listing::prelude::*;
//!
//! let stays = parse_stays(&payload)?;
//! let mut engine = ListingEngine::with_stays(EngineConfig::default(), stays)?;
//!
//! let inputs = ListingInputs {
//!     criteria: FilterCriteria::default().with_min_bedrooms(2),
//!     trip: TripWindow::from_dates("2025-07-01", "2025-07-08"),
//!     quick: QuickFilters::default(),
//! };
//!
//! let view = engine.refresh(&inputs);
//! for priced in &view.stays {
//!     println!("{} {} {}", priced.stay.id, priced.price.final_price, priced.price.label());
//! }
//! ```

pub mod config;
pub mod dates;
pub mod error;
pub mod ids;

pub mod pricing;
pub mod search;
pub mod stay;

pub use config::EngineConfig;
pub use error::ListingError;
pub use ids::StayId;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::config::EngineConfig;
    pub use crate::error::ListingError;
    pub use crate::ids::StayId;

    // Stay
    pub use crate::stay::{
        parse_stays, Amenities, AmenitySet, BookingOptions, DiscountConfig, PropertyType,
        Special, Stay, StayTags, StayType,
    };

    // Pricing
    pub use crate::pricing::{
        resolve_trip_price, resolve_trip_price_with, AppliedDiscount, DiscountKind, TripPrice,
        TripWindow,
    };

    // Search
    pub use crate::search::{
        build_histogram, matches, parse_choice, seed_default_range_if_unset, AmenityCriteria,
        AmenityGroup, FacetMatcher, FilterCriteria, ListingEngine, ListingInputs, ListingView,
        MatchOptions, PriceHistogram, PricedStay, QuickFilters, StaySource,
    };
}
