//! Stay module.
//!
//! Contains the stay record, its amenity representation, and its discount
//! configuration.

mod amenities;
mod discount;
mod stay;

pub use amenities::{Amenities, AmenitySet};
pub use discount::{DiscountConfig, Special, SPECIAL_FALLBACK_TITLE};
pub use stay::{parse_stays, BookingOptions, PropertyType, Stay, StayTags, StayType};
