//! Pricing module.
//!
//! Contains the trip window and the discount resolver that turns a stay's
//! nightly price into a trip price.

mod resolver;
mod trip;

pub use resolver::{
    resolve_trip_price, resolve_trip_price_with, AppliedDiscount, DiscountKind, TripPrice,
};
pub use trip::TripWindow;
