//! Discount resolution and trip pricing.
//!
//! At most one discount applies to a trip. Precedence is the first
//! overlapping special (list order), then monthly, then weekly.

use super::trip::TripWindow;
use crate::config::EngineConfig;
use crate::stay::{DiscountConfig, Stay};
use serde::Serialize;
use std::fmt;

/// Which discount applied.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(into = "String")]
pub enum DiscountKind {
    None,
    Weekly,
    Monthly,
    /// A special, carrying its display title.
    Special(String),
}

impl DiscountKind {
    /// Label shown next to the price.
    pub fn label(&self) -> &str {
        match self {
            DiscountKind::None => "None",
            DiscountKind::Weekly => "Weekly",
            DiscountKind::Monthly => "Monthly",
            DiscountKind::Special(title) => title,
        }
    }
}

impl From<DiscountKind> for String {
    fn from(kind: DiscountKind) -> Self {
        kind.label().to_string()
    }
}

impl fmt::Display for DiscountKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// The single discount applied to a trip.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AppliedDiscount {
    #[serde(rename = "type")]
    pub kind: DiscountKind,
    pub percentage: f64,
}

impl AppliedDiscount {
    /// No discount.
    pub fn none() -> Self {
        Self {
            kind: DiscountKind::None,
            percentage: 0.0,
        }
    }

    /// Check if no discount applied.
    pub fn is_none(&self) -> bool {
        self.kind == DiscountKind::None
    }
}

/// Price of a trip after discount.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TripPrice {
    /// Discounted total, rounded to a whole amount.
    pub final_price: i64,
    /// Nightly price times nights (the nightly price when undated).
    ///
    /// Kept unrounded so fractional nightly prices discount exactly; the
    /// whole-amount base used for display is [`TripPrice::base_amount`].
    pub base_price: f64,
    pub applied_discount: AppliedDiscount,
}

impl TripPrice {
    /// Check if a discount applied.
    pub fn has_discount(&self) -> bool {
        !self.applied_discount.is_none()
    }

    /// Base price rounded to a whole amount.
    pub fn base_amount(&self) -> i64 {
        self.base_price.round() as i64
    }

    /// Amount saved against the base price.
    pub fn savings(&self) -> i64 {
        self.base_amount().saturating_sub(self.final_price).max(0)
    }

    /// Display label, e.g. "Weekly 10% off"; empty when no discount applied.
    pub fn label(&self) -> String {
        if !self.has_discount() {
            return String::new();
        }
        format!(
            "{} {}% off",
            self.applied_discount.kind,
            format_percentage(self.applied_discount.percentage)
        )
    }
}

/// Resolve a trip price with the default thresholds.
pub fn resolve_trip_price(stay: &Stay, trip: &TripWindow) -> TripPrice {
    resolve_trip_price_with(stay, trip, &EngineConfig::default())
}

/// Resolve a trip price.
pub fn resolve_trip_price_with(stay: &Stay, trip: &TripWindow, config: &EngineConfig) -> TripPrice {
    if !trip.is_priced() {
        return TripPrice {
            final_price: stay.nightly_price.round() as i64,
            base_price: stay.nightly_price,
            applied_discount: AppliedDiscount::none(),
        };
    }

    let base_price = stay.nightly_price * trip.duration() as f64;
    let applied_discount = stay
        .discounts
        .as_ref()
        .map(|discounts| select_discount(discounts, trip, config))
        .unwrap_or_else(AppliedDiscount::none);

    TripPrice {
        final_price: apply_percentage(base_price, applied_discount.percentage),
        base_price,
        applied_discount,
    }
}

fn select_discount(
    discounts: &DiscountConfig,
    trip: &TripWindow,
    config: &EngineConfig,
) -> AppliedDiscount {
    if let Some(special) =
        discounts.first_overlapping_special(trip.check_in_at(), trip.check_out_at())
    {
        return AppliedDiscount {
            kind: DiscountKind::Special(special.display_title().to_string()),
            percentage: special.percentage,
        };
    }

    if trip.duration() >= config.monthly_min_nights {
        if let Some(percentage) = discounts.monthly_percentage() {
            return AppliedDiscount {
                kind: DiscountKind::Monthly,
                percentage,
            };
        }
    }

    if trip.duration() >= config.weekly_min_nights {
        if let Some(percentage) = discounts.weekly_percentage() {
            return AppliedDiscount {
                kind: DiscountKind::Weekly,
                percentage,
            };
        }
    }

    AppliedDiscount::none()
}

fn apply_percentage(base_price: f64, percentage: f64) -> i64 {
    (base_price * (1.0 - percentage / 100.0)).round() as i64
}

fn format_percentage(percentage: f64) -> String {
    if percentage.fract() == 0.0 {
        format!("{}", percentage as i64)
    } else {
        format!("{}", percentage)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stay::{Special, StayType};

    fn stay_with(discounts: DiscountConfig) -> Stay {
        Stay::new("s1", 100.0, StayType::Villa).with_discounts(discounts)
    }

    #[test]
    fn test_special_beats_monthly_and_weekly() {
        let stay = stay_with(
            DiscountConfig::new(Some(10.0), Some(20.0))
                .with_special(Special::new("Summer Sale", 50.0, "2025-07-01", "2025-08-31")),
        );
        let trip = TripWindow::new(30, "2025-07-01", "2025-07-31");

        let price = resolve_trip_price(&stay, &trip);
        assert_eq!(price.final_price, 1500);
        assert_eq!(price.base_price, 3000.0);
        assert_eq!(price.applied_discount.kind, DiscountKind::Special("Summer Sale".to_string()));
        assert_eq!(price.applied_discount.percentage, 50.0);
    }

    #[test]
    fn test_no_dates_means_nightly_price() {
        let stay = stay_with(DiscountConfig::new(Some(10.0), Some(20.0)));
        for duration in [0, -3] {
            let price = resolve_trip_price(&stay, &TripWindow::nights(duration));
            assert_eq!(price.final_price, 100);
            assert_eq!(price.base_price, 100.0);
            assert_eq!(price.applied_discount, AppliedDiscount::none());
        }
    }

    #[test]
    fn test_weekly_threshold_boundary() {
        let stay = stay_with(DiscountConfig::new(Some(10.0), None));

        let six = resolve_trip_price(&stay, &TripWindow::nights(6));
        assert!(six.applied_discount.is_none());
        assert_eq!(six.final_price, 600);

        let seven = resolve_trip_price(&stay, &TripWindow::nights(7));
        assert_eq!(seven.applied_discount.kind, DiscountKind::Weekly);
        assert_eq!(seven.final_price, 630);
    }

    #[test]
    fn test_monthly_threshold_boundary() {
        let stay = stay_with(DiscountConfig::new(Some(10.0), Some(20.0)));

        let short = resolve_trip_price(&stay, &TripWindow::nights(27));
        assert_eq!(short.applied_discount.kind, DiscountKind::Weekly);

        let month = resolve_trip_price(&stay, &TripWindow::nights(28));
        assert_eq!(month.applied_discount.kind, DiscountKind::Monthly);
        assert_eq!(month.final_price, 2240);
    }

    #[test]
    fn test_monthly_falls_back_to_weekly_when_unset() {
        let stay = stay_with(DiscountConfig::new(Some(5.0), None));
        let price = resolve_trip_price(&stay, &TripWindow::nights(40));
        assert_eq!(price.applied_discount.kind, DiscountKind::Weekly);
    }

    #[test]
    fn test_non_overlapping_special_is_ignored() {
        let stay = stay_with(
            DiscountConfig::new(Some(10.0), None)
                .with_special(Special::new("Winter", 40.0, "2025-12-01", "2025-12-31")),
        );
        let trip = TripWindow::from_dates("2025-07-01", "2025-07-08");
        let price = resolve_trip_price(&stay, &trip);
        assert_eq!(price.applied_discount.kind, DiscountKind::Weekly);
    }

    #[test]
    fn test_untitled_special_label() {
        let mut special = Special::new("", 25.0, "2025-07-01", "2025-07-31");
        special.title = None;
        let stay = stay_with(DiscountConfig::default().with_special(special));
        let price = resolve_trip_price(&stay, &TripWindow::from_dates("2025-07-02", "2025-07-04"));
        assert_eq!(price.applied_discount.kind.label(), "Special");
        assert_eq!(price.final_price, 150);
    }

    #[test]
    fn test_malformed_trip_dates_skip_specials() {
        let stay = stay_with(
            DiscountConfig::new(Some(10.0), None)
                .with_special(Special::new("Summer", 50.0, "2025-07-01", "2025-07-31")),
        );
        let trip = TripWindow::new(7, "garbage", "2025-07-08");
        let price = resolve_trip_price(&stay, &trip);
        assert_eq!(price.applied_discount.kind, DiscountKind::Weekly);
    }

    #[test]
    fn test_final_price_is_rounded() {
        let stay = Stay::new("s1", 99.99, StayType::Hotel).with_discounts(
            DiscountConfig::new(Some(33.33), None),
        );
        let price = resolve_trip_price(&stay, &TripWindow::nights(7));
        // 699.93 * 0.6667 = 466.643...
        assert_eq!(price.final_price, 467);

        let undated = resolve_trip_price(&stay, &TripWindow::undated());
        assert_eq!(undated.final_price, 100);
    }

    #[test]
    fn test_no_discount_config() {
        let stay = Stay::new("s1", 80.0, StayType::Hotel);
        let price = resolve_trip_price(&stay, &TripWindow::nights(30));
        assert_eq!(price.final_price, 2400);
        assert!(!price.has_discount());
        assert_eq!(price.label(), "");
        assert_eq!(price.savings(), 0);
    }

    #[test]
    fn test_label_and_savings() {
        let stay = stay_with(DiscountConfig::new(Some(12.5), None));
        let price = resolve_trip_price(&stay, &TripWindow::nights(8));
        assert_eq!(price.label(), "Weekly 12.5% off");
        assert_eq!(price.final_price, 700);
        assert_eq!(price.savings(), 100);
    }

    #[test]
    fn test_base_amount_rounds_fractional_base() {
        let stay = Stay::new("s1", 49.95, StayType::Hotel);
        let price = resolve_trip_price(&stay, &TripWindow::nights(3));
        assert!((price.base_price - 149.85).abs() < 1e-9);
        assert_eq!(price.base_amount(), 150);
        assert_eq!(price.final_price, 150);
        assert_eq!(price.savings(), 0);
    }

    #[test]
    fn test_custom_thresholds() {
        let config = EngineConfig {
            weekly_min_nights: 5,
            ..EngineConfig::default()
        };
        let stay = stay_with(DiscountConfig::new(Some(10.0), None));
        let price = resolve_trip_price_with(&stay, &TripWindow::nights(5), &config);
        assert_eq!(price.applied_discount.kind, DiscountKind::Weekly);
    }

    #[test]
    fn test_serializes_applied_discount_type() {
        let stay = stay_with(DiscountConfig::new(Some(10.0), None));
        let price = resolve_trip_price(&stay, &TripWindow::nights(7));
        let value = serde_json::to_value(&price).unwrap();
        assert_eq!(value["appliedDiscount"]["type"], "Weekly");
        assert_eq!(value["finalPrice"], 630);
    }
}
