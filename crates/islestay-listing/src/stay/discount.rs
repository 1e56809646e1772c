//! Per-stay discount configuration.

use crate::dates::parse_instant;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Label used for a special that has no title.
pub const SPECIAL_FALLBACK_TITLE: &str = "Special";

/// Discounts a host has configured for a stay.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiscountConfig {
    /// Percentage off for weekly stays.
    #[serde(default)]
    pub weekly: Option<f64>,
    /// Percentage off for monthly stays.
    #[serde(default)]
    pub monthly: Option<f64>,
    /// Time-bounded promotions, in priority order.
    #[serde(default)]
    pub specials: Vec<Special>,
}

impl DiscountConfig {
    /// Create a config with weekly and monthly percentages.
    pub fn new(weekly: Option<f64>, monthly: Option<f64>) -> Self {
        Self {
            weekly,
            monthly,
            specials: Vec::new(),
        }
    }

    /// Append a special.
    pub fn with_special(mut self, special: Special) -> Self {
        self.specials.push(special);
        self
    }

    /// Weekly percentage, if one is configured and non-zero.
    pub fn weekly_percentage(&self) -> Option<f64> {
        self.weekly.filter(|p| *p > 0.0)
    }

    /// Monthly percentage, if one is configured and non-zero.
    pub fn monthly_percentage(&self) -> Option<f64> {
        self.monthly.filter(|p| *p > 0.0)
    }

    /// Check if any discount is configured.
    pub fn has_any(&self) -> bool {
        self.weekly_percentage().is_some()
            || self.monthly_percentage().is_some()
            || !self.specials.is_empty()
    }

    /// First special whose window overlaps the trip, in list order.
    pub fn first_overlapping_special(
        &self,
        check_in: Option<DateTime<Utc>>,
        check_out: Option<DateTime<Utc>>,
    ) -> Option<&Special> {
        self.specials
            .iter()
            .filter(|special| special.percentage > 0.0)
            .find(|special| special.overlaps(check_in, check_out))
    }
}

/// Field decoders that turn malformed values into "absent" instead of failing
/// the whole record.
mod lenient {
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;

    pub fn string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match Option::<Value>::deserialize(deserializer)? {
            Some(Value::String(s)) => Some(s),
            _ => None,
        })
    }

    pub fn number<'de, D>(deserializer: D) -> Result<f64, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(Option::<Value>::deserialize(deserializer)?
            .and_then(|v| v.as_f64())
            .unwrap_or(0.0))
    }
}

/// A promotional discount valid over `[start_date, end_date)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Special {
    /// Display title.
    #[serde(default)]
    pub title: Option<String>,
    /// Percentage off. Missing or non-numeric values read as 0.
    #[serde(default, deserialize_with = "lenient::number")]
    pub percentage: f64,
    /// Start of the validity window (ISO-8601).
    #[serde(default, deserialize_with = "lenient::string")]
    pub start_date: Option<String>,
    /// End of the validity window (ISO-8601).
    #[serde(default, deserialize_with = "lenient::string")]
    pub end_date: Option<String>,
}

impl Special {
    /// Create a special.
    pub fn new(
        title: impl Into<String>,
        percentage: f64,
        start_date: impl Into<String>,
        end_date: impl Into<String>,
    ) -> Self {
        Self {
            title: Some(title.into()),
            percentage,
            start_date: Some(start_date.into()),
            end_date: Some(end_date.into()),
        }
    }

    /// Title for display, falling back to "Special".
    pub fn display_title(&self) -> &str {
        match self.title.as_deref() {
            Some(title) if !title.trim().is_empty() => title,
            _ => SPECIAL_FALLBACK_TITLE,
        }
    }

    /// Open-boundary overlap with a trip: `check_in < end && check_out > start`.
    ///
    /// A missing date, or one that cannot be parsed, means no overlap.
    pub fn overlaps(
        &self,
        check_in: Option<DateTime<Utc>>,
        check_out: Option<DateTime<Utc>>,
    ) -> bool {
        let (Some(check_in), Some(check_out)) = (check_in, check_out) else {
            return false;
        };
        let (Some(start), Some(end)) = (
            self.start_date.as_deref().and_then(parse_instant),
            self.end_date.as_deref().and_then(parse_instant),
        ) else {
            return false;
        };
        check_in < end && check_out > start
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(raw: &str) -> Option<DateTime<Utc>> {
        parse_instant(raw)
    }

    #[test]
    fn test_overlap_inside_window() {
        let special = Special::new("Summer", 20.0, "2025-07-01", "2025-07-31");
        assert!(special.overlaps(at("2025-07-10"), at("2025-07-15")));
    }

    #[test]
    fn test_overlap_partial() {
        let special = Special::new("Summer", 20.0, "2025-07-01", "2025-07-31");
        assert!(special.overlaps(at("2025-06-28"), at("2025-07-02")));
        assert!(special.overlaps(at("2025-07-30"), at("2025-08-05")));
    }

    #[test]
    fn test_shared_boundary_is_not_overlap() {
        let special = Special::new("Summer", 20.0, "2025-07-01", "2025-07-31");
        // Checking out on the day the special starts.
        assert!(!special.overlaps(at("2025-06-25"), at("2025-07-01")));
        // Checking in on the day the special ends.
        assert!(!special.overlaps(at("2025-07-31"), at("2025-08-03")));
    }

    #[test]
    fn test_malformed_dates_never_overlap() {
        let special = Special::new("Broken", 20.0, "soon", "2025-07-31");
        assert!(!special.overlaps(at("2025-07-10"), at("2025-07-15")));

        let special = Special::new("Summer", 20.0, "2025-07-01", "2025-07-31");
        assert!(!special.overlaps(None, at("2025-07-15")));
    }

    #[test]
    fn test_display_title_fallback() {
        let mut special = Special::new("", 10.0, "2025-01-01", "2025-01-10");
        assert_eq!(special.display_title(), "Special");
        special.title = None;
        assert_eq!(special.display_title(), "Special");
        special.title = Some("Early Bird".to_string());
        assert_eq!(special.display_title(), "Early Bird");
    }

    #[test]
    fn test_first_overlapping_special_keeps_list_order() {
        let config = DiscountConfig::default()
            .with_special(Special::new("First", 10.0, "2025-07-01", "2025-07-20"))
            .with_special(Special::new("Bigger", 40.0, "2025-07-01", "2025-07-20"));

        let found = config
            .first_overlapping_special(at("2025-07-05"), at("2025-07-08"))
            .unwrap();
        assert_eq!(found.display_title(), "First");
    }

    #[test]
    fn test_zero_percentages_count_as_unset() {
        let config = DiscountConfig::new(Some(0.0), Some(15.0));
        assert_eq!(config.weekly_percentage(), None);
        assert_eq!(config.monthly_percentage(), Some(15.0));
        assert!(config.has_any());
        assert!(!DiscountConfig::new(Some(0.0), None).has_any());
    }

    #[test]
    fn test_decode_camel_case() {
        let config: DiscountConfig = serde_json::from_str(
            r#"{"weekly": 10, "specials": [{"title": "Spring", "percentage": 15,
                "startDate": "2025-03-01", "endDate": "2025-03-31"}]}"#,
        )
        .unwrap();
        assert_eq!(config.weekly, Some(10.0));
        assert_eq!(config.monthly, None);
        assert_eq!(config.specials[0].start_date.as_deref(), Some("2025-03-01"));
    }

    #[test]
    fn test_decode_malformed_special_fields() {
        let config: DiscountConfig = serde_json::from_str(
            r#"{"specials": [
                {"title": "Open", "percentage": 20, "startDate": "2025-07-01", "endDate": null},
                {"title": "Numeric", "percentage": 25, "startDate": 20250701},
                {"title": "Free", "percentage": "lots",
                 "startDate": "2025-07-01", "endDate": "2025-08-01"}
            ]}"#,
        )
        .unwrap();

        assert_eq!(config.specials[0].end_date, None);
        assert_eq!(config.specials[1].start_date, None);
        assert_eq!(config.specials[1].end_date, None);
        assert_eq!(config.specials[2].percentage, 0.0);

        let found = config.first_overlapping_special(at("2025-07-05"), at("2025-07-08"));
        assert!(found.is_none());
    }
}
