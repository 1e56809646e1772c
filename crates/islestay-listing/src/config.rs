//! Engine settings.

use crate::ListingError;
use serde::{Deserialize, Serialize};

/// Number of bars in the price slider histogram.
pub const DEFAULT_BIN_COUNT: usize = 50;
/// Granularity the histogram domain is rounded to.
pub const DEFAULT_DOMAIN_STEP: i64 = 10;
/// Minimum nights for the weekly discount.
pub const DEFAULT_WEEKLY_MIN_NIGHTS: i64 = 7;
/// Minimum nights for the monthly discount.
pub const DEFAULT_MONTHLY_MIN_NIGHTS: i64 = 28;

/// Tunables for pricing and histogram binning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Histogram bin count.
    #[serde(default = "default_bin_count")]
    pub bin_count: usize,

    /// Histogram domain rounding step.
    #[serde(default = "default_domain_step")]
    pub domain_step: i64,

    /// Nights required before the weekly discount applies.
    #[serde(default = "default_weekly_min_nights")]
    pub weekly_min_nights: i64,

    /// Nights required before the monthly discount applies.
    #[serde(default = "default_monthly_min_nights")]
    pub monthly_min_nights: i64,
}

fn default_bin_count() -> usize {
    DEFAULT_BIN_COUNT
}

fn default_domain_step() -> i64 {
    DEFAULT_DOMAIN_STEP
}

fn default_weekly_min_nights() -> i64 {
    DEFAULT_WEEKLY_MIN_NIGHTS
}

fn default_monthly_min_nights() -> i64 {
    DEFAULT_MONTHLY_MIN_NIGHTS
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            bin_count: DEFAULT_BIN_COUNT,
            domain_step: DEFAULT_DOMAIN_STEP,
            weekly_min_nights: DEFAULT_WEEKLY_MIN_NIGHTS,
            monthly_min_nights: DEFAULT_MONTHLY_MIN_NIGHTS,
        }
    }
}

impl EngineConfig {
    /// Check the settings are usable.
    pub fn validate(&self) -> Result<(), ListingError> {
        if self.bin_count == 0 {
            return Err(ListingError::InvalidConfig(
                "bin_count must be at least 1".to_string(),
            ));
        }
        if self.domain_step <= 0 {
            return Err(ListingError::InvalidConfig(
                "domain_step must be positive".to_string(),
            ));
        }
        if self.weekly_min_nights <= 0 {
            return Err(ListingError::InvalidConfig(
                "weekly_min_nights must be positive".to_string(),
            ));
        }
        if self.monthly_min_nights < self.weekly_min_nights {
            return Err(ListingError::InvalidConfig(format!(
                "monthly_min_nights ({}) is below weekly_min_nights ({})",
                self.monthly_min_nights, self.weekly_min_nights
            )));
        }
        Ok(())
    }
}
