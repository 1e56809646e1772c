//! Price histogram for the range slider.
//!
//! The domain is computed over every stay so the slider scale stays put while
//! filters change; only the bin counts follow the filtered subset.

use super::criteria::FilterCriteria;
use crate::config::EngineConfig;
use crate::pricing::{resolve_trip_price_with, TripWindow};
use crate::stay::Stay;
use serde::{Deserialize, Serialize};

/// Binned trip-price distribution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceHistogram {
    /// Lower domain bound (rounded down to the domain step).
    pub domain_min: i64,
    /// Upper domain bound (rounded up to the domain step).
    pub domain_max: i64,
    /// Stay count per equal-width bin over `[domain_min, domain_max)`.
    pub bins: Vec<u32>,
}

impl PriceHistogram {
    /// Width of the domain (saturating).
    pub fn span(&self) -> i64 {
        self.domain_max.saturating_sub(self.domain_min)
    }

    /// Number of bins.
    pub fn bin_count(&self) -> usize {
        self.bins.len()
    }

    /// Total stays counted.
    pub fn total(&self) -> u32 {
        self.bins.iter().sum()
    }

    /// Largest bin count, for scaling bars.
    pub fn max_count(&self) -> u32 {
        self.bins.iter().copied().max().unwrap_or(0)
    }

    /// Price range `[lower, upper)` covered by a bin.
    pub fn bin_bounds(&self, index: usize) -> Option<(f64, f64)> {
        if index >= self.bins.len() {
            return None;
        }
        let width = self.span() as f64 / self.bins.len() as f64;
        let lower = self.domain_min as f64 + width * index as f64;
        Some((lower, lower + width))
    }

    /// Check if a bin's midpoint falls inside the selected range.
    pub fn bin_in_selection(&self, index: usize, min: i64, max: i64) -> bool {
        self.bin_bounds(index)
            .map(|(lower, upper)| {
                let mid = (lower + upper) / 2.0;
                mid >= min as f64 && mid <= max as f64
            })
            .unwrap_or(false)
    }

    /// Bin index for a price, clamped into range.
    pub fn bin_index(&self, price: i64) -> usize {
        bin_index(price, self.domain_min, self.domain_max, self.bins.len())
    }

    /// Clamp a slider selection into the domain with `min <= max`.
    pub fn clamp_selection(&self, min: i64, max: i64) -> (i64, i64) {
        let max = max.clamp(self.domain_min, self.domain_max);
        let min = min.clamp(self.domain_min, self.domain_max).min(max);
        (min, max)
    }
}

/// Domain over every stay's trip price, rounded outward to `config.domain_step`.
///
/// Returns `None` when there are no stays.
pub fn price_domain<'a>(
    all_stays: impl IntoIterator<Item = &'a Stay>,
    trip: &TripWindow,
    config: &EngineConfig,
) -> Option<(i64, i64)> {
    let (min, max) = all_stays
        .into_iter()
        .map(|stay| resolve_trip_price_with(stay, trip, config).final_price)
        .fold(None, |acc: Option<(i64, i64)>, price| match acc {
            None => Some((price, price)),
            Some((lo, hi)) => Some((lo.min(price), hi.max(price))),
        })?;

    let step = i128::from(config.domain_step.max(1));
    let floor = i128::from(min).div_euclid(step) * step;
    let ceil = -(-i128::from(max)).div_euclid(step) * step;
    Some((saturate(floor), saturate(ceil)))
}

fn saturate(value: i128) -> i64 {
    value.clamp(i128::from(i64::MIN), i128::from(i64::MAX)) as i64
}

/// Build the histogram.
///
/// `all_stays` fixes the domain, `filtered` (the facet-filtered subset with
/// price bounds skipped) fills the bins. Returns `None` when `all_stays` is
/// empty so callers keep their prior state.
pub fn build_histogram<'a>(
    all_stays: impl IntoIterator<Item = &'a Stay>,
    filtered: impl IntoIterator<Item = &'a Stay>,
    trip: &TripWindow,
    config: &EngineConfig,
) -> Option<PriceHistogram> {
    let (domain_min, domain_max) = price_domain(all_stays, trip, config)?;
    let bin_count = config.bin_count.max(1);
    let mut bins = vec![0u32; bin_count];

    for stay in filtered {
        let price = resolve_trip_price_with(stay, trip, config).final_price;
        bins[bin_index(price, domain_min, domain_max, bin_count)] += 1;
    }

    Some(PriceHistogram {
        domain_min,
        domain_max,
        bins,
    })
}

/// Seed the price selection to the full domain if no bound is selected.
///
/// Returns whether the criteria changed.
pub fn seed_default_range_if_unset(
    criteria: &mut FilterCriteria,
    histogram: &PriceHistogram,
) -> bool {
    if criteria.has_price_bounds() {
        return false;
    }
    criteria.min_price = Some(histogram.domain_min);
    criteria.max_price = Some(histogram.domain_max);
    true
}

fn bin_index(price: i64, domain_min: i64, domain_max: i64, bin_count: usize) -> usize {
    let span = i128::from(domain_max) - i128::from(domain_min);
    if span <= 0 || bin_count == 0 {
        return 0;
    }
    // |offset| < 2^65 and bin_count < 2^64, so the product fits in i128.
    let offset = i128::from(price) - i128::from(domain_min);
    let index = offset.saturating_mul(bin_count as i128).div_euclid(span);
    index.clamp(0, bin_count as i128 - 1) as usize
}
