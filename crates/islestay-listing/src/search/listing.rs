//! Listing orchestration.
//!
//! Each refresh runs pre-filters, one facet-matching pass (pricing each stay once)
//! and the histogram as one recomputation and swaps in a complete [`ListingView`].

use super::criteria::FilterCriteria;
use super::histogram::{build_histogram, seed_default_range_if_unset, PriceHistogram};
use super::matcher::FacetMatcher;
use crate::config::EngineConfig;
use crate::ids::StayId;
use crate::pricing::{TripPrice, TripWindow};
use crate::stay::{Stay, StayType};
use crate::ListingError;
use async_trait::async_trait;
use islestay_auth::SessionContext;
use serde::Serialize;

/// The external listings service.
///
/// Returns the complete stay list or fails outright.
#[async_trait]
pub trait StaySource: Send + Sync {
    async fn fetch(&self, session: &dyn SessionContext) -> Result<Vec<Stay>, ListingError>;
}

/// Quick filters from the search bar and category strip.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct QuickFilters {
    /// Island (case-insensitive).
    pub island: Option<String>,
    /// Stay type chip.
    pub stay_type: Option<StayType>,
    /// Amenity chip.
    pub amenity: Option<String>,
    /// Guest count; stays must sleep at least this many.
    pub guests: Option<u32>,
}

impl QuickFilters {
    /// Check if a stay passes every quick filter.
    pub fn passes(&self, stay: &Stay) -> bool {
        if let Some(island) = self.island.as_deref() {
            if !island.trim().is_empty() && !stay.is_on_island(island) {
                return false;
            }
        }
        if let Some(stay_type) = self.stay_type.as_ref() {
            if stay.stay_type != *stay_type {
                return false;
            }
        }
        if let Some(guests) = self.guests {
            if stay.max_guests < guests {
                return false;
            }
        }
        if let Some(amenity) = self.amenity.as_deref() {
            if !stay.amenities.has(amenity) {
                return false;
            }
        }
        true
    }
}

/// Everything a recomputation depends on besides the stays.
#[derive(Debug, Clone, Default)]
pub struct ListingInputs {
    pub criteria: FilterCriteria,
    pub trip: TripWindow,
    pub quick: QuickFilters,
}

/// A stay in the result list with its trip price.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PricedStay {
    pub stay: Stay,
    pub price: TripPrice,
}

/// Output of one recomputation.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct ListingView {
    /// Fully filtered stays, in source order.
    pub stays: Vec<PricedStay>,
    /// Price histogram for the slider.
    pub histogram: Option<PriceHistogram>,
    /// Stays counted by the histogram (price bounds skipped).
    pub histogram_subset: usize,
    /// Error banner when the listings source failed.
    pub error: Option<String>,
}

impl ListingView {
    /// Empty view carrying an error banner.
    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            error: Some(message.into()),
            ..Self::default()
        }
    }

    /// Check if the view is in the error state.
    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }

    /// Number of results.
    pub fn len(&self) -> usize {
        self.stays.len()
    }

    /// Check if there are no results.
    pub fn is_empty(&self) -> bool {
        self.stays.is_empty()
    }
}

/// Run one full recomputation over `all_stays`.
///
/// `prior_histogram` is kept when `all_stays` is empty.
pub fn recompute(
    all_stays: &[Stay],
    inputs: &ListingInputs,
    config: &EngineConfig,
    prior_histogram: Option<&PriceHistogram>,
) -> ListingView {
    let pre_filtered: Vec<&Stay> = all_stays.iter().filter(|s| inputs.quick.passes(s)).collect();

    let matcher = FacetMatcher::new(&inputs.criteria, &inputs.trip, config);
    let mut histogram_subset: Vec<&Stay> = Vec::new();
    let mut stays: Vec<PricedStay> = Vec::new();
    for stay in pre_filtered.iter().copied() {
        let Some((price, in_bounds)) = matcher.evaluate(stay) else {
            continue;
        };
        histogram_subset.push(stay);
        if in_bounds {
            stays.push(PricedStay {
                stay: stay.clone(),
                price,
            });
        }
    }

    let histogram = build_histogram(
        all_stays,
        histogram_subset.iter().copied(),
        &inputs.trip,
        config,
    )
    .or_else(|| prior_histogram.cloned());

    tracing::debug!(
        total = all_stays.len(),
        pre_filtered = pre_filtered.len(),
        histogram_subset = histogram_subset.len(),
        results = stays.len(),
        nights = inputs.trip.duration(),
        "listing recomputed"
    );

    ListingView {
        stays,
        histogram,
        histogram_subset: histogram_subset.len(),
        error: None,
    }
}

/// State of the one-time stays fetch.
#[derive(Debug, Clone, PartialEq)]
enum SourceState {
    Pending,
    Loaded(Vec<Stay>),
    Failed(ListingError),
}

/// Holds the session's stays and the latest view.
#[derive(Debug, Clone)]
pub struct ListingEngine {
    config: EngineConfig,
    source: SourceState,
    view: ListingView,
}

impl ListingEngine {
    /// Create an engine with no stays loaded yet.
    pub fn new(config: EngineConfig) -> Result<Self, ListingError> {
        config.validate()?;
        Ok(Self {
            config,
            source: SourceState::Pending,
            view: ListingView::default(),
        })
    }

    /// Create an engine over an already fetched stay list.
    pub fn with_stays(config: EngineConfig, stays: Vec<Stay>) -> Result<Self, ListingError> {
        let mut engine = Self::new(config)?;
        engine.set_stays(Ok(stays));
        Ok(engine)
    }

    /// Engine settings.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Fetch stays from the listings source.
    ///
    /// A failure is recorded; later refreshes render the error instead of
    /// running the pipeline.
    pub async fn load(
        &mut self,
        source: &dyn StaySource,
        session: &dyn SessionContext,
    ) -> Result<usize, ListingError> {
        let result = source.fetch(session).await;
        let outcome = result.as_ref().map(Vec::len).map_err(Clone::clone);
        self.set_stays(result);
        outcome
    }

    /// Record the outcome of a fetch.
    pub fn set_stays(&mut self, result: Result<Vec<Stay>, ListingError>) {
        self.source = match result {
            Ok(stays) => SourceState::Loaded(stays),
            Err(e) => {
                tracing::warn!(error = %e, "listings fetch failed");
                SourceState::Failed(e)
            }
        };
    }

    /// Loaded stays (empty until a fetch succeeds).
    pub fn stays(&self) -> &[Stay] {
        match &self.source {
            SourceState::Loaded(stays) => stays,
            _ => &[],
        }
    }

    /// The fetch failure, if any.
    pub fn load_error(&self) -> Option<&ListingError> {
        match &self.source {
            SourceState::Failed(e) => Some(e),
            _ => None,
        }
    }

    /// Recompute the view for new inputs and replace the previous one.
    pub fn refresh(&mut self, inputs: &ListingInputs) -> &ListingView {
        let view = match &self.source {
            SourceState::Pending => ListingView {
                histogram: self.view.histogram.clone(),
                ..ListingView::default()
            },
            SourceState::Failed(e) => ListingView::failed(e.to_string()),
            SourceState::Loaded(stays) => {
                recompute(stays, inputs, &self.config, self.view.histogram.as_ref())
            }
        };
        self.view = view;
        &self.view
    }

    /// The latest view.
    pub fn view(&self) -> &ListingView {
        &self.view
    }

    /// Seed the price selection from the current histogram if none is selected.
    pub fn seed_price_defaults(&self, criteria: &mut FilterCriteria) -> bool {
        match &self.view.histogram {
            Some(histogram) => seed_default_range_if_unset(criteria, histogram),
            None => false,
        }
    }

    /// Trip price for one stay.
    pub fn quote(&self, id: &StayId, trip: &TripWindow) -> Option<TripPrice> {
        self.stays()
            .iter()
            .find(|stay| stay.id == *id)
            .map(|stay| crate::pricing::resolve_trip_price_with(stay, trip, &self.config))
    }
}
