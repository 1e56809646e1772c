//! Search command: filter stays and show the price histogram.

use std::path::Path;

use anyhow::{bail, Context as _, Result};
use islestay_listing::prelude::*;
use serde_json::json;

use super::SearchArgs;
use crate::context::Context;
use crate::output::format_price;
use crate::source::JsonFileSource;

/// Run the search command.
pub async fn run(args: SearchArgs, ctx: &Context) -> Result<()> {
    let mut criteria = match &args.criteria {
        Some(path) => load_criteria(&ctx.resolve_path(path))?,
        None => FilterCriteria::new(),
    };
    if args.min_price.is_some() || args.max_price.is_some() {
        criteria.min_price = args.min_price.or(criteria.min_price);
        criteria.max_price = args.max_price.or(criteria.max_price);
    }

    let mut inputs = ListingInputs {
        criteria,
        trip: args.trip.to_trip()?,
        quick: quick_filters(&args),
    };

    let source = JsonFileSource::new(ctx.stays_path(args.stays.as_deref())?)
        .require_auth(ctx.config.source.require_auth);
    let session = ctx.session();
    let mut engine = ListingEngine::new(ctx.config.engine)?;

    let spinner = ctx.output.spinner("Loading stays...");
    let loaded = engine.load(&source, session.as_ref()).await;
    spinner.finish_and_clear();
    if let Ok(count) = loaded {
        ctx.output.debug(&format!("Loaded {} stays", count));
    }

    if let Some(message) = &engine.refresh(&inputs).error {
        bail!("{}", message);
    }

    if args.seed_price && engine.seed_price_defaults(&mut inputs.criteria) {
        ctx.output.debug(&format!(
            "Seeded price range {:?}..{:?}",
            inputs.criteria.min_price, inputs.criteria.max_price
        ));
        engine.refresh(&inputs);
    }

    let view = engine.view();

    if ctx.output.is_json() {
        ctx.output.json(&json!({
            "nights": inputs.trip.duration(),
            "criteria": inputs.criteria,
            "results": view.stays,
            "histogram": view.histogram,
            "histogramSubset": view.histogram_subset,
        }));
        return Ok(());
    }

    render(ctx, &inputs, view);
    Ok(())
}

/// Quick filters from the search flags; `--type All` leaves the type open.
fn quick_filters(args: &SearchArgs) -> QuickFilters {
    QuickFilters {
        island: args.island.clone(),
        stay_type: args.stay_type.as_deref().and_then(parse_choice),
        amenity: args.amenity.clone(),
        guests: args.guests,
    }
}

/// Load filter criteria from a TOML or JSON file.
pub fn load_criteria(path: &Path) -> Result<FilterCriteria> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read criteria file: {}", path.display()))?;

    if path.extension().is_some_and(|ext| ext == "json") {
        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse criteria file: {}", path.display()))
    } else {
        toml::from_str(&content)
            .with_context(|| format!("Failed to parse criteria file: {}", path.display()))
    }
}

fn render(ctx: &Context, inputs: &ListingInputs, view: &ListingView) {
    let nights = inputs.trip.duration();
    let trip_label = if inputs.trip.is_priced() {
        format!("{} nights", nights)
    } else {
        "per night".to_string()
    };

    ctx.output.header(&format!("{} stays ({})", view.len(), trip_label));

    let active = inputs.criteria.active_filter_count();
    if active > 0 {
        ctx.output.kv("filters", &active.to_string());
    }

    if view.is_empty() {
        ctx.output.info("No stays match these filters");
    } else {
        let widths = [18, 8, 12, 10, 10, 24];
        ctx.output.table_row(
            &["ID", "TYPE", "ISLAND", "NIGHTLY", "TOTAL", "DISCOUNT"],
            &widths,
        );
        for priced in &view.stays {
            let nightly = format_price(priced.stay.nightly_price.round() as i64);
            let total = format_price(priced.price.final_price);
            let discount = priced.price.label();
            ctx.output.table_row(
                &[
                    priced.stay.id.as_str(),
                    priced.stay.stay_type.as_str(),
                    priced.stay.island.as_str(),
                    nightly.as_str(),
                    total.as_str(),
                    discount.as_str(),
                ],
                &widths,
            );
        }
    }

    if let Some(histogram) = &view.histogram {
        ctx.output.header("Price range");
        let selection = (
            inputs.criteria.min_price.unwrap_or(histogram.domain_min),
            inputs.criteria.max_price.unwrap_or(histogram.domain_max),
        );
        let selection = histogram.clamp_selection(selection.0, selection.1);
        ctx.output.histogram(histogram, Some(selection));
        ctx.output.kv(
            "selected",
            &format!("{} to {}", format_price(selection.0), format_price(selection.1)),
        );
        ctx.output.kv("in histogram", &view.histogram_subset.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_toml_criteria() {
        let path = std::env::temp_dir().join(format!("islestay-criteria-{}.toml", std::process::id()));
        std::fs::write(
            &path,
            r#"
type = "All"
property_type = "House"
bedrooms = 2
pet_allowed = true

[amenities.essentials]
wifi = true
"#,
        )
        .unwrap();

        let criteria = load_criteria(&path).unwrap();
        assert!(criteria.stay_type.is_none());
        assert_eq!(criteria.property_type, Some(PropertyType::House));
        assert_eq!(criteria.bedrooms, Some(2));
        assert!(criteria.pet_allowed);
        assert!(criteria.required_amenities().contains("wifi"));
        std::fs::remove_file(path).ok();
    }

    #[test]
    fn test_load_json_criteria() {
        let path = std::env::temp_dir().join(format!("islestay-criteria-{}.json", std::process::id()));
        std::fs::write(&path, r#"{"stay_type": "Villa", "min_price": 500}"#).unwrap();

        let criteria = load_criteria(&path).unwrap();
        assert_eq!(criteria.stay_type, Some(StayType::Villa));
        assert_eq!(criteria.min_price, Some(500));
        std::fs::remove_file(path).ok();
    }

    fn search_args(stay_type: Option<&str>) -> SearchArgs {
        SearchArgs {
            stays: None,
            criteria: None,
            trip: crate::commands::TripArgs::default(),
            island: Some("Mahe".to_string()),
            stay_type: stay_type.map(String::from),
            amenity: None,
            guests: Some(2),
            min_price: None,
            max_price: None,
            seed_price: false,
        }
    }

    #[test]
    fn test_type_flag_all_means_any() {
        let quick = quick_filters(&search_args(Some("All")));
        assert_eq!(quick.stay_type, None);
        assert_eq!(quick.guests, Some(2));

        let hotel = Stay::new("h1", 100.0, StayType::Hotel)
            .with_island("Mahe")
            .with_max_guests(2);
        assert!(quick.passes(&hotel));

        let quick = quick_filters(&search_args(Some("Villa")));
        assert_eq!(quick.stay_type, Some(StayType::Villa));
        assert!(!quick.passes(&hotel));
    }

    #[test]
    fn test_missing_criteria_file() {
        let err = load_criteria(Path::new("/nonexistent/criteria.toml")).unwrap_err();
        assert!(err.to_string().contains("Failed to read criteria file"));
    }
}
