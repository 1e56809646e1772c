//! Quote command: price one stay for a trip.

use anyhow::{bail, Result};
use islestay_listing::prelude::*;
use serde_json::json;

use super::QuoteArgs;
use crate::context::Context;
use crate::output::format_price;
use crate::source::JsonFileSource;

/// Run the quote command.
pub async fn run(args: QuoteArgs, ctx: &Context) -> Result<()> {
    let trip = args.trip.to_trip()?;
    let source = JsonFileSource::new(ctx.stays_path(args.stays.as_deref())?)
        .require_auth(ctx.config.source.require_auth);
    let session = ctx.session();

    let mut engine = ListingEngine::new(ctx.config.engine)?;
    engine.load(&source, session.as_ref()).await?;

    let id = StayId::new(args.id);
    let Some(price) = engine.quote(&id, &trip) else {
        bail!("Stay not found: {}", id);
    };

    if ctx.output.is_json() {
        ctx.output.json(&json!({
            "id": id,
            "nights": trip.duration(),
            "price": price,
        }));
        return Ok(());
    }

    ctx.output.header(&format!("Quote for {}", id));
    if trip.is_priced() {
        ctx.output.kv("nights", &trip.duration().to_string());
    } else {
        ctx.output.kv("nights", "none selected (nightly price)");
    }
    if let (Some(check_in), Some(check_out)) = (trip.check_in(), trip.check_out()) {
        ctx.output.kv("dates", &format!("{} to {}", check_in, check_out));
    }
    ctx.output.kv("base", &format_price(price.base_amount()));
    if price.has_discount() {
        ctx.output.kv("discount", &price.label());
        ctx.output.kv("savings", &format_price(price.savings()));
    }
    ctx.output.success(&format!("Total {}", format_price(price.final_price)));

    Ok(())
}
