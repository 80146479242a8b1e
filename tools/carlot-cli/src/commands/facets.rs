//! Filter selector options.

use anyhow::Result;
use carlot_inventory::search::PRICE_BANDS;
use console::style;
use serde_json::json;

use super::FacetsArgs;
use crate::context::Context;

/// Run the facets command.
pub async fn run(args: FacetsArgs, ctx: &Context) -> Result<()> {
    let filter = args.filter.to_filter()?;
    let controller = ctx.controller().await?;
    let view = controller.view(&filter);

    let prices: Vec<_> = PRICE_BANDS
        .iter()
        .map(|band| {
            json!({
                "label": band.label,
                "value": band.range.to_string(),
                "selected": band.range == filter.price,
            })
        })
        .collect();

    if ctx.output.is_json() {
        ctx.output.json(&json!({
            "brands": view.brands,
            "years": view.years,
            "prices": prices,
        }));
        return Ok(());
    }

    ctx.output.header("Filters");
    ctx.output.facet("Brand", &view.brands);
    ctx.output.facet("Year", &view.years);

    println!("{}", style("Price").bold());
    for band in &PRICE_BANDS {
        let marker = if band.range == filter.price {
            style("●").green().to_string()
        } else {
            style("•").dim().to_string()
        };
        println!("  {} {} ({})", marker, band.label, band.range);
    }

    Ok(())
}
