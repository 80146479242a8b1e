//! Catalog listing.

use anyhow::Result;

use super::ListArgs;
use crate::context::Context;

/// Run the list command.
pub async fn run(args: ListArgs, ctx: &Context) -> Result<()> {
    let filter = args.filter.to_filter()?;
    let controller = ctx.controller().await?;
    let view = controller.view(&filter);

    if ctx.output.is_json() {
        ctx.output.json(&view);
        return Ok(());
    }

    ctx.output.header(&format!("{} vehicles on sale", view.total));

    if view.is_empty() {
        ctx.output.info("No vehicles match the current filter.");
        return Ok(());
    }

    ctx.output.vehicle_table(&view.vehicles);
    ctx.output.info("");
    ctx.output
        .info(&format!("Showing {} of {}", view.len(), view.total));

    Ok(())
}
