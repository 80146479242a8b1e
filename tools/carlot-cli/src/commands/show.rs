//! Vehicle detail view.

use anyhow::{bail, Result};
use carlot_inventory::contact::{whatsapp_link, ContactIntent};
use carlot_inventory::VehicleId;
use serde_json::json;

use super::ShowArgs;
use crate::context::Context;
use crate::output::{format_mileage, format_price};

/// Run the show command.
pub async fn run(args: ShowArgs, ctx: &Context) -> Result<()> {
    let controller = ctx.controller().await?;
    let id = VehicleId::new(args.id);

    let Some(vehicle) = controller.inventory().get(&id) else {
        bail!("Vehicle '{}' not found", id);
    };

    let inquiry = whatsapp_link(vehicle, ContactIntent::Inquiry);
    let viewing = whatsapp_link(vehicle, ContactIntent::Viewing);

    if ctx.output.is_json() {
        ctx.output.json(&json!({
            "vehicle": vehicle,
            "links": { "inquiry": inquiry, "viewing": viewing },
        }));
        return Ok(());
    }

    ctx.output.header(&vehicle.headline());
    ctx.output.kv("ID", vehicle.id.as_str());
    ctx.output.kv("Year", &vehicle.year.to_string());
    ctx.output.kv("Price", &format_price(vehicle.price));
    ctx.output.kv("Mileage", &format_mileage(vehicle.mileage));
    ctx.output.kv("Fuel", &vehicle.fuel_type);
    ctx.output.kv("Transmission", &vehicle.transmission);
    ctx.output.kv("Location", &vehicle.location);

    if !vehicle.description.is_empty() {
        ctx.output.info("");
        ctx.output.info(&vehicle.description);
    }

    if !vehicle.images.is_empty() {
        ctx.output.info("");
        ctx.output.info("Images:");
        for image in &vehicle.images {
            ctx.output.list_item(image);
        }
    }

    ctx.output.info("");
    ctx.output.kv("Enquire", &inquiry);
    ctx.output.kv("Book a viewing", &viewing);

    Ok(())
}
