//! WhatsApp contact links.

use anyhow::{bail, Result};
use carlot_inventory::contact::{contact_digits, whatsapp_link, ContactIntent};
use carlot_inventory::VehicleId;
use serde_json::json;

use super::ContactArgs;
use crate::context::Context;

/// Run the contact command.
pub async fn run(args: ContactArgs, ctx: &Context) -> Result<()> {
    let controller = ctx.controller().await?;
    let id = VehicleId::new(args.id);

    let Some(vehicle) = controller.inventory().get(&id) else {
        bail!("Vehicle '{}' not found", id);
    };

    let intent = if args.viewing {
        ContactIntent::Viewing
    } else {
        ContactIntent::Inquiry
    };
    let link = whatsapp_link(vehicle, intent);

    if ctx.output.is_json() {
        ctx.output.json(&json!({ "id": vehicle.id, "link": link }));
        return Ok(());
    }

    if contact_digits(&vehicle.whatsapp).is_empty() {
        ctx.output
            .warn("This listing has no contact number; the link opens without a recipient.");
    }
    println!("{}", link);

    Ok(())
}
