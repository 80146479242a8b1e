//! Listing management: create, edit, delete.

use anyhow::{Context as _, Result};
use carlot_inventory::catalog::seed_vehicles;
use carlot_inventory::{Vehicle, VehicleForm, VehicleId};
use serde_json::json;

use super::{AdminArgs, AdminCommand, SaveArgs};
use crate::context::Context;

/// Run the admin command.
pub async fn run(args: AdminArgs, ctx: &Context) -> Result<()> {
    match args.command {
        AdminCommand::List => list_vehicles(ctx).await,
        AdminCommand::Save(save) => save_vehicle(save, ctx).await,
        AdminCommand::Delete { id, yes } => delete_vehicle(&id, yes, ctx).await.map(|_| ()),
    }
}

async fn list_vehicles(ctx: &Context) -> Result<()> {
    let controller = ctx.store_controller().await?;
    let vehicles: Vec<_> = controller.vehicles().iter().collect();

    if ctx.output.is_json() {
        ctx.output.json(&vehicles);
        return Ok(());
    }

    if let Some(advisory) = controller.advisory() {
        ctx.output.warn(advisory);
    }

    ctx.output.header(&format!(
        "Listings in {}",
        ctx.store()?.path().display()
    ));
    ctx.output.vehicle_table(&vehicles);

    Ok(())
}

async fn save_vehicle(args: SaveArgs, ctx: &Context) -> Result<()> {
    let mut controller = ctx.store_controller().await?;

    let existing = args
        .id
        .as_deref()
        .and_then(|id| controller.inventory().get(&VehicleId::new(id)));
    let mut form = match existing {
        Some(vehicle) => {
            ctx.output.debug(&format!("Editing {}", vehicle.id));
            VehicleForm::from_vehicle(vehicle)
        }
        None => VehicleForm::new(),
    };
    args.apply_to(&mut form);

    let editing = form.is_editing();
    let vehicle = controller.save_form(&form).await?;

    if ctx.output.is_json() {
        ctx.output.json(&vehicle);
        return Ok(());
    }

    let verb = if editing { "Saved" } else { "Created" };
    ctx.output
        .success(&format!("{} {} ({})", verb, vehicle.headline(), vehicle.id));

    Ok(())
}

/// The vehicle held in the store under `id`, ignoring the sample listings
/// shown when the store is empty.
async fn stored_vehicle(ctx: &Context, id: &VehicleId) -> Result<Option<Vehicle>> {
    let store = ctx.store()?;
    let docs = store
        .load()
        .await
        .with_context(|| format!("Failed to read {}", store.path().display()))?;
    let normalizer = ctx.normalizer()?;

    Ok(docs
        .iter()
        .find(|doc| doc.id == id.as_str())
        .map(|doc| normalizer.normalize_document(&doc.id, &doc.fields)))
}

/// Returns whether a stored vehicle was deleted.
async fn delete_vehicle(id: &str, yes: bool, ctx: &Context) -> Result<bool> {
    let id = VehicleId::new(id);

    let headline = match stored_vehicle(ctx, &id).await? {
        Some(vehicle) => vehicle.headline(),
        None if seed_vehicles().iter().any(|v| v.id == id) => {
            ctx.output.warn(&format!(
                "Vehicle '{}' is a sample listing and is not stored; nothing to delete",
                id
            ));
            return Ok(false);
        }
        None => {
            ctx.output
                .warn(&format!("Vehicle '{}' is not stored; nothing to delete", id));
            return Ok(false);
        }
    };

    if !yes {
        use dialoguer::Confirm;
        let confirmed = Confirm::new()
            .with_prompt(format!("Delete {} ({})?", headline, id))
            .default(false)
            .interact()?;

        if !confirmed {
            ctx.output.warn("Cancelled");
            return Ok(false);
        }
    }

    let mut controller = ctx.store_controller().await?;
    controller.delete(&id).await?;

    if ctx.output.is_json() {
        ctx.output.json(&json!({ "deleted": id }));
        return Ok(true);
    }

    ctx.output.success(&format!("Deleted {} ({})", headline, id));

    Ok(true)
}
