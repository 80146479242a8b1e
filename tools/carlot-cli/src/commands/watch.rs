//! Follow the store and reprint the catalog on every change.

use std::time::Duration;

use anyhow::Result;
use carlot_sync::InventoryController;
use chrono::Local;
use console::Term;

use super::WatchArgs;
use crate::context::Context;

/// Run the watch command.
pub async fn run(args: WatchArgs, ctx: &Context) -> Result<()> {
    let filter = args.filter.to_filter()?;
    let store = ctx
        .store()?
        .with_polling(Duration::from_millis(args.interval_ms.max(50)));

    let mut controller = InventoryController::new(ctx.normalizer()?);
    controller.attach_live(&store);
    ctx.output.info(&format!(
        "Watching {} (Ctrl-C to stop)",
        store.path().display()
    ));

    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => break,
            more = controller.pump_live() => {
                if !more {
                    break;
                }
                render(&controller, &filter, ctx);
            }
        }
    }

    controller.detach_live();
    Ok(())
}

fn render(
    controller: &InventoryController,
    filter: &carlot_inventory::VehicleFilter,
    ctx: &Context,
) {
    let view = controller.view(filter);

    if ctx.output.is_json() {
        if let Ok(line) = serde_json::to_string(&view) {
            println!("{}", line);
        }
        return;
    }

    let _ = Term::stdout().clear_screen();
    ctx.output.header(&format!(
        "{} vehicles on sale (updated {})",
        view.total,
        Local::now().format("%H:%M:%S")
    ));
    if let Some(advisory) = controller.advisory() {
        ctx.output.warn(advisory);
    }
    ctx.output.vehicle_table(&view.vehicles);
}
