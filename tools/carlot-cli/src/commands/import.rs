//! Sheet import into the local store.

use anyhow::{Context as _, Result};
use carlot_sync::InventoryController;
use serde_json::json;

use super::ImportArgs;
use crate::context::Context;

/// Run the import command.
pub async fn run(args: ImportArgs, ctx: &Context) -> Result<()> {
    let source = ctx.sheet_source(args.source.as_deref())?;
    let mut controller = InventoryController::new(ctx.normalizer()?);

    let spinner = ctx
        .output
        .spinner(&format!("Importing {}", source.describe()));
    let result = controller.import_sheet(source.as_ref()).await;
    spinner.finish_and_clear();

    let count = result.with_context(|| format!("Import from {} failed", source.describe()))?;

    if count == 0 {
        ctx.output
            .warn("The sheet has no rows with a brand or model; the store was left unchanged.");
        if ctx.output.is_json() {
            ctx.output.json(&json!({ "imported": 0, "written": false }));
        }
        return Ok(());
    }

    let store = ctx.store()?;
    let written = !args.dry_run;
    if written {
        store
            .replace_all(controller.vehicles())
            .await
            .with_context(|| format!("Failed to write {}", store.path().display()))?;
    }

    if ctx.output.is_json() {
        ctx.output.json(&json!({
            "imported": count,
            "written": written,
            "store": store.path().display().to_string(),
        }));
        return Ok(());
    }

    if written {
        ctx.output.success(&format!(
            "Imported {} vehicle(s) into {}",
            count,
            store.path().display()
        ));
    } else {
        ctx.output
            .info(&format!("Dry run: {} vehicle(s) would be imported", count));
    }

    Ok(())
}
