//! Configuration management commands.

use std::fs;

use anyhow::{bail, Result};

use super::{ConfigArgs, ConfigCommand};
use crate::config::{generate_default_config, CliConfig, SourceKind, CONFIG_NAMES};
use crate::context::Context;

/// Run the config command.
pub async fn run(args: ConfigArgs, ctx: &Context) -> Result<()> {
    match args.command {
        ConfigCommand::Show => show_config(ctx).await,
        ConfigCommand::Init { force } => init_config(force, ctx).await,
        ConfigCommand::Validate => validate_config(ctx).await,
    }
}

async fn show_config(ctx: &Context) -> Result<()> {
    if ctx.output.is_json() {
        ctx.output.json(&ctx.config);
        return Ok(());
    }

    ctx.output.header("Current Configuration");
    match &ctx.config_path {
        Some(path) => ctx.output.kv("file", &path.display().to_string()),
        None => ctx.output.kv("file", "(defaults)"),
    }

    let source = &ctx.config.source;
    ctx.output.info("");
    ctx.output.info("[source]");
    ctx.output.kv("kind", kind_name(source.kind));
    ctx.output.kv("store_path", &source.store_path);
    if let Some(ref url) = source.sheet_url {
        ctx.output.kv("sheet_url", url);
    }
    if let Some(ref path) = source.sheet_path {
        ctx.output.kv("sheet_path", path);
    }

    ctx.output.info("");
    ctx.output.info("[fetch]");
    ctx.output
        .kv("timeout_ms", &ctx.config.fetch.timeout_ms.to_string());
    ctx.output
        .kv("max_retries", &ctx.config.fetch.max_retries.to_string());

    if !ctx.config.aliases.is_empty() {
        ctx.output.info("");
        ctx.output.info("[aliases]");
        for (field, aliases) in &ctx.config.aliases {
            ctx.output.kv(field, &aliases.join(", "));
        }
    }

    Ok(())
}

async fn init_config(force: bool, ctx: &Context) -> Result<()> {
    let config_path = ctx.cwd.join(CONFIG_NAMES[0]);

    if config_path.exists() && !force {
        bail!(
            "Config file already exists: {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    fs::write(&config_path, generate_default_config())?;

    ctx.output.success(&format!("Created: {}", config_path.display()));

    Ok(())
}

async fn validate_config(ctx: &Context) -> Result<()> {
    ctx.output.header("Validating configuration");

    let (errors, warnings) = check_config(&ctx.config);

    if errors.is_empty() && warnings.is_empty() {
        ctx.output.success("Configuration is valid");
        return Ok(());
    }

    for error in &errors {
        ctx.output.error(&format!("Error: {}", error));
    }

    for warning in &warnings {
        ctx.output.warn(&format!("Warning: {}", warning));
    }

    if !errors.is_empty() {
        bail!("Configuration has {} error(s)", errors.len());
    }

    ctx.output.success("Configuration is valid (with warnings)");

    Ok(())
}

/// Collect configuration errors and warnings.
fn check_config(config: &CliConfig) -> (Vec<String>, Vec<String>) {
    let mut errors: Vec<String> = Vec::new();
    let mut warnings: Vec<String> = Vec::new();

    let source = &config.source;
    if source.store_path.trim().is_empty() {
        errors.push("source.store_path must not be empty".to_string());
    }

    if source.kind == SourceKind::Sheet && source.sheet_url.is_none() && source.sheet_path.is_none()
    {
        errors.push("source.kind = \"sheet\" needs sheet_url or sheet_path".to_string());
    }

    if let Some(ref url) = source.sheet_url {
        if !url.starts_with("http://") && !url.starts_with("https://") {
            errors.push(format!("source.sheet_url '{}' must be an http(s) URL", url));
        }
        if source.sheet_path.is_some() {
            warnings.push("source.sheet_path is ignored while sheet_url is set".to_string());
        }
    }

    if config.fetch.timeout_ms == 0 {
        errors.push("fetch.timeout_ms must be greater than 0".to_string());
    }

    if config.fetch.max_retries > 10 {
        warnings.push(format!(
            "fetch.max_retries = {} is unusually high",
            config.fetch.max_retries
        ));
    }

    if let Err(e) = config.alias_overrides() {
        errors.push(format!("{:#}", e));
    }

    for (field, aliases) in &config.aliases {
        if aliases.is_empty() {
            warnings.push(format!(
                "aliases.{} is empty; the field will always take its default",
                field
            ));
        }
    }

    (errors, warnings)
}

fn kind_name(kind: SourceKind) -> &'static str {
    match kind {
        SourceKind::Store => "store",
        SourceKind::Sheet => "sheet",
    }
}
