//! carlot CLI - browse and manage the used-car inventory.
//!
//! Commands:
//! - `carlot list` - Filter the catalog
//! - `carlot facets` - Show brand, year and price selectors
//! - `carlot show` - Show one vehicle
//! - `carlot contact` - Print a WhatsApp link for a vehicle
//! - `carlot import` - Import a CSV sheet into the local store
//! - `carlot admin` - Create, edit and delete listings
//! - `carlot watch` - Follow the store and reprint on every change
//! - `carlot config` - Manage configuration

mod commands;
mod config;
mod context;
mod logging;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};

use commands::{
    AdminArgs, ConfigArgs, ContactArgs, FacetsArgs, ImportArgs, ListArgs, ShowArgs, WatchArgs,
};

/// carlot - used-car storefront inventory
#[derive(Parser)]
#[command(name = "carlot")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Use JSON output format
    #[arg(long, global = true)]
    json: bool,

    /// Config file path
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List vehicles matching a filter
    List(ListArgs),

    /// Show filter selectors with counts
    Facets(FacetsArgs),

    /// Show one vehicle in detail
    Show(ShowArgs),

    /// Print a WhatsApp contact link
    Contact(ContactArgs),

    /// Import a CSV sheet into the local store
    Import(ImportArgs),

    /// Manage listings
    Admin(AdminArgs),

    /// Follow the store and reprint the catalog on change
    Watch(WatchArgs),

    /// Manage configuration
    Config(ConfigArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    logging::init_logger(cli.verbose, cli.json);

    // Setup output formatting
    let output = output::Output::new(cli.verbose, cli.json);

    let config_path = cli.config.as_deref();
    let ctx = match context::Context::load(config_path, output.clone()) {
        Ok(ctx) => ctx,
        Err(e) => {
            output.error(&format!("{:#}", e));
            std::process::exit(1);
        }
    };

    let result = match cli.command {
        Commands::List(args) => commands::list::run(args, &ctx).await,
        Commands::Facets(args) => commands::facets::run(args, &ctx).await,
        Commands::Show(args) => commands::show::run(args, &ctx).await,
        Commands::Contact(args) => commands::contact::run(args, &ctx).await,
        Commands::Import(args) => commands::import::run(args, &ctx).await,
        Commands::Admin(args) => commands::admin::run(args, &ctx).await,
        Commands::Watch(args) => commands::watch::run(args, &ctx).await,
        Commands::Config(args) => commands::config::run(args, &ctx).await,
    };

    if let Err(e) = result {
        ctx.output.error(&format!("{:#}", e));
        std::process::exit(1);
    }

    Ok(())
}
