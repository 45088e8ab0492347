//! Rosba CLI - Command line storefront for the Rosba Store kitab catalog.
//!
//! Commands:
//! - `rosba list` - List the catalog, filtered by category and search term
//! - `rosba show` - Show one product in detail
//! - `rosba upload` - Turn photos into catalog entries via the image analyzer
//! - `rosba browse` - Interactive storefront session
//! - `rosba categories` - List the category filters
//! - `rosba config` - Manage configuration

mod commands;
mod config;
mod context;
mod logging;
mod output;
mod storefront;

use anyhow::Result;
use clap::{Parser, Subcommand};

use commands::{BrowseArgs, ConfigArgs, ListArgs, ShowArgs, UploadArgs};

/// Rosba CLI - Browse the kitab catalog and bulk-add products from photos
#[derive(Parser)]
#[command(name = "rosba")]
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

    /// Seed catalog JSON file (overrides the config and the built-in sample)
    #[arg(long, global = true)]
    catalog: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List catalog products
    List(ListArgs),

    /// Show product details
    Show(ShowArgs),

    /// Add products from photos (bulk upload)
    Upload(UploadArgs),

    /// Start an interactive storefront session
    Browse(BrowseArgs),

    /// List category filters
    Categories,

    /// Manage configuration
    Config(ConfigArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup output formatting
    let output = output::Output::new(cli.verbose, cli.json);

    // Load config
    let config_path = cli.config.as_deref();
    let ctx = match context::Context::load(config_path, cli.catalog, output.clone()) {
        Ok(ctx) => ctx,
        Err(e) => {
            output.error(&format!("{:#}", e));
            std::process::exit(1);
        }
    };

    logging::init(cli.verbose, cli.json, &ctx.config.logging);

    // Execute command
    let result = match cli.command {
        Commands::List(args) => commands::list::run(args, &ctx).await,
        Commands::Show(args) => commands::show::run(args, &ctx).await,
        Commands::Upload(args) => commands::upload::run(args, &ctx).await,
        Commands::Browse(args) => commands::browse::run(args, &ctx).await,
        Commands::Categories => commands::list::categories(&ctx).await,
        Commands::Config(args) => commands::config::run(args, &ctx).await,
    };

    if let Err(e) = result {
        ctx.output.error(&format!("{:#}", e));
        std::process::exit(1);
    }

    Ok(())
}
