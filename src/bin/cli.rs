//! Phone catalog CLI
//!
//! Runs one catalog query and prints the result as JSON on stdout.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use serde::Serialize;

use catalog::{
    Catalog,
    error::Result,
    models::{Config, Envelope},
};

/// catalog - phone specification catalog client
#[derive(Parser, Debug)]
#[command(
    name = "catalog",
    version,
    about = "Query phone listings, rankings and specs from the upstream catalog"
)]
struct Cli {
    /// Path to the configuration file
    #[arg(short, long, default_value = "data/config.toml")]
    config: PathBuf,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Pretty-print JSON output
    #[arg(long, global = true)]
    pretty: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List all brands
    Brands,

    /// List phones of one brand (e.g. "apple-phones-48")
    Brand { slug: String },

    /// List newly announced phones
    Latest,

    /// Phones ranked by daily hits
    TopInterest,

    /// Phones ranked by total favorites
    TopFans,

    /// Search phones by name
    Search { query: String },

    /// Show the spec sheet of one phone (e.g. "apple_iphone_15-12559")
    Phone { slug: String },

    /// Validate the configuration file
    Validate,
}

/// Initialize logging based on verbosity flag.
fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();
}

fn print_json<T: Serialize>(value: &T, pretty: bool) -> Result<()> {
    let json = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{json}");
    Ok(())
}

/// Main entry point for the CLI application.
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = Config::load_or_default(&cli.config);
    log::debug!("Using catalog at {}", config.catalog.base_url);

    if let Command::Validate = cli.command {
        log::info!("Validating configuration...");
        if let Err(e) = config.validate() {
            log::error!("Config validation failed: {}", e);
            return Err(e);
        }
        log::info!(
            "✓ Config OK (schema version {})",
            config.schema.version
        );
        return Ok(());
    }

    let catalog = Catalog::new(&config)?;

    match cli.command {
        Command::Brands => print_json(&Envelope::ok(catalog.brands().await?), cli.pretty)?,
        Command::Brand { slug } => print_json(
            &Envelope::ok(catalog.phones_by_brand(&slug).await?),
            cli.pretty,
        )?,
        Command::Latest => print_json(&Envelope::ok(catalog.latest().await?), cli.pretty)?,
        Command::TopInterest => {
            print_json(&Envelope::ok(catalog.top_by_interest().await?), cli.pretty)?
        }
        Command::TopFans => print_json(&Envelope::ok(catalog.top_by_fans().await?), cli.pretty)?,
        Command::Search { query } => print_json(&catalog.search(&query).await?, cli.pretty)?,
        Command::Phone { slug } => print_json(&catalog.phone_details(&slug).await?, cli.pretty)?,
        Command::Validate => {}
    }

    Ok(())
}
