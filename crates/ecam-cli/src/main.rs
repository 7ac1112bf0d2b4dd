mod listing;
mod product;
mod sinks;

use clap::{Parser, Subcommand};
use ecam_catalog::CatalogClient;
use ecam_core::AssetUrls;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "ecam-cli")]
#[command(about = "Browse the ecam storefront catalog from a terminal")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Show a product page, optionally with options selected
    Product {
        slug: String,
        /// Select an option value, e.g. `--select choice_1=Blue`. Repeatable.
        #[arg(long = "select", value_name = "NAME=VALUE", value_parser = parse_selection)]
        selections: Vec<(String, String)>,
        /// Copy the share link for the final selection
        #[arg(long)]
        share: bool,
        /// Open a prefilled Messenger conversation about the product
        #[arg(long)]
        messenger: bool,
    },
    /// Search products by name
    Search { term: String },
    /// List recommended products
    Recommended,
    /// Show the category tree
    Categories,
    /// Show the store profile
    Store,
}

fn parse_selection(raw: &str) -> Result<(String, String), String> {
    let (name, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected NAME=VALUE, got \"{raw}\""))?;
    let name = name.trim();
    if name.is_empty() {
        return Err(format!("missing option name in \"{raw}\""));
    }
    Ok((name.to_owned(), value.to_owned()))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let config = ecam_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let client = CatalogClient::new(&config)?;
    let assets = AssetUrls::from_config(&config);

    match cli.command {
        Commands::Product {
            slug,
            selections,
            share,
            messenger,
        } => {
            let request = product::ProductRequest {
                slug,
                selections,
                share,
                messenger,
            };
            product::run(&client, &config, assets, request).await?;
        }
        Commands::Search { term } => {
            let results = client.search_products(&term).await?;
            println!("{}", listing::render_search(&term, &results, &assets));
        }
        Commands::Recommended => {
            let items = client.recommended_products().await?;
            println!("{}", listing::render_cards(&items, &assets));
        }
        Commands::Categories => {
            let categories = client.categories().await?;
            println!("{}", listing::render_categories(&categories));
        }
        Commands::Store => {
            let store = client.store_profile().await?;
            println!("{}", listing::render_store(&store, &assets));
        }
    }

    Ok(())
}
