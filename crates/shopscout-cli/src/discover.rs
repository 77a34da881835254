//! The `discover` subcommand: one full discovery run from the terminal,
//! printed as pretty JSON.

use clap::Args;

use shopscout_engine::{DiscoveryEngine, DiscoveryRequest};

#[derive(Debug, Args)]
pub(crate) struct DiscoverArgs {
    /// Free-text idea of what to shop for.
    #[arg(long)]
    description: String,

    /// Budget in USD. Absent or non-positive values fall back to the
    /// engine default.
    #[arg(long)]
    budget: Option<f64>,

    /// Search every configured retailer instead of only the primary one.
    #[arg(long)]
    all_retailers: bool,

    /// Explicit retailer hostname to scope the search to; repeatable.
    #[arg(long = "retailer")]
    retailers: Vec<String>,

    /// Use image search instead of link search.
    #[arg(long)]
    image: bool,
}

pub(crate) async fn run(args: DiscoverArgs) -> anyhow::Result<()> {
    let config = shopscout_core::load_app_config()?;
    let registry = shopscout_core::load_retailers(&config.retailers_path)?;
    let engine = DiscoveryEngine::from_config(&config, registry)?;

    let request = DiscoveryRequest {
        description: args.description,
        budget: args.budget,
        ikea_only: !args.all_retailers,
        retailers: (!args.retailers.is_empty()).then_some(args.retailers),
        image: args.image,
    };

    let response = engine.discover(&request).await?;
    println!("{}", serde_json::to_string_pretty(&response)?);
    Ok(())
}
