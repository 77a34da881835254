mod discover;

use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "shopscout-cli")]
#[command(about = "shopscout command line interface")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Discover and price-tier shopping products for an idea.
    Discover(discover::DiscoverArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Discover(args) => discover::run(args).await,
    }
}
