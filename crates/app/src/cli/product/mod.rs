use clap::{Args, Subcommand};
use stockroom_app::context::AppContext;

use super::config::{DatabaseConfig, OutputFormat};

mod create;
mod fetch;
mod find;
mod take;

#[derive(Debug, Args)]
pub(crate) struct ProductCommand {
    #[command(flatten)]
    database: DatabaseConfig,

    #[command(subcommand)]
    command: ProductSubcommand,
}

#[derive(Debug, Subcommand)]
enum ProductSubcommand {
    /// Create a product
    Create(create::CreateProductArgs),
    /// Look a product up by exact name
    Find(find::FindProductArgs),
    /// Fetch products by UUID; fails if any is missing
    Fetch(fetch::FetchProductsArgs),
    /// Remove stock from one or more products in a single batch
    Take(take::TakeStockArgs),
}

pub(crate) async fn run(command: ProductCommand, output: OutputFormat) -> Result<(), String> {
    let ctx = AppContext::from_database_url(&command.database.database_url)
        .await
        .map_err(|error| format!("failed to connect to database: {error}"))?;

    match command.command {
        ProductSubcommand::Create(args) => create::run(&ctx, args, output).await,
        ProductSubcommand::Find(args) => find::run(&ctx, args, output).await,
        ProductSubcommand::Fetch(args) => fetch::run(&ctx, args, output).await,
        ProductSubcommand::Take(args) => take::run(&ctx, args, output).await,
    }
}
