use clap::Args;
use stockroom_app::{context::AppContext, domain::products::data::QuantityUpdate};

use crate::cli::{config::OutputFormat, output};

#[derive(Debug, Args)]
pub(crate) struct TakeStockArgs {
    /// `<uuid>=<quantity>` to remove; repeat for several products
    #[arg(long = "item", required = true)]
    items: Vec<QuantityUpdate>,
}

pub(crate) async fn run(
    ctx: &AppContext,
    args: TakeStockArgs,
    format: OutputFormat,
) -> Result<(), String> {
    let products = ctx
        .products
        .update_quantity(&args.items)
        .await
        .map_err(|error| format!("failed to update stock: {error}"))?;

    output::print_products(format, &products)
}
