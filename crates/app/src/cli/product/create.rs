use clap::Args;
use stockroom_app::{context::AppContext, domain::products::data::NewProduct};

use crate::cli::{config::OutputFormat, output};

#[derive(Debug, Args)]
pub(crate) struct CreateProductArgs {
    /// Product display name
    #[arg(long)]
    name: String,

    /// Unit price in minor currency units
    #[arg(long)]
    price: u64,

    /// Initial stock
    #[arg(long)]
    quantity: u64,
}

pub(crate) async fn run(
    ctx: &AppContext,
    args: CreateProductArgs,
    format: OutputFormat,
) -> Result<(), String> {
    if args.name.trim().is_empty() {
        return Err("name cannot be empty".to_string());
    }

    let product = ctx
        .products
        .create_product(NewProduct {
            name: args.name,
            price: args.price,
            quantity: args.quantity,
        })
        .await
        .map_err(|error| format!("failed to create product: {error}"))?;

    output::print_product(format, &product)
}
