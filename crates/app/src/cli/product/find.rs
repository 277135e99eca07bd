use clap::Args;
use stockroom_app::context::AppContext;

use crate::cli::{config::OutputFormat, output};

#[derive(Debug, Args)]
pub(crate) struct FindProductArgs {
    /// Exact product name
    #[arg(long)]
    name: String,
}

pub(crate) async fn run(
    ctx: &AppContext,
    args: FindProductArgs,
    format: OutputFormat,
) -> Result<(), String> {
    let product = ctx
        .products
        .find_by_name(&args.name)
        .await
        .map_err(|error| format!("failed to find product: {error}"))?;

    if format == OutputFormat::Json {
        return output::print_json(&product);
    }

    match product {
        Some(product) => output::print_product(format, &product),
        None => {
            println!("no product named {}", args.name);
            Ok(())
        }
    }
}
