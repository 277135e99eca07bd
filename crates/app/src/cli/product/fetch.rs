use clap::Args;
use stockroom_app::{context::AppContext, domain::products::models::ProductUuid};

use crate::cli::{config::OutputFormat, output};

#[derive(Debug, Args)]
pub(crate) struct FetchProductsArgs {
    /// Product UUID; repeat for several
    #[arg(long = "uuid", required = true)]
    uuids: Vec<ProductUuid>,
}

pub(crate) async fn run(
    ctx: &AppContext,
    args: FetchProductsArgs,
    format: OutputFormat,
) -> Result<(), String> {
    let products = ctx
        .products
        .find_all_by_id(&args.uuids)
        .await
        .map_err(|error| format!("failed to fetch products: {error}"))?;

    output::print_products(format, &products)
}
