//! Command result printing

use serde::Serialize;
use stockroom_app::domain::products::models::Product;

use super::config::OutputFormat;

pub(crate) fn print_products(format: OutputFormat, products: &[Product]) -> Result<(), String> {
    match format {
        OutputFormat::Json => print_json(&products),
        OutputFormat::Text => {
            for product in products {
                print_product_text(product);
            }

            Ok(())
        }
    }
}

pub(crate) fn print_product(format: OutputFormat, product: &Product) -> Result<(), String> {
    match format {
        OutputFormat::Json => print_json(product),
        OutputFormat::Text => {
            print_product_text(product);
            Ok(())
        }
    }
}

pub(crate) fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<(), String> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|error| format!("failed to encode output: {error}"))?;

    println!("{json}");

    Ok(())
}

fn print_product_text(product: &Product) {
    println!("product_uuid: {}", product.uuid);
    println!("name: {}", product.name);
    println!("price: {}", product.price);
    println!("quantity: {}", product.quantity);
    println!("updated_at: {}", product.updated_at);
    println!();
}
