use std::io::Read;

use anyhow::Context;
use clap::Subcommand;

use crate::cli::utils::{format_product_row, output_success, output_value, print_product_detail};
use crate::cli::OutputFormat;
use crate::client::StorefrontClient;
use crate::schema::{validate_new_product, ProductFilter};

#[derive(Subcommand)]
pub enum ProductCommands {
    #[command(about = "List products, newest first")]
    List {
        #[arg(long, help = "Exact category to restrict to")]
        category: Option<String>,
        #[arg(long, help = "Case-insensitive text to find in name or description")]
        search: Option<String>,
    },

    #[command(about = "Show one product (counts as a view)")]
    Show {
        #[arg(help = "Product ID")]
        id: i32,
    },

    #[command(about = "Create product from JSON on stdin (admin)")]
    Create,

    #[command(about = "Delete product (admin)")]
    Delete {
        #[arg(help = "Product ID")]
        id: i32,
    },

    #[command(about = "Record a view without fetching the product")]
    View {
        #[arg(help = "Product ID")]
        id: i32,
    },
}

pub async fn handle(
    cmd: &ProductCommands,
    client: &StorefrontClient,
    output_format: OutputFormat,
) -> anyhow::Result<()> {
    match cmd {
        ProductCommands::List { category, search } => {
            let filter = ProductFilter {
                category: category.clone(),
                search: search.clone(),
            };
            let products = client.list_products(&filter).await?;
            output_value(&output_format, &products, |products| {
                if products.is_empty() {
                    println!("No products found");
                }
                for product in products {
                    println!("{}", format_product_row(product));
                }
            })
        }
        ProductCommands::Show { id } => {
            let product = client
                .get_product(*id)
                .await?
                .with_context(|| format!("Product {} not found", id))?;
            output_value(&output_format, &product, print_product_detail)
        }
        ProductCommands::Create => {
            let mut raw = String::new();
            std::io::stdin()
                .read_to_string(&mut raw)
                .context("failed to read product JSON from stdin")?;
            let payload: serde_json::Value =
                serde_json::from_str(&raw).context("stdin is not valid JSON")?;

            // Same rules the server applies; fail before the round trip.
            let input = validate_new_product(&payload)?;
            let product = client.create_product(&input).await?;
            output_value(&output_format, &product, |product| {
                println!("✓ Created product {} ({})", product.id, product.name)
            })
        }
        ProductCommands::Delete { id } => {
            client.delete_product(*id).await?;
            output_success(&output_format, &format!("Deleted product {}", id))
        }
        ProductCommands::View { id } => {
            client.increment_view(*id).await?;
            output_success(&output_format, &format!("Recorded view for product {}", id))
        }
    }
}
