use crate::cli::utils::{format_product_row, output_value};
use crate::cli::OutputFormat;
use crate::client::StorefrontClient;

pub async fn handle(client: &StorefrontClient, output_format: OutputFormat) -> anyhow::Result<()> {
    let stats = client.admin_stats().await?;
    output_value(&output_format, &stats, |stats| {
        println!("Products: {}", stats.total_products);
        println!("Signups:  {}", stats.total_users);
        if !stats.most_viewed_products.is_empty() {
            println!();
            println!("Most viewed:");
            for product in &stats.most_viewed_products {
                println!("{}", format_product_row(product));
            }
        }
    })
}
