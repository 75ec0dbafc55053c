use serde::Serialize;
use serde_json::json;

use crate::cli::OutputFormat;
use crate::schema::Product;

/// Output a success message in the appropriate format
pub fn output_success(output_format: &OutputFormat, message: &str) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => {
            let response = json!({
                "success": true,
                "message": message
            });
            println!("{}", serde_json::to_string_pretty(&response)?);
        }
        OutputFormat::Text => {
            println!("✓ {}", message);
        }
    }
    Ok(())
}

/// Output an error message in the appropriate format
pub fn output_error(output_format: &OutputFormat, message: &str, field: Option<&str>) {
    match output_format {
        OutputFormat::Json => {
            let mut response = json!({
                "success": false,
                "error": message
            });
            if let Some(field) = field {
                response["field"] = json!(field);
            }
            // Falls back to the plain message if the JSON cannot be rendered.
            match serde_json::to_string_pretty(&response) {
                Ok(text) => println!("{}", text),
                Err(_) => eprintln!("Error: {}", message),
            }
        }
        OutputFormat::Text => match field {
            Some(field) => eprintln!("Error: {} ({})", message, field),
            None => eprintln!("Error: {}", message),
        },
    }
}

/// JSON prints the value as-is; text delegates to `render`.
pub fn output_value<T, F>(output_format: &OutputFormat, value: &T, render: F) -> anyhow::Result<()>
where
    T: Serialize,
    F: FnOnce(&T),
{
    match output_format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(value)?),
        OutputFormat::Text => render(value),
    }
    Ok(())
}

/// One line per product: id, price, views, category, name.
pub fn format_product_row(product: &Product) -> String {
    format!(
        "{:>5}  {:>10}  {:>6} views  {:<12}  {}",
        product.id, product.price, product.view_count, product.category, product.name
    )
}

pub fn print_product_detail(product: &Product) {
    println!("Product {}: {}", product.id, product.name);
    println!("Category: {}", product.category);
    println!("Price: {}", product.price);
    println!("Views: {}", product.view_count);
    println!("Image: {}", product.image_url);
    println!("Created: {}", product.created_at.to_rfc3339());
    if !product.description.is_empty() {
        println!();
        println!("{}", product.description);
    }
}
