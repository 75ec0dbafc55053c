//! Demo catalog inserted into an empty store.

use rust_decimal::Decimal;
use tracing::info;

use super::{CatalogStore, StoreError};
use crate::schema::{NewProduct, ProductFilter};

struct SeedProduct {
    name: &'static str,
    description: &'static str,
    /// Price in cents.
    price: i64,
    category: &'static str,
    image_url: &'static str,
    /// Demo traffic, replayed as view increments after creation.
    views: u32,
}

const SEED_PRODUCTS: [SeedProduct; 5] = [
    SeedProduct {
        name: "Wireless Headphones",
        description: "High quality wireless headphones with noise cancellation.",
        price: 9999,
        category: "Tech",
        image_url: "https://images.unsplash.com/photo-1505740420928-5e560c06d30e?w=600&q=80",
        views: 120,
    },
    SeedProduct {
        name: "Smart Watch Series 5",
        description: "Track your fitness and stay connected.",
        price: 19950,
        category: "Tech",
        image_url: "https://images.unsplash.com/photo-1523275335684-37898b6baf30?w=600&q=80",
        views: 45,
    },
    SeedProduct {
        name: "Precision Screwdriver Set",
        description: "64-piece screwdriver set for electronics repair.",
        price: 2999,
        category: "Repair Tools",
        image_url: "https://images.unsplash.com/photo-1581092921461-eab62e97a780?w=600&q=80",
        views: 80,
    },
    SeedProduct {
        name: "Soldering Iron Kit",
        description: "Adjustable temperature soldering iron with stand.",
        price: 4500,
        category: "Repair Tools",
        image_url: "https://images.unsplash.com/photo-1593106197126-5b432e3c023d?w=600&q=80",
        views: 30,
    },
    SeedProduct {
        name: "Laptop Stand",
        description: "Ergonomic aluminum laptop stand.",
        price: 3599,
        category: "Accessories",
        image_url: "https://images.unsplash.com/photo-1616423664074-907f885304e2?w=600&q=80",
        views: 65,
    },
];

fn seed_products() -> impl Iterator<Item = (NewProduct, u32)> {
    SEED_PRODUCTS.iter().map(|seed| {
        let product = NewProduct {
            name: seed.name.to_string(),
            description: seed.description.to_string(),
            price: Decimal::new(seed.price, 2),
            category: seed.category.to_string(),
            image_url: seed.image_url.to_string(),
        };
        (product, seed.views)
    })
}

/// Inserts the demo catalog when no products exist. Returns how many were added.
pub async fn seed_if_empty(store: &dyn CatalogStore) -> Result<usize, StoreError> {
    if !store.list_products(&ProductFilter::default()).await?.is_empty() {
        return Ok(0);
    }

    let mut inserted = 0;
    for (product, views) in seed_products() {
        let created = store.create_product(product).await?;
        for _ in 0..views {
            store.increment_product_view(created.id).await?;
        }
        inserted += 1;
    }
    info!("Seeded catalog with {} products", inserted);
    Ok(inserted)
}
