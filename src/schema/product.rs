use chrono::{DateTime, Utc};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;

use super::{FieldReader, ValidationErrors};

/// Catalog item as stored.
///
/// `price` serializes as a fixed two-decimal string (`"99.99"`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: i32,
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub category: String,
    pub image_url: String,
    pub view_count: i32,
    pub created_at: DateTime<Utc>,
}

/// Validated create input. Server-assigned fields are not part of it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProduct {
    pub name: String,
    pub description: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    pub category: String,
    pub image_url: String,
}

/// Partial update. `None` leaves the stored value untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "rust_decimal::serde::float_option"
    )]
    pub price: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

impl ProductPatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.description.is_none()
            && self.price.is_none()
            && self.category.is_none()
            && self.image_url.is_none()
    }

    pub fn apply(&self, product: &mut Product) {
        if let Some(name) = &self.name {
            product.name.clone_from(name);
        }
        if let Some(description) = &self.description {
            product.description.clone_from(description);
        }
        if let Some(price) = self.price {
            product.price = price;
        }
        if let Some(category) = &self.category {
            product.category.clone_from(category);
        }
        if let Some(image_url) = &self.image_url {
            product.image_url.clone_from(image_url);
        }
    }
}

/// List filters. Blank values count as omitted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProductFilter {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
}

impl ProductFilter {
    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    /// Drops blank filters; `search` is trimmed, `category` must match exactly.
    pub fn normalized(&self) -> Self {
        Self {
            category: self.category.clone().filter(|c| !c.trim().is_empty()),
            search: self
                .search
                .as_deref()
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string),
        }
    }

    /// Case-insensitive substring match against name or description.
    pub fn matches(&self, product: &Product) -> bool {
        if let Some(category) = &self.category {
            if &product.category != category {
                return false;
            }
        }
        if let Some(search) = &self.search {
            let needle = search.to_lowercase();
            return product.name.to_lowercase().contains(&needle)
                || product.description.to_lowercase().contains(&needle);
        }
        true
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_products: i64,
    pub total_users: i64,
    pub most_viewed_products: Vec<Product>,
}

/// Fields the server assigns; a patch may not touch them.
const SERVER_FIELDS: [&str; 3] = ["id", "viewCount", "createdAt"];

/// Upper bound imposed by the `NUMERIC(10, 2)` column.
fn max_price() -> Decimal {
    Decimal::from(100_000_000_i64)
}

fn check_price(reader: &mut FieldReader<'_>, price: Decimal) -> Option<Decimal> {
    if price.is_sign_negative() && !price.is_zero() {
        reader.reject("price", "Price must be positive");
        return None;
    }
    let mut price = price.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    if price >= max_price() {
        reader.reject("price", "Price must be less than 100000000");
        return None;
    }
    price.rescale(2);
    Some(price)
}

fn check_text(
    reader: &mut FieldReader<'_>,
    field: &str,
    value: String,
    empty_message: &str,
) -> Option<String> {
    if value.is_empty() {
        reader.reject(field, empty_message);
        return None;
    }
    Some(value)
}

pub fn validate_new_product(payload: &Value) -> Result<NewProduct, ValidationErrors> {
    let mut reader = FieldReader::new(payload);

    let name = reader
        .required_string("name")
        .and_then(|v| check_text(&mut reader, "name", v, "Name is required"));
    let description = reader.required_string("description");
    let price = reader
        .required_decimal("price")
        .and_then(|v| check_price(&mut reader, v));
    let category = reader.required_string("category");
    let image_url = reader.required_string("imageUrl");

    let record = match (name, description, price, category, image_url) {
        (Some(name), Some(description), Some(price), Some(category), Some(image_url)) => {
            Some(NewProduct {
                name,
                description,
                price,
                category,
                image_url,
            })
        }
        _ => None,
    };
    reader.finish(record)
}

pub fn validate_product_patch(payload: &Value) -> Result<ProductPatch, ValidationErrors> {
    let mut reader = FieldReader::new(payload);

    for field in SERVER_FIELDS {
        if reader.contains(field) {
            reader.reject(field, "Field cannot be updated");
        }
    }
    let name = reader
        .optional_string("name")
        .and_then(|v| check_text(&mut reader, "name", v, "Name is required"));
    let description = reader.optional_string("description");
    let price = reader
        .optional_decimal("price")
        .and_then(|v| check_price(&mut reader, v));
    let category = reader.optional_string("category");
    let image_url = reader.optional_string("imageUrl");

    reader.finish(Some(ProductPatch {
        name,
        description,
        price,
        category,
        image_url,
    }))
}
