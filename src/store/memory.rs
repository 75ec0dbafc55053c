use std::cmp::Reverse;
use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use super::{CatalogStore, StoreError, DUPLICATE_EMAIL, MOST_VIEWED_LIMIT};
use crate::schema::{
    DashboardStats, NewProduct, NewSignup, Product, ProductFilter, ProductPatch, SignupUser,
};

#[derive(Default)]
struct Tables {
    products: BTreeMap<i32, Product>,
    signups: Vec<SignupUser>,
    last_product_id: i32,
    last_signup_id: i32,
}

/// In-process catalog with the same contract as [`super::PgCatalogStore`].
///
/// Every mutation runs under one write lock, which plays the role of the
/// database's row locking: concurrent increments never lose updates and two
/// identical signups never both succeed.
#[derive(Default)]
pub struct MemoryCatalogStore {
    tables: RwLock<Tables>,
}

impl MemoryCatalogStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn newest_first(products: &mut [Product]) {
    products.sort_by_key(|p| Reverse((p.created_at, p.id)));
}

#[async_trait]
impl CatalogStore for MemoryCatalogStore {
    async fn list_products(&self, filter: &ProductFilter) -> Result<Vec<Product>, StoreError> {
        let filter = filter.normalized();
        let tables = self.tables.read().await;
        let mut products: Vec<Product> = tables
            .products
            .values()
            .filter(|p| filter.matches(p))
            .cloned()
            .collect();
        newest_first(&mut products);
        Ok(products)
    }

    async fn get_product(&self, id: i32) -> Result<Option<Product>, StoreError> {
        Ok(self.tables.read().await.products.get(&id).cloned())
    }

    async fn create_product(&self, input: NewProduct) -> Result<Product, StoreError> {
        let mut tables = self.tables.write().await;
        tables.last_product_id += 1;
        let product = Product {
            id: tables.last_product_id,
            name: input.name,
            description: input.description,
            price: input.price,
            category: input.category,
            image_url: input.image_url,
            view_count: 0,
            created_at: Utc::now(),
        };
        tables.products.insert(product.id, product.clone());
        Ok(product)
    }

    async fn update_product(&self, id: i32, patch: ProductPatch) -> Result<Product, StoreError> {
        let mut tables = self.tables.write().await;
        let product = tables
            .products
            .get_mut(&id)
            .ok_or_else(|| StoreError::NotFound(format!("product {id}")))?;
        patch.apply(product);
        Ok(product.clone())
    }

    async fn delete_product(&self, id: i32) -> Result<(), StoreError> {
        self.tables.write().await.products.remove(&id);
        Ok(())
    }

    async fn increment_product_view(&self, id: i32) -> Result<(), StoreError> {
        if let Some(product) = self.tables.write().await.products.get_mut(&id) {
            product.view_count += 1;
        }
        Ok(())
    }

    async fn create_signup(&self, input: NewSignup) -> Result<SignupUser, StoreError> {
        let mut tables = self.tables.write().await;
        let email = input.email.into_inner();
        if tables.signups.iter().any(|u| u.email == email) {
            return Err(StoreError::Conflict(DUPLICATE_EMAIL.to_string()));
        }
        tables.last_signup_id += 1;
        let user = SignupUser {
            id: tables.last_signup_id,
            name: input.name,
            email,
            created_at: Utc::now(),
        };
        tables.signups.push(user.clone());
        Ok(user)
    }

    async fn count_signups(&self) -> Result<i64, StoreError> {
        Ok(self.tables.read().await.signups.len() as i64)
    }

    async fn dashboard_stats(&self) -> Result<DashboardStats, StoreError> {
        let tables = self.tables.read().await;
        let mut most_viewed: Vec<Product> = tables.products.values().cloned().collect();
        most_viewed.sort_by_key(|p| (Reverse(p.view_count), p.id));
        most_viewed.truncate(MOST_VIEWED_LIMIT as usize);

        Ok(DashboardStats {
            total_products: tables.products.len() as i64,
            total_users: tables.signups.len() as i64,
            most_viewed_products: most_viewed,
        })
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}
