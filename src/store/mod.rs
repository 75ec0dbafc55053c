//! Catalog Store: the only component that touches persistent storage.
//!
//! Handlers hold an `Arc<dyn CatalogStore>`, so the PostgreSQL store and the
//! in-memory store are interchangeable. Every operation is one round trip to
//! storage; nothing is locked across calls.

pub mod memory;
pub mod postgres;
pub mod seed;

pub use memory::MemoryCatalogStore;
pub use postgres::PgCatalogStore;

use async_trait::async_trait;
use thiserror::Error;

use crate::schema::{
    DashboardStats, NewProduct, NewSignup, Product, ProductFilter, ProductPatch, SignupUser,
};

/// Number of products reported in [`DashboardStats::most_viewed_products`].
pub const MOST_VIEWED_LIMIT: i64 = 5;

pub const DUPLICATE_EMAIL: &str = "Email already registered";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Not found: {0}")]
    NotFound(String),

    /// A unique constraint rejected the write.
    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Missing configuration: {0}")]
    ConfigMissing(&'static str),

    #[error(transparent)]
    Migrate(#[from] sqlx::migrate::MigrateError),

    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

#[async_trait]
pub trait CatalogStore: Send + Sync {
    /// Products matching `filter`, newest first (ties broken by id, descending).
    async fn list_products(&self, filter: &ProductFilter) -> Result<Vec<Product>, StoreError>;

    /// `None` when no row matches; callers decide whether that is a 404.
    async fn get_product(&self, id: i32) -> Result<Option<Product>, StoreError>;

    /// Assigns id and creation time; `view_count` starts at 0.
    async fn create_product(&self, input: NewProduct) -> Result<Product, StoreError>;

    /// Fails with [`StoreError::NotFound`] when `id` does not exist.
    async fn update_product(&self, id: i32, patch: ProductPatch) -> Result<Product, StoreError>;

    /// Succeeds whether or not the row existed.
    async fn delete_product(&self, id: i32) -> Result<(), StoreError>;

    /// Adds exactly one to the stored view count. A missing id is a no-op.
    async fn increment_product_view(&self, id: i32) -> Result<(), StoreError>;

    /// Fails with [`StoreError::Conflict`] when the email is already registered.
    async fn create_signup(&self, input: NewSignup) -> Result<SignupUser, StoreError>;

    async fn count_signups(&self) -> Result<i64, StoreError>;

    async fn dashboard_stats(&self) -> Result<DashboardStats, StoreError>;

    /// Cheap reachability probe for health checks.
    async fn ping(&self) -> Result<(), StoreError>;
}
