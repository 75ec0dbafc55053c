use std::time::Duration;

use async_trait::async_trait;
use sqlx::{postgres::PgPoolOptions, PgPool, Postgres, QueryBuilder};
use tracing::{debug, info};

use super::{CatalogStore, StoreError, DUPLICATE_EMAIL, MOST_VIEWED_LIMIT};
use crate::config::DatabaseConfig;
use crate::schema::{
    DashboardStats, NewProduct, NewSignup, Product, ProductFilter, ProductPatch, SignupUser,
};

const PRODUCT_COLUMNS: &str =
    "id, name, description, price, category, image_url, view_count, created_at";

/// PostgreSQL-backed catalog.
#[derive(Clone)]
pub struct PgCatalogStore {
    pool: PgPool,
}

impl PgCatalogStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Opens a pool from configuration and applies pending migrations.
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, StoreError> {
        let url = config
            .url
            .as_deref()
            .ok_or(StoreError::ConfigMissing("DATABASE_URL"))?;

        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(Duration::from_secs(config.connection_timeout))
            .connect(url)
            .await?;
        info!("Created database pool (max {} connections)", config.max_connections);

        let store = Self::new(pool);
        store.migrate().await?;
        Ok(store)
    }

    pub async fn migrate(&self) -> Result<(), StoreError> {
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        debug!("Catalog migrations applied");
        Ok(())
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    pub async fn close(&self) {
        self.pool.close().await;
        info!("Closed database pool");
    }
}

/// Escapes `LIKE` metacharacters so user input only ever matches literally.
fn escape_like(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for c in input.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db) if db.is_unique_violation())
}

#[async_trait]
impl CatalogStore for PgCatalogStore {
    async fn list_products(&self, filter: &ProductFilter) -> Result<Vec<Product>, StoreError> {
        let filter = filter.normalized();
        let mut query = QueryBuilder::<Postgres>::new(format!(
            "SELECT {PRODUCT_COLUMNS} FROM products WHERE TRUE"
        ));

        if let Some(category) = filter.category {
            query.push(" AND category = ").push_bind(category);
        }
        if let Some(search) = filter.search {
            let pattern = format!("%{}%", escape_like(&search));
            query
                .push(" AND (name ILIKE ")
                .push_bind(pattern.clone())
                .push(" OR description ILIKE ")
                .push_bind(pattern)
                .push(")");
        }
        query.push(" ORDER BY created_at DESC, id DESC");

        let products = query
            .build_query_as::<Product>()
            .fetch_all(&self.pool)
            .await?;
        debug!("Listed {} products", products.len());
        Ok(products)
    }

    async fn get_product(&self, id: i32) -> Result<Option<Product>, StoreError> {
        let product = sqlx::query_as::<_, Product>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(product)
    }

    async fn create_product(&self, input: NewProduct) -> Result<Product, StoreError> {
        let product = sqlx::query_as::<_, Product>(&format!(
            "INSERT INTO products (name, description, price, category, image_url) \
             VALUES ($1, $2, $3, $4, $5) RETURNING {PRODUCT_COLUMNS}"
        ))
        .bind(input.name)
        .bind(input.description)
        .bind(input.price)
        .bind(input.category)
        .bind(input.image_url)
        .fetch_one(&self.pool)
        .await?;
        debug!("Created product {} ({})", product.id, product.name);
        Ok(product)
    }

    async fn update_product(&self, id: i32, patch: ProductPatch) -> Result<Product, StoreError> {
        let product = sqlx::query_as::<_, Product>(&format!(
            "UPDATE products SET \
                name = COALESCE($2, name), \
                description = COALESCE($3, description), \
                price = COALESCE($4, price), \
                category = COALESCE($5, category), \
                image_url = COALESCE($6, image_url) \
             WHERE id = $1 RETURNING {PRODUCT_COLUMNS}"
        ))
        .bind(id)
        .bind(patch.name)
        .bind(patch.description)
        .bind(patch.price)
        .bind(patch.category)
        .bind(patch.image_url)
        .fetch_optional(&self.pool)
        .await?;

        product.ok_or_else(|| StoreError::NotFound(format!("product {id}")))
    }

    async fn delete_product(&self, id: i32) -> Result<(), StoreError> {
        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            debug!("Delete of product {} matched no row", id);
        }
        Ok(())
    }

    async fn increment_product_view(&self, id: i32) -> Result<(), StoreError> {
        sqlx::query("UPDATE products SET view_count = view_count + 1 WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn create_signup(&self, input: NewSignup) -> Result<SignupUser, StoreError> {
        sqlx::query_as::<_, SignupUser>(
            "INSERT INTO stats_users (name, email) VALUES ($1, $2) \
             RETURNING id, name, email, created_at",
        )
        .bind(input.name)
        .bind(input.email.into_inner())
        .fetch_one(&self.pool)
        .await
        .map_err(|err| {
            if is_unique_violation(&err) {
                StoreError::Conflict(DUPLICATE_EMAIL.to_string())
            } else {
                StoreError::Sqlx(err)
            }
        })
    }

    async fn count_signups(&self) -> Result<i64, StoreError> {
        Ok(self.count_signups_sqlx().await?)
    }

    async fn dashboard_stats(&self) -> Result<DashboardStats, StoreError> {
        let total_products = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM products")
            .fetch_one(&self.pool);
        let most_viewed_sql = format!(
            "SELECT {PRODUCT_COLUMNS} FROM products ORDER BY view_count DESC, id ASC LIMIT $1"
        );
        let most_viewed = sqlx::query_as::<_, Product>(&most_viewed_sql)
            .bind(MOST_VIEWED_LIMIT)
            .fetch_all(&self.pool);

        let (total_products, total_users, most_viewed_products) =
            futures::try_join!(total_products, self.count_signups_sqlx(), most_viewed)?;

        Ok(DashboardStats {
            total_products,
            total_users,
            most_viewed_products,
        })
    }

    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

impl PgCatalogStore {
    async fn count_signups_sqlx(&self) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM stats_users")
            .fetch_one(&self.pool)
            .await
    }
}
