//! Typed wrappers over the HTTP API.
//!
//! Each call is one request. Reads of the product list and the dashboard go
//! through a [`QueryCache`]; any call that can change those results clears it
//! so the next read goes back to the server.

pub mod cache;
pub mod error;

pub use cache::{QueryCache, QueryKey};
pub use error::ClientError;

use reqwest::{Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::json;
use url::Url;

use crate::api::routes;
use crate::schema::{DashboardStats, NewProduct, Product, ProductFilter, ProductPatch, SignupUser};

pub type ClientResult<T> = Result<T, ClientError>;

#[derive(Debug, Clone)]
pub struct StorefrontClient {
    http: reqwest::Client,
    base: Url,
    token: Option<String>,
    cache: QueryCache,
}

impl StorefrontClient {
    /// `base_url` may carry a path prefix (`https://shop.example.com/backend`).
    pub fn new(base_url: &str) -> ClientResult<Self> {
        let mut base = Url::parse(base_url)?;
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }

        Ok(Self {
            http: reqwest::Client::new(),
            base,
            token: None,
            cache: QueryCache::new(),
        })
    }

    /// Attach an admin session token, sent as `Authorization: Bearer`.
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn base_url(&self) -> &Url {
        &self.base
    }

    pub fn cache(&self) -> &QueryCache {
        &self.cache
    }

    fn request(&self, method: Method, path: &str) -> ClientResult<RequestBuilder> {
        let url = self.base.join(path.trim_start_matches('/'))?;
        let builder = self.http.request(method, url);
        Ok(match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        })
    }

    async fn send(builder: RequestBuilder) -> ClientResult<Response> {
        let response = builder.send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let err = ClientError::from_status(status, &body);
        tracing::debug!("API call failed with {}: {}", status, err);
        Err(err)
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> ClientResult<T> {
        response
            .json::<T>()
            .await
            .map_err(|e| ClientError::Decode(e.to_string()))
    }

    pub async fn list_products(&self, filter: &ProductFilter) -> ClientResult<Vec<Product>> {
        let filter = filter.normalized();
        if let Some(products) = self.cache.products(&filter).await {
            return Ok(products);
        }

        let generation = self.cache.generation().await;
        let builder = self.request(Method::GET, routes::PRODUCTS)?.query(&filter);
        let products: Vec<Product> = Self::decode(Self::send(builder).await?).await?;
        self.cache
            .put_products(generation, filter, products.clone())
            .await;
        Ok(products)
    }

    /// `None` when the product does not exist. Counts as a view on the server.
    pub async fn get_product(&self, id: i32) -> ClientResult<Option<Product>> {
        let builder = self.request(Method::GET, &routes::product_path(id))?;
        match Self::send(builder).await {
            Ok(response) => {
                self.cache.invalidate_catalog().await;
                Ok(Some(Self::decode(response).await?))
            }
            Err(ClientError::NotFound(_)) => Ok(None),
            Err(e) => Err(e),
        }
    }

    pub async fn create_product(&self, input: &NewProduct) -> ClientResult<Product> {
        let builder = self.request(Method::POST, routes::PRODUCTS)?.json(input);
        let product = Self::decode(Self::send(builder).await?).await?;
        self.cache.invalidate_catalog().await;
        Ok(product)
    }

    pub async fn update_product(&self, id: i32, patch: &ProductPatch) -> ClientResult<Product> {
        let builder = self
            .request(Method::PATCH, &routes::product_path(id))?
            .json(patch);
        let product = Self::decode(Self::send(builder).await?).await?;
        self.cache.invalidate_catalog().await;
        Ok(product)
    }

    pub async fn increment_view(&self, id: i32) -> ClientResult<()> {
        let builder = self.request(Method::POST, &routes::product_view_path(id))?;
        Self::send(builder).await?;
        self.cache.invalidate_catalog().await;
        Ok(())
    }

    pub async fn delete_product(&self, id: i32) -> ClientResult<()> {
        let builder = self.request(Method::DELETE, &routes::product_path(id))?;
        Self::send(builder).await?;
        self.cache.invalidate_catalog().await;
        Ok(())
    }

    pub async fn create_signup(&self, name: &str, email: &str) -> ClientResult<SignupUser> {
        let builder = self
            .request(Method::POST, routes::STATS_USERS)?
            .json(&json!({ "name": name, "email": email }));
        let user = Self::decode(Self::send(builder).await?).await?;
        self.cache.invalidate_stats().await;
        Ok(user)
    }

    pub async fn admin_stats(&self) -> ClientResult<DashboardStats> {
        if let Some(stats) = self.cache.stats().await {
            return Ok(stats);
        }

        let generation = self.cache.generation().await;
        let builder = self.request(Method::GET, routes::ADMIN_STATS)?;
        let stats: DashboardStats = Self::decode(Self::send(builder).await?).await?;
        self.cache.put_stats(generation, stats.clone()).await;
        Ok(stats)
    }

    /// True when the server answers its health probe with 200.
    pub async fn health(&self) -> ClientResult<bool> {
        let response = self.request(Method::GET, routes::HEALTH)?.send().await?;
        Ok(response.status() == StatusCode::OK)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_base_path_prefix() {
        let client = StorefrontClient::new("http://localhost:3000/backend").unwrap();
        let url = client
            .base_url()
            .join(routes::PRODUCTS.trim_start_matches('/'))
            .unwrap();
        assert_eq!(url.as_str(), "http://localhost:3000/backend/api/products");
    }

    #[test]
    fn rejects_relative_base() {
        assert!(matches!(
            StorefrontClient::new("not a url"),
            Err(ClientError::Url(_))
        ));
    }
}
