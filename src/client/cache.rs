use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;

use crate::schema::{DashboardStats, Product, ProductFilter};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum QueryKey {
    ProductList(ProductFilter),
    AdminStats,
}

#[derive(Debug, Clone)]
enum Cached {
    Products(Vec<Product>),
    Stats(DashboardStats),
}

#[derive(Debug, Default)]
struct Entries {
    map: HashMap<QueryKey, Cached>,
    /// Bumped by every invalidation.
    generation: u64,
}

/// Read-through cache for list and dashboard queries, shared by clones of a
/// client. Entries live until a mutation invalidates them.
///
/// Writers pass the generation observed before their fetch; a put is dropped
/// if an invalidation happened while the fetch was in flight.
#[derive(Debug, Clone, Default)]
pub struct QueryCache {
    entries: Arc<RwLock<Entries>>,
}

impl QueryCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn generation(&self) -> u64 {
        self.entries.read().await.generation
    }

    pub async fn products(&self, filter: &ProductFilter) -> Option<Vec<Product>> {
        let entries = self.entries.read().await;
        match entries.map.get(&QueryKey::ProductList(filter.clone())) {
            Some(Cached::Products(products)) => Some(products.clone()),
            _ => None,
        }
    }

    /// Returns false when the entry was stale and not stored.
    pub async fn put_products(
        &self,
        generation: u64,
        filter: ProductFilter,
        products: Vec<Product>,
    ) -> bool {
        self.put(generation, QueryKey::ProductList(filter), Cached::Products(products))
            .await
    }

    pub async fn stats(&self) -> Option<DashboardStats> {
        match self.entries.read().await.map.get(&QueryKey::AdminStats) {
            Some(Cached::Stats(stats)) => Some(stats.clone()),
            _ => None,
        }
    }

    pub async fn put_stats(&self, generation: u64, stats: DashboardStats) -> bool {
        self.put(generation, QueryKey::AdminStats, Cached::Stats(stats))
            .await
    }

    async fn put(&self, generation: u64, key: QueryKey, value: Cached) -> bool {
        let mut entries = self.entries.write().await;
        if entries.generation != generation {
            tracing::debug!("Dropped stale cache fill for {:?}", key);
            return false;
        }
        entries.map.insert(key, value);
        true
    }

    pub async fn contains(&self, key: &QueryKey) -> bool {
        self.entries.read().await.map.contains_key(key)
    }

    /// Drop every product list and the dashboard aggregate.
    pub async fn invalidate_catalog(&self) {
        let mut entries = self.entries.write().await;
        entries.generation += 1;
        let before = entries.map.len();
        entries
            .map
            .retain(|key, _| !matches!(key, QueryKey::ProductList(_) | QueryKey::AdminStats));
        tracing::debug!("Invalidated {} cached queries", before - entries.map.len());
    }

    /// Signups only move the dashboard totals.
    pub async fn invalidate_stats(&self) {
        let mut entries = self.entries.write().await;
        entries.generation += 1;
        entries.map.remove(&QueryKey::AdminStats);
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.map.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.map.is_empty()
    }
}
