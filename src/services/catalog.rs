use std::sync::Arc;

use crate::{
    cached,
    db::{Cache, CacheKey, CatalogStore},
    error::{AppError, AppResult},
    models::{CatalogItem, ItemId},
    services::{
        pagination::{paginate, Page},
        search::search_catalog,
    },
};

/// Catalog reads, optionally fronted by the Redis cache
#[derive(Clone)]
pub struct CatalogService {
    store: Arc<dyn CatalogStore>,
    cache: Option<Cache>,
    cache_ttl: u64,
}

impl CatalogService {
    pub fn new(store: Arc<dyn CatalogStore>) -> Self {
        Self {
            store,
            cache: None,
            cache_ttl: 0,
        }
    }

    pub fn with_cache(mut self, cache: Cache, ttl: u64) -> Self {
        self.cache = Some(cache);
        self.cache_ttl = ttl;
        self
    }

    /// Immutable copy of the whole catalog for one request
    pub async fn snapshot(&self) -> AppResult<Vec<CatalogItem>> {
        match &self.cache {
            Some(cache) => cached!(
                cache,
                CacheKey::CatalogSnapshot,
                self.cache_ttl,
                self.store.catalog_snapshot()
            ),
            None => self.store.catalog_snapshot().await,
        }
    }

    pub async fn get_item(&self, id: ItemId) -> AppResult<CatalogItem> {
        let key = CacheKey::CatalogItem(id);

        if let Some(cache) = &self.cache {
            if let Some(item) = cache.get_from_cache::<CatalogItem>(&key).await? {
                return Ok(item);
            }
        }

        // Misses are not cached so new items show up immediately
        let item = self
            .store
            .get_item(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Exercise {} not found", id)))?;

        if let Some(cache) = &self.cache {
            cache.set_in_background(&key, &item, self.cache_ttl);
        }

        Ok(item)
    }

    /// Keyword-ranked, tag-filtered page of the catalog
    pub async fn search(
        &self,
        keyword: Option<&str>,
        tags: Option<&str>,
        page: i64,
    ) -> AppResult<Page<CatalogItem>> {
        let snapshot = self.snapshot().await?;
        let catalog_size = snapshot.len();

        let matches = search_catalog(snapshot, keyword, tags);

        tracing::info!(
            keyword = keyword.unwrap_or_default(),
            tags = tags.unwrap_or_default(),
            catalog_size,
            matched = matches.len(),
            page,
            "Catalog search"
        );

        Ok(paginate(matches, page)?)
    }
}
