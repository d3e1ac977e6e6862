/// Read-through caching over [`Cache`](crate::db::redis::Cache).
///
/// Returns the cached value for `$key` when present. Otherwise awaits `$fetch`,
/// queues the result for storage with `$ttl` seconds to live and returns it.
/// Must be used inside a function returning `AppResult`.
///
/// ```rust,ignore
/// async fn snapshot(&self) -> AppResult<Vec<CatalogItem>> {
///     cached!(self.cache, CacheKey::CatalogSnapshot, 300, self.store.catalog_snapshot())
/// }
/// ```
#[macro_export]
macro_rules! cached {
    ($cache:expr, $key:expr, $ttl:expr, $fetch:expr) => {{
        let key = $key;
        if let Some(hit) = $cache.get_from_cache(&key).await? {
            tracing::debug!(key = %key, "Cache hit");
            Ok(hit)
        } else {
            tracing::debug!(key = %key, "Cache miss");
            let value = $fetch.await?;
            $cache.set_in_background(&key, &value, $ttl);
            Ok(value)
        }
    }};
}
