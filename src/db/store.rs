use crate::{
    error::AppResult,
    models::{CatalogItem, ItemId, LogEntry, NewLogEntry, RoutineMembership, UserId},
};

/// Read access to the exercise catalog
///
/// Implementations materialize each item's tag names so callers never join.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait CatalogStore: Send + Sync {
    /// Every catalog item, ordered by id
    async fn catalog_snapshot(&self) -> AppResult<Vec<CatalogItem>>;

    async fn get_item(&self, id: ItemId) -> AppResult<Option<CatalogItem>>;
}

/// Append-only condition log
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait ConditionLogStore: Send + Sync {
    async fn append_log(&self, entry: NewLogEntry) -> AppResult<LogEntry>;

    /// The user's most recent logs (by date, then creation time), at most `limit`
    async fn recent_logs(&self, user_id: UserId, limit: usize) -> AppResult<Vec<LogEntry>>;
}

/// Per-user routine memberships
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait RoutineStore: Send + Sync {
    /// Inserts the (user, item) pair unless it already exists, atomically.
    ///
    /// Returns the stored membership and whether this call created it.
    async fn insert_if_absent(
        &self,
        user_id: UserId,
        item_id: ItemId,
    ) -> AppResult<(RoutineMembership, bool)>;

    /// Deletes the pair, returning how many rows were removed
    async fn remove(&self, user_id: UserId, item_id: ItemId) -> AppResult<u64>;

    /// Bumps the view counter of an existing membership; no-op when absent
    async fn record_view(&self, user_id: UserId, item_id: ItemId) -> AppResult<()>;

    /// Memberships whose exercise is still in the catalog, ordered by view count
    /// then most recently added, at most `limit`
    async fn list(&self, user_id: UserId, limit: usize) -> AppResult<Vec<RoutineMembership>>;
}
