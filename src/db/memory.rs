use chrono::Utc;
use std::{collections::BTreeMap, path::Path};
use tokio::sync::RwLock;

use crate::{
    db::store::{CatalogStore, ConditionLogStore, RoutineStore},
    error::{AppError, AppResult},
    models::{
        routine::listing_order, CatalogItem, ItemId, LogEntry, NewLogEntry, RoutineMembership,
        UserId,
    },
};

/// Process-local store used for tests and local development
#[derive(Default)]
pub struct MemoryStore {
    inner: RwLock<MemoryInner>,
}

#[derive(Default)]
struct MemoryInner {
    items: BTreeMap<ItemId, CatalogItem>,
    logs: Vec<LogEntry>,
    routines: Vec<RoutineMembership>,
    next_log_id: i64,
    next_routine_id: i64,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_items(items: impl IntoIterator<Item = CatalogItem>) -> Self {
        Self {
            inner: RwLock::new(MemoryInner {
                items: items.into_iter().map(|item| (item.id, item)).collect(),
                ..MemoryInner::default()
            }),
        }
    }

    /// Loads a JSON array of catalog items
    pub async fn seed_from_file(&self, path: impl AsRef<Path>) -> anyhow::Result<usize> {
        let raw = tokio::fs::read_to_string(path.as_ref()).await?;
        let items: Vec<CatalogItem> = serde_json::from_str(&raw)?;
        let count = items.len();
        self.insert_items(items).await;
        Ok(count)
    }

    pub async fn insert_items(&self, items: impl IntoIterator<Item = CatalogItem>) {
        let mut inner = self.inner.write().await;
        inner
            .items
            .extend(items.into_iter().map(|item| (item.id, item)));
    }

    pub async fn routine_count(&self) -> usize {
        self.inner.read().await.routines.len()
    }

    pub async fn log_count(&self) -> usize {
        self.inner.read().await.logs.len()
    }
}

#[async_trait::async_trait]
impl CatalogStore for MemoryStore {
    async fn catalog_snapshot(&self) -> AppResult<Vec<CatalogItem>> {
        let inner = self.inner.read().await;
        Ok(inner.items.values().cloned().collect())
    }

    async fn get_item(&self, id: ItemId) -> AppResult<Option<CatalogItem>> {
        let inner = self.inner.read().await;
        Ok(inner.items.get(&id).cloned())
    }
}

#[async_trait::async_trait]
impl ConditionLogStore for MemoryStore {
    async fn append_log(&self, entry: NewLogEntry) -> AppResult<LogEntry> {
        let mut inner = self.inner.write().await;
        inner.next_log_id += 1;

        let log = LogEntry {
            id: inner.next_log_id,
            user_id: entry.user_id,
            log_date: entry.log_date,
            fatigue_level: entry.fatigue_level,
            mood_level: entry.mood_level,
            body_concern: entry.body_concern,
            created_at: Utc::now(),
        };
        inner.logs.push(log.clone());

        Ok(log)
    }

    async fn recent_logs(&self, user_id: UserId, limit: usize) -> AppResult<Vec<LogEntry>> {
        let inner = self.inner.read().await;
        let mut logs: Vec<LogEntry> = inner
            .logs
            .iter()
            .filter(|log| log.user_id == user_id)
            .cloned()
            .collect();

        logs.sort_by(|a, b| {
            b.log_date
                .cmp(&a.log_date)
                .then_with(|| b.created_at.cmp(&a.created_at))
                .then_with(|| b.id.cmp(&a.id))
        });
        logs.truncate(limit);

        Ok(logs)
    }
}

#[async_trait::async_trait]
impl RoutineStore for MemoryStore {
    async fn insert_if_absent(
        &self,
        user_id: UserId,
        item_id: ItemId,
    ) -> AppResult<(RoutineMembership, bool)> {
        // Check and insert under one write guard
        let mut inner = self.inner.write().await;

        if !inner.items.contains_key(&item_id) {
            return Err(AppError::NotFound(format!("Exercise {} not found", item_id)));
        }

        if let Some(existing) = inner
            .routines
            .iter()
            .find(|r| r.user_id == user_id && r.item_id == item_id)
        {
            return Ok((existing.clone(), false));
        }

        inner.next_routine_id += 1;
        let membership = RoutineMembership {
            id: inner.next_routine_id,
            user_id,
            item_id,
            added_at: Utc::now(),
            view_count: 0,
        };
        inner.routines.push(membership.clone());

        Ok((membership, true))
    }

    async fn remove(&self, user_id: UserId, item_id: ItemId) -> AppResult<u64> {
        let mut inner = self.inner.write().await;
        let before = inner.routines.len();
        inner
            .routines
            .retain(|r| !(r.user_id == user_id && r.item_id == item_id));
        Ok((before - inner.routines.len()) as u64)
    }

    async fn record_view(&self, user_id: UserId, item_id: ItemId) -> AppResult<()> {
        let mut inner = self.inner.write().await;
        if let Some(membership) = inner
            .routines
            .iter_mut()
            .find(|r| r.user_id == user_id && r.item_id == item_id)
        {
            membership.view_count += 1;
        }
        Ok(())
    }

    async fn list(&self, user_id: UserId, limit: usize) -> AppResult<Vec<RoutineMembership>> {
        let inner = self.inner.read().await;
        let mut routines: Vec<RoutineMembership> = inner
            .routines
            .iter()
            .filter(|r| r.user_id == user_id && inner.items.contains_key(&r.item_id))
            .cloned()
            .collect();

        routines.sort_by(listing_order);
        routines.truncate(limit);

        Ok(routines)
    }
}
