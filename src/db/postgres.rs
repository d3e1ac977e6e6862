use chrono::{DateTime, NaiveDate, Utc};
use sqlx::{postgres::PgPoolOptions, FromRow, PgPool};
use uuid::Uuid;

use crate::{
    db::store::{CatalogStore, ConditionLogStore, RoutineStore},
    error::{AppError, AppResult},
    models::{
        CatalogItem, Category, ItemId, Level, LogEntry, NewLogEntry, RoutineMembership, UserId,
    },
};

/// Creates a PostgreSQL connection pool
///
/// Establishes a pool of database connections for efficient reuse.
/// The pool automatically manages connection lifecycle and limits.
pub async fn create_pool(database_url: &str) -> anyhow::Result<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(database_url)
        .await?;

    Ok(pool)
}

/// Applies the bundled schema migrations
pub async fn run_migrations(pool: &PgPool) -> anyhow::Result<()> {
    sqlx::migrate!("./migrations").run(pool).await?;
    Ok(())
}

const SELECT_ITEMS: &str = r#"
    SELECT e.id, e.name, e.description, e.beginner_guide, e.category, e.target_area,
           COALESCE(ARRAY_AGG(t.name) FILTER (WHERE t.name IS NOT NULL), ARRAY[]::VARCHAR[]) AS tags
    FROM exercises e
    LEFT JOIN exercise_tags et ON et.exercise_id = e.id
    LEFT JOIN tags t ON t.id = et.tag_id
"#;

#[derive(FromRow)]
struct ItemRow {
    id: i64,
    name: String,
    description: String,
    beginner_guide: String,
    category: String,
    target_area: String,
    tags: Vec<String>,
}

impl From<ItemRow> for CatalogItem {
    fn from(row: ItemRow) -> Self {
        let category = row.category.parse().unwrap_or_else(|e| {
            tracing::warn!(item_id = row.id, error = %e, "Unknown category, treating as other");
            Category::Other
        });

        CatalogItem {
            id: row.id,
            name: row.name,
            description: row.description,
            beginner_guide: row.beginner_guide,
            category,
            target_area: row.target_area,
            tags: row.tags.into_iter().collect(),
        }
    }
}

#[derive(FromRow)]
struct LogRow {
    id: i64,
    user_id: Uuid,
    log_date: NaiveDate,
    fatigue_level: i16,
    mood_level: i16,
    body_concern: String,
    created_at: DateTime<Utc>,
}

impl TryFrom<LogRow> for LogEntry {
    type Error = AppError;

    fn try_from(row: LogRow) -> Result<Self, Self::Error> {
        let level = |raw: i16| {
            Level::try_from(raw as i64)
                .map_err(|e| AppError::Internal(format!("Corrupt condition log {}: {}", row.id, e)))
        };

        Ok(LogEntry {
            id: row.id,
            user_id: UserId(row.user_id),
            log_date: row.log_date,
            fatigue_level: level(row.fatigue_level)?,
            mood_level: level(row.mood_level)?,
            body_concern: row.body_concern.clone(),
            created_at: row.created_at,
        })
    }
}

#[derive(FromRow)]
struct RoutineRow {
    id: i64,
    user_id: Uuid,
    exercise_id: i64,
    added_at: DateTime<Utc>,
    view_count: i32,
}

#[derive(FromRow)]
struct UpsertedRoutineRow {
    #[sqlx(flatten)]
    routine: RoutineRow,
    created: bool,
}

impl From<RoutineRow> for RoutineMembership {
    fn from(row: RoutineRow) -> Self {
        RoutineMembership {
            id: row.id,
            user_id: UserId(row.user_id),
            item_id: row.exercise_id,
            added_at: row.added_at,
            view_count: row.view_count,
        }
    }
}

/// Postgres-backed implementation of every store trait
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl CatalogStore for PgStore {
    async fn catalog_snapshot(&self) -> AppResult<Vec<CatalogItem>> {
        let query = format!("{} GROUP BY e.id ORDER BY e.id", SELECT_ITEMS);
        let rows: Vec<ItemRow> = sqlx::query_as(&query).fetch_all(&self.pool).await?;

        Ok(rows.into_iter().map(CatalogItem::from).collect())
    }

    async fn get_item(&self, id: ItemId) -> AppResult<Option<CatalogItem>> {
        let query = format!("{} WHERE e.id = $1 GROUP BY e.id", SELECT_ITEMS);
        let row: Option<ItemRow> = sqlx::query_as(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(CatalogItem::from))
    }
}

#[async_trait::async_trait]
impl ConditionLogStore for PgStore {
    async fn append_log(&self, entry: NewLogEntry) -> AppResult<LogEntry> {
        let row: LogRow = sqlx::query_as(
            r#"
            INSERT INTO condition_logs (user_id, log_date, fatigue_level, mood_level, body_concern)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, user_id, log_date, fatigue_level, mood_level, body_concern, created_at
            "#,
        )
        .bind(entry.user_id.0)
        .bind(entry.log_date)
        .bind(entry.fatigue_level.get() as i16)
        .bind(entry.mood_level.get() as i16)
        .bind(&entry.body_concern)
        .fetch_one(&self.pool)
        .await?;

        LogEntry::try_from(row)
    }

    async fn recent_logs(&self, user_id: UserId, limit: usize) -> AppResult<Vec<LogEntry>> {
        let rows: Vec<LogRow> = sqlx::query_as(
            r#"
            SELECT id, user_id, log_date, fatigue_level, mood_level, body_concern, created_at
            FROM condition_logs
            WHERE user_id = $1
            ORDER BY log_date DESC, created_at DESC, id DESC
            LIMIT $2
            "#,
        )
        .bind(user_id.0)
        .bind(limit as i64)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(LogEntry::try_from).collect()
    }
}

#[async_trait::async_trait]
impl RoutineStore for PgStore {
    async fn insert_if_absent(
        &self,
        user_id: UserId,
        item_id: ItemId,
    ) -> AppResult<(RoutineMembership, bool)> {
        // The no-op update locks and returns the existing row in the same statement.
        // xmax is 0 only for a freshly inserted tuple.
        let row: UpsertedRoutineRow = sqlx::query_as(
            r#"
            INSERT INTO routines (user_id, exercise_id)
            VALUES ($1, $2)
            ON CONFLICT (user_id, exercise_id) DO UPDATE SET user_id = EXCLUDED.user_id
            RETURNING id, user_id, exercise_id, added_at, view_count, (xmax = 0) AS created
            "#,
        )
        .bind(user_id.0)
        .bind(item_id)
        .fetch_one(&self.pool)
        .await?;

        Ok((row.routine.into(), row.created))
    }

    async fn remove(&self, user_id: UserId, item_id: ItemId) -> AppResult<u64> {
        let result = sqlx::query("DELETE FROM routines WHERE user_id = $1 AND exercise_id = $2")
            .bind(user_id.0)
            .bind(item_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }

    async fn record_view(&self, user_id: UserId, item_id: ItemId) -> AppResult<()> {
        sqlx::query(
            "UPDATE routines SET view_count = view_count + 1 WHERE user_id = $1 AND exercise_id = $2",
        )
        .bind(user_id.0)
        .bind(item_id)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn list(&self, user_id: UserId, limit: usize) -> AppResult<Vec<RoutineMembership>> {
        let rows: Vec<RoutineRow> = sqlx::query_as(
            r#"
            SELECT r.id, r.user_id, r.exercise_id, r.added_at, r.view_count
            FROM routines r
            JOIN exercises e ON e.id = r.exercise_id
            WHERE r.user_id = $1
            ORDER BY r.view_count DESC, r.added_at DESC, r.id DESC
            LIMIT $2
            "#,
        )
        .bind(user_id.0)
        .bind(limit as i64)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(RoutineMembership::from).collect())
    }
}
