use axum::{extract::State, Json};
use std::sync::Arc;

use crate::{
    error::AppResult,
    middleware::CurrentUser,
    models::LogEntry,
    routes::{extract::ApiQuery, AppState, PageQuery},
    services::{history, Page},
};

/// Lists the caller's condition logs, newest first
pub async fn list(
    State(state): State<Arc<AppState>>,
    CurrentUser(user_id): CurrentUser,
    ApiQuery(query): ApiQuery<PageQuery>,
) -> AppResult<Json<Page<LogEntry>>> {
    let page = history::list(state.logs.as_ref(), user_id, query.page).await?;
    Ok(Json(page))
}
