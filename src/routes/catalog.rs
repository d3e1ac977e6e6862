use axum::{
    extract::{Path, State},
    Extension, Json,
};
use serde::Deserialize;
use std::sync::Arc;

use crate::{
    error::AppResult,
    middleware::RequestContext,
    models::{CatalogItem, ItemId},
    routes::{extract::ApiQuery, first_page, AppState},
    services::Page,
};

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    pub q: Option<String>,
    /// Comma-separated tag names; every one must match
    pub tags: Option<String>,
    #[serde(default = "first_page")]
    pub page: i64,
}

/// Handler for catalog search
pub async fn search(
    State(state): State<Arc<AppState>>,
    ApiQuery(params): ApiQuery<SearchQuery>,
) -> AppResult<Json<Page<CatalogItem>>> {
    let page = state
        .catalog
        .search(params.q.as_deref(), params.tags.as_deref(), params.page)
        .await?;
    Ok(Json(page))
}

/// Handler for a single exercise
///
/// Viewing an exercise counts towards its place in the caller's routine.
pub async fn get_item(
    State(state): State<Arc<AppState>>,
    Extension(context): Extension<RequestContext>,
    Path(id): Path<ItemId>,
) -> AppResult<Json<CatalogItem>> {
    let item = state.catalog.get_item(id).await?;

    if let Some(user_id) = context.user {
        if let Err(e) = state.routines.record_view(user_id, id).await {
            tracing::warn!(
                request_id = %context.request_id,
                item_id = id,
                error = %e,
                "Failed to record routine view"
            );
        }
    }

    Ok(Json(item))
}
