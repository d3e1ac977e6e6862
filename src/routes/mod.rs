use axum::{
    http::StatusCode,
    middleware,
    routing::{get, post},
    Json, Router,
};
use chrono::{FixedOffset, Offset, Utc};
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{
    db::{Cache, CatalogStore, ConditionLogStore, RoutineStore},
    middleware::{make_span_with_request_context, request_context_middleware},
    services::CatalogService,
};

pub mod catalog;
pub mod extract;
pub mod history;
pub mod recommendations;
pub mod routines;

/// Shared application state
pub struct AppState {
    pub catalog: CatalogService,
    pub logs: Arc<dyn ConditionLogStore>,
    pub routines: Arc<dyn RoutineStore>,
    /// Time zone whose calendar day a condition log is filed under
    pub log_offset: FixedOffset,
}

impl AppState {
    /// Builds the state from one store that backs every collaborator
    pub fn from_store<S>(store: Arc<S>) -> Self
    where
        S: CatalogStore + ConditionLogStore + RoutineStore + 'static,
    {
        Self {
            catalog: CatalogService::new(store.clone()),
            logs: store.clone(),
            routines: store,
            log_offset: Utc.fix(),
        }
    }

    pub fn with_log_offset(mut self, offset: FixedOffset) -> Self {
        self.log_offset = offset;
        self
    }

    pub fn with_cache(mut self, cache: Cache, ttl: u64) -> Self {
        self.catalog = self.catalog.with_cache(cache, ttl);
        self
    }
}

/// Query string shared by paginated endpoints
#[derive(Debug, Deserialize)]
pub struct PageQuery {
    #[serde(default = "first_page")]
    pub page: i64,
}

pub(crate) fn first_page() -> i64 {
    1
}

/// Creates the application router with all routes
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .nest("/api/v1", api_routes())
        .layer(
            ServiceBuilder::new()
                .layer(middleware::from_fn(request_context_middleware))
                .layer(TraceLayer::new_for_http().make_span_with(make_span_with_request_context))
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}

/// API routes under /api/v1
fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/recommendations", post(recommendations::recommend))
        .route("/exercises", get(catalog::search))
        .route("/exercises/:id", get(catalog::get_item))
        .route("/routines", get(routines::list))
        .route(
            "/routines/:exercise_id",
            post(routines::add).delete(routines::remove),
        )
        .route("/history", get(history::list))
}

/// Health check endpoint
async fn health_check() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "status": "healthy" })))
}
