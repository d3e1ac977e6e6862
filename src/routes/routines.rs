use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;

use crate::{
    error::AppResult,
    middleware::CurrentUser,
    models::{ItemId, RoutineEntry},
    routes::{extract::ApiQuery, AppState, PageQuery},
    services::{routines, routines::AddOutcome, Page},
};

/// Adds an exercise to the caller's routine: 201 when new, 200 when already there
pub async fn add(
    State(state): State<Arc<AppState>>,
    CurrentUser(user_id): CurrentUser,
    Path(exercise_id): Path<ItemId>,
) -> AppResult<(StatusCode, Json<AddOutcome>)> {
    let outcome =
        routines::add(&state.catalog, state.routines.as_ref(), user_id, exercise_id).await?;

    let status = if outcome.created {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };

    Ok((status, Json(outcome)))
}

/// Removes an exercise from the caller's routine
pub async fn remove(
    State(state): State<Arc<AppState>>,
    CurrentUser(user_id): CurrentUser,
    Path(exercise_id): Path<ItemId>,
) -> AppResult<StatusCode> {
    routines::remove(&state.catalog, state.routines.as_ref(), user_id, exercise_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Lists the caller's routine
pub async fn list(
    State(state): State<Arc<AppState>>,
    CurrentUser(user_id): CurrentUser,
    ApiQuery(query): ApiQuery<PageQuery>,
) -> AppResult<Json<Page<RoutineEntry>>> {
    let page = routines::list(&state.catalog, state.routines.as_ref(), user_id, query.page).await?;
    Ok(Json(page))
}
