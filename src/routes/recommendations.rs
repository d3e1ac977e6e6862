use axum::{extract::State, Extension, Json};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;

use crate::{
    error::AppResult,
    middleware::{CurrentUser, RequestContext},
    models::ConditionReport,
    routes::{extract::ApiJson, AppState},
    services::recommendations::{self, Recommendation, ScoredItem, REST_MESSAGE},
};

/// Fields are taken as raw JSON and validated together, so integer strings from
/// form posts are accepted and a wrong type is reported per field
#[derive(Debug, Deserialize)]
pub struct RecommendationRequest {
    #[serde(default)]
    pub fatigue_level: Option<Value>,
    #[serde(default)]
    pub mood_level: Option<Value>,
    #[serde(default)]
    pub body_concern: Option<Value>,
}

#[derive(Debug, Serialize)]
pub struct RecommendationResponse {
    pub rest_suggestion: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<&'static str>,
    pub items: Vec<ScoredItem>,
}

impl From<Recommendation> for RecommendationResponse {
    fn from(recommendation: Recommendation) -> Self {
        match recommendation {
            Recommendation::Items(items) => Self {
                rest_suggestion: false,
                message: None,
                items,
            },
            Recommendation::Rest => Self {
                rest_suggestion: true,
                message: Some(REST_MESSAGE),
                items: Vec::new(),
            },
        }
    }
}

/// Handler for the recommendations endpoint
pub async fn recommend(
    State(state): State<Arc<AppState>>,
    Extension(context): Extension<RequestContext>,
    CurrentUser(user_id): CurrentUser,
    ApiJson(request): ApiJson<RecommendationRequest>,
) -> AppResult<Json<RecommendationResponse>> {
    let report = ConditionReport::parse(
        request.fatigue_level.as_ref(),
        request.mood_level.as_ref(),
        request.body_concern.as_ref(),
    )
    .inspect_err(|e| {
        tracing::info!(request_id = %context.request_id, error = %e, "Rejected condition report");
    })?;

    let recommendation = recommendations::recommend(
        &state.catalog,
        state.logs.as_ref(),
        user_id,
        report,
        state.log_offset,
    )
    .await?;

    Ok(Json(recommendation.into()))
}
