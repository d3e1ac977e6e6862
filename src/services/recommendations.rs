use chrono::{FixedOffset, Utc};
use serde::Serialize;

use crate::{
    db::ConditionLogStore,
    error::AppResult,
    models::{CatalogItem, ConditionReport, NewLogEntry, UserId},
    services::{catalog::CatalogService, scoring::score},
};

/// Upper bound on recommended items per request
pub const MAX_RECOMMENDATIONS: usize = 3;

pub const REST_MESSAGE: &str =
    "Nothing in the catalog suits how you feel today. Take it easy and rest.";

/// A catalog item together with its affinity score
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ScoredItem {
    #[serde(flatten)]
    pub item: CatalogItem,
    pub score: u32,
}

/// Outcome of a recommendation request
#[derive(Debug, Clone, PartialEq)]
pub enum Recommendation {
    /// One to three items, best first
    Items(Vec<ScoredItem>),
    /// Nothing scored above zero
    Rest,
}

/// Scores the snapshot and keeps the best items.
///
/// Items scoring zero are dropped. The sort is stable, so equal scores keep
/// catalog order.
pub fn select(snapshot: Vec<CatalogItem>, report: &ConditionReport) -> Recommendation {
    let mut scored: Vec<ScoredItem> = snapshot
        .into_iter()
        .map(|item| {
            let score = score(&item, report.fatigue, report.mood, &report.concern);
            ScoredItem { item, score }
        })
        .filter(|scored| scored.score > 0)
        .collect();

    scored.sort_by(|a, b| b.score.cmp(&a.score));
    scored.truncate(MAX_RECOMMENDATIONS);

    if scored.is_empty() {
        Recommendation::Rest
    } else {
        Recommendation::Items(scored)
    }
}

/// Logs the report, then recommends from the current catalog.
///
/// The log entry is written before scoring and stays even when the outcome is
/// a rest suggestion. It is dated by the calendar day at `log_offset`.
pub async fn recommend(
    catalog: &CatalogService,
    logs: &dyn ConditionLogStore,
    user_id: UserId,
    report: ConditionReport,
    log_offset: FixedOffset,
) -> AppResult<Recommendation> {
    let now = Utc::now().with_timezone(&log_offset);
    let entry = NewLogEntry::from_report(user_id, &report, &now);
    let log = logs.append_log(entry).await?;

    let snapshot = catalog.snapshot().await?;
    let catalog_size = snapshot.len();
    let recommendation = select(snapshot, &report);

    match &recommendation {
        Recommendation::Items(items) => tracing::info!(
            user_id = %user_id,
            log_id = log.id,
            fatigue = report.fatigue.get(),
            mood = report.mood.get(),
            catalog_size,
            recommended = items.len(),
            top_score = items.first().map(|s| s.score),
            "Recommendations selected"
        ),
        Recommendation::Rest => tracing::info!(
            user_id = %user_id,
            log_id = log.id,
            fatigue = report.fatigue.get(),
            mood = report.mood.get(),
            catalog_size,
            "No exercise scored above zero, suggesting rest"
        ),
    }

    Ok(recommendation)
}
