use crate::{
    db::ConditionLogStore,
    error::AppResult,
    models::{LogEntry, UserId},
    services::pagination::{paginate, Page, HARD_CAP},
};

/// The user's condition logs, newest first
pub async fn list(
    logs: &dyn ConditionLogStore,
    user_id: UserId,
    page: i64,
) -> AppResult<Page<LogEntry>> {
    let recent = logs.recent_logs(user_id, HARD_CAP).await?;
    Ok(paginate(recent, page)?)
}
