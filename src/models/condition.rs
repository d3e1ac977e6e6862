use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::UserId;
use crate::error::{AppError, AppResult};

/// A self-reported fatigue or mood level between 1 and 5
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct Level(u8);

impl Level {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 5;

    pub fn get(self) -> u8 {
        self.0
    }

    /// Parses a level from a JSON value, accepting integers and integer strings
    pub fn from_json(field: &str, value: Option<&Value>) -> AppResult<Self> {
        let raw = match value {
            Some(Value::Number(n)) => n.as_i64(),
            Some(Value::String(s)) => s.trim().parse::<i64>().ok(),
            _ => None,
        };

        let raw = raw.ok_or_else(|| {
            AppError::InvalidInput(format!("{} must be an integer between 1 and 5", field))
        })?;

        Level::try_from(raw).map_err(|_| {
            AppError::InvalidInput(format!(
                "{} must be between {} and {}, got {}",
                field,
                Level::MIN,
                Level::MAX,
                raw
            ))
        })
    }
}

impl TryFrom<i64> for Level {
    type Error = String;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        if (Level::MIN as i64..=Level::MAX as i64).contains(&value) {
            Ok(Level(value as u8))
        } else {
            Err(format!("level {} is outside 1..=5", value))
        }
    }
}

impl From<Level> for i64 {
    fn from(level: Level) -> Self {
        level.0 as i64
    }
}

/// Request-scoped user state driving a recommendation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConditionReport {
    pub fatigue: Level,
    pub mood: Level,
    pub concern: String,
}

impl ConditionReport {
    pub fn new(fatigue: Level, mood: Level, concern: impl Into<String>) -> Self {
        Self {
            fatigue,
            mood,
            concern: concern.into().trim().to_string(),
        }
    }

    /// Validates raw request fields. Nothing is written when this fails.
    pub fn parse(
        fatigue: Option<&Value>,
        mood: Option<&Value>,
        concern: Option<&Value>,
    ) -> AppResult<Self> {
        let fatigue = Level::from_json("fatigue_level", fatigue)?;
        let mood = Level::from_json("mood_level", mood)?;
        let concern = match concern {
            None | Some(Value::Null) => "",
            Some(Value::String(s)) => s.as_str(),
            Some(_) => {
                return Err(AppError::InvalidInput(
                    "body_concern must be a string".to_string(),
                ))
            }
        };
        Ok(Self::new(fatigue, mood, concern))
    }
}

/// A condition log row to be appended
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewLogEntry {
    pub user_id: UserId,
    pub log_date: NaiveDate,
    pub fatigue_level: Level,
    pub mood_level: Level,
    pub body_concern: String,
}

impl NewLogEntry {
    /// The log is filed under the calendar day of `now` in its own time zone
    pub fn from_report<Tz: TimeZone>(
        user_id: UserId,
        report: &ConditionReport,
        now: &DateTime<Tz>,
    ) -> Self {
        Self {
            user_id,
            log_date: now.date_naive(),
            fatigue_level: report.fatigue,
            mood_level: report.mood,
            body_concern: report.concern.clone(),
        }
    }
}

/// A persisted condition log
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LogEntry {
    pub id: i64,
    pub user_id: UserId,
    pub log_date: NaiveDate,
    pub fatigue_level: Level,
    pub mood_level: Level,
    pub body_concern: String,
    pub created_at: DateTime<Utc>,
}
