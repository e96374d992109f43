// src/models/exam.rs

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// Represents the 'exams' table in the database.
/// A named, timed collection of questions.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Exam {
    pub id: i64,
    pub title: String,
    pub duration_minutes: i32,
    pub start_time: DateTime<Utc>,
}

/// DTO for creating a new exam.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateExamRequest {
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    #[validate(range(min = 1, message = "Duration must be at least one minute."))]
    pub duration_minutes: i32,
    #[serde(deserialize_with = "utc_or_naive")]
    pub start_time: DateTime<Utc>,
}

/// Accepts RFC 3339 timestamps as well as zoneless ones ("2026-11-01T09:00:00"),
/// which are read as UTC.
fn utc_or_naive<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    if let Ok(with_zone) = DateTime::parse_from_rfc3339(&raw) {
        return Ok(with_zone.with_timezone(&Utc));
    }

    NaiveDateTime::parse_from_str(&raw, "%Y-%m-%dT%H:%M:%S")
        .or_else(|_| NaiveDateTime::parse_from_str(&raw, "%Y-%m-%dT%H:%M:%S%.f"))
        .or_else(|_| NaiveDateTime::parse_from_str(&raw, "%Y-%m-%dT%H:%M"))
        .map(|naive| naive.and_utc())
        .map_err(|e| serde::de::Error::custom(format!("invalid startTime '{}': {}", raw, e)))
}
