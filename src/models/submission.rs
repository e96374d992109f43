// src/models/submission.rs

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Represents the 'submissions' table in the database.
/// One student's scored attempt at one exam.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Submission {
    pub id: i64,
    pub user_id: i64,
    pub exam_id: i64,
    pub score: i32,
    pub submitted_at: chrono::DateTime<chrono::Utc>,
}

/// Row to insert into 'submissions'.
#[derive(Debug, Clone)]
pub struct NewSubmission {
    pub user_id: i64,
    pub exam_id: i64,
    pub score: i32,
    pub submitted_at: chrono::DateTime<chrono::Utc>,
}

/// Query parameters of `POST /api/submissions/submit`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitParams {
    pub user_id: i64,
    pub exam_id: i64,
}

/// Response for a freshly scored submission.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionResult {
    #[serde(flatten)]
    pub submission: Submission,
    pub total_questions: usize,
}
