// src/handlers/submission.rs

use std::sync::Arc;

use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
};

use crate::{
    db::Store,
    error::AppError,
    extractors::{AppJson, AppPath, AppQuery},
    models::submission::SubmitParams,
    services::submission,
};

/// Submits a student's answers for an exam and returns the scored submission.
///
/// * `userId` and `examId` come from the query string.
/// * The body is the ordered list of answer labels, one per question.
pub async fn submit_exam(
    State(store): State<Arc<dyn Store>>,
    AppQuery(params): AppQuery<SubmitParams>,
    AppJson(answers): AppJson<Vec<String>>,
) -> Result<impl IntoResponse, AppError> {
    let result =
        submission::submit(store.as_ref(), params.user_id, params.exam_id, answers).await?;

    Ok((StatusCode::CREATED, Json(result)))
}

/// Lists every submission of one student.
pub async fn results_for_student(
    State(store): State<Arc<dyn Store>>,
    AppPath(user_id): AppPath<i64>,
) -> Result<impl IntoResponse, AppError> {
    let results = submission::results_for_student(store.as_ref(), user_id).await?;

    Ok(Json(results))
}
