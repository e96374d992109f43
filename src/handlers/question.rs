// src/handlers/question.rs

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
    extractors::{AppJson, AppPath},
    models::question::CreateQuestionRequest,
    services::question,
};

/// Lists the questions of one exam.
pub async fn list_for_exam(
    State(store): State<Arc<dyn Store>>,
    AppPath(exam_id): AppPath<i64>,
) -> Result<impl IntoResponse, AppError> {
    let questions = question::list_questions_for_exam(store.as_ref(), exam_id).await?;

    Ok(Json(questions))
}

/// Adds a question to an existing exam.
pub async fn create_question(
    State(store): State<Arc<dyn Store>>,
    AppJson(payload): AppJson<CreateQuestionRequest>,
) -> Result<impl IntoResponse, AppError> {
    let question = question::add_question(store.as_ref(), payload).await?;

    Ok((StatusCode::CREATED, Json(question)))
}
