// src/handlers/exam.rs

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
    models::exam::CreateExamRequest,
    services::exam,
};

/// Lists all exams.
pub async fn list_exams(State(store): State<Arc<dyn Store>>) -> Result<impl IntoResponse, AppError> {
    let exams = exam::list_exams(store.as_ref()).await?;

    Ok(Json(exams))
}

/// Retrieves a single exam by ID.
pub async fn get_exam(
    State(store): State<Arc<dyn Store>>,
    AppPath(id): AppPath<i64>,
) -> Result<impl IntoResponse, AppError> {
    let exam = exam::get_exam(store.as_ref(), id).await?;

    Ok(Json(exam))
}

/// Creates a new exam.
pub async fn create_exam(
    State(store): State<Arc<dyn Store>>,
    AppJson(payload): AppJson<CreateExamRequest>,
) -> Result<impl IntoResponse, AppError> {
    let exam = exam::create_exam(store.as_ref(), payload).await?;

    Ok((StatusCode::CREATED, Json(exam)))
}
