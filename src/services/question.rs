// src/services/question.rs

use validator::Validate;

use crate::{
    db::Store,
    error::AppError,
    models::question::{CreateQuestionRequest, Question},
};

/// Questions owned by `exam_id`, in storage order.
pub async fn list_questions_for_exam(store: &dyn Store, exam_id: i64) -> Result<Vec<Question>, AppError> {
    if store.find_exam_by_id(exam_id).await?.is_none() {
        return Err(AppError::NotFound("Exam not found".to_string()));
    }

    store.list_questions_by_exam(exam_id).await
}

/// Adds a question to an existing exam. The correct answer label is stored uppercase.
pub async fn add_question(store: &dyn Store, mut req: CreateQuestionRequest) -> Result<Question, AppError> {
    req.validate()?;

    if store.find_exam_by_id(req.exam_id).await?.is_none() {
        return Err(AppError::NotFound("Exam not found".to_string()));
    }

    req.correct_answer = req.correct_answer.to_ascii_uppercase();
    let question = store.insert_question(req).await?;
    tracing::info!("question {} added to exam {}", question.id, question.exam_id);
    Ok(question)
}
