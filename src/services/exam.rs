// src/services/exam.rs

use validator::Validate;

use crate::{
    db::Store,
    error::AppError,
    models::exam::{CreateExamRequest, Exam},
};

/// All exams, no filtering or pagination.
pub async fn list_exams(store: &dyn Store) -> Result<Vec<Exam>, AppError> {
    store.list_exams().await
}

pub async fn get_exam(store: &dyn Store, id: i64) -> Result<Exam, AppError> {
    store
        .find_exam_by_id(id)
        .await?
        .ok_or(AppError::NotFound("Exam not found".to_string()))
}

pub async fn create_exam(store: &dyn Store, req: CreateExamRequest) -> Result<Exam, AppError> {
    req.validate()?;

    let exam = store.insert_exam(req).await?;
    tracing::info!("exam created: id={}, title={}", exam.id, exam.title);
    Ok(exam)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{db::MemoryStore, services::test_support::exam_request};

    #[tokio::test]
    async fn created_exams_are_listed() {
        let store = MemoryStore::new();
        let created = create_exam(&store, exam_request("Math101")).await.unwrap();

        let exams = list_exams(&store).await.unwrap();
        assert_eq!(exams.len(), 1);
        assert_eq!(exams[0].title, "Math101");
        assert_eq!(get_exam(&store, created.id).await.unwrap().id, created.id);
    }

    #[tokio::test]
    async fn non_positive_duration_is_rejected() {
        let store = MemoryStore::new();
        let mut req = exam_request("Broken");
        req.duration_minutes = 0;

        let err = create_exam(&store, req).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        assert!(list_exams(&store).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn unknown_exam_is_not_found() {
        let store = MemoryStore::new();
        assert!(matches!(get_exam(&store, 7).await, Err(AppError::NotFound(_))));
    }
}
