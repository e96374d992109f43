// src/db/mod.rs

//! Storage layer. Services only ever talk to `dyn Store`, so the same code
//! runs against Postgres in production and the in-memory store in tests.

mod memory;
mod postgres;

pub use memory::MemoryStore;
pub use postgres::PgStore;

use async_trait::async_trait;

use crate::{
    error::AppError,
    models::{
        exam::{CreateExamRequest, Exam},
        question::{CreateQuestionRequest, Question},
        submission::{NewSubmission, Submission},
        user::{NewUser, User},
    },
};

/// Repository operations over users, exams, questions and submissions.
///
/// List operations return rows in storage (insertion) order.
#[async_trait]
pub trait Store: Send + Sync {
    /// Fails with `AppError::Conflict` when the username is already taken.
    async fn insert_user(&self, user: NewUser) -> Result<User, AppError>;
    async fn find_user_by_id(&self, id: i64) -> Result<Option<User>, AppError>;
    async fn find_user_by_username(&self, username: &str) -> Result<Option<User>, AppError>;

    async fn list_exams(&self) -> Result<Vec<Exam>, AppError>;
    async fn insert_exam(&self, exam: CreateExamRequest) -> Result<Exam, AppError>;
    async fn find_exam_by_id(&self, id: i64) -> Result<Option<Exam>, AppError>;

    async fn insert_question(&self, question: CreateQuestionRequest) -> Result<Question, AppError>;
    async fn list_questions_by_exam(&self, exam_id: i64) -> Result<Vec<Question>, AppError>;

    async fn insert_submission(&self, submission: NewSubmission) -> Result<Submission, AppError>;
    async fn list_submissions_by_user(&self, user_id: i64) -> Result<Vec<Submission>, AppError>;
}
