// src/db/postgres.rs

use async_trait::async_trait;
use sqlx::{FromRow, PgPool};

use super::Store;
use crate::{
    error::AppError,
    models::{
        exam::{CreateExamRequest, Exam},
        question::{CreateQuestionRequest, Question},
        submission::{NewSubmission, Submission},
        user::{NewUser, Role, User},
    },
};

/// Postgres-backed store.
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Applies the embedded migrations.
    pub async fn migrate(&self) -> Result<(), AppError> {
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        Ok(())
    }
}

/// Raw 'users' row; `role` is stored as TEXT.
#[derive(FromRow)]
struct UserRow {
    id: i64,
    username: String,
    password: String,
    role: String,
    created_at: chrono::DateTime<chrono::Utc>,
}

impl TryFrom<UserRow> for User {
    type Error = AppError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        let role: Role = row.role.parse().map_err(AppError::InternalServerError)?;
        Ok(User {
            id: row.id,
            username: row.username,
            password: row.password,
            role,
            created_at: row.created_at,
        })
    }
}

/// SQLSTATE 23505.
fn is_unique_violation(err: &sqlx::Error) -> bool {
    err.as_database_error()
        .is_some_and(|db| db.is_unique_violation())
}

/// SQLSTATE 23503.
fn is_foreign_key_violation(err: &sqlx::Error) -> bool {
    err.as_database_error()
        .is_some_and(|db| db.is_foreign_key_violation())
}

#[async_trait]
impl Store for PgStore {
    async fn insert_user(&self, user: NewUser) -> Result<User, AppError> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            INSERT INTO users (username, password, role)
            VALUES ($1, $2, $3)
            RETURNING id, username, password, role, created_at
            "#,
        )
        .bind(&user.username)
        .bind(&user.password)
        .bind(user.role.as_str())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                AppError::Conflict(format!("Username '{}' already exists", user.username))
            } else {
                tracing::error!("Failed to insert user: {:?}", e);
                AppError::from(e)
            }
        })?;

        row.try_into()
    }

    async fn find_user_by_id(&self, id: i64) -> Result<Option<User>, AppError> {
        sqlx::query_as::<_, UserRow>(
            "SELECT id, username, password, role, created_at FROM users WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .map(User::try_from)
        .transpose()
    }

    async fn find_user_by_username(&self, username: &str) -> Result<Option<User>, AppError> {
        sqlx::query_as::<_, UserRow>(
            "SELECT id, username, password, role, created_at FROM users WHERE username = $1",
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?
        .map(User::try_from)
        .transpose()
    }

    async fn list_exams(&self) -> Result<Vec<Exam>, AppError> {
        let exams = sqlx::query_as::<_, Exam>(
            "SELECT id, title, duration_minutes, start_time FROM exams ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(exams)
    }

    async fn insert_exam(&self, exam: CreateExamRequest) -> Result<Exam, AppError> {
        let exam = sqlx::query_as::<_, Exam>(
            r#"
            INSERT INTO exams (title, duration_minutes, start_time)
            VALUES ($1, $2, $3)
            RETURNING id, title, duration_minutes, start_time
            "#,
        )
        .bind(exam.title)
        .bind(exam.duration_minutes)
        .bind(exam.start_time)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to insert exam: {:?}", e);
            AppError::from(e)
        })?;

        Ok(exam)
    }

    async fn find_exam_by_id(&self, id: i64) -> Result<Option<Exam>, AppError> {
        let exam = sqlx::query_as::<_, Exam>(
            "SELECT id, title, duration_minutes, start_time FROM exams WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(exam)
    }

    async fn insert_question(&self, question: CreateQuestionRequest) -> Result<Question, AppError> {
        let question = sqlx::query_as::<_, Question>(
            r#"
            INSERT INTO questions
            (exam_id, text, option_a, option_b, option_c, option_d, correct_answer)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id, exam_id, text, option_a, option_b, option_c, option_d, correct_answer
            "#,
        )
        .bind(question.exam_id)
        .bind(question.text)
        .bind(question.option_a)
        .bind(question.option_b)
        .bind(question.option_c)
        .bind(question.option_d)
        .bind(question.correct_answer)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            // The exam can disappear between the service's lookup and this insert.
            if is_foreign_key_violation(&e) {
                AppError::NotFound("Exam not found".to_string())
            } else {
                tracing::error!("Failed to insert question: {:?}", e);
                AppError::from(e)
            }
        })?;

        Ok(question)
    }

    async fn list_questions_by_exam(&self, exam_id: i64) -> Result<Vec<Question>, AppError> {
        let questions = sqlx::query_as::<_, Question>(
            r#"
            SELECT id, exam_id, text, option_a, option_b, option_c, option_d, correct_answer
            FROM questions
            WHERE exam_id = $1
            ORDER BY id
            "#,
        )
        .bind(exam_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(questions)
    }

    async fn insert_submission(&self, submission: NewSubmission) -> Result<Submission, AppError> {
        let submission = sqlx::query_as::<_, Submission>(
            r#"
            INSERT INTO submissions (user_id, exam_id, score, submitted_at)
            VALUES ($1, $2, $3, $4)
            RETURNING id, user_id, exam_id, score, submitted_at
            "#,
        )
        .bind(submission.user_id)
        .bind(submission.exam_id)
        .bind(submission.score)
        .bind(submission.submitted_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if is_foreign_key_violation(&e) {
                AppError::NotFound("User or exam not found".to_string())
            } else {
                tracing::error!("Failed to insert submission: {:?}", e);
                AppError::from(e)
            }
        })?;

        Ok(submission)
    }

    async fn list_submissions_by_user(&self, user_id: i64) -> Result<Vec<Submission>, AppError> {
        let submissions = sqlx::query_as::<_, Submission>(
            r#"
            SELECT id, user_id, exam_id, score, submitted_at
            FROM submissions
            WHERE user_id = $1
            ORDER BY id
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(submissions)
    }
}
