// src/db/memory.rs

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::Store;
use crate::{
    error::AppError,
    models::{
        exam::{CreateExamRequest, Exam},
        question::{CreateQuestionRequest, Question},
        submission::{NewSubmission, Submission},
        user::{NewUser, User},
    },
};

#[derive(Default)]
struct Tables {
    users: Vec<User>,
    exams: Vec<Exam>,
    questions: Vec<Question>,
    submissions: Vec<Submission>,
}

/// In-process store. Ids start at 1 and rows keep insertion order.
#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn next_id(len: usize) -> i64 {
    len as i64 + 1
}

#[async_trait]
impl Store for MemoryStore {
    async fn insert_user(&self, user: NewUser) -> Result<User, AppError> {
        let mut tables = self.tables.write().await;
        if tables.users.iter().any(|u| u.username == user.username) {
            return Err(AppError::Conflict(format!(
                "Username '{}' already exists",
                user.username
            )));
        }

        let user = User {
            id: next_id(tables.users.len()),
            username: user.username,
            password: user.password,
            role: user.role,
            created_at: chrono::Utc::now(),
        };
        tables.users.push(user.clone());
        Ok(user)
    }

    async fn find_user_by_id(&self, id: i64) -> Result<Option<User>, AppError> {
        let tables = self.tables.read().await;
        Ok(tables.users.iter().find(|u| u.id == id).cloned())
    }

    async fn find_user_by_username(&self, username: &str) -> Result<Option<User>, AppError> {
        let tables = self.tables.read().await;
        Ok(tables.users.iter().find(|u| u.username == username).cloned())
    }

    async fn list_exams(&self) -> Result<Vec<Exam>, AppError> {
        Ok(self.tables.read().await.exams.clone())
    }

    async fn insert_exam(&self, exam: CreateExamRequest) -> Result<Exam, AppError> {
        let mut tables = self.tables.write().await;
        let exam = Exam {
            id: next_id(tables.exams.len()),
            title: exam.title,
            duration_minutes: exam.duration_minutes,
            start_time: exam.start_time,
        };
        tables.exams.push(exam.clone());
        Ok(exam)
    }

    async fn find_exam_by_id(&self, id: i64) -> Result<Option<Exam>, AppError> {
        let tables = self.tables.read().await;
        Ok(tables.exams.iter().find(|e| e.id == id).cloned())
    }

    async fn insert_question(&self, question: CreateQuestionRequest) -> Result<Question, AppError> {
        let mut tables = self.tables.write().await;
        // Mirrors the foreign key on questions.exam_id.
        if !tables.exams.iter().any(|e| e.id == question.exam_id) {
            return Err(AppError::NotFound("Exam not found".to_string()));
        }

        let question = Question {
            id: next_id(tables.questions.len()),
            exam_id: question.exam_id,
            text: question.text,
            option_a: question.option_a,
            option_b: question.option_b,
            option_c: question.option_c,
            option_d: question.option_d,
            correct_answer: question.correct_answer,
        };
        tables.questions.push(question.clone());
        Ok(question)
    }

    async fn list_questions_by_exam(&self, exam_id: i64) -> Result<Vec<Question>, AppError> {
        let tables = self.tables.read().await;
        Ok(tables
            .questions
            .iter()
            .filter(|q| q.exam_id == exam_id)
            .cloned()
            .collect())
    }

    async fn insert_submission(&self, submission: NewSubmission) -> Result<Submission, AppError> {
        let mut tables = self.tables.write().await;
        let submission = Submission {
            id: next_id(tables.submissions.len()),
            user_id: submission.user_id,
            exam_id: submission.exam_id,
            score: submission.score,
            submitted_at: submission.submitted_at,
        };
        tables.submissions.push(submission.clone());
        Ok(submission)
    }

    async fn list_submissions_by_user(&self, user_id: i64) -> Result<Vec<Submission>, AppError> {
        let tables = self.tables.read().await;
        Ok(tables
            .submissions
            .iter()
            .filter(|s| s.user_id == user_id)
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::user::Role;

    fn exam(title: &str) -> CreateExamRequest {
        CreateExamRequest {
            title: title.to_string(),
            duration_minutes: 60,
            start_time: chrono::Utc::now(),
        }
    }

    fn question(exam_id: i64, text: &str) -> CreateQuestionRequest {
        CreateQuestionRequest {
            exam_id,
            text: text.to_string(),
            option_a: "a".into(),
            option_b: "b".into(),
            option_c: "c".into(),
            option_d: "d".into(),
            correct_answer: "A".into(),
        }
    }

    #[tokio::test]
    async fn ids_are_sequential_per_table() {
        let store = MemoryStore::new();
        let first = store.insert_exam(exam("Math101")).await.unwrap();
        let second = store.insert_exam(exam("Physics")).await.unwrap();
        assert_eq!((first.id, second.id), (1, 2));

        let q = store.insert_question(question(first.id, "q1")).await.unwrap();
        assert_eq!(q.id, 1);
    }

    #[tokio::test]
    async fn duplicate_username_is_a_conflict() {
        let store = MemoryStore::new();
        let new_user = NewUser {
            username: "alice".into(),
            password: "hash".into(),
            role: Role::Student,
        };
        store.insert_user(new_user.clone()).await.unwrap();

        let err = store.insert_user(new_user).await.unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
    }

    #[tokio::test]
    async fn question_requires_existing_exam() {
        let store = MemoryStore::new();
        let err = store.insert_question(question(42, "orphan")).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn questions_are_listed_per_exam_in_insertion_order() {
        let store = MemoryStore::new();
        let math = store.insert_exam(exam("Math101")).await.unwrap();
        let physics = store.insert_exam(exam("Physics")).await.unwrap();

        store.insert_question(question(math.id, "m1")).await.unwrap();
        store.insert_question(question(physics.id, "p1")).await.unwrap();
        store.insert_question(question(math.id, "m2")).await.unwrap();

        let texts: Vec<String> = store
            .list_questions_by_exam(math.id)
            .await
            .unwrap()
            .into_iter()
            .map(|q| q.text)
            .collect();
        assert_eq!(texts, vec!["m1", "m2"]);
    }
}
