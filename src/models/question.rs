// src/models/question.rs

use serde::{Deserialize, Serialize};
use sqlx::prelude::FromRow;
use validator::Validate;

/// Option labels a correct answer may name.
pub const OPTION_LABELS: [&str; 4] = ["A", "B", "C", "D"];

/// Represents the 'questions' table in the database.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    pub id: i64,

    /// Owning exam.
    pub exam_id: i64,

    /// The text content of the question.
    pub text: String,

    pub option_a: String,
    pub option_b: String,
    pub option_c: String,
    pub option_d: String,

    /// Label of the correct option, always uppercase ("A".."D").
    pub correct_answer: String,
}

/// DTO for creating a new question.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateQuestionRequest {
    pub exam_id: i64,
    #[validate(length(min = 1, max = 1000))]
    pub text: String,
    #[validate(length(min = 1, max = 500))]
    pub option_a: String,
    #[validate(length(min = 1, max = 500))]
    pub option_b: String,
    #[validate(length(min = 1, max = 500))]
    pub option_c: String,
    #[validate(length(min = 1, max = 500))]
    pub option_d: String,
    #[validate(custom(function = validate_option_label))]
    pub correct_answer: String,
}

fn validate_option_label(label: &str) -> Result<(), validator::ValidationError> {
    if OPTION_LABELS
        .iter()
        .any(|known| known.eq_ignore_ascii_case(label))
    {
        Ok(())
    } else {
        Err(validator::ValidationError::new("correct_answer_must_be_a_to_d"))
    }
}
