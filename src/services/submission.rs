// src/services/submission.rs

use crate::{
    db::Store,
    error::AppError,
    models::{
        question::Question,
        submission::{NewSubmission, Submission, SubmissionResult},
    },
};

/// Counts positions where the answer equals the question's correct label,
/// ignoring ASCII case. No partial credit.
///
/// The answer list must line up with the questions one-to-one.
pub fn score_answers(questions: &[Question], answers: &[String]) -> Result<i32, AppError> {
    if answers.len() != questions.len() {
        return Err(AppError::Validation(format!(
            "Expected {} answers, got {}",
            questions.len(),
            answers.len()
        )));
    }

    let correct = questions
        .iter()
        .zip(answers)
        .filter(|(question, answer)| question.correct_answer.eq_ignore_ascii_case(answer))
        .count();

    Ok(correct as i32)
}

/// Scores an attempt and records it.
///
/// Unknown user or exam ids fail with `NotFound` and nothing is stored.
/// Repeated submissions for the same exam each produce a new row.
pub async fn submit(
    store: &dyn Store,
    user_id: i64,
    exam_id: i64,
    answers: Vec<String>,
) -> Result<SubmissionResult, AppError> {
    if store.find_user_by_id(user_id).await?.is_none() {
        tracing::warn!("submission rejected: unknown user {}", user_id);
        return Err(AppError::NotFound("User not found".to_string()));
    }
    if store.find_exam_by_id(exam_id).await?.is_none() {
        tracing::warn!("submission rejected: unknown exam {}", exam_id);
        return Err(AppError::NotFound("Exam not found".to_string()));
    }

    let questions = store.list_questions_by_exam(exam_id).await?;
    let score = score_answers(&questions, &answers).inspect_err(|e| {
        tracing::warn!("submission rejected for user {} on exam {}: {}", user_id, exam_id, e);
    })?;

    let submission = store
        .insert_submission(NewSubmission {
            user_id,
            exam_id,
            score,
            submitted_at: chrono::Utc::now(),
        })
        .await?;

    tracing::info!(
        "submission scored: id={}, user={}, exam={}, score={}/{}",
        submission.id,
        user_id,
        exam_id,
        score,
        questions.len()
    );

    Ok(SubmissionResult {
        submission,
        total_questions: questions.len(),
    })
}

/// Every submission of one student, in storage order. No aggregation.
pub async fn results_for_student(store: &dyn Store, user_id: i64) -> Result<Vec<Submission>, AppError> {
    if store.find_user_by_id(user_id).await?.is_none() {
        return Err(AppError::NotFound("User not found".to_string()));
    }

    store.list_submissions_by_user(user_id).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        db::MemoryStore,
        models::user::{NewUser, Role},
        services::test_support::seed_exam,
    };

    fn answers(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|a| a.to_string()).collect()
    }

    fn questions(labels: &[&str]) -> Vec<Question> {
        labels
            .iter()
            .enumerate()
            .map(|(i, label)| Question {
                id: i as i64 + 1,
                exam_id: 1,
                text: format!("Q{}", i + 1),
                option_a: "a".into(),
                option_b: "b".into(),
                option_c: "c".into(),
                option_d: "d".into(),
                correct_answer: label.to_string(),
            })
            .collect()
    }

    async fn student(store: &MemoryStore, username: &str) -> i64 {
        store
            .insert_user(NewUser {
                username: username.to_string(),
                password: "hash".into(),
                role: Role::Student,
            })
            .await
            .unwrap()
            .id
    }

    #[test]
    fn mixed_case_answers_score_by_position() {
        let qs = questions(&["A", "B", "C"]);
        assert_eq!(score_answers(&qs, &answers(&["a", "B", "d"])).unwrap(), 2);
    }

    #[test]
    fn all_correct_and_all_wrong() {
        let qs = questions(&["A", "B", "C", "D"]);
        assert_eq!(score_answers(&qs, &answers(&["A", "b", "C", "d"])).unwrap(), 4);
        assert_eq!(score_answers(&qs, &answers(&["B", "C", "D", "A"])).unwrap(), 0);
    }

    #[test]
    fn fixing_one_answer_adds_exactly_one_point() {
        let qs = questions(&["A", "B", "C", "D"]);
        let mut given = answers(&["A", "A", "A", "A"]);
        let before = score_answers(&qs, &given).unwrap();

        given[2] = "c".to_string();
        let after = score_answers(&qs, &given).unwrap();
        assert_eq!(after, before + 1);
    }

    #[test]
    fn answers_are_not_trimmed() {
        let qs = questions(&["A"]);
        assert_eq!(score_answers(&qs, &answers(&[" A"])).unwrap(), 0);
    }

    #[test]
    fn length_mismatch_is_a_validation_error() {
        let qs = questions(&["A", "B", "C"]);
        assert!(matches!(
            score_answers(&qs, &answers(&["A", "B"])),
            Err(AppError::Validation(_))
        ));
        assert!(matches!(
            score_answers(&qs, &answers(&["A", "B", "C", "D"])),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn empty_exam_scores_zero() {
        assert_eq!(score_answers(&[], &[]).unwrap(), 0);
    }

    #[tokio::test]
    async fn submit_persists_scored_submission() {
        let store = MemoryStore::new();
        let user_id = student(&store, "alice").await;
        let exam = seed_exam(&store, "Math101", &["A", "B", "C"]).await;

        let result = submit(&store, user_id, exam.id, answers(&["a", "B", "d"]))
            .await
            .unwrap();
        assert_eq!(result.submission.score, 2);
        assert_eq!(result.total_questions, 3);
        assert_eq!(result.submission.user_id, user_id);
        assert_eq!(result.submission.exam_id, exam.id);

        let stored = results_for_student(&store, user_id).await.unwrap();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].id, result.submission.id);
    }

    #[tokio::test]
    async fn repeated_submissions_create_separate_rows() {
        let store = MemoryStore::new();
        let user_id = student(&store, "alice").await;
        let exam = seed_exam(&store, "Math101", &["A", "B"]).await;

        submit(&store, user_id, exam.id, answers(&["A", "A"])).await.unwrap();
        submit(&store, user_id, exam.id, answers(&["A", "B"])).await.unwrap();

        let scores: Vec<i32> = results_for_student(&store, user_id)
            .await
            .unwrap()
            .iter()
            .map(|s| s.score)
            .collect();
        assert_eq!(scores, vec![1, 2]);
    }

    #[tokio::test]
    async fn unknown_ids_are_rejected_without_storing() {
        let store = MemoryStore::new();
        let user_id = student(&store, "alice").await;
        let exam = seed_exam(&store, "Math101", &["A"]).await;

        let err = submit(&store, 999, exam.id, answers(&["A"])).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));

        let err = submit(&store, user_id, 999, answers(&["A"])).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));

        let err = submit(&store, user_id, exam.id, answers(&[])).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));

        assert!(results_for_student(&store, user_id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn results_only_include_own_submissions() {
        let store = MemoryStore::new();
        let alice = student(&store, "alice").await;
        let bob = student(&store, "bobby").await;
        let exam = seed_exam(&store, "Math101", &["A"]).await;

        submit(&store, alice, exam.id, answers(&["A"])).await.unwrap();
        submit(&store, bob, exam.id, answers(&["B"])).await.unwrap();

        let results = results_for_student(&store, bob).await.unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].score, 0);

        assert!(matches!(
            results_for_student(&store, 404).await,
            Err(AppError::NotFound(_))
        ));
    }
}
