// src/routes.rs

use axum::{
    Router,
    http::{HeaderValue, Method, header},
    routing::{get, post},
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{
    handlers::{auth, exam, question, submission},
    state::AppState,
};

/// Assembles the main application router.
///
/// * Maps every (method, path) pair to its handler (auth, exams, questions, submissions).
/// * Applies global middleware (Trace, CORS).
/// * Injects global state (the Store).
pub fn create_router(state: AppState) -> Router {
    let origins = [
        HeaderValue::from_static("http://localhost:3000"),
        HeaderValue::from_static("http://127.0.0.1:3000"),
    ];

    let cors = CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE]);

    let auth_routes = Router::new()
        .route("/register", post(auth::register))
        .route("/login", post(auth::login));

    let submission_routes = Router::new()
        .route("/submit", post(submission::submit_exam))
        .route("/student/{user_id}", get(submission::results_for_student));

    Router::new()
        .nest("/api/auth", auth_routes)
        .route("/api/exams", get(exam::list_exams).post(exam::create_exam))
        .route("/api/exams/{id}", get(exam::get_exam))
        .route("/api/questions", post(question::create_question))
        .route("/api/questions/exam/{exam_id}", get(question::list_for_exam))
        .nest("/api/submissions", submission_routes)
        // Global Middleware (applied from outside in)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
