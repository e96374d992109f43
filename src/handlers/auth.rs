// src/handlers/auth.rs

use std::sync::Arc;

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};

use crate::{
    db::Store,
    error::AppError,
    extractors::AppJson,
    models::user::{LoginRequest, RegisterRequest},
    services::auth,
};

/// Registers a new user.
///
/// Returns 201 Created and the user object (excluding password).
/// A taken username yields 409 Conflict.
pub async fn register(
    State(store): State<Arc<dyn Store>>,
    AppJson(payload): AppJson<RegisterRequest>,
) -> Result<impl IntoResponse, AppError> {
    let user = auth::register(store.as_ref(), payload).await?;

    Ok((StatusCode::CREATED, Json(user)))
}

/// Checks credentials. Responds with the plain text "Login successful",
/// or 401 with "Invalid credentials".
pub async fn login(
    State(store): State<Arc<dyn Store>>,
    AppJson(payload): AppJson<LoginRequest>,
) -> Result<impl IntoResponse, AppError> {
    auth::login(store.as_ref(), payload).await?;

    Ok(auth::LOGIN_SUCCESS)
}
