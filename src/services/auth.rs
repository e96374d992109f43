// src/services/auth.rs

use validator::Validate;

use crate::{
    db::Store,
    error::AppError,
    models::user::{LoginRequest, NewUser, RegisterRequest, Role, User},
    utils::hash::{hash_password, verify_password},
};

pub const LOGIN_SUCCESS: &str = "Login successful";
pub const INVALID_CREDENTIALS: &str = "Invalid credentials";

/// Registers a new user.
///
/// Usernames are unique: a second registration with a taken name fails
/// with `AppError::Conflict`.
pub async fn register(store: &dyn Store, req: RegisterRequest) -> Result<User, AppError> {
    req.validate()?;

    let user = store
        .insert_user(NewUser {
            username: req.username,
            password: hash_password(&req.password)?,
            role: req.role,
        })
        .await?;

    tracing::info!("user registered: id={}, username={}, role={}", user.id, user.username, user.role);
    Ok(user)
}

/// Stateless credential check. No session or token is issued.
pub async fn login(store: &dyn Store, req: LoginRequest) -> Result<User, AppError> {
    if req.validate().is_err() {
        return Err(AppError::AuthenticationFailed(INVALID_CREDENTIALS.to_string()));
    }

    let user = store
        .find_user_by_username(&req.username)
        .await?
        .ok_or_else(|| AppError::AuthenticationFailed(INVALID_CREDENTIALS.to_string()))?;

    if !verify_password(&req.password, &user.password)? {
        tracing::debug!("rejected login for {}", user.username);
        return Err(AppError::AuthenticationFailed(INVALID_CREDENTIALS.to_string()));
    }

    Ok(user)
}

/// Creates the configured admin account unless the username already exists.
pub async fn seed_admin(store: &dyn Store, username: &str, password: &str) -> Result<(), AppError> {
    if store.find_user_by_username(username).await?.is_some() {
        return Ok(());
    }

    tracing::info!("Seeding admin user: {}", username);
    store
        .insert_user(NewUser {
            username: username.to_string(),
            password: hash_password(password)?,
            role: Role::Admin,
        })
        .await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::MemoryStore;

    fn register_req(username: &str, password: &str) -> RegisterRequest {
        RegisterRequest {
            username: username.to_string(),
            password: password.to_string(),
            role: Role::Student,
        }
    }

    fn login_req(username: &str, password: &str) -> LoginRequest {
        LoginRequest {
            username: username.to_string(),
            password: password.to_string(),
        }
    }

    #[tokio::test]
    async fn register_then_login_succeeds() {
        let store = MemoryStore::new();
        let user = register(&store, register_req("alice", "wonderland")).await.unwrap();
        assert_eq!(user.id, 1);
        assert_ne!(user.password, "wonderland");

        let logged_in = login(&store, login_req("alice", "wonderland")).await.unwrap();
        assert_eq!(logged_in.id, user.id);
    }

    #[tokio::test]
    async fn wrong_password_or_unknown_user_fails() {
        let store = MemoryStore::new();
        register(&store, register_req("alice", "wonderland")).await.unwrap();

        for (username, password) in [("alice", "Wonderland"), ("bob", "wonderland")] {
            let err = login(&store, login_req(username, password)).await.unwrap_err();
            assert!(matches!(err, AppError::AuthenticationFailed(ref m) if m == INVALID_CREDENTIALS));
        }
    }

    #[tokio::test]
    async fn second_registration_of_same_username_is_rejected() {
        let store = MemoryStore::new();
        register(&store, register_req("alice", "first-pass")).await.unwrap();

        let err = register(&store, register_req("alice", "second-pass"))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));

        // The original account still logs in.
        assert!(login(&store, login_req("alice", "first-pass")).await.is_ok());
        assert!(login(&store, login_req("alice", "second-pass")).await.is_err());
    }

    #[tokio::test]
    async fn short_username_fails_validation() {
        let store = MemoryStore::new();
        let err = register(&store, register_req("yo", "password")).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn seed_admin_is_idempotent() {
        let store = MemoryStore::new();
        seed_admin(&store, "root", "toor").await.unwrap();
        seed_admin(&store, "root", "other").await.unwrap();

        let admin = store.find_user_by_username("root").await.unwrap().unwrap();
        assert_eq!(admin.role, Role::Admin);
        assert!(login(&store, login_req("root", "toor")).await.is_ok());
    }
}
