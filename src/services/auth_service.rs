//! Domain service for authentication and user management.
//!
//! Handles credential checks for the login form, session user lookup and the
//! out-of-band account commands.

use thiserror::Error;

use crate::db::User;

/// Errors specific to authentication operations.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Username or password left blank.
    #[error("Username and password are required")]
    MissingCredentials,

    /// Unknown user or wrong password. Deliberately does not say which.
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("User already exists: {0}")]
    UserExists(String),

    #[error("User not found: {0}")]
    UserNotFound(String),

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<sea_orm::DbErr> for AuthError {
    fn from(err: sea_orm::DbErr) -> Self {
        Self::Database(err.to_string())
    }
}

impl From<anyhow::Error> for AuthError {
    fn from(err: anyhow::Error) -> Self {
        Self::Internal(err.to_string())
    }
}

/// Domain service trait for authentication.
#[async_trait::async_trait]
pub trait AuthService: Send + Sync {
    /// Verifies credentials and returns the user.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::MissingCredentials`] for blank input and
    /// [`AuthError::InvalidCredentials`] for any mismatch.
    async fn login(&self, username: &str, password: &str) -> Result<User, AuthError>;

    /// Resolves the user bound to a session, if it still exists.
    async fn current_user(&self, user_id: i32) -> Result<Option<User>, AuthError>;

    /// Creates an account out of band (CLI).
    async fn create_user(&self, username: &str, password: &str) -> Result<User, AuthError>;

    /// Replaces a user's password without checking the old one (CLI).
    async fn set_password(&self, username: &str, new_password: &str) -> Result<(), AuthError>;
}
