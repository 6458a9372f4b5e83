//! `SeaORM` implementation of the `AuthService` trait.

use crate::config::SecurityConfig;
use crate::db::{Store, User};
use crate::services::auth_service::{AuthError, AuthService};
use async_trait::async_trait;

const MIN_PASSWORD_LEN: usize = 8;

pub struct SeaOrmAuthService {
    store: Store,
    security: SecurityConfig,
}

impl SeaOrmAuthService {
    #[must_use]
    pub const fn new(store: Store, security: SecurityConfig) -> Self {
        Self { store, security }
    }

    fn validate_password(password: &str) -> Result<(), AuthError> {
        if password.chars().count() < MIN_PASSWORD_LEN {
            return Err(AuthError::Validation(format!(
                "Password must be at least {MIN_PASSWORD_LEN} characters"
            )));
        }
        Ok(())
    }
}

#[async_trait]
impl AuthService for SeaOrmAuthService {
    async fn login(&self, username: &str, password: &str) -> Result<User, AuthError> {
        let username = username.trim();
        if username.is_empty() || password.is_empty() {
            return Err(AuthError::MissingCredentials);
        }

        self.store
            .verify_user_password(username, password)
            .await?
            .ok_or(AuthError::InvalidCredentials)
    }

    async fn current_user(&self, user_id: i32) -> Result<Option<User>, AuthError> {
        Ok(self.store.get_user_by_id(user_id).await?)
    }

    async fn create_user(&self, username: &str, password: &str) -> Result<User, AuthError> {
        let username = username.trim();
        if username.is_empty() {
            return Err(AuthError::Validation("Username is required".to_string()));
        }
        if username.chars().count() > 50 {
            return Err(AuthError::Validation(
                "Username must be 50 characters or less".to_string(),
            ));
        }
        Self::validate_password(password)?;

        if self.store.get_user_by_username(username).await?.is_some() {
            return Err(AuthError::UserExists(username.to_string()));
        }

        let user = self
            .store
            .create_user(username, password, &self.security)
            .await?;

        tracing::info!("Created user: {}", user.username);
        Ok(user)
    }

    async fn set_password(&self, username: &str, new_password: &str) -> Result<(), AuthError> {
        Self::validate_password(new_password)?;

        if self.store.get_user_by_username(username).await?.is_none() {
            return Err(AuthError::UserNotFound(username.to_string()));
        }

        self.store
            .update_user_password(username, new_password, &self.security)
            .await?;

        tracing::info!("Password changed for user: {username}");
        Ok(())
    }
}
