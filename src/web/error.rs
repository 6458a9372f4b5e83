use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use std::fmt;

use super::views;
use crate::services::{AuthError, LogError, TagError};

#[derive(Debug)]
pub enum WebError {
    NotFound(String),

    /// Raised only when no form is available to re-render the message inline.
    Validation(String),

    Unauthorized(String),

    DatabaseError(String),

    InternalError(String),
}

impl fmt::Display for WebError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound(msg) => write!(f, "Not found: {msg}"),
            Self::Validation(msg) => write!(f, "Validation error: {msg}"),
            Self::Unauthorized(msg) => write!(f, "Unauthorized: {msg}"),
            Self::DatabaseError(msg) => write!(f, "Database error: {msg}"),
            Self::InternalError(msg) => write!(f, "Internal error: {msg}"),
        }
    }
}

impl std::error::Error for WebError {}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            Self::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            Self::Validation(msg) => (StatusCode::UNPROCESSABLE_ENTITY, msg.clone()),
            Self::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg.clone()),
            Self::DatabaseError(msg) => {
                tracing::error!("Database error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "A database error occurred".to_string(),
                )
            }
            Self::InternalError(msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An internal error occurred".to_string(),
                )
            }
        };

        (status, Html(views::error_page(status, &message))).into_response()
    }
}

impl WebError {
    pub fn not_found(resource: &str, id: impl fmt::Display) -> Self {
        Self::NotFound(format!("{resource} {id} not found"))
    }
}

impl From<anyhow::Error> for WebError {
    fn from(err: anyhow::Error) -> Self {
        Self::InternalError(err.to_string())
    }
}

impl From<tower_sessions::session::Error> for WebError {
    fn from(err: tower_sessions::session::Error) -> Self {
        Self::InternalError(format!("Session error: {err}"))
    }
}

impl From<LogError> for WebError {
    fn from(err: LogError) -> Self {
        match err {
            LogError::NotFound(id) => Self::not_found("Study log", id),
            LogError::Database(msg) => Self::DatabaseError(msg),
            other => Self::Validation(other.to_string()),
        }
    }
}

impl From<TagError> for WebError {
    fn from(err: TagError) -> Self {
        match err {
            TagError::NotFound(id) => Self::not_found("Tag", id),
            TagError::Database(msg) => Self::DatabaseError(msg),
            other => Self::Validation(other.to_string()),
        }
    }
}

impl From<AuthError> for WebError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::MissingCredentials | AuthError::InvalidCredentials => {
                Self::Unauthorized(err.to_string())
            }
            AuthError::UserNotFound(name) => Self::not_found("User", name),
            AuthError::Database(msg) => Self::DatabaseError(msg),
            AuthError::UserExists(_) | AuthError::Validation(_) => {
                Self::Validation(err.to_string())
            }
            AuthError::Internal(msg) => Self::InternalError(msg),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (WebError::from(LogError::NotFound(3)), StatusCode::NOT_FOUND),
            (
                WebError::from(TagError::NameRequired),
                StatusCode::UNPROCESSABLE_ENTITY,
            ),
            (
                WebError::from(AuthError::InvalidCredentials),
                StatusCode::UNAUTHORIZED,
            ),
            (
                WebError::from(LogError::Database("locked".to_string())),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (err, status) in cases {
            assert_eq!(err.into_response().status(), status);
        }
    }

    #[tokio::test]
    async fn test_database_details_hidden() {
        use http_body_util::BodyExt;

        let err = WebError::DatabaseError("no such table: secret_stuff".to_string());
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = response.into_body().collect().await.unwrap().to_bytes();
        let html = String::from_utf8_lossy(&body);
        assert!(html.contains("A database error occurred"));
        assert!(!html.contains("secret_stuff"));
    }
}
