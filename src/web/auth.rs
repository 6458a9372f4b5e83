use axum::{
    Form,
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::{Html, IntoResponse, Redirect, Response},
};
use std::sync::Arc;
use tower_sessions::Session;
use tracing::{info, warn};

use super::forms::LoginForm;
use super::messages::Text;
use super::views::auth::{logged_out_page, login_page};
use super::{AppState, WebError};
use crate::db::User;
use crate::services::AuthError;

/// Session key holding the logged-in user's id.
pub const SESSION_USER_KEY: &str = "user_id";

/// The authenticated user, inserted into request extensions by
/// [`require_login`].
#[derive(Debug, Clone)]
pub struct CurrentUser(pub User);

// ============================================================================
// Middleware
// ============================================================================

/// Redirects to `/login` unless the session belongs to an existing user.
pub async fn require_login(
    State(state): State<Arc<AppState>>,
    session: Session,
    mut request: Request,
    next: Next,
) -> Result<Response, WebError> {
    let Some(user_id) = session.get::<i32>(SESSION_USER_KEY).await? else {
        return Ok(Redirect::to("/login").into_response());
    };

    let Some(user) = state.auth_service().current_user(user_id).await? else {
        // Account removed out of band while the session was alive.
        session.flush().await?;
        return Ok(Redirect::to("/login").into_response());
    };

    tracing::Span::current().record("user_id", user.id);
    request.extensions_mut().insert(CurrentUser(user));
    Ok(next.run(request).await)
}

// ============================================================================
// Handlers
// ============================================================================

/// GET /login
pub async fn login_form(State(state): State<Arc<AppState>>) -> Html<String> {
    Html(login_page(state.locale, "", None))
}

/// POST /login
pub async fn login(
    State(state): State<Arc<AppState>>,
    session: Session,
    Form(form): Form<LoginForm>,
) -> Result<Response, WebError> {
    let locale = state.locale;

    match state
        .auth_service()
        .login(&form.username, &form.password)
        .await
    {
        Ok(user) => {
            session.cycle_id().await?;
            session.insert(SESSION_USER_KEY, user.id).await?;
            info!(user_id = user.id, username = %user.username, "User logged in");
            Ok(Redirect::to("/").into_response())
        }
        Err(AuthError::MissingCredentials) => Ok((
            StatusCode::UNPROCESSABLE_ENTITY,
            Html(login_page(
                locale,
                &form.username,
                Some(locale.text(Text::LoginRequired)),
            )),
        )
            .into_response()),
        Err(AuthError::InvalidCredentials) => {
            warn!(username = %form.username.trim(), "Failed login attempt");
            Ok((
                StatusCode::UNAUTHORIZED,
                Html(login_page(
                    locale,
                    &form.username,
                    Some(locale.text(Text::LoginFailed)),
                )),
            )
                .into_response())
        }
        Err(err) => Err(err.into()),
    }
}

/// GET /logout
pub async fn logout(session: Session) -> Result<Redirect, WebError> {
    session.flush().await?;
    Ok(Redirect::to("/logged_out"))
}

/// GET /logged_out
pub async fn logged_out(State(state): State<Arc<AppState>>) -> Html<String> {
    Html(logged_out_page(state.locale))
}
