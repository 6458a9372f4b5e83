use axum::{
    Extension, Form,
    extract::{Path, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
};
use chrono::Local;
use std::sync::Arc;
use tracing::info;

use super::auth::CurrentUser;
use super::forms::{FormFields, LogForm};
use super::views::logs::{IndexView, edit_page, index_page};
use super::{AppState, WebError};

async fn render_index(
    state: &AppState,
    user: &CurrentUser,
    form: &LogForm,
    error: Option<&str>,
) -> Result<String, WebError> {
    let today = Local::now().date_naive();
    let groups = state.tag_service().list_grouped().await?;
    let reminders = state.log_service().reminders(today).await?;
    let recent = state.log_service().recent().await?;

    Ok(index_page(
        state.locale,
        &IndexView {
            username: &user.0.username,
            groups: &groups,
            reminders: &reminders,
            recent: &recent,
            form,
            error,
        },
    ))
}

/// GET /
pub async fn index(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<CurrentUser>,
) -> Result<Html<String>, WebError> {
    let html = render_index(&state, &user, &LogForm::default(), None).await?;
    Ok(Html(html))
}

/// POST /
pub async fn create(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<CurrentUser>,
    Form(fields): Form<FormFields>,
) -> Result<Response, WebError> {
    let form = LogForm::from_fields(&fields);
    let today = Local::now().date_naive();

    match state.log_service().create_log(form.to_new_log(today)).await {
        Ok(id) => {
            info!(log_id = id, "Study log created");
            Ok(Redirect::to("/").into_response())
        }
        Err(err) => {
            let Some(message) = state.locale.log_error(&err) else {
                return Err(err.into());
            };
            let html = render_index(&state, &user, &form, Some(message)).await?;
            Ok((StatusCode::UNPROCESSABLE_ENTITY, Html(html)).into_response())
        }
    }
}

/// GET /edit/{id}
pub async fn edit(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<i32>,
) -> Result<Html<String>, WebError> {
    let log = state.log_service().get_log(id).await?;
    let groups = state.tag_service().list_grouped().await?;

    Ok(Html(edit_page(
        state.locale,
        &user.0.username,
        id,
        &LogForm::from_log(&log),
        &groups,
        None,
    )))
}

/// POST /update/{id}
pub async fn update(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<i32>,
    Form(fields): Form<FormFields>,
) -> Result<Response, WebError> {
    let form = LogForm::from_fields(&fields);

    match state.log_service().update_log(id, form.to_update()).await {
        Ok(()) => {
            info!(log_id = id, "Study log updated");
            Ok(Redirect::to("/search").into_response())
        }
        Err(err) => {
            let Some(message) = state.locale.log_error(&err) else {
                return Err(err.into());
            };
            // Validation runs before the lookup, so make sure the log exists
            // before offering the form again.
            state.log_service().get_log(id).await?;
            let groups = state.tag_service().list_grouped().await?;
            let html = edit_page(
                state.locale,
                &user.0.username,
                id,
                &form,
                &groups,
                Some(message),
            );
            Ok((StatusCode::UNPROCESSABLE_ENTITY, Html(html)).into_response())
        }
    }
}

/// POST /delete/{id}
pub async fn delete(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<Redirect, WebError> {
    state.log_service().delete_log(id).await?;
    info!(log_id = id, "Study log deleted");
    Ok(Redirect::to("/search"))
}
