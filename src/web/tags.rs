use axum::{
    Extension, Form,
    extract::{Path, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
};
use std::sync::Arc;
use tracing::info;

use super::auth::CurrentUser;
use super::forms::TagForm;
use super::views::tags::tags_page;
use super::{AppState, WebError};
use crate::models::tag::MoveDirection;

/// GET /tags
pub async fn list(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<CurrentUser>,
) -> Result<Html<String>, WebError> {
    let groups = state.tag_service().list_grouped().await?;
    Ok(Html(tags_page(
        state.locale,
        &user.0.username,
        &groups,
        &TagForm::default(),
        None,
    )))
}

/// POST /tags/add
pub async fn add(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<CurrentUser>,
    Form(form): Form<TagForm>,
) -> Result<Response, WebError> {
    match state.tag_service().add_tag(&form.name, &form.tag_type).await {
        Ok(tag) => {
            info!(tag_id = tag.id, name = %tag.name, tag_type = %tag.tag_type, "Tag added");
            Ok(Redirect::to("/tags").into_response())
        }
        Err(err) => {
            let Some(message) = state.locale.tag_error(&err) else {
                return Err(err.into());
            };
            let groups = state.tag_service().list_grouped().await?;
            let html = tags_page(
                state.locale,
                &user.0.username,
                &groups,
                &form,
                Some(message),
            );
            Ok((StatusCode::UNPROCESSABLE_ENTITY, Html(html)).into_response())
        }
    }
}

/// POST /tags/delete/{id}
pub async fn delete(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<Redirect, WebError> {
    state.tag_service().delete_tag(id).await?;
    info!(tag_id = id, "Tag deleted");
    Ok(Redirect::to("/tags"))
}

/// POST /tags/move/{id}/{direction}
pub async fn move_tag(
    State(state): State<Arc<AppState>>,
    Path((id, direction)): Path<(i32, String)>,
) -> Result<Redirect, WebError> {
    let direction: MoveDirection = direction
        .parse()
        .map_err(|_| WebError::not_found("Direction", &direction))?;

    let moved = state.tag_service().move_tag(id, direction).await?;
    if moved {
        info!(tag_id = id, %direction, "Tag moved");
    }
    Ok(Redirect::to("/tags"))
}
