use axum::{
    Extension,
    extract::{Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use serde::Deserialize;
use std::sync::Arc;

use super::auth::CurrentUser;
use super::views::search::{SearchParams, SearchView, search_page};
use super::{AppState, WebError};
use crate::services::log_service::parse_filter;

#[derive(Debug, Default, Deserialize)]
pub struct SearchQuery {
    pub date: Option<String>,
    pub keyword: Option<String>,
    pub tag: Option<String>,
    pub page: Option<String>,
}

impl SearchQuery {
    /// 1-based; missing, zero or garbage values select the first page.
    #[must_use]
    pub fn page_number(&self) -> u64 {
        self.page
            .as_deref()
            .and_then(|p| p.trim().parse::<u64>().ok())
            .unwrap_or(1)
            .max(1)
    }

    fn params(&self) -> SearchParams {
        SearchParams {
            date: self.date.clone().unwrap_or_default(),
            keyword: self.keyword.clone().unwrap_or_default(),
            tag: self.tag.clone().unwrap_or_default(),
        }
    }
}

/// GET /search
pub async fn search(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<CurrentUser>,
    Query(query): Query<SearchQuery>,
) -> Result<Response, WebError> {
    let mut tag_names: Vec<String> = state
        .tag_service()
        .list_grouped()
        .await?
        .into_iter()
        .flat_map(|group| group.tags.into_iter().map(|tag| tag.name))
        .collect();
    tag_names.sort();
    tag_names.dedup();

    let params = query.params();

    let filter = match parse_filter(
        query.date.as_deref(),
        query.keyword.as_deref(),
        query.tag.as_deref(),
    ) {
        Ok(filter) => filter,
        Err(err) => {
            let Some(message) = state.locale.log_error(&err) else {
                return Err(err.into());
            };
            let html = search_page(
                state.locale,
                &SearchView {
                    username: &user.0.username,
                    params: &params,
                    tag_names: &tag_names,
                    results: None,
                    error: Some(message),
                },
            );
            return Ok((StatusCode::UNPROCESSABLE_ENTITY, Html(html)).into_response());
        }
    };

    let page = state
        .log_service()
        .search(&filter, query.page_number())
        .await?;

    Ok(Html(search_page(
        state.locale,
        &SearchView {
            username: &user.0.username,
            params: &params,
            tag_names: &tag_names,
            results: Some(&page),
            error: None,
        },
    ))
    .into_response())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_number() {
        let query = |page: Option<&str>| SearchQuery {
            page: page.map(ToString::to_string),
            ..Default::default()
        };
        assert_eq!(query(None).page_number(), 1);
        assert_eq!(query(Some("0")).page_number(), 1);
        assert_eq!(query(Some("abc")).page_number(), 1);
        assert_eq!(query(Some("-2")).page_number(), 1);
        assert_eq!(query(Some("3")).page_number(), 3);
    }
}
