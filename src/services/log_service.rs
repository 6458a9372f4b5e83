//! Domain service for study logs: CRUD, search and forgetting-curve reminders.

use chrono::NaiveDate;
use thiserror::Error;

use crate::models::reminder::ReminderBucket;
use crate::models::study_log::{
    NewStudyLog, Page, SearchFilter, StudyLog, StudyLogUpdate, parse_optional_date,
};

/// Longest accepted title, in characters.
pub const MAX_TITLE_LEN: usize = 100;

#[derive(Debug, Error)]
pub enum LogError {
    #[error("Text is required")]
    TextRequired,

    #[error("Title is required")]
    TitleRequired,

    #[error("Title must be 100 characters or less")]
    TitleTooLong,

    #[error("Invalid date: {0}")]
    InvalidDate(String),

    #[error("Study log not found: {0}")]
    NotFound(i32),

    #[error("Database error: {0}")]
    Database(String),
}

impl From<sea_orm::DbErr> for LogError {
    fn from(err: sea_orm::DbErr) -> Self {
        Self::Database(err.to_string())
    }
}

impl From<anyhow::Error> for LogError {
    fn from(err: anyhow::Error) -> Self {
        Self::Database(err.to_string())
    }
}

/// Builds a [`SearchFilter`] from raw query parameters. Blank values are
/// ignored; the keyword is kept verbatim apart from surrounding whitespace.
pub fn parse_filter(
    date: Option<&str>,
    keyword: Option<&str>,
    tag: Option<&str>,
) -> Result<SearchFilter, LogError> {
    let date = parse_optional_date(date)
        .map_err(|_| LogError::InvalidDate(date.unwrap_or_default().trim().to_string()))?;

    let non_blank = |value: Option<&str>| {
        value
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map(ToString::to_string)
    };

    Ok(SearchFilter {
        date,
        keyword: non_blank(keyword),
        tag: non_blank(tag),
    })
}

#[async_trait::async_trait]
pub trait LogService: Send + Sync {
    /// Validates and stores a new entry, returning its id.
    ///
    /// # Errors
    ///
    /// Returns [`LogError::TextRequired`] or [`LogError::TitleRequired`] for
    /// blank input; nothing is written in that case.
    async fn create_log(&self, log: NewStudyLog) -> Result<i32, LogError>;

    async fn get_log(&self, id: i32) -> Result<StudyLog, LogError>;

    /// Applies an edit. The title must be present; blank date/text keep the
    /// stored value; a tag selection replaces every association.
    async fn update_log(&self, id: i32, update: StudyLogUpdate) -> Result<(), LogError>;

    async fn delete_log(&self, id: i32) -> Result<(), LogError>;

    /// One page of matching logs, newest first. `page` is 1-based.
    async fn search(&self, filter: &SearchFilter, page: u64) -> Result<Page<StudyLog>, LogError>;

    /// Every matching log, newest first.
    async fn search_all(&self, filter: &SearchFilter) -> Result<Vec<StudyLog>, LogError>;

    async fn recent(&self) -> Result<Vec<StudyLog>, LogError>;

    /// Forgetting-curve buckets relative to `today`.
    async fn reminders(&self, today: NaiveDate) -> Result<Vec<ReminderBucket>, LogError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_filter_ignores_blanks() {
        let filter = parse_filter(Some(""), Some("   "), None).unwrap();
        assert_eq!(filter, SearchFilter::default());
    }

    #[test]
    fn test_parse_filter_keeps_keyword_case() {
        let filter = parse_filter(Some("2024-01-05"), Some(" Exam "), Some("Math")).unwrap();
        assert_eq!(filter.date, NaiveDate::from_ymd_opt(2024, 1, 5));
        assert_eq!(filter.keyword.as_deref(), Some("Exam"));
        assert_eq!(filter.tag.as_deref(), Some("Math"));
    }

    #[test]
    fn test_parse_filter_rejects_bad_date() {
        assert!(matches!(
            parse_filter(Some("01/05/2024"), None, None),
            Err(LogError::InvalidDate(raw)) if raw == "01/05/2024"
        ));
    }
}
