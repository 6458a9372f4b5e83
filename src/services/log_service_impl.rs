//! `SeaORM` implementation of the `LogService` trait.

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::db::{StudyLogChanges, Store};
use crate::models::reminder::{ReminderBucket, bucket_logs, review_dates};
use crate::models::study_log::{
    NewStudyLog, Page, SearchFilter, StudyLog, StudyLogUpdate, parse_optional_date,
};
use crate::services::log_service::{LogError, LogService, MAX_TITLE_LEN};

pub struct SeaOrmLogService {
    store: Store,
    page_size: u64,
    recent_limit: u64,
}

impl SeaOrmLogService {
    #[must_use]
    pub const fn new(store: Store, page_size: u64, recent_limit: u64) -> Self {
        Self {
            store,
            page_size,
            recent_limit,
        }
    }
}

fn validate_title(title: Option<&str>) -> Result<String, LogError> {
    let title = title.map(str::trim).unwrap_or_default();
    if title.is_empty() {
        return Err(LogError::TitleRequired);
    }
    if title.chars().count() > MAX_TITLE_LEN {
        return Err(LogError::TitleTooLong);
    }
    Ok(title.to_string())
}

/// Turns raw edit input into repository changes without touching the store.
fn changes_from_update(update: StudyLogUpdate) -> Result<StudyLogChanges, LogError> {
    let title = validate_title(update.title.as_deref())?;

    let date = parse_optional_date(update.date.as_deref()).map_err(|_| {
        LogError::InvalidDate(update.date.as_deref().unwrap_or_default().trim().to_string())
    })?;

    let text = update.text.filter(|t| !t.trim().is_empty());

    Ok(StudyLogChanges {
        date,
        title,
        text,
        tag_ids: update.tag_ids,
    })
}

#[async_trait]
impl LogService for SeaOrmLogService {
    async fn create_log(&self, log: NewStudyLog) -> Result<i32, LogError> {
        if log.text.trim().is_empty() {
            return Err(LogError::TextRequired);
        }
        let title = validate_title(Some(&log.title))?;

        let log = NewStudyLog { title, ..log };
        Ok(self.store.create_study_log(&log).await?)
    }

    async fn get_log(&self, id: i32) -> Result<StudyLog, LogError> {
        self.store
            .get_study_log(id)
            .await?
            .ok_or(LogError::NotFound(id))
    }

    async fn update_log(&self, id: i32, update: StudyLogUpdate) -> Result<(), LogError> {
        let changes = changes_from_update(update)?;

        if self.store.update_study_log(id, changes).await? {
            Ok(())
        } else {
            Err(LogError::NotFound(id))
        }
    }

    async fn delete_log(&self, id: i32) -> Result<(), LogError> {
        if self.store.delete_study_log(id).await? {
            Ok(())
        } else {
            Err(LogError::NotFound(id))
        }
    }

    async fn search(&self, filter: &SearchFilter, page: u64) -> Result<Page<StudyLog>, LogError> {
        Ok(self
            .store
            .search_study_logs(filter, page, self.page_size)
            .await?)
    }

    async fn search_all(&self, filter: &SearchFilter) -> Result<Vec<StudyLog>, LogError> {
        Ok(self.store.search_all_study_logs(filter).await?)
    }

    async fn recent(&self) -> Result<Vec<StudyLog>, LogError> {
        Ok(self.store.recent_study_logs(self.recent_limit).await?)
    }

    async fn reminders(&self, today: NaiveDate) -> Result<Vec<ReminderBucket>, LogError> {
        let dates: Vec<NaiveDate> = review_dates(today).into_iter().map(|(_, d)| d).collect();
        let logs = self.store.study_logs_on(&dates).await?;
        Ok(bucket_logs(today, logs))
    }
}
