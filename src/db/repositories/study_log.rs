use std::collections::HashMap;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, ConnectionTrait, DatabaseConnection, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Select, Set, TransactionTrait,
    sea_query::{Expr, Query},
};
use tracing::info;

use crate::entities::{prelude::*, study_log_tags, study_logs, tags};
use crate::models::study_log::{NewStudyLog, Page, SearchFilter, StudyLog};
use crate::models::tag::Tag;

/// Validated field changes for an existing log.
#[derive(Debug, Clone)]
pub struct StudyLogChanges {
    pub date: Option<NaiveDate>,
    pub title: String,
    pub text: Option<String>,
    pub tag_ids: Option<Vec<i32>>,
}

pub struct StudyLogRepository {
    conn: DatabaseConnection,
}

impl StudyLogRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn create(&self, log: &NewStudyLog) -> Result<i32> {
        let txn = self.conn.begin().await?;
        let now = chrono::Utc::now().to_rfc3339();

        let model = study_logs::ActiveModel {
            date: Set(log.date),
            title: Set(log.title.clone()),
            text: Set(log.text.clone()),
            created_at: Set(now.clone()),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&txn)
        .await
        .context("Failed to insert study log")?;

        link_tags(&txn, model.id, &log.tag_ids).await?;

        txn.commit().await?;

        info!(log_id = model.id, date = %log.date, "Created study log");
        Ok(model.id)
    }

    pub async fn get(&self, id: i32) -> Result<Option<StudyLog>> {
        let Some(model) = StudyLogs::find_by_id(id).one(&self.conn).await? else {
            return Ok(None);
        };

        let mut logs = with_tags(&self.conn, vec![model]).await?;
        Ok(logs.pop())
    }

    /// Applies `changes` in one transaction. Returns `false` if the log is gone.
    pub async fn update(&self, id: i32, changes: StudyLogChanges) -> Result<bool> {
        let txn = self.conn.begin().await?;

        let Some(model) = StudyLogs::find_by_id(id).one(&txn).await? else {
            return Ok(false);
        };

        let mut active: study_logs::ActiveModel = model.into();
        if let Some(date) = changes.date {
            active.date = Set(date);
        }
        active.title = Set(changes.title);
        if let Some(text) = changes.text {
            active.text = Set(text);
        }
        active.updated_at = Set(chrono::Utc::now().to_rfc3339());
        active.update(&txn).await?;

        if let Some(tag_ids) = changes.tag_ids {
            StudyLogTags::delete_many()
                .filter(study_log_tags::Column::StudyLogId.eq(id))
                .exec(&txn)
                .await?;
            link_tags(&txn, id, &tag_ids).await?;
        }

        txn.commit().await?;

        info!(log_id = id, "Updated study log");
        Ok(true)
    }

    pub async fn delete(&self, id: i32) -> Result<bool> {
        let txn = self.conn.begin().await?;

        StudyLogTags::delete_many()
            .filter(study_log_tags::Column::StudyLogId.eq(id))
            .exec(&txn)
            .await?;

        let result = StudyLogs::delete_by_id(id).exec(&txn).await?;

        txn.commit().await?;

        let removed = result.rows_affected > 0;
        if removed {
            info!(log_id = id, "Deleted study log");
        }
        Ok(removed)
    }

    pub async fn search(
        &self,
        filter: &SearchFilter,
        page: u64,
        page_size: u64,
    ) -> Result<Page<StudyLog>> {
        let page = page.max(1);
        let paginator = Self::filtered(filter).paginate(&self.conn, page_size.max(1));

        let totals = paginator.num_items_and_pages().await?;
        // Past the last page: skip fetch_page, whose offset math overflows on huge pages.
        let items = if page > totals.number_of_pages {
            Vec::new()
        } else {
            let models = paginator.fetch_page(page - 1).await?;
            with_tags(&self.conn, models).await?
        };

        Ok(Page {
            items,
            page,
            total_pages: totals.number_of_pages,
            total_items: totals.number_of_items,
        })
    }

    pub async fn search_all(&self, filter: &SearchFilter) -> Result<Vec<StudyLog>> {
        let models = Self::filtered(filter).all(&self.conn).await?;
        with_tags(&self.conn, models).await
    }

    pub async fn recent(&self, limit: u64) -> Result<Vec<StudyLog>> {
        let models = StudyLogs::find()
            .order_by_desc(study_logs::Column::Date)
            .order_by_desc(study_logs::Column::Id)
            .limit(limit)
            .all(&self.conn)
            .await?;

        with_tags(&self.conn, models).await
    }

    pub async fn on_dates(&self, dates: &[NaiveDate]) -> Result<Vec<StudyLog>> {
        if dates.is_empty() {
            return Ok(Vec::new());
        }

        let models = StudyLogs::find()
            .filter(study_logs::Column::Date.is_in(dates.iter().copied()))
            .order_by_desc(study_logs::Column::Date)
            .order_by_desc(study_logs::Column::Id)
            .all(&self.conn)
            .await?;

        with_tags(&self.conn, models).await
    }

    fn filtered(filter: &SearchFilter) -> Select<StudyLogs> {
        let mut query = StudyLogs::find();

        if let Some(date) = filter.date {
            query = query.filter(study_logs::Column::Date.eq(date));
        }

        // instr() keeps the match case-sensitive; LIKE would fold ASCII case.
        if let Some(keyword) = &filter.keyword {
            query = query.filter(
                Condition::any()
                    .add(Expr::cust_with_values(
                        r#"instr("study_logs"."title", ?) > 0"#,
                        [keyword.clone()],
                    ))
                    .add(Expr::cust_with_values(
                        r#"instr("study_logs"."text", ?) > 0"#,
                        [keyword.clone()],
                    )),
            );
        }

        if let Some(tag) = &filter.tag {
            let tagged = Query::select()
                .column((StudyLogTags, study_log_tags::Column::StudyLogId))
                .from(StudyLogTags)
                .inner_join(
                    Tags,
                    Expr::col((Tags, tags::Column::Id))
                        .equals((StudyLogTags, study_log_tags::Column::TagId)),
                )
                .and_where(Expr::col((Tags, tags::Column::Name)).eq(tag.as_str()))
                .to_owned();

            query = query.filter(study_logs::Column::Id.in_subquery(tagged));
        }

        query
            .order_by_desc(study_logs::Column::Date)
            .order_by_desc(study_logs::Column::Id)
    }
}

/// Inserts associations for the tag ids that exist; unknown ids are skipped.
async fn link_tags<C: ConnectionTrait>(conn: &C, log_id: i32, tag_ids: &[i32]) -> Result<()> {
    let mut ids = tag_ids.to_vec();
    ids.sort_unstable();
    ids.dedup();

    if ids.is_empty() {
        return Ok(());
    }

    let existing: Vec<i32> = Tags::find()
        .filter(tags::Column::Id.is_in(ids))
        .all(conn)
        .await?
        .into_iter()
        .map(|t| t.id)
        .collect();

    if existing.is_empty() {
        return Ok(());
    }

    let links = existing
        .into_iter()
        .map(|tag_id| study_log_tags::ActiveModel {
            study_log_id: Set(log_id),
            tag_id: Set(tag_id),
        });

    StudyLogTags::insert_many(links)
        .exec_without_returning(conn)
        .await
        .context("Failed to link tags")?;

    Ok(())
}

async fn with_tags<C: ConnectionTrait>(
    conn: &C,
    models: Vec<study_logs::Model>,
) -> Result<Vec<StudyLog>> {
    if models.is_empty() {
        return Ok(Vec::new());
    }

    let ids: Vec<i32> = models.iter().map(|m| m.id).collect();
    let links = StudyLogTags::find()
        .filter(study_log_tags::Column::StudyLogId.is_in(ids))
        .find_also_related(Tags)
        .all(conn)
        .await?;

    let mut by_log: HashMap<i32, Vec<Tag>> = HashMap::new();
    for (link, tag) in links {
        if let Some(tag) = tag {
            by_log
                .entry(link.study_log_id)
                .or_default()
                .push(Tag::from(tag));
        }
    }

    Ok(models
        .into_iter()
        .map(|model| {
            let mut tags = by_log.remove(&model.id).unwrap_or_default();
            tags.sort_by(|a, b| {
                (&a.tag_type, a.sort_order, &a.name).cmp(&(&b.tag_type, b.sort_order, &b.name))
            });

            StudyLog {
                id: model.id,
                date: model.date,
                title: model.title,
                text: model.text,
                tags,
            }
        })
        .collect())
}
