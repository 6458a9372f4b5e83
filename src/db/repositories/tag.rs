use anyhow::{Context, Result};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, Set, SqlErr, TransactionTrait,
};
use tracing::info;

use crate::entities::{prelude::*, study_log_tags, tags};
use crate::models::tag::{MoveDirection, Tag};

/// Result of a reorder request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    Moved,
    /// Already first (up) or last (down) within its type.
    AtBoundary,
    NotFound,
}

pub struct TagRepository {
    conn: DatabaseConnection,
}

impl TagRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn get(&self, id: i32) -> Result<Option<Tag>> {
        let tag = Tags::find_by_id(id).one(&self.conn).await?;
        Ok(tag.map(Tag::from))
    }

    pub async fn count(&self) -> Result<u64> {
        Ok(Tags::find().count(&self.conn).await?)
    }

    pub async fn list_by_type(&self, tag_type: &str) -> Result<Vec<Tag>> {
        let rows = Tags::find()
            .filter(tags::Column::TagType.eq(tag_type))
            .order_by_asc(tags::Column::SortOrder)
            .order_by_asc(tags::Column::Name)
            .all(&self.conn)
            .await?;

        Ok(rows.into_iter().map(Tag::from).collect())
    }

    pub async fn list_all(&self) -> Result<Vec<Tag>> {
        let rows = Tags::find()
            .order_by_asc(tags::Column::TagType)
            .order_by_asc(tags::Column::SortOrder)
            .order_by_asc(tags::Column::Name)
            .all(&self.conn)
            .await?;

        Ok(rows.into_iter().map(Tag::from).collect())
    }

    /// Inserts a tag at the end of its type. Returns `None` when the
    /// (name, `tag_type`) pair already exists.
    pub async fn create(&self, name: &str, tag_type: &str) -> Result<Option<Tag>> {
        let txn = self.conn.begin().await?;

        let existing = Tags::find()
            .filter(tags::Column::Name.eq(name))
            .filter(tags::Column::TagType.eq(tag_type))
            .one(&txn)
            .await?;
        if existing.is_some() {
            return Ok(None);
        }

        let last = Tags::find()
            .filter(tags::Column::TagType.eq(tag_type))
            .order_by_desc(tags::Column::SortOrder)
            .one(&txn)
            .await?;
        let sort_order = last.map_or(1, |t| t.sort_order + 1);

        let inserted = tags::ActiveModel {
            name: Set(name.to_string()),
            tag_type: Set(tag_type.to_string()),
            sort_order: Set(sort_order),
            created_at: Set(chrono::Utc::now().to_rfc3339()),
            ..Default::default()
        }
        .insert(&txn)
        .await;

        let model = match inserted {
            Ok(model) => model,
            Err(e) if is_unique_violation(&e) => return Ok(None),
            Err(e) => return Err(e).context("Failed to insert tag"),
        };

        txn.commit().await?;

        info!(tag_id = model.id, tag_type, sort_order, "Created tag");
        Ok(Some(Tag::from(model)))
    }

    /// Removes the tag and every association pointing at it.
    pub async fn delete(&self, id: i32) -> Result<bool> {
        let txn = self.conn.begin().await?;

        StudyLogTags::delete_many()
            .filter(study_log_tags::Column::TagId.eq(id))
            .exec(&txn)
            .await?;

        let result = Tags::delete_by_id(id).exec(&txn).await?;

        txn.commit().await?;

        let removed = result.rows_affected > 0;
        if removed {
            info!(tag_id = id, "Deleted tag");
        }
        Ok(removed)
    }

    /// Swaps the tag with its neighbour in (`sort_order`, name) order within
    /// its type, then renumbers the type densely so tied orders are healed.
    pub async fn move_tag(&self, id: i32, direction: MoveDirection) -> Result<MoveOutcome> {
        let txn = self.conn.begin().await?;

        let Some(tag) = Tags::find_by_id(id).one(&txn).await? else {
            return Ok(MoveOutcome::NotFound);
        };

        let mut siblings = Tags::find()
            .filter(tags::Column::TagType.eq(tag.tag_type.as_str()))
            .order_by_asc(tags::Column::SortOrder)
            .order_by_asc(tags::Column::Name)
            .all(&txn)
            .await?;

        let Some(pos) = siblings.iter().position(|t| t.id == tag.id) else {
            return Ok(MoveOutcome::NotFound);
        };
        let target = match direction {
            MoveDirection::Up => pos.checked_sub(1),
            MoveDirection::Down => Some(pos + 1).filter(|&p| p < siblings.len()),
        };
        let Some(target) = target else {
            return Ok(MoveOutcome::AtBoundary);
        };

        siblings.swap(pos, target);

        for (index, model) in siblings.into_iter().enumerate() {
            let sort_order = i32::try_from(index + 1).context("Too many tags to order")?;
            if model.sort_order == sort_order {
                continue;
            }
            let mut active: tags::ActiveModel = model.into();
            active.sort_order = Set(sort_order);
            active.update(&txn).await?;
        }

        txn.commit().await?;
        Ok(MoveOutcome::Moved)
    }
}

fn is_unique_violation(err: &DbErr) -> bool {
    matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_)))
}
