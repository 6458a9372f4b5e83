//! `SeaORM` implementation of the `TagService` trait.

use async_trait::async_trait;

use crate::db::{MoveOutcome, Store};
use crate::models::tag::{MoveDirection, Tag, TagGroup, group_by_type};
use crate::services::tag_service::{MAX_TAG_FIELD_LEN, TagError, TagService};

pub struct SeaOrmTagService {
    store: Store,
}

impl SeaOrmTagService {
    #[must_use]
    pub const fn new(store: Store) -> Self {
        Self { store }
    }
}

fn validate_tag(name: &str, tag_type: &str) -> Result<(), TagError> {
    if name.is_empty() {
        return Err(TagError::NameRequired);
    }
    if tag_type.is_empty() {
        return Err(TagError::TypeRequired);
    }
    if name.chars().count() > MAX_TAG_FIELD_LEN || tag_type.chars().count() > MAX_TAG_FIELD_LEN {
        return Err(TagError::TooLong);
    }
    Ok(())
}

#[async_trait]
impl TagService for SeaOrmTagService {
    async fn add_tag(&self, name: &str, tag_type: &str) -> Result<Tag, TagError> {
        let name = name.trim();
        let tag_type = tag_type.trim();
        validate_tag(name, tag_type)?;

        self.store
            .create_tag(name, tag_type)
            .await?
            .ok_or_else(|| TagError::Duplicate {
                name: name.to_string(),
                tag_type: tag_type.to_string(),
            })
    }

    async fn delete_tag(&self, id: i32) -> Result<(), TagError> {
        if self.store.delete_tag(id).await? {
            Ok(())
        } else {
            Err(TagError::NotFound(id))
        }
    }

    async fn move_tag(&self, id: i32, direction: MoveDirection) -> Result<bool, TagError> {
        match self.store.move_tag(id, direction).await? {
            MoveOutcome::Moved => Ok(true),
            MoveOutcome::AtBoundary => Ok(false),
            MoveOutcome::NotFound => Err(TagError::NotFound(id)),
        }
    }

    async fn list_tags(&self, tag_type: &str) -> Result<Vec<Tag>, TagError> {
        Ok(self.store.list_tags_by_type(tag_type).await?)
    }

    async fn list_grouped(&self) -> Result<Vec<TagGroup>, TagError> {
        Ok(group_by_type(self.store.list_tags().await?))
    }
}
