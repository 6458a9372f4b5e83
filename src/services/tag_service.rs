//! Domain service for tag management.

use thiserror::Error;

use crate::models::tag::{MoveDirection, Tag, TagGroup};

/// Longest accepted tag name or type.
pub const MAX_TAG_FIELD_LEN: usize = 30;

#[derive(Debug, Error)]
pub enum TagError {
    #[error("Tag name is required")]
    NameRequired,

    #[error("Tag type is required")]
    TypeRequired,

    #[error("Tag name and type must be 30 characters or less")]
    TooLong,

    #[error("Tag '{name}' already exists in '{tag_type}'")]
    Duplicate { name: String, tag_type: String },

    #[error("Tag not found: {0}")]
    NotFound(i32),

    #[error("Database error: {0}")]
    Database(String),
}

impl From<sea_orm::DbErr> for TagError {
    fn from(err: sea_orm::DbErr) -> Self {
        Self::Database(err.to_string())
    }
}

impl From<anyhow::Error> for TagError {
    fn from(err: anyhow::Error) -> Self {
        Self::Database(err.to_string())
    }
}

#[async_trait::async_trait]
pub trait TagService: Send + Sync {
    /// Appends a tag to the end of its type.
    ///
    /// # Errors
    ///
    /// Returns [`TagError::Duplicate`] if the (name, type) pair exists.
    async fn add_tag(&self, name: &str, tag_type: &str) -> Result<Tag, TagError>;

    async fn delete_tag(&self, id: i32) -> Result<(), TagError>;

    /// Swaps the tag with its neighbour. `Ok(false)` means it was already at
    /// the edge and nothing changed.
    async fn move_tag(&self, id: i32, direction: MoveDirection) -> Result<bool, TagError>;

    /// Tags of one type ordered by (`sort_order`, name).
    async fn list_tags(&self, tag_type: &str) -> Result<Vec<Tag>, TagError>;

    /// Every type with its ordered tags.
    async fn list_grouped(&self) -> Result<Vec<TagGroup>, TagError>;
}
