use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::entities::tags;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Tag {
    pub id: i32,
    pub name: String,
    pub tag_type: String,
    pub sort_order: i32,
}

impl From<tags::Model> for Tag {
    fn from(model: tags::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            tag_type: model.tag_type,
            sort_order: model.sort_order,
        }
    }
}

/// All tags of one `tag_type`, already in display order.
#[derive(Debug, Clone, Serialize)]
pub struct TagGroup {
    pub tag_type: String,
    pub tags: Vec<Tag>,
}

/// Groups tags that arrive ordered by (`tag_type`, `sort_order`, `name`).
#[must_use]
pub fn group_by_type(tags: Vec<Tag>) -> Vec<TagGroup> {
    let mut groups: Vec<TagGroup> = Vec::new();

    for tag in tags {
        match groups.last_mut() {
            Some(group) if group.tag_type == tag.tag_type => group.tags.push(tag),
            _ => groups.push(TagGroup {
                tag_type: tag.tag_type.clone(),
                tags: vec![tag],
            }),
        }
    }

    groups
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MoveDirection {
    Up,
    Down,
}

impl MoveDirection {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Up => "up",
            Self::Down => "down",
        }
    }
}

impl fmt::Display for MoveDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MoveDirection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "up" => Ok(Self::Up),
            "down" => Ok(Self::Down),
            other => Err(format!("unknown direction: {other}")),
        }
    }
}
