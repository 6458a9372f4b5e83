use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "tags")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub name: String,

    /// Free-form grouping label, e.g. "category" or "subject".
    pub tag_type: String,

    /// Position within `tag_type`. Not unique across types.
    pub sort_order: i32,

    pub created_at: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::study_log_tags::Entity")]
    StudyLogTags,
}

impl Related<super::study_log_tags::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::StudyLogTags.def()
    }
}

impl Related<super::study_logs::Entity> for Entity {
    fn to() -> RelationDef {
        super::study_log_tags::Relation::StudyLog.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::study_log_tags::Relation::Tag.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
