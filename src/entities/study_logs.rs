use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "study_logs")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    /// Calendar day the entry belongs to.
    pub date: Date,

    pub title: String,

    #[sea_orm(column_type = "Text")]
    pub text: String,

    pub created_at: String,

    pub updated_at: String,
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

impl Related<super::tags::Entity> for Entity {
    fn to() -> RelationDef {
        super::study_log_tags::Relation::Tag.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::study_log_tags::Relation::StudyLog.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
