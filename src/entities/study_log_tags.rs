use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "study_log_tags")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub study_log_id: i32,
    #[sea_orm(primary_key, auto_increment = false)]
    pub tag_id: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::study_logs::Entity",
        from = "Column::StudyLogId",
        to = "super::study_logs::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    StudyLog,
    #[sea_orm(
        belongs_to = "super::tags::Entity",
        from = "Column::TagId",
        to = "super::tags::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    Tag,
}

impl Related<super::study_logs::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::StudyLog.def()
    }
}

impl Related<super::tags::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Tag.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
