use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Users::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Users::Username)
                            .string_len(50)
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Users::PasswordHash).string().not_null())
                    .col(ColumnDef::new(Users::CreatedAt).string().not_null())
                    .col(ColumnDef::new(Users::UpdatedAt).string().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Tags::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Tags::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Tags::Name).string_len(30).not_null())
                    .col(ColumnDef::new(Tags::TagType).string_len(30).not_null())
                    .col(
                        ColumnDef::new(Tags::SortOrder)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(ColumnDef::new(Tags::CreatedAt).string().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_tags_name_type")
                    .table(Tags::Table)
                    .col(Tags::Name)
                    .col(Tags::TagType)
                    .unique()
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(StudyLogs::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(StudyLogs::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(StudyLogs::Date).date().not_null())
                    .col(ColumnDef::new(StudyLogs::Text).text().not_null())
                    .col(ColumnDef::new(StudyLogs::CreatedAt).string().not_null())
                    .col(ColumnDef::new(StudyLogs::UpdatedAt).string().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_study_logs_date")
                    .table(StudyLogs::Table)
                    .col(StudyLogs::Date)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(StudyLogTags::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(StudyLogTags::StudyLogId)
                            .integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(StudyLogTags::TagId).integer().not_null())
                    .primary_key(
                        Index::create()
                            .name("pk_study_log_tags")
                            .col(StudyLogTags::StudyLogId)
                            .col(StudyLogTags::TagId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_study_log_tags_study_log_id")
                            .from(StudyLogTags::Table, StudyLogTags::StudyLogId)
                            .to(StudyLogs::Table, StudyLogs::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_study_log_tags_tag_id")
                            .from(StudyLogTags::Table, StudyLogTags::TagId)
                            .to(Tags::Table, Tags::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(StudyLogTags::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(StudyLogs::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Tags::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Users::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Users {
    Table,
    Id,
    Username,
    PasswordHash,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Tags {
    Table,
    Id,
    Name,
    TagType,
    SortOrder,
    CreatedAt,
}

#[derive(DeriveIden)]
enum StudyLogs {
    Table,
    Id,
    Date,
    Text,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum StudyLogTags {
    Table,
    StudyLogId,
    TagId,
}
