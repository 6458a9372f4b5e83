use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Entries written before titles existed keep an empty title.
        manager
            .alter_table(
                Table::alter()
                    .table(StudyLogs::Table)
                    .add_column(
                        ColumnDef::new(StudyLogs::Title)
                            .string_len(100)
                            .not_null()
                            .default(""),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .alter_table(
                Table::alter()
                    .table(StudyLogs::Table)
                    .drop_column(StudyLogs::Title)
                    .to_owned(),
            )
            .await
    }
}

#[derive(DeriveIden)]
enum StudyLogs {
    Table,
    Title,
}
