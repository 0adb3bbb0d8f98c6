use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Meetings::Table)
                    .col(
                        ColumnDef::new(Meetings::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Meetings::Title).string_len(100).not_null())
                    .col(ColumnDef::new(Meetings::Description).text())
                    .col(ColumnDef::new(Meetings::ScheduledAt).timestamp().not_null())
                    .col(ColumnDef::new(Meetings::Status).string_len(20).not_null())
                    .col(ColumnDef::new(Meetings::Feedback).text())
                    .col(ColumnDef::new(Meetings::TeamId).big_integer().not_null())
                    .col(ColumnDef::new(Meetings::ProfessorId).big_integer())
                    .col(ColumnDef::new(Meetings::MentorId).big_integer())
                    .col(
                        ColumnDef::new(Meetings::CreatedAt)
                            .timestamp()
                            .not_null()
                            .extra("DEFAULT CURRENT_TIMESTAMP".to_string()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Meetings::Table, Meetings::TeamId)
                            .to(crate::Teams::Table, crate::Teams::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Meetings::Table, Meetings::ProfessorId)
                            .to(crate::Professors::Table, crate::Professors::Id)
                            .on_delete(ForeignKeyAction::SetNull)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Meetings::Table, Meetings::MentorId)
                            .to(crate::Mentors::Table, crate::Mentors::Id)
                            .on_delete(ForeignKeyAction::SetNull)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Meetings::Table).to_owned())
            .await
    }
}

/// Learn more at https://docs.rs/sea-query#iden
#[derive(Iden)]
enum Meetings {
    Table,
    Id,
    Title,
    Description,
    ScheduledAt,
    Status,
    Feedback,
    TeamId,
    ProfessorId,
    MentorId,
    CreatedAt,
}
