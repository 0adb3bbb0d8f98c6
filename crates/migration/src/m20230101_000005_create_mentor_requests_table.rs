use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(MentorRequests::Table)
                    .col(
                        ColumnDef::new(MentorRequests::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(MentorRequests::TeamId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(MentorRequests::ProfessorId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(MentorRequests::Status)
                            .string_len(20)
                            .not_null(),
                    )
                    .col(ColumnDef::new(MentorRequests::Message).text())
                    .col(
                        ColumnDef::new(MentorRequests::CreatedAt)
                            .timestamp()
                            .not_null()
                            .extra("DEFAULT CURRENT_TIMESTAMP".to_string()),
                    )
                    .index(
                        Index::create()
                            .name("team_id_professor_id_mentor_requests_idx")
                            .col(MentorRequests::TeamId)
                            .col(MentorRequests::ProfessorId)
                            .unique(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(MentorRequests::Table, MentorRequests::TeamId)
                            .to(crate::Teams::Table, crate::Teams::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(MentorRequests::Table, MentorRequests::ProfessorId)
                            .to(crate::Professors::Table, crate::Professors::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(MentorRequests::Table).to_owned())
            .await
    }
}

/// Learn more at https://docs.rs/sea-query#iden
#[derive(Iden)]
enum MentorRequests {
    Table,
    Id,
    TeamId,
    ProfessorId,
    Status,
    Message,
    CreatedAt,
}
