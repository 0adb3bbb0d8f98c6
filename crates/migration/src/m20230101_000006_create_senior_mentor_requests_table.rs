use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(SeniorMentorRequests::Table)
                    .col(
                        ColumnDef::new(SeniorMentorRequests::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(SeniorMentorRequests::TeamId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(SeniorMentorRequests::MentorId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(SeniorMentorRequests::Status)
                            .string_len(20)
                            .not_null(),
                    )
                    .col(ColumnDef::new(SeniorMentorRequests::Message).text())
                    .col(
                        ColumnDef::new(SeniorMentorRequests::CreatedAt)
                            .timestamp()
                            .not_null()
                            .extra("DEFAULT CURRENT_TIMESTAMP".to_string()),
                    )
                    .index(
                        Index::create()
                            .name("team_id_mentor_id_senior_mentor_requests_idx")
                            .col(SeniorMentorRequests::TeamId)
                            .col(SeniorMentorRequests::MentorId)
                            .unique(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(SeniorMentorRequests::Table, SeniorMentorRequests::TeamId)
                            .to(crate::Teams::Table, crate::Teams::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(SeniorMentorRequests::Table, SeniorMentorRequests::MentorId)
                            .to(crate::Mentors::Table, crate::Mentors::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(SeniorMentorRequests::Table).to_owned())
            .await
    }
}

/// Learn more at https://docs.rs/sea-query#iden
#[derive(Iden)]
enum SeniorMentorRequests {
    Table,
    Id,
    TeamId,
    MentorId,
    Status,
    Message,
    CreatedAt,
}
