use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Files::Table)
                    .col(
                        ColumnDef::new(Files::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Files::StorageKey)
                            .string_len(255)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Files::OriginalFilename)
                            .string_len(255)
                            .not_null(),
                    )
                    .col(ColumnDef::new(Files::FileType).string_len(50).not_null())
                    .col(ColumnDef::new(Files::FileSize).big_integer().not_null())
                    .col(
                        ColumnDef::new(Files::StoragePath)
                            .string_len(500)
                            .not_null(),
                    )
                    .col(ColumnDef::new(Files::PublicUrl).text())
                    .col(ColumnDef::new(Files::TeamId).big_integer())
                    .col(ColumnDef::new(Files::IdeaId).big_integer())
                    .col(
                        ColumnDef::new(Files::CreatedAt)
                            .timestamp()
                            .not_null()
                            .extra("DEFAULT CURRENT_TIMESTAMP".to_string()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Files::Table, Files::TeamId)
                            .to(crate::Teams::Table, crate::Teams::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Files::Table, Files::IdeaId)
                            .to(crate::Ideas::Table, crate::Ideas::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Files::Table).to_owned())
            .await
    }
}

/// Learn more at https://docs.rs/sea-query#iden
#[derive(Iden)]
enum Files {
    Table,
    Id,
    StorageKey,
    OriginalFilename,
    FileType,
    FileSize,
    StoragePath,
    PublicUrl,
    TeamId,
    IdeaId,
    CreatedAt,
}
