use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(MarketlensUser::Table)
                    .if_not_exists()
                    .col(pk_auto(MarketlensUser::Id))
                    .col(string_uniq(MarketlensUser::Username))
                    .col(string_uniq(MarketlensUser::Email))
                    .col(string(MarketlensUser::PasswordHash))
                    .col(string(MarketlensUser::DisplayName))
                    .col(string_len(MarketlensUser::Role, 16).default("viewer"))
                    .col(boolean(MarketlensUser::IsActive).default(true))
                    .col(boolean(MarketlensUser::PasswordChangeRequired).default(false))
                    .col(timestamp(MarketlensUser::CreatedAt))
                    .col(timestamp_null(MarketlensUser::LastActiveAt))
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(MarketlensUser::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum MarketlensUser {
    Table,
    Id,
    Username,
    Email,
    PasswordHash,
    DisplayName,
    Role,
    IsActive,
    PasswordChangeRequired,
    CreatedAt,
    LastActiveAt,
}
