use sea_orm_migration::{prelude::*, schema::*};

use crate::m20260301_000001_marketlens_user::MarketlensUser;

static IDX_COMPETITOR_NAME: &str = "idx-competitor-name";
static IDX_COMPETITOR_CREATED_BY: &str = "idx-competitor-created_by";
static FK_COMPETITOR_CREATED_BY: &str = "fk-competitor-created_by";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Competitor::Table)
                    .if_not_exists()
                    .col(pk_auto(Competitor::Id))
                    .col(string(Competitor::Name))
                    .col(string(Competitor::Category))
                    .col(decimal_len(Competitor::PriceRangeMin, 12, 2))
                    .col(decimal_len(Competitor::PriceRangeMax, 12, 2))
                    .col(decimal_len(Competitor::MarketShare, 5, 2))
                    .col(string_len(Competitor::TrendStatus, 16).default("stable"))
                    .col(integer_null(Competitor::CreatedBy))
                    .col(timestamp(Competitor::CreatedAt))
                    .col(timestamp(Competitor::UpdatedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_COMPETITOR_NAME)
                    .table(Competitor::Table)
                    .col(Competitor::Name)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_COMPETITOR_CREATED_BY)
                    .table(Competitor::Table)
                    .col(Competitor::CreatedBy)
                    .to_owned(),
            )
            .await?;

        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name(FK_COMPETITOR_CREATED_BY)
                    .from_tbl(Competitor::Table)
                    .from_col(Competitor::CreatedBy)
                    .to_tbl(MarketlensUser::Table)
                    .to_col(MarketlensUser::Id)
                    .on_delete(ForeignKeyAction::SetNull)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_foreign_key(
                ForeignKey::drop()
                    .name(FK_COMPETITOR_CREATED_BY)
                    .table(Competitor::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name(IDX_COMPETITOR_CREATED_BY)
                    .table(Competitor::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name(IDX_COMPETITOR_NAME)
                    .table(Competitor::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(Competitor::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum Competitor {
    Table,
    Id,
    Name,
    Category,
    PriceRangeMin,
    PriceRangeMax,
    MarketShare,
    TrendStatus,
    CreatedBy,
    CreatedAt,
    UpdatedAt,
}
