use sea_orm_migration::{prelude::*, schema::*};

use crate::m20260301_000002_competitor::Competitor;

static IDX_PRICING_DATA_COMPETITOR_ID: &str = "idx-pricing_data-competitor_id";
static IDX_PRICING_DATA_RECORDED_AT: &str = "idx-pricing_data-recorded_at";
static FK_PRICING_DATA_COMPETITOR_ID: &str = "fk-pricing_data-competitor_id";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(PricingData::Table)
                    .if_not_exists()
                    .col(pk_auto(PricingData::Id))
                    .col(integer(PricingData::CompetitorId))
                    .col(decimal_len(PricingData::Price, 12, 2))
                    .col(timestamp(PricingData::RecordedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_PRICING_DATA_COMPETITOR_ID)
                    .table(PricingData::Table)
                    .col(PricingData::CompetitorId)
                    .to_owned(),
            )
            .await?;

        // Trend queries scan by time window
        manager
            .create_index(
                Index::create()
                    .name(IDX_PRICING_DATA_RECORDED_AT)
                    .table(PricingData::Table)
                    .col(PricingData::RecordedAt)
                    .to_owned(),
            )
            .await?;

        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name(FK_PRICING_DATA_COMPETITOR_ID)
                    .from_tbl(PricingData::Table)
                    .from_col(PricingData::CompetitorId)
                    .to_tbl(Competitor::Table)
                    .to_col(Competitor::Id)
                    .on_delete(ForeignKeyAction::Cascade)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_foreign_key(
                ForeignKey::drop()
                    .name(FK_PRICING_DATA_COMPETITOR_ID)
                    .table(PricingData::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name(IDX_PRICING_DATA_RECORDED_AT)
                    .table(PricingData::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name(IDX_PRICING_DATA_COMPETITOR_ID)
                    .table(PricingData::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(PricingData::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum PricingData {
    Table,
    Id,
    CompetitorId,
    Price,
    RecordedAt,
}
