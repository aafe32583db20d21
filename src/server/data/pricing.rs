use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr,
    DeleteResult, EntityTrait, QueryFilter, QueryOrder, QuerySelect,
};

use crate::server::{data::competitor::decode_sum, model::db::PricingDataModel};

/// UTC calendar day of an observation as `YYYY-MM-DD` on both Postgres and SQLite.
const RECORDED_DAY_SQL: &str = "CAST(DATE(recorded_at) AS TEXT)";

/// Observation count and price total for one UTC calendar day.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DailyPriceTotals {
    pub date: NaiveDate,
    pub observations: u64,
    pub price_total: Decimal,
}

pub struct PricingRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> PricingRepository<'a, C> {
    /// Creates a new instance of [`PricingRepository`]
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn create(
        &self,
        competitor_id: i32,
        price: Decimal,
        recorded_at: NaiveDateTime,
    ) -> Result<PricingDataModel, DbErr> {
        let pricing = entity::pricing_data::ActiveModel {
            competitor_id: ActiveValue::Set(competitor_id),
            price: ActiveValue::Set(price),
            recorded_at: ActiveValue::Set(recorded_at),
            ..Default::default()
        };

        pricing.insert(self.db).await
    }

    /// Up to `limit` observations for a competitor, most recent first
    pub async fn get_recent_for_competitor(
        &self,
        competitor_id: i32,
        limit: u64,
    ) -> Result<Vec<PricingDataModel>, DbErr> {
        entity::prelude::PricingData::find()
            .filter(entity::pricing_data::Column::CompetitorId.eq(competitor_id))
            .order_by_desc(entity::pricing_data::Column::RecordedAt)
            .order_by_desc(entity::pricing_data::Column::Id)
            .limit(limit)
            .all(self.db)
            .await
    }

    /// Per-day observation count and price total from `cutoff` on, oldest day first
    ///
    /// Days without observations produce no row.
    pub async fn get_daily_totals_since(
        &self,
        cutoff: NaiveDateTime,
    ) -> Result<Vec<DailyPriceTotals>, DbErr> {
        let rows: Vec<(String, i64, String)> = entity::prelude::PricingData::find()
            .select_only()
            .column_as(Expr::cust(RECORDED_DAY_SQL), "day")
            .column_as(Expr::cust("COUNT(*)"), "observations")
            .column_as(Expr::cust("CAST(SUM(price) AS TEXT)"), "price_total")
            .filter(entity::pricing_data::Column::RecordedAt.gte(cutoff))
            .group_by(Expr::cust(RECORDED_DAY_SQL))
            .order_by_asc(Expr::cust(RECORDED_DAY_SQL))
            .into_tuple()
            .all(self.db)
            .await?;

        rows.into_iter()
            .map(|(day, observations, price_total)| {
                let date = NaiveDate::parse_from_str(&day, "%Y-%m-%d")
                    .map_err(|e| DbErr::Type(format!("Invalid day \"{}\": {}", day, e)))?;

                Ok(DailyPriceTotals {
                    date,
                    observations: u64::try_from(observations).unwrap_or_default(),
                    price_total: decode_sum(&price_total)?,
                })
            })
            .collect()
    }

    /// Deletes every observation of a competitor
    pub async fn delete_for_competitor(&self, competitor_id: i32) -> Result<DeleteResult, DbErr> {
        entity::prelude::PricingData::delete_many()
            .filter(entity::pricing_data::Column::CompetitorId.eq(competitor_id))
            .exec(self.db)
            .await
    }
}
