use std::str::FromStr;

use chrono::Utc;
use entity::sea_orm_active_enums::TrendStatus;
use rust_decimal::Decimal;
use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr,
    DeleteResult, EntityTrait, IntoActiveModel, QueryFilter, QueryOrder,
    QuerySelect, UpdateResult,
};

use crate::server::model::db::CompetitorModel;

/// Fully validated values for a competitor row.
#[derive(Debug, Clone, PartialEq)]
pub struct CompetitorValues {
    pub name: String,
    pub category: String,
    pub price_range_min: Decimal,
    pub price_range_max: Decimal,
    pub market_share: Decimal,
    pub trend_status: TrendStatus,
}

/// Aggregates over the competitors sharing one trend status.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrendTotals {
    pub trend_status: TrendStatus,
    pub competitors: u64,
    /// Sum of `price_range_min + price_range_max`
    pub price_range_total: Decimal,
    pub market_share_total: Decimal,
}

/// Decode a `SUM` read back as text.
///
/// Postgres renders `NUMERIC` exactly while SQLite may render a `REAL` in scientific notation.
pub(crate) fn decode_sum(raw: &str) -> Result<Decimal, DbErr> {
    Decimal::from_str(raw)
        .or_else(|_| Decimal::from_scientific(raw))
        .map_err(|e| DbErr::Type(format!("Invalid aggregate value \"{}\": {}", raw, e)))
}

pub struct CompetitorRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> CompetitorRepository<'a, C> {
    /// Creates a new instance of [`CompetitorRepository`]
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Inserts a competitor owned by `created_by`
    pub async fn create(
        &self,
        values: CompetitorValues,
        created_by: Option<i32>,
    ) -> Result<CompetitorModel, DbErr> {
        let now = Utc::now().naive_utc();

        let competitor = entity::competitor::ActiveModel {
            name: ActiveValue::Set(values.name),
            category: ActiveValue::Set(values.category),
            price_range_min: ActiveValue::Set(values.price_range_min),
            price_range_max: ActiveValue::Set(values.price_range_max),
            market_share: ActiveValue::Set(values.market_share),
            trend_status: ActiveValue::Set(values.trend_status),
            created_by: ActiveValue::Set(created_by),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        };

        competitor.insert(self.db).await
    }

    pub async fn get_by_id(&self, competitor_id: i32) -> Result<Option<CompetitorModel>, DbErr> {
        entity::prelude::Competitor::find_by_id(competitor_id)
            .one(self.db)
            .await
    }

    /// All competitors, newest first
    pub async fn get_all(&self) -> Result<Vec<CompetitorModel>, DbErr> {
        entity::prelude::Competitor::find()
            .order_by_desc(entity::competitor::Column::CreatedAt)
            .order_by_desc(entity::competitor::Column::Id)
            .all(self.db)
            .await
    }

    /// `(id, name)` of every competitor in ascending ID order
    pub async fn get_names(&self) -> Result<Vec<(i32, String)>, DbErr> {
        entity::prelude::Competitor::find()
            .select_only()
            .column(entity::competitor::Column::Id)
            .column(entity::competitor::Column::Name)
            .order_by_asc(entity::competitor::Column::Id)
            .into_tuple()
            .all(self.db)
            .await
    }

    /// Overwrites every value column and bumps `updated_at`
    ///
    /// Returns `Ok(None)` if the competitor does not exist.
    pub async fn update(
        &self,
        competitor_id: i32,
        values: CompetitorValues,
    ) -> Result<Option<CompetitorModel>, DbErr> {
        let Some(competitor) = self.get_by_id(competitor_id).await? else {
            return Ok(None);
        };

        let mut competitor_am = competitor.into_active_model();
        competitor_am.name = ActiveValue::Set(values.name);
        competitor_am.category = ActiveValue::Set(values.category);
        competitor_am.price_range_min = ActiveValue::Set(values.price_range_min);
        competitor_am.price_range_max = ActiveValue::Set(values.price_range_max);
        competitor_am.market_share = ActiveValue::Set(values.market_share);
        competitor_am.trend_status = ActiveValue::Set(values.trend_status);
        competitor_am.updated_at = ActiveValue::Set(Utc::now().naive_utc());

        let competitor = competitor_am.update(self.db).await?;

        Ok(Some(competitor))
    }

    /// Deletes a competitor
    ///
    /// Pricing observations must be removed first, see
    /// [`PricingRepository::delete_for_competitor`](crate::server::data::pricing::PricingRepository::delete_for_competitor).
    pub async fn delete(&self, competitor_id: i32) -> Result<DeleteResult, DbErr> {
        entity::prelude::Competitor::delete_by_id(competitor_id)
            .exec(self.db)
            .await
    }

    /// Nulls the owner of every competitor created by `user_id`
    pub async fn clear_owner(&self, user_id: i32) -> Result<UpdateResult, DbErr> {
        entity::prelude::Competitor::update_many()
            .col_expr(
                entity::competitor::Column::CreatedBy,
                Expr::value(Option::<i32>::None),
            )
            .filter(entity::competitor::Column::CreatedBy.eq(user_id))
            .exec(self.db)
            .await
    }

    /// Competitor count, price range total and market share total per trend status
    ///
    /// Only statuses in use produce a row, so an empty table yields an empty list. Sums are cast
    /// to text so `NUMERIC` and SQLite `REAL`/`INTEGER` results decode the same way.
    pub async fn get_trend_totals(&self) -> Result<Vec<TrendTotals>, DbErr> {
        let rows: Vec<(TrendStatus, i64, String, String)> = entity::prelude::Competitor::find()
            .select_only()
            .column(entity::competitor::Column::TrendStatus)
            .column_as(Expr::cust("COUNT(*)"), "competitors")
            .column_as(
                Expr::cust("CAST(SUM(price_range_min + price_range_max) AS TEXT)"),
                "price_range_total",
            )
            .column_as(
                Expr::cust("CAST(SUM(market_share) AS TEXT)"),
                "market_share_total",
            )
            .group_by(entity::competitor::Column::TrendStatus)
            .into_tuple()
            .all(self.db)
            .await?;

        rows.into_iter()
            .map(
                |(trend_status, competitors, price_range_total, market_share_total)| {
                    Ok(TrendTotals {
                        trend_status,
                        competitors: u64::try_from(competitors).unwrap_or_default(),
                        price_range_total: decode_sum(&price_range_total)?,
                        market_share_total: decode_sum(&market_share_total)?,
                    })
                },
            )
            .collect()
    }
}
