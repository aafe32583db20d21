//! Dashboard metrics and pricing trend aggregation.
//!
//! Counting, summing and per-day grouping run in the database. The final division and rounding
//! live in pure functions ([`trend_score`], [`average_midpoint`], [`daily_averages`]) so the
//! results round identically on every backend and can be tested without one.

use chrono::{NaiveDateTime, TimeDelta, Utc};
use entity::sea_orm_active_enums::TrendStatus;
use rust_decimal::{Decimal, RoundingStrategy};
use sea_orm::DatabaseConnection;

use crate::{
    model::dashboard::{DashboardMetricsDto, PricingTrendPointDto},
    server::{
        data::{
            competitor::{CompetitorRepository, TrendTotals},
            pricing::{DailyPriceTotals, PricingRepository},
        },
        error::Error,
        service::retry::RetryContext,
    },
};

/// Trend window used when the requested number of days is missing or invalid.
pub const DEFAULT_TREND_DAYS: i64 = 180;

/// Round a monetary or percentage value to 2 decimal places, halves away from zero.
pub fn round_money(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Market momentum on a 0-10 scale.
///
/// `5.0` with no competitors, otherwise `((growing - declining) / total) * 5 + 5` clamped to
/// `[0, 10]` and rounded to 1 decimal place.
pub fn trend_score(growing: u64, declining: u64, total: u64) -> f64 {
    if total == 0 {
        return 5.0;
    }

    let net = growing as f64 - declining as f64;
    let score = (net / total as f64 * 5.0 + 5.0).clamp(0.0, 10.0);

    (score * 10.0).round() / 10.0
}

/// Mean of the price range midpoints given the sum of `min + max` over `competitors` rows,
/// `0` when there are none.
pub fn average_midpoint(price_range_total: Decimal, competitors: u64) -> Decimal {
    if competitors == 0 {
        return Decimal::ZERO;
    }

    round_money(price_range_total / Decimal::TWO / Decimal::from(competitors))
}

/// Average price of each day, keeping the order of `days`.
///
/// Days without observations are skipped.
pub fn daily_averages(days: &[DailyPriceTotals]) -> Vec<PricingTrendPointDto> {
    days.iter()
        .filter(|day| day.observations > 0)
        .map(|day| PricingTrendPointDto {
            date: day.date,
            avg_price: round_money(day.price_total / Decimal::from(day.observations)),
        })
        .collect()
}

/// Interpret a raw `days` query value, falling back to [`DEFAULT_TREND_DAYS`] when it is
/// missing, non-numeric or not positive.
pub fn resolve_days(raw: Option<&str>) -> i64 {
    raw.and_then(|value| value.trim().parse::<i64>().ok())
        .filter(|days| *days > 0)
        .unwrap_or(DEFAULT_TREND_DAYS)
}

pub struct DashboardService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> DashboardService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Computes competitor count, average price, total market share and trend score
    ///
    /// All figures come from one grouped query over the competitor table.
    pub async fn get_metrics(&self) -> Result<DashboardMetricsDto, Error> {
        let db = self.db.clone();

        let totals = RetryContext::new()
            .execute_with_retry("dashboard metrics", || {
                let db = db.clone();

                Box::pin(async move { Ok(CompetitorRepository::new(&db).get_trend_totals().await?) })
            })
            .await?;

        let total: u64 = totals.iter().map(|t| t.competitors).sum();
        let count_of = |status: TrendStatus| {
            totals
                .iter()
                .filter(|t| t.trend_status == status)
                .map(|t| t.competitors)
                .sum::<u64>()
        };
        let sum_of =
            |value: fn(&TrendTotals) -> Decimal| totals.iter().map(value).sum::<Decimal>();

        Ok(DashboardMetricsDto {
            total_competitors: total,
            avg_price: average_midpoint(sum_of(|t| t.price_range_total), total),
            market_share: round_money(sum_of(|t| t.market_share_total)),
            trend_score: trend_score(
                count_of(TrendStatus::Growing),
                count_of(TrendStatus::Declining),
                total,
            ),
        })
    }

    /// Daily average observed price over the last `days` days, ascending by date
    pub async fn get_pricing_trends(&self, days: i64) -> Result<Vec<PricingTrendPointDto>, Error> {
        let now = Utc::now().naive_utc();
        let cutoff = TimeDelta::try_days(days)
            .and_then(|window| now.checked_sub_signed(window))
            .unwrap_or(NaiveDateTime::MIN);

        let db = self.db.clone();

        let totals = RetryContext::new()
            .execute_with_retry(&format!("pricing trends for {} days", days), || {
                let db = db.clone();

                Box::pin(async move {
                    Ok(PricingRepository::new(&db)
                        .get_daily_totals_since(cutoff)
                        .await?)
                })
            })
            .await?;

        Ok(daily_averages(&totals))
    }
}
