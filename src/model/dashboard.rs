use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Aggregate metrics shown at the top of the dashboard
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DashboardMetricsDto {
    /// Number of tracked competitors
    pub total_competitors: u64,
    /// Mean midpoint of all competitor price ranges, 2 decimal places
    pub avg_price: Decimal,
    /// Sum of all competitor market shares, 2 decimal places
    pub market_share: Decimal,
    /// Market momentum from 0.0 (all declining) to 10.0 (all growing)
    pub trend_score: f64,
}

/// Average observed price for a single UTC calendar day
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PricingTrendPointDto {
    pub date: NaiveDate,
    pub avg_price: Decimal,
}
