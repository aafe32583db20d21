use chrono::NaiveDateTime;
use entity::sea_orm_active_enums::TrendStatus;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A tracked competitor company
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CompetitorDto {
    pub id: i32,
    pub name: String,
    pub category: String,
    pub price_range_min: Decimal,
    pub price_range_max: Decimal,
    pub market_share: Decimal,
    #[schema(value_type = String, example = "stable")]
    pub trend_status: TrendStatus,
    /// ID of the user who recorded the competitor, null once that user is deleted
    pub created_by: Option<i32>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Request body for recording a new competitor
#[derive(Serialize, Deserialize, Debug, Clone, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateCompetitorDto {
    pub name: String,
    pub category: String,
    pub price_range_min: Decimal,
    pub price_range_max: Decimal,
    pub market_share: Decimal,
    /// Defaults to `stable` when omitted
    #[serde(default)]
    #[schema(value_type = Option<String>, example = "growing")]
    pub trend_status: Option<TrendStatus>,
}

/// Request body for a partial competitor update, omitted fields are left unchanged
#[derive(Serialize, Deserialize, Debug, Clone, Default, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCompetitorDto {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub price_range_min: Option<Decimal>,
    #[serde(default)]
    pub price_range_max: Option<Decimal>,
    #[serde(default)]
    pub market_share: Option<Decimal>,
    #[serde(default)]
    #[schema(value_type = Option<String>)]
    pub trend_status: Option<TrendStatus>,
}
