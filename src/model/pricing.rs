use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A single price observation for a competitor
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PricingDataDto {
    pub id: i32,
    pub competitor_id: i32,
    pub price: Decimal,
    /// UTC timestamp of the observation
    pub recorded_at: NaiveDateTime,
}

/// Request body for recording a price observation
#[derive(Serialize, Deserialize, Debug, Clone, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreatePricingDataDto {
    pub competitor_id: i32,
    pub price: Decimal,
    /// Defaults to the time of insertion
    #[serde(default)]
    pub recorded_at: Option<NaiveDateTime>,
}
