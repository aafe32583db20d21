use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::Deserialize;
use tower_sessions::Session;
use utoipa::IntoParams;

use crate::{
    model::{
        api::ErrorDto,
        dashboard::{DashboardMetricsDto, PricingTrendPointDto},
    },
    server::{
        controller::util::{json::AppJson, principal::get_principal},
        error::Error,
        model::app::AppState,
        service::dashboard::{resolve_days, DashboardService},
    },
};

pub static DASHBOARD_TAG: &str = "dashboard";

#[derive(Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct TrendParams {
    /// Length of the trend window in days, 180 when missing or not a positive integer
    pub days: Option<String>,
}

/// Aggregate competitor metrics
///
/// # Responses
/// - 200 (Success): Competitor count, average price, total market share and trend score
/// - 401 (Unauthorized): No authenticated user in session
/// - 500 (Internal Server Error): Database unavailable or query failure
#[utoipa::path(
    get,
    path = "/api/dashboard/metrics",
    tag = DASHBOARD_TAG,
    responses(
        (status = 200, description = "Dashboard metrics", body = DashboardMetricsDto),
        (status = 401, description = "Authentication required", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_metrics(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, Error> {
    get_principal(&state, &session).await?;

    let metrics = DashboardService::new(&state.db).get_metrics().await?;

    Ok((StatusCode::OK, AppJson(metrics)))
}

/// Daily average observed price over a trailing window
///
/// Days without observations are omitted; the series is ordered oldest first.
#[utoipa::path(
    get,
    path = "/api/dashboard/pricing-trends",
    tag = DASHBOARD_TAG,
    params(TrendParams),
    responses(
        (status = 200, description = "Pricing trend series", body = Vec<PricingTrendPointDto>),
        (status = 401, description = "Authentication required", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_pricing_trends(
    State(state): State<AppState>,
    session: Session,
    Query(params): Query<TrendParams>,
) -> Result<impl IntoResponse, Error> {
    get_principal(&state, &session).await?;

    let days = resolve_days(params.days.as_deref());
    let trends = DashboardService::new(&state.db)
        .get_pricing_trends(days)
        .await?;

    Ok((StatusCode::OK, AppJson(trends)))
}
