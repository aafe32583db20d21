use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::Deserialize;
use tower_sessions::Session;
use utoipa::IntoParams;

use crate::{
    model::{
        api::{ErrorDto, ValidationErrorDto},
        pricing::{CreatePricingDataDto, PricingDataDto},
    },
    server::{
        controller::util::{json::AppJson, principal::get_principal},
        error::Error,
        model::app::AppState,
        service::pricing::{resolve_limit, PricingService},
    },
};

pub static PRICING_TAG: &str = "pricing";

#[derive(Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PricingParams {
    /// Maximum number of observations, 30 when missing or invalid, capped at 1000
    pub limit: Option<String>,
}

/// Record a price observation
#[utoipa::path(
    post,
    path = "/api/pricing-data",
    tag = PRICING_TAG,
    request_body = CreatePricingDataDto,
    responses(
        (status = 201, description = "Observation recorded", body = PricingDataDto),
        (status = 400, description = "Validation failed", body = ValidationErrorDto),
        (status = 401, description = "Authentication required", body = ErrorDto),
        (status = 403, description = "Insufficient permissions", body = ErrorDto),
        (status = 404, description = "Competitor not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn create_pricing(
    State(state): State<AppState>,
    session: Session,
    AppJson(dto): AppJson<CreatePricingDataDto>,
) -> Result<impl IntoResponse, Error> {
    let principal = get_principal(&state, &session).await?;
    principal.require_analyst_or_admin()?;

    let pricing = PricingService::new(&state.db).create(dto).await?;

    Ok((StatusCode::CREATED, AppJson(pricing)))
}

/// Most recent observations for a competitor, newest first
#[utoipa::path(
    get,
    path = "/api/pricing-data/competitor/{id}",
    tag = PRICING_TAG,
    params(("id" = i32, Path, description = "Competitor ID"), PricingParams),
    responses(
        (status = 200, description = "Pricing observations", body = Vec<PricingDataDto>),
        (status = 401, description = "Authentication required", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_competitor_pricing(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
    Query(params): Query<PricingParams>,
) -> Result<impl IntoResponse, Error> {
    get_principal(&state, &session).await?;

    let limit = resolve_limit(params.limit.as_deref());
    let pricing = PricingService::new(&state.db)
        .get_for_competitor(id, limit)
        .await?;

    Ok((StatusCode::OK, AppJson(pricing)))
}
