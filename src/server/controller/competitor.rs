use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use tower_sessions::Session;

use crate::{
    model::{
        api::{ErrorDto, ValidationErrorDto},
        competitor::{CompetitorDto, CreateCompetitorDto, UpdateCompetitorDto},
    },
    server::{
        controller::util::{json::AppJson, principal::get_principal},
        error::Error,
        model::app::AppState,
        service::competitor::CompetitorService,
    },
};

pub static COMPETITOR_TAG: &str = "competitor";

/// List all competitors, newest first
#[utoipa::path(
    get,
    path = "/api/competitors",
    tag = COMPETITOR_TAG,
    responses(
        (status = 200, description = "All competitors", body = Vec<CompetitorDto>),
        (status = 401, description = "Authentication required", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_competitors(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, Error> {
    get_principal(&state, &session).await?;

    let competitors = CompetitorService::new(&state.db).get_all().await?;

    Ok((StatusCode::OK, AppJson(competitors)))
}

#[utoipa::path(
    get,
    path = "/api/competitors/{id}",
    tag = COMPETITOR_TAG,
    params(("id" = i32, Path, description = "Competitor ID")),
    responses(
        (status = 200, description = "The competitor", body = CompetitorDto),
        (status = 401, description = "Authentication required", body = ErrorDto),
        (status = 404, description = "Competitor not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_competitor(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
    get_principal(&state, &session).await?;

    let competitor = CompetitorService::new(&state.db).get(id).await?;

    Ok((StatusCode::OK, AppJson(competitor)))
}

/// Record a competitor owned by the current user
///
/// # Responses
/// - 201 (Created): The stored competitor
/// - 400 (Bad Request): Malformed body or field validation failure
/// - 401 (Unauthorized): No authenticated user in session
/// - 403 (Forbidden): Viewer role, or a temporary password still has to be replaced
#[utoipa::path(
    post,
    path = "/api/competitors",
    tag = COMPETITOR_TAG,
    request_body = CreateCompetitorDto,
    responses(
        (status = 201, description = "Competitor created", body = CompetitorDto),
        (status = 400, description = "Validation failed", body = ValidationErrorDto),
        (status = 401, description = "Authentication required", body = ErrorDto),
        (status = 403, description = "Insufficient permissions", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn create_competitor(
    State(state): State<AppState>,
    session: Session,
    AppJson(dto): AppJson<CreateCompetitorDto>,
) -> Result<impl IntoResponse, Error> {
    let principal = get_principal(&state, &session).await?;
    principal.require_analyst_or_admin()?;

    let competitor = CompetitorService::new(&state.db)
        .create(dto, Some(principal.user_id))
        .await?;

    Ok((StatusCode::CREATED, AppJson(competitor)))
}

/// Partially update a competitor
///
/// Omitted fields keep their stored value; the merged record is validated as a whole.
#[utoipa::path(
    put,
    path = "/api/competitors/{id}",
    tag = COMPETITOR_TAG,
    params(("id" = i32, Path, description = "Competitor ID")),
    request_body = UpdateCompetitorDto,
    responses(
        (status = 200, description = "Competitor updated", body = CompetitorDto),
        (status = 400, description = "Validation failed", body = ValidationErrorDto),
        (status = 401, description = "Authentication required", body = ErrorDto),
        (status = 403, description = "Insufficient permissions", body = ErrorDto),
        (status = 404, description = "Competitor not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn update_competitor(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
    AppJson(dto): AppJson<UpdateCompetitorDto>,
) -> Result<impl IntoResponse, Error> {
    let principal = get_principal(&state, &session).await?;
    principal.require_analyst_or_admin()?;

    let competitor = CompetitorService::new(&state.db).update(id, dto).await?;

    Ok((StatusCode::OK, AppJson(competitor)))
}

/// Delete a competitor together with its pricing observations
#[utoipa::path(
    delete,
    path = "/api/competitors/{id}",
    tag = COMPETITOR_TAG,
    params(("id" = i32, Path, description = "Competitor ID")),
    responses(
        (status = 204, description = "Competitor deleted"),
        (status = 401, description = "Authentication required", body = ErrorDto),
        (status = 403, description = "Insufficient permissions", body = ErrorDto),
        (status = 404, description = "Competitor not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn delete_competitor(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
    let principal = get_principal(&state, &session).await?;
    principal.require_admin()?;

    CompetitorService::new(&state.db).delete(id).await?;

    Ok(StatusCode::NO_CONTENT)
}
