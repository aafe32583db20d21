use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use tower_sessions::Session;

use crate::{
    model::{
        api::{ErrorDto, ValidationErrorDto},
        user::{CreateUserDto, CreatedUserDto, UpdateUserDto, UserDto},
    },
    server::{
        controller::util::{json::AppJson, principal::get_principal},
        error::Error,
        model::app::AppState,
        service::user::UserService,
    },
};

pub static USER_TAG: &str = "user";

/// List all user accounts
#[utoipa::path(
    get,
    path = "/api/users",
    tag = USER_TAG,
    responses(
        (status = 200, description = "All users", body = Vec<UserDto>),
        (status = 401, description = "Authentication required", body = ErrorDto),
        (status = 403, description = "Insufficient permissions", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_users(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, Error> {
    get_principal(&state, &session).await?.require_admin()?;

    let users = UserService::new(&state.db).get_all().await?;

    Ok((StatusCode::OK, AppJson(users)))
}

/// Provision an account with an emailed temporary password
///
/// The account is created even when the email cannot be delivered, `temporaryPasswordEmailed`
/// reports the outcome.
#[utoipa::path(
    post,
    path = "/api/users",
    tag = USER_TAG,
    request_body = CreateUserDto,
    responses(
        (status = 201, description = "User created", body = CreatedUserDto),
        (status = 400, description = "Validation failed", body = ValidationErrorDto),
        (status = 401, description = "Authentication required", body = ErrorDto),
        (status = 403, description = "Insufficient permissions", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn create_user(
    State(state): State<AppState>,
    session: Session,
    AppJson(dto): AppJson<CreateUserDto>,
) -> Result<impl IntoResponse, Error> {
    get_principal(&state, &session).await?.require_admin()?;

    let created = UserService::new(&state.db)
        .create(dto, &state.mailer)
        .await?;

    Ok((StatusCode::CREATED, AppJson(created)))
}

#[utoipa::path(
    put,
    path = "/api/users/{id}",
    tag = USER_TAG,
    params(("id" = i32, Path, description = "User ID")),
    request_body = UpdateUserDto,
    responses(
        (status = 200, description = "User updated", body = UserDto),
        (status = 400, description = "Validation failed", body = ValidationErrorDto),
        (status = 401, description = "Authentication required", body = ErrorDto),
        (status = 403, description = "Insufficient permissions", body = ErrorDto),
        (status = 404, description = "User not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn update_user(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
    AppJson(dto): AppJson<UpdateUserDto>,
) -> Result<impl IntoResponse, Error> {
    get_principal(&state, &session).await?.require_admin()?;

    let user = UserService::new(&state.db).update(id, dto).await?;

    Ok((StatusCode::OK, AppJson(user)))
}

/// Delete a user account
///
/// Competitors recorded by the user are kept without an owner. Administrators cannot delete
/// their own account.
#[utoipa::path(
    delete,
    path = "/api/users/{id}",
    tag = USER_TAG,
    params(("id" = i32, Path, description = "User ID")),
    responses(
        (status = 204, description = "User deleted"),
        (status = 400, description = "Attempted to delete own account", body = ErrorDto),
        (status = 401, description = "Authentication required", body = ErrorDto),
        (status = 403, description = "Insufficient permissions", body = ErrorDto),
        (status = 404, description = "User not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn delete_user(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
    let principal = get_principal(&state, &session).await?;
    principal.require_admin()?;

    UserService::new(&state.db)
        .delete(principal.user_id, id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
