use axum::{extract::State, http::StatusCode, response::IntoResponse};
use tower_sessions::Session;

use crate::{
    model::{
        api::{ErrorDto, ValidationErrorDto},
        user::ResetPasswordDto,
    },
    server::{
        controller::util::{json::AppJson, principal::get_session_user},
        error::Error,
        model::app::AppState,
        service::user::UserService,
    },
};

pub static PASSWORD_TAG: &str = "password";

/// Replace the current user's password
///
/// Open to users holding a temporary password, this is how they retire it.
///
/// # Responses
/// - 204 (No Content): Password changed
/// - 400 (Bad Request): Current password incorrect or new password rejected
/// - 401 (Unauthorized): No authenticated user in session
#[utoipa::path(
    post,
    path = "/api/reset-password",
    tag = PASSWORD_TAG,
    request_body = ResetPasswordDto,
    responses(
        (status = 204, description = "Password changed"),
        (status = 400, description = "Validation failed", body = ValidationErrorDto),
        (status = 401, description = "Authentication required", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn reset_password(
    State(state): State<AppState>,
    session: Session,
    AppJson(dto): AppJson<ResetPasswordDto>,
) -> Result<impl IntoResponse, Error> {
    let user = get_session_user(&state, &session).await?;

    UserService::new(&state.db).reset_password(user.id, dto).await?;

    tracing::info!(user_id = %user.id, "Password changed");

    Ok(StatusCode::NO_CONTENT)
}
