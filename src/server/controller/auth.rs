use axum::{extract::State, http::StatusCode, response::IntoResponse};
use tower_sessions::Session;

use crate::{
    model::{
        api::{ErrorDto, ValidationErrorDto},
        user::{LoginDto, RegisterDto, UserDto},
    },
    server::{
        controller::util::{json::AppJson, principal::get_session_user},
        error::Error,
        model::{app::AppState, session::user::SessionUserId},
        service::user::UserService,
    },
};

pub static AUTH_TAG: &str = "auth";

/// Log in with username and password
///
/// The session ID is rotated on success and the user's last activity time is recorded.
///
/// # Responses
/// - 200 (Success): The logged in user
/// - 401 (Unauthorized): Unknown username or wrong password
/// - 403 (Forbidden): The account has been deactivated
/// - 500 (Internal Server Error): Database or session store failure
#[utoipa::path(
    post,
    path = "/api/auth/login",
    tag = AUTH_TAG,
    request_body = LoginDto,
    responses(
        (status = 200, description = "Logged in", body = UserDto),
        (status = 400, description = "Malformed request body", body = ValidationErrorDto),
        (status = 401, description = "Invalid username or password", body = ErrorDto),
        (status = 403, description = "Account is disabled", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    AppJson(dto): AppJson<LoginDto>,
) -> Result<impl IntoResponse, Error> {
    let user = UserService::new(&state.db)
        .authenticate(&dto.username, &dto.password)
        .await?;

    SessionUserId::login(&session, user.id).await?;

    tracing::info!(user_id = %user.id, "User logged in");

    Ok((StatusCode::OK, AppJson(UserDto::from(user))))
}

/// Create a viewer account and log it in
#[utoipa::path(
    post,
    path = "/api/auth/register",
    tag = AUTH_TAG,
    request_body = RegisterDto,
    responses(
        (status = 201, description = "Account created", body = UserDto),
        (status = 400, description = "Validation failed", body = ValidationErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn register(
    State(state): State<AppState>,
    session: Session,
    AppJson(dto): AppJson<RegisterDto>,
) -> Result<impl IntoResponse, Error> {
    let user = UserService::new(&state.db).register(dto).await?;

    SessionUserId::login(&session, user.id).await?;

    tracing::info!(user_id = %user.id, "User registered");

    Ok((StatusCode::CREATED, AppJson(UserDto::from(user))))
}

/// Logs the user out by clearing their session
///
/// # Responses
/// - 204 (No Content): Logged out, or there was no user in session
/// - 500 (Internal Server Error): There was an issue clearing the session
#[utoipa::path(
    post,
    path = "/api/auth/logout",
    tag = AUTH_TAG,
    responses(
        (status = 204, description = "Logged out"),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn logout(session: Session) -> Result<impl IntoResponse, Error> {
    // Flushing a session which was never stored fails, so only logged in sessions are cleared
    if SessionUserId::get(&session).await?.is_some() {
        SessionUserId::logout(&session).await?;
    }

    Ok(StatusCode::NO_CONTENT)
}

/// The user behind the current session
///
/// Also answers for users who still have to replace a temporary password, so clients can
/// detect `passwordChangeRequired` and prompt for a new one.
#[utoipa::path(
    get,
    path = "/api/auth/user",
    tag = AUTH_TAG,
    responses(
        (status = 200, description = "Current user", body = UserDto),
        (status = 401, description = "Authentication required", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_user(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, Error> {
    let user = get_session_user(&state, &session).await?;

    Ok((StatusCode::OK, AppJson(UserDto::from(user))))
}
