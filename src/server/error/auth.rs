use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::model::api::ErrorDto;

#[derive(Error, Debug)]
pub enum AuthError {
    #[error("User ID is not present in session")]
    UserNotInSession,
    #[error("User ID {0:?} not found in database despite having an active session")]
    UserNotInDatabase(i32),
    #[error("User ID {0:?} is deactivated but still holds a session")]
    UserInactive(i32),
    #[error("User ID {0:?} lacks the role required for this operation")]
    Forbidden(i32),
    #[error("User ID {0:?} must replace their temporary password")]
    PasswordChangeRequired(i32),
    #[error("Login failed for username {0:?}")]
    InvalidCredentials(String),
    #[error("Login refused for deactivated user ID {0:?}")]
    AccountDisabled(i32),
}

impl AuthError {
    fn respond(status: StatusCode, message: &str) -> Response {
        (
            status,
            Json(ErrorDto {
                error: message.to_string(),
            }),
        )
            .into_response()
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        tracing::debug!("{}", self);

        match self {
            Self::UserNotInSession | Self::UserNotInDatabase(_) | Self::UserInactive(_) => {
                Self::respond(StatusCode::UNAUTHORIZED, "Authentication required")
            }
            Self::InvalidCredentials(_) => {
                Self::respond(StatusCode::UNAUTHORIZED, "Invalid username or password")
            }
            Self::Forbidden(_) => Self::respond(StatusCode::FORBIDDEN, "Insufficient permissions"),
            Self::PasswordChangeRequired(_) => {
                Self::respond(StatusCode::FORBIDDEN, "Password change required")
            }
            Self::AccountDisabled(_) => Self::respond(StatusCode::FORBIDDEN, "Account is disabled"),
        }
    }
}
