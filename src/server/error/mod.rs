//! Error types for the MarketLens server.
//!
//! Each domain (authentication, configuration, validation, ingestion) has its own `thiserror`
//! enum with an `IntoResponse` implementation. They are aggregated into [`Error`], which every
//! service and controller returns so `?` works across layers.

pub mod auth;
pub mod config;
pub mod ingest;
pub mod retry;
pub mod validation;

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use sea_orm::DbErr;
use thiserror::Error;

use crate::{
    model::api::ErrorDto,
    server::error::{
        auth::AuthError, config::ConfigError, ingest::IngestError, validation::ValidationError,
    },
};

/// Main error type for the MarketLens server.
///
/// Database errors are split in two: connection and pool-acquire failures become
/// [`Error::StorageUnavailable`] (retryable), everything else stays [`Error::DbErr`]. The
/// `From<DbErr>` implementation below performs that split so `?` on repository calls always
/// lands in the right variant.
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration error (missing or invalid environment variables).
    #[error(transparent)]
    ConfigError(#[from] ConfigError),
    /// Authentication or authorization failure.
    #[error(transparent)]
    AuthError(#[from] AuthError),
    /// Request body or query failed validation.
    #[error(transparent)]
    ValidationError(#[from] ValidationError),
    /// Bulk upload could not be processed.
    #[error(transparent)]
    IngestError(#[from] IngestError),
    /// Requested resource does not exist, the payload names it (e.g. `"Competitor 4"`).
    #[error("{0} not found")]
    NotFound(String),
    /// Request is well-formed but not allowed in the current state.
    #[error("{0}")]
    InvalidOperation(String),
    /// The database could not be reached.
    #[error("Storage unavailable: {0}")]
    StorageUnavailable(DbErr),
    /// Password hashing or hash parsing failed.
    #[error("Password hash error: {0}")]
    PasswordHashError(String),
    /// Database error (query failures, constraint violations).
    #[error(transparent)]
    DbErr(DbErr),
    /// Session error (session retrieval, storage, serialization).
    #[error(transparent)]
    SessionError(#[from] tower_sessions::session::Error),
    /// Valkey session store error (connection, command execution).
    #[error(transparent)]
    SessionRedisError(#[from] tower_sessions_redis_store::fred::prelude::Error),
    /// Mail API request failed.
    #[error(transparent)]
    MailError(#[from] reqwest::Error),
}

impl From<DbErr> for Error {
    fn from(err: DbErr) -> Self {
        match err {
            DbErr::Conn(_) | DbErr::ConnectionAcquire(_) => Self::StorageUnavailable(err),
            err => Self::DbErr(err),
        }
    }
}

impl From<JsonRejection> for Error {
    fn from(rejection: JsonRejection) -> Self {
        Self::ValidationError(ValidationError::MalformedBody(rejection.body_text()))
    }
}

/// Converts application errors into HTTP responses.
///
/// # Returns
/// - 400 Bad Request - Validation failures, malformed uploads and invalid operations
/// - 401 Unauthorized / 403 Forbidden - Access gate failures
/// - 404 Not Found - Missing resources
/// - 413 Payload Too Large - Oversized uploads
/// - 500 Internal Server Error - For all other errors (with error logging)
impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Self::ConfigError(err) => err.into_response(),
            Self::AuthError(err) => err.into_response(),
            Self::ValidationError(err) => err.into_response(),
            Self::IngestError(err) => err.into_response(),
            Self::NotFound(_) => {
                tracing::debug!("{}", self);

                (
                    StatusCode::NOT_FOUND,
                    Json(ErrorDto {
                        error: self.to_string(),
                    }),
                )
                    .into_response()
            }
            Self::InvalidOperation(message) => {
                tracing::debug!("Rejected invalid operation: {}", message);

                (StatusCode::BAD_REQUEST, Json(ErrorDto { error: message })).into_response()
            }
            err => InternalServerError(err).into_response(),
        }
    }
}

/// Wrapper type for converting any displayable error into a 500 Internal Server Error response.
///
/// Logs the error message and returns a generic "Internal server error" message to the client.
pub struct InternalServerError<E>(pub E);

impl<E: std::fmt::Display> IntoResponse for InternalServerError<E> {
    fn into_response(self) -> Response {
        tracing::error!("{}", self.0);

        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorDto {
                error: "Internal server error".to_string(),
            }),
        )
            .into_response()
    }
}
