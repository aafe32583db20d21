use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::model::api::{FieldErrorDto, ValidationErrorDto};

#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("Validation failed: {}", describe(.0))]
    InvalidFields(Vec<FieldErrorDto>),
    #[error("Malformed request body: {0}")]
    MalformedBody(String),
}

fn describe(errors: &[FieldErrorDto]) -> String {
    errors
        .iter()
        .map(|e| format!("{} {}", e.field, e.message))
        .collect::<Vec<_>>()
        .join("; ")
}

impl ValidationError {
    /// Field errors carried by this error, empty for malformed bodies.
    pub fn field_errors(&self) -> &[FieldErrorDto] {
        match self {
            Self::InvalidFields(errors) => errors,
            Self::MalformedBody(_) => &[],
        }
    }
}

impl IntoResponse for ValidationError {
    fn into_response(self) -> Response {
        tracing::debug!("{}", self);

        let body = match self {
            Self::InvalidFields(field_errors) => ValidationErrorDto {
                error: "Validation failed".to_string(),
                field_errors,
            },
            Self::MalformedBody(message) => ValidationErrorDto {
                error: message,
                field_errors: Vec::new(),
            },
        };

        (StatusCode::BAD_REQUEST, Json(body)).into_response()
    }
}

/// Collects field errors while validating a request body.
#[derive(Default, Debug)]
pub struct FieldErrors(Vec<FieldErrorDto>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, field: &str, message: impl Into<String>) {
        self.0.push(FieldErrorDto {
            field: field.to_string(),
            message: message.into(),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// `Ok(())` when nothing was collected, otherwise every collected error at once.
    pub fn into_result(self) -> Result<(), ValidationError> {
        if self.0.is_empty() {
            Ok(())
        } else {
            Err(ValidationError::InvalidFields(self.0))
        }
    }
}
