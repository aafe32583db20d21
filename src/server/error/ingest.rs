use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::{model::api::ErrorDto, server::error::InternalServerError};

/// Failures which abort a bulk upload before or during ingestion.
///
/// Problems with individual rows are not errors, they are reported in the ingestion result.
#[derive(Error, Debug)]
pub enum IngestError {
    #[error("No file was uploaded")]
    MissingFile,
    #[error("Unsupported record type {0:?}, expected \"competitors\" or \"pricing\"")]
    UnsupportedRecordType(String),
    #[error("CSV file must contain a header row and at least one data row")]
    EmptyFile,
    #[error("Uploaded file is not valid UTF-8 text")]
    UnreadableFile,
    #[error("Malformed upload: {0}")]
    MalformedUpload(String),
    #[error("Upload exceeds the {} MiB limit", crate::server::service::ingest::MAX_UPLOAD_BYTES / (1024 * 1024))]
    PayloadTooLarge,
    #[error("Failed to stage upload: {0}")]
    Io(#[from] std::io::Error),
}

impl IntoResponse for IngestError {
    fn into_response(self) -> Response {
        let status = match self {
            Self::Io(_) => return InternalServerError(self).into_response(),
            Self::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            _ => StatusCode::BAD_REQUEST,
        };

        tracing::debug!("{}", self);

        (
            status,
            Json(ErrorDto {
                error: self.to_string(),
            }),
        )
            .into_response()
    }
}
