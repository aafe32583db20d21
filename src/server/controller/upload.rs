use axum::{
    extract::{multipart::MultipartError, Multipart, State},
    http::StatusCode,
    response::IntoResponse,
};
use tower_sessions::Session;

use crate::{
    model::{api::ErrorDto, upload::IngestResultDto},
    server::{
        controller::util::{json::AppJson, principal::get_principal},
        error::{ingest::IngestError, Error},
        model::app::AppState,
        service::ingest::{IngestService, UploadRecordType},
    },
};

pub static UPLOAD_TAG: &str = "upload";

/// Multipart form accepted by the bulk upload route, documentation only
#[allow(dead_code)]
#[derive(utoipa::ToSchema)]
struct BulkUploadForm {
    /// CSV file with a header row
    #[schema(value_type = String, format = Binary)]
    file: Vec<u8>,
    /// `competitors` or `pricing`
    r#type: String,
}

fn multipart_error(err: MultipartError) -> IngestError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        IngestError::PayloadTooLarge
    } else {
        IngestError::MalformedUpload(err.body_text())
    }
}

/// Read the `file` and `type` fields of the upload form
async fn read_upload_form(
    multipart: &mut Multipart,
) -> Result<(Vec<u8>, UploadRecordType), IngestError> {
    let mut file = None;
    let mut record_type = None;

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        match field.name() {
            Some("file") => {
                file = Some(field.bytes().await.map_err(multipart_error)?.to_vec());
            }
            Some("type") => {
                record_type = Some(field.text().await.map_err(multipart_error)?);
            }
            _ => {}
        }
    }

    let Some(file) = file else {
        return Err(IngestError::MissingFile);
    };
    let record_type = record_type.unwrap_or_default().parse::<UploadRecordType>()?;

    Ok((file, record_type))
}

/// Bulk import competitors or pricing observations from a CSV file
///
/// Rows are written one at a time; rows which fail are reported as `Row <n>: <message>` and
/// do not stop the import.
///
/// # Responses
/// - 200 (Success): Import finished, see `recordsProcessed` and `errors`
/// - 400 (Bad Request): Missing file, unsupported type, empty or unreadable file
/// - 403 (Forbidden): Viewer role, or a temporary password still has to be replaced
/// - 413 (Payload Too Large): Upload larger than 10 MiB
#[utoipa::path(
    post,
    path = "/api/bulk-upload",
    tag = UPLOAD_TAG,
    request_body(content = BulkUploadForm, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Import finished", body = IngestResultDto),
        (status = 400, description = "Upload rejected", body = ErrorDto),
        (status = 401, description = "Authentication required", body = ErrorDto),
        (status = 403, description = "Insufficient permissions", body = ErrorDto),
        (status = 413, description = "Upload too large", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn bulk_upload(
    State(state): State<AppState>,
    session: Session,
    mut multipart: Multipart,
) -> Result<impl IntoResponse, Error> {
    let principal = get_principal(&state, &session).await?;
    principal.require_analyst_or_admin()?;

    let (file, record_type) = read_upload_form(&mut multipart).await?;

    let result = IngestService::new(&state.db)
        .ingest_upload(&file, record_type, principal.user_id)
        .await?;

    Ok((StatusCode::OK, AppJson(result)))
}
