use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Outcome of a bulk CSV upload
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct IngestResultDto {
    /// Rows successfully written
    pub records_processed: usize,
    /// Data rows found in the file, excluding the header and blank lines
    pub total_rows: usize,
    /// First row errors formatted as `Row <n>: <message>`
    pub errors: Vec<String>,
    pub success: bool,
}
