use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// The response when an error occurs with an API request
#[derive(Serialize, Deserialize, Debug, ToSchema)]
pub struct ErrorDto {
    /// The error message
    pub error: String,
}

/// A single rejected field of a request body
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, ToSchema)]
pub struct FieldErrorDto {
    /// Name of the offending field, in the casing used by the request body
    pub field: String,
    pub message: String,
}

/// The response when a request body fails validation
#[derive(Serialize, Deserialize, Debug, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ValidationErrorDto {
    pub error: String,
    pub field_errors: Vec<FieldErrorDto>,
}
