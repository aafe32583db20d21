use super::Error;

/// Strategy for handling errors in a retry context
pub enum ErrorRetryStrategy {
    /// Retry with exponential backoff (transient failures)
    Retry,
    /// Failed permanently (bad request, bug, or data issue)
    Fail,
}

impl Error {
    /// Determine error retry strategy based upon application Error type
    pub fn to_retry_strategy(&self) -> ErrorRetryStrategy {
        match self {
            // Connection and pool-acquire failures, the database may come back
            Self::StorageUnavailable(_) => ErrorRetryStrategy::Retry,

            // Session errors - transient, could be Valkey connection issues
            Self::SessionError(_) => ErrorRetryStrategy::Retry,
            Self::SessionRedisError(_) => ErrorRetryStrategy::Retry,

            // Mail API - retry network failures and 5xx, a 4xx is our fault
            Self::MailError(err) => match err.status() {
                Some(status) if status.is_server_error() => ErrorRetryStrategy::Retry,
                Some(_) => ErrorRetryStrategy::Fail,
                None => ErrorRetryStrategy::Retry,
            },

            // Query errors (constraint violations, type conversion, record not found)
            Self::DbErr(_) => ErrorRetryStrategy::Fail,

            Self::ConfigError(_)
            | Self::AuthError(_)
            | Self::ValidationError(_)
            | Self::IngestError(_)
            | Self::NotFound(_)
            | Self::InvalidOperation(_)
            | Self::PasswordHashError(_) => ErrorRetryStrategy::Fail,
        }
    }
}
