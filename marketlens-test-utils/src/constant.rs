//! Test configuration constants.
//!
//! Placeholder values used when wiring the application's collaborators to test doubles.
//! None of these are real credentials.

/// Bearer token the mock mail API expects.
pub static TEST_MAIL_API_KEY: &str = "mail_api_key";

/// Sender address configured on the test mailer.
pub static TEST_MAIL_FROM: &str = "no-reply@marketlens.test";

/// Application URL included in outgoing test emails.
pub static TEST_APP_URL: &str = "http://localhost:8080";

/// Path of the mock mail API send endpoint.
pub static TEST_MAIL_SEND_PATH: &str = "/send";

/// Password hash stored for fixture users.
///
/// Not a valid Argon2 PHC string, logins against fixture users always fail unless the
/// test inserts its own hash.
pub static TEST_PASSWORD_HASH: &str = "not-a-real-password-hash";
