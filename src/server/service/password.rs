//! Password hashing, verification and temporary password generation.

use argon2::{password_hash::SaltString, Argon2, PasswordHash, PasswordHasher, PasswordVerifier};
use rand::Rng;

use crate::server::error::{validation::FieldErrors, Error};

/// Characters used in temporary passwords, excluding look-alikes such as `0`/`O` and `1`/`l`/`I`.
pub const TEMPORARY_PASSWORD_CHARSET: &[u8] =
    b"ABCDEFGHJKLMNPQRSTUVWXYZabcdefghijkmnpqrstuvwxyz23456789";
pub const TEMPORARY_PASSWORD_LENGTH: usize = 12;
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Hash a password with Argon2id and a random salt, returning the PHC string.
pub fn hash_password(password: &str) -> Result<String, Error> {
    let salt = SaltString::generate(&mut rand_core::OsRng);

    let password_hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| Error::PasswordHashError(e.to_string()))?
        .to_string();

    Ok(password_hash)
}

/// Check a password against a stored PHC string.
///
/// A stored value which isn't a valid PHC string never matches.
pub fn verify_password(password: &str, password_hash: &str) -> bool {
    let Ok(parsed_hash) = PasswordHash::new(password_hash) else {
        tracing::warn!("Stored password hash is not a valid PHC string");
        return false;
    };

    Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok()
}

/// [`hash_password`] on the blocking thread pool, keeping Argon2 off the async workers.
pub async fn spawn_hash_password(password: String) -> Result<String, Error> {
    tokio::task::spawn_blocking(move || hash_password(&password))
        .await
        .map_err(|e| Error::PasswordHashError(e.to_string()))?
}

/// [`verify_password`] on the blocking thread pool.
pub async fn spawn_verify_password(password: String, password_hash: String) -> Result<bool, Error> {
    tokio::task::spawn_blocking(move || verify_password(&password, &password_hash))
        .await
        .map_err(|e| Error::PasswordHashError(e.to_string()))
}

pub fn generate_temporary_password() -> String {
    let mut rng = rand::rng();

    (0..TEMPORARY_PASSWORD_LENGTH)
        .map(|_| {
            let idx = rng.random_range(0..TEMPORARY_PASSWORD_CHARSET.len());
            TEMPORARY_PASSWORD_CHARSET[idx] as char
        })
        .collect()
}

/// Record a field error if `password` is too short to be set.
pub fn check_new_password(errors: &mut FieldErrors, field: &str, password: &str) {
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        errors.push(
            field,
            format!("must be at least {} characters", MIN_PASSWORD_LENGTH),
        );
    }
}
