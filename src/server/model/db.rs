//! Database model type aliases.

/// A user account.
///
/// `password_hash` holds an Argon2id PHC string and must never leave the server.
pub type UserModel = entity::user::Model;

/// A tracked competitor company.
///
/// Decimal columns are stored with 2 fractional digits. `created_by` is nulled when the owning
/// user is deleted.
pub type CompetitorModel = entity::competitor::Model;

/// A single price observation, `recorded_at` is naive UTC.
pub type PricingDataModel = entity::pricing_data::Model;
