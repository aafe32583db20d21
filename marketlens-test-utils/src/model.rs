//! Database model type aliases for test utilities.
//!
//! These aliases match those in the main marketlens crate to keep fixture signatures short.

/// Type alias for user database model.
pub type UserModel = entity::user::Model;

/// Type alias for competitor database model.
pub type CompetitorModel = entity::competitor::Model;

/// Type alias for pricing observation database model.
pub type PricingDataModel = entity::pricing_data::Model;
