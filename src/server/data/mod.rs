//! Data access layer repositories.
//!
//! Repositories wrap SeaORM queries per table and are generic over [`sea_orm::ConnectionTrait`]
//! so the same code runs against a pooled connection or inside a transaction.

pub mod competitor;
pub mod pricing;
pub mod user;
