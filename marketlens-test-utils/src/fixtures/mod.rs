//! Test fixture modules for database and HTTP mock creation.
//!
//! - `user` - user accounts
//! - `competitor` - competitor records
//! - `pricing` - pricing observations
//! - `mail` - mail API mock endpoints
//! - `factory` - in-memory model instances that don't touch the database

pub mod competitor;
pub mod factory;
pub mod mail;
pub mod pricing;
pub mod user;
