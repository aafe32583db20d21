//! Data transfer objects exchanged with API clients.

pub mod api;
pub mod competitor;
pub mod dashboard;
pub mod pricing;
pub mod upload;
pub mod user;
