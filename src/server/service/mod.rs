//! Service layer for business logic.
//!
//! Services validate input, coordinate repositories inside transactions where several writes
//! must land together, and wrap read paths in [`retry::RetryContext`]. Access decisions are made
//! by the controllers before a service is called; services only receive the acting user's ID.

pub mod competitor;
pub mod dashboard;
pub mod ingest;
pub mod mail;
pub mod password;
pub mod pricing;
pub mod retry;
pub mod user;
