//! Server application models and type definitions.
//!
//! Application state, database model type aliases, session data structures and the
//! request-scoped principal used by the access gate.

pub mod app;
pub mod db;
pub mod principal;
pub mod session;
