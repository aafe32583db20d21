//! Session data models.
//!
//! Type-safe wrappers around values stored in the tower-sessions store (Valkey in production,
//! in-memory in tests).

pub mod user;
