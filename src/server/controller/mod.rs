//! HTTP controller endpoints for the MarketLens web API.
//!
//! Handlers resolve the session principal, apply the role gate for their route, call a service
//! and map the result to a status code. Every handler carries a utoipa annotation collected
//! into the OpenAPI document served at `/api/docs`.

pub mod auth;
pub mod competitor;
pub mod dashboard;
pub mod password;
pub mod pricing;
pub mod upload;
pub mod user;
pub mod util;
