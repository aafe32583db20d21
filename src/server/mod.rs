//! Server application core modules.
//!
//! HTTP routing, the session-based access gate, dashboard aggregation, CSV ingestion and the
//! SeaORM repositories behind them.

pub mod config;
pub mod controller;
pub mod data;
pub mod error;
pub mod model;
pub mod router;
pub mod service;
pub mod startup;
#[cfg(test)]
pub mod util;
