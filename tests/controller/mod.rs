//! Tests for HTTP controller endpoints.
//!
//! Handlers are called directly with a [`TestContext`] session and state, then the returned
//! response or error is rendered to check its status code.

mod auth;
mod competitor;
mod dashboard;
mod password;
mod pricing;
mod upload;
mod user;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use entity::sea_orm_active_enums::UserRole;
use marketlens::server::controller::util::json::AppJson;
use marketlens_test_utils::prelude::*;

use crate::{login_as, TestContextExt};

/// Render a handler result to its HTTP status
fn status<T: IntoResponse, E: IntoResponse>(result: Result<T, E>) -> StatusCode {
    match result {
        Ok(resp) => resp.into_response().status(),
        Err(err) => err.into_response().status(),
    }
}

/// Collect a response body as JSON
async fn body_json(resp: axum::response::Response) -> serde_json::Value {
    use http_body_util::BodyExt;

    let bytes = resp
        .into_body()
        .collect()
        .await
        .expect("read response body")
        .to_bytes();

    serde_json::from_slice(&bytes).expect("response body is JSON")
}

/// Decimal serialized as a JSON string
fn decimal(value: &serde_json::Value) -> rust_decimal::Decimal {
    value
        .as_str()
        .expect("decimal serialized as string")
        .parse()
        .expect("valid decimal")
}
