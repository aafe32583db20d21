//! HTTP routing and OpenAPI documentation configuration.
//!
//! Every API endpoint is registered here together with its utoipa specification; the collected
//! OpenAPI document and Swagger UI are served at `/api/docs`.

use axum::{extract::DefaultBodyLimit, Router};
use utoipa::OpenApi;
use utoipa_axum::{router::OpenApiRouter, routes};
use utoipa_swagger_ui::SwaggerUi;

use crate::server::{controller, model::app::AppState, service::ingest::MAX_UPLOAD_BYTES};

/// Room for multipart boundaries and the `type` field on top of the file itself
pub const MULTIPART_OVERHEAD_BYTES: usize = 64 * 1024;

/// Builds the application's HTTP router with all API endpoints and Swagger UI documentation.
///
/// # Registered Endpoints
/// - `POST /api/auth/login`, `POST /api/auth/register`, `POST /api/auth/logout`,
///   `GET /api/auth/user` - Session authentication
/// - `GET /api/dashboard/metrics`, `GET /api/dashboard/pricing-trends` - Aggregations
/// - `GET|POST /api/competitors`, `GET|PUT|DELETE /api/competitors/{id}` - Competitors
/// - `POST /api/pricing-data`, `GET /api/pricing-data/competitor/{id}` - Pricing observations
/// - `GET|POST /api/users`, `PUT|DELETE /api/users/{id}` - User administration
/// - `POST /api/bulk-upload` - CSV import, bodies limited to 10 MiB plus multipart overhead
/// - `POST /api/reset-password` - Password change
///
/// The session layer is applied by the caller so tests can provide an in-memory store.
pub fn routes() -> Router<AppState> {
    #[derive(OpenApi)]
    #[openapi(info(title = "MarketLens", description = "MarketLens competitor intelligence API"), tags(
        (name = controller::auth::AUTH_TAG, description = "Authentication API routes"),
        (name = controller::dashboard::DASHBOARD_TAG, description = "Dashboard aggregation API routes"),
        (name = controller::competitor::COMPETITOR_TAG, description = "Competitor API routes"),
        (name = controller::pricing::PRICING_TAG, description = "Pricing observation API routes"),
        (name = controller::user::USER_TAG, description = "User administration API routes"),
        (name = controller::upload::UPLOAD_TAG, description = "Bulk CSV upload API routes"),
        (name = controller::password::PASSWORD_TAG, description = "Password API routes"),
    ))]
    struct ApiDoc;

    let upload = OpenApiRouter::new()
        .routes(routes!(controller::upload::bulk_upload))
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES + MULTIPART_OVERHEAD_BYTES));

    let (routes, api) = OpenApiRouter::with_openapi(ApiDoc::openapi())
        .routes(routes!(controller::auth::login))
        .routes(routes!(controller::auth::register))
        .routes(routes!(controller::auth::logout))
        .routes(routes!(controller::auth::get_user))
        .routes(routes!(controller::dashboard::get_metrics))
        .routes(routes!(controller::dashboard::get_pricing_trends))
        .routes(routes!(
            controller::competitor::get_competitors,
            controller::competitor::create_competitor
        ))
        .routes(routes!(
            controller::competitor::get_competitor,
            controller::competitor::update_competitor,
            controller::competitor::delete_competitor
        ))
        .routes(routes!(controller::pricing::create_pricing))
        .routes(routes!(controller::pricing::get_competitor_pricing))
        .routes(routes!(
            controller::user::get_users,
            controller::user::create_user
        ))
        .routes(routes!(
            controller::user::update_user,
            controller::user::delete_user
        ))
        .routes(routes!(controller::password::reset_password))
        .merge(upload)
        .split_for_parts();

    routes.merge(SwaggerUi::new("/api/docs").url("/api/docs/openapi.json", api))
}
