use chrono::{Duration, Utc};
use entity::sea_orm_active_enums::TrendStatus;
use marketlens::server::controller::dashboard::{get_metrics, get_pricing_trends, TrendParams};
use rust_decimal::Decimal;

use super::*;

/// Expect aggregate figures over every competitor
#[tokio::test]
async fn returns_metrics() -> Result<(), TestError> {
    let test = test_setup_with_tables!()?;
    login_as(&test, "viewer", UserRole::Viewer).await?;
    test.competitor()
        .insert_competitor(
            "Acme",
            Decimal::new(10, 0),
            Decimal::new(20, 0),
            Decimal::new(30, 0),
            TrendStatus::Growing,
        )
        .await?;
    test.competitor()
        .insert_competitor(
            "Globex",
            Decimal::new(30, 0),
            Decimal::new(40, 0),
            Decimal::new(1525, 2),
            TrendStatus::Growing,
        )
        .await?;

    let result = get_metrics(State(test.state()), test.session.clone()).await;

    let resp = result.unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    assert_eq!(body["totalCompetitors"], 2);
    assert_eq!(decimal(&body["avgPrice"]), Decimal::new(25, 0));
    assert_eq!(decimal(&body["marketShare"]), Decimal::new(4525, 2));
    assert_eq!(body["trendScore"], 10.0);

    Ok(())
}

#[tokio::test]
async fn metrics_require_session() -> Result<(), TestError> {
    let test = test_setup_with_tables!()?;

    let result = get_metrics(State(test.state()), test.session.clone()).await;

    assert_eq!(status(result), StatusCode::UNAUTHORIZED);

    Ok(())
}

/// Expect a non-numeric `days` to fall back to the default window
#[tokio::test]
async fn trends_default_invalid_days() -> Result<(), TestError> {
    let test = test_setup_with_tables!()?;
    login_as(&test, "viewer", UserRole::Viewer).await?;
    let competitor = test.competitor().insert_mock_competitor("Acme").await?;
    let now = Utc::now().naive_utc();
    test.pricing()
        .insert_pricing(competitor.id, Decimal::new(10, 0), now - Duration::days(100))
        .await?;
    test.pricing()
        .insert_pricing(competitor.id, Decimal::new(10, 0), now - Duration::days(400))
        .await?;

    let result = get_pricing_trends(
        State(test.state()),
        test.session.clone(),
        Query(TrendParams {
            days: Some("soon".to_string()),
        }),
    )
    .await;

    let resp = result.unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_json(resp).await.as_array().map(Vec::len), Some(1));

    Ok(())
}
