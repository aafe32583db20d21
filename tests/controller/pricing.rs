use chrono::Utc;
use marketlens::{
    model::pricing::CreatePricingDataDto,
    server::controller::pricing::{create_pricing, get_competitor_pricing, PricingParams},
};
use rust_decimal::Decimal;

use super::*;

#[tokio::test]
async fn analyst_records_price() -> Result<(), TestError> {
    let test = test_setup_with_tables!()?;
    login_as(&test, "analyst", UserRole::Analyst).await?;
    let competitor = test.competitor().insert_mock_competitor("Acme").await?;

    let result = create_pricing(
        State(test.state()),
        test.session.clone(),
        AppJson(CreatePricingDataDto {
            competitor_id: competitor.id,
            price: Decimal::new(19999, 3),
            recorded_at: None,
        }),
    )
    .await;

    let resp = result.unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::CREATED);
    assert_eq!(decimal(&body_json(resp).await["price"]), Decimal::new(20, 0));

    Ok(())
}

#[tokio::test]
async fn returns_404_for_unknown_competitor() -> Result<(), TestError> {
    let test = test_setup_with_tables!()?;
    login_as(&test, "analyst", UserRole::Analyst).await?;

    let result = create_pricing(
        State(test.state()),
        test.session.clone(),
        AppJson(CreatePricingDataDto {
            competitor_id: 12,
            price: Decimal::ONE,
            recorded_at: None,
        }),
    )
    .await;

    assert_eq!(status(result), StatusCode::NOT_FOUND);

    Ok(())
}

#[tokio::test]
async fn viewer_cannot_record_price() -> Result<(), TestError> {
    let test = test_setup_with_tables!()?;
    login_as(&test, "viewer", UserRole::Viewer).await?;
    let competitor = test.competitor().insert_mock_competitor("Acme").await?;

    let result = create_pricing(
        State(test.state()),
        test.session.clone(),
        AppJson(CreatePricingDataDto {
            competitor_id: competitor.id,
            price: Decimal::ONE,
            recorded_at: None,
        }),
    )
    .await;

    assert_eq!(status(result), StatusCode::FORBIDDEN);

    Ok(())
}

/// Expect the `limit` query to bound the newest-first list
#[tokio::test]
async fn lists_recent_prices() -> Result<(), TestError> {
    let test = test_setup_with_tables!()?;
    login_as(&test, "viewer", UserRole::Viewer).await?;
    let competitor = test.competitor().insert_mock_competitor("Acme").await?;
    let now = Utc::now().naive_utc();
    for days_ago in 0..3 {
        test.pricing()
            .insert_pricing(
                competitor.id,
                Decimal::from(days_ago),
                now - chrono::Duration::days(days_ago),
            )
            .await?;
    }

    let result = get_competitor_pricing(
        State(test.state()),
        test.session.clone(),
        Path(competitor.id),
        Query(PricingParams {
            limit: Some("2".to_string()),
        }),
    )
    .await;

    let resp = result.unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    assert_eq!(body.as_array().map(Vec::len), Some(2));
    assert_eq!(decimal(&body[0]["price"]), Decimal::ZERO);

    Ok(())
}
