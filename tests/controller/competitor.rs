use marketlens::{
    model::competitor::{CreateCompetitorDto, UpdateCompetitorDto},
    server::controller::competitor::{
        create_competitor, delete_competitor, get_competitor, get_competitors, update_competitor,
    },
};
use rust_decimal::Decimal;
use sea_orm::EntityTrait;

use super::*;

fn new_competitor(name: &str) -> AppJson<CreateCompetitorDto> {
    AppJson(CreateCompetitorDto {
        name: name.to_string(),
        category: "Retail".to_string(),
        price_range_min: Decimal::new(1000, 2),
        price_range_max: Decimal::new(3000, 2),
        market_share: Decimal::new(125, 1),
        trend_status: None,
    })
}

/// Expect the list newest first
#[tokio::test]
async fn lists_competitors() -> Result<(), TestError> {
    let test = test_setup_with_tables!()?;
    login_as(&test, "viewer", UserRole::Viewer).await?;
    test.competitor().insert_mock_competitor("Acme").await?;
    test.competitor().insert_mock_competitor("Globex").await?;

    let result = get_competitors(State(test.state()), test.session.clone()).await;

    let resp = result.unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    assert_eq!(body.as_array().map(Vec::len), Some(2));
    assert_eq!(body[0]["name"], "Globex");

    Ok(())
}

#[tokio::test]
async fn list_requires_session() -> Result<(), TestError> {
    let test = test_setup_with_tables!()?;

    let result = get_competitors(State(test.state()), test.session.clone()).await;

    assert_eq!(status(result), StatusCode::UNAUTHORIZED);

    Ok(())
}

#[tokio::test]
async fn get_returns_404_for_unknown_id() -> Result<(), TestError> {
    let test = test_setup_with_tables!()?;
    login_as(&test, "viewer", UserRole::Viewer).await?;

    let result = get_competitor(State(test.state()), test.session.clone(), Path(7)).await;

    assert_eq!(status(result), StatusCode::NOT_FOUND);

    Ok(())
}

/// Expect 201 with decimals serialized as strings and the analyst as owner
#[tokio::test]
async fn analyst_creates_competitor() -> Result<(), TestError> {
    let test = test_setup_with_tables!()?;
    let analyst = login_as(&test, "analyst", UserRole::Analyst).await?;

    let result = create_competitor(
        State(test.state()),
        test.session.clone(),
        new_competitor("Acme"),
    )
    .await;

    let resp = result.unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body = body_json(resp).await;
    assert_eq!(decimal(&body["priceRangeMin"]), Decimal::new(10, 0));
    assert_eq!(body["trendStatus"], "stable");
    assert_eq!(body["createdBy"], analyst.id);

    Ok(())
}

#[tokio::test]
async fn viewer_cannot_create_competitor() -> Result<(), TestError> {
    let test = test_setup_with_tables!()?;
    login_as(&test, "viewer", UserRole::Viewer).await?;

    let result = create_competitor(
        State(test.state()),
        test.session.clone(),
        new_competitor("Acme"),
    )
    .await;

    assert_eq!(status(result), StatusCode::FORBIDDEN);
    let competitors = entity::prelude::Competitor::find().all(&test.db).await?;
    assert!(competitors.is_empty());

    Ok(())
}

/// Expect 400 with field errors when min exceeds max
#[tokio::test]
async fn rejects_inverted_price_range() -> Result<(), TestError> {
    let test = test_setup_with_tables!()?;
    login_as(&test, "analyst", UserRole::Analyst).await?;

    let AppJson(mut dto) = new_competitor("Acme");
    dto.price_range_min = Decimal::new(50, 0);

    let result = create_competitor(State(test.state()), test.session.clone(), AppJson(dto)).await;

    let resp = result.err().unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(resp).await["fieldErrors"][0]["field"], "priceRangeMin");

    Ok(())
}

/// Expect a partial update to keep omitted fields
#[tokio::test]
async fn updates_competitor() -> Result<(), TestError> {
    let test = test_setup_with_tables!()?;
    login_as(&test, "admin", UserRole::Admin).await?;
    let competitor = test.competitor().insert_mock_competitor("Acme").await?;

    let result = update_competitor(
        State(test.state()),
        test.session.clone(),
        Path(competitor.id),
        AppJson(UpdateCompetitorDto {
            market_share: Some(Decimal::new(42, 0)),
            ..Default::default()
        }),
    )
    .await;

    let resp = result.unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    assert_eq!(body["name"], "Acme");
    assert_eq!(decimal(&body["marketShare"]), Decimal::new(42, 0));

    Ok(())
}

/// Expect only admins to delete, and the pricing rows to go with the competitor
#[tokio::test]
async fn admin_deletes_competitor_and_pricing() -> Result<(), TestError> {
    let test = test_setup_with_tables!()?;
    login_as(&test, "admin", UserRole::Admin).await?;
    let competitor = test.competitor().insert_mock_competitor("Acme").await?;
    test.pricing()
        .insert_pricing(
            competitor.id,
            Decimal::new(1500, 2),
            chrono::Utc::now().naive_utc(),
        )
        .await?;

    let result = delete_competitor(
        State(test.state()),
        test.session.clone(),
        Path(competitor.id),
    )
    .await;

    assert_eq!(status(result), StatusCode::NO_CONTENT);
    let prices = entity::prelude::PricingData::find().all(&test.db).await?;
    assert!(prices.is_empty());

    Ok(())
}

#[tokio::test]
async fn analyst_cannot_delete_competitor() -> Result<(), TestError> {
    let test = test_setup_with_tables!()?;
    login_as(&test, "analyst", UserRole::Analyst).await?;
    let competitor = test.competitor().insert_mock_competitor("Acme").await?;

    let result = delete_competitor(
        State(test.state()),
        test.session.clone(),
        Path(competitor.id),
    )
    .await;

    assert_eq!(status(result), StatusCode::FORBIDDEN);

    Ok(())
}
