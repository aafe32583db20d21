use axum::{
    body::Body,
    extract::{FromRequest, Multipart},
    http::Request,
};
use marketlens::server::controller::upload::bulk_upload;
use sea_orm::EntityTrait;

use super::*;

const BOUNDARY: &str = "marketlens-test-boundary";

/// Build a multipart extractor from `(name, content)` form fields
async fn multipart(fields: &[(&str, &str)]) -> Multipart {
    let mut body = Vec::new();
    for (name, content) in fields {
        body.extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
        if *name == "file" {
            body.extend_from_slice(
                b"Content-Disposition: form-data; name=\"file\"; filename=\"upload.csv\"\r\n\
                  Content-Type: text/csv\r\n\r\n",
            );
        } else {
            body.extend_from_slice(
                format!("Content-Disposition: form-data; name=\"{}\"\r\n\r\n", name).as_bytes(),
            );
        }
        body.extend_from_slice(content.as_bytes());
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{}--\r\n", BOUNDARY).as_bytes());

    let request = Request::builder()
        .method("POST")
        .uri("/api/bulk-upload")
        .header(
            "content-type",
            format!("multipart/form-data; boundary={}", BOUNDARY),
        )
        .body(Body::from(body))
        .unwrap();

    Multipart::from_request(request, &()).await.unwrap()
}

/// Expect the row without a name reported and the other two imported
#[tokio::test]
async fn imports_competitors() -> Result<(), TestError> {
    let test = test_setup_with_tables!()?;
    login_as(&test, "analyst", UserRole::Analyst).await?;

    let form = multipart(&[
        ("type", "competitors"),
        ("file", "Name,Industry\nAcme,Retail\n,Energy\nGlobex,Energy\n"),
    ])
    .await;
    let result = bulk_upload(State(test.state()), test.session.clone(), form).await;

    let resp = result.unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    assert_eq!(body["recordsProcessed"], 2);
    assert_eq!(body["totalRows"], 3);
    assert_eq!(body["errors"][0], "Row 3: name is required");
    assert_eq!(body["success"], true);

    Ok(())
}

/// Expect the unknown competitor named in the error and nothing stored
#[tokio::test]
async fn reports_unknown_pricing_competitor() -> Result<(), TestError> {
    let test = test_setup_with_tables!()?;
    login_as(&test, "admin", UserRole::Admin).await?;

    let form = multipart(&[
        ("file", "competitor,price\nHooli,9.99\n"),
        ("type", "pricing"),
    ])
    .await;
    let result = bulk_upload(State(test.state()), test.session.clone(), form).await;

    let body = body_json(result.unwrap().into_response()).await;
    assert_eq!(body["recordsProcessed"], 0);
    assert!(body["errors"][0].as_str().unwrap().contains("Hooli"));
    let prices = entity::prelude::PricingData::find().all(&test.db).await?;
    assert!(prices.is_empty());

    Ok(())
}

#[tokio::test]
async fn viewer_cannot_upload() -> Result<(), TestError> {
    let test = test_setup_with_tables!()?;
    login_as(&test, "viewer", UserRole::Viewer).await?;

    let form = multipart(&[("type", "competitors"), ("file", "name\nAcme\n")]).await;
    let result = bulk_upload(State(test.state()), test.session.clone(), form).await;

    assert_eq!(status(result), StatusCode::FORBIDDEN);

    Ok(())
}

#[tokio::test]
async fn fails_without_file() -> Result<(), TestError> {
    let test = test_setup_with_tables!()?;
    login_as(&test, "analyst", UserRole::Analyst).await?;

    let form = multipart(&[("type", "competitors")]).await;
    let result = bulk_upload(State(test.state()), test.session.clone(), form).await;

    let resp = result.err().unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(resp).await["error"], "No file was uploaded");

    Ok(())
}

#[tokio::test]
async fn fails_for_unsupported_type() -> Result<(), TestError> {
    let test = test_setup_with_tables!()?;
    login_as(&test, "analyst", UserRole::Analyst).await?;

    let form = multipart(&[("type", "users"), ("file", "name\nAcme\n")]).await;
    let result = bulk_upload(State(test.state()), test.session.clone(), form).await;

    assert_eq!(status(result), StatusCode::BAD_REQUEST);

    Ok(())
}

#[tokio::test]
async fn fails_for_empty_file() -> Result<(), TestError> {
    let test = test_setup_with_tables!()?;
    login_as(&test, "analyst", UserRole::Analyst).await?;

    let form = multipart(&[("type", "competitors"), ("file", "name\n\n")]).await;
    let result = bulk_upload(State(test.state()), test.session.clone(), form).await;

    assert_eq!(status(result), StatusCode::BAD_REQUEST);

    Ok(())
}
