use marketlens::{
    model::user::{CreateUserDto, UpdateUserDto},
    server::controller::user::{create_user, delete_user, get_users, update_user},
};

use super::*;

/// Expect users listed without any password field
#[tokio::test]
async fn admin_lists_users() -> Result<(), TestError> {
    let test = test_setup_with_tables!()?;
    login_as(&test, "admin", UserRole::Admin).await?;
    test.user().insert_user("viewer", UserRole::Viewer).await?;

    let result = get_users(State(test.state()), test.session.clone()).await;

    let resp = result.unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    assert_eq!(body.as_array().map(Vec::len), Some(2));
    assert!(body[0].get("passwordHash").is_none());
    assert!(body[0].get("password_hash").is_none());

    Ok(())
}

#[tokio::test]
async fn analyst_cannot_list_users() -> Result<(), TestError> {
    let test = test_setup_with_tables!()?;
    login_as(&test, "analyst", UserRole::Analyst).await?;

    let result = get_users(State(test.state()), test.session.clone()).await;

    assert_eq!(status(result), StatusCode::FORBIDDEN);

    Ok(())
}

/// Expect 201 and one message to the new user's address
#[tokio::test]
async fn admin_creates_user() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_tables()
        .with_mail_endpoint("newbie@example.com", 1)
        .build()
        .await?;
    login_as(&test, "admin", UserRole::Admin).await?;

    let result = create_user(
        State(test.state()),
        test.session.clone(),
        AppJson(CreateUserDto {
            username: "newbie".to_string(),
            email: "newbie@example.com".to_string(),
            display_name: "New Analyst".to_string(),
            role: UserRole::Analyst,
        }),
    )
    .await;

    let resp = result.unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body = body_json(resp).await;
    assert_eq!(body["temporaryPasswordEmailed"], true);
    assert_eq!(body["user"]["passwordChangeRequired"], true);
    test.assert_mocks();

    Ok(())
}

#[tokio::test]
async fn admin_updates_user_role() -> Result<(), TestError> {
    let test = test_setup_with_tables!()?;
    login_as(&test, "admin", UserRole::Admin).await?;
    let viewer = test.user().insert_user("viewer", UserRole::Viewer).await?;

    let result = update_user(
        State(test.state()),
        test.session.clone(),
        Path(viewer.id),
        AppJson(UpdateUserDto {
            role: Some(UserRole::Analyst),
            ..Default::default()
        }),
    )
    .await;

    let resp = result.unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_json(resp).await["role"], "analyst");

    Ok(())
}

#[tokio::test]
async fn admin_deletes_user() -> Result<(), TestError> {
    let test = test_setup_with_tables!()?;
    login_as(&test, "admin", UserRole::Admin).await?;
    let viewer = test.user().insert_user("viewer", UserRole::Viewer).await?;

    let result = delete_user(State(test.state()), test.session.clone(), Path(viewer.id)).await;

    assert_eq!(status(result), StatusCode::NO_CONTENT);

    Ok(())
}

/// Expect 403 when a non-admin deletes a user
#[tokio::test]
async fn analyst_cannot_delete_user() -> Result<(), TestError> {
    let test = test_setup_with_tables!()?;
    login_as(&test, "analyst", UserRole::Analyst).await?;
    let viewer = test.user().insert_user("viewer", UserRole::Viewer).await?;

    let result = delete_user(State(test.state()), test.session.clone(), Path(viewer.id)).await;

    assert_eq!(status(result), StatusCode::FORBIDDEN);

    Ok(())
}

/// Expect 400 when an admin deletes their own account
#[tokio::test]
async fn admin_cannot_delete_self() -> Result<(), TestError> {
    let test = test_setup_with_tables!()?;
    let admin = login_as(&test, "admin", UserRole::Admin).await?;

    let result = delete_user(State(test.state()), test.session.clone(), Path(admin.id)).await;

    let resp = result.err().unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body_json(resp).await["error"],
        "You cannot delete your own account"
    );

    Ok(())
}

/// Expect a pending temporary password to block administration
#[tokio::test]
async fn pending_password_change_blocks_admin() -> Result<(), TestError> {
    let test = test_setup_with_tables!()?;
    let admin = login_as(&test, "admin", UserRole::Admin).await?;
    marketlens::server::data::user::UserRepository::new(&test.db)
        .set_password(admin.id, &admin.password_hash, true)
        .await?;

    let result = get_users(State(test.state()), test.session.clone()).await;

    let resp = result.err().unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
    assert_eq!(body_json(resp).await["error"], "Password change required");

    Ok(())
}
