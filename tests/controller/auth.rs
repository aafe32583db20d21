use marketlens::{
    model::user::{LoginDto, RegisterDto},
    server::{
        controller::auth::{get_user, login, logout, register},
        model::session::user::SessionUserId,
        service::password::hash_password,
    },
};

use super::*;

fn credentials(username: &str, password: &str) -> AppJson<LoginDto> {
    AppJson(LoginDto {
        username: username.to_string(),
        password: password.to_string(),
    })
}

/// Expect 200 and the user stored in session after a successful login
#[tokio::test]
async fn logs_in_with_valid_credentials() -> Result<(), TestError> {
    let test = test_setup_with_tables!()?;
    let hash = hash_password("correct horse").unwrap();
    let user = test
        .user()
        .insert_user_with_password_hash("analyst", UserRole::Analyst, &hash)
        .await?;

    let result = login(
        State(test.state()),
        test.session.clone(),
        credentials("analyst", "correct horse"),
    )
    .await;

    let resp = result.unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_json(resp).await["username"], "analyst");
    assert_eq!(SessionUserId::get(&test.session).await.unwrap(), Some(user.id));

    Ok(())
}

/// Expect 401 for a wrong password without touching the session
#[tokio::test]
async fn fails_for_wrong_password() -> Result<(), TestError> {
    let test = test_setup_with_tables!()?;
    let hash = hash_password("correct horse").unwrap();
    test.user()
        .insert_user_with_password_hash("analyst", UserRole::Analyst, &hash)
        .await?;

    let result = login(
        State(test.state()),
        test.session.clone(),
        credentials("analyst", "battery staple"),
    )
    .await;

    assert_eq!(status(result), StatusCode::UNAUTHORIZED);
    assert!(SessionUserId::get(&test.session).await.unwrap().is_none());

    Ok(())
}

/// Expect 201 and a logged in viewer after registration
#[tokio::test]
async fn registers_viewer() -> Result<(), TestError> {
    let test = test_setup_with_tables!()?;

    let result = register(
        State(test.state()),
        test.session.clone(),
        AppJson(RegisterDto {
            username: "newcomer".to_string(),
            email: "newcomer@example.com".to_string(),
            display_name: "Newcomer".to_string(),
            password: "a fine password".to_string(),
        }),
    )
    .await;

    let resp = result.unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::CREATED);
    assert_eq!(body_json(resp).await["role"], "viewer");
    assert!(SessionUserId::get(&test.session).await.unwrap().is_some());

    Ok(())
}

/// Expect 204 and an empty session after logout
#[tokio::test]
async fn logs_out() -> Result<(), TestError> {
    let test = test_setup_with_tables!()?;
    login_as(&test, "viewer", UserRole::Viewer).await?;

    let result = logout(test.session.clone()).await;

    assert_eq!(status(result), StatusCode::NO_CONTENT);
    assert!(SessionUserId::get(&test.session).await.unwrap().is_none());

    Ok(())
}

/// Expect 204 even when nobody is logged in
#[tokio::test]
async fn logs_out_anonymous_session() -> Result<(), TestError> {
    let test = test_setup_with_tables!()?;

    let result = logout(test.session.clone()).await;

    assert_eq!(status(result), StatusCode::NO_CONTENT);

    Ok(())
}

#[tokio::test]
async fn get_user_requires_session() -> Result<(), TestError> {
    let test = test_setup_with_tables!()?;

    let result = get_user(State(test.state()), test.session.clone()).await;

    assert_eq!(status(result), StatusCode::UNAUTHORIZED);

    Ok(())
}

/// Expect the current user to be readable while a temporary password is pending
#[tokio::test]
async fn get_user_allows_pending_password_change() -> Result<(), TestError> {
    let test = test_setup_with_tables!()?;
    let user = login_as(&test, "fresh", UserRole::Analyst).await?;
    marketlens::server::data::user::UserRepository::new(&test.db)
        .set_password(user.id, &user.password_hash, true)
        .await?;

    let result = get_user(State(test.state()), test.session.clone()).await;

    let resp = result.unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_json(resp).await["passwordChangeRequired"], true);

    Ok(())
}
