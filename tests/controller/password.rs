use marketlens::{
    model::user::ResetPasswordDto,
    server::{
        controller::password::reset_password, data::user::UserRepository,
        service::password::hash_password,
    },
};

use super::*;

/// Expect 204 and the temporary password retired
#[tokio::test]
async fn replaces_temporary_password() -> Result<(), TestError> {
    let test = test_setup_with_tables!()?;
    let user = login_as(&test, "fresh", UserRole::Analyst).await?;
    let hash = hash_password("Temp234abcde").unwrap();
    UserRepository::new(&test.db)
        .set_password(user.id, &hash, true)
        .await?;

    let result = reset_password(
        State(test.state()),
        test.session.clone(),
        AppJson(ResetPasswordDto {
            current_password: "Temp234abcde".to_string(),
            new_password: "chosen by me".to_string(),
        }),
    )
    .await;

    assert_eq!(status(result), StatusCode::NO_CONTENT);
    let user = UserRepository::new(&test.db).get_by_id(user.id).await?.unwrap();
    assert!(!user.password_change_required);

    Ok(())
}

#[tokio::test]
async fn rejects_wrong_current_password() -> Result<(), TestError> {
    let test = test_setup_with_tables!()?;
    let user = login_as(&test, "fresh", UserRole::Analyst).await?;
    let hash = hash_password("Temp234abcde").unwrap();
    UserRepository::new(&test.db)
        .set_password(user.id, &hash, true)
        .await?;

    let result = reset_password(
        State(test.state()),
        test.session.clone(),
        AppJson(ResetPasswordDto {
            current_password: "guess".to_string(),
            new_password: "chosen by me".to_string(),
        }),
    )
    .await;

    assert_eq!(status(result), StatusCode::BAD_REQUEST);

    Ok(())
}

#[tokio::test]
async fn requires_session() -> Result<(), TestError> {
    let test = test_setup_with_tables!()?;

    let result = reset_password(
        State(test.state()),
        test.session.clone(),
        AppJson(ResetPasswordDto {
            current_password: "anything".to_string(),
            new_password: "chosen by me".to_string(),
        }),
    )
    .await;

    assert_eq!(status(result), StatusCode::UNAUTHORIZED);

    Ok(())
}
