//! Helpers for driving handlers with a [`TestContext`].

use entity::sea_orm_active_enums::UserRole;
use marketlens::server::{
    model::{
        app::AppState,
        db::UserModel,
        session::user::{SessionUserId, SESSION_USER_ID_KEY},
    },
    service::mail::{MailSettings, Mailer},
};
use marketlens_test_utils::{
    constant::{TEST_APP_URL, TEST_MAIL_API_KEY, TEST_MAIL_FROM},
    prelude::*,
};

pub trait TestContextExt {
    /// Application state sharing the context's database, mailing to the mock server
    fn state(&self) -> AppState;
}

impl TestContextExt for TestContext {
    fn state(&self) -> AppState {
        AppState {
            db: self.db.clone(),
            mailer: Mailer::new(MailSettings {
                api_url: Some(self.mail_api_url()),
                api_key: Some(TEST_MAIL_API_KEY.to_string()),
                from: TEST_MAIL_FROM.to_string(),
                app_url: TEST_APP_URL.to_string(),
            })
            .expect("mail client should build"),
        }
    }
}

/// Insert a user and put them in the context's session
pub async fn login_as(
    test: &TestContext,
    username: &str,
    role: UserRole,
) -> Result<UserModel, TestError> {
    let user = test.user().insert_user(username, role).await?;
    test.session
        .insert(SESSION_USER_ID_KEY, SessionUserId(user.id))
        .await?;

    Ok(user)
}
