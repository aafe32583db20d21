//! User account fixtures.

use chrono::Utc;
use entity::sea_orm_active_enums::UserRole;
use sea_orm::{ActiveValue, EntityTrait};

use crate::{constant::TEST_PASSWORD_HASH, error::TestError, model::UserModel, TestContext};

impl TestContext {
    pub fn user(&self) -> UserFixtures<'_> {
        UserFixtures { setup: self }
    }
}

pub struct UserFixtures<'a> {
    setup: &'a TestContext,
}

impl<'a> UserFixtures<'a> {
    /// Insert an active user with the placeholder password hash.
    ///
    /// The email is derived from the username (`<username>@example.com`).
    pub async fn insert_user(&self, username: &str, role: UserRole) -> Result<UserModel, TestError> {
        self.insert_user_with_password_hash(username, role, TEST_PASSWORD_HASH)
            .await
    }

    /// Insert an active user storing the provided password hash.
    pub async fn insert_user_with_password_hash(
        &self,
        username: &str,
        role: UserRole,
        password_hash: &str,
    ) -> Result<UserModel, TestError> {
        Ok(entity::prelude::User::insert(entity::user::ActiveModel {
            username: ActiveValue::Set(username.to_string()),
            email: ActiveValue::Set(format!("{}@example.com", username)),
            password_hash: ActiveValue::Set(password_hash.to_string()),
            display_name: ActiveValue::Set(username.to_string()),
            role: ActiveValue::Set(role),
            is_active: ActiveValue::Set(true),
            password_change_required: ActiveValue::Set(false),
            created_at: ActiveValue::Set(Utc::now().naive_utc()),
            last_active_at: ActiveValue::Set(None),
            ..Default::default()
        })
        .exec_with_returning(&self.setup.db)
        .await?)
    }

    /// Insert a user which has been deactivated by an administrator.
    pub async fn insert_inactive_user(
        &self,
        username: &str,
        role: UserRole,
    ) -> Result<UserModel, TestError> {
        let user = self.insert_user(username, role).await?;

        Ok(entity::prelude::User::update(entity::user::ActiveModel {
            id: ActiveValue::Unchanged(user.id),
            is_active: ActiveValue::Set(false),
            ..Default::default()
        })
        .exec(&self.setup.db)
        .await?)
    }
}
