use chrono::Utc;
use entity::sea_orm_active_enums::UserRole;
use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr,
    DeleteResult, EntityTrait, IntoActiveModel, QueryFilter, QueryOrder,
};

use crate::{model::user::UpdateUserDto, server::model::db::UserModel};

/// Values for inserting a user account.
pub struct NewUser<'a> {
    pub username: &'a str,
    pub email: &'a str,
    pub display_name: &'a str,
    pub password_hash: &'a str,
    pub role: UserRole,
    pub password_change_required: bool,
}

pub struct UserRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> UserRepository<'a, C> {
    /// Creates a new instance of [`UserRepository`]
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Creates a new active user
    pub async fn create(&self, user: NewUser<'_>) -> Result<UserModel, DbErr> {
        let user = entity::user::ActiveModel {
            username: ActiveValue::Set(user.username.to_string()),
            email: ActiveValue::Set(user.email.to_string()),
            password_hash: ActiveValue::Set(user.password_hash.to_string()),
            display_name: ActiveValue::Set(user.display_name.to_string()),
            role: ActiveValue::Set(user.role),
            is_active: ActiveValue::Set(true),
            password_change_required: ActiveValue::Set(user.password_change_required),
            created_at: ActiveValue::Set(Utc::now().naive_utc()),
            last_active_at: ActiveValue::Set(None),
            ..Default::default()
        };

        user.insert(self.db).await
    }

    pub async fn get_by_id(&self, user_id: i32) -> Result<Option<UserModel>, DbErr> {
        entity::prelude::User::find_by_id(user_id).one(self.db).await
    }

    pub async fn find_by_username(&self, username: &str) -> Result<Option<UserModel>, DbErr> {
        entity::prelude::User::find()
            .filter(entity::user::Column::Username.eq(username))
            .one(self.db)
            .await
    }

    pub async fn find_by_email(&self, email: &str) -> Result<Option<UserModel>, DbErr> {
        entity::prelude::User::find()
            .filter(entity::user::Column::Email.eq(email))
            .one(self.db)
            .await
    }

    /// All users in creation order
    pub async fn get_all(&self) -> Result<Vec<UserModel>, DbErr> {
        entity::prelude::User::find()
            .order_by_asc(entity::user::Column::CreatedAt)
            .order_by_asc(entity::user::Column::Id)
            .all(self.db)
            .await
    }

    /// Applies the provided fields, leaving omitted fields unchanged
    ///
    /// Returns `Ok(None)` if the user does not exist.
    pub async fn update(
        &self,
        user_id: i32,
        changes: &UpdateUserDto,
    ) -> Result<Option<UserModel>, DbErr> {
        let Some(user) = self.get_by_id(user_id).await? else {
            return Ok(None);
        };

        let mut user_am = user.into_active_model();

        if let Some(username) = &changes.username {
            user_am.username = ActiveValue::Set(username.clone());
        }
        if let Some(email) = &changes.email {
            user_am.email = ActiveValue::Set(email.clone());
        }
        if let Some(display_name) = &changes.display_name {
            user_am.display_name = ActiveValue::Set(display_name.clone());
        }
        if let Some(role) = changes.role {
            user_am.role = ActiveValue::Set(role);
        }
        if let Some(is_active) = changes.is_active {
            user_am.is_active = ActiveValue::Set(is_active);
        }

        let user = user_am.update(self.db).await?;

        Ok(Some(user))
    }

    /// Replaces the password hash and sets whether the user must change it on next login
    pub async fn set_password(
        &self,
        user_id: i32,
        password_hash: &str,
        password_change_required: bool,
    ) -> Result<Option<UserModel>, DbErr> {
        let Some(user) = self.get_by_id(user_id).await? else {
            return Ok(None);
        };

        let mut user_am = user.into_active_model();
        user_am.password_hash = ActiveValue::Set(password_hash.to_string());
        user_am.password_change_required = ActiveValue::Set(password_change_required);

        let user = user_am.update(self.db).await?;

        Ok(Some(user))
    }

    /// Sets `last_active_at` to the current time
    pub async fn touch_last_active(&self, user_id: i32) -> Result<(), DbErr> {
        entity::prelude::User::update_many()
            .col_expr(
                entity::user::Column::LastActiveAt,
                Expr::value(Utc::now().naive_utc()),
            )
            .filter(entity::user::Column::Id.eq(user_id))
            .exec(self.db)
            .await?;

        Ok(())
    }

    /// Deletes a user
    ///
    /// Returns OK regardless of user existing, to confirm the deletion result
    /// check the [`DeleteResult::rows_affected`] field.
    pub async fn delete(&self, user_id: i32) -> Result<DeleteResult, DbErr> {
        entity::prelude::User::delete_by_id(user_id)
            .exec(self.db)
            .await
    }
}
