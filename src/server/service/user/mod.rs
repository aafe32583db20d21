//! User account service.
//!
//! Covers administrator account management, self-registration, login and password resets.
//! Provisioned accounts receive an emailed temporary password and are flagged until the user
//! replaces it.

#[cfg(test)]
mod tests;

use entity::sea_orm_active_enums::UserRole;
use sea_orm::{DatabaseConnection, DbErr, SqlErr, TransactionTrait};

use crate::{
    model::{
        api::FieldErrorDto,
        user::{
            CreateUserDto, CreatedUserDto, RegisterDto, ResetPasswordDto, UpdateUserDto, UserDto,
        },
    },
    server::{
        data::{
            competitor::CompetitorRepository,
            user::{NewUser, UserRepository},
        },
        error::{
            auth::AuthError,
            validation::{FieldErrors, ValidationError},
            Error,
        },
        model::db::UserModel,
        service::{
            mail::{Delivery, Mailer},
            password::{
                check_new_password, generate_temporary_password, spawn_hash_password,
                spawn_verify_password,
            },
            retry::RetryContext,
        },
    },
};

const USERNAME_LENGTH: std::ops::RangeInclusive<usize> = 3..=50;
const MAX_DISPLAY_NAME_LENGTH: usize = 100;

impl From<UserModel> for UserDto {
    fn from(u: UserModel) -> Self {
        Self {
            id: u.id,
            username: u.username,
            email: u.email,
            display_name: u.display_name,
            role: u.role,
            is_active: u.is_active,
            password_change_required: u.password_change_required,
            created_at: u.created_at,
            last_active_at: u.last_active_at,
        }
    }
}

fn check_username(errors: &mut FieldErrors, username: &str) {
    let length = username.chars().count();

    if !USERNAME_LENGTH.contains(&length) {
        errors.push(
            "username",
            format!(
                "must be between {} and {} characters",
                USERNAME_LENGTH.start(),
                USERNAME_LENGTH.end()
            ),
        );
    } else if !username
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-'))
    {
        errors.push(
            "username",
            "may only contain letters, digits, '_', '.' and '-'",
        );
    }
}

fn check_email(errors: &mut FieldErrors, email: &str) {
    let valid = match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.contains('@')
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
                && !email.chars().any(char::is_whitespace)
        }
        None => false,
    };

    if !valid {
        errors.push("email", "must be a valid email address");
    }
}

fn check_display_name(errors: &mut FieldErrors, display_name: &str) {
    if display_name.is_empty() {
        errors.push("displayName", "is required");
    } else if display_name.chars().count() > MAX_DISPLAY_NAME_LENGTH {
        errors.push(
            "displayName",
            format!("must be at most {} characters", MAX_DISPLAY_NAME_LENGTH),
        );
    }
}

/// Map a unique constraint violation raced past the uniqueness checks to a validation error.
fn unique_violation(err: DbErr) -> Error {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(detail)) => {
            let field = if detail.contains("email") {
                "email"
            } else {
                "username"
            };

            ValidationError::InvalidFields(vec![FieldErrorDto {
                field: field.to_string(),
                message: "is already in use".to_string(),
            }])
            .into()
        }
        _ => err.into(),
    }
}

pub struct UserService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> UserService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// All users in creation order, without password hashes
    pub async fn get_all(&self) -> Result<Vec<UserDto>, Error> {
        let db = self.db.clone();

        let users = RetryContext::new()
            .execute_with_retry("list users", || {
                let db = db.clone();

                Box::pin(async move { Ok(UserRepository::new(&db).get_all().await?) })
            })
            .await?;

        Ok(users.into_iter().map(UserDto::from).collect())
    }

    /// Look up the user behind a session, retrying transient storage failures
    pub async fn get_session_user(&self, user_id: i32) -> Result<Option<UserModel>, Error> {
        let db = self.db.clone();

        RetryContext::new()
            .execute_with_retry(&format!("get user ID {}", user_id), || {
                let db = db.clone();

                Box::pin(async move { Ok(UserRepository::new(&db).get_by_id(user_id).await?) })
            })
            .await
    }

    pub async fn get(&self, user_id: i32) -> Result<UserDto, Error> {
        let user = UserRepository::new(self.db)
            .get_by_id(user_id)
            .await?
            .ok_or_else(|| not_found(user_id))?;

        Ok(user.into())
    }

    /// Record username and email conflicts with accounts other than `exclude_user_id`
    async fn check_uniqueness(
        &self,
        errors: &mut FieldErrors,
        username: Option<&str>,
        email: Option<&str>,
        exclude_user_id: Option<i32>,
    ) -> Result<(), Error> {
        let user_repo = UserRepository::new(self.db);
        let is_other = |user: &UserModel| Some(user.id) != exclude_user_id;

        if let Some(username) = username {
            if user_repo
                .find_by_username(username)
                .await?
                .is_some_and(|u| is_other(&u))
            {
                errors.push("username", "is already taken");
            }
        }

        if let Some(email) = email {
            if user_repo
                .find_by_email(email)
                .await?
                .is_some_and(|u| is_other(&u))
            {
                errors.push("email", "is already in use");
            }
        }

        Ok(())
    }

    /// Provision an account with a temporary password and email it to the user
    ///
    /// Mail delivery is best-effort: a failure is logged and reported through
    /// `temporary_password_emailed` without undoing the account creation.
    pub async fn create(&self, dto: CreateUserDto, mailer: &Mailer) -> Result<CreatedUserDto, Error> {
        let username = dto.username.trim();
        let email = dto.email.trim();
        let display_name = dto.display_name.trim();

        let mut errors = FieldErrors::new();
        check_username(&mut errors, username);
        check_email(&mut errors, email);
        check_display_name(&mut errors, display_name);
        self.check_uniqueness(&mut errors, Some(username), Some(email), None)
            .await?;
        errors.into_result()?;

        let temporary_password = generate_temporary_password();
        let password_hash = spawn_hash_password(temporary_password.clone()).await?;

        let user = UserRepository::new(self.db)
            .create(NewUser {
                username,
                email,
                display_name,
                password_hash: &password_hash,
                role: dto.role,
                password_change_required: true,
            })
            .await
            .map_err(unique_violation)?;

        let temporary_password_emailed =
            match mailer.send_temporary_password(&user, &temporary_password).await {
                Ok(Delivery::Sent) => true,
                Ok(Delivery::Skipped) => {
                    tracing::warn!(
                        user_id = %user.id,
                        "Mail API not configured, temporary password was not delivered"
                    );
                    false
                }
                Err(e) => {
                    tracing::warn!(
                        user_id = %user.id,
                        "Failed to email temporary password: {}",
                        e
                    );
                    false
                }
            };

        tracing::info!(user_id = %user.id, role = ?user.role, "Provisioned user");

        Ok(CreatedUserDto {
            user: user.into(),
            temporary_password_emailed,
        })
    }

    /// Apply a partial update, passwords are changed only through [`Self::reset_password`]
    pub async fn update(&self, user_id: i32, dto: UpdateUserDto) -> Result<UserDto, Error> {
        let dto = UpdateUserDto {
            username: dto.username.map(|s| s.trim().to_string()),
            email: dto.email.map(|s| s.trim().to_string()),
            display_name: dto.display_name.map(|s| s.trim().to_string()),
            ..dto
        };

        let mut errors = FieldErrors::new();
        if let Some(username) = &dto.username {
            check_username(&mut errors, username);
        }
        if let Some(email) = &dto.email {
            check_email(&mut errors, email);
        }
        if let Some(display_name) = &dto.display_name {
            check_display_name(&mut errors, display_name);
        }
        self.check_uniqueness(
            &mut errors,
            dto.username.as_deref(),
            dto.email.as_deref(),
            Some(user_id),
        )
        .await?;
        errors.into_result()?;

        let user = UserRepository::new(self.db)
            .update(user_id, &dto)
            .await
            .map_err(unique_violation)?
            .ok_or_else(|| not_found(user_id))?;

        Ok(user.into())
    }

    /// Delete a user, releasing ownership of the competitors they created
    ///
    /// # Returns
    /// - `Ok(())` - User deleted
    /// - `Err(Error::InvalidOperation)` - `acting_user_id` tried to delete their own account
    /// - `Err(Error::NotFound)` - User does not exist
    pub async fn delete(&self, acting_user_id: i32, user_id: i32) -> Result<(), Error> {
        if acting_user_id == user_id {
            return Err(Error::InvalidOperation(
                "You cannot delete your own account".to_string(),
            ));
        }

        let txn = self.db.begin().await?;

        let released = CompetitorRepository::new(&txn).clear_owner(user_id).await?;
        let result = UserRepository::new(&txn).delete(user_id).await?;

        if result.rows_affected == 0 {
            txn.rollback().await?;
            return Err(not_found(user_id));
        }

        txn.commit().await?;

        tracing::info!(
            user_id = %user_id,
            deleted_by = %acting_user_id,
            released_competitors = %released.rows_affected,
            "Deleted user"
        );

        Ok(())
    }

    /// Create a viewer account with a user-chosen password
    pub async fn register(&self, dto: RegisterDto) -> Result<UserModel, Error> {
        let username = dto.username.trim();
        let email = dto.email.trim();
        let display_name = dto.display_name.trim();

        let mut errors = FieldErrors::new();
        check_username(&mut errors, username);
        check_email(&mut errors, email);
        check_display_name(&mut errors, display_name);
        check_new_password(&mut errors, "password", &dto.password);
        self.check_uniqueness(&mut errors, Some(username), Some(email), None)
            .await?;
        errors.into_result()?;

        let password_hash = spawn_hash_password(dto.password.clone()).await?;

        let user = UserRepository::new(self.db)
            .create(NewUser {
                username,
                email,
                display_name,
                password_hash: &password_hash,
                role: UserRole::Viewer,
                password_change_required: false,
            })
            .await
            .map_err(unique_violation)?;

        Ok(user)
    }

    /// Verify credentials and record the login time
    ///
    /// # Returns
    /// - `Ok(UserModel)` - Credentials valid and the account active
    /// - `Err(Error::AuthError(AuthError::InvalidCredentials))` - Unknown user or wrong password
    /// - `Err(Error::AuthError(AuthError::AccountDisabled))` - Account has been deactivated
    pub async fn authenticate(&self, username: &str, password: &str) -> Result<UserModel, Error> {
        let username = username.trim();
        let user_repo = UserRepository::new(self.db);

        let Some(user) = user_repo.find_by_username(username).await? else {
            return Err(AuthError::InvalidCredentials(username.to_string()).into());
        };

        if !spawn_verify_password(password.to_string(), user.password_hash.clone()).await? {
            return Err(AuthError::InvalidCredentials(username.to_string()).into());
        }

        if !user.is_active {
            return Err(AuthError::AccountDisabled(user.id).into());
        }

        user_repo.touch_last_active(user.id).await?;

        Ok(user)
    }

    /// Replace the user's password after checking the current one
    ///
    /// Clears `password_change_required`, which is how a temporary password is retired.
    pub async fn reset_password(&self, user_id: i32, dto: ResetPasswordDto) -> Result<(), Error> {
        let user_repo = UserRepository::new(self.db);

        let user = user_repo
            .get_by_id(user_id)
            .await?
            .ok_or_else(|| not_found(user_id))?;

        let mut errors = FieldErrors::new();
        let current_matches =
            spawn_verify_password(dto.current_password.clone(), user.password_hash.clone())
                .await?;
        if !current_matches {
            errors.push("currentPassword", "is incorrect");
        }
        check_new_password(&mut errors, "newPassword", &dto.new_password);
        if dto.new_password == dto.current_password {
            errors.push("newPassword", "must differ from the current password");
        }
        errors.into_result()?;

        let password_hash = spawn_hash_password(dto.new_password.clone()).await?;

        user_repo
            .set_password(user_id, &password_hash, false)
            .await?
            .ok_or_else(|| not_found(user_id))?;

        Ok(())
    }
}

fn not_found(user_id: i32) -> Error {
    Error::NotFound(format!("User {}", user_id))
}

