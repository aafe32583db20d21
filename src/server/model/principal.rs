//! Request-scoped authenticated principal and the role checks of the access gate.
//!
//! A [`Principal`] is resolved from the session once per request by the controllers and its
//! user ID handed explicitly to every service call that needs to know who is acting.

use entity::sea_orm_active_enums::UserRole;

use crate::server::{error::auth::AuthError, model::db::UserModel};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Principal {
    pub user_id: i32,
    pub role: UserRole,
    /// The user still holds an administrator-issued temporary password
    pub password_change_required: bool,
}

impl From<&UserModel> for Principal {
    fn from(user: &UserModel) -> Self {
        Self {
            user_id: user.id,
            role: user.role,
            password_change_required: user.password_change_required,
        }
    }
}

impl Principal {
    /// Role must be exactly admin.
    pub fn require_admin(&self) -> Result<(), AuthError> {
        match self.role {
            UserRole::Admin => Ok(()),
            _ => Err(AuthError::Forbidden(self.user_id)),
        }
    }

    /// Role must be admin or analyst.
    pub fn require_analyst_or_admin(&self) -> Result<(), AuthError> {
        match self.role {
            UserRole::Admin | UserRole::Analyst => Ok(()),
            UserRole::Viewer => Err(AuthError::Forbidden(self.user_id)),
        }
    }

    /// Refuse principals which have not yet replaced a temporary password.
    pub fn require_password_current(&self) -> Result<(), AuthError> {
        if self.password_change_required {
            return Err(AuthError::PasswordChangeRequired(self.user_id));
        }

        Ok(())
    }
}
