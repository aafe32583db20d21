use tower_sessions::Session;

use crate::server::{
    error::{auth::AuthError, Error},
    model::{app::AppState, db::UserModel, principal::Principal, session::user::SessionUserId},
    service::user::UserService,
};

/// Retrieves the active user behind the session
///
/// Users holding a temporary password are accepted, use [`get_principal`] for every route that
/// should refuse them.
///
/// # Returns
/// - `Ok(UserModel)`: User found and active
/// - `Err(Error::AuthError(AuthError::UserNotInSession))`: Anonymous session
/// - `Err(Error::AuthError(AuthError::UserNotInDatabase))`: User was deleted, session is cleared
/// - `Err(Error::AuthError(AuthError::UserInactive))`: User was deactivated, session is cleared
pub async fn get_session_user(state: &AppState, session: &Session) -> Result<UserModel, Error> {
    let Some(user_id) = SessionUserId::get(session).await? else {
        return Err(AuthError::UserNotInSession.into());
    };

    let Some(user) = UserService::new(&state.db).get_session_user(user_id).await? else {
        SessionUserId::logout(session).await?;

        tracing::warn!(
            "Session cleared for user ID {} with active session but was not found in database",
            user_id
        );

        return Err(AuthError::UserNotInDatabase(user_id).into());
    };

    if !user.is_active {
        SessionUserId::logout(session).await?;

        tracing::warn!("Session cleared for deactivated user ID {}", user_id);

        return Err(AuthError::UserInactive(user_id).into());
    }

    Ok(user)
}

/// Resolve the request principal, refusing users who must first replace a temporary password
pub async fn get_principal(state: &AppState, session: &Session) -> Result<Principal, Error> {
    let user = get_session_user(state, session).await?;

    let principal = Principal::from(&user);
    principal.require_password_current()?;

    Ok(principal)
}
