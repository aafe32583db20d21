use serde::{Deserialize, Serialize};
use tower_sessions::Session;

use crate::server::error::Error;

pub const SESSION_USER_ID_KEY: &str = "marketlens:user:id";

#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionUserId(pub i32);

impl SessionUserId {
    /// Authenticate the session as `user_id`
    ///
    /// The session ID is rotated before the user is stored so a pre-login session ID can't be
    /// reused after authentication.
    pub async fn login(session: &Session, user_id: i32) -> Result<(), Error> {
        session.cycle_id().await?;
        session
            .insert(SESSION_USER_ID_KEY, SessionUserId(user_id))
            .await?;

        Ok(())
    }

    /// Get user ID from session
    pub async fn get(session: &Session) -> Result<Option<i32>, Error> {
        Ok(session
            .get::<SessionUserId>(SESSION_USER_ID_KEY)
            .await?
            .map(|SessionUserId(user_id)| user_id))
    }

    /// Drop all session data and delete the session from the store
    pub async fn logout(session: &Session) -> Result<(), Error> {
        session.flush().await?;

        Ok(())
    }
}
