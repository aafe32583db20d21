use sea_orm::DatabaseConnection;

use crate::server::service::mail::Mailer;

#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub mailer: Mailer,
}
