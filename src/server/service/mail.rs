//! Outgoing email through an HTTP mail delivery API.
//!
//! Messages are posted as JSON to `{api_url}/send` with a bearer token. When no API URL is
//! configured the mailer is disabled and every send reports [`Delivery::Skipped`].

use std::time::Duration;

use serde::Serialize;

use crate::server::{error::Error, model::db::UserModel};

/// Upper bound on a single call to the mail API.
pub const MAIL_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Clone, Default)]
pub struct MailSettings {
    pub api_url: Option<String>,
    pub api_key: Option<String>,
    pub from: String,
    /// Public URL of the application, linked in outgoing messages
    pub app_url: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delivery {
    Sent,
    Skipped,
}

#[derive(Serialize)]
struct OutgoingMessage<'a> {
    from: &'a str,
    to: &'a str,
    subject: &'a str,
    text: &'a str,
}

#[derive(Clone)]
pub struct Mailer {
    client: reqwest::Client,
    settings: MailSettings,
}

impl Mailer {
    pub fn new(settings: MailSettings) -> Result<Self, Error> {
        Self::with_timeout(settings, MAIL_REQUEST_TIMEOUT)
    }

    /// Mailer whose requests are abandoned after `timeout`
    pub fn with_timeout(settings: MailSettings, timeout: Duration) -> Result<Self, Error> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self { client, settings })
    }

    /// Whether sends reach the mail API
    pub fn is_enabled(&self) -> bool {
        self.settings.api_url.is_some()
    }

    /// Send a plain-text message
    ///
    /// # Returns
    /// - `Ok(Delivery::Sent)` - The mail API accepted the message
    /// - `Ok(Delivery::Skipped)` - No mail API is configured
    /// - `Err(Error::MailError)` - Request failed, timed out or the API answered with an error
    ///   status
    pub async fn send(&self, to: &str, subject: &str, text: &str) -> Result<Delivery, Error> {
        let Some(api_url) = &self.settings.api_url else {
            tracing::debug!(to = %to, "Mail API not configured, skipping message");
            return Ok(Delivery::Skipped);
        };

        let mut request = self
            .client
            .post(format!("{}/send", api_url.trim_end_matches('/')))
            .json(&OutgoingMessage {
                from: &self.settings.from,
                to,
                subject,
                text,
            });

        if let Some(api_key) = &self.settings.api_key {
            request = request.bearer_auth(api_key);
        }

        request.send().await?.error_for_status()?;

        Ok(Delivery::Sent)
    }

    /// Send a newly provisioned user their temporary password
    pub async fn send_temporary_password(
        &self,
        user: &UserModel,
        temporary_password: &str,
    ) -> Result<Delivery, Error> {
        let text = format!(
            "Hello {},\n\n\
             An account has been created for you on MarketLens.\n\n\
             Username: {}\n\
             Temporary password: {}\n\n\
             Sign in at {} and choose a new password, the temporary one can only be used to \
             do so.\n",
            user.display_name, user.username, temporary_password, self.settings.app_url
        );

        self.send(&user.email, "Your MarketLens account", &text)
            .await
    }
}
