//! Transactional e-mail through the backend's `send-email` edge function.

use async_trait::async_trait;
use mockall::automock;
use reqwest::Client;
use serde::Serialize;
use thiserror::Error;

use crate::backend::BackendConfig;

/// Template used after a PIN has been stored.
pub const PIN_SET_TEMPLATE: &str = "pin-set-successfully";

/// Name used when the customer has none on record.
pub const DEFAULT_RECIPIENT_NAME: &str = "Valued Customer";

const SEND_EMAIL_PATH: &str = "functions/v1/send-email";

/// PIN confirmation e-mail payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PinSetEmail {
    pub email: String,
    pub name: String,
    pub box_code: String,
}

#[derive(Debug, Serialize)]
struct SendEmailRequest<'a> {
    template: &'a str,
    email: &'a str,
    name: &'a str,
    box_code: &'a str,
}

/// Errors that can occur when invoking the e-mail function.
#[derive(Debug, Error)]
pub enum MailerError {
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected response from send-email: {0}")]
    UnexpectedResponse(String),
}

#[automock]
#[async_trait]
pub trait Mailer: Send + Sync {
    /// Sends the PIN confirmation e-mail.
    async fn send_pin_set(&self, email: PinSetEmail) -> Result<(), MailerError>;
}

/// [`Mailer`] backed by the hosted edge function.
#[derive(Debug, Clone)]
pub struct EdgeFunctionMailer {
    backend: BackendConfig,
    http: Client,
}

impl EdgeFunctionMailer {
    #[must_use]
    pub fn new(backend: BackendConfig) -> Self {
        Self {
            backend,
            http: Client::new(),
        }
    }
}

#[async_trait]
impl Mailer for EdgeFunctionMailer {
    async fn send_pin_set(&self, email: PinSetEmail) -> Result<(), MailerError> {
        let body = SendEmailRequest {
            template: PIN_SET_TEMPLATE,
            email: &email.email,
            name: &email.name,
            box_code: &email.box_code,
        };

        let response = self
            .http
            .post(self.backend.endpoint(SEND_EMAIL_PATH))
            .header("apikey", &self.backend.anon_key)
            .bearer_auth(&self.backend.anon_key)
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();

            return Err(MailerError::UnexpectedResponse(format!(
                "send-email failed with status {status}: {text}"
            )));
        }

        Ok(())
    }
}
