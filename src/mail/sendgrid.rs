//! SendGrid v3 mail client.

use async_trait::async_trait;
use reqwest::Client;
use serde_json::json;
use std::time::Duration;

use super::{Email, Mailer};
use crate::error::{PortalError, PortalResult};

const SEND_URL: &str = "https://api.sendgrid.com/v3/mail/send";

/// Mailer backed by the SendGrid HTTP API.
#[derive(Debug, Clone)]
pub struct SendGridMailer {
    client: Client,
    api_key: String,
}

impl SendGridMailer {
    /// Create a mailer.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(api_key: String) -> PortalResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .map_err(|e| PortalError::email("Failed to build HTTP client", Some(Box::new(e))))?;

        Ok(Self { client, api_key })
    }
}

/// Request body for `mail/send`.
fn payload(email: &Email) -> serde_json::Value {
    json!({
        "personalizations": [{ "to": [{ "email": email.to }] }],
        "from": { "email": email.from },
        "subject": email.subject,
        "content": [{ "type": "text/html", "value": email.html }],
    })
}

#[async_trait]
impl Mailer for SendGridMailer {
    async fn send(&self, email: &Email) -> PortalResult<()> {
        let response = self
            .client
            .post(SEND_URL)
            .bearer_auth(&self.api_key)
            .json(&payload(email))
            .send()
            .await
            .map_err(|e| PortalError::email("Request to SendGrid failed", Some(Box::new(e))))?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(PortalError::email(
                format!("SendGrid returned status {}: {detail}", status.as_u16()),
                None,
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payload_shape() {
        let body = payload(&Email {
            to: "founder@example.com".to_string(),
            from: "events@example.com".to_string(),
            subject: "Welcome".to_string(),
            html: "<p>Hello</p>".to_string(),
        });
        assert_eq!(body["personalizations"][0]["to"][0]["email"], "founder@example.com");
        assert_eq!(body["from"]["email"], "events@example.com");
        assert_eq!(body["content"][0]["type"], "text/html");
    }
}
