//! Transactional email.
//!
//! Mail is best-effort: [`send_quietly`] logs delivery failures and never
//! returns them, so a slow or broken provider cannot fail a registration.

mod sendgrid;
pub mod templates;

pub use sendgrid::SendGridMailer;

use async_trait::async_trait;
use tracing::{info, warn};

use crate::error::PortalResult;

/// One outgoing message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Email {
    /// Recipient address.
    pub to: String,
    /// Sender address.
    pub from: String,
    /// Subject line.
    pub subject: String,
    /// HTML body.
    pub html: String,
}

/// Email delivery backend.
#[async_trait]
pub trait Mailer: Send + Sync {
    /// Deliver `email`.
    async fn send(&self, email: &Email) -> PortalResult<()>;

    /// Whether messages actually leave the process.
    fn delivers(&self) -> bool {
        true
    }
}

/// Mailer that only logs, used when no provider key is configured.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogMailer;

#[async_trait]
impl Mailer for LogMailer {
    async fn send(&self, email: &Email) -> PortalResult<()> {
        info!(to = %email.to, subject = %email.subject, "Email delivery disabled, message logged only");
        Ok(())
    }

    fn delivers(&self) -> bool {
        false
    }
}

/// Send `email`, logging instead of returning any failure.
pub async fn send_quietly(mailer: &dyn Mailer, email: &Email) {
    match mailer.send(email).await {
        Ok(()) => info!(to = %email.to, subject = %email.subject, "Email sent"),
        Err(e) => warn!(to = %email.to, error = %e, "Email delivery failed"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PortalError;

    struct Broken;

    #[async_trait]
    impl Mailer for Broken {
        async fn send(&self, _email: &Email) -> PortalResult<()> {
            Err(PortalError::email("provider down", None))
        }
    }

    fn email() -> Email {
        Email {
            to: "a@example.com".to_string(),
            from: "events@example.com".to_string(),
            subject: "Hi".to_string(),
            html: "<p>Hi</p>".to_string(),
        }
    }

    #[tokio::test]
    async fn test_send_quietly_swallows_errors() {
        send_quietly(&Broken, &email()).await;
    }

    #[tokio::test]
    async fn test_log_mailer_accepts_everything() {
        assert!(LogMailer.send(&email()).await.is_ok());
        assert!(!LogMailer.delivers());
    }
}
