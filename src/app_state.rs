//! Shared application state for the HTTP handlers.

use axum::extract::FromRef;
use axum_extra::extract::cookie::Key;
use std::sync::Arc;
use std::time::SystemTime;
use tracing::{info, warn};

use crate::ai::{AnthropicClient, ContentModel};
use crate::auth::SessionSettings;
use crate::config::Config;
use crate::db::SheetStore;
use crate::error::{PortalError, PortalResult};
use crate::limiter::Limiters;
use crate::mail::{LogMailer, Mailer, SendGridMailer};

/// Everything a handler needs, cheap to clone.
#[derive(Clone)]
pub struct AppState {
    /// Spreadsheet store for submissions, usage logs and admins.
    pub store: Arc<dyn SheetStore>,
    /// Outgoing email.
    pub mailer: Arc<dyn Mailer>,
    /// External content model, absent when no API key is configured.
    pub model: Option<Arc<dyn ContentModel>>,
    /// Per-action rate limiters.
    pub limiters: Limiters,
    /// Session cookie encryption key.
    pub cookie_key: Key,
    /// Session lifetime and cookie attributes.
    pub session: SessionSettings,
    /// Sender address for confirmations.
    pub email_from: String,
    /// Application start time for uptime tracking.
    pub start_time: SystemTime,
}

impl AppState {
    /// State with a log-only mailer, no AI model, fresh limiters and a random cookie key.
    #[must_use]
    pub fn new(store: Arc<dyn SheetStore>) -> Self {
        Self {
            store,
            mailer: Arc::new(LogMailer),
            model: None,
            limiters: Limiters::standard(),
            cookie_key: Key::generate(),
            session: SessionSettings::default(),
            email_from: "noreply@ceo-summit.org".to_string(),
            start_time: SystemTime::now(),
        }
    }

    /// Wire collaborators from configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if an HTTP client cannot be built or the session
    /// secret is rejected.
    pub fn from_config(config: &Config, store: Arc<dyn SheetStore>) -> PortalResult<Self> {
        let mailer: Arc<dyn Mailer> = match config.sendgrid_api_key() {
            Some(key) => Arc::new(SendGridMailer::new(key.to_string())?),
            None => {
                warn!("SENDGRID_API_KEY not set, confirmation emails will only be logged");
                Arc::new(LogMailer)
            }
        };

        let model: Option<Arc<dyn ContentModel>> = match config.anthropic_api_key() {
            Some(key) => {
                info!(model = config.ai_model(), "AI generation enabled");
                Some(Arc::new(AnthropicClient::new(
                    key.to_string(),
                    config.ai_model().to_string(),
                    config.ai_timeout(),
                )?))
            }
            None => {
                warn!("ANTHROPIC_API_KEY not set, content will come from templates");
                None
            }
        };

        let cookie_key = match config.session_secret() {
            Some(secret) => Key::try_from(secret.as_bytes()).map_err(|e| {
                PortalError::config(format!("SESSION_SECRET cannot be used as a key: {e}"), None)
            })?,
            None => {
                warn!("SESSION_SECRET not set, generated a random key; sessions end on restart");
                Key::generate()
            }
        };

        let ttl = chrono::Duration::from_std(config.session_ttl())
            .map_err(|e| PortalError::config("SESSION_TTL_HOURS is out of range", Some(Box::new(e))))?;

        Ok(Self {
            store,
            mailer,
            model,
            limiters: Limiters::standard(),
            cookie_key,
            session: SessionSettings {
                ttl,
                secure: config.cookie_secure(),
            },
            email_from: config.email_from().to_string(),
            start_time: SystemTime::now(),
        })
    }

    /// Replace the mailer.
    #[must_use]
    pub fn with_mailer(mut self, mailer: Arc<dyn Mailer>) -> Self {
        self.mailer = mailer;
        self
    }

    /// Replace the content model.
    #[must_use]
    pub fn with_model(mut self, model: Option<Arc<dyn ContentModel>>) -> Self {
        self.model = model;
        self
    }

    /// Replace the rate limiters.
    #[must_use]
    pub fn with_limiters(mut self, limiters: Limiters) -> Self {
        self.limiters = limiters;
        self
    }

    /// Replace the session settings.
    #[must_use]
    pub fn with_session(mut self, session: SessionSettings) -> Self {
        self.session = session;
        self
    }
}

impl FromRef<AppState> for Key {
    fn from_ref(state: &AppState) -> Self {
        state.cookie_key.clone()
    }
}
