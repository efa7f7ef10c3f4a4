//! Configuration management for the event portal.
//!
//! This module loads and validates configuration from environment variables
//! using the `dotenvy` crate. All operations return [`PortalResult`].
//!
//! ## Environment Variables
//!
//! All optional (with defaults):
//! - `PORT`: HTTP listen port (default: 8080)
//! - `DATABASE_URL`: SQLite URL for the sheet store (default: `sqlite:./ceo_portal.db`)
//! - `SESSION_SECRET`: Cookie encryption secret, at least 64 bytes
//!   (default: a random key per process, sessions do not survive restarts)
//! - `SESSION_TTL_HOURS`: Admin session lifetime, at most 720 (default: 8)
//! - `COOKIE_SECURE`: Mark the session cookie `Secure` (default: false)
//! - `ANTHROPIC_API_KEY`: Enables AI generation (default: templates only)
//! - `AI_MODEL`: Model name (default: `claude-3-5-sonnet-latest`)
//! - `AI_TIMEOUT_SECS`: AI request timeout (default: 30)
//! - `SENDGRID_API_KEY`: Enables email delivery (default: log only)
//! - `EMAIL_FROM`: Sender address (default: `noreply@ceo-summit.org`)
//! - `RATE_LIMIT_RPM`: API-wide requests per minute (default: 600)
//! - `SWEEP_INTERVAL_SECS`: Rate-limit sweep interval (default: 60)
//!
//! ## Example
//!
//! ```no_run
//! use ceo_portal::config::Config;
//! use ceo_portal::error::PortalResult;
//!
//! # fn main() -> PortalResult<()> {
//! let config = Config::from_env()?;
//! println!("Listening on port {}", config.port());
//! # Ok(())
//! # }
//! ```

use crate::error::{PortalError, PortalResult};
use std::env;
use std::str::FromStr;
use std::time::Duration;

/// Minimum `SESSION_SECRET` length accepted by the cookie key.
pub const MIN_SECRET_BYTES: usize = 64;

/// Longest accepted admin session, in hours (30 days).
pub const MAX_SESSION_TTL_HOURS: u64 = 30 * 24;

/// Runtime configuration for the portal.
#[derive(Clone)]
pub struct Config {
    port: u16,
    database_url: String,
    session_secret: Option<String>,
    session_ttl_hours: u64,
    cookie_secure: bool,
    anthropic_api_key: Option<String>,
    ai_model: String,
    ai_timeout_secs: u64,
    sendgrid_api_key: Option<String>,
    email_from: String,
    rate_limit_rpm: u32,
    sweep_interval_secs: u64,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let redact = |v: &Option<String>| v.as_ref().map(|_| "<redacted>");
        f.debug_struct("Config")
            .field("port", &self.port)
            .field("database_url", &self.database_url)
            .field("session_secret", &redact(&self.session_secret))
            .field("session_ttl_hours", &self.session_ttl_hours)
            .field("cookie_secure", &self.cookie_secure)
            .field("anthropic_api_key", &redact(&self.anthropic_api_key))
            .field("ai_model", &self.ai_model)
            .field("ai_timeout_secs", &self.ai_timeout_secs)
            .field("sendgrid_api_key", &redact(&self.sendgrid_api_key))
            .field("email_from", &self.email_from)
            .field("rate_limit_rpm", &self.rate_limit_rpm)
            .field("sweep_interval_secs", &self.sweep_interval_secs)
            .finish()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 8080,
            database_url: "sqlite:./ceo_portal.db".to_string(),
            session_secret: None,
            session_ttl_hours: 8,
            cookie_secure: false,
            anthropic_api_key: None,
            ai_model: "claude-3-5-sonnet-latest".to_string(),
            ai_timeout_secs: 30,
            sendgrid_api_key: None,
            email_from: "noreply@ceo-summit.org".to_string(),
            rate_limit_rpm: 600,
            sweep_interval_secs: 60,
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// This function:
    /// 1. Loads `.env` file using `dotenvy` (if present)
    /// 2. Reads and validates all environment variables
    /// 3. Applies defaults for anything unset
    ///
    /// # Errors
    ///
    /// Returns an error if a value is present but invalid, for example a
    /// non-numeric port or a session secret shorter than 64 bytes.
    pub fn from_env() -> PortalResult<Self> {
        // Load .env file if present (ignore error if file doesn't exist)
        dotenvy::dotenv().ok();

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable source.
    ///
    /// # Errors
    ///
    /// Same as [`Config::from_env`].
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> PortalResult<Self> {
        let text = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let defaults = Self::default();

        let session_secret = text("SESSION_SECRET");
        if let Some(secret) = &session_secret {
            if secret.len() < MIN_SECRET_BYTES {
                return Err(PortalError::config(
                    format!(
                        "SESSION_SECRET must be at least {MIN_SECRET_BYTES} bytes, got {}",
                        secret.len()
                    ),
                    None,
                ));
            }
        }

        let rate_limit_rpm = parse_or(text("RATE_LIMIT_RPM"), "RATE_LIMIT_RPM", defaults.rate_limit_rpm)?;
        if rate_limit_rpm == 0 {
            return Err(PortalError::config("RATE_LIMIT_RPM must be greater than zero", None));
        }

        let sweep_interval_secs =
            parse_or(text("SWEEP_INTERVAL_SECS"), "SWEEP_INTERVAL_SECS", defaults.sweep_interval_secs)?;
        if sweep_interval_secs == 0 {
            return Err(PortalError::config("SWEEP_INTERVAL_SECS must be greater than zero", None));
        }

        let session_ttl_hours =
            parse_or(text("SESSION_TTL_HOURS"), "SESSION_TTL_HOURS", defaults.session_ttl_hours)?;
        if session_ttl_hours == 0 {
            return Err(PortalError::config("SESSION_TTL_HOURS must be greater than zero", None));
        }
        if session_ttl_hours > MAX_SESSION_TTL_HOURS {
            return Err(PortalError::config(
                format!("SESSION_TTL_HOURS must be at most {MAX_SESSION_TTL_HOURS}"),
                None,
            ));
        }

        Ok(Self {
            port: parse_or(text("PORT"), "PORT", defaults.port)?,
            database_url: text("DATABASE_URL").unwrap_or(defaults.database_url),
            session_secret,
            session_ttl_hours,
            cookie_secure: parse_or(text("COOKIE_SECURE"), "COOKIE_SECURE", defaults.cookie_secure)?,
            anthropic_api_key: text("ANTHROPIC_API_KEY"),
            ai_model: text("AI_MODEL").unwrap_or(defaults.ai_model),
            ai_timeout_secs: parse_or(text("AI_TIMEOUT_SECS"), "AI_TIMEOUT_SECS", defaults.ai_timeout_secs)?,
            sendgrid_api_key: text("SENDGRID_API_KEY"),
            email_from: text("EMAIL_FROM").unwrap_or(defaults.email_from),
            rate_limit_rpm,
            sweep_interval_secs,
        })
    }

    /// Override the listen port.
    #[must_use]
    pub const fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Get the listen port.
    #[must_use]
    pub const fn port(&self) -> u16 {
        self.port
    }

    /// Get the database URL.
    #[must_use]
    pub fn database_url(&self) -> &str {
        &self.database_url
    }

    /// Get the session secret, if configured.
    #[must_use]
    pub fn session_secret(&self) -> Option<&str> {
        self.session_secret.as_deref()
    }

    /// Get the session lifetime.
    #[must_use]
    pub const fn session_ttl(&self) -> Duration {
        Duration::from_secs(self.session_ttl_hours.saturating_mul(3600))
    }

    /// Check if the session cookie is marked `Secure`.
    #[must_use]
    pub const fn cookie_secure(&self) -> bool {
        self.cookie_secure
    }

    /// Get the Anthropic API key, if configured.
    #[must_use]
    pub fn anthropic_api_key(&self) -> Option<&str> {
        self.anthropic_api_key.as_deref()
    }

    /// Get the AI model name.
    #[must_use]
    pub fn ai_model(&self) -> &str {
        &self.ai_model
    }

    /// Get the AI request timeout.
    #[must_use]
    pub const fn ai_timeout(&self) -> Duration {
        Duration::from_secs(self.ai_timeout_secs)
    }

    /// Get the SendGrid API key, if configured.
    #[must_use]
    pub fn sendgrid_api_key(&self) -> Option<&str> {
        self.sendgrid_api_key.as_deref()
    }

    /// Get the sender address.
    #[must_use]
    pub fn email_from(&self) -> &str {
        &self.email_from
    }

    /// Get the API-wide requests-per-minute limit.
    #[must_use]
    pub const fn rate_limit_rpm(&self) -> u32 {
        self.rate_limit_rpm
    }

    /// Get the rate-limit sweep interval.
    #[must_use]
    pub const fn sweep_interval(&self) -> Duration {
        Duration::from_secs(self.sweep_interval_secs)
    }
}

fn parse_or<T>(value: Option<String>, key: &str, default: T) -> PortalResult<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    value.map_or(Ok(default), |raw| {
        raw.parse::<T>().map_err(|e| {
            PortalError::config(format!("{key} has an invalid value: {raw}"), Some(Box::new(e)))
        })
    })
}
