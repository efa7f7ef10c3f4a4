//! Error types for the event portal.
//!
//! [`PortalError`] covers every failure the portal's collaborators can
//! produce: configuration, the spreadsheet store, email delivery, the AI
//! model, admin authentication and request validation.
//!
//! # Design
//!
//! The error hierarchy is organized by collaborator:
//! - [`PortalError::ConfigError`]: Configuration and environment issues
//! - [`PortalError::StoreError`]: Spreadsheet store reads and appends
//! - [`PortalError::EmailError`]: Transactional email delivery
//! - [`PortalError::AiError`]: External content generation
//! - [`PortalError::AuthError`]: Admin credential and session problems
//! - [`PortalError::ValidationError`]: Malformed or missing request fields
//!
//! Only store failures on the submission path ever reach a caller as a 500;
//! email and AI failures are absorbed by their callers.
//!
//! # Example
//!
//! ```
//! use ceo_portal::error::{PortalError, PortalResult};
//!
//! fn require_email(email: &str) -> PortalResult<()> {
//!     if !email.contains('@') {
//!         return Err(PortalError::validation("email is not valid"));
//!     }
//!     Ok(())
//! }
//! ```

use std::fmt;

/// Result type alias using [`PortalError`].
pub type PortalResult<T> = Result<T, PortalError>;

/// Boxed source error carried by most variants.
pub type BoxedSource = Box<dyn std::error::Error + Send + Sync>;

/// Unified error type for the portal.
#[derive(Debug)]
pub enum PortalError {
    /// Configuration or environment variable errors.
    ConfigError {
        /// Human-readable error message
        message: String,
        /// Optional underlying error
        source: Option<BoxedSource>,
    },

    /// Spreadsheet store errors.
    ///
    /// Variants include:
    /// - Connection or migration failures
    /// - Append or read failures
    /// - Malformed range notation
    StoreError {
        /// Human-readable error message
        message: String,
        /// Optional underlying error
        source: Option<BoxedSource>,
    },

    /// Email provider errors.
    EmailError {
        /// Human-readable error message
        message: String,
        /// Optional underlying error
        source: Option<BoxedSource>,
    },

    /// AI generation errors.
    ///
    /// Variants include:
    /// - Network failures and timeouts
    /// - Non-2xx responses
    /// - Bodies without any text content
    AiError {
        /// Human-readable error message
        message: String,
        /// Optional underlying error
        source: Option<BoxedSource>,
    },

    /// Admin authentication errors.
    AuthError {
        /// Human-readable error message
        message: String,
    },

    /// Request validation errors.
    ValidationError {
        /// Human-readable error message
        message: String,
    },
}

impl PortalError {
    /// Create a new configuration error.
    ///
    /// # Example
    ///
    /// ```
    /// use ceo_portal::error::PortalError;
    ///
    /// let err = PortalError::config("PORT must be a number", None);
    /// assert!(matches!(err, PortalError::ConfigError { .. }));
    /// ```
    #[must_use]
    pub fn config(message: impl Into<String>, source: Option<BoxedSource>) -> Self {
        Self::ConfigError {
            message: message.into(),
            source,
        }
    }

    /// Create a new store error.
    ///
    /// # Example
    ///
    /// ```
    /// use ceo_portal::error::PortalError;
    ///
    /// let err = PortalError::store("append failed", None);
    /// assert!(matches!(err, PortalError::StoreError { .. }));
    /// ```
    #[must_use]
    pub fn store(message: impl Into<String>, source: Option<BoxedSource>) -> Self {
        Self::StoreError {
            message: message.into(),
            source,
        }
    }

    /// Create a new email error.
    #[must_use]
    pub fn email(message: impl Into<String>, source: Option<BoxedSource>) -> Self {
        Self::EmailError {
            message: message.into(),
            source,
        }
    }

    /// Create a new AI generation error.
    #[must_use]
    pub fn ai(message: impl Into<String>, source: Option<BoxedSource>) -> Self {
        Self::AiError {
            message: message.into(),
            source,
        }
    }

    /// Create a new authentication error.
    #[must_use]
    pub fn auth(message: impl Into<String>) -> Self {
        Self::AuthError {
            message: message.into(),
        }
    }

    /// Create a new validation error.
    ///
    /// # Example
    ///
    /// ```
    /// use ceo_portal::error::PortalError;
    ///
    /// let err = PortalError::validation("name is required");
    /// assert_eq!(err.to_string(), "Validation error: name is required");
    /// ```
    #[must_use]
    pub fn validation(message: impl Into<String>) -> Self {
        Self::ValidationError {
            message: message.into(),
        }
    }
}

impl fmt::Display for PortalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ConfigError { message, .. } => write!(f, "Configuration error: {message}"),
            Self::StoreError { message, .. } => write!(f, "Store error: {message}"),
            Self::EmailError { message, .. } => write!(f, "Email error: {message}"),
            Self::AiError { message, .. } => write!(f, "AI error: {message}"),
            Self::AuthError { message } => write!(f, "Authentication error: {message}"),
            Self::ValidationError { message } => write!(f, "Validation error: {message}"),
        }
    }
}

impl std::error::Error for PortalError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::ConfigError { source, .. }
            | Self::StoreError { source, .. }
            | Self::EmailError { source, .. }
            | Self::AiError { source, .. } => source
                .as_ref()
                .map(|e| e.as_ref() as &dyn std::error::Error),
            Self::AuthError { .. } | Self::ValidationError { .. } => None,
        }
    }
}

impl From<sqlx::Error> for PortalError {
    fn from(err: sqlx::Error) -> Self {
        Self::store(err.to_string(), Some(Box::new(err)))
    }
}
