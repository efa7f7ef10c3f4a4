//! AI content generation with template fallback.
//!
//! The portal asks an external model for content first. Any failure, a
//! missing API key, or an empty completion sends the request through the
//! deterministic templates in [`crate::content`] instead, so a caller always
//! receives a document.

mod anthropic;

pub use anthropic::AnthropicClient;

use async_trait::async_trait;
use serde::Serialize;
use tracing::{info, instrument, warn};

use crate::content::{self, prompt::build_prompt, GenerationRequest};
use crate::error::PortalResult;

/// External text model.
#[async_trait]
pub trait ContentModel: Send + Sync {
    /// Complete `prompt` and return the generated text.
    async fn complete(&self, prompt: &str) -> PortalResult<String>;

    /// Model name for logs and usage records.
    fn name(&self) -> &str;
}

/// Which path produced a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ContentSource {
    /// The external model.
    Ai,
    /// The built-in templates.
    Fallback,
}

impl ContentSource {
    /// Lower-case label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ai => "ai",
            Self::Fallback => "fallback",
        }
    }
}

/// A finished document and where it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Generated {
    /// Document text.
    pub content: String,
    /// Producing path.
    pub source: ContentSource,
}

/// Generate content for `request`, preferring `model` when present.
///
/// Never fails: model errors are logged and absorbed by the templates.
#[instrument(skip_all, fields(kind = %request.kind))]
pub async fn generate_with_fallback(
    model: Option<&dyn ContentModel>,
    request: &GenerationRequest,
) -> Generated {
    if let Some(model) = model {
        let prompt = build_prompt(&request.kind, &request.inputs);
        match model.complete(&prompt).await {
            Ok(text) if !text.trim().is_empty() => {
                info!(model = model.name(), chars = text.len(), "AI generation succeeded");
                return Generated {
                    content: text,
                    source: ContentSource::Ai,
                };
            }
            Ok(_) => warn!(model = model.name(), "AI returned empty content, using templates"),
            Err(e) => warn!(model = model.name(), error = %e, "AI generation failed, using templates"),
        }
    } else {
        info!("No AI model configured, using templates");
    }

    Generated {
        content: content::generate(&request.kind, &request.inputs),
        source: ContentSource::Fallback,
    }
}
