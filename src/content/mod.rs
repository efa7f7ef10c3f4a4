//! Template-based content generation used when the AI model is unavailable.
//!
//! Given a content kind and the caller's free-text inputs, [`generate`]
//! always produces a complete document. Missing or throwaway inputs are
//! replaced with realistic defaults, the concept is classified into a
//! [`BusinessCategory`] and the concept and problem into a
//! [`MarketSegment`], and the matching canned paragraphs are spliced into a
//! fixed section layout per kind.
//!
//! Generation is pure: no I/O, no randomness. The only clock-dependent
//! field is the preparation date of an executive summary, and
//! [`generate_on`] takes that date explicitly.
//!
//! # Example
//!
//! ```
//! use ceo_portal::content::{generate, ContentKind, Inputs};
//!
//! let inputs: Inputs = [("concept", "a tutoring app for college students")]
//!     .into_iter()
//!     .collect();
//! let text = generate(&ContentKind::PitchOutline, &inputs);
//! assert!(text.contains("THE ASK"));
//! assert!(text.contains("college students"));
//! ```

pub mod classify;
mod documents;
mod fields;
pub mod prompt;
mod prose;

pub use classify::{classify_business, infer_market, BusinessCategory, MarketSegment};
pub use documents::{Document, Section};
pub use fields::{is_placeholder, Field, Inputs};

use chrono::{Local, NaiveDate};
use std::fmt;

/// What kind of document to produce.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ContentKind {
    /// Multi-section business description.
    BusinessDescription,
    /// Bullet outline for a spoken pitch.
    PitchOutline,
    /// Dated one-page executive summary.
    ExecutiveSummary,
    /// Ten-slide deck outline.
    PresentationSlides,
    /// Any other tag; rendered with the generic template.
    Other(String),
}

impl ContentKind {
    /// Parse a wire tag. Unknown tags become [`ContentKind::Other`].
    #[must_use]
    pub fn parse(tag: &str) -> Self {
        match tag.trim() {
            "business_description" => Self::BusinessDescription,
            "pitch_outline" => Self::PitchOutline,
            "executive_summary" => Self::ExecutiveSummary,
            "presentation_slides" => Self::PresentationSlides,
            other => Self::Other(other.to_string()),
        }
    }

    /// Wire tag.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::BusinessDescription => "business_description",
            Self::PitchOutline => "pitch_outline",
            Self::ExecutiveSummary => "executive_summary",
            Self::PresentationSlides => "presentation_slides",
            Self::Other(tag) => tag.as_str(),
        }
    }

    /// Whether this is one of the four recognized kinds.
    #[must_use]
    pub const fn is_known(&self) -> bool {
        !matches!(self, Self::Other(_))
    }
}

impl fmt::Display for ContentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A generation request as received from a client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    /// Requested kind.
    pub kind: ContentKind,
    /// Free-text inputs.
    pub inputs: Inputs,
}

impl GenerationRequest {
    /// Build a request.
    #[must_use]
    pub const fn new(kind: ContentKind, inputs: Inputs) -> Self {
        Self { kind, inputs }
    }
}

/// Build the structured document for `kind`.
#[must_use]
pub fn document(kind: &ContentKind, inputs: &Inputs, today: NaiveDate) -> Document {
    match kind {
        ContentKind::BusinessDescription => documents::business_description(inputs),
        ContentKind::PitchOutline => documents::pitch_outline(inputs),
        ContentKind::ExecutiveSummary => documents::executive_summary(inputs, today),
        ContentKind::PresentationSlides => documents::presentation_slides(inputs),
        ContentKind::Other(_) => documents::generic(inputs),
    }
}

/// Render the fallback document for `kind` dated `today`.
#[must_use]
pub fn generate_on(kind: &ContentKind, inputs: &Inputs, today: NaiveDate) -> String {
    document(kind, inputs, today).render()
}

/// Render the fallback document for `kind` dated with the local date.
#[must_use]
pub fn generate(kind: &ContentKind, inputs: &Inputs) -> String {
    generate_on(kind, inputs, Local::now().date_naive())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_tags() {
        assert_eq!(ContentKind::parse("pitch_outline"), ContentKind::PitchOutline);
        assert_eq!(
            ContentKind::parse(" executive_summary "),
            ContentKind::ExecutiveSummary
        );
        assert_eq!(
            ContentKind::parse("haiku"),
            ContentKind::Other("haiku".to_string())
        );
        assert!(!ContentKind::parse("haiku").is_known());
    }

    #[test]
    fn test_tag_round_trip() {
        for tag in [
            "business_description",
            "pitch_outline",
            "executive_summary",
            "presentation_slides",
        ] {
            assert_eq!(ContentKind::parse(tag).as_str(), tag);
        }
    }

    #[test]
    fn test_generate_on_is_deterministic() {
        let inputs: Inputs = [("concept", "a meal kit brand"), ("problem", "cooking takes too long")]
            .into_iter()
            .collect();
        let date = NaiveDate::from_ymd_opt(2026, 1, 15).expect("valid date");
        let first = generate_on(&ContentKind::ExecutiveSummary, &inputs, date);
        let second = generate_on(&ContentKind::ExecutiveSummary, &inputs, date);
        assert_eq!(first, second);
    }
}
