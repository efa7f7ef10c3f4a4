//! Prompts for the AI model.
//!
//! The prompt lists the same section layout the fallback templates use, so
//! a client sees the same shape of document whichever path produced it.

use super::documents::humanize_key;
use super::{document, ContentKind, Inputs};
use chrono::NaiveDate;

/// Instruction line per kind.
fn instruction(kind: &ContentKind) -> &'static str {
    match kind {
        ContentKind::BusinessDescription => {
            "Write a clear, persuasive business description for a student startup."
        }
        ContentKind::PitchOutline => {
            "Write a concise bullet-point outline for a five-minute startup pitch."
        }
        ContentKind::ExecutiveSummary => {
            "Write a one-page executive summary suitable for mentors and early investors."
        }
        ContentKind::PresentationSlides => {
            "Write a ten-slide pitch deck outline with bullet points and short speaker notes \
             for each slide."
        }
        ContentKind::Other(_) => "Write a short, well-structured summary of the details below.",
    }
}

/// Build the prompt for `kind` from `inputs`.
///
/// ```
/// use ceo_portal::content::{prompt::build_prompt, ContentKind, Inputs};
///
/// let inputs: Inputs = [("concept", "campus laundry pickup")].into_iter().collect();
/// let prompt = build_prompt(&ContentKind::BusinessDescription, &inputs);
/// assert!(prompt.contains("Concept: campus laundry pickup"));
/// assert!(prompt.contains("REVENUE MODEL"));
/// ```
#[must_use]
pub fn build_prompt(kind: &ContentKind, inputs: &Inputs) -> String {
    let mut prompt = String::from(instruction(kind));
    prompt.push_str("\n\nDetails provided by the founder:\n");

    let mut any = false;
    for (key, value) in inputs.usable() {
        any = true;
        prompt.push_str(&format!("- {}: {}\n", humanize_key(key), value));
    }
    if !any {
        prompt.push_str("- None. Use realistic, plausible details for a student startup.\n");
    }

    // The date never reaches the prompt; only the headers are used.
    let layout = document(kind, inputs, NaiveDate::MIN);
    prompt.push_str("\nUse exactly these section headers, in this order, in upper case:\n");
    for header in layout.headers() {
        prompt.push_str(header);
        prompt.push('\n');
    }
    prompt.push_str(
        "\nWrite in plain text without markdown, keep a confident and professional tone, and \
         never leave bracketed placeholders.",
    );
    prompt
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_lists_headers_in_order() {
        let prompt = build_prompt(&ContentKind::PitchOutline, &Inputs::default());
        let hook = prompt.find("OPENING HOOK").unwrap_or(usize::MAX);
        let ask = prompt.find("THE ASK").unwrap_or(0);
        assert!(hook < ask);
        assert!(prompt.contains("- None."));
    }

    #[test]
    fn test_prompt_skips_placeholders() {
        let inputs: Inputs = [("problem", "test"), ("businessName", "Slotly")]
            .into_iter()
            .collect();
        let prompt = build_prompt(&ContentKind::ExecutiveSummary, &inputs);
        assert!(prompt.contains("- Business name: Slotly"));
        assert!(!prompt.contains("Problem:"));
    }
}
