//! Input field lookup, placeholder detection and canned defaults.

use std::collections::BTreeMap;

/// Values treated as "nothing entered".
const PLACEHOLDERS: &[&str] = &[
    "test",
    "testing",
    "asdf",
    "n/a",
    "na",
    "none",
    "null",
    "undefined",
    "placeholder",
    "tbd",
    "xyz",
    "abc",
    "lorem ipsum",
];

/// Semantic role of an input field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    /// Venture name.
    BusinessName,
    /// What the venture does.
    Concept,
    /// Problem being solved.
    Problem,
    /// How the venture solves it.
    Solution,
    /// Who the customers are.
    Market,
    /// Why the venture wins.
    Advantage,
    /// Funding ask.
    Funding,
    /// Revenue and financial notes.
    Financials,
    /// Founding team.
    Team,
    /// Traction so far.
    Traction,
}

impl Field {
    /// Accepted input keys, first match wins.
    #[must_use]
    pub const fn keys(self) -> &'static [&'static str] {
        match self {
            Self::BusinessName => &["businessName", "business_name", "name", "companyName"],
            Self::Concept => &["concept", "idea", "description"],
            Self::Problem => &["problem", "problemStatement", "problem_statement"],
            Self::Solution => &["solution"],
            Self::Market => &["market", "targetMarket", "target_market"],
            Self::Advantage => &["advantage", "competitiveAdvantage", "competitive_advantage"],
            Self::Funding => &["needs", "funding", "fundingNeeds", "funding_needs", "ask"],
            Self::Financials => &["financials", "revenue", "revenueModel", "revenue_model"],
            Self::Team => &["team"],
            Self::Traction => &["traction", "milestones"],
        }
    }

    /// Canned text used when the caller gave nothing usable.
    ///
    /// Fields without a canned default are filled from the classification
    /// prose instead, so they return `None`.
    #[must_use]
    pub const fn default_text(self) -> Option<&'static str> {
        match self {
            Self::BusinessName => Some("Our venture"),
            Self::Concept => Some(
                "a technology-enabled business that helps local businesses reach and serve \
                 their customers more efficiently",
            ),
            Self::Problem => Some(
                "small businesses lose time and revenue because they rely on manual processes \
                 and have no affordable way to reach new customers",
            ),
            Self::Funding => Some(
                "seed funding to build the first full version of the product, run a pilot with \
                 early customers and cover twelve months of operating costs",
            ),
            Self::Team => Some(
                "a founding team of student entrepreneurs with complementary skills in product, \
                 technology and sales",
            ),
            Self::Traction => Some(
                "validated the problem through customer interviews and built a working prototype",
            ),
            Self::Solution | Self::Market | Self::Advantage | Self::Financials => None,
        }
    }
}

/// Whether `value` is blank or a known throwaway entry.
#[must_use]
pub fn is_placeholder(value: &str) -> bool {
    let trimmed = value.trim();
    if trimmed.is_empty() || !trimmed.chars().any(char::is_alphanumeric) {
        return true;
    }
    let lowered = trimmed.to_lowercase();
    PLACEHOLDERS.contains(&lowered.as_str())
}

/// Caller inputs with field-aware lookup.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Inputs(BTreeMap<String, String>);

impl Inputs {
    /// Wrap a raw key/value map.
    #[must_use]
    pub const fn new(map: BTreeMap<String, String>) -> Self {
        Self(map)
    }

    /// The user's own text for `field`, trimmed, if it is not a placeholder.
    #[must_use]
    pub fn provided(&self, field: Field) -> Option<&str> {
        field
            .keys()
            .iter()
            .filter_map(|key| self.0.get(*key))
            .map(|value| value.trim())
            .find(|value| !is_placeholder(value))
    }

    /// The user's text for `field`, or its canned default.
    ///
    /// Fields without a canned default come back empty when not provided.
    #[must_use]
    pub fn text(&self, field: Field) -> &str {
        self.provided(field)
            .or_else(|| field.default_text())
            .unwrap_or_default()
    }

    /// Every usable entry in key order.
    pub fn usable(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0
            .iter()
            .map(|(k, v)| (k.as_str(), v.trim()))
            .filter(|(_, v)| !is_placeholder(v))
    }

    /// Raw map.
    #[must_use]
    pub const fn as_map(&self) -> &BTreeMap<String, String> {
        &self.0
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Inputs {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

/// Strip trailing sentence punctuation so text can be embedded mid-sentence.
#[must_use]
pub fn clause(text: &str) -> &str {
    text.trim().trim_end_matches(['.', '!', ';', ','])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placeholders() {
        assert!(is_placeholder(""));
        assert!(is_placeholder("   "));
        assert!(is_placeholder("Test"));
        assert!(is_placeholder(" N/A "));
        assert!(is_placeholder("..."));
        assert!(!is_placeholder("testing kits for labs"));
        assert!(!is_placeholder("seed funding"));
    }

    #[test]
    fn test_provided_uses_aliases_and_skips_placeholders() {
        let inputs: Inputs = [("business_name", "Slotly"), ("needs", "test"), ("funding", "50k")]
            .into_iter()
            .collect();
        assert_eq!(inputs.provided(Field::BusinessName), Some("Slotly"));
        assert_eq!(inputs.provided(Field::Funding), Some("50k"));
    }

    #[test]
    fn test_text_falls_back_to_default() {
        let inputs = Inputs::default();
        assert_eq!(inputs.text(Field::BusinessName), "Our venture");
        assert!(inputs.text(Field::Problem).starts_with("small businesses"));
        assert_eq!(inputs.text(Field::Solution), "");
    }

    #[test]
    fn test_clause_strips_trailing_punctuation() {
        assert_eq!(clause("Seed funding. "), "Seed funding");
        assert_eq!(clause("Go!"), "Go");
    }
}
