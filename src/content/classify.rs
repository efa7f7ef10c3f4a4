//! Keyword classification of free-text inputs.
//!
//! Both classifiers are ordered rule tables: the first rule with a keyword
//! present in the text wins, and text matching nothing falls through to the
//! catch-all category. Keywords are whole words with an optional plural `s`
//! or `es`; a trailing `*` turns a keyword into a word prefix. Multi-word
//! keywords match as phrases.

/// Coarse business model, selects the solution, advantage and revenue prose.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BusinessCategory {
    /// Software, apps, online platforms and marketplaces.
    Platform,
    /// Consulting, coaching, training and agencies.
    Consulting,
    /// Hands-on services delivered to customers.
    Service,
    /// Physical products and consumer brands.
    Product,
    /// Anything the rules do not recognise.
    General,
}

/// Primary customer group, selects the market prose.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MarketSegment {
    /// College and university students.
    Students,
    /// Small businesses and local shops.
    SmallBusiness,
    /// Large companies and corporate buyers.
    Enterprise,
    /// Restaurants, cafes and food outlets.
    Restaurants,
    /// Retailers and online stores.
    Retail,
    /// Clinics, hospitals and patients.
    Healthcare,
    /// Schools, teachers and learners.
    Education,
    /// Home-based entrepreneurs and freelancers.
    HomeBased,
    /// Default when nothing matches.
    SmallAndMedium,
}

/// One ordered classification rule.
pub struct Rule<C> {
    /// Keywords, any one of which selects `category`.
    pub keywords: &'static [&'static str],
    /// Category selected by this rule.
    pub category: C,
}

/// Business rules in priority order.
pub const BUSINESS_RULES: &[Rule<BusinessCategory>] = &[
    Rule {
        keywords: &[
            "app",
            "application",
            "platform",
            "software",
            "saas",
            "website",
            "web",
            "online",
            "digital",
            "marketplace",
            "portal",
            "dashboard",
            "tool",
            "ai",
            "automat*",
        ],
        category: BusinessCategory::Platform,
    },
    Rule {
        keywords: &[
            "consult*",
            "advisory",
            "advisor",
            "coaching",
            "coach",
            "mentoring",
            "training",
            "agency",
            "strategy",
        ],
        category: BusinessCategory::Consulting,
    },
    Rule {
        keywords: &[
            "service",
            "delivery",
            "rental",
            "repair",
            "cleaning",
            "laundry",
            "booking",
            "maintenance",
            "logistics",
            "subscription box",
        ],
        category: BusinessCategory::Service,
    },
    Rule {
        keywords: &[
            "product",
            "manufactur*",
            "device",
            "hardware",
            "brand",
            "apparel",
            "clothing",
            "packaging",
            "handmade",
            "organic",
            "snack",
        ],
        category: BusinessCategory::Product,
    },
];

/// Market rules in priority order.
pub const MARKET_RULES: &[Rule<MarketSegment>] = &[
    Rule {
        keywords: &["student", "college*", "campus", "universit*", "hostel"],
        category: MarketSegment::Students,
    },
    Rule {
        keywords: &[
            "small business",
            "local business",
            "smb",
            "msme",
            "shopkeeper",
            "shop",
            "small shop",
        ],
        category: MarketSegment::SmallBusiness,
    },
    Rule {
        keywords: &["enterprise", "corporate*", "b2b", "company", "companies", "organization"],
        category: MarketSegment::Enterprise,
    },
    Rule {
        keywords: &["restaurant", "cafe", "food", "dining", "kitchen", "cloud kitchen"],
        category: MarketSegment::Restaurants,
    },
    Rule {
        keywords: &["retail*", "store", "ecommerce", "e commerce", "boutique", "shopper"],
        category: MarketSegment::Retail,
    },
    Rule {
        keywords: &[
            "health*", "clinic", "hospital", "patient", "doctor", "medical", "pharma*",
        ],
        category: MarketSegment::Healthcare,
    },
    Rule {
        keywords: &["education*", "school", "teacher", "tutor*", "learner", "learning", "edtech"],
        category: MarketSegment::Education,
    },
    Rule {
        keywords: &["home based", "homemaker", "housewife", "housewives", "freelancer", "work from home"],
        category: MarketSegment::HomeBased,
    },
];

/// Lower-case `text`, turn every non-alphanumeric run into one space and pad
/// both ends with a space so word boundaries can be matched with `contains`.
#[must_use]
pub fn normalize(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 2);
    out.push(' ');
    let mut last_space = true;
    for c in text.chars() {
        if c.is_alphanumeric() {
            out.extend(c.to_lowercase());
            last_space = false;
        } else if !last_space {
            out.push(' ');
            last_space = true;
        }
    }
    if !last_space {
        out.push(' ');
    }
    out
}

/// Whether `keyword` occurs in text already passed through [`normalize`].
#[must_use]
pub fn has_keyword(normalized: &str, keyword: &str) -> bool {
    if let Some(prefix) = keyword.strip_suffix('*') {
        return normalized.contains(&format!(" {prefix}"));
    }
    [" ", "s ", "es "]
        .iter()
        .any(|suffix| normalized.contains(&format!(" {keyword}{suffix}")))
}

/// First rule in `rules` with a keyword in `text`.
pub fn first_match<C: Copy>(rules: &[Rule<C>], text: &str) -> Option<C> {
    let normalized = normalize(text);
    rules
        .iter()
        .find(|rule| rule.keywords.iter().any(|kw| has_keyword(&normalized, kw)))
        .map(|rule| rule.category)
}

/// Classify the business concept.
#[must_use]
pub fn classify_business(concept: &str) -> BusinessCategory {
    first_match(BUSINESS_RULES, concept).unwrap_or(BusinessCategory::General)
}

/// Infer the target market from the concept and problem texts.
#[must_use]
pub fn infer_market(concept: &str, problem: &str) -> MarketSegment {
    first_match(MARKET_RULES, &format!("{concept} {problem}"))
        .unwrap_or(MarketSegment::SmallAndMedium)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize() {
        assert_eq!(normalize("A Scheduling-App, for SMBs!"), " a scheduling app for smbs ");
        assert_eq!(normalize(""), " ");
    }

    #[test]
    fn test_keyword_is_whole_word() {
        let text = normalize("a happy approach to apparel");
        assert!(!has_keyword(&text, "app"));
        assert!(has_keyword(&text, "apparel"));
    }

    #[test]
    fn test_keyword_plural_and_prefix() {
        let text = normalize("apps for consultants");
        assert!(has_keyword(&text, "app"));
        assert!(has_keyword(&text, "consult*"));
        assert!(!has_keyword(&text, "consult"));
    }

    #[test]
    fn test_phrase_keyword() {
        let text = normalize("built for small businesses in town");
        assert!(has_keyword(&text, "small business"));
    }

    #[test]
    fn test_business_categories() {
        assert_eq!(classify_business("a scheduling app"), BusinessCategory::Platform);
        assert_eq!(classify_business("marketing consultancy"), BusinessCategory::Consulting);
        assert_eq!(classify_business("laundry pickup service"), BusinessCategory::Service);
        assert_eq!(classify_business("handmade soap brand"), BusinessCategory::Product);
        assert_eq!(classify_business("something new"), BusinessCategory::General);
    }

    #[test]
    fn test_business_priority_order() {
        // Both platform and service keywords: platform comes first
        assert_eq!(
            classify_business("an online booking service"),
            BusinessCategory::Platform
        );
        assert_eq!(
            classify_business("consulting service for founders"),
            BusinessCategory::Consulting
        );
    }

    #[test]
    fn test_market_segments() {
        assert_eq!(infer_market("notes for college students", ""), MarketSegment::Students);
        assert_eq!(
            infer_market("a scheduling app for small businesses", "missed appointments"),
            MarketSegment::SmallBusiness
        );
        assert_eq!(infer_market("b2b invoicing", ""), MarketSegment::Enterprise);
        assert_eq!(infer_market("menu analytics", "restaurants waste food"), MarketSegment::Restaurants);
        assert_eq!(infer_market("inventory for retailers", ""), MarketSegment::Retail);
        assert_eq!(infer_market("", "patients miss doses"), MarketSegment::Healthcare);
        assert_eq!(infer_market("homework help", "teachers lack time"), MarketSegment::Education);
        assert_eq!(infer_market("tiffin for home-based cooks", ""), MarketSegment::HomeBased);
        assert_eq!(infer_market("", ""), MarketSegment::SmallAndMedium);
    }

    #[test]
    fn test_market_priority_students_first() {
        assert_eq!(
            infer_market("food delivery for students", ""),
            MarketSegment::Students
        );
    }
}
