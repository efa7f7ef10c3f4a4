//! Properties of the template generator that clients rely on.

#![allow(clippy::unwrap_used)]

use chrono::NaiveDate;
use ceo_portal::content::{
    classify_business, document, generate_on, infer_market, BusinessCategory, ContentKind, Inputs,
    MarketSegment,
};

fn day() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 3, 14).unwrap()
}

fn headers_for(kind: &ContentKind) -> Vec<&'static str> {
    match kind {
        ContentKind::BusinessDescription => vec![
            "BUSINESS CONCEPT",
            "PROBLEM STATEMENT",
            "OUR SOLUTION",
            "TARGET MARKET",
            "COMPETITIVE ADVANTAGE",
            "FUNDING REQUIREMENTS",
            "REVENUE MODEL",
            "NEXT STEPS",
            "CONCLUSION",
        ],
        ContentKind::PitchOutline => vec![
            "OPENING HOOK",
            "THE PROBLEM",
            "THE SOLUTION",
            "MARKET OPPORTUNITY",
            "BUSINESS MODEL",
            "COMPETITIVE ADVANTAGE",
            "THE ASK",
            "CLOSING",
        ],
        ContentKind::ExecutiveSummary => vec![
            "COMPANY OVERVIEW",
            "PROBLEM AND OPPORTUNITY",
            "SOLUTION",
            "TARGET MARKET",
            "COMPETITIVE ADVANTAGE",
            "FINANCIAL OVERVIEW",
            "FUNDING REQUEST",
            "CONCLUSION",
        ],
        ContentKind::PresentationSlides => (1..=10)
            .map(|n| match n {
                1 => "SLIDE 1: TITLE",
                2 => "SLIDE 2: THE PROBLEM",
                3 => "SLIDE 3: OUR SOLUTION",
                4 => "SLIDE 4: MARKET OPPORTUNITY",
                5 => "SLIDE 5: BUSINESS MODEL",
                6 => "SLIDE 6: COMPETITIVE ADVANTAGE",
                7 => "SLIDE 7: TRACTION AND MILESTONES",
                8 => "SLIDE 8: THE TEAM",
                9 => "SLIDE 9: THE ASK",
                _ => "SLIDE 10: THANK YOU",
            })
            .collect(),
        ContentKind::Other(_) => vec!["OVERVIEW", "KEY POINTS", "RECOMMENDED NEXT STEPS"],
    }
}

fn all_kinds() -> Vec<ContentKind> {
    vec![
        ContentKind::BusinessDescription,
        ContentKind::PitchOutline,
        ContentKind::ExecutiveSummary,
        ContentKind::PresentationSlides,
        ContentKind::Other("marketing_plan".into()),
    ]
}

/// Byte offsets of each header line, which must be increasing.
fn assert_headers_in_order(text: &str, headers: &[&str]) {
    let mut cursor = 0;
    for header in headers {
        let needle = format!("\n{header}\n");
        let at = text[cursor..]
            .find(&needle)
            .unwrap_or_else(|| panic!("missing or out of order: {header}\n{text}"));
        cursor += at + needle.len();
    }
}

#[test]
fn test_empty_inputs_produce_complete_documents() {
    for kind in all_kinds() {
        let text = generate_on(&kind, &Inputs::default(), day());
        assert!(!text.trim().is_empty());
        assert!(!text.contains('['), "{kind} left a bracket token");
        assert!(!text.contains(']'), "{kind} left a bracket token");
        assert_headers_in_order(&text, &headers_for(&kind));
    }
}

#[test]
fn test_structured_headers_match_rendered_text() {
    let inputs: Inputs = [("concept", "campus laundry pickup")].into_iter().collect();
    for kind in all_kinds() {
        let doc = document(&kind, &inputs, day());
        assert_eq!(doc.headers(), headers_for(&kind));
    }
}

#[test]
fn test_generation_is_deterministic() {
    let inputs: Inputs = [
        ("concept", "an online marketplace for handmade goods"),
        ("market", "artisans in tier-two cities"),
    ]
    .into_iter()
    .collect();

    for kind in all_kinds() {
        assert_eq!(
            generate_on(&kind, &inputs, day()),
            generate_on(&kind, &inputs, day())
        );
    }
}

#[test]
fn test_user_text_appears_verbatim() {
    let inputs: Inputs = [
        ("concept", "a scheduling app for small businesses"),
        ("problem", "missed appointments cost revenue"),
        ("needs", "seed funding"),
    ]
    .into_iter()
    .collect();
    let doc = document(&ContentKind::BusinessDescription, &inputs, day());
    let body = |header: &str| {
        doc.sections
            .iter()
            .find(|s| s.header == header)
            .map(|s| s.body.clone())
            .unwrap()
    };

    assert!(body("BUSINESS CONCEPT").contains("scheduling app for small businesses"));
    assert!(body("PROBLEM STATEMENT").contains("missed appointments cost revenue"));
    assert!(body("FUNDING REQUIREMENTS").contains("seed funding"));

    // The concept selects the platform category and small-business segment.
    assert_eq!(
        classify_business("a scheduling app for small businesses"),
        BusinessCategory::Platform
    );
    assert_eq!(
        infer_market("a scheduling app for small businesses", "missed appointments cost revenue"),
        MarketSegment::SmallBusiness
    );
    assert!(body("TARGET MARKET").contains("small businesses"));
}

#[test]
fn test_placeholders_are_replaced() {
    let placeholder: Inputs = [("concept", "asdf"), ("problem", "TBD"), ("needs", "n/a")]
        .into_iter()
        .collect();
    assert_eq!(
        generate_on(&ContentKind::PitchOutline, &placeholder, day()),
        generate_on(&ContentKind::PitchOutline, &Inputs::default(), day())
    );
}

#[test]
fn test_executive_summary_is_dated() {
    let text = generate_on(&ContentKind::ExecutiveSummary, &Inputs::default(), day());
    assert!(text.contains("Prepared on March 14, 2026"));
}

#[test]
fn test_unknown_kind_uses_generic_template() {
    let kind = ContentKind::parse("marketing_plan");
    assert!(!kind.is_known());
    assert_eq!(kind.as_str(), "marketing_plan");

    let inputs: Inputs = [("businessName", "Bolt")].into_iter().collect();
    let text = generate_on(&kind, &inputs, day());
    assert!(text.contains("OVERVIEW"));
    assert!(text.contains("- Business name: Bolt"));
}

#[test]
fn test_concept_alone_selects_market() {
    let inputs: Inputs = [("concept", "a telemedicine app for rural patients")]
        .into_iter()
        .collect();
    let doc = document(&ContentKind::BusinessDescription, &inputs, day());
    let market = doc
        .sections
        .iter()
        .find(|s| s.header == "TARGET MARKET")
        .map(|s| s.body.clone())
        .unwrap();

    assert!(market.contains("clinics, hospitals and patients"), "{market}");
    assert!(!market.contains("small businesses"));
}

#[test]
fn test_problem_alone_selects_market() {
    let inputs: Inputs = [("problem", "patients miss their medication doses")]
        .into_iter()
        .collect();
    let doc = document(&ContentKind::PitchOutline, &inputs, day());

    assert!(doc.sections[0].body.contains("clinics, hospitals and patients"));
    assert!(doc.sections[1].body.contains("Patients miss their medication doses"));
}
