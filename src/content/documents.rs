//! Section assembly for each content kind.

use chrono::NaiveDate;

use super::classify::{classify_business, infer_market, BusinessCategory, MarketSegment};
use super::fields::{clause, Field, Inputs};

/// One titled block of a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    /// Upper-case header line.
    pub header: &'static str,
    /// Body text.
    pub body: String,
}

impl Section {
    fn new(header: &'static str, body: impl Into<String>) -> Self {
        Self {
            header,
            body: body.into(),
        }
    }
}

/// A rendered-on-demand document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    /// First line.
    pub title: String,
    /// Optional line under the title.
    pub subtitle: Option<String>,
    /// Sections in output order.
    pub sections: Vec<Section>,
}

impl Document {
    /// Plain-text rendering: title block, then each header and body
    /// separated by blank lines.
    #[must_use]
    pub fn render(&self) -> String {
        let mut out = self.title.clone();
        if let Some(subtitle) = &self.subtitle {
            out.push('\n');
            out.push_str(subtitle);
        }
        for section in &self.sections {
            out.push_str("\n\n");
            out.push_str(section.header);
            out.push('\n');
            out.push_str(&section.body);
        }
        out.push('\n');
        out
    }

    /// Headers in order.
    #[must_use]
    pub fn headers(&self) -> Vec<&'static str> {
        self.sections.iter().map(|s| s.header).collect()
    }
}

/// Upper-case the first character.
fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars).collect()
    })
}

/// Everything the templates need, resolved once from the inputs.
struct Context<'a> {
    inputs: &'a Inputs,
    name: &'a str,
    concept: &'a str,
    problem: &'a str,
    funding: &'a str,
    category: BusinessCategory,
    segment: MarketSegment,
}

impl<'a> Context<'a> {
    fn new(inputs: &'a Inputs) -> Self {
        // Classify only what the caller wrote; canned defaults would skew the match.
        let given_concept = inputs.provided(Field::Concept).unwrap_or_default();
        let given_problem = inputs.provided(Field::Problem).unwrap_or_default();
        Self {
            inputs,
            name: inputs.text(Field::BusinessName),
            concept: inputs.text(Field::Concept),
            problem: inputs.text(Field::Problem),
            funding: inputs.text(Field::Funding),
            category: classify_business(given_concept),
            segment: infer_market(given_concept, given_problem),
        }
    }

    fn customers(&self) -> &'static str {
        self.segment.customers()
    }

    fn title(&self, kind: &str) -> String {
        match self.inputs.provided(Field::BusinessName) {
            Some(name) => format!("{kind}: {name}"),
            None => kind.to_string(),
        }
    }

    fn solution(&self) -> String {
        self.inputs
            .provided(Field::Solution)
            .map_or_else(|| self.category.solution(self.customers()), str::to_string)
    }

    fn market(&self) -> String {
        self.inputs.provided(Field::Market).map_or_else(
            || {
                format!(
                    "Our primary customers are {}, who {}. {} We will start with a focused \
                     group of early adopters close to home, prove the value with them, and then \
                     expand to neighbouring customer groups and cities.",
                    self.customers(),
                    self.segment.pain(),
                    self.segment.opportunity()
                )
            },
            str::to_string,
        )
    }

    fn advantage(&self) -> String {
        self.inputs
            .provided(Field::Advantage)
            .unwrap_or_else(|| self.category.advantage())
            .to_string()
    }

    fn revenue(&self) -> String {
        self.inputs
            .provided(Field::Financials)
            .unwrap_or_else(|| self.category.revenue_model())
            .to_string()
    }

    fn funding_ask(&self) -> String {
        format!(
            "We are seeking {}. {}",
            clause(self.funding),
            self.category.use_of_funds()
        )
    }

    fn problem_paragraph(&self) -> String {
        format!(
            "The problem we are solving: {}. This matters because {} {}. Existing options are \
             either too expensive, too complicated or simply not designed for them.",
            clause(self.problem),
            self.customers(),
            self.segment.pain()
        )
    }

    fn closing(&self) -> String {
        format!(
            "{} addresses a real and pressing problem for {} with a {} built to deliver \
             measurable value from day one. With the right support we are ready to move from \
             idea to impact, and we welcome mentors, partners and investors who want to be part \
             of that journey.",
            self.name,
            self.customers(),
            self.category.noun()
        )
    }
}

/// Full business description.
pub fn business_description(inputs: &Inputs) -> Document {
    let cx = Context::new(inputs);

    let sections = vec![
        Section::new(
            "BUSINESS CONCEPT",
            format!(
                "{} is built around a clear idea: {}. As a {} serving {}, we focus on solving \
                 one meaningful problem exceptionally well.",
                cx.name,
                clause(cx.concept),
                cx.category.noun(),
                cx.customers()
            ),
        ),
        Section::new("PROBLEM STATEMENT", cx.problem_paragraph()),
        Section::new("OUR SOLUTION", cx.solution()),
        Section::new("TARGET MARKET", cx.market()),
        Section::new("COMPETITIVE ADVANTAGE", cx.advantage()),
        Section::new("FUNDING REQUIREMENTS", cx.funding_ask()),
        Section::new("REVENUE MODEL", cx.revenue()),
        Section::new(
            "NEXT STEPS",
            format!(
                "1. Validate the concept through interviews with at least twenty {}.\n\
                 2. Build a minimum viable version of the offering and test it with a small \
                 pilot group.\n\
                 3. Measure results, refine pricing and collect testimonials.\n\
                 4. Use the pilot outcomes to prepare for a wider launch and the next funding \
                 round.",
                cx.customers()
            ),
        ),
        Section::new("CONCLUSION", cx.closing()),
    ];

    Document {
        title: cx.title("BUSINESS DESCRIPTION"),
        subtitle: None,
        sections,
    }
}

/// Bullet outline for a spoken pitch.
pub fn pitch_outline(inputs: &Inputs) -> Document {
    let cx = Context::new(inputs);

    let mut business_model = format!("- {}", cx.category.revenue_headline());
    if let Some(financials) = inputs.provided(Field::Financials) {
        business_model.push_str(&format!("\n- {financials}"));
    }

    let market = inputs.provided(Field::Market).map_or_else(
        || format!("- Primary customers: {}", cx.customers()),
        |market| format!("- Target market: {market}"),
    );

    let sections = vec![
        Section::new(
            "OPENING HOOK",
            format!(
                "- Picture the {} who {}.\n- That is their everyday reality, and it does not \
                 have to be.",
                cx.customers(),
                cx.segment.pain()
            ),
        ),
        Section::new(
            "THE PROBLEM",
            format!(
                "- {}\n- Current alternatives are expensive, complicated or not built for \
                 {}.",
                capitalize(clause(cx.problem)),
                cx.customers()
            ),
        ),
        Section::new(
            "THE SOLUTION",
            format!("- The idea: {}\n- {}", clause(cx.concept), cx.solution()),
        ),
        Section::new(
            "MARKET OPPORTUNITY",
            format!(
                "{market}\n- {}\n- Go-to-market: win a focused group of early adopters, then \
                 expand.",
                cx.segment.opportunity()
            ),
        ),
        Section::new("BUSINESS MODEL", business_model),
        Section::new("COMPETITIVE ADVANTAGE", format!("- {}", cx.advantage())),
        Section::new(
            "THE ASK",
            format!(
                "- We are seeking {}\n- {}",
                clause(cx.funding),
                cx.category.use_of_funds()
            ),
        ),
        Section::new(
            "CLOSING",
            format!(
                "- {}: {}\n- Thank you. We would love your questions, feedback and support.",
                cx.name,
                clause(cx.concept)
            ),
        ),
    ];

    Document {
        title: cx.title("PITCH OUTLINE"),
        subtitle: None,
        sections,
    }
}

/// One-page executive summary, dated `prepared_on`.
pub fn executive_summary(inputs: &Inputs, prepared_on: NaiveDate) -> Document {
    let cx = Context::new(inputs);

    let financials = inputs.provided(Field::Financials).map_or_else(
        || {
            format!(
                "{} In the first year we will focus on proving unit economics with a pilot \
                 group, then scale customer acquisition once the model is validated.",
                cx.category.revenue_model()
            )
        },
        str::to_string,
    );

    let sections = vec![
        Section::new(
            "COMPANY OVERVIEW",
            format!(
                "{} is a {} built around a simple idea: {}.",
                cx.name,
                cx.category.noun(),
                clause(cx.concept)
            ),
        ),
        Section::new(
            "PROBLEM AND OPPORTUNITY",
            format!(
                "{} {}",
                cx.problem_paragraph(),
                cx.segment.opportunity()
            ),
        ),
        Section::new("SOLUTION", cx.solution()),
        Section::new("TARGET MARKET", cx.market()),
        Section::new("COMPETITIVE ADVANTAGE", cx.advantage()),
        Section::new("FINANCIAL OVERVIEW", financials),
        Section::new("FUNDING REQUEST", cx.funding_ask()),
        Section::new("CONCLUSION", cx.closing()),
    ];

    Document {
        title: cx.title("EXECUTIVE SUMMARY"),
        subtitle: Some(format!("Prepared on {}", prepared_on.format("%B %-d, %Y"))),
        sections,
    }
}

/// Ten-slide deck outline with speaker notes.
pub fn presentation_slides(inputs: &Inputs) -> Document {
    let cx = Context::new(inputs);
    let traction = inputs.text(Field::Traction);
    let team = inputs.text(Field::Team);

    let slide = |points: String, notes: &str| format!("{points}\nSpeaker notes: {notes}");

    let sections = vec![
        Section::new(
            "SLIDE 1: TITLE",
            slide(
                format!("- {}\n- {}", cx.name, capitalize(clause(cx.concept))),
                "Introduce yourself and the venture in one sentence.",
            ),
        ),
        Section::new(
            "SLIDE 2: THE PROBLEM",
            slide(
                format!(
                    "- {}\n- {} {}",
                    capitalize(clause(cx.problem)),
                    capitalize(cx.customers()),
                    cx.segment.pain()
                ),
                "Tell a short story about a real customer facing this problem.",
            ),
        ),
        Section::new(
            "SLIDE 3: OUR SOLUTION",
            slide(
                format!("- {}", cx.solution()),
                "Show how the solution works from the customer's point of view.",
            ),
        ),
        Section::new(
            "SLIDE 4: MARKET OPPORTUNITY",
            slide(
                format!(
                    "- Customers: {}\n- {}",
                    inputs.provided(Field::Market).unwrap_or_else(|| cx.customers()),
                    cx.segment.opportunity()
                ),
                "Explain who buys first and how the market grows from there.",
            ),
        ),
        Section::new(
            "SLIDE 5: BUSINESS MODEL",
            slide(
                format!("- {}", cx.category.revenue_headline()),
                "Walk through pricing and how one customer becomes profitable.",
            ),
        ),
        Section::new(
            "SLIDE 6: COMPETITIVE ADVANTAGE",
            slide(
                format!("- {}", cx.advantage()),
                "Be honest about alternatives and clear about why we win.",
            ),
        ),
        Section::new(
            "SLIDE 7: TRACTION AND MILESTONES",
            slide(
                format!(
                    "- So far we have {}\n- Next: pilot launch, first paying customers, \
                     repeatable sales",
                    clause(traction)
                ),
                "Use concrete numbers wherever possible.",
            ),
        ),
        Section::new(
            "SLIDE 8: THE TEAM",
            slide(
                format!("- {}", capitalize(clause(team))),
                "Highlight why this team is the right one to solve this problem.",
            ),
        ),
        Section::new(
            "SLIDE 9: THE ASK",
            slide(
                format!(
                    "- We are seeking {}\n- {}",
                    clause(cx.funding),
                    cx.category.use_of_funds()
                ),
                "State the ask clearly and what it will achieve.",
            ),
        ),
        Section::new(
            "SLIDE 10: THANK YOU",
            slide(
                format!("- {}\n- Questions and feedback are welcome", cx.name),
                "Close with the one thing you want the audience to remember.",
            ),
        ),
    ];

    Document {
        title: cx.title("PRESENTATION SLIDES"),
        subtitle: None,
        sections,
    }
}

/// Turn `businessName` or `business_name` into `Business name`.
pub(crate) fn humanize_key(key: &str) -> String {
    let mut words = String::with_capacity(key.len() + 4);
    for (i, c) in key.chars().enumerate() {
        if c == '_' || c == '-' {
            words.push(' ');
        } else if c.is_uppercase() && i > 0 {
            words.push(' ');
            words.extend(c.to_lowercase());
        } else {
            words.extend(c.to_lowercase());
        }
    }
    capitalize(words.trim())
}

/// Catch-all document for unrecognised content kinds.
pub fn generic(inputs: &Inputs) -> Document {
    let points: Vec<String> = inputs
        .usable()
        .map(|(key, value)| format!("- {}: {}", humanize_key(key), value))
        .collect();

    let (overview, key_points) = if points.is_empty() {
        (
            "This document was prepared without specific details. It outlines how to shape an \
             early-stage idea into a clear, convincing story for mentors, judges and investors."
                .to_string(),
            "- Describe the idea in one sentence.\n- Explain the problem it solves and who \
             experiences it.\n- Show why your approach is better than the alternatives."
                .to_string(),
        )
    } else {
        (
            "This document organizes the details you provided into a clear summary that can \
             be reviewed, shared and developed further."
                .to_string(),
            points.join("\n"),
        )
    };

    Document {
        title: "GENERATED CONTENT".to_string(),
        subtitle: None,
        sections: vec![
            Section::new("OVERVIEW", overview),
            Section::new("KEY POINTS", key_points),
            Section::new(
                "RECOMMENDED NEXT STEPS",
                "1. Talk to potential customers and confirm the problem is real.\n\
                 2. Define the smallest version of the solution worth testing.\n\
                 3. Set measurable goals for a first pilot.\n\
                 4. Prepare a short pitch and gather feedback from mentors.",
            ),
        ],
    }
}
