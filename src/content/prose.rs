//! Canned prose selected by business category and market segment.

use super::classify::{BusinessCategory, MarketSegment};

impl BusinessCategory {
    /// Noun phrase naming the kind of venture.
    #[must_use]
    pub const fn noun(self) -> &'static str {
        match self {
            Self::Platform => "digital platform",
            Self::Consulting => "consulting practice",
            Self::Service => "service business",
            Self::Product => "product company",
            Self::General => "early-stage venture",
        }
    }

    /// How the venture delivers its solution to `customers`.
    #[must_use]
    pub fn solution(self, customers: &str) -> String {
        match self {
            Self::Platform => format!(
                "We are building an easy-to-use digital platform that gives {customers} a single \
                 place to handle this work. Customers can sign up in minutes, use the core \
                 features without any training and see results within their first week. The \
                 platform runs in the cloud and works on both mobile and desktop, so it scales \
                 with demand and improves through regular updates driven by customer feedback."
            ),
            Self::Consulting => format!(
                "We work directly with {customers} through structured engagements that start \
                 with a short diagnostic, move to a practical action plan and finish with hands-on \
                 support during implementation. Every engagement uses proven frameworks adapted \
                 to the client, so recommendations are specific, affordable and measurable."
            ),
            Self::Service => format!(
                "We deliver a reliable, professionally managed service to {customers} with \
                 transparent pricing, simple booking and consistent quality. Trained staff, \
                 standard operating procedures and quick response times turn a frustrating task \
                 into one our customers no longer have to think about."
            ),
            Self::Product => format!(
                "We design and produce a high-quality product made for {customers}, focused on \
                 durability, fair pricing and thoughtful design. Products are tested with real \
                 users before launch and sold through both online channels and local partners, so \
                 customers can find them wherever they already shop."
            ),
            Self::General => format!(
                "We offer {customers} a practical, affordable solution that removes the friction \
                 described above. The offering is simple to adopt, priced for the budgets of our \
                 customers and built around continuous feedback so that it keeps getting better."
            ),
        }
    }

    /// Why the venture can beat alternatives.
    #[must_use]
    pub const fn advantage(self) -> &'static str {
        match self {
            Self::Platform => {
                "Our advantage comes from focus and speed. Generic tools try to serve everyone \
                 and end up complicated and expensive, while we are built for one customer group \
                 and one job. Every customer interaction produces data that makes the product \
                 smarter, and switching costs rise as customers store their workflows with us."
            }
            Self::Consulting => {
                "Our advantage is practitioner credibility at an accessible price. Large firms \
                 are out of reach for most of our clients and freelancers rarely offer structured \
                 follow-through. Our repeatable methodology, local network and outcome-based \
                 pricing make us the natural choice for clients who want results, not reports."
            }
            Self::Service => {
                "Our advantage is consistency. Most competitors are informal operators with \
                 unpredictable quality and pricing. Standardized processes, trained staff and a \
                 simple booking experience let us deliver the same high standard every time and \
                 build the trust that brings customers back."
            }
            Self::Product => {
                "Our advantage is a better product at a fair price. We design with direct customer \
                 input, source materials carefully and keep our supply chain lean, which lets us \
                 offer higher quality than mass-market alternatives without premium pricing."
            }
            Self::General => {
                "Our advantage is a deep understanding of the customer and the ability to move \
                 quickly. As a focused team close to the problem, we can test, learn and improve \
                 faster than established players who are not paying attention to this segment."
            }
        }
    }

    /// How the venture makes money.
    #[must_use]
    pub const fn revenue_model(self) -> &'static str {
        match self {
            Self::Platform => {
                "We follow a freemium subscription model. A free tier lets customers experience \
                 the core value, and paid monthly or annual plans unlock advanced features, \
                 additional users and priority support. Additional revenue will come from \
                 integrations, premium add-ons and partnerships."
            }
            Self::Consulting => {
                "Revenue comes from fixed-fee diagnostic packages, project-based engagements and \
                 monthly retainers for ongoing advisory support. Workshops and training programs \
                 delivered to groups add a scalable second revenue stream."
            }
            Self::Service => {
                "Customers pay per booking or choose a discounted monthly plan for recurring \
                 service. Corporate and bulk contracts provide predictable volume, and value-added \
                 services increase the average order size."
            }
            Self::Product => {
                "Revenue comes from direct product sales through our own online store, with \
                 additional volume through retail partners and bulk orders. Healthy unit margins \
                 are protected by efficient sourcing, and repeat purchases drive lifetime value."
            }
            Self::General => {
                "We will earn revenue through direct sales to customers, complemented by \
                 recurring plans for repeat users and partnerships that open new distribution \
                 channels. Pricing will be validated during the pilot phase."
            }
        }
    }

    /// How the funds will be spent.
    #[must_use]
    pub const fn use_of_funds(self) -> &'static str {
        match self {
            Self::Platform => {
                "The funds will be used for product development, cloud infrastructure, a focused \
                 customer acquisition campaign and onboarding support for our first customers."
            }
            Self::Consulting => {
                "The funds will be used to formalize our methodology, build marketing material \
                 and case studies, and support the team while we secure our first anchor clients."
            }
            Self::Service => {
                "The funds will be used for equipment, staff training, a booking system and local \
                 marketing to build density in our launch area."
            }
            Self::Product => {
                "The funds will be used for the first production run, quality testing, packaging \
                 and the launch of our online and retail sales channels."
            }
            Self::General => {
                "The funds will be used to build the first version of our offering, run a pilot \
                 with early customers and establish the basic operations needed to grow."
            }
        }
    }

    /// Short bullet naming the revenue model, for slides and outlines.
    #[must_use]
    pub const fn revenue_headline(self) -> &'static str {
        match self {
            Self::Platform => "Freemium subscriptions with paid monthly and annual plans",
            Self::Consulting => "Diagnostic packages, project fees and monthly retainers",
            Self::Service => "Pay-per-booking plus discounted recurring plans",
            Self::Product => "Direct online sales, retail partners and bulk orders",
            Self::General => "Direct sales with recurring plans for repeat customers",
        }
    }
}

impl MarketSegment {
    /// Plural noun phrase naming the customers.
    #[must_use]
    pub const fn customers(self) -> &'static str {
        match self {
            Self::Students => "college students",
            Self::SmallBusiness => "small businesses",
            Self::Enterprise => "enterprises and corporate teams",
            Self::Restaurants => "restaurants and food businesses",
            Self::Retail => "retailers and online stores",
            Self::Healthcare => "clinics, hospitals and patients",
            Self::Education => "schools, teachers and learners",
            Self::HomeBased => "home-based entrepreneurs",
            Self::SmallAndMedium => "small and medium businesses",
        }
    }

    /// What this group struggles with.
    #[must_use]
    pub const fn pain(self) -> &'static str {
        match self {
            Self::Students => {
                "manage tight budgets and busy schedules and need solutions that are affordable, \
                 mobile-first and quick to use"
            }
            Self::SmallBusiness => {
                "operate with limited staff and budgets and cannot afford tools or services built \
                 for large companies"
            }
            Self::Enterprise => {
                "face slow processes and rising costs across large teams and need solutions that \
                 integrate with existing systems"
            }
            Self::Restaurants => {
                "work on thin margins and long hours, where every wasted order or empty table \
                 directly hurts profit"
            }
            Self::Retail => {
                "compete with large chains and marketplaces while managing stock, pricing and \
                 customer loyalty with limited resources"
            }
            Self::Healthcare => {
                "deal with overloaded staff and fragmented information, which costs time and \
                 affects the quality of care"
            }
            Self::Education => {
                "have limited time and resources to give every learner the attention and tools \
                 they need"
            }
            Self::HomeBased => {
                "run their businesses alone, often part-time, and lack the reach, tools and \
                 support that larger businesses take for granted"
            }
            Self::SmallAndMedium => {
                "need to grow efficiently but lack the budgets, tools and specialist staff of \
                 larger competitors"
            }
        }
    }

    /// Why this group is an attractive market.
    #[must_use]
    pub const fn opportunity(self) -> &'static str {
        match self {
            Self::Students => {
                "The student market is large, digitally native and concentrated on campuses, \
                 which makes it inexpensive to reach through campus ambassadors, clubs and \
                 word of mouth."
            }
            Self::SmallBusiness => {
                "Small businesses make up the vast majority of enterprises and are increasingly \
                 adopting digital tools, yet remain underserved by solutions designed for their \
                 size and budget."
            }
            Self::Enterprise => {
                "Enterprise buyers have large budgets and long customer lifetimes, and a single \
                 successful deployment often expands across departments and locations."
            }
            Self::Restaurants => {
                "The food service industry is large and fragmented, with steady demand and a \
                 growing willingness to adopt tools that reduce waste and raise margins."
            }
            Self::Retail => {
                "Retail is one of the largest consumer markets, and independent retailers are \
                 actively looking for ways to compete with organized chains and e-commerce."
            }
            Self::Healthcare => {
                "Healthcare spending continues to grow, and providers are under pressure to \
                 improve efficiency and patient experience at the same time."
            }
            Self::Education => {
                "Education is a large and resilient market, and schools and families continue to \
                 invest in anything that measurably improves learning outcomes."
            }
            Self::HomeBased => {
                "The number of home-based entrepreneurs and freelancers is growing quickly, \
                 driven by digital payments, social commerce and flexible work."
            }
            Self::SmallAndMedium => {
                "Small and medium businesses form the backbone of the economy and are adopting \
                 new tools and services faster than ever, creating a large and growing market."
            }
        }
    }
}
