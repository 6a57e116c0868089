//! Category scoring over extracted signals
//!
//! Each of the five categories is computed independently and concatenated in
//! a fixed order, so reports are stable across runs. Checks either grade a
//! quality (title/brand, heading quality, the FAQ ladder) or test bare
//! presence (structured data, trust, commercial). A perfect 100 requires
//! every signal to be maximally present; it is a ceiling, not an average.

use crate::patterns;
use crate::types::{BreakdownItem, Category, ExtractedSignals};

/// A scored breakdown plus its exact sum.
#[derive(Debug, Clone)]
pub struct ScoredBreakdown {
    pub items: Vec<BreakdownItem>,
    pub total: u32,
}

/// Score one page's extracted signals.
pub fn score_signals(signals: &ExtractedSignals) -> ScoredBreakdown {
    let mut items = Vec::new();
    items.extend(score_entity_clarity(signals));
    items.extend(score_structural(signals));
    items.extend(score_answerability(signals));
    items.extend(score_trust(signals));
    items.extend(score_commercial(signals));

    let total = items.iter().map(|item| item.points).sum();
    ScoredBreakdown { items, total }
}

fn item(
    label: &str,
    points: u32,
    max: u32,
    reason: impl Into<String>,
    category: Category,
) -> BreakdownItem {
    debug_assert!(points <= max);
    BreakdownItem { label: label.to_string(), points, max, reason: reason.into(), category }
}

/// Entity Clarity, 25 points: does the page say who this is?
fn score_entity_clarity(signals: &ExtractedSignals) -> Vec<BreakdownItem> {
    let category = Category::EntityClarity;
    let mut items = Vec::new();

    // Title names the brand: full only on a case-insensitive brand substring,
    // half for a brandless title, zero without a title at all.
    items.push(match &signals.title {
        Some(title) => {
            let brand = &signals.brand_guess;
            if !brand.is_empty() && title.to_lowercase().contains(brand) {
                item("Title names the brand", 10, 10, format!("title contains \"{brand}\""), category)
            } else {
                item(
                    "Title names the brand",
                    5,
                    10,
                    "title present but brand could not be confirmed in it",
                    category,
                )
            }
        }
        None => item("Title names the brand", 0, 10, "no <title> found", category),
    });

    items.push(match &signals.meta_description {
        Some(_) => item("Meta description", 5, 5, "meta description present", category),
        None => item("Meta description", 0, 5, "no meta description", category),
    });

    items.push(match signals.h1s.first() {
        Some(h1) if !patterns::is_generic_heading(h1) => {
            item("H1 describes the offering", 5, 5, format!("\"{h1}\""), category)
        }
        Some(h1) => item(
            "H1 describes the offering",
            2,
            5,
            format!("H1 \"{h1}\" is boilerplate"),
            category,
        ),
        None => item("H1 describes the offering", 0, 5, "no H1 found", category),
    });

    let org_types = ["Organization", "Corporation", "LocalBusiness", "Brand", "OnlineBusiness"];
    let has_org_type = signals
        .structured_data_types
        .iter()
        .any(|t| org_types.contains(&t.as_str()));
    items.push(if has_org_type {
        item(
            "Structured data declares the organization",
            5,
            5,
            "organization-type structured data found",
            category,
        )
    } else {
        item(
            "Structured data declares the organization",
            0,
            5,
            "no organization-type structured data",
            category,
        )
    });

    items
}

/// Structural Comprehension, 20 points: can a machine follow the page outline?
fn score_structural(signals: &ExtractedSignals) -> Vec<BreakdownItem> {
    let category = Category::StructuralComprehension;
    let mut items = Vec::new();

    let headings: Vec<&String> = signals.h2s.iter().chain(&signals.h3s).collect();
    let descriptive = headings.iter().filter(|h| !patterns::is_generic_heading(h)).count();
    let generic = headings.len() - descriptive;

    // Majority descriptive with at least one heading present earns full credit
    items.push(if headings.is_empty() {
        item("Descriptive section headings", 0, 10, "no section headings found", category)
    } else if descriptive > generic {
        item(
            "Descriptive section headings",
            10,
            10,
            format!("{descriptive} of {} headings are descriptive", headings.len()),
            category,
        )
    } else {
        item(
            "Descriptive section headings",
            5,
            10,
            format!("{generic} of {} headings are boilerplate", headings.len()),
            category,
        )
    });

    let has_hierarchy = !signals.h1s.is_empty() && signals.h2s.len() >= 2;
    items.push(if has_hierarchy {
        item("Heading hierarchy", 5, 5, "H1 with multiple H2 sections", category)
    } else {
        item("Heading hierarchy", 0, 5, "no H1-to-H2 section structure", category)
    });

    let has_depth = !signals.h3s.is_empty() || signals.h2s.len() >= 4;
    items.push(if has_depth {
        item("Subtopic depth", 5, 5, "subtopics present beneath main sections", category)
    } else {
        item("Subtopic depth", 0, 5, "content is a single flat level", category)
    });

    items
}

/// Answerability Signals, 20 points: can an assistant lift answers directly?
fn score_answerability(signals: &ExtractedSignals) -> Vec<BreakdownItem> {
    let category = Category::AnswerabilitySignals;
    let mut items = Vec::new();

    // Strict fallback ladder: Tier-1 FAQ, then a direct-answer block, then
    // indirect (Tier-2) presence, then nothing. Only the strongest available
    // evidence is credited; partial credits never stack.
    items.push(if signals.has_faq {
        item("FAQ content", 10, 10, "FAQ section found on the page", category)
    } else if signals.has_direct_answer_block {
        item("FAQ content", 6, 10, "no FAQ, but a direct-answer block is present", category)
    } else if signals.has_indirect_faq {
        item("FAQ content", 3, 10, "FAQ/help only linked, not on the page", category)
    } else {
        item("FAQ content", 0, 10, "no FAQ or answer-style content found", category)
    });

    items.push(if signals.has_structured_data {
        item("Structured data (schema.org)", 10, 10, "structured data markup present", category)
    } else {
        item("Structured data (schema.org)", 0, 10, "no structured data markup", category)
    });

    items
}

/// Trust & Legitimacy, 20 points: is there a real operator behind the page?
fn score_trust(signals: &ExtractedSignals) -> Vec<BreakdownItem> {
    let category = Category::TrustLegitimacy;
    let mut items = Vec::new();

    items.push(if signals.has_about {
        item("About/company information", 10, 10, "about-page signals found", category)
    } else {
        item("About/company information", 0, 10, "no about-page signals", category)
    });

    items.push(if signals.has_contact_signals {
        let detail = signals
            .contact_evidence
            .first()
            .map(|e| format!("contact signals found ({e})"))
            .unwrap_or_else(|| "contact signals found".to_string());
        item("Contact signals", 10, 10, detail, category)
    } else {
        item("Contact signals", 0, 10, "no contact signals", category)
    });

    items
}

/// Commercial Clarity, 15 points: is the commercial offer visible?
fn score_commercial(signals: &ExtractedSignals) -> Vec<BreakdownItem> {
    let category = Category::CommercialClarity;
    let mut items = Vec::new();

    items.push(if signals.has_pricing {
        item("Pricing visibility", 10, 10, "pricing information found in page text", category)
    } else {
        item("Pricing visibility", 0, 10, "no pricing information found", category)
    });

    let has_offer_type = signals
        .structured_data_types
        .iter()
        .any(|t| matches!(t.as_str(), "Offer" | "Product" | "AggregateOffer" | "Service"));
    items.push(if signals.has_pricing_nav || has_offer_type {
        item(
            "Plans or offer markup",
            5,
            5,
            "pricing navigation or offer-type structured data present",
            category,
        )
    } else {
        item("Plans or offer markup", 0, 5, "no pricing navigation or offer markup", category)
    });

    items
}
