//! Named pattern predicates used by signal extraction and classification
//!
//! Every textual heuristic in the crate lives here as a named, testable
//! predicate backed by a lazily compiled regex. Extraction and scoring code
//! call these by name so the Tier-1/Tier-2 fallback ordering stays auditable.

use once_cell::sync::Lazy;
use regex::Regex;

/// Heading text that marks an explicit FAQ section (Tier 1).
static FAQ_HEADING: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(faqs?|frequently asked questions|common questions|q\s*&\s*a)\b")
        .expect("invalid FAQ heading regex")
});

/// Link targets that suggest an FAQ/help section exists elsewhere (Tier 2).
static INDIRECT_FAQ_HREF: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)/(faqs?|help|support|docs|documentation|questions)(/|\.|#|\?|$)")
        .expect("invalid indirect FAQ href regex")
});

/// Definition-like opening sentence: "X is a ...", "X helps ... by ...".
static DEFINITION_SENTENCE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b[\w][\w .&'-]{0,48}\s+(is an?|is the)\s+\w|\b[\w][\w .&'-]{0,48}\s+helps?\s+[^.]{0,80}\bby\b")
        .expect("invalid definition sentence regex")
});

/// Headings introducing an explanation of process ("How it works", "Steps").
static PROCESS_HEADING: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(how (it|this|\w+) works?|our process|getting started|steps?\b)")
        .expect("invalid process heading regex")
});

/// An explicit numbered sequence ("1. ... 2. ...") within running text.
static NUMBERED_SEQUENCE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)\b1[.)]\s+\S.{0,200}?\b2[.)]\s+\S")
        .expect("invalid numbered sequence regex")
});

/// Pricing vocabulary and currency amounts in rendered text.
static PRICING_TEXT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)[$€£]\s?\d|\b\d+(\.\d+)?\s?(usd|eur|gbp)\b|\b(per month|per year|/mo\b|/yr\b|pricing|price list|free trial|free plan)")
        .expect("invalid pricing text regex")
});

/// Navigation links into a pricing or plans page.
static PRICING_HREF: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)/(pricing|plans|packages)(/|\.|#|\?|$)").expect("invalid pricing href regex")
});

/// Links or headings that identify company/about information.
static ABOUT_MARKER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)/about([_-]?us)?(/|\.|#|\?|$)|\babout us\b|\bour (story|company|team|mission)\b")
        .expect("invalid about marker regex")
});

/// Contact page links.
static CONTACT_HREF: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)/contact([_-]?us)?(/|\.|#|\?|$)").expect("invalid contact href regex")
});

/// Phone numbers printed in page text (loose, international-tolerant).
static PHONE_TEXT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\+?\d[\d ().-]{7,}\d").expect("invalid phone regex")
});

/// Reason strings that indicate the snapshot could not be fetched at all.
static BLOCKED_ACCESS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(http )?(403|429)\b|forbidden|too many requests|fetch failed|access denied")
        .expect("invalid blocked access regex")
});

/// Explicit refusal / no-browsing phrasing in a model transcript.
static REFUSAL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(i\s+)?(cannot|can't|am unable to|unable to)\s+(access|browse|visit|open|retrieve|look up)|\bno (browsing|web access|internet access)\b|\bdo(es)? not have (browsing|web|internet) (access|capabilit)|\bas an ai[^.]{0,60}(cannot|can't|unable)")
        .expect("invalid refusal regex")
});

/// "Why uncertain" language attributing a gap to lack of site access.
static ACCESS_GAP: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(no|without|lack(ing|s)? of?|cannot|can't|unable to)\s+\w{0,12}\s*(access|brows|retriev|visit|verify|fetch)|\bnot\s+(able|available)\s+to\s+(access|browse|verify)")
        .expect("invalid access gap regex")
});

/// Hedging vocabulary in a model transcript.
static HEDGING: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(appears?|seems?|might|may|could|possibly|likely|suggests?|unclear)\b")
        .expect("invalid hedging regex")
});

/// Marker text that a page only renders with JavaScript enabled.
static JS_REQUIRED: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(enable|requires?|turn on)\s+javascript|you need to enable javascript")
        .expect("invalid js-required regex")
});

/// Boilerplate heading texts that say nothing about the offering.
const GENERIC_HEADINGS: &[&str] = &[
    "home",
    "welcome",
    "features",
    "faq",
    "faqs",
    "about",
    "about us",
    "contact",
    "contact us",
    "pricing",
    "blog",
    "news",
    "resources",
    "products",
    "services",
    "solutions",
    "get started",
    "learn more",
    "sign up",
    "log in",
    "overview",
    "more",
];

pub fn is_faq_heading(text: &str) -> bool {
    FAQ_HEADING.is_match(text)
}

pub fn is_indirect_faq_href(href: &str) -> bool {
    INDIRECT_FAQ_HREF.is_match(href)
}

pub fn has_definition_sentence(text: &str) -> bool {
    DEFINITION_SENTENCE.is_match(text)
}

/// Byte range of the first definition-like sentence, for evidence snippets.
pub fn find_definition_sentence(text: &str) -> Option<(usize, usize)> {
    DEFINITION_SENTENCE.find(text).map(|m| (m.start(), m.end()))
}

pub fn is_process_heading(text: &str) -> bool {
    PROCESS_HEADING.is_match(text)
}

pub fn has_numbered_sequence(text: &str) -> bool {
    NUMBERED_SEQUENCE.is_match(text)
}

/// Byte ranges of every pricing match in `text`, in order of appearance.
pub fn pricing_match_positions(text: &str) -> Vec<(usize, usize)> {
    PRICING_TEXT.find_iter(text).map(|m| (m.start(), m.end())).collect()
}

pub fn has_pricing_text(text: &str) -> bool {
    PRICING_TEXT.is_match(text)
}

pub fn is_pricing_href(href: &str) -> bool {
    PRICING_HREF.is_match(href)
}

pub fn is_about_marker(text: &str) -> bool {
    ABOUT_MARKER.is_match(text)
}

/// Byte range of the first about marker in running text.
pub fn find_about_marker(text: &str) -> Option<(usize, usize)> {
    ABOUT_MARKER.find(text).map(|m| (m.start(), m.end()))
}

pub fn is_contact_href(href: &str) -> bool {
    CONTACT_HREF.is_match(href)
}

pub fn has_phone_number(text: &str) -> bool {
    PHONE_TEXT.is_match(text)
}

pub fn is_blocked_access_reason(reason: &str) -> bool {
    BLOCKED_ACCESS.is_match(reason)
}

pub fn has_refusal_phrase(text: &str) -> bool {
    REFUSAL.is_match(text)
}

pub fn has_access_gap_language(text: &str) -> bool {
    ACCESS_GAP.is_match(text)
}

/// All hedging terms found in `text`, lowercased, in order of appearance.
pub fn hedging_matches(text: &str) -> Vec<String> {
    HEDGING
        .find_iter(text)
        .map(|m| m.as_str().to_lowercase())
        .collect()
}

pub fn requires_javascript(text: &str) -> bool {
    JS_REQUIRED.is_match(text)
}

/// Whether a heading is boilerplate rather than descriptive of the offering.
pub fn is_generic_heading(text: &str) -> bool {
    let normalized = text.trim().trim_end_matches([':', '.', '!']).to_lowercase();
    GENERIC_HEADINGS.contains(&normalized.as_str())
}

/// Structured-data detection, Tier 1: an ld+json script type attribute.
///
/// Matches loosely ("application/ld+json; charset=utf-8" variants included).
pub fn is_ld_json_type(script_type: &str) -> bool {
    script_type.trim().to_ascii_lowercase().contains("ld+json")
}

/// Structured-data detection, Tier 2: a `@context` marker and a schema.org
/// vocabulary reference co-occurring within a bounded window of raw markup.
///
/// Tolerates minified or obfuscated pages where the script tag itself is
/// mangled but the vocabulary is plainly embedded.
pub fn has_structured_data_window(raw: &str, window: usize) -> bool {
    let lower = raw.to_lowercase();
    let mut search_from = 0;
    while let Some(rel) = lower[search_from..].find("@context") {
        let at = search_from + rel;
        let end = (at + window).min(lower.len());
        // clamp to a char boundary so the slice below cannot panic
        let end = (end..lower.len().min(end + 4))
            .find(|&i| lower.is_char_boundary(i))
            .unwrap_or(lower.len());
        if lower[at..end].contains("schema.org") {
            return true;
        }
        search_from = at + "@context".len();
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_faq_heading_variants() {
        assert!(is_faq_heading("FAQ"));
        assert!(is_faq_heading("Frequently Asked Questions"));
        assert!(is_faq_heading("Common questions about billing"));
        assert!(is_faq_heading("Q & A"));
        assert!(!is_faq_heading("Our story"));
    }

    #[test]
    fn test_indirect_faq_href() {
        assert!(is_indirect_faq_href("/faq"));
        assert!(is_indirect_faq_href("https://example.com/help#billing"));
        assert!(is_indirect_faq_href("/docs/getting-started"));
        assert!(is_indirect_faq_href("/support?topic=x"));
        assert!(!is_indirect_faq_href("/pricing"));
    }

    #[test]
    fn test_definition_sentence() {
        assert!(has_definition_sentence("Acme is a payroll platform for startups."));
        assert!(has_definition_sentence("Acme helps founders save time by automating payroll."));
        assert!(!has_definition_sentence("Welcome to our site. Click around!"));
    }

    #[test]
    fn test_numbered_sequence() {
        assert!(has_numbered_sequence("1. Sign up 2. Connect your bank"));
        assert!(has_numbered_sequence("1) Create an account, then 2) invite your team"));
        assert!(!has_numbered_sequence("Version 1.2 was released"));
    }

    #[test]
    fn test_pricing_text() {
        assert!(has_pricing_text("Plans from $29 per month"));
        assert!(has_pricing_text("49 USD billed annually"));
        assert!(has_pricing_text("See our pricing"));
        assert!(!has_pricing_text("We price-match nothing here")); // no standalone vocabulary
    }

    #[test]
    fn test_about_and_contact_markers() {
        assert!(is_about_marker("/about"));
        assert!(is_about_marker("/about-us/"));
        assert!(is_about_marker("Learn more about us"));
        assert!(is_about_marker("Our mission is simple"));
        assert!(is_contact_href("/contact"));
        assert!(is_contact_href("/contact-us?ref=nav"));
        assert!(!is_contact_href("/blog/contacting-aliens"));
    }

    #[test]
    fn test_blocked_access_reason() {
        assert!(is_blocked_access_reason("HTTP 403 received from origin"));
        assert!(is_blocked_access_reason("blocked: too many requests"));
        assert!(is_blocked_access_reason("fetch failed: connection reset"));
        assert!(!is_blocked_access_reason("title is missing"));
    }

    #[test]
    fn test_refusal_phrases() {
        assert!(has_refusal_phrase("I cannot access external websites."));
        assert!(has_refusal_phrase("I'm sorry, but I am unable to browse the internet."));
        assert!(has_refusal_phrase("I do not have browsing access."));
        assert!(!has_refusal_phrase("The site is a payroll tool."));
    }

    #[test]
    fn test_access_gap_language() {
        assert!(has_access_gap_language("no access to the live site"));
        assert!(has_access_gap_language("cannot verify details without browsing"));
        assert!(!has_access_gap_language("the pricing section was vague"));
    }

    #[test]
    fn test_hedging_matches() {
        let matches = hedging_matches("It appears to be a CRM and might target agencies.");
        assert_eq!(matches, vec!["appears", "might"]);
        assert!(hedging_matches("It is a CRM for agencies.").is_empty());
    }

    #[test]
    fn test_generic_headings() {
        assert!(is_generic_heading("Home"));
        assert!(is_generic_heading("  FEATURES  "));
        assert!(is_generic_heading("FAQ"));
        assert!(is_generic_heading("Get started!"));
        assert!(!is_generic_heading("Payroll for startups"));
    }

    #[test]
    fn test_ld_json_type() {
        assert!(is_ld_json_type("application/ld+json"));
        assert!(is_ld_json_type("APPLICATION/LD+JSON; charset=utf-8"));
        assert!(!is_ld_json_type("text/javascript"));
    }

    #[test]
    fn test_structured_data_window() {
        let minified = r#"<script>{"@context":"https://schema.org","@type":"Organization"}</script>"#;
        assert!(has_structured_data_window(minified, 300));

        // marker and vocabulary too far apart
        let far = format!("@context{}schema.org", "x".repeat(400));
        assert!(!has_structured_data_window(&far, 300));

        assert!(!has_structured_data_window("<html>no markers</html>", 300));
    }

    #[test]
    fn test_js_required_marker() {
        assert!(requires_javascript("You need to enable JavaScript to run this app."));
        assert!(requires_javascript("This page requires JavaScript."));
        assert!(!requires_javascript("We serve static HTML."));
    }
}
