//! Signal extraction from captured HTML snapshots
//!
//! Turns raw markup plus its source URL into an [`ExtractedSignals`] record.
//! Extraction never fails: on any parse irregularity the affected signal is
//! simply absent or false. Several signals use a tiered policy, an explicit
//! structural match (Tier 1) with a weaker textual/contextual fallback
//! (Tier 2), and the scorer awards credit accordingly, so the two tiers are
//! recorded separately and never merged here.

use scraper::{Html, Selector};
use serde_json::Value as JsonValue;
use url::Url;

use crate::evidence::{heading_excerpt, snippet_around, snippet_excerpt, strip_markup, clean_text};
use crate::patterns;
use crate::types::{Evidence, ExtractedSignals, FaqEvidence};

/// Direct-answer detection only scans this much of the rendered body text.
const DIRECT_ANSWER_SCAN_CHARS: usize = 2500;

/// Tier-2 structured-data detection window (see [`patterns::has_structured_data_window`]).
const STRUCTURED_DATA_WINDOW: usize = 300;

/// Below this much rendered text the snapshot is considered unusably thin.
const MIN_BODY_TEXT_CHARS: usize = 200;

/// With a JavaScript-required marker present, this is the minimum rendered
/// text for the snapshot to still count as usable.
const JS_ONLY_TEXT_CHARS: usize = 500;

/// Extract all recommendation signals from one captured page.
pub fn extract_signals(html: &str, url: &str) -> ExtractedSignals {
    let document = Html::parse_document(html);

    let title = first_text(&document, "title").map(|t| heading_excerpt(&t));
    let meta_description = attr_value(&document, "meta[name=\"description\"]", "content")
        .map(|d| snippet_excerpt(&d));

    let h1s = collect_texts(&document, "h1");
    let h2s = collect_texts(&document, "h2");
    let h3s = collect_texts(&document, "h3");

    let hrefs = collect_hrefs(&document);
    let body_text = clean_text(&strip_markup(html));

    let faq = extract_faq(&h1s, &h2s, &h3s, &hrefs);
    let answer = extract_direct_answer(&document, &h2s, &h3s, &body_text);
    let structured = extract_structured_data(&document, html);
    let pricing = extract_pricing(&body_text, &hrefs);
    let about = extract_about(&hrefs, &h2s, &body_text);
    let contact = extract_contact(&hrefs, &body_text);

    let (domain, brand_guess) = domain_and_brand(url, title.as_deref());

    let evidence = Evidence {
        title: title.clone(),
        first_h1: h1s.first().cloned(),
        h2_samples: h2s.iter().take(8).cloned().collect(),
        pricing_snippets: pricing.snippets,
        about_snippets: about.snippets,
        contact_snippets: contact.evidence.clone(),
        faq: FaqEvidence {
            heading: faq.heading,
            indirect_links: faq.indirect_links,
            answer_snippet: answer.snippet,
        },
    };

    ExtractedSignals {
        title,
        meta_description,
        h1s,
        h2s,
        h3s,
        has_faq: faq.direct,
        has_indirect_faq: faq.indirect,
        has_direct_answer_block: answer.found,
        has_structured_data: structured.found,
        structured_data_types: structured.types,
        has_pricing: pricing.found,
        has_pricing_nav: pricing.nav,
        has_about: about.found,
        has_contact_signals: contact.found,
        contact_evidence: contact.evidence,
        domain,
        brand_guess,
        evidence,
    }
}

/// Detect snapshots too thin to score, returning the incompleteness reason.
///
/// A snapshot qualifies when its rendered text is nearly empty, or when it
/// carries an enable-JavaScript marker and renders almost nothing statically.
/// The pipeline promotes a hit to `AnalysisStatus::SnapshotIncomplete`.
pub fn snapshot_incompleteness(html: &str) -> Option<String> {
    let body_text = clean_text(&strip_markup(html));
    let chars = body_text.chars().count();

    if chars < MIN_BODY_TEXT_CHARS {
        return Some(format!(
            "snapshot renders only {chars} characters of text; too thin to score"
        ));
    }
    if patterns::requires_javascript(html) && chars < JS_ONLY_TEXT_CHARS {
        return Some(
            "snapshot asks for JavaScript and renders almost no static content".to_string(),
        );
    }
    None
}

struct FaqSignals {
    direct: bool,
    indirect: bool,
    heading: Option<String>,
    indirect_links: Vec<String>,
}

fn extract_faq(h1s: &[String], h2s: &[String], h3s: &[String], hrefs: &[LinkRef]) -> FaqSignals {
    // Tier 1: an FAQ-pattern heading anywhere on the page
    let heading = h1s
        .iter()
        .chain(h2s)
        .chain(h3s)
        .find(|h| patterns::is_faq_heading(h))
        .cloned();

    // Tier 2: navigation into an FAQ/help/docs section elsewhere
    let indirect_links: Vec<String> = hrefs
        .iter()
        .filter(|l| patterns::is_indirect_faq_href(&l.href))
        .take(3)
        .map(|l| snippet_excerpt(&l.href))
        .collect();

    FaqSignals {
        direct: heading.is_some(),
        indirect: !indirect_links.is_empty(),
        heading,
        indirect_links,
    }
}

struct AnswerSignals {
    found: bool,
    snippet: Option<String>,
}

fn extract_direct_answer(
    document: &Html,
    h2s: &[String],
    h3s: &[String],
    body_text: &str,
) -> AnswerSignals {
    let lead: String = body_text.chars().take(DIRECT_ANSWER_SCAN_CHARS).collect();

    if let Some((start, _)) = patterns::find_definition_sentence(&lead) {
        return AnswerSignals {
            found: true,
            snippet: Some(snippet_around(&lead, start, 120)),
        };
    }

    // A process heading only counts with real step content under it
    let has_process_heading = h2s.iter().chain(h3s).any(|h| patterns::is_process_heading(h));
    if has_process_heading {
        let list_items = count_elements(document, "li");
        if list_items >= 2 || patterns::has_numbered_sequence(&lead) {
            let heading = h2s
                .iter()
                .chain(h3s)
                .find(|h| patterns::is_process_heading(h))
                .cloned();
            return AnswerSignals { found: true, snippet: heading };
        }
    }

    AnswerSignals { found: false, snippet: None }
}

struct StructuredDataSignals {
    found: bool,
    types: std::collections::BTreeSet<String>,
}

fn extract_structured_data(document: &Html, raw_html: &str) -> StructuredDataSignals {
    let mut types = std::collections::BTreeSet::new();
    let mut found = false;

    // Tier 1: explicit ld+json script blocks
    if let Ok(selector) = Selector::parse("script") {
        for element in document.select(&selector) {
            let script_type = element.value().attr("type").unwrap_or_default();
            if !patterns::is_ld_json_type(script_type) {
                continue;
            }
            let text = element.text().collect::<String>();
            if text.trim().is_empty() {
                continue;
            }
            found = true;
            if let Ok(value) = serde_json::from_str::<JsonValue>(&text) {
                collect_type_names(&value, &mut types);
            }
        }
    }

    // Tier 2: @context co-occurring with schema.org in minified markup
    if !found {
        found = patterns::has_structured_data_window(raw_html, STRUCTURED_DATA_WINDOW);
    }

    StructuredDataSignals { found, types }
}

/// Walk a JSON-LD value collecting short `@type` names (IRI tails included).
fn collect_type_names(value: &JsonValue, types: &mut std::collections::BTreeSet<String>) {
    match value {
        JsonValue::Object(obj) => {
            if let Some(type_value) = obj.get("@type") {
                match type_value {
                    JsonValue::String(s) => {
                        types.insert(shorten_iri(s));
                    }
                    JsonValue::Array(arr) => {
                        for item in arr {
                            if let JsonValue::String(s) = item {
                                types.insert(shorten_iri(s));
                            }
                        }
                    }
                    _ => {}
                }
            }
            for nested in obj.values() {
                collect_type_names(nested, types);
            }
        }
        JsonValue::Array(arr) => {
            for item in arr {
                collect_type_names(item, types);
            }
        }
        _ => {}
    }
}

fn shorten_iri(iri: &str) -> String {
    let tail = iri.rsplit(['/', '#']).next().unwrap_or(iri);
    tail.to_string()
}

struct PricingSignals {
    found: bool,
    nav: bool,
    snippets: Vec<String>,
}

fn extract_pricing(body_text: &str, hrefs: &[LinkRef]) -> PricingSignals {
    let snippets: Vec<String> = patterns::pricing_match_positions(body_text)
        .into_iter()
        .take(3)
        .map(|(start, _)| snippet_around(body_text, start, 60))
        .collect();

    let nav = hrefs.iter().any(|l| patterns::is_pricing_href(&l.href));

    PricingSignals { found: !snippets.is_empty(), nav, snippets }
}

struct AboutSignals {
    found: bool,
    snippets: Vec<String>,
}

fn extract_about(hrefs: &[LinkRef], h2s: &[String], body_text: &str) -> AboutSignals {
    let mut snippets = Vec::new();

    for link in hrefs {
        if patterns::is_about_marker(&link.href) {
            let label = if link.text.is_empty() { &link.href } else { &link.text };
            snippets.push(snippet_excerpt(label));
            break;
        }
    }
    if let Some(heading) = h2s.iter().find(|h| patterns::is_about_marker(h)) {
        snippets.push(heading.clone());
    }
    if snippets.is_empty()
        && let Some((start, _)) = patterns::find_about_marker(body_text)
    {
        snippets.push(snippet_around(body_text, start, 60));
    }

    snippets.truncate(3);
    AboutSignals { found: !snippets.is_empty(), snippets }
}

struct ContactSignals {
    found: bool,
    evidence: Vec<String>,
}

fn extract_contact(hrefs: &[LinkRef], body_text: &str) -> ContactSignals {
    let mut evidence = Vec::new();

    for link in hrefs {
        let href_lower = link.href.to_lowercase();
        if href_lower.starts_with("mailto:") || href_lower.starts_with("tel:") {
            evidence.push(snippet_excerpt(&link.href));
        } else if patterns::is_contact_href(&link.href) {
            evidence.push(snippet_excerpt(&link.href));
        }
        if evidence.len() == 3 {
            break;
        }
    }

    if evidence.len() < 3 && patterns::has_phone_number(body_text) {
        evidence.push("phone number in page text".to_string());
    }

    ContactSignals { found: !evidence.is_empty(), evidence }
}

/// Derive `(domain, brand_guess)` from the source URL, falling back to the
/// first title token when the URL has no usable host.
fn domain_and_brand(url: &str, title: Option<&str>) -> (String, String) {
    let domain = Url::parse(url)
        .ok()
        .and_then(|u| u.host_str().map(|h| h.trim_start_matches("www.").to_lowercase()))
        .unwrap_or_default();

    let brand = domain
        .split('.')
        .next()
        .filter(|label| !label.is_empty())
        .map(str::to_string)
        .or_else(|| {
            title
                .and_then(|t| t.split_whitespace().next())
                .map(|t| t.to_lowercase())
        })
        .unwrap_or_default();

    (domain, brand)
}

struct LinkRef {
    href: String,
    text: String,
}

fn collect_hrefs(document: &Html) -> Vec<LinkRef> {
    let Ok(selector) = Selector::parse("a[href]") else {
        return Vec::new();
    };
    document
        .select(&selector)
        .filter_map(|element| {
            let href = element.value().attr("href")?.trim().to_string();
            if href.is_empty() {
                return None;
            }
            let text = clean_text(&element.text().collect::<String>());
            Some(LinkRef { href, text })
        })
        .collect()
}

fn collect_texts(document: &Html, selector_str: &str) -> Vec<String> {
    let Ok(selector) = Selector::parse(selector_str) else {
        return Vec::new();
    };
    document
        .select(&selector)
        .map(|element| heading_excerpt(&element.text().collect::<String>()))
        .filter(|text| !text.is_empty())
        .collect()
}

fn first_text(document: &Html, selector_str: &str) -> Option<String> {
    let selector = Selector::parse(selector_str).ok()?;
    document
        .select(&selector)
        .map(|element| clean_text(&element.text().collect::<String>()))
        .find(|text| !text.is_empty())
}

fn attr_value(document: &Html, selector_str: &str, attr: &str) -> Option<String> {
    let selector = Selector::parse(selector_str).ok()?;
    document
        .select(&selector)
        .filter_map(|element| element.value().attr(attr))
        .map(clean_text)
        .find(|text| !text.is_empty())
}

fn count_elements(document: &Html, selector_str: &str) -> usize {
    if let Ok(selector) = Selector::parse(selector_str) {
        document.select(&selector).count()
    } else {
        0
    }
}
