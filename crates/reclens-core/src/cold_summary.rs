//! Cold-summary transcript analysis
//!
//! Parses the free text a model produces when asked to describe a site
//! "cold" (no browsing), following a 5-6 line template:
//!
//! ```text
//! Category/Type: ...
//! Who it is for: ...
//! What problem it solves: ...
//! What it offers: ...
//! 1-sentence plain summary: ...
//! Why uncertain: ...        (optional)
//! ```
//!
//! Parsing is tolerant: prefixes match case-insensitively, a leading "N) "
//! ordinal is accepted, and absent lines simply leave the field unknown.
//! Malformed input never fails; it classifies as `Unclear`.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::patterns;

/// How the run failed, or didn't.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureMode {
    /// Explicit refusal to answer without browsing
    Refusal,

    /// Refusal on the URL-only prompt variant
    NoRetrievalUrlOnly,

    /// Four or more of the five fields unknown
    Unclear,

    /// Two or three fields unknown
    Partial,

    /// At most one field unknown
    Clear,
}

/// Coarse display verdict derived from the clarity score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VerdictLabel {
    Clearly,
    Partial,
    Unclear,
}

/// Which prompt produced the transcript; decides which refusal mode applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PromptVariant {
    /// Brand name and URL were both given
    BrandAndUrl,

    /// Only the URL was given
    UrlOnly,
}

/// Raw matched substrings backing the analysis.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FieldSignals {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub audience: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub problem: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub offering: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,

    /// Every hedging term found, in order
    pub hedging_matches: Vec<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub why_uncertain: Option<String>,
}

/// Result of analyzing one cold-summary transcript.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColdSummaryAnalysis {
    pub failure_mode: FailureMode,
    pub verdict_label: VerdictLabel,

    pub has_category: bool,
    pub has_audience: bool,
    pub has_offering: bool,
    pub has_hedging: bool,

    pub refusal_flag: bool,

    /// Unknown fields among the first five (0-5)
    pub unknown_count: u8,

    /// 1-5, higher is clearer
    pub clarity_score: u8,

    pub signals: FieldSignals,
}

/// Accepted line prefixes per field, checked in order.
const CATEGORY_PREFIXES: &[&str] = &["category/type:", "category:", "type:"];
const AUDIENCE_PREFIXES: &[&str] = &["who it is for:", "who it's for:", "audience:"];
const PROBLEM_PREFIXES: &[&str] = &["what problem it solves:", "problem it solves:", "problem:"];
const OFFERING_PREFIXES: &[&str] = &["what it offers:", "offering:", "offers:"];
const SUMMARY_PREFIXES: &[&str] =
    &["1-sentence plain summary:", "one-sentence plain summary:", "plain summary:", "summary:"];
const WHY_UNCERTAIN_PREFIXES: &[&str] = &["why uncertain:", "why i am uncertain:"];

/// Leading "3) " / "3. " ordinal on a template line.
static ORDINAL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*\d+[.)]\s*").expect("invalid ordinal regex"));

/// Analyze one transcript.
pub fn analyze_cold_summary(text: &str, variant: PromptVariant) -> ColdSummaryAnalysis {
    let category = field_value(text, CATEGORY_PREFIXES);
    let audience = field_value(text, AUDIENCE_PREFIXES);
    let problem = field_value(text, PROBLEM_PREFIXES);
    let offering = field_value(text, OFFERING_PREFIXES);
    let summary = field_value(text, SUMMARY_PREFIXES);
    let why_uncertain = field_value(text, WHY_UNCERTAIN_PREFIXES);

    let fields = [&category, &audience, &problem, &offering, &summary];
    let unknown_count = fields.iter().filter(|f| is_unknown(f)).count() as u8;

    let hedging_matches = patterns::hedging_matches(text);
    let has_hedging = !hedging_matches.is_empty();

    let refusal_flag = patterns::has_refusal_phrase(text)
        || (unknown_count >= 4
            && why_uncertain
                .as_deref()
                .map(patterns::has_access_gap_language)
                .unwrap_or(false));

    let failure_mode = if refusal_flag {
        match variant {
            PromptVariant::BrandAndUrl => FailureMode::Refusal,
            PromptVariant::UrlOnly => FailureMode::NoRetrievalUrlOnly,
        }
    } else if unknown_count >= 4 {
        FailureMode::Unclear
    } else if unknown_count >= 2 {
        FailureMode::Partial
    } else {
        FailureMode::Clear
    };

    let clarity_score = match failure_mode {
        FailureMode::Refusal | FailureMode::NoRetrievalUrlOnly => 1,
        FailureMode::Unclear => 2,
        FailureMode::Partial => 3,
        FailureMode::Clear => {
            if unknown_count == 0 && !has_hedging {
                5
            } else {
                4
            }
        }
    };

    let verdict_label = if clarity_score >= 4 {
        VerdictLabel::Clearly
    } else if clarity_score >= 3 {
        VerdictLabel::Partial
    } else {
        VerdictLabel::Unclear
    };

    ColdSummaryAnalysis {
        failure_mode,
        verdict_label,
        has_category: !is_unknown(&category),
        has_audience: !is_unknown(&audience),
        has_offering: !is_unknown(&offering),
        has_hedging,
        refusal_flag,
        unknown_count,
        clarity_score,
        signals: FieldSignals {
            category,
            audience,
            problem,
            offering,
            summary,
            hedging_matches,
            why_uncertain,
        },
    }
}

/// Extract the value of the first line matching one of `prefixes`.
fn field_value(text: &str, prefixes: &[&str]) -> Option<String> {
    for line in text.lines() {
        let stripped = ORDINAL.replace(line.trim(), "");
        for prefix in prefixes {
            if stripped.len() >= prefix.len()
                && stripped.is_char_boundary(prefix.len())
                && stripped[..prefix.len()].eq_ignore_ascii_case(prefix)
            {
                let value = stripped[prefix.len()..].trim().to_string();
                return Some(value);
            }
        }
    }
    None
}

/// A field is unknown when absent, empty, or literally the word "Unknown".
fn is_unknown(value: &Option<String>) -> bool {
    match value {
        None => true,
        Some(v) => {
            let trimmed = v.trim().trim_end_matches(['.', '!']);
            trimmed.is_empty() || trimmed.eq_ignore_ascii_case("unknown")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CLEAR_TRANSCRIPT: &str = "\
Category/Type: B2B SaaS payroll platform
Who it is for: Early-stage startups
What problem it solves: Manual payroll and tax filings
What it offers: Automated payroll, filings, and contractor payments
1-sentence plain summary: Acme runs payroll end to end for small teams.";

    #[test]
    fn test_clear_transcript_scores_5() {
        let analysis = analyze_cold_summary(CLEAR_TRANSCRIPT, PromptVariant::BrandAndUrl);

        assert_eq!(analysis.failure_mode, FailureMode::Clear);
        assert_eq!(analysis.unknown_count, 0);
        assert_eq!(analysis.clarity_score, 5);
        assert_eq!(analysis.verdict_label, VerdictLabel::Clearly);
        assert!(analysis.has_category && analysis.has_audience && analysis.has_offering);
        assert!(!analysis.has_hedging);
        assert_eq!(
            analysis.signals.category.as_deref(),
            Some("B2B SaaS payroll platform")
        );
    }

    #[test]
    fn test_hedged_clear_transcript_scores_4() {
        let text = CLEAR_TRANSCRIPT.replace("runs payroll", "appears to run payroll");
        let analysis = analyze_cold_summary(&text, PromptVariant::BrandAndUrl);

        assert_eq!(analysis.failure_mode, FailureMode::Clear);
        assert_eq!(analysis.clarity_score, 4);
        assert_eq!(analysis.verdict_label, VerdictLabel::Clearly);
        assert_eq!(analysis.signals.hedging_matches, vec!["appears"]);
    }

    #[test]
    fn test_explicit_refusal() {
        let text = "I cannot access external websites, so I can't describe this one.";
        let analysis = analyze_cold_summary(text, PromptVariant::BrandAndUrl);

        assert!(analysis.refusal_flag);
        assert_eq!(analysis.failure_mode, FailureMode::Refusal);
        assert_eq!(analysis.clarity_score, 1);
        assert_eq!(analysis.verdict_label, VerdictLabel::Unclear);
        assert_eq!(analysis.unknown_count, 5);
    }

    #[test]
    fn test_url_only_refusal_mode() {
        let text = "I cannot access external websites.";
        let analysis = analyze_cold_summary(text, PromptVariant::UrlOnly);
        assert_eq!(analysis.failure_mode, FailureMode::NoRetrievalUrlOnly);
        assert_eq!(analysis.clarity_score, 1);
    }

    #[test]
    fn test_implicit_refusal_via_why_uncertain() {
        let text = "\
Category/Type: Unknown
Who it is for: Unknown
What problem it solves: Unknown
What it offers: Unknown
1-sentence plain summary: Some kind of software company.
Why uncertain: I have no access to the site and cannot verify anything.";
        let analysis = analyze_cold_summary(text, PromptVariant::BrandAndUrl);

        assert_eq!(analysis.unknown_count, 4);
        assert!(analysis.refusal_flag);
        assert_eq!(analysis.failure_mode, FailureMode::Refusal);
    }

    #[test]
    fn test_unknowns_without_access_language_is_unclear() {
        let text = "\
Category/Type: Unknown
Who it is for: Unknown
What problem it solves: Unknown
What it offers: Unknown
1-sentence plain summary: Unknown
Why uncertain: The name is too generic to pin down.";
        let analysis = analyze_cold_summary(text, PromptVariant::BrandAndUrl);

        assert!(!analysis.refusal_flag);
        assert_eq!(analysis.failure_mode, FailureMode::Unclear);
        assert_eq!(analysis.clarity_score, 2);
        assert_eq!(analysis.verdict_label, VerdictLabel::Unclear);
    }

    #[test]
    fn test_partial_understanding() {
        let text = "\
Category/Type: Developer tooling
Who it is for: Unknown
What problem it solves: Unknown
What it offers: Some kind of build acceleration
1-sentence plain summary: A build tool, details unclear.";
        let analysis = analyze_cold_summary(text, PromptVariant::BrandAndUrl);

        assert_eq!(analysis.unknown_count, 2);
        assert_eq!(analysis.failure_mode, FailureMode::Partial);
        assert_eq!(analysis.clarity_score, 3);
        assert_eq!(analysis.verdict_label, VerdictLabel::Partial);
    }

    #[test]
    fn test_ordinal_prefixes_tolerated() {
        let text = "\
1) Category/Type: CRM software
2) Who it is for: Sales teams
3) What problem it solves: Pipeline tracking
4) What it offers: Contact and deal management
5) 1-sentence plain summary: A CRM for small sales teams.";
        let analysis = analyze_cold_summary(text, PromptVariant::BrandAndUrl);

        assert_eq!(analysis.unknown_count, 0);
        assert_eq!(analysis.signals.category.as_deref(), Some("CRM software"));
    }

    #[test]
    fn test_case_insensitive_prefixes() {
        let text = "CATEGORY/TYPE: Fintech\nAUDIENCE: Banks";
        let analysis = analyze_cold_summary(text, PromptVariant::BrandAndUrl);
        assert!(analysis.has_category);
        assert!(analysis.has_audience);
    }

    #[test]
    fn test_malformed_input_never_fails() {
        let analysis = analyze_cold_summary("total nonsense with no template", PromptVariant::BrandAndUrl);
        assert_eq!(analysis.unknown_count, 5);
        assert_eq!(analysis.failure_mode, FailureMode::Unclear);
        assert_eq!(analysis.clarity_score, 2);

        let empty = analyze_cold_summary("", PromptVariant::BrandAndUrl);
        assert_eq!(empty.failure_mode, FailureMode::Unclear);
    }

    #[test]
    fn test_empty_field_value_is_unknown() {
        let text = "Category/Type:\nWho it is for: Nobody knows";
        let analysis = analyze_cold_summary(text, PromptVariant::BrandAndUrl);
        assert!(!analysis.has_category);
        assert!(analysis.has_audience);
    }
}
