//! Report and signal types shared across the crate

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Scoring categories with fixed point budgets.
///
/// The five scored budgets sum to exactly 100. `Error` is reserved for the
/// single synthetic item emitted when a snapshot could not be scored at all;
/// it carries no budget and never appears in a scored breakdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    EntityClarity,
    StructuralComprehension,
    AnswerabilitySignals,
    TrustLegitimacy,
    CommercialClarity,
    Error,
}

impl Category {
    /// The five scored categories, in display order.
    pub const SCORED: [Category; 5] = [
        Category::EntityClarity,
        Category::StructuralComprehension,
        Category::AnswerabilitySignals,
        Category::TrustLegitimacy,
        Category::CommercialClarity,
    ];

    /// Fixed point budget for the category.
    pub fn budget(self) -> u32 {
        match self {
            Category::EntityClarity => 25,
            Category::StructuralComprehension => 20,
            Category::AnswerabilitySignals => 20,
            Category::TrustLegitimacy => 20,
            Category::CommercialClarity => 15,
            Category::Error => 0,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Category::EntityClarity => "Entity Clarity",
            Category::StructuralComprehension => "Structural Comprehension",
            Category::AnswerabilitySignals => "Answerability Signals",
            Category::TrustLegitimacy => "Trust & Legitimacy",
            Category::CommercialClarity => "Commercial Clarity",
            Category::Error => "Error",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One scored check. Invariant: `points <= max`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BreakdownItem {
    /// Short check name shown in reports
    pub label: String,

    /// Points awarded
    pub points: u32,

    /// Fixed maximum for this check
    pub max: u32,

    /// Human-readable justification
    pub reason: String,

    /// Category the check belongs to
    pub category: Category,
}

/// Pre-scoring classification of the snapshot, supplied by the fetch
/// collaborator (or promoted from thin-snapshot detection).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnalysisStatus {
    /// Snapshot was usable and scored normally
    Ok,

    /// Origin refused the fetch (403/429/robots)
    Blocked,

    /// Snapshot arrived but is too thin or JS-only to score
    SnapshotIncomplete,

    /// Fetch failed outright (DNS, timeout, transport)
    Error,
}

/// How the fetch collaborator's attempt to capture the snapshot ended.
///
/// The engine performs no fetching of its own; callers classify the fetch and
/// pass the outcome in. `detail` strings surface verbatim in the synthetic
/// Error breakdown item (e.g. "HTTP 403").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "detail")]
pub enum FetchOutcome {
    /// Markup was captured and can be analyzed
    Fetched,

    /// Origin refused the request (403/429/robots)
    Blocked(String),

    /// Fetch failed outright (DNS, timeout, transport error)
    Failed(String),
}

/// Reserved sentinel score for fetch failures and blocked origins.
pub const SCORE_FETCH_ERROR: i32 = -1;

/// Reserved sentinel score for incomplete/JS-only snapshots.
pub const SCORE_SNAPSHOT_INCOMPLETE: i32 = -2;

/// Direction of a qualitative reasoning bullet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Impact {
    Positive,
    Negative,
}

/// A qualitative reasoning bullet, injected by the caller.
///
/// The engine consumes these (negative count gates the readiness label,
/// negative text steers the fix prioritizer) but never generates them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReasoningBullet {
    pub text: String,
    pub impact: Impact,
}

impl ReasoningBullet {
    pub fn positive(text: impl Into<String>) -> Self {
        Self { text: text.into(), impact: Impact::Positive }
    }

    pub fn negative(text: impl Into<String>) -> Self {
        Self { text: text.into(), impact: Impact::Negative }
    }
}

/// Remediation priority for a fix-plan item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FixPriority {
    High,
    Medium,
    Low,
}

/// One remediation action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FixPlanItem {
    pub priority: FixPriority,

    /// Imperative remediation text
    pub action: String,
}

/// Complete result of analyzing one snapshot.
///
/// `score` is `0..=100` when the snapshot was usable, or one of the reserved
/// negative sentinels otherwise. Readiness and the dominant fix are derived
/// from this on demand, never stored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub status: AnalysisStatus,

    pub score: i32,

    pub breakdown: Vec<BreakdownItem>,

    /// Injected qualitative reasoning (see [`ReasoningBullet`])
    pub reasoning: Vec<ReasoningBullet>,

    /// Deduplicated remediation plan
    pub fix_plan: Vec<FixPlanItem>,

    /// Extracted signals, absent for unusable snapshots
    #[serde(skip_serializing_if = "Option::is_none")]
    pub signals: Option<ExtractedSignals>,
}

impl AnalysisResult {
    pub fn negative_reasoning_count(&self) -> usize {
        self.reasoning.iter().filter(|b| b.impact == Impact::Negative).count()
    }
}

/// Readiness classification for "would an assistant recommend this by default".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReadinessState {
    StrongDefaultCandidate,
    EmergingOption,
    NotADefaultCandidate,
}

impl ReadinessState {
    pub fn label(self) -> &'static str {
        match self {
            ReadinessState::StrongDefaultCandidate => "Strong default candidate",
            ReadinessState::EmergingOption => "Emerging option",
            ReadinessState::NotADefaultCandidate => "Not a default candidate",
        }
    }
}

/// Readiness state plus its human-readable explanation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReadinessVerdict {
    pub state: ReadinessState,
    pub explanation: String,
}

/// Everything the extractor found on one page. Immutable after construction.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExtractedSignals {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta_description: Option<String>,

    /// Heading text in document order
    pub h1s: Vec<String>,
    pub h2s: Vec<String>,
    pub h3s: Vec<String>,

    /// Tier-1 FAQ section found on the page itself
    pub has_faq: bool,

    /// Tier-2 only: navigation points at an FAQ/help section elsewhere
    pub has_indirect_faq: bool,

    /// Definition-style or how-it-works answer content near the top
    pub has_direct_answer_block: bool,

    pub has_structured_data: bool,

    /// Short schema.org type names found in structured data
    pub structured_data_types: BTreeSet<String>,

    pub has_pricing: bool,

    /// Navigation points at a pricing/plans page
    pub has_pricing_nav: bool,

    pub has_about: bool,

    pub has_contact_signals: bool,

    /// Short contact evidence strings (mailto/tel targets, contact links)
    pub contact_evidence: Vec<String>,

    /// Host of the source URL, `www.` stripped
    pub domain: String,

    /// Best-effort brand name guess, lowercased
    pub brand_guess: String,

    pub evidence: Evidence,
}

/// Bounded, human-readable excerpts backing the extracted signals.
///
/// All strings are cleaned and truncated by the `evidence` module so they can
/// be surfaced in a report verbatim.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Evidence {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_h1: Option<String>,

    /// Up to 8 H2 headings
    pub h2_samples: Vec<String>,

    /// Up to 3 snippets each
    pub pricing_snippets: Vec<String>,
    pub about_snippets: Vec<String>,
    pub contact_snippets: Vec<String>,

    pub faq: FaqEvidence,
}

/// FAQ-specific sub-evidence.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FaqEvidence {
    /// The Tier-1 heading that matched, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub heading: Option<String>,

    /// Tier-2 link targets, up to 3
    pub indirect_links: Vec<String>,

    /// Direct-answer text that matched, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub answer_snippet: Option<String>,
}
