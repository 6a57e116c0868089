//! # reclens-core
//!
//! Core library for scoring how ready a web page is to be recommended by AI
//! assistants.
//!
//! Three subsystems, all pure and synchronous:
//! - Snapshot analysis: captured HTML → extracted signals → a 0-100 scored
//!   breakdown across five categories → a readiness verdict and a prioritized
//!   remediation plan.
//! - Cold-summary analysis: the free text a model produces when asked to
//!   describe a site without browsing → structured fields, failure-mode
//!   classification, clarity scoring; repeated runs aggregate into a
//!   consistency verdict.
//! - Comparative diffing: two scored breakdowns → ranked gap items with
//!   suggested remediations.
//!
//! Nothing here fetches, persists, or renders; fetch classification comes in
//! via [`FetchOutcome`] and every output type serializes with serde for the
//! surrounding tooling.
//!
//! ## Example
//!
//! ```
//! use reclens_core::{analyze, classify_readiness, FetchOutcome};
//!
//! let html = r#"<html><head><title>Acme Payroll</title></head>
//!     <body><h1>Payroll for startups</h1></body></html>"#;
//!
//! let result = analyze(html, "https://acme.com/", &FetchOutcome::Fetched, vec![]);
//! let verdict = classify_readiness(&result);
//! println!("{}: {}", result.score, verdict.explanation);
//! ```

pub mod aggregate;
pub mod cold_summary;
pub mod compare;
pub mod evidence;
pub mod extract;
pub mod fixes;
pub mod patterns;
pub mod readiness;
pub mod score;
pub mod types;

pub use aggregate::{ColdSummaryAggregate, ConsistencyLabel, VerdictCounts, aggregate_runs};
pub use cold_summary::{
    ColdSummaryAnalysis, FailureMode, PromptVariant, VerdictLabel, analyze_cold_summary,
};
pub use compare::{CompareDiff, GapItem, compare_breakdowns};
pub use extract::{extract_signals, snapshot_incompleteness};
pub use fixes::{build_fix_plan, dominant_fix, dominant_fix_for};
pub use readiness::classify_readiness;
pub use score::{ScoredBreakdown, score_signals};
pub use types::{
    AnalysisResult, AnalysisStatus, BreakdownItem, Category, Evidence, ExtractedSignals,
    FetchOutcome, FixPlanItem, FixPriority, Impact, ReadinessState, ReadinessVerdict,
    ReasoningBullet, SCORE_FETCH_ERROR, SCORE_SNAPSHOT_INCOMPLETE,
};

/// Run the full snapshot pipeline: extraction, scoring, and fix planning.
///
/// Unusable snapshots short-circuit into the sentinel taxonomy instead of
/// being scored: a blocked or failed fetch yields score -1, an incomplete or
/// JS-only snapshot yields -2, each with a single Error-category breakdown
/// item explaining why scoring was skipped. Readiness and the dominant fix
/// are derived from the returned result on demand (see
/// [`classify_readiness`] and [`dominant_fix_for`]); they are never stored.
pub fn analyze(
    html: &str,
    url: &str,
    outcome: &FetchOutcome,
    reasoning: Vec<ReasoningBullet>,
) -> AnalysisResult {
    match outcome {
        FetchOutcome::Blocked(detail) => {
            return unusable(AnalysisStatus::Blocked, SCORE_FETCH_ERROR, detail, reasoning);
        }
        FetchOutcome::Failed(detail) => {
            return unusable(AnalysisStatus::Error, SCORE_FETCH_ERROR, detail, reasoning);
        }
        FetchOutcome::Fetched => {}
    }

    if let Some(reason) = snapshot_incompleteness(html) {
        let mut result = unusable(
            AnalysisStatus::SnapshotIncomplete,
            SCORE_SNAPSHOT_INCOMPLETE,
            &reason,
            reasoning,
        );
        result.fix_plan = vec![FixPlanItem {
            priority: FixPriority::High,
            action: fixes::STATIC_RENDER_FIX.to_string(),
        }];
        return result;
    }

    let signals = extract_signals(html, url);
    let scored = score_signals(&signals);
    let fix_plan = build_fix_plan(&scored.items);

    AnalysisResult {
        status: AnalysisStatus::Ok,
        score: scored.total as i32,
        breakdown: scored.items,
        reasoning,
        fix_plan,
        signals: Some(signals),
    }
}

fn unusable(
    status: AnalysisStatus,
    score: i32,
    detail: &str,
    reasoning: Vec<ReasoningBullet>,
) -> AnalysisResult {
    let reason = match status {
        AnalysisStatus::Blocked => format!("scoring skipped: the origin refused the fetch ({detail})"),
        AnalysisStatus::SnapshotIncomplete => format!("scoring skipped: {detail}"),
        _ => format!("scoring skipped: the fetch failed ({detail})"),
    };
    AnalysisResult {
        status,
        score,
        breakdown: vec![BreakdownItem {
            label: "Scan not possible".to_string(),
            points: 0,
            max: 0,
            reason,
            category: Category::Error,
        }],
        reasoning,
        fix_plan: vec![FixPlanItem {
            priority: FixPriority::High,
            action: fixes::ACCESSIBILITY_FIX.to_string(),
        }],
        signals: None,
    }
}
