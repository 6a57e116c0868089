//! Aggregation of repeated cold-summary runs
//!
//! N independent transcripts for the same input are summarized into bucket
//! counts, rounded means, a consistency verdict, and one representative run
//! that can be quoted verbatim without cherry-picking an outlier.

use anyhow::{Result, bail};
use serde::{Deserialize, Serialize};

use crate::cold_summary::{ColdSummaryAnalysis, FailureMode};

/// How consistent the repeated runs were.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConsistencyLabel {
    Stable,
    Mixed,
    Volatile,
}

/// Verdict counts per bucket; both refusal modes merge into `refusal`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerdictCounts {
    pub clear: usize,
    pub partial: usize,
    pub unclear: usize,
    pub refusal: usize,
}

impl VerdictCounts {
    fn bump(&mut self, mode: FailureMode) {
        match mode {
            FailureMode::Clear => self.clear += 1,
            FailureMode::Partial => self.partial += 1,
            FailureMode::Unclear => self.unclear += 1,
            FailureMode::Refusal | FailureMode::NoRetrievalUrlOnly => self.refusal += 1,
        }
    }

    fn largest(&self) -> usize {
        self.clear.max(self.partial).max(self.unclear).max(self.refusal)
    }
}

/// Aggregate over N runs. Recomputable at any time from the run list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColdSummaryAggregate {
    /// Mean clarity score, rounded to one decimal
    pub clarity_avg: f32,

    /// Mean unknown count, rounded to one decimal
    pub unknown_avg: f32,

    pub refusals_count: usize,

    pub verdict_counts: VerdictCounts,

    pub consistency: ConsistencyLabel,

    /// Human-readable one-line summary of the spread
    pub note: String,

    /// Index into the input list of the run chosen as representative
    pub representative: usize,
}

/// Aggregate repeated runs. The list must be non-empty.
pub fn aggregate_runs(runs: &[ColdSummaryAnalysis]) -> Result<ColdSummaryAggregate> {
    if runs.is_empty() {
        bail!("cold-summary aggregation requires at least one run");
    }

    let mut counts = VerdictCounts::default();
    for run in runs {
        counts.bump(run.failure_mode);
    }
    let refusals_count = counts.refusal;

    let clarity_mean = runs.iter().map(|r| f64::from(r.clarity_score)).sum::<f64>() / runs.len() as f64;
    let unknown_mean = runs.iter().map(|r| f64::from(r.unknown_count)).sum::<f64>() / runs.len() as f64;

    let consistency = consistency_label(&counts, refusals_count, runs.len());
    let note = describe(&counts, consistency, runs.len());
    let representative = representative_index(runs, clarity_mean);

    Ok(ColdSummaryAggregate {
        clarity_avg: round1(clarity_mean),
        unknown_avg: round1(unknown_mean),
        refusals_count,
        verdict_counts: counts,
        consistency,
        note,
        representative,
    })
}

fn round1(value: f64) -> f32 {
    ((value * 10.0).round() / 10.0) as f32
}

/// Stable when one bucket holds every run; Mixed when the largest bucket is
/// exactly 2 and the disagreement stays on one side of the refusal boundary;
/// anything else is Volatile.
fn consistency_label(counts: &VerdictCounts, refusals: usize, total: usize) -> ConsistencyLabel {
    let largest = counts.largest();
    if largest == total {
        ConsistencyLabel::Stable
    } else if largest == 2 && (refusals == 0 || refusals == total) {
        ConsistencyLabel::Mixed
    } else {
        ConsistencyLabel::Volatile
    }
}

fn describe(counts: &VerdictCounts, consistency: ConsistencyLabel, total: usize) -> String {
    match consistency {
        ConsistencyLabel::Stable => {
            let bucket = if counts.clear == total {
                "clear"
            } else if counts.partial == total {
                "partial"
            } else if counts.unclear == total {
                "unclear"
            } else {
                "refusal"
            };
            format!("All {total} runs agree ({bucket}).")
        }
        ConsistencyLabel::Mixed => format!(
            "Runs mostly agree ({} clear / {} partial / {} unclear / {} refusal of {total}).",
            counts.clear, counts.partial, counts.unclear, counts.refusal
        ),
        ConsistencyLabel::Volatile => format!(
            "Runs disagree sharply ({} clear / {} partial / {} unclear / {} refusal of {total}); \
             the model's picture of this site is unstable.",
            counts.clear, counts.partial, counts.unclear, counts.refusal
        ),
    }
}

/// Prefer the non-refusal subset, then the run whose clarity is numerically
/// closest to the mean; earliest index wins ties.
fn representative_index(runs: &[ColdSummaryAnalysis], clarity_mean: f64) -> usize {
    let non_refusal: Vec<usize> = runs
        .iter()
        .enumerate()
        .filter(|(_, r)| !r.refusal_flag)
        .map(|(i, _)| i)
        .collect();

    let candidates: Vec<usize> =
        if non_refusal.is_empty() { (0..runs.len()).collect() } else { non_refusal };

    let mut best = candidates[0];
    let mut best_distance = (f64::from(runs[best].clarity_score) - clarity_mean).abs();
    for &index in &candidates[1..] {
        let distance = (f64::from(runs[index].clarity_score) - clarity_mean).abs();
        if distance < best_distance {
            best = index;
            best_distance = distance;
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cold_summary::{PromptVariant, analyze_cold_summary};

    const CLEAR: &str = "\
Category/Type: Payroll software
Who it is for: Startups
What problem it solves: Manual payroll
What it offers: Automated payroll
1-sentence plain summary: Runs payroll for small teams.";

    const PARTIAL: &str = "\
Category/Type: Software
Who it is for: Unknown
What problem it solves: Unknown
What it offers: Business tooling of some kind
1-sentence plain summary: A business software vendor.";

    const REFUSAL: &str = "I cannot access external websites, so I cannot describe this site.";

    fn run(text: &str) -> ColdSummaryAnalysis {
        analyze_cold_summary(text, PromptVariant::BrandAndUrl)
    }

    #[test]
    fn test_three_clear_runs_are_stable() {
        let runs = vec![run(CLEAR), run(CLEAR), run(CLEAR)];
        let aggregate = aggregate_runs(&runs).unwrap();

        assert_eq!(aggregate.consistency, ConsistencyLabel::Stable);
        assert_eq!(aggregate.verdict_counts.clear, 3);
        assert_eq!(aggregate.refusals_count, 0);
        assert_eq!(aggregate.clarity_avg, 5.0);
        assert!(aggregate.note.contains("agree"));
    }

    #[test]
    fn test_two_one_split_same_side_is_mixed() {
        let runs = vec![run(CLEAR), run(CLEAR), run(PARTIAL)];
        let aggregate = aggregate_runs(&runs).unwrap();
        assert_eq!(aggregate.consistency, ConsistencyLabel::Mixed);
    }

    #[test]
    fn test_split_across_refusal_boundary_is_volatile() {
        let runs = vec![run(CLEAR), run(CLEAR), run(REFUSAL)];
        let aggregate = aggregate_runs(&runs).unwrap();
        assert_eq!(aggregate.consistency, ConsistencyLabel::Volatile);
        assert_eq!(aggregate.refusals_count, 1);
    }

    #[test]
    fn test_all_refusals_are_stable() {
        let runs = vec![run(REFUSAL), run(REFUSAL)];
        let aggregate = aggregate_runs(&runs).unwrap();
        assert_eq!(aggregate.consistency, ConsistencyLabel::Stable);
        assert_eq!(aggregate.verdict_counts.refusal, 2);
        assert_eq!(aggregate.clarity_avg, 1.0);
    }

    #[test]
    fn test_representative_prefers_non_refusal() {
        let runs = vec![run(REFUSAL), run(CLEAR), run(REFUSAL)];
        let aggregate = aggregate_runs(&runs).unwrap();
        assert_eq!(aggregate.representative, 1);
    }

    #[test]
    fn test_representative_closest_to_mean_earliest_wins() {
        // clarity scores: 5, 3, 5 → mean 4.33; both 5s tie, earliest wins
        let runs = vec![run(CLEAR), run(PARTIAL), run(CLEAR)];
        let aggregate = aggregate_runs(&runs).unwrap();
        assert_eq!(aggregate.representative, 0);
    }

    #[test]
    fn test_averages_rounded() {
        // clarity 5 and 3 → 4.0; unknowns 0 and 2 → 1.0
        let runs = vec![run(CLEAR), run(PARTIAL)];
        let aggregate = aggregate_runs(&runs).unwrap();
        assert_eq!(aggregate.clarity_avg, 4.0);
        assert_eq!(aggregate.unknown_avg, 1.0);
    }

    #[test]
    fn test_empty_input_is_an_error() {
        assert!(aggregate_runs(&[]).is_err());
    }
}
