//! Readiness classification
//!
//! Maps a scored analysis to one of three readiness states. The rules are
//! ordered: retrievability failures dominate everything, the
//! negative-reasoning gate is applied before the plain score thresholds, and
//! only then do the 75/50 cut-offs decide between the states.

use crate::types::{AnalysisResult, AnalysisStatus, ReadinessState, ReadinessVerdict};

/// Score at or above which a page can be a strong default recommendation.
pub const STRONG_THRESHOLD: i32 = 75;

/// Score below which a page is not a default candidate.
pub const WEAK_THRESHOLD: i32 = 50;

/// Negative reasoning bullets tolerated by a strong verdict.
pub const MAX_STRONG_NEGATIVES: usize = 1;

/// Classify how ready this page is to be recommended by default.
pub fn classify_readiness(result: &AnalysisResult) -> ReadinessVerdict {
    match result.status {
        AnalysisStatus::Blocked | AnalysisStatus::Error => {
            return ReadinessVerdict {
                state: ReadinessState::NotADefaultCandidate,
                explanation: "The page could not be retrieved, so assistants have nothing \
                              to recommend from. Fix retrievability first."
                    .to_string(),
            };
        }
        AnalysisStatus::SnapshotIncomplete => {
            return ReadinessVerdict {
                state: ReadinessState::NotADefaultCandidate,
                explanation: "The snapshot is incomplete or renders only with JavaScript; \
                              crawlers see too little of the page to evaluate it."
                    .to_string(),
            };
        }
        AnalysisStatus::Ok => {}
    }

    let negatives = result.negative_reasoning_count();

    if result.score >= STRONG_THRESHOLD && negatives <= MAX_STRONG_NEGATIVES {
        ReadinessVerdict {
            state: ReadinessState::StrongDefaultCandidate,
            explanation: format!(
                "Score {} with at most one qualitative concern; the page gives \
                 assistants enough clear, trustworthy signal to recommend it by default.",
                result.score
            ),
        }
    } else if result.score < WEAK_THRESHOLD {
        ReadinessVerdict {
            state: ReadinessState::NotADefaultCandidate,
            explanation: format!(
                "Score {} is below the default-recommendation floor; too many core \
                 signals are missing.",
                result.score
            ),
        }
    } else {
        ReadinessVerdict {
            state: ReadinessState::EmergingOption,
            explanation: format!(
                "Score {} with {} qualitative concern(s); the page is plausible but \
                 not yet a default pick.",
                result.score, negatives
            ),
        }
    }
}
