//! Comparative diffing of two scored breakdowns
//!
//! Diffs "A" (yours) against "B" (a competitor, or an older scan of the same
//! site) into ranked gap items. The engine is agnostic to where the two
//! breakdowns came from; a check present on only one side counts as zero on
//! the other.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::fixes;
use crate::types::{BreakdownItem, Category};

/// One check's gap between the two sides. `delta > 0` means B is ahead.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GapItem {
    pub label: String,
    pub category: Category,
    pub a_points: u32,
    pub b_points: u32,
    pub max: u32,
    pub delta: i32,

    /// Remediation for closing the gap; absent when no keyword maps
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggested_action: Option<String>,
}

/// Per-category signed point difference.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryDelta {
    pub category: Category,
    pub a_points: u32,
    pub b_points: u32,
    pub delta: i32,
}

/// Full diff of two scored breakdowns.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompareDiff {
    /// B total minus A total
    pub score_delta: i32,

    pub category_deltas: Vec<CategoryDelta>,

    /// Every gap, sorted by |delta| descending
    pub gaps: Vec<GapItem>,

    /// Top 5 gaps by |delta|
    pub biggest_gaps: Vec<GapItem>,

    /// Up to 5 gaps where B is ahead and a remediation exists
    pub quick_wins: Vec<GapItem>,
}

/// Diff breakdown `a` against breakdown `b`.
pub fn compare_breakdowns(a: &[BreakdownItem], b: &[BreakdownItem]) -> CompareDiff {
    #[derive(Default)]
    struct Sides {
        a_points: u32,
        b_points: u32,
        max: u32,
    }

    let mut keyed: BTreeMap<(Category, String), Sides> = BTreeMap::new();
    for item in a.iter().filter(|i| i.category != Category::Error) {
        let entry = keyed.entry((item.category, item.label.clone())).or_default();
        entry.a_points = item.points;
        entry.max = entry.max.max(item.max);
    }
    for item in b.iter().filter(|i| i.category != Category::Error) {
        let entry = keyed.entry((item.category, item.label.clone())).or_default();
        entry.b_points = item.points;
        entry.max = entry.max.max(item.max);
    }

    // BTreeMap order gives the deterministic secondary sort (category, label)
    let mut gaps: Vec<GapItem> = keyed
        .into_iter()
        .map(|((category, label), sides)| {
            let suggested_action = fixes::suggested_action(&label).map(str::to_string);
            GapItem {
                label,
                category,
                a_points: sides.a_points,
                b_points: sides.b_points,
                max: sides.max,
                delta: sides.b_points as i32 - sides.a_points as i32,
                suggested_action,
            }
        })
        .collect();
    gaps.sort_by_key(|gap| std::cmp::Reverse(gap.delta.abs()));

    let mut category_deltas = Vec::new();
    for category in Category::SCORED {
        let (a_points, b_points) = gaps
            .iter()
            .filter(|g| g.category == category)
            .fold((0u32, 0u32), |(ap, bp), g| (ap + g.a_points, bp + g.b_points));
        category_deltas.push(CategoryDelta {
            category,
            a_points,
            b_points,
            delta: b_points as i32 - a_points as i32,
        });
    }

    let score_delta = category_deltas.iter().map(|c| c.delta).sum();

    let biggest_gaps: Vec<GapItem> = gaps.iter().take(5).cloned().collect();
    let quick_wins: Vec<GapItem> = gaps
        .iter()
        .filter(|g| g.delta > 0 && g.suggested_action.is_some())
        .take(5)
        .cloned()
        .collect();

    CompareDiff { score_delta, category_deltas, gaps, biggest_gaps, quick_wins }
}
