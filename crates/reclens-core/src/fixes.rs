//! Remediation planning and fix prioritization
//!
//! Turns scoring shortfalls into a deduplicated fix plan, and selects the
//! single highest-leverage "dominant" fix for a report headline. The keyword
//! table here is shared with the comparative diff engine so both produce the
//! same remediation text for the same check.

use crate::patterns;
use crate::types::{
    AnalysisResult, BreakdownItem, Category, FixPlanItem, FixPriority, Impact, ReasoningBullet,
};

/// The only admissible fix when the page could not be fetched.
pub const ACCESSIBILITY_FIX: &str =
    "Restore crawler access to the page; while fetches are blocked or failing, no other signal can be trusted";

/// The fix reported for snapshots that only render with JavaScript.
pub const STATIC_RENDER_FIX: &str =
    "Serve the primary content as static HTML so crawlers and assistants can read it without executing scripts";

/// A category is considered healthy at or above this points/max ratio; when
/// every category clears it, there is no dominant fix to report.
const CRITICAL_RATIO: f64 = 0.7;

/// Tie-break order when two categories have the same normalized gap.
const CATEGORY_PRIORITY: [Category; 5] = [
    Category::EntityClarity,
    Category::AnswerabilitySignals,
    Category::StructuralComprehension,
    Category::TrustLegitimacy,
    Category::CommercialClarity,
];

struct Remediation {
    keywords: &'static [&'static str],
    category: Category,
    action: &'static str,
}

/// Keyword-to-remediation table, checked in order; first hit wins.
static REMEDIATIONS: &[Remediation] = &[
    Remediation {
        keywords: &["faq", "answer"],
        category: Category::AnswerabilitySignals,
        action: "Add an FAQ section answering common customer questions on the page itself",
    },
    Remediation {
        keywords: &["schema", "structured"],
        category: Category::AnswerabilitySignals,
        action: "Add schema.org structured data describing the organization and its offering",
    },
    Remediation {
        keywords: &["title"],
        category: Category::EntityClarity,
        action: "Put the brand and offering in the page title",
    },
    Remediation {
        keywords: &["meta"],
        category: Category::EntityClarity,
        action: "Write a meta description that states what the product does and for whom",
    },
    Remediation {
        keywords: &["h1", "brand"],
        category: Category::EntityClarity,
        action: "Rewrite the H1 to name the offering plainly",
    },
    Remediation {
        keywords: &["h2", "heading"],
        category: Category::StructuralComprehension,
        action: "Rework section headings to describe specific capabilities instead of boilerplate",
    },
    Remediation {
        keywords: &["about"],
        category: Category::TrustLegitimacy,
        action: "Publish an about page that says who operates the product",
    },
    Remediation {
        keywords: &["contact"],
        category: Category::TrustLegitimacy,
        action: "Add visible contact details (email, phone, or a contact page)",
    },
    Remediation {
        keywords: &["pricing", "plans", "price"],
        category: Category::CommercialClarity,
        action: "Publish pricing or plans information",
    },
];

fn remediation_for(text: &str) -> Option<&'static Remediation> {
    let lower = text.to_lowercase();
    REMEDIATIONS
        .iter()
        .find(|r| r.keywords.iter().any(|k| lower.contains(k)))
}

/// Map free text (a fix action or a reasoning bullet) to the category it
/// refers to, per the shared keyword table.
pub fn category_for_text(text: &str) -> Option<Category> {
    remediation_for(text).map(|r| r.category)
}

/// Remediation text for a breakdown label, or `None` when no keyword matches.
///
/// Used by the diff engine; `None` entries are excluded from quick wins but
/// still appear in the full gap list.
pub fn suggested_action(label: &str) -> Option<&'static str> {
    remediation_for(label).map(|r| r.action)
}

/// Build the deduplicated fix plan for a scored breakdown.
///
/// Every check that left points on the table contributes its remediation;
/// checks sharing an underlying intent (same remediation text) collapse into
/// one item carrying the highest priority among them.
pub fn build_fix_plan(breakdown: &[BreakdownItem]) -> Vec<FixPlanItem> {
    let mut plan: Vec<FixPlanItem> = Vec::new();

    for item in breakdown {
        if item.category == Category::Error || item.points >= item.max {
            continue;
        }
        let Some(action) = suggested_action(&item.label) else {
            continue;
        };
        let priority = if item.points == 0 && item.max >= 10 {
            FixPriority::High
        } else if item.points * 2 <= item.max {
            FixPriority::Medium
        } else {
            FixPriority::Low
        };

        match plan.iter_mut().find(|p| p.action == action) {
            Some(existing) => existing.priority = existing.priority.min(priority),
            None => plan.push(FixPlanItem { priority, action: action.to_string() }),
        }
    }

    plan.sort_by_key(|p| p.priority);
    plan
}

/// Select the single highest-leverage fix, if any.
///
/// Blocked access short-circuits everything: when the breakdown carries an
/// Error item whose reason matches a blocked-access pattern, the only
/// admissible fix is restoring access. Otherwise the category with the
/// largest normalized gap is chosen (negative reasoning can override it),
/// and the plan is walked high-to-low preferring items in that category.
pub fn dominant_fix(
    plan: &[FixPlanItem],
    breakdown: &[BreakdownItem],
    reasoning: &[ReasoningBullet],
) -> Option<FixPlanItem> {
    let blocked = breakdown
        .iter()
        .any(|i| i.category == Category::Error && patterns::is_blocked_access_reason(&i.reason));
    if blocked {
        return Some(FixPlanItem {
            priority: FixPriority::High,
            action: ACCESSIBILITY_FIX.to_string(),
        });
    }

    let preferred = choose_category(breakdown, reasoning);

    if preferred.is_none() && breakdown.iter().any(|i| i.category != Category::Error) {
        // Every scored category cleared the critical threshold
        return None;
    }

    for priority in [FixPriority::High, FixPriority::Medium, FixPriority::Low] {
        let at_priority: Vec<&FixPlanItem> =
            plan.iter().filter(|p| p.priority == priority).collect();
        if at_priority.is_empty() {
            continue;
        }
        if let Some(category) = preferred
            && let Some(matched) = at_priority
                .iter()
                .find(|p| category_for_text(&p.action) == Some(category))
        {
            return Some((*matched).clone());
        }
        return Some(at_priority[0].clone());
    }

    None
}

/// The category most in need of work, or `None` when all are healthy.
fn choose_category(
    breakdown: &[BreakdownItem],
    reasoning: &[ReasoningBullet],
) -> Option<Category> {
    let mut worst: Option<(Category, f64)> = None;

    for category in CATEGORY_PRIORITY {
        let (points, max) = breakdown
            .iter()
            .filter(|i| i.category == category)
            .fold((0u32, 0u32), |(p, m), i| (p + i.points, m + i.max));
        if max == 0 {
            continue;
        }
        let ratio = f64::from(points) / f64::from(max);
        if ratio >= CRITICAL_RATIO {
            continue;
        }
        // Strictly-less keeps the first (highest-priority) category on ties
        if worst.map(|(_, w)| ratio < w).unwrap_or(true) {
            worst = Some((category, ratio));
        }
    }

    let mut chosen = worst.map(|(c, _)| c)?;

    // A stated qualitative concern outweighs a raw point gap: if negative
    // reasoning references a different category, prefer that one.
    for bullet in reasoning.iter().filter(|b| b.impact == Impact::Negative) {
        if let Some(category) = category_for_text(&bullet.text)
            && category != chosen
        {
            chosen = category;
            break;
        }
    }

    Some(chosen)
}

/// Convenience wrapper over an [`AnalysisResult`].
pub fn dominant_fix_for(result: &AnalysisResult) -> Option<FixPlanItem> {
    dominant_fix(&result.fix_plan, &result.breakdown, &result.reasoning)
}
