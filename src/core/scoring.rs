//! Shared scoring convention for every audit dimension.
//!
//! A dimension score starts at a base (typically 100), accumulates signed
//! [`ScoreContribution`]s, and is clamped to its documented range. No
//! adjustment is ever applied without a visible contribution entry, so a
//! published score is always exactly reconstructable from its breakdown:
//! `clamp(base + Σ deltas) == score`.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

/// Default base every dimension starts from.
pub const DEFAULT_BASE: f64 = 100.0;

/// Upper bound of every score range.
pub const MAX_SCORE: f64 = 100.0;

/// One signed, reasoned point adjustment to a base score.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreContribution {
    /// Why the adjustment was applied
    pub reason: String,
    /// Signed point delta
    pub delta: f64,
    /// Optional supporting detail (affected names, measured values)
    pub detail: Option<String>,
}

/// Accumulator enforcing the base-plus-contributions convention.
#[derive(Debug, Clone)]
pub struct ScoreCard {
    base: f64,
    floor: f64,
    contributions: Vec<ScoreContribution>,
}

impl ScoreCard {
    /// Start a card from the given base.
    pub fn new(base: f64) -> Self {
        Self {
            base,
            floor: 0.0,
            contributions: Vec::new(),
        }
    }

    /// Start a card from the standard base of 100.
    pub fn standard() -> Self {
        Self::new(DEFAULT_BASE)
    }

    /// Raise the floor of the clamp range (e.g. 20 for dimensions where a
    /// zero would read as alarmist rather than informative).
    pub fn with_floor(mut self, floor: f64) -> Self {
        self.floor = floor.clamp(0.0, MAX_SCORE);
        self
    }

    /// The base this card started from.
    pub fn base(&self) -> f64 {
        self.base
    }

    /// The clamp floor for this card.
    pub fn floor(&self) -> f64 {
        self.floor
    }

    /// Apply a signed adjustment with its reason.
    pub fn add(&mut self, reason: impl Into<String>, delta: f64) {
        self.contributions.push(ScoreContribution {
            reason: reason.into(),
            delta,
            detail: None,
        });
    }

    /// Apply a signed adjustment with supporting detail.
    pub fn add_detailed(&mut self, reason: impl Into<String>, delta: f64, detail: impl Into<String>) {
        self.contributions.push(ScoreContribution {
            reason: reason.into(),
            delta,
            detail: Some(detail.into()),
        });
    }

    /// Published contributions, in application order.
    pub fn contributions(&self) -> &[ScoreContribution] {
        &self.contributions
    }

    /// Final clamped score.
    pub fn score(&self) -> f64 {
        let sum: f64 = self.contributions.iter().map(|c| c.delta).sum();
        (self.base + sum).clamp(self.floor, MAX_SCORE)
    }

    /// Consume the card into (score, breakdown).
    pub fn finalize(self) -> (f64, Vec<ScoreContribution>) {
        (self.score(), self.contributions)
    }
}

/// Recompute a score from a published breakdown.
///
/// This is the auditability contract: consumers can verify any reported score
/// by re-clamping the base plus its itemized contributions.
pub fn reconstruct_score(base: f64, floor: f64, breakdown: &[ScoreContribution]) -> f64 {
    let sum: f64 = breakdown.iter().map(|c| c.delta).sum();
    (base + sum).clamp(floor, MAX_SCORE)
}

/// Weighted average over already-published sub-scores.
///
/// Composite scores are never recomputed from raw facts; they are explicit
/// weighted averages of the published per-dimension scores. An empty input
/// yields the documented neutral default of 100.
pub fn weighted_overall(weighted_scores: &[(f64, f64)]) -> f64 {
    let total_weight: f64 = weighted_scores.iter().map(|(w, _)| w).sum();
    if total_weight <= 0.0 {
        return DEFAULT_BASE;
    }
    let sum: f64 = weighted_scores.iter().map(|(w, s)| w * s).sum();
    (sum / total_weight).clamp(0.0, MAX_SCORE)
}

/// The audit dimensions every schema is scored on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditCategory {
    /// Model shape and query-depth risk
    Structure,
    /// Duplicate models, components, and enums
    Duplication,
    /// Relation graph architecture
    Relationships,
    /// Enumeration usage
    Enums,
    /// Component reuse
    Components,
    /// Entry volume and publishing health
    ContentHealth,
}

impl AuditCategory {
    /// All categories, in reporting order.
    pub const ALL: &'static [AuditCategory] = &[
        Self::Structure,
        Self::Duplication,
        Self::Relationships,
        Self::Enums,
        Self::Components,
        Self::ContentHealth,
    ];

    /// Stable lowercase label used in issue ids and sorting.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Structure => "structure",
            Self::Duplication => "duplication",
            Self::Relationships => "relationships",
            Self::Enums => "enums",
            Self::Components => "components",
            Self::ContentHealth => "content_health",
        }
    }
}

/// Issue severity, ordered most severe first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    /// Requires action; structural risk or data-integrity hazard
    Critical,
    /// Should be addressed; degrades maintainability or ergonomics
    Warning,
    /// Worth knowing; no action strictly required
    Info,
}

impl Severity {
    /// Sort rank; lower sorts first.
    pub fn rank(&self) -> u8 {
        match self {
            Self::Critical => 0,
            Self::Warning => 1,
            Self::Info => 2,
        }
    }

    /// Stable lowercase label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Critical => "critical",
            Self::Warning => "warning",
            Self::Info => "info",
        }
    }
}

impl PartialOrd for Severity {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Severity {
    fn cmp(&self, other: &Self) -> Ordering {
        self.rank().cmp(&other.rank())
    }
}

/// Outcome status of one checkpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckpointStatus {
    /// Check passed
    Good,
    /// Check passed with reservations
    Warning,
    /// Check failed
    Issue,
}

/// One discrete pass/warn/issue finding from an analyzer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckpointResult {
    /// Outcome of the check
    pub status: CheckpointStatus,
    /// Short checkpoint title
    pub title: String,
    /// Findings backing the status
    pub findings: Vec<String>,
    /// Concrete affected examples
    pub examples: Vec<String>,
    /// Suggested follow-up actions
    pub action_items: Vec<String>,
}

impl CheckpointResult {
    /// A passing checkpoint.
    pub fn good(title: impl Into<String>) -> Self {
        Self {
            status: CheckpointStatus::Good,
            title: title.into(),
            findings: Vec::new(),
            examples: Vec::new(),
            action_items: Vec::new(),
        }
    }

    /// A checkpoint that passed with reservations.
    pub fn warning(title: impl Into<String>) -> Self {
        Self {
            status: CheckpointStatus::Warning,
            ..Self::good(title)
        }
    }

    /// A failing checkpoint.
    pub fn issue(title: impl Into<String>) -> Self {
        Self {
            status: CheckpointStatus::Issue,
            ..Self::good(title)
        }
    }

    /// Attach findings.
    pub fn with_findings(mut self, findings: Vec<String>) -> Self {
        self.findings = findings;
        self
    }

    /// Attach affected examples.
    pub fn with_examples(mut self, examples: Vec<String>) -> Self {
        self.examples = examples;
        self
    }

    /// Attach action items.
    pub fn with_actions(mut self, action_items: Vec<String>) -> Self {
        self.action_items = action_items;
        self
    }
}
