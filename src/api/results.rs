//! Audit results and report structures.
//!
//! Everything a consumer may render or export lives here; the documented
//! fields of [`StrategicAuditReport`] are the full output contract.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::scoring::{
    AuditCategory, CheckpointResult, ScoreContribution, Severity, DEFAULT_BASE,
};
use crate::detectors::relationships::RelationshipGraph;

/// Declared remediation effort, which buckets an issue into a roadmap phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Effort {
    /// Small, isolated change
    QuickWin,
    /// A sprint-sized change
    Medium,
    /// A migration or cross-team effort
    Strategic,
    /// Recurring hygiene work
    Maintenance,
}

impl Effort {
    /// Roadmap phase title for this effort bucket.
    pub fn phase_title(&self) -> &'static str {
        match self {
            Self::QuickWin => "Quick wins",
            Self::Medium => "Medium-term improvements",
            Self::Strategic => "Strategic changes",
            Self::Maintenance => "Ongoing maintenance",
        }
    }
}

/// One flat, actionable audit issue.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditIssue {
    /// Stable identifier: `category:rule:subject`
    pub id: String,
    /// Issue severity
    pub severity: Severity,
    /// Audit dimension that raised the issue
    pub category: AuditCategory,
    /// Short issue title
    pub title: String,
    /// What was detected
    pub description: String,
    /// Why it matters
    pub impact: String,
    /// What to do about it
    pub recommendation: String,
    /// Affected type/field names
    pub affected_items: Vec<String>,
    /// Declared remediation effort
    pub effort: Effort,
    /// Score points recoverable by fixing this issue, when quantified
    pub score_delta: Option<f64>,
}

impl AuditIssue {
    /// Build the stable issue id from its parts.
    pub fn make_id(category: AuditCategory, rule: &str, subject: &str) -> String {
        format!("{}:{}:{}", category.label(), rule, subject.to_lowercase())
    }
}

/// Per-dimension analysis output: score, breakdown, findings, issues.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DimensionAnalysis {
    /// The dimension analyzed
    pub category: AuditCategory,
    /// Final clamped score
    pub score: f64,
    /// Base the score started from
    pub base: f64,
    /// Clamp floor for this dimension
    pub floor: f64,
    /// Itemized contributions; `clamp(base + Σ delta) == score`
    pub breakdown: Vec<ScoreContribution>,
    /// Discrete pass/warn/issue checkpoints
    pub checkpoints: Vec<CheckpointResult>,
    /// Actionable issues raised by this dimension
    pub issues: Vec<AuditIssue>,
    /// Dimension-level recommendations
    pub recommendations: Vec<String>,
    /// Explanatory notes, including degradation notices
    pub notes: Vec<String>,
}

impl DimensionAnalysis {
    /// The neutral, well-formed default substituted when a boundary-dependent
    /// sub-analyzer fails: full score, no findings, one explanatory note.
    pub fn neutral(category: AuditCategory, note: impl Into<String>) -> Self {
        Self {
            category,
            score: DEFAULT_BASE,
            base: DEFAULT_BASE,
            floor: 0.0,
            breakdown: Vec::new(),
            checkpoints: Vec::new(),
            issues: Vec::new(),
            recommendations: Vec::new(),
            notes: vec![note.into()],
        }
    }
}

/// A published per-category score in the report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryScore {
    /// The scored dimension
    pub category: AuditCategory,
    /// Final score
    pub score: f64,
    /// Weight used in the overall average
    pub weight: f64,
}

/// Headline summary for report consumers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecutiveSummary {
    /// One-line overall assessment
    pub headline: String,
    /// Most important findings, most severe first
    pub key_findings: Vec<String>,
    /// Low-effort, high-value improvements
    pub quick_wins: Vec<String>,
}

/// One task in the remediation roadmap.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoadmapTask {
    /// Issue id this task remediates
    pub issue_id: String,
    /// Task title
    pub title: String,
    /// Recommended action
    pub action: String,
    /// Severity of the underlying issue
    pub severity: Severity,
}

/// One effort-bucketed phase of the roadmap.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoadmapPhase {
    /// Phase title
    pub title: String,
    /// Effort bucket this phase covers
    pub effort: Effort,
    /// Tasks in priority order
    pub tasks: Vec<RoadmapTask>,
}

/// The complete audit report, produced atomically at the end of a run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StrategicAuditReport {
    /// When the report was generated
    pub generated_at: DateTime<Utc>,
    /// Executive summary
    pub summary: ExecutiveSummary,
    /// Weighted overall score
    pub overall_score: f64,
    /// Published per-category scores
    pub category_scores: Vec<CategoryScore>,
    /// Full per-dimension analyses with breakdowns and checkpoints
    pub dimensions: Vec<DimensionAnalysis>,
    /// Prioritized flat issue list (severity, then category, then title)
    pub issues: Vec<AuditIssue>,
    /// Phased remediation roadmap
    pub roadmap: Vec<RoadmapPhase>,
    /// Rendered relationship graph
    pub relationship_graph: RelationshipGraph,
}

/// Sort issues by severity, then category name, then title.
///
/// The tie-break chain is total, so the ordering is deterministic for any
/// input permutation.
pub fn prioritize_issues(mut issues: Vec<AuditIssue>) -> Vec<AuditIssue> {
    issues.sort_by(|a, b| {
        a.severity
            .cmp(&b.severity)
            .then_with(|| a.category.label().cmp(b.category.label()))
            .then_with(|| a.title.cmp(&b.title))
            .then_with(|| a.id.cmp(&b.id))
    });
    issues
}

/// Bucket prioritized issues into effort phases.
///
/// Phases appear in fixed order and are omitted when empty.
pub fn build_roadmap(issues: &[AuditIssue]) -> Vec<RoadmapPhase> {
    [Effort::QuickWin, Effort::Medium, Effort::Strategic, Effort::Maintenance]
        .into_iter()
        .filter_map(|effort| {
            let tasks: Vec<RoadmapTask> = issues
                .iter()
                .filter(|issue| issue.effort == effort)
                .map(|issue| RoadmapTask {
                    issue_id: issue.id.clone(),
                    title: issue.title.clone(),
                    action: issue.recommendation.clone(),
                    severity: issue.severity,
                })
                .collect();
            if tasks.is_empty() {
                None
            } else {
                Some(RoadmapPhase {
                    title: effort.phase_title().to_string(),
                    effort,
                    tasks,
                })
            }
        })
        .collect()
}
