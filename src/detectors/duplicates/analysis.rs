//! Duplication dimension built on top of [`DuplicateDetector`](super::DuplicateDetector).

use crate::api::results::{AuditIssue, DimensionAnalysis, Effort};
use crate::core::schema::Schema;
use crate::core::scoring::{AuditCategory, CheckpointResult, ScoreCard, Severity};

use super::{DuplicateConfig, DuplicateDetector, DuplicateGroup, DuplicateKind, GroupingReason};

/// Penalty per duplicate model group.
const MODEL_GROUP_PENALTY: f64 = 8.0;
/// Penalty per duplicate component group.
const COMPONENT_GROUP_PENALTY: f64 = 5.0;
/// Penalty per duplicate enum group.
const ENUM_GROUP_PENALTY: f64 = 3.0;

/// Analyzer for the duplication dimension.
pub struct DuplicationAnalyzer {
    detector: DuplicateDetector,
}

impl DuplicationAnalyzer {
    /// Create the analyzer with detection thresholds.
    pub fn new(config: DuplicateConfig) -> Self {
        Self {
            detector: DuplicateDetector::new(config),
        }
    }

    /// Detect duplicate groups and fold them into a scored dimension.
    pub fn analyze(&self, schema: &Schema) -> DimensionAnalysis {
        let groups = self.detector.detect(schema);
        self.present(&groups)
    }

    fn present(&self, groups: &[DuplicateGroup]) -> DimensionAnalysis {
        let mut card = ScoreCard::standard();
        let mut checkpoints = Vec::new();
        let mut issues = Vec::new();
        let mut recommendations = Vec::new();

        for group in groups {
            let (penalty, severity, effort, rule) = match (group.kind, group.reason) {
                // Versioned copies drift apart in production; migrating them
                // back together is a project, not a cleanup.
                (DuplicateKind::Models, GroupingReason::VersionSuffix) => (
                    MODEL_GROUP_PENALTY,
                    Severity::Critical,
                    Effort::Strategic,
                    "versioned-models",
                ),
                (DuplicateKind::Models, _) => (
                    MODEL_GROUP_PENALTY,
                    Severity::Warning,
                    Effort::Strategic,
                    "duplicate-models",
                ),
                (DuplicateKind::Components, _) => (
                    COMPONENT_GROUP_PENALTY,
                    Severity::Warning,
                    Effort::Medium,
                    "duplicate-components",
                ),
                (DuplicateKind::Enums, _) => (
                    ENUM_GROUP_PENALTY,
                    Severity::Warning,
                    Effort::QuickWin,
                    "duplicate-enums",
                ),
            };
            let subject = group.members.join("+");
            card.add_detailed(
                format!("duplicate {} group", group.kind.label()),
                -penalty,
                group.members.join(", "),
            );
            issues.push(AuditIssue {
                id: AuditIssue::make_id(AuditCategory::Duplication, rule, &subject),
                severity,
                category: AuditCategory::Duplication,
                title: format!(
                    "{} overlap at {:.0}% similarity",
                    group.members.join(" / "),
                    group.similarity
                ),
                description: format!(
                    "{} {} share {} attributes",
                    group.members.len(),
                    group.kind.label(),
                    group.shared_attributes.len()
                ),
                impact: "Parallel types split content and double every schema change".to_string(),
                recommendation: group.recommendation.clone(),
                affected_items: group.members.clone(),
                effort,
                score_delta: Some(penalty),
            });
        }

        for kind in [
            DuplicateKind::Models,
            DuplicateKind::Components,
            DuplicateKind::Enums,
        ] {
            let hits: Vec<String> = groups
                .iter()
                .filter(|g| g.kind == kind)
                .map(|g| g.members.join(" / "))
                .collect();
            let title = format!("No duplicate {}", kind.label());
            checkpoints.push(if hits.is_empty() {
                CheckpointResult::good(title)
            } else {
                CheckpointResult::warning(title).with_examples(hits)
            });
        }

        if groups
            .iter()
            .any(|g| g.reason == GroupingReason::VersionSuffix)
        {
            recommendations.push(
                "Retire versioned model copies; keep one model and migrate its entries".to_string(),
            );
        }

        let floor = card.floor();
        let base = card.base();
        let (score, breakdown) = card.finalize();
        DimensionAnalysis {
            category: AuditCategory::Duplication,
            score,
            base,
            floor,
            breakdown,
            checkpoints,
            issues,
            recommendations,
            notes: Vec::new(),
        }
    }
}
