//! Model-structure dimension: field-count hygiene, relation-field density,
//! and query-depth risk.
//!
//! Detection produces typed facts, scoring turns facts into contributions,
//! and presentation renders the strings; the three layers never mix.

use serde::Serialize;

use crate::api::results::{AuditIssue, DimensionAnalysis, Effort};
use crate::core::config::StructureConfig;
use crate::core::schema::Schema;
use crate::core::scoring::{AuditCategory, CheckpointResult, ScoreCard, Severity};
use crate::detectors::traversal::{DeepNestingReport, PathFinder, TraversalConfig};

/// Minimum field count before relation density is judged at all.
const RELATION_DENSITY_MIN_FIELDS: usize = 8;

/// Relation share of the field set at which a model is flagged.
const RELATION_DENSITY_RATIO: f64 = 0.6;

/// Typed facts extracted by structure detection.
#[derive(Debug, Clone, Serialize)]
pub struct StructureFacts {
    /// Models whose field count crossed the warning threshold
    pub oversized_warn: Vec<(String, usize)>,
    /// Models whose field count crossed the issue threshold
    pub oversized_issue: Vec<(String, usize)>,
    /// Models declaring no fields at all
    pub zero_field: Vec<String>,
    /// Models whose field set is mostly relations (name, relation count, total)
    pub relation_heavy: Vec<(String, usize, usize)>,
    /// Deep-nesting search outcome
    pub nesting: DeepNestingReport,
}

/// Analyzer for the structure dimension.
pub struct StructureAnalyzer {
    config: StructureConfig,
    traversal: TraversalConfig,
}

impl StructureAnalyzer {
    /// Create the analyzer with its thresholds and traversal caps.
    pub fn new(config: StructureConfig, traversal: TraversalConfig) -> Self {
        Self { config, traversal }
    }

    /// Run detection, scoring, and presentation for one schema.
    pub fn analyze(&self, schema: &Schema) -> DimensionAnalysis {
        let facts = self.detect(schema);
        self.present(facts)
    }

    /// Detection layer: schema to typed facts.
    fn detect(&self, schema: &Schema) -> StructureFacts {
        let mut oversized_warn = Vec::new();
        let mut oversized_issue = Vec::new();
        let mut zero_field = Vec::new();
        let mut relation_heavy = Vec::new();
        for model in schema.models() {
            let count = model.fields.len();
            if count == 0 {
                zero_field.push(model.name.clone());
            } else if count >= self.config.issue_field_count {
                oversized_issue.push((model.name.clone(), count));
            } else if count >= self.config.warn_field_count {
                oversized_warn.push((model.name.clone(), count));
            }
            let relations = model.relation_fields().count();
            if count >= RELATION_DENSITY_MIN_FIELDS
                && relations as f64 / count as f64 >= RELATION_DENSITY_RATIO
            {
                relation_heavy.push((model.name.clone(), relations, count));
            }
        }
        let nesting = PathFinder::new(self.traversal.clone()).find_deep_paths(schema);
        StructureFacts {
            oversized_warn,
            oversized_issue,
            zero_field,
            relation_heavy,
            nesting,
        }
    }

    /// Scoring layer: facts to contributions.
    fn score(&self, facts: &StructureFacts) -> ScoreCard {
        let mut card = ScoreCard::standard().with_floor(self.config.floor);
        for (name, count) in &facts.oversized_warn {
            card.add_detailed(
                "model approaching field-count limit",
                -self.config.oversized_warn_penalty,
                format!("{name} has {count} fields"),
            );
        }
        for (name, count) in &facts.oversized_issue {
            card.add_detailed(
                "severely oversized model",
                -self.config.oversized_issue_penalty,
                format!("{name} has {count} fields"),
            );
        }
        for finding in &facts.nesting.findings {
            card.add_detailed(
                "relation chain exceeds safe query depth",
                -self.config.deep_path_penalty,
                finding.path.join(" -> "),
            );
        }
        card
    }

    /// Presentation layer: facts to checkpoints, issues, and texts.
    fn present(&self, facts: StructureFacts) -> DimensionAnalysis {
        let card = self.score(&facts);
        let mut checkpoints = Vec::new();
        let mut issues = Vec::new();
        let mut recommendations = Vec::new();
        let mut notes = Vec::new();

        let oversized_total = facts.oversized_warn.len() + facts.oversized_issue.len();
        let field_checkpoint = if !facts.oversized_issue.is_empty() {
            CheckpointResult::issue("Model field counts")
                .with_findings(vec![format!(
                    "{oversized_total} models exceed the recommended field count"
                )])
                .with_examples(
                    facts
                        .oversized_issue
                        .iter()
                        .map(|(name, count)| format!("{name} ({count} fields)"))
                        .collect(),
                )
                .with_actions(vec![
                    "Split oversized models into focused models plus shared components".to_string(),
                ])
        } else if !facts.oversized_warn.is_empty() {
            CheckpointResult::warning("Model field counts").with_examples(
                facts
                    .oversized_warn
                    .iter()
                    .map(|(name, count)| format!("{name} ({count} fields)"))
                    .collect(),
            )
        } else {
            CheckpointResult::good("Model field counts")
        };
        checkpoints.push(field_checkpoint);

        for (name, count) in &facts.oversized_issue {
            issues.push(AuditIssue {
                id: AuditIssue::make_id(AuditCategory::Structure, "oversized", name),
                severity: Severity::Warning,
                category: AuditCategory::Structure,
                title: format!("Model {name} is severely oversized"),
                description: format!(
                    "{name} declares {count} fields, past the {} field issue threshold",
                    self.config.issue_field_count
                ),
                impact: "Editors face an unwieldy form and queries fetch far more than needed"
                    .to_string(),
                recommendation: format!(
                    "Break {name} into a lean model plus embedded components for its field groups"
                ),
                affected_items: vec![name.clone()],
                effort: Effort::Medium,
                score_delta: Some(self.config.oversized_issue_penalty),
            });
        }

        let nesting_checkpoint = if facts.nesting.findings.is_empty() {
            CheckpointResult::good("Relation nesting depth")
        } else {
            CheckpointResult::issue("Relation nesting depth")
                .with_findings(
                    facts
                        .nesting
                        .findings
                        .iter()
                        .map(|f| format!("{}-model chain: {}", f.depth, f.path.join(" -> ")))
                        .collect(),
                )
                .with_actions(vec![
                    "Flatten the deepest chains with direct references".to_string()
                ])
        };
        checkpoints.push(nesting_checkpoint);

        for finding in &facts.nesting.findings {
            let head = finding.path.first().cloned().unwrap_or_default();
            issues.push(AuditIssue {
                id: AuditIssue::make_id(AuditCategory::Structure, "deep-nesting", &head),
                severity: finding.severity,
                category: AuditCategory::Structure,
                title: format!("Relation chain from {head} is {} models deep", finding.depth),
                description: format!("Chain: {}", finding.path.join(" -> ")),
                impact: "Resolving the full chain requires deeply nested queries that are slow and easy to get wrong"
                    .to_string(),
                recommendation: finding.mitigation.clone(),
                affected_items: finding.path.clone(),
                effort: Effort::Strategic,
                score_delta: Some(self.config.deep_path_penalty),
            });
        }
        if facts.nesting.truncated {
            notes.push(
                "Deep-nesting search hit a resource cap; results were truncated deterministically"
                    .to_string(),
            );
        }

        // Relation-heavy models usually mean the model is a join table in
        // disguise. Informational; no points are deducted.
        if !facts.relation_heavy.is_empty() {
            checkpoints.push(
                CheckpointResult::warning("Relation-field density")
                    .with_examples(
                        facts
                            .relation_heavy
                            .iter()
                            .map(|(name, relations, total)| {
                                format!("{name} ({relations} of {total} fields are relations)")
                            })
                            .collect(),
                    )
                    .with_actions(vec![
                        "Check whether relation-heavy models should own content of their own"
                            .to_string(),
                    ]),
            );
        }
        for (name, relations, total) in &facts.relation_heavy {
            issues.push(AuditIssue {
                id: AuditIssue::make_id(AuditCategory::Structure, "relation-density", name),
                severity: Severity::Info,
                category: AuditCategory::Structure,
                title: format!("Model {name} is mostly relations"),
                description: format!("{relations} of {name}'s {total} fields reference other types"),
                impact: "Queries through this model fan out without yielding content".to_string(),
                recommendation: format!(
                    "Give {name} substantive fields of its own or fold it into its neighbors"
                ),
                affected_items: vec![name.clone()],
                effort: Effort::Medium,
                score_delta: None,
            });
        }

        for name in &facts.zero_field {
            issues.push(AuditIssue {
                id: AuditIssue::make_id(AuditCategory::Structure, "zero-fields", name),
                severity: Severity::Info,
                category: AuditCategory::Structure,
                title: format!("Model {name} declares no fields"),
                description: format!("{name} exists in the schema but carries no fields"),
                impact: "Empty models add noise without storing content".to_string(),
                recommendation: format!("Flesh out or remove {name}"),
                affected_items: vec![name.clone()],
                effort: Effort::QuickWin,
                score_delta: None,
            });
        }

        if oversized_total > 0 {
            recommendations
                .push("Adopt components to keep model field counts manageable".to_string());
        }
        if !facts.nesting.findings.is_empty() {
            recommendations
                .push("Review content relationships for unnecessary indirection".to_string());
        }

        let floor = card.floor();
        let base = card.base();
        let (score, breakdown) = card.finalize();
        DimensionAnalysis {
            category: AuditCategory::Structure,
            score,
            base,
            floor,
            breakdown,
            checkpoints,
            issues,
            recommendations,
            notes,
        }
    }
}
