//! Enumeration dimension: tenancy misuse, oversized value sets, and
//! status-enum proliferation.

use serde::Serialize;

use crate::api::results::{AuditIssue, DimensionAnalysis, Effort};
use crate::core::config::EnumAuditConfig;
use crate::core::patterns::{MatchContext, PatternCategory, PatternRegistry};
use crate::core::schema::Schema;
use crate::core::scoring::{AuditCategory, CheckpointResult, ScoreCard, Severity};

/// Number of status-classified enums at which proliferation is flagged.
const STATUS_PROLIFERATION_MIN: usize = 3;

/// Typed facts about one enumeration.
#[derive(Debug, Clone, Serialize)]
pub struct EnumFact {
    /// Enumeration name
    pub name: String,
    /// Number of declared values
    pub value_count: usize,
    /// Distinct types using this enum as a field type
    pub usage_count: usize,
    /// Pattern classification, when one matched
    pub classification: Option<PatternCategory>,
}

/// Analyzer for the enumerations dimension.
pub struct EnumAnalyzer {
    config: EnumAuditConfig,
}

impl EnumAnalyzer {
    /// Create the analyzer with its thresholds.
    pub fn new(config: EnumAuditConfig) -> Self {
        Self { config }
    }

    /// Run detection, scoring, and presentation.
    pub fn analyze(&self, schema: &Schema) -> DimensionAnalysis {
        let facts = detect(schema);
        self.present(&facts)
    }

    fn present(&self, facts: &[EnumFact]) -> DimensionAnalysis {
        let registry_matters = !facts.is_empty();
        let mut card = ScoreCard::standard();
        let mut checkpoints = Vec::new();
        let mut issues = Vec::new();
        let mut recommendations = Vec::new();

        // Tenancy enums encode brand/site segmentation that belongs in a
        // dedicated model; they are the most expensive enum mistake because
        // every new tenant is a schema migration.
        let tenancy: Vec<&EnumFact> = facts
            .iter()
            .filter(|f| {
                f.classification == Some(PatternCategory::Tenancy)
                    && f.usage_count >= self.config.tenancy_min_refs
            })
            .collect();
        for fact in &tenancy {
            card.add_detailed(
                "tenancy enum in place of a dedicated model",
                -self.config.tenancy_penalty,
                format!("{} used by {} types", fact.name, fact.usage_count),
            );
            issues.push(AuditIssue {
                id: AuditIssue::make_id(AuditCategory::Enums, "tenancy", &fact.name),
                severity: Severity::Critical,
                category: AuditCategory::Enums,
                title: format!("Enum {} encodes tenancy", fact.name),
                description: format!(
                    "{} holds {} tenant-like values and is referenced by {} types",
                    fact.name, fact.value_count, fact.usage_count
                ),
                impact: "Adding a tenant requires a schema migration and a redeploy instead of a content change"
                    .to_string(),
                recommendation: format!(
                    "Migrate {} to a dedicated model and replace the enum fields with references",
                    fact.name
                ),
                affected_items: vec![fact.name.clone()],
                effort: Effort::Strategic,
                score_delta: Some(self.config.tenancy_penalty),
            });
        }
        checkpoints.push(if tenancy.is_empty() {
            CheckpointResult::good("Tenancy encoded as content")
        } else {
            CheckpointResult::issue("Tenancy encoded as content")
                .with_examples(tenancy.iter().map(|f| f.name.clone()).collect())
                .with_actions(vec![
                    "Promote tenant lists to models so tenants are content, not schema".to_string(),
                ])
        });

        let oversized: Vec<&EnumFact> = facts
            .iter()
            .filter(|f| f.value_count >= self.config.oversized_value_count)
            .collect();
        for fact in &oversized {
            card.add_detailed(
                "oversized enum",
                -self.config.oversized_penalty,
                format!("{} has {} values", fact.name, fact.value_count),
            );
            issues.push(AuditIssue {
                id: AuditIssue::make_id(AuditCategory::Enums, "oversized", &fact.name),
                severity: Severity::Warning,
                category: AuditCategory::Enums,
                title: format!("Enum {} has {} values", fact.name, fact.value_count),
                description: "Value sets this large usually describe content, not a closed vocabulary"
                    .to_string(),
                impact: "Every value change is a schema deployment".to_string(),
                recommendation: format!("Consider a taxonomy model instead of enum {}", fact.name),
                affected_items: vec![fact.name.clone()],
                effort: Effort::Medium,
                score_delta: Some(self.config.oversized_penalty),
            });
        }
        checkpoints.push(if oversized.is_empty() {
            CheckpointResult::good("Enum value-set sizes")
        } else {
            CheckpointResult::warning("Enum value-set sizes")
                .with_examples(oversized.iter().map(|f| f.name.clone()).collect())
        });

        let unused: Vec<&EnumFact> = facts.iter().filter(|f| f.usage_count == 0).collect();
        if !unused.is_empty() {
            checkpoints.push(
                CheckpointResult::warning("Unused enums")
                    .with_examples(unused.iter().map(|f| f.name.clone()).collect())
                    .with_actions(vec!["Remove enums no field references".to_string()]),
            );
            for fact in &unused {
                issues.push(AuditIssue {
                    id: AuditIssue::make_id(AuditCategory::Enums, "unused", &fact.name),
                    severity: Severity::Info,
                    category: AuditCategory::Enums,
                    title: format!("Enum {} is unused", fact.name),
                    description: format!("No model or component field is typed by {}", fact.name),
                    impact: "Dead schema surface confuses editors and integrators".to_string(),
                    recommendation: format!("Delete {}", fact.name),
                    affected_items: vec![fact.name.clone()],
                    effort: Effort::QuickWin,
                    score_delta: None,
                });
            }
        }

        // Many distinct status enums usually means one lifecycle vocabulary
        // got re-declared per type. Informational only: overlapping value
        // sets are already charged by the duplication dimension.
        let status: Vec<&EnumFact> = facts
            .iter()
            .filter(|f| f.classification == Some(PatternCategory::Status))
            .collect();
        if status.len() >= STATUS_PROLIFERATION_MIN {
            checkpoints.push(
                CheckpointResult::warning("Status-enum proliferation")
                    .with_findings(vec![format!(
                        "{} separate status enums declared",
                        status.len()
                    )])
                    .with_examples(status.iter().map(|f| f.name.clone()).collect())
                    .with_actions(vec![
                        "Consolidate lifecycle states into one shared status enum".to_string(),
                    ]),
            );
            issues.push(AuditIssue {
                id: AuditIssue::make_id(AuditCategory::Enums, "status-proliferation", "schema"),
                severity: Severity::Info,
                category: AuditCategory::Enums,
                title: format!("{} separate status enums", status.len()),
                description:
                    "Several enums each describe an editorial lifecycle; they tend to drift apart over time"
                        .to_string(),
                impact: "Editors see inconsistent state names across content types".to_string(),
                recommendation: "Consolidate lifecycle states into one shared status enum"
                    .to_string(),
                affected_items: status.iter().map(|f| f.name.clone()).collect(),
                effort: Effort::Medium,
                score_delta: None,
            });
        }

        if !tenancy.is_empty() {
            recommendations.push(
                "Treat brands/sites/tenants as content entries so marketing can add them without engineering"
                    .to_string(),
            );
        }
        if registry_matters && tenancy.is_empty() && oversized.is_empty() {
            recommendations.push("Enum usage looks healthy".to_string());
        }

        let floor = card.floor();
        let base = card.base();
        let (score, breakdown) = card.finalize();
        DimensionAnalysis {
            category: AuditCategory::Enums,
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

/// Detection layer: schema to per-enum facts.
pub fn detect(schema: &Schema) -> Vec<EnumFact> {
    let registry = PatternRegistry::global();
    let usage = schema.enum_usage();
    schema
        .enums()
        .map(|e| {
            let context = MatchContext::with_values(&e.values);
            EnumFact {
                name: e.name.clone(),
                value_count: e.values.len(),
                usage_count: usage.get(&e.name).copied().unwrap_or(0),
                classification: registry.classify_with(&e.name, &context),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::schema::{EnumType, Field, ModelType};
    use crate::core::scoring::reconstruct_score;

    fn brand_schema() -> Schema {
        let brand = EnumType::new(
            "Brand",
            &[
                "Acme", "Globex", "Initech", "Umbrella", "Stark", "Wayne", "Tyrell", "Cyberdyne",
            ],
        );
        let users: Vec<ModelType> = ["Article", "Page", "Product", "Campaign"]
            .iter()
            .map(|name| {
                ModelType::model(
                    *name,
                    vec![
                        Field::scalar("title", "String"),
                        Field::enumeration("brand", "Brand"),
                    ],
                )
            })
            .collect();
        Schema::new(users, vec![], vec![brand])
    }

    #[test]
    fn tenancy_enum_is_critical_with_migration_recommendation() {
        let analysis = EnumAnalyzer::new(EnumAuditConfig::default()).analyze(&brand_schema());
        let issue = analysis
            .issues
            .iter()
            .find(|i| i.id == "enums:tenancy:brand")
            .expect("tenancy issue");
        assert_eq!(issue.severity, Severity::Critical);
        assert!(issue.recommendation.contains("dedicated model"));
        assert_eq!(analysis.score, 85.0);
        assert_eq!(
            reconstruct_score(analysis.base, analysis.floor, &analysis.breakdown),
            analysis.score
        );
    }

    #[test]
    fn detection_classifies_brand_roster_as_tenancy() {
        let facts = detect(&brand_schema());
        assert_eq!(facts.len(), 1);
        assert_eq!(facts[0].classification, Some(PatternCategory::Tenancy));
        assert_eq!(facts[0].usage_count, 4);
        assert_eq!(facts[0].value_count, 8);
    }

    #[test]
    fn constant_style_status_enum_is_not_tenancy() {
        let schema = Schema::new(
            vec![ModelType::model(
                "Article",
                vec![Field::enumeration("status", "ArticleStatus")],
            )],
            vec![],
            vec![EnumType::new(
                "ArticleStatus",
                &["DRAFT", "REVIEW", "PUBLISHED", "ARCHIVED"],
            )],
        );
        let analysis = EnumAnalyzer::new(EnumAuditConfig::default()).analyze(&schema);
        assert!(analysis.issues.iter().all(|i| !i.id.contains(":tenancy:")));
        assert_eq!(analysis.score, 100.0);
    }

    #[test]
    fn oversized_enum_draws_a_warning() {
        let values: Vec<String> = (0..25).map(|i| format!("VALUE_{i}")).collect();
        let value_refs: Vec<&str> = values.iter().map(String::as_str).collect();
        let schema = Schema::new(
            vec![ModelType::model(
                "Doc",
                vec![Field::enumeration("kind", "DocKind")],
            )],
            vec![],
            vec![EnumType::new("DocKind", &value_refs)],
        );
        let analysis = EnumAnalyzer::new(EnumAuditConfig::default()).analyze(&schema);
        let issue = analysis
            .issues
            .iter()
            .find(|i| i.id == "enums:oversized:dockind")
            .expect("oversized issue");
        assert_eq!(issue.severity, Severity::Warning);
        assert_eq!(analysis.score, 95.0);
    }

    #[test]
    fn repeated_status_enums_are_flagged_without_penalty() {
        let models: Vec<ModelType> = [
            ("Article", "ArticleStatus"),
            ("Page", "PageStatus"),
            ("Event", "EventStatus"),
        ]
        .iter()
        .map(|(model, status)| {
            ModelType::model(*model, vec![Field::enumeration("status", *status)])
        })
        .collect();
        let schema = Schema::new(
            models,
            vec![],
            vec![
                EnumType::new("ArticleStatus", &["DRAFT", "PUBLISHED"]),
                EnumType::new("PageStatus", &["DRAFT", "LIVE"]),
                EnumType::new("EventStatus", &["PLANNED", "DONE"]),
            ],
        );
        let analysis = EnumAnalyzer::new(EnumAuditConfig::default()).analyze(&schema);
        let issue = analysis
            .issues
            .iter()
            .find(|i| i.id == "enums:status-proliferation:schema")
            .expect("proliferation issue");
        assert_eq!(issue.severity, Severity::Info);
        assert_eq!(issue.affected_items.len(), 3);
        // Informational only; the score is untouched.
        assert_eq!(analysis.score, 100.0);
    }

    #[test]
    fn empty_schema_is_neutral() {
        let analysis = EnumAnalyzer::new(EnumAuditConfig::default()).analyze(&Schema::empty());
        assert_eq!(analysis.score, 100.0);
        assert!(analysis.issues.is_empty());
    }
}
