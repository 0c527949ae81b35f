//! Component dimension: reuse of embedded component types and detection of
//! monolithic page models that bypass composition entirely.

use serde::Serialize;

use crate::api::results::{AuditIssue, DimensionAnalysis, Effort};
use crate::core::config::ComponentAuditConfig;
use crate::core::patterns::{is_generated_wrapper, PatternCategory, PatternRegistry};
use crate::core::schema::Schema;
use crate::core::scoring::{AuditCategory, CheckpointResult, ScoreCard, Severity};

/// Observations feeding the component score.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ComponentFacts {
    /// Components no model or component embeds
    pub unused: Vec<String>,
    /// Components embedded by exactly one type
    pub single_use: Vec<String>,
    /// Page-like models with many fields and zero component references
    pub monoliths: Vec<String>,
    /// Total component types considered (generated wrappers excluded)
    pub considered: usize,
}

/// Analyzer for the component-reuse dimension.
pub struct ComponentAnalyzer {
    config: ComponentAuditConfig,
}

impl ComponentAnalyzer {
    /// Create the analyzer with its thresholds.
    pub fn new(config: ComponentAuditConfig) -> Self {
        Self { config }
    }

    /// Run detection and scoring over the schema.
    pub fn analyze(&self, schema: &Schema) -> DimensionAnalysis {
        let facts = self.detect(schema);
        self.present(&facts)
    }

    fn detect(&self, schema: &Schema) -> ComponentFacts {
        let registry = PatternRegistry::global();
        let usage = schema.component_usage();
        let mut facts = ComponentFacts::default();

        for component in schema.components() {
            // Generated union wrappers exist for the API surface, not for
            // editors; usage counts on them are meaningless.
            if is_generated_wrapper(&component.name) {
                continue;
            }
            facts.considered += 1;
            match usage.get(&component.name).copied().unwrap_or(0) {
                0 => facts.unused.push(component.name.clone()),
                1 => facts.single_use.push(component.name.clone()),
                _ => {}
            }
        }

        for model in schema.models() {
            if model.fields.len() < self.config.monolith_field_count {
                continue;
            }
            let page_like = matches!(
                registry.classify(&model.name),
                Some(PatternCategory::Content) | Some(PatternCategory::Presentation)
            );
            let uses_components = model
                .fields
                .iter()
                .any(|f| f.related_model.as_deref().map_or(false, |t| {
                    schema.component_by_name(t).is_some()
                }));
            if page_like && !uses_components {
                facts.monoliths.push(model.name.clone());
            }
        }

        facts
    }

    fn present(&self, facts: &ComponentFacts) -> DimensionAnalysis {
        let mut card = ScoreCard::standard();
        let mut checkpoints = Vec::new();
        let mut issues = Vec::new();
        let mut recommendations = Vec::new();

        for name in &facts.unused {
            card.add_detailed("unused component", -self.config.unused_penalty, name.clone());
            issues.push(AuditIssue {
                id: AuditIssue::make_id(AuditCategory::Components, "unused", name),
                severity: Severity::Warning,
                category: AuditCategory::Components,
                title: format!("Component {name} is never embedded"),
                description: format!("No model or component declares a field of type {name}"),
                impact: "Unused components clutter the editor's insert menu".to_string(),
                recommendation: format!("Delete {name} or wire it into the models it was built for"),
                affected_items: vec![name.clone()],
                effort: Effort::QuickWin,
                score_delta: Some(self.config.unused_penalty),
            });
        }
        checkpoints.push(if facts.unused.is_empty() {
            CheckpointResult::good("Every component is embedded somewhere")
        } else {
            CheckpointResult::warning("Every component is embedded somewhere")
                .with_examples(facts.unused.clone())
        });

        for name in &facts.single_use {
            card.add_detailed(
                "single-use component",
                -self.config.single_use_penalty,
                name.clone(),
            );
            issues.push(AuditIssue {
                id: AuditIssue::make_id(AuditCategory::Components, "single-use", name),
                severity: Severity::Info,
                category: AuditCategory::Components,
                title: format!("Component {name} is used by one type only"),
                description: format!("{name} buys abstraction overhead without reuse"),
                impact: "Single-use components add indirection for editors".to_string(),
                recommendation: format!(
                    "Inline {name} into its host, or find a second consumer"
                ),
                affected_items: vec![name.clone()],
                effort: Effort::Maintenance,
                score_delta: Some(self.config.single_use_penalty),
            });
        }
        checkpoints.push(if facts.single_use.is_empty() {
            CheckpointResult::good("Components are reused")
        } else {
            CheckpointResult::warning("Components are reused")
                .with_examples(facts.single_use.clone())
        });

        for name in &facts.monoliths {
            card.add_detailed(
                "monolithic page model",
                -self.config.monolith_penalty,
                name.clone(),
            );
            issues.push(AuditIssue {
                id: AuditIssue::make_id(AuditCategory::Components, "monolith", name),
                severity: Severity::Warning,
                category: AuditCategory::Components,
                title: format!("Model {name} is a flat monolith"),
                description: format!(
                    "{name} carries {}+ fields and embeds no components",
                    self.config.monolith_field_count
                ),
                impact: "Flat page models force copy-paste when a second page variant appears"
                    .to_string(),
                recommendation: format!("Split {name} into reusable component sections"),
                affected_items: vec![name.clone()],
                effort: Effort::Medium,
                score_delta: Some(self.config.monolith_penalty),
            });
        }
        checkpoints.push(if facts.monoliths.is_empty() {
            CheckpointResult::good("Page models are composed from components")
        } else {
            CheckpointResult::issue("Page models are composed from components")
                .with_examples(facts.monoliths.clone())
                .with_actions(vec![
                    "Extract repeated page sections into components".to_string(),
                ])
        });

        if facts.considered == 0 && facts.monoliths.is_empty() {
            recommendations
                .push("No component types declared; composition is untested here".to_string());
        }

        let floor = card.floor();
        let base = card.base();
        let (score, breakdown) = card.finalize();
        DimensionAnalysis {
            category: AuditCategory::Components,
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::schema::{Field, ModelType};

    fn schema_with_components() -> Schema {
        let hero = ModelType::component(
            "HeroSection",
            vec![Field::scalar("heading", "String")],
        );
        let sidebar = ModelType::component(
            "SidebarWidget",
            vec![Field::scalar("body", "String")],
        );
        let orphan = ModelType::component("OrphanBlock", vec![Field::scalar("text", "String")]);
        let page = ModelType::model(
            "LandingPage",
            vec![
                Field::reference("hero", "HeroSection"),
                Field::reference("sidebar", "SidebarWidget"),
            ],
        );
        let article = ModelType::model(
            "Article",
            vec![Field::reference("hero", "HeroSection")],
        );
        Schema::new(vec![page, article], vec![hero, sidebar, orphan], vec![])
    }

    #[test]
    fn unused_and_single_use_components_are_flagged() {
        let analysis =
            ComponentAnalyzer::new(ComponentAuditConfig::default()).analyze(&schema_with_components());
        assert!(analysis
            .issues
            .iter()
            .any(|i| i.id == "components:unused:orphanblock"));
        assert!(analysis
            .issues
            .iter()
            .any(|i| i.id == "components:single-use:sidebarwidget"));
        // 100 - 4 (unused) - 1 (single use)
        assert_eq!(analysis.score, 95.0);
    }

    #[test]
    fn shared_component_is_not_flagged() {
        let analysis =
            ComponentAnalyzer::new(ComponentAuditConfig::default()).analyze(&schema_with_components());
        assert!(analysis
            .issues
            .iter()
            .all(|i| !i.affected_items.contains(&"HeroSection".to_string())));
    }

    #[test]
    fn generated_wrappers_are_ignored() {
        let schema = Schema::new(
            vec![],
            vec![ModelType::component(
                "PageBlocksUnion",
                vec![Field::scalar("discriminator", "String")],
            )],
            vec![],
        );
        let analysis = ComponentAnalyzer::new(ComponentAuditConfig::default()).analyze(&schema);
        assert!(analysis.issues.is_empty());
        assert_eq!(analysis.score, 100.0);
    }

    #[test]
    fn flat_page_model_without_components_is_a_monolith() {
        let fields: Vec<Field> = (0..16)
            .map(|i| Field::scalar(format!("field{i}"), "String"))
            .collect();
        let schema = Schema::new(
            vec![ModelType::model("HomePage", fields)],
            vec![],
            vec![],
        );
        let analysis = ComponentAnalyzer::new(ComponentAuditConfig::default()).analyze(&schema);
        let issue = analysis
            .issues
            .iter()
            .find(|i| i.id == "components:monolith:homepage")
            .expect("monolith issue");
        assert_eq!(issue.severity, Severity::Warning);
        assert_eq!(analysis.score, 97.0);
    }

    #[test]
    fn large_model_that_embeds_components_is_fine() {
        let mut fields: Vec<Field> = (0..16)
            .map(|i| Field::scalar(format!("field{i}"), "String"))
            .collect();
        fields.push(Field::reference("hero", "HeroSection"));
        let schema = Schema::new(
            vec![ModelType::model("HomePage", fields)],
            vec![ModelType::component(
                "HeroSection",
                vec![Field::scalar("heading", "String")],
            )],
            vec![],
        );
        let analysis = ComponentAnalyzer::new(ComponentAuditConfig::default()).analyze(&schema);
        assert!(analysis.issues.iter().all(|i| !i.id.contains(":monolith:")));
    }
}
