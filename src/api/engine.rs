//! Audit orchestration.
//!
//! [`AuditEngine`] owns a validated configuration, runs the six dimension
//! analyzers over a schema snapshot, and assembles the atomic
//! [`StrategicAuditReport`]. Analyzers never see each other's output; the
//! engine is the only place where dimensions are combined.

use chrono::Utc;
use tracing::{debug, info};

use crate::api::results::{
    build_roadmap, prioritize_issues, AuditIssue, CategoryScore, DimensionAnalysis,
    ExecutiveSummary, StrategicAuditReport,
};
use crate::core::config::AuditConfig;
use crate::core::errors::Result;
use crate::core::schema::{EntryCounts, Schema};
use crate::core::scoring::{weighted_overall, AuditCategory, Severity};
use crate::detectors::components::ComponentAnalyzer;
use crate::detectors::content_health::{ContentHealthAnalyzer, ContentSampler};
use crate::detectors::duplicates::DuplicationAnalyzer;
use crate::detectors::enums::EnumAnalyzer;
use crate::detectors::relationships::RelationshipAnalyzer;
use crate::detectors::structure::StructureAnalyzer;

/// Schema audit engine.
pub struct AuditEngine {
    config: AuditConfig,
    sampler: Option<Box<dyn ContentSampler>>,
}

impl AuditEngine {
    /// Create an engine from a validated configuration.
    pub fn new(config: AuditConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            sampler: None,
        })
    }

    /// Create an engine with default thresholds.
    pub fn with_defaults() -> Self {
        Self {
            config: AuditConfig::default(),
            sampler: None,
        }
    }

    /// Attach an entry sampler for content-health completeness checks.
    pub fn with_sampler(mut self, sampler: Box<dyn ContentSampler>) -> Self {
        self.sampler = Some(sampler);
        self
    }

    /// The active configuration.
    pub fn config(&self) -> &AuditConfig {
        &self.config
    }

    /// Audit one schema snapshot and produce the full report.
    pub fn audit(&self, schema: &Schema, counts: &EntryCounts) -> StrategicAuditReport {
        info!(
            models = schema.model_count(),
            components = schema.component_count(),
            enums = schema.enum_count(),
            "starting schema audit"
        );

        let relationship_analyzer = RelationshipAnalyzer::new(self.config.relationships.clone());
        let relationship_graph = relationship_analyzer.graph(schema, counts);

        let dimensions = vec![
            StructureAnalyzer::new(self.config.structure.clone(), self.config.traversal.clone())
                .analyze(schema),
            DuplicationAnalyzer::new(self.config.duplicates.clone()).analyze(schema),
            relationship_analyzer.score_graph(schema, &relationship_graph),
            EnumAnalyzer::new(self.config.enums.clone()).analyze(schema),
            ComponentAnalyzer::new(self.config.components.clone()).analyze(schema),
            self.content_health(schema, counts),
        ];

        let weighted: Vec<(f64, f64)> = dimensions
            .iter()
            .map(|d| (self.config.weights.weight_for(d.category), d.score))
            .collect();
        let overall_score = weighted_overall(&weighted);

        let category_scores: Vec<CategoryScore> = dimensions
            .iter()
            .map(|d| CategoryScore {
                category: d.category,
                score: d.score,
                weight: self.config.weights.weight_for(d.category),
            })
            .collect();

        let issues = prioritize_issues(
            dimensions
                .iter()
                .flat_map(|d| d.issues.iter().cloned())
                .collect(),
        );
        debug!(issues = issues.len(), overall = overall_score, "audit scored");

        let roadmap = build_roadmap(&issues);
        let summary = executive_summary(overall_score, &issues);

        StrategicAuditReport {
            generated_at: Utc::now(),
            summary,
            overall_score,
            category_scores,
            dimensions,
            issues,
            roadmap,
            relationship_graph,
        }
    }

    /// Content health degrades rather than fails: with no counts supplied the
    /// dimension is neutral, and sampler errors become per-model notes inside
    /// the analyzer.
    fn content_health(&self, schema: &Schema, counts: &EntryCounts) -> DimensionAnalysis {
        if counts.is_empty() && !schema.is_empty() {
            return DimensionAnalysis::neutral(
                AuditCategory::ContentHealth,
                "No entry counts supplied; content health was not assessed",
            );
        }
        let mut analyzer = ContentHealthAnalyzer::new(self.config.content_health.clone());
        if let Some(sampler) = &self.sampler {
            analyzer = analyzer.with_sampler(sampler.as_ref());
        }
        analyzer.analyze(schema, counts)
    }
}

/// Build the executive summary from the overall score and prioritized issues.
fn executive_summary(overall: f64, issues: &[AuditIssue]) -> ExecutiveSummary {
    let critical = issues
        .iter()
        .filter(|i| i.severity == Severity::Critical)
        .count();
    let headline = if issues.is_empty() {
        format!("Schema health {overall:.0}/100: no issues detected")
    } else if critical > 0 {
        format!(
            "Schema health {overall:.0}/100: {critical} critical issue{} need attention",
            if critical == 1 { "" } else { "s" }
        )
    } else if overall >= 85.0 {
        format!("Schema health {overall:.0}/100: solid, with targeted cleanups available")
    } else {
        format!("Schema health {overall:.0}/100: structured remediation recommended")
    };

    let key_findings = issues.iter().take(5).map(|i| i.title.clone()).collect();
    let quick_wins = issues
        .iter()
        .filter(|i| i.effort == crate::api::results::Effort::QuickWin)
        .take(5)
        .map(|i| i.recommendation.clone())
        .collect();

    ExecutiveSummary {
        headline,
        key_findings,
        quick_wins,
    }
}
