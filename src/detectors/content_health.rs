//! Content-health dimension: how the schema is actually populated.
//!
//! Unlike the structural dimensions this one needs data the schema cannot
//! provide, so it accepts entry counts gathered out-of-band and an optional
//! [`ContentSampler`] for deeper per-model inspection. Sampling failures are
//! recoverable: the affected sub-check degrades to a note instead of failing
//! the audit.

use serde::Serialize;
use tracing::debug;

use crate::api::results::{AuditIssue, DimensionAnalysis, Effort};
use crate::core::config::ContentHealthConfig;
use crate::core::errors::Result;
use crate::core::schema::{EntryCounts, ModelType, Schema};
use crate::core::scoring::{AuditCategory, CheckpointResult, ScoreCard, Severity};

/// A sampled slice of a model's entries.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ContentSample {
    /// Entries inspected
    pub sampled: u64,
    /// Sampled entries with at least one populated localized field
    pub localized: u64,
    /// Sampled entries whose required fields are all populated
    pub complete: u64,
}

/// Source of per-model entry samples.
///
/// Implementations talk to a delivery API, a database export, or a fixture
/// file; the analyzer only sees the aggregate sample.
pub trait ContentSampler {
    /// Human-readable source name, used in degradation notes.
    fn name(&self) -> &str;

    /// Sample entries for one model.
    fn sample(&self, model: &ModelType) -> Result<ContentSample>;
}

/// Observations feeding the content-health score.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ContentHealthFacts {
    /// Models with zero entries in any state
    pub empty_models: Vec<String>,
    /// Models whose entries are all drafts
    pub draft_only: Vec<String>,
    /// Models with mostly-incomplete sampled entries
    pub incomplete: Vec<String>,
    /// Models whose sampled entries mostly carry no localized content
    pub unlocalized: Vec<String>,
    /// Notes about degraded sub-checks
    pub notes: Vec<String>,
}

/// Analyzer for the content-health dimension.
pub struct ContentHealthAnalyzer<'a> {
    config: ContentHealthConfig,
    sampler: Option<&'a dyn ContentSampler>,
}

impl<'a> ContentHealthAnalyzer<'a> {
    /// Create the analyzer without a sampler; only entry counts are used.
    pub fn new(config: ContentHealthConfig) -> Self {
        Self {
            config,
            sampler: None,
        }
    }

    /// Attach an entry sampler for completeness checks.
    pub fn with_sampler(mut self, sampler: &'a dyn ContentSampler) -> Self {
        self.sampler = Some(sampler);
        self
    }

    /// Run detection and scoring over the schema and its entry counts.
    pub fn analyze(&self, schema: &Schema, counts: &EntryCounts) -> DimensionAnalysis {
        let facts = self.detect(schema, counts);
        self.present(&facts)
    }

    fn detect(&self, schema: &Schema, counts: &EntryCounts) -> ContentHealthFacts {
        let mut facts = ContentHealthFacts::default();

        for model in schema.models() {
            let count = counts.for_model(&model.name);
            if count.published_count == 0 && count.draft_count == 0 {
                facts.empty_models.push(model.name.clone());
            } else if count.published_count == 0 {
                facts.draft_only.push(model.name.clone());
            }
        }

        if let Some(sampler) = self.sampler {
            for model in schema.models() {
                if counts.total(&model.name) == 0 {
                    continue;
                }
                match sampler.sample(model) {
                    Ok(sample) if sample.sampled > 0 => {
                        if sample.complete * 2 < sample.sampled {
                            facts.incomplete.push(model.name.clone());
                        }
                        if sample.localized * 2 < sample.sampled {
                            facts.unlocalized.push(model.name.clone());
                        }
                    }
                    Ok(_) => {}
                    Err(err) => {
                        debug!(model = %model.name, error = %err, "entry sampling failed");
                        facts.notes.push(format!(
                            "Sampling {} via {} failed; completeness not assessed: {}",
                            model.name,
                            sampler.name(),
                            err
                        ));
                    }
                }
            }
        }

        facts
    }

    fn present(&self, facts: &ContentHealthFacts) -> DimensionAnalysis {
        let mut card = ScoreCard::standard().with_floor(self.config.floor);
        let mut checkpoints = Vec::new();
        let mut issues = Vec::new();
        let mut recommendations = Vec::new();

        for name in &facts.empty_models {
            card.add_detailed("empty model", -self.config.empty_model_penalty, name.clone());
            issues.push(AuditIssue {
                id: AuditIssue::make_id(AuditCategory::ContentHealth, "empty", name),
                severity: Severity::Warning,
                category: AuditCategory::ContentHealth,
                title: format!("Model {name} has no entries"),
                description: format!("{name} is declared but holds zero entries in any state"),
                impact: "Empty models are schema speculation; they cost editor attention for nothing"
                    .to_string(),
                recommendation: format!("Populate {name} or remove it"),
                affected_items: vec![name.clone()],
                effort: Effort::QuickWin,
                score_delta: Some(self.config.empty_model_penalty),
            });
        }
        checkpoints.push(if facts.empty_models.is_empty() {
            CheckpointResult::good("All models hold content")
        } else {
            CheckpointResult::warning("All models hold content")
                .with_examples(facts.empty_models.clone())
        });

        for name in &facts.draft_only {
            card.add_detailed("draft-only model", -self.config.draft_only_penalty, name.clone());
            issues.push(AuditIssue {
                id: AuditIssue::make_id(AuditCategory::ContentHealth, "draft-only", name),
                severity: Severity::Info,
                category: AuditCategory::ContentHealth,
                title: format!("Model {name} has only drafts"),
                description: format!("Every entry of {name} is unpublished"),
                impact: "Draft-only models suggest an abandoned or stalled rollout".to_string(),
                recommendation: format!("Publish or archive the drafts in {name}"),
                affected_items: vec![name.clone()],
                effort: Effort::Maintenance,
                score_delta: Some(self.config.draft_only_penalty),
            });
        }
        checkpoints.push(if facts.draft_only.is_empty() {
            CheckpointResult::good("Published content exists per model")
        } else {
            CheckpointResult::warning("Published content exists per model")
                .with_examples(facts.draft_only.clone())
        });

        if self.sampler.is_some() {
            checkpoints.push(if facts.incomplete.is_empty() {
                CheckpointResult::good("Sampled entries are mostly complete")
            } else {
                CheckpointResult::warning("Sampled entries are mostly complete")
                    .with_examples(facts.incomplete.clone())
            });
            for name in &facts.incomplete {
                issues.push(AuditIssue {
                    id: AuditIssue::make_id(AuditCategory::ContentHealth, "incomplete", name),
                    severity: Severity::Info,
                    category: AuditCategory::ContentHealth,
                    title: format!("Entries of {name} are mostly incomplete"),
                    description: format!(
                        "Over half of the sampled {name} entries are missing required fields"
                    ),
                    impact: "Incomplete entries render broken pages or fail validation on publish"
                        .to_string(),
                    recommendation: format!("Backfill required fields on {name} entries"),
                    affected_items: vec![name.clone()],
                    effort: Effort::Maintenance,
                    score_delta: None,
                });
            }
            // Localization gaps are informational; schemas for single-locale
            // sites legitimately never localize.
            checkpoints.push(if facts.unlocalized.is_empty() {
                CheckpointResult::good("Sampled entries carry localized content")
            } else {
                CheckpointResult::warning("Sampled entries carry localized content")
                    .with_examples(facts.unlocalized.clone())
            });
            for name in &facts.unlocalized {
                issues.push(AuditIssue {
                    id: AuditIssue::make_id(AuditCategory::ContentHealth, "unlocalized", name),
                    severity: Severity::Info,
                    category: AuditCategory::ContentHealth,
                    title: format!("Entries of {name} are mostly unlocalized"),
                    description: format!(
                        "Over half of the sampled {name} entries have no populated localized field"
                    ),
                    impact: "Secondary locales fall back or render empty for this content"
                        .to_string(),
                    recommendation: format!(
                        "Translate {name} entries or drop localization from its fields"
                    ),
                    affected_items: vec![name.clone()],
                    effort: Effort::Maintenance,
                    score_delta: None,
                });
            }
        }

        if !facts.empty_models.is_empty() {
            recommendations.push(
                "Remove speculative models; reintroduce them when real content arrives".to_string(),
            );
        }

        let floor = card.floor();
        let base = card.base();
        let (score, breakdown) = card.finalize();
        DimensionAnalysis {
            category: AuditCategory::ContentHealth,
            score,
            base,
            floor,
            breakdown,
            checkpoints,
            issues,
            recommendations,
            notes: facts.notes.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::errors::AuditError;
    use crate::core::schema::{Field, ModelType};

    fn three_model_schema() -> Schema {
        let model = |name: &str| ModelType::model(name, vec![Field::scalar("title", "String")]);
        Schema::new(
            vec![model("Article"), model("LegacyImport"), model("Teaser")],
            vec![],
            vec![],
        )
    }

    #[test]
    fn empty_and_draft_only_models_are_penalized() {
        let counts = EntryCounts::empty()
            .with("Article", 3, 40)
            .with("Teaser", 5, 0);
        let analysis =
            ContentHealthAnalyzer::new(ContentHealthConfig::default()).analyze(&three_model_schema(), &counts);
        assert!(analysis
            .issues
            .iter()
            .any(|i| i.id == "content_health:empty:legacyimport"));
        assert!(analysis
            .issues
            .iter()
            .any(|i| i.id == "content_health:draft-only:teaser"));
        // 100 - 4 (empty) - 2 (draft-only)
        assert_eq!(analysis.score, 94.0);
    }

    #[test]
    fn score_floor_holds_under_many_empty_models() {
        let models: Vec<ModelType> = (0..30)
            .map(|i| ModelType::model(format!("Model{i}"), vec![Field::scalar("a", "String")]))
            .collect();
        let schema = Schema::new(models, vec![], vec![]);
        let analysis = ContentHealthAnalyzer::new(ContentHealthConfig::default())
            .analyze(&schema, &EntryCounts::empty());
        assert_eq!(analysis.score, 20.0);
    }

    struct FixedSampler(ContentSample);

    impl ContentSampler for FixedSampler {
        fn name(&self) -> &str {
            "fixture"
        }
        fn sample(&self, _model: &ModelType) -> Result<ContentSample> {
            Ok(self.0.clone())
        }
    }

    struct FailingSampler;

    impl ContentSampler for FailingSampler {
        fn name(&self) -> &str {
            "unreachable-api"
        }
        fn sample(&self, model: &ModelType) -> Result<ContentSample> {
            Err(AuditError::sampling(&model.name, "connection refused"))
        }
    }

    #[test]
    fn sampler_flags_mostly_incomplete_models() {
        let sampler = FixedSampler(ContentSample {
            sampled: 10,
            localized: 10,
            complete: 3,
        });
        let counts = EntryCounts::empty().with("Article", 10, 0);
        let schema = Schema::new(
            vec![ModelType::model(
                "Article",
                vec![Field::scalar("title", "String")],
            )],
            vec![],
            vec![],
        );
        let analysis = ContentHealthAnalyzer::new(ContentHealthConfig::default())
            .with_sampler(&sampler)
            .analyze(&schema, &counts);
        assert!(analysis
            .issues
            .iter()
            .any(|i| i.id == "content_health:incomplete:article"));
    }

    #[test]
    fn sampler_flags_mostly_unlocalized_models() {
        let sampler = FixedSampler(ContentSample {
            sampled: 10,
            localized: 2,
            complete: 10,
        });
        let counts = EntryCounts::empty().with("Article", 0, 10);
        let schema = Schema::new(
            vec![ModelType::model(
                "Article",
                vec![Field::scalar("title", "String")],
            )],
            vec![],
            vec![],
        );
        let analysis = ContentHealthAnalyzer::new(ContentHealthConfig::default())
            .with_sampler(&sampler)
            .analyze(&schema, &counts);
        let issue = analysis
            .issues
            .iter()
            .find(|i| i.id == "content_health:unlocalized:article")
            .expect("unlocalized issue");
        assert_eq!(issue.severity, Severity::Info);
        assert!(!analysis
            .issues
            .iter()
            .any(|i| i.id == "content_health:incomplete:article"));
        // Informational only.
        assert_eq!(analysis.score, 100.0);
    }

    #[test]
    fn sampler_failure_degrades_to_a_note() {
        let counts = EntryCounts::empty().with("Article", 10, 0);
        let schema = Schema::new(
            vec![ModelType::model(
                "Article",
                vec![Field::scalar("title", "String")],
            )],
            vec![],
            vec![],
        );
        let analysis = ContentHealthAnalyzer::new(ContentHealthConfig::default())
            .with_sampler(&FailingSampler)
            .analyze(&schema, &counts);
        assert_eq!(analysis.notes.len(), 1);
        assert!(analysis.notes[0].contains("unreachable-api"));
        // Count-based checks still ran; the model has drafts only.
        assert!(analysis
            .issues
            .iter()
            .any(|i| i.id == "content_health:draft-only:article"));
    }
}
