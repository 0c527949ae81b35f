//! Aggregate audit configuration.
//!
//! Every threshold an analyzer consults lives in an explicit config struct
//! injected at construction time, so tests can override thresholds
//! deterministically. Detector-specific structs live next to their detectors;
//! this module aggregates them with the analyzer thresholds and scoring
//! weights into one [`AuditConfig`].

use serde::{Deserialize, Serialize};

use crate::core::errors::Result;
use crate::core::scoring::AuditCategory;
use crate::detectors::duplicates::DuplicateConfig;
use crate::detectors::relationships::RelationshipConfig;
use crate::detectors::traversal::TraversalConfig;

/// Thresholds for the model-structure analyzer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StructureConfig {
    /// Field count at which a model draws a warning
    pub warn_field_count: usize,
    /// Field count at which a model is an issue
    pub issue_field_count: usize,
    /// Penalty per moderately oversized model
    pub oversized_warn_penalty: f64,
    /// Penalty per severely oversized model
    pub oversized_issue_penalty: f64,
    /// Penalty per deep-nesting chain
    pub deep_path_penalty: f64,
    /// Score floor for this dimension; deep schemas should alarm, not zero out
    pub floor: f64,
}

impl Default for StructureConfig {
    fn default() -> Self {
        Self {
            warn_field_count: 25,
            issue_field_count: 40,
            oversized_warn_penalty: 4.0,
            oversized_issue_penalty: 8.0,
            deep_path_penalty: 10.0,
            floor: 20.0,
        }
    }
}

/// Thresholds for the enumeration analyzer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnumAuditConfig {
    /// Value count at which an enum draws a warning
    pub oversized_value_count: usize,
    /// Minimum usage count for a tenancy enum to be critical
    pub tenancy_min_refs: usize,
    /// Penalty per tenancy enum
    pub tenancy_penalty: f64,
    /// Penalty per oversized enum
    pub oversized_penalty: f64,
}

impl Default for EnumAuditConfig {
    fn default() -> Self {
        Self {
            oversized_value_count: 20,
            tenancy_min_refs: 2,
            tenancy_penalty: 15.0,
            oversized_penalty: 5.0,
        }
    }
}

/// Thresholds for the component analyzer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComponentAuditConfig {
    /// Penalty per component no model embeds
    pub unused_penalty: f64,
    /// Penalty per component used by exactly one model
    pub single_use_penalty: f64,
    /// Field count at which a page-like model with no components is flagged
    pub monolith_field_count: usize,
    /// Penalty per monolithic page-like model
    pub monolith_penalty: f64,
}

impl Default for ComponentAuditConfig {
    fn default() -> Self {
        Self {
            unused_penalty: 4.0,
            single_use_penalty: 1.0,
            monolith_field_count: 15,
            monolith_penalty: 3.0,
        }
    }
}

/// Thresholds for the content-health analyzer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentHealthConfig {
    /// Penalty per model with zero entries
    pub empty_model_penalty: f64,
    /// Penalty per model whose entries are all drafts
    pub draft_only_penalty: f64,
    /// Score floor for this dimension
    pub floor: f64,
}

impl Default for ContentHealthConfig {
    fn default() -> Self {
        Self {
            empty_model_penalty: 4.0,
            draft_only_penalty: 2.0,
            floor: 20.0,
        }
    }
}

/// Fixed per-category weights for the overall score.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoringWeights {
    /// Weight of the model-structure dimension
    pub structure: f64,
    /// Weight of the duplication dimension
    pub duplication: f64,
    /// Weight of the relationships dimension
    pub relationships: f64,
    /// Weight of the enumerations dimension
    pub enums: f64,
    /// Weight of the components dimension
    pub components: f64,
    /// Weight of the content-health dimension
    pub content_health: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            structure: 0.25,
            duplication: 0.20,
            relationships: 0.20,
            enums: 0.15,
            components: 0.10,
            content_health: 0.10,
        }
    }
}

impl ScoringWeights {
    /// Weight assigned to the given audit category.
    pub fn weight_for(&self, category: AuditCategory) -> f64 {
        match category {
            AuditCategory::Structure => self.structure,
            AuditCategory::Duplication => self.duplication,
            AuditCategory::Relationships => self.relationships,
            AuditCategory::Enums => self.enums,
            AuditCategory::Components => self.components,
            AuditCategory::ContentHealth => self.content_health,
        }
    }
}

/// Complete audit configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AuditConfig {
    /// Traversal caps
    pub traversal: TraversalConfig,
    /// Duplicate detection thresholds
    pub duplicates: DuplicateConfig,
    /// Relationship graph thresholds
    pub relationships: RelationshipConfig,
    /// Model-structure thresholds
    pub structure: StructureConfig,
    /// Enumeration thresholds
    pub enums: EnumAuditConfig,
    /// Component thresholds
    pub components: ComponentAuditConfig,
    /// Content-health thresholds
    pub content_health: ContentHealthConfig,
    /// Overall score weights
    pub weights: ScoringWeights,
}

impl AuditConfig {
    /// Validate threshold consistency across all sections.
    pub fn validate(&self) -> Result<()> {
        self.traversal.validate()?;
        for (name, weight) in [
            ("weights.structure", self.weights.structure),
            ("weights.duplication", self.weights.duplication),
            ("weights.relationships", self.weights.relationships),
            ("weights.enums", self.weights.enums),
            ("weights.components", self.weights.components),
            ("weights.content_health", self.weights.content_health),
        ] {
            if weight < 0.0 {
                return Err(crate::core::errors::AuditError::config_field(
                    "weights must be non-negative",
                    name,
                ));
            }
        }
        if self.structure.warn_field_count > self.structure.issue_field_count {
            return Err(crate::core::errors::AuditError::config_field(
                "warn_field_count cannot exceed issue_field_count",
                "structure.warn_field_count",
            ));
        }
        Ok(())
    }

    /// Load a configuration from YAML.
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize the configuration to YAML.
    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_validates() {
        assert!(AuditConfig::default().validate().is_ok());
    }

    #[test]
    fn negative_weight_is_rejected() {
        let mut config = AuditConfig::default();
        config.weights.enums = -0.5;
        assert!(config.validate().is_err());
    }

    #[test]
    fn yaml_round_trip_preserves_overrides() {
        let mut config = AuditConfig::default();
        config.traversal.max_depth = 4;
        config.traversal.min_report_depth = 3;
        config.duplicates.model_threshold = 0.9;

        let yaml = config.to_yaml().unwrap();
        let restored = AuditConfig::from_yaml_str(&yaml).unwrap();
        assert_eq!(restored.traversal.max_depth, 4);
        assert!((restored.duplicates.model_threshold - 0.9).abs() < f64::EPSILON);
    }

    #[test]
    fn partial_yaml_fills_missing_sections_with_defaults() {
        let yaml = "structure:\n  warn_field_count: 30\n  issue_field_count: 50\n  oversized_warn_penalty: 4.0\n  oversized_issue_penalty: 8.0\n  deep_path_penalty: 10.0\n  floor: 20.0\n";
        let config = AuditConfig::from_yaml_str(yaml).unwrap();
        assert_eq!(config.structure.warn_field_count, 30);
        assert_eq!(config.traversal.max_depth, 6);
    }
}
