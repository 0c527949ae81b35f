//! Configuration for structural-similarity duplicate detection.

use serde::{Deserialize, Serialize};

/// Field names present on nearly every type, excluded before any overlap
/// comparison so they cannot inflate similarity.
pub const UNIVERSAL_FIELDS: &[&str] = &[
    "id",
    "createdAt",
    "updatedAt",
    "publishedAt",
    "slug",
    "title",
    "name",
    "description",
    "internalName",
];

/// Thresholds for duplicate detection, per type kind.
///
/// The defaults reproduce the audited platform's behavior: enums group on
/// looser overlap than components, which group looser than models, because a
/// model merge is the most expensive consolidation to recommend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DuplicateConfig {
    /// Minimum overlap ratio for model grouping
    pub model_threshold: f64,
    /// Minimum number of shared meaningful fields for model grouping
    pub model_min_shared: usize,
    /// Models with fewer total fields than this are excluded entirely
    pub model_min_fields: usize,
    /// Minimum overlap ratio for component grouping
    pub component_threshold: f64,
    /// Minimum number of shared fields for component grouping
    pub component_min_shared: usize,
    /// Minimum overlap ratio for enum value-set grouping
    pub enum_threshold: f64,
    /// Minimum number of shared values for enum grouping
    pub enum_min_shared: usize,
    /// Minimum stem length for the version-suffix rule
    pub version_stem_min_len: usize,
}

impl Default for DuplicateConfig {
    fn default() -> Self {
        Self {
            model_threshold: 0.7,
            model_min_shared: 5,
            model_min_fields: 5,
            component_threshold: 0.6,
            component_min_shared: 3,
            enum_threshold: 0.5,
            enum_min_shared: 3,
            version_stem_min_len: 3,
        }
    }
}

impl DuplicateConfig {
    /// Whether a field name belongs to the universal exclusion set.
    pub fn is_universal_field(name: &str) -> bool {
        UNIVERSAL_FIELDS
            .iter()
            .any(|u| u.eq_ignore_ascii_case(name))
    }
}
