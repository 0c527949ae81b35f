//! Structural-similarity duplicate detection.
//!
//! Partitions the schema's models, components, and enum value sets into
//! zero-or-more [`DuplicateGroup`]s. Two rules apply to models: a name-based
//! version-suffix rule (`Product` / `ProductV2`) that groups regardless of
//! field similarity, and a field-overlap rule for everything else. Grouping
//! is greedy with single assignment: once a type merges into a group it is
//! never compared again, so no type belongs to two groups of the same kind.
//!
//! Candidates are canonically sorted by name before the greedy pass, which
//! makes group membership independent of introspection order.

pub mod analysis;
pub mod config;

pub use analysis::DuplicationAnalyzer;
pub use config::{DuplicateConfig, UNIVERSAL_FIELDS};

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::patterns::is_generated_wrapper;
use crate::core::schema::{ModelType, Schema};

/// Which kind of schema type a duplicate group covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicateKind {
    /// Content models
    Models,
    /// Embeddable components
    Components,
    /// Enumeration value sets
    Enums,
}

impl DuplicateKind {
    /// Stable lowercase label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Models => "models",
            Self::Components => "components",
            Self::Enums => "enums",
        }
    }
}

/// Which rule produced a duplicate group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GroupingReason {
    /// Members share a large fraction of meaningful fields/values
    FieldOverlap,
    /// Members share a name stem plus a trailing version suffix
    VersionSuffix,
}

/// A group of probably-duplicate types with its evidence.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DuplicateGroup {
    /// Kind of types grouped
    pub kind: DuplicateKind,
    /// Rule that formed the group
    pub reason: GroupingReason,
    /// Member type names, canonically ordered
    pub members: Vec<String>,
    /// Similarity ratio scaled to 0-100
    pub similarity: f64,
    /// Attributes (fields or values) shared by every member
    pub shared_attributes: Vec<String>,
    /// Consolidation recommendation
    pub recommendation: String,
}

/// Structural duplicate detector over one schema.
pub struct DuplicateDetector {
    config: DuplicateConfig,
}

impl DuplicateDetector {
    /// Create a detector with the given thresholds.
    pub fn new(config: DuplicateConfig) -> Self {
        Self { config }
    }

    /// Run all three detection kinds against the schema.
    pub fn detect(&self, schema: &Schema) -> Vec<DuplicateGroup> {
        let mut groups = self.detect_model_groups(schema);
        groups.extend(self.detect_component_groups(schema));
        groups.extend(self.detect_enum_groups(schema));
        groups
    }

    /// Detect duplicate models: version-suffix groups first, then the
    /// field-overlap pass over whatever remains.
    pub fn detect_model_groups(&self, schema: &Schema) -> Vec<DuplicateGroup> {
        let mut candidates: Vec<&ModelType> =
            schema.models().filter(|m| !m.is_system).collect();
        candidates.sort_by(|a, b| a.name.cmp(&b.name));

        let mut groups = self.version_suffix_groups(&candidates);
        let versioned: BTreeSet<&str> = groups
            .iter()
            .flat_map(|g| g.members.iter().map(String::as_str))
            .collect();

        let field_candidates: Vec<&ModelType> = candidates
            .iter()
            .filter(|m| {
                m.fields.len() >= self.config.model_min_fields
                    && !versioned.contains(m.name.as_str())
            })
            .copied()
            .collect();

        groups.extend(self.overlap_groups(
            &field_candidates,
            DuplicateKind::Models,
            self.config.model_threshold,
            self.config.model_min_shared,
        ));
        groups
    }

    /// Detect near-identical components by field overlap.
    ///
    /// Platform-generated embed/union wrappers are filtered before
    /// comparison; they would otherwise dominate every group.
    pub fn detect_component_groups(&self, schema: &Schema) -> Vec<DuplicateGroup> {
        let mut candidates: Vec<&ModelType> = schema
            .components()
            .filter(|c| !c.is_system && !is_generated_wrapper(&c.name))
            .collect();
        candidates.sort_by(|a, b| a.name.cmp(&b.name));

        self.overlap_groups(
            &candidates,
            DuplicateKind::Components,
            self.config.component_threshold,
            self.config.component_min_shared,
        )
    }

    /// Detect enums with heavily overlapping value sets.
    pub fn detect_enum_groups(&self, schema: &Schema) -> Vec<DuplicateGroup> {
        let mut candidates: Vec<(&str, BTreeSet<&str>)> = schema
            .enums()
            .map(|e| {
                (
                    e.name.as_str(),
                    e.values.iter().map(String::as_str).collect(),
                )
            })
            .collect();
        candidates.sort_by(|a, b| a.0.cmp(b.0));

        self.greedy_group(
            &candidates,
            DuplicateKind::Enums,
            GroupingReason::FieldOverlap,
            self.config.enum_threshold,
            self.config.enum_min_shared,
            |members, shared| {
                format!(
                    "Unify enums {} into one shared enum; they agree on {} values",
                    members.join(", "),
                    shared.len()
                )
            },
        )
    }

    /// Form version-suffix groups over the (sorted) model candidates.
    fn version_suffix_groups(&self, candidates: &[&ModelType]) -> Vec<DuplicateGroup> {
        let mut by_stem: Vec<(String, Vec<&ModelType>)> = Vec::new();
        for model in candidates {
            let Some(stem) = strip_version_suffix(&model.name) else {
                continue;
            };
            if stem.len() < self.config.version_stem_min_len {
                continue;
            }
            match by_stem.iter_mut().find(|(s, _)| *s == stem) {
                Some((_, members)) => members.push(model),
                None => by_stem.push((stem, vec![model])),
            }
        }

        let mut groups = Vec::new();
        // Membership is single-assignment: a name that carries a version
        // marker itself (Product2) can surface both as a member of its own
        // stem's group and as the base of a longer stem (Product2V2), so an
        // earlier group's claim wins.
        let mut claimed: BTreeSet<&str> = BTreeSet::new();
        for (stem, members) in by_stem {
            let mut members: Vec<_> = members
                .into_iter()
                .filter(|m| !claimed.contains(m.name.as_str()))
                .collect();
            // The unsuffixed base model joins its versioned successors.
            if let Some(base) = candidates
                .iter()
                .find(|m| m.name == stem && !claimed.contains(m.name.as_str()))
            {
                members.insert(0, base);
            }
            if members.len() < 2 {
                continue;
            }
            members.sort_by(|a, b| a.name.cmp(&b.name));
            for member in &members {
                claimed.insert(member.name.as_str());
            }

            let sets: Vec<(&str, BTreeSet<&str>)> =
                members.iter().map(|m| (m.name.as_str(), meaningful_fields(m))).collect();
            let (similarity, shared) = group_similarity(&sets);
            let member_names: Vec<String> = members.iter().map(|m| m.name.clone()).collect();
            debug!(stem = %stem, members = ?member_names, "version-suffix duplicate group");
            groups.push(DuplicateGroup {
                kind: DuplicateKind::Models,
                reason: GroupingReason::VersionSuffix,
                recommendation: format!(
                    "Consolidate versioned models {} into a single {} model with explicit versioning",
                    member_names.join(", "),
                    stem
                ),
                members: member_names,
                similarity,
                shared_attributes: shared,
            });
        }
        groups
    }

    /// Field-overlap grouping for models/components.
    fn overlap_groups(
        &self,
        candidates: &[&ModelType],
        kind: DuplicateKind,
        threshold: f64,
        min_shared: usize,
    ) -> Vec<DuplicateGroup> {
        let sets: Vec<(&str, BTreeSet<&str>)> = candidates
            .iter()
            .map(|m| (m.name.as_str(), meaningful_fields(m)))
            .filter(|(_, fields)| !fields.is_empty())
            .collect();
        let noun = match kind {
            DuplicateKind::Models => "models",
            DuplicateKind::Components => "components",
            DuplicateKind::Enums => "enums",
        };
        self.greedy_group(
            &sets,
            kind,
            GroupingReason::FieldOverlap,
            threshold,
            min_shared,
            |members, shared| {
                format!(
                    "Merge near-identical {} {} into one type; {} meaningful fields overlap",
                    noun,
                    members.join(", "),
                    shared.len()
                )
            },
        )
    }

    /// Greedy single-assignment grouping over named attribute sets.
    ///
    /// Group similarity is |attributes shared by ALL members| divided by the
    /// smallest member's set size (the pairwise floor), recomputed after
    /// every merge.
    fn greedy_group(
        &self,
        sets: &[(&str, BTreeSet<&str>)],
        kind: DuplicateKind,
        reason: GroupingReason,
        threshold: f64,
        min_shared: usize,
        recommend: impl Fn(&[String], &[String]) -> String,
    ) -> Vec<DuplicateGroup> {
        let mut consumed = vec![false; sets.len()];
        let mut groups = Vec::new();

        for i in 0..sets.len() {
            if consumed[i] {
                continue;
            }
            let mut member_idx = vec![i];
            let mut shared: BTreeSet<&str> = sets[i].1.clone();
            let mut min_size = sets[i].1.len();

            for (j, candidate) in sets.iter().enumerate().skip(i + 1) {
                if consumed[j] {
                    continue;
                }
                let next_shared: BTreeSet<&str> =
                    shared.intersection(&candidate.1).copied().collect();
                let next_min = min_size.min(candidate.1.len());
                if next_min == 0 {
                    continue;
                }
                let ratio = next_shared.len() as f64 / next_min as f64;
                if ratio >= threshold && next_shared.len() >= min_shared {
                    member_idx.push(j);
                    shared = next_shared;
                    min_size = next_min;
                }
            }

            if member_idx.len() < 2 {
                continue;
            }
            for &idx in &member_idx {
                consumed[idx] = true;
            }
            let members: Vec<String> =
                member_idx.iter().map(|&idx| sets[idx].0.to_string()).collect();
            let similarity = if min_size == 0 {
                0.0
            } else {
                (shared.len() as f64 / min_size as f64) * 100.0
            };
            let shared_attributes: Vec<String> = shared.iter().map(|s| s.to_string()).collect();
            debug!(kind = kind.label(), members = ?members, similarity, "field-overlap duplicate group");
            groups.push(DuplicateGroup {
                kind,
                reason,
                recommendation: recommend(&members, &shared_attributes),
                members,
                similarity,
                shared_attributes,
            });
        }
        groups
    }
}

/// Meaningful (non-universal) field names of a type.
fn meaningful_fields(model: &ModelType) -> BTreeSet<&str> {
    model
        .fields
        .iter()
        .map(|f| f.name.as_str())
        .filter(|name| !DuplicateConfig::is_universal_field(name))
        .collect()
}

/// Similarity of a full group: shared-by-all over smallest member size.
///
/// Members with no meaningful fields at all are treated as a perfect match;
/// version groups of skeleton models still deserve a strong signal.
fn group_similarity(sets: &[(&str, BTreeSet<&str>)]) -> (f64, Vec<String>) {
    let mut iter = sets.iter();
    let Some((_, first)) = iter.next() else {
        return (0.0, Vec::new());
    };
    let mut shared = first.clone();
    let mut min_size = first.len();
    for (_, set) in iter {
        shared = shared.intersection(set).copied().collect();
        min_size = min_size.min(set.len());
    }
    if min_size == 0 {
        return (100.0, Vec::new());
    }
    let similarity = (shared.len() as f64 / min_size as f64) * 100.0;
    (similarity, shared.iter().map(|s| s.to_string()).collect())
}

/// Strip a trailing version suffix from a type name.
///
/// Recognizes `Product2`, `ProductV2`, `Product_v2`, `ProductVersion2`;
/// returns the stem without the suffix, or `None` when the name carries no
/// version marker.
pub fn strip_version_suffix(name: &str) -> Option<String> {
    let digits_start = name
        .char_indices()
        .rev()
        .take_while(|(_, c)| c.is_ascii_digit())
        .map(|(i, _)| i)
        .last()?;
    if digits_start == 0 {
        return None;
    }
    let stem = &name[..digits_start];

    for marker in ["_version", "version", "_v", "-v"] {
        let lower = stem.to_lowercase();
        if lower.ends_with(marker) && stem.len() > marker.len() {
            return Some(stem[..stem.len() - marker.len()].to_string());
        }
    }
    // Bare "V" marker: "ProductV2" but not "TV2".
    if (stem.ends_with('V') || stem.ends_with('v')) && stem.len() > 1 {
        return Some(stem[..stem.len() - 1].to_string());
    }
    Some(stem.to_string())
}

#[cfg(test)]
mod tests;
