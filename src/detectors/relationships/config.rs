//! Configuration for relationship graph construction.

use serde::{Deserialize, Serialize};

/// Thresholds controlling which types become graph nodes and how node
/// importance, hubs, and orphans are derived.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RelationshipConfig {
    /// Components referenced by at least this many models become nodes
    pub component_node_min_refs: usize,
    /// Enums referenced by at least this many types become nodes
    pub enum_node_min_refs: usize,
    /// Minimum combined in+out degree for hub classification
    pub hub_min_degree: usize,
    /// Maximum hubs reported, ranked by degree
    pub hub_top_n: usize,
    /// Models with fewer total entries than this count as negligible volume
    pub orphan_max_entries: u64,
    /// Reference in-degree at which a node counts as core
    pub core_min_in_degree: usize,
    /// Entry volume at which a node counts as core
    pub core_min_entries: u64,
}

impl Default for RelationshipConfig {
    fn default() -> Self {
        Self {
            component_node_min_refs: 2,
            enum_node_min_refs: 3,
            hub_min_degree: 3,
            hub_top_n: 5,
            orphan_max_entries: 10,
            core_min_in_degree: 3,
            core_min_entries: 100,
        }
    }
}
