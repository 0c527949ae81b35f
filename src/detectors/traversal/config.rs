//! Configuration for bounded relation-graph traversal.

use serde::{Deserialize, Serialize};

use crate::core::errors::{AuditError, Result};

/// Hard resource caps for the deep-nesting path search.
///
/// Every cap is a fixed constant rather than a function of schema size,
/// matching the audited platform's behavior. Hitting any cap truncates the
/// affected search branch deterministically; it never errors.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TraversalConfig {
    /// Maximum models per path (search stops extending at this length)
    pub max_depth: usize,
    /// Minimum models per path for a path to be reported
    pub min_report_depth: usize,
    /// Maximum BFS frontier size per start model
    pub max_frontier: usize,
    /// Maximum recorded paths per start model
    pub max_paths_per_start: usize,
    /// Maximum recorded paths across all start models
    pub max_total_paths: usize,
    /// Maximum findings kept in the final report
    pub report_limit: usize,
}

impl Default for TraversalConfig {
    fn default() -> Self {
        Self {
            max_depth: 6,
            min_report_depth: 5,
            max_frontier: 1000,
            max_paths_per_start: 50,
            max_total_paths: 500,
            report_limit: 10,
        }
    }
}

impl TraversalConfig {
    /// Validate cap consistency.
    pub fn validate(&self) -> Result<()> {
        if self.max_depth < 2 {
            return Err(AuditError::config_field(
                "max_depth must be at least 2",
                "traversal.max_depth",
            ));
        }
        if self.min_report_depth > self.max_depth {
            return Err(AuditError::config_field(
                "min_report_depth cannot exceed max_depth",
                "traversal.min_report_depth",
            ));
        }
        if self.max_frontier == 0 || self.max_total_paths == 0 {
            return Err(AuditError::config_field(
                "traversal caps must be positive",
                "traversal",
            ));
        }
        Ok(())
    }
}
