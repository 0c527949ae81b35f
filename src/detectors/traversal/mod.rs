//! Bounded graph traversal for deep-nesting and circular-relation risk.
//!
//! Relation chains deeper than a safe query depth make every read against the
//! platform expensive; this module discovers them with a breadth-first search
//! that refuses to revisit a model within one path and stops early at hard
//! resource caps, guaranteeing termination on arbitrarily dense schemas.
//! Cycles are excluded from path findings and reported separately by
//! [`CycleDetector`].

pub mod config;
pub use config::TraversalConfig;

use std::collections::{HashMap, VecDeque};

use petgraph::algo::kosaraju_scc;
use petgraph::graph::{DiGraph, NodeIndex};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::schema::Schema;
use crate::core::scoring::Severity;

/// One relation chain exceeding the safe query-depth threshold.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeepNestingFinding {
    /// Ordered model names along the chain
    pub path: Vec<String>,
    /// Number of models in the chain
    pub depth: usize,
    /// Severity derived from depth
    pub severity: Severity,
    /// Suggested mitigation
    pub mitigation: String,
}

/// Outcome of the deep-nesting search.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DeepNestingReport {
    /// Qualifying chains, deepest first, truncated to the report limit
    pub findings: Vec<DeepNestingFinding>,
    /// Whether any resource cap cut a search branch short
    pub truncated: bool,
}

/// Bounded breadth-first deep-nesting path finder.
pub struct PathFinder {
    config: TraversalConfig,
}

impl PathFinder {
    /// Create a path finder with the given caps.
    pub fn new(config: TraversalConfig) -> Self {
        Self { config }
    }

    /// Search every model for relation chains deeper than the threshold.
    pub fn find_deep_paths(&self, schema: &Schema) -> DeepNestingReport {
        let adjacency = build_adjacency(schema);
        let mut recorded: Vec<Vec<String>> = Vec::new();
        let mut truncated = false;

        for start in schema.models() {
            if recorded.len() >= self.config.max_total_paths {
                truncated = true;
                break;
            }
            let (paths, hit_cap) = self.search_from(&start.name, &adjacency, recorded.len());
            truncated |= hit_cap;
            recorded.extend(paths);
        }

        // Exact-sequence dedup, then drop chains fully contained in a longer
        // recorded chain so one deep branch yields one finding.
        recorded.sort();
        recorded.dedup();
        let maximal: Vec<Vec<String>> = recorded
            .iter()
            .filter(|path| {
                !recorded
                    .iter()
                    .any(|other| other.len() > path.len() && contains_subsequence(other, path))
            })
            .cloned()
            .collect();

        let mut findings: Vec<DeepNestingFinding> = maximal
            .into_iter()
            .map(|path| self.finding_for(path))
            .collect();
        findings.sort_by(|a, b| {
            b.depth
                .cmp(&a.depth)
                .then_with(|| a.path.join(">").cmp(&b.path.join(">")))
        });
        findings.truncate(self.config.report_limit);

        DeepNestingReport { findings, truncated }
    }

    /// BFS over paths rooted at `start`; returns qualifying paths and whether
    /// a cap truncated the search.
    fn search_from(
        &self,
        start: &str,
        adjacency: &HashMap<String, Vec<String>>,
        total_so_far: usize,
    ) -> (Vec<Vec<String>>, bool) {
        let mut frontier: VecDeque<Vec<String>> = VecDeque::new();
        frontier.push_back(vec![start.to_string()]);
        let mut qualifying: Vec<Vec<String>> = Vec::new();
        let mut truncated = false;

        while let Some(path) = frontier.pop_front() {
            if qualifying.len() >= self.config.max_paths_per_start
                || total_so_far + qualifying.len() >= self.config.max_total_paths
            {
                debug!(start, "path cap reached, truncating search");
                truncated = true;
                break;
            }

            let last = path.last().expect("paths are never empty");
            let neighbors = adjacency.get(last).map(Vec::as_slice).unwrap_or_default();
            let mut extended = false;
            if path.len() < self.config.max_depth {
                for next in neighbors {
                    // Cycles are the cycle detector's job; never revisit.
                    if path.contains(next) {
                        continue;
                    }
                    if frontier.len() >= self.config.max_frontier {
                        debug!(start, "frontier cap reached, truncating search");
                        truncated = true;
                        break;
                    }
                    let mut longer = path.clone();
                    longer.push(next.clone());
                    frontier.push_back(longer);
                    extended = true;
                }
            }

            // A chain is recorded once it can no longer grow.
            if !extended && path.len() >= self.config.min_report_depth {
                qualifying.push(path);
            }
        }

        (qualifying, truncated)
    }

    fn finding_for(&self, path: Vec<String>) -> DeepNestingFinding {
        let depth = path.len();
        let severity = if depth >= 5 {
            Severity::Critical
        } else {
            Severity::Warning
        };
        let mitigation = if depth >= 5 {
            format!(
                "Denormalize: give {} a direct reference to {} so queries skip the intermediate hops",
                path[0],
                path[depth - 1]
            )
        } else {
            "Split the query with fragments and paginate the nested levels".to_string()
        };
        DeepNestingFinding {
            path,
            depth,
            severity,
            mitigation,
        }
    }
}

/// Detects circular relation chains over model/component reference edges.
///
/// Backed by strongly connected components, so a cycle reports exactly once
/// with the same membership regardless of which node the search would have
/// entered it from.
pub struct CycleDetector;

impl CycleDetector {
    /// All relation cycles in the schema, members sorted, cycles ordered by
    /// their first member.
    pub fn cycles(schema: &Schema) -> Vec<Vec<String>> {
        let mut graph: DiGraph<String, ()> = DiGraph::new();
        let mut indices: HashMap<String, NodeIndex> = HashMap::new();

        for edge in schema.relation_edges() {
            let from = *indices
                .entry(edge.from_model.clone())
                .or_insert_with_key(|name| graph.add_node(name.clone()));
            let to = *indices
                .entry(edge.to_target.clone())
                .or_insert_with_key(|name| graph.add_node(name.clone()));
            graph.add_edge(from, to, ());
        }

        let mut cycles: Vec<Vec<String>> = kosaraju_scc(&graph)
            .into_iter()
            .filter_map(|component| {
                if component.len() > 1 {
                    let mut members: Vec<String> = component
                        .into_iter()
                        .map(|idx| graph[idx].clone())
                        .collect();
                    members.sort();
                    Some(members)
                } else {
                    let idx = component[0];
                    graph
                        .find_edge(idx, idx)
                        .map(|_| vec![graph[idx].clone()])
                }
            })
            .collect();
        cycles.sort();
        cycles
    }
}

/// Build the adjacency map over resolvable relation edges.
fn build_adjacency(schema: &Schema) -> HashMap<String, Vec<String>> {
    let mut adjacency: HashMap<String, Vec<String>> = HashMap::new();
    for edge in schema.relation_edges() {
        let targets = adjacency.entry(edge.from_model).or_default();
        if !targets.contains(&edge.to_target) {
            targets.push(edge.to_target);
        }
    }
    // Deterministic neighbor expansion order.
    for targets in adjacency.values_mut() {
        targets.sort();
    }
    adjacency
}

/// Whether `haystack` contains `needle` as a contiguous subsequence.
fn contains_subsequence(haystack: &[String], needle: &[String]) -> bool {
    needle.len() <= haystack.len() && haystack.windows(needle.len()).any(|w| w == needle)
}
