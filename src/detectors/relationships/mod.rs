//! Renderable relationship graph derived from the schema.
//!
//! Builds the node/edge/cluster projection consumed by the report: nodes for
//! all models plus significant components and enums, edges for references and
//! component usage with bidirectional pairs collapsed, importance tags per
//! node, domain-archetype clusters, ranked hub nodes, and orphan models.

pub mod config;
pub use config::RelationshipConfig;

use std::collections::HashMap;

use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::Direction;
use serde::{Deserialize, Serialize};

use crate::api::results::{AuditIssue, DimensionAnalysis, Effort};
use crate::core::patterns::{is_generated_wrapper, MatchContext, PatternCategory, PatternRegistry};
use crate::core::schema::{Directionality, EntryCounts, Schema};
use crate::core::scoring::{AuditCategory, CheckpointResult, ScoreCard, Severity};
use crate::detectors::traversal::CycleDetector;

/// What kind of schema type a graph node represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    /// Content model
    Model,
    /// Embeddable component
    Component,
    /// Enumeration
    Enum,
}

/// Architectural importance of a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeImportance {
    /// Central content types with volume or heavy referencing
    Core,
    /// Regular supporting types
    Supporting,
    /// Configuration/styling types
    Config,
    /// Technical helpers and wrappers
    Utility,
}

/// What a graph edge represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EdgeKind {
    /// Model-to-model reference
    Reference,
    /// Model embedding a component
    ComponentUsage,
    /// Type using an enumeration as a field type
    EnumUsage,
}

/// One node of the rendered relationship graph.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RelationshipNode {
    /// Type name
    pub name: String,
    /// Node kind
    pub kind: NodeKind,
    /// Architectural importance tag
    pub importance: NodeImportance,
    /// Total entry volume (zero for components/enums)
    pub entry_total: u64,
    /// Incoming edge count
    pub in_degree: usize,
    /// Outgoing edge count
    pub out_degree: usize,
    /// Cluster membership, when the node matched a domain archetype
    pub cluster: Option<String>,
}

/// One edge of the rendered relationship graph.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RelationshipEdge {
    /// Source node name
    pub from: String,
    /// Target node name
    pub to: String,
    /// Field carrying the relation (first such field when collapsed)
    pub via_field: String,
    /// Edge kind
    pub kind: EdgeKind,
    /// Whether a reverse relation was collapsed into this edge
    pub bidirectional: bool,
}

/// A named cluster of nodes matching a domain archetype.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RelationshipCluster {
    /// Archetype label (content, taxonomy, people, e-commerce, ...)
    pub name: String,
    /// Member node names, sorted
    pub members: Vec<String>,
}

/// A node with unusually high combined degree.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HubNode {
    /// Node name
    pub name: String,
    /// Incoming edge count
    pub in_degree: usize,
    /// Outgoing edge count
    pub out_degree: usize,
}

impl HubNode {
    /// Combined degree used for ranking.
    pub fn degree(&self) -> usize {
        self.in_degree + self.out_degree
    }
}

/// The full rendering projection of the schema's relationships.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RelationshipGraph {
    /// Graph nodes
    pub nodes: Vec<RelationshipNode>,
    /// Graph edges, bidirectional pairs collapsed
    pub edges: Vec<RelationshipEdge>,
    /// Domain-archetype clusters with at least two members
    pub clusters: Vec<RelationshipCluster>,
    /// Ranked hub nodes, highest degree first
    pub hubs: Vec<HubNode>,
    /// Models with no connections and negligible content volume
    pub orphans: Vec<String>,
}

/// Builds [`RelationshipGraph`] values from a schema and entry counts.
pub struct RelationshipGraphBuilder {
    config: RelationshipConfig,
}

impl RelationshipGraphBuilder {
    /// Create a builder with the given thresholds.
    pub fn new(config: RelationshipConfig) -> Self {
        Self { config }
    }

    /// Build the rendering projection.
    pub fn build(&self, schema: &Schema, counts: &EntryCounts) -> RelationshipGraph {
        let registry = PatternRegistry::global();
        let component_usage = schema.component_usage();
        let enum_usage = schema.enum_usage();

        // Node selection: all models; components referenced by >= N models;
        // enums that are architecturally meaningful or widely referenced.
        let mut node_names: Vec<(String, NodeKind)> = schema
            .models()
            .map(|m| (m.name.clone(), NodeKind::Model))
            .collect();
        for component in schema.components() {
            let refs = component_usage.get(&component.name).copied().unwrap_or(0);
            if refs >= self.config.component_node_min_refs {
                node_names.push((component.name.clone(), NodeKind::Component));
            }
        }
        for e in schema.enums() {
            let refs = enum_usage.get(&e.name).copied().unwrap_or(0);
            let context = MatchContext::with_values(&e.values);
            let meaningful = matches!(
                registry.classify_with(&e.name, &context),
                Some(
                    PatternCategory::Taxonomy
                        | PatternCategory::Tenancy
                        | PatternCategory::Status
                )
            );
            if meaningful || refs >= self.config.enum_node_min_refs {
                node_names.push((e.name.clone(), NodeKind::Enum));
            }
        }

        let has_node = |name: &str| node_names.iter().any(|(n, _)| n == name);

        // Directed edge set over selected nodes, used for degrees; the
        // rendered edge list collapses bidirectional pairs afterwards.
        let mut directed: Vec<RelationshipEdge> = Vec::new();
        for edge in schema.relation_edges() {
            if !has_node(&edge.from_model) || !has_node(&edge.to_target) {
                continue;
            }
            let kind = if schema.component_by_name(&edge.to_target).is_some() {
                EdgeKind::ComponentUsage
            } else {
                EdgeKind::Reference
            };
            directed.push(RelationshipEdge {
                from: edge.from_model,
                to: edge.to_target,
                via_field: edge.via_field,
                kind,
                bidirectional: edge.directionality == Directionality::Bidirectional,
            });
        }
        for owner in schema.models().chain(schema.components()) {
            if !has_node(&owner.name) {
                continue;
            }
            for field in &owner.fields {
                if schema.enum_by_name(&field.type_name).is_some() && has_node(&field.type_name) {
                    directed.push(RelationshipEdge {
                        from: owner.name.clone(),
                        to: field.type_name.clone(),
                        via_field: field.name.clone(),
                        kind: EdgeKind::EnumUsage,
                        bidirectional: false,
                    });
                }
            }
        }

        let (in_degrees, out_degrees) = degrees(&node_names, &directed);

        let nodes: Vec<RelationshipNode> = node_names
            .iter()
            .map(|(name, kind)| {
                let entry_total = match kind {
                    NodeKind::Model => counts.total(name),
                    _ => 0,
                };
                let in_degree = in_degrees.get(name.as_str()).copied().unwrap_or(0);
                let out_degree = out_degrees.get(name.as_str()).copied().unwrap_or(0);
                let importance =
                    self.importance_of(registry, name, entry_total, in_degree);
                let cluster = cluster_archetype(registry.classify(name)).map(str::to_string);
                RelationshipNode {
                    name: name.clone(),
                    kind: *kind,
                    importance,
                    entry_total,
                    in_degree,
                    out_degree,
                    cluster,
                }
            })
            .collect();

        let edges = collapse_bidirectional(directed);
        let clusters = build_clusters(&nodes);
        let hubs = self.rank_hubs(&nodes);
        let orphans = self.find_orphans(&nodes);

        RelationshipGraph {
            nodes,
            edges,
            clusters,
            hubs,
            orphans,
        }
    }

    /// Importance classification: utility and config name patterns trump the
    /// volume/in-degree core heuristics.
    fn importance_of(
        &self,
        registry: &PatternRegistry,
        name: &str,
        entry_total: u64,
        in_degree: usize,
    ) -> NodeImportance {
        if is_generated_wrapper(name) {
            return NodeImportance::Utility;
        }
        match registry.classify(name) {
            Some(PatternCategory::Utility) => NodeImportance::Utility,
            Some(
                PatternCategory::Configuration
                | PatternCategory::Styling
                | PatternCategory::Layout
                | PatternCategory::Seo,
            ) => NodeImportance::Config,
            classified => {
                if in_degree >= self.config.core_min_in_degree
                    || entry_total >= self.config.core_min_entries
                    || matches!(
                        classified,
                        Some(PatternCategory::Content | PatternCategory::Commerce)
                    )
                {
                    NodeImportance::Core
                } else {
                    NodeImportance::Supporting
                }
            }
        }
    }

    fn rank_hubs(&self, nodes: &[RelationshipNode]) -> Vec<HubNode> {
        let mut hubs: Vec<HubNode> = nodes
            .iter()
            .filter(|n| n.in_degree + n.out_degree >= self.config.hub_min_degree)
            .map(|n| HubNode {
                name: n.name.clone(),
                in_degree: n.in_degree,
                out_degree: n.out_degree,
            })
            .collect();
        hubs.sort_by(|a, b| b.degree().cmp(&a.degree()).then_with(|| a.name.cmp(&b.name)));
        hubs.truncate(self.config.hub_top_n);
        hubs
    }

    fn find_orphans(&self, nodes: &[RelationshipNode]) -> Vec<String> {
        let mut orphans: Vec<String> = nodes
            .iter()
            .filter(|n| {
                n.kind == NodeKind::Model
                    && n.in_degree + n.out_degree == 0
                    && n.entry_total < self.config.orphan_max_entries
            })
            .map(|n| n.name.clone())
            .collect();
        orphans.sort();
        orphans
    }
}

/// Compute in/out degrees over the directed edge set.
fn degrees<'a>(
    node_names: &'a [(String, NodeKind)],
    directed: &'a [RelationshipEdge],
) -> (HashMap<&'a str, usize>, HashMap<&'a str, usize>) {
    let mut graph: DiGraph<&str, ()> = DiGraph::new();
    let mut indices: HashMap<&str, NodeIndex> = HashMap::new();
    for (name, _) in node_names {
        indices.insert(name.as_str(), graph.add_node(name.as_str()));
    }
    for edge in directed {
        if let (Some(&from), Some(&to)) =
            (indices.get(edge.from.as_str()), indices.get(edge.to.as_str()))
        {
            graph.add_edge(from, to, ());
        }
    }
    let mut ins = HashMap::new();
    let mut outs = HashMap::new();
    for (name, &idx) in &indices {
        ins.insert(*name, graph.edges_directed(idx, Direction::Incoming).count());
        outs.insert(*name, graph.edges_directed(idx, Direction::Outgoing).count());
    }
    (ins, outs)
}

/// Collapse bidirectional reference pairs into a single rendered edge.
fn collapse_bidirectional(directed: Vec<RelationshipEdge>) -> Vec<RelationshipEdge> {
    let mut collapsed: Vec<RelationshipEdge> = Vec::new();
    for edge in directed {
        if edge.bidirectional {
            // The first direction encountered wins; its reverse is dropped.
            let reverse_kept = collapsed
                .iter()
                .any(|e| e.bidirectional && e.from == edge.to && e.to == edge.from);
            if reverse_kept {
                continue;
            }
        }
        let duplicate = collapsed
            .iter()
            .any(|e| e.from == edge.from && e.to == edge.to && e.kind == edge.kind);
        if !duplicate {
            collapsed.push(edge);
        }
    }
    collapsed
}

/// Map a pattern category to its domain-archetype cluster label.
fn cluster_archetype(category: Option<PatternCategory>) -> Option<&'static str> {
    match category? {
        PatternCategory::Content | PatternCategory::Presentation => Some("content"),
        PatternCategory::Taxonomy => Some("taxonomy"),
        PatternCategory::People => Some("people"),
        PatternCategory::Commerce => Some("e-commerce"),
        PatternCategory::Configuration | PatternCategory::Styling | PatternCategory::Layout => {
            Some("configuration")
        }
        PatternCategory::Media => Some("media"),
        PatternCategory::Navigation => Some("navigation"),
        _ => None,
    }
}

/// Clusters with at least two members, sorted by name.
fn build_clusters(nodes: &[RelationshipNode]) -> Vec<RelationshipCluster> {
    let mut by_name: HashMap<&str, Vec<String>> = HashMap::new();
    for node in nodes {
        if let Some(cluster) = &node.cluster {
            by_name.entry(cluster.as_str()).or_default().push(node.name.clone());
        }
    }
    let mut clusters: Vec<RelationshipCluster> = by_name
        .into_iter()
        .filter(|(_, members)| members.len() >= 2)
        .map(|(name, mut members)| {
            members.sort();
            RelationshipCluster {
                name: name.to_string(),
                members,
            }
        })
        .collect();
    clusters.sort_by(|a, b| a.name.cmp(&b.name));
    clusters
}

/// Penalty per reference cycle.
const CYCLE_PENALTY: f64 = 6.0;
/// Penalty per overloaded hub node.
const HUB_PENALTY: f64 = 4.0;
/// Penalty per orphan model.
const ORPHAN_PENALTY: f64 = 2.0;

/// Analyzer for the relationships dimension.
///
/// Scores the graph projection plus the cycle scan; the graph itself is
/// attached to the report separately for rendering.
pub struct RelationshipAnalyzer {
    builder: RelationshipGraphBuilder,
}

impl RelationshipAnalyzer {
    /// Create the analyzer with graph thresholds.
    pub fn new(config: RelationshipConfig) -> Self {
        Self {
            builder: RelationshipGraphBuilder::new(config),
        }
    }

    /// Build the graph and fold it into a scored dimension.
    pub fn analyze(&self, schema: &Schema, counts: &EntryCounts) -> DimensionAnalysis {
        let graph = self.builder.build(schema, counts);
        self.score_graph(schema, &graph)
    }

    /// Score an already-built graph projection; callers that also render the
    /// graph build it once and pass it here.
    pub fn score_graph(&self, schema: &Schema, graph: &RelationshipGraph) -> DimensionAnalysis {
        let cycles = CycleDetector::cycles(schema);
        self.present(graph, &cycles)
    }

    /// Graph projection for report rendering.
    pub fn graph(&self, schema: &Schema, counts: &EntryCounts) -> RelationshipGraph {
        self.builder.build(schema, counts)
    }

    fn present(&self, graph: &RelationshipGraph, cycles: &[Vec<String>]) -> DimensionAnalysis {
        let mut card = ScoreCard::standard();
        let mut checkpoints = Vec::new();
        let mut issues = Vec::new();
        let mut recommendations = Vec::new();

        for members in cycles {
            let subject = members.join("+");
            card.add_detailed("reference cycle", -CYCLE_PENALTY, members.join(" -> "));
            issues.push(AuditIssue {
                id: AuditIssue::make_id(AuditCategory::Relationships, "cycle", &subject),
                severity: Severity::Warning,
                category: AuditCategory::Relationships,
                title: format!("Reference cycle through {}", members.join(", ")),
                description: format!("{} models reference each other in a loop", members.len()),
                impact: "Cycles defeat naive traversal and cascade invalidation".to_string(),
                recommendation: "Break the cycle by dropping one direction or introducing a join model"
                    .to_string(),
                affected_items: members.clone(),
                effort: Effort::Strategic,
                score_delta: Some(CYCLE_PENALTY),
            });
        }
        checkpoints.push(if cycles.is_empty() {
            CheckpointResult::good("No reference cycles")
        } else {
            CheckpointResult::issue("No reference cycles")
                .with_examples(cycles.iter().map(|c| c.join(" -> ")).collect())
        });

        for hub in &graph.hubs {
            card.add_detailed(
                "overloaded hub",
                -HUB_PENALTY,
                format!("{} (degree {})", hub.name, hub.degree()),
            );
            issues.push(AuditIssue {
                id: AuditIssue::make_id(AuditCategory::Relationships, "hub", &hub.name),
                severity: Severity::Warning,
                category: AuditCategory::Relationships,
                title: format!("{} connects to {} types", hub.name, hub.degree()),
                description: format!(
                    "{} has {} incoming and {} outgoing references",
                    hub.name, hub.in_degree, hub.out_degree
                ),
                impact: "Hub models become change bottlenecks; every team edits the same type"
                    .to_string(),
                recommendation: format!(
                    "Split {} responsibilities or invert some references",
                    hub.name
                ),
                affected_items: vec![hub.name.clone()],
                effort: Effort::Medium,
                score_delta: Some(HUB_PENALTY),
            });
        }
        checkpoints.push(if graph.hubs.is_empty() {
            CheckpointResult::good("Reference load is spread out")
        } else {
            CheckpointResult::warning("Reference load is spread out")
                .with_examples(graph.hubs.iter().map(|h| h.name.clone()).collect())
        });

        for name in &graph.orphans {
            card.add_detailed("orphan model", -ORPHAN_PENALTY, name.clone());
            issues.push(AuditIssue {
                id: AuditIssue::make_id(AuditCategory::Relationships, "orphan", name),
                severity: Severity::Info,
                category: AuditCategory::Relationships,
                title: format!("Model {name} is disconnected"),
                description: format!("{name} has no references and negligible content volume"),
                impact: "Disconnected low-volume models are usually abandoned experiments"
                    .to_string(),
                recommendation: format!("Link {name} into the graph or remove it"),
                affected_items: vec![name.clone()],
                effort: Effort::QuickWin,
                score_delta: Some(ORPHAN_PENALTY),
            });
        }
        checkpoints.push(if graph.orphans.is_empty() {
            CheckpointResult::good("No disconnected models")
        } else {
            CheckpointResult::warning("No disconnected models").with_examples(graph.orphans.clone())
        });

        // Informational only: heavy two-way linking is sometimes intentional,
        // so it never costs points.
        let bidirectional: Vec<String> = graph
            .edges
            .iter()
            .filter(|e| e.bidirectional)
            .map(|e| format!("{} <-> {}", e.from, e.to))
            .collect();
        if bidirectional.len() >= 3 && bidirectional.len() * 2 > graph.edges.len() {
            checkpoints.push(
                CheckpointResult::warning("Bidirectional relations are the exception")
                    .with_examples(bidirectional)
                    .with_actions(vec![
                        "Keep one canonical direction per relation where possible".to_string(),
                    ]),
            );
        }

        if !graph.hubs.is_empty() {
            recommendations.push(
                "Review hub models before the next schema change; they carry the most coupling"
                    .to_string(),
            );
        }

        let floor = card.floor();
        let base = card.base();
        let (score, breakdown) = card.finalize();
        DimensionAnalysis {
            category: AuditCategory::Relationships,
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
