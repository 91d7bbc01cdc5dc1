//! dag.rs
//! Wraps the node set in a petgraph DAG for hierarchy queries.
//!
//! Edges point input -> consumer, so "downstream" follows the direction of
//! causal effect. The graph is rebuilt wholesale from every query response;
//! there is no incremental mutation.

use std::collections::{HashMap, HashSet, VecDeque};

use petgraph::graph::DiGraph;
use petgraph::Direction;
use smallvec::SmallVec;

use crate::computation::aggregate;
use crate::model::Node;

/// A unique, response-scoped identifier for a node within the graph.
///
/// Type alias for `petgraph::graph::NodeIndex` to abstract the underlying
/// graph implementation. Stable only until the next rebuild.
pub type GraphId = petgraph::graph::NodeIndex;

pub use self::error::GraphError;
mod error {
    use thiserror::Error;

    #[derive(Error, Debug, Clone, PartialEq, Eq)]
    pub enum GraphError {
        #[error("dependency cycle involving node '{node_id}'")]
        CycleDetected { node_id: String },
    }
}

#[derive(Debug, Default)]
pub struct OutcomeGraph {
    graph: DiGraph<Node, ()>,
    by_id: HashMap<String, GraphId>,
    /// (consumer id, referenced id) pairs whose target is not in the
    /// loaded set. Tolerated at build time; surfaced by the validator.
    dangling: Vec<(String, String)>,
}

impl OutcomeGraph {
    /// Builds the hierarchy from a flat node list.
    ///
    /// Unknown input references are recorded, not rejected: queries load
    /// subgraphs, and links out of the loaded set are routine. Duplicate
    /// ids keep the first occurrence.
    pub fn build(nodes: Vec<Node>) -> Self {
        let mut graph = DiGraph::with_capacity(nodes.len(), nodes.len() * 2);
        let mut by_id = HashMap::with_capacity(nodes.len());

        for node in nodes {
            let external_id = node.id.clone();
            if by_id.contains_key(&external_id) {
                log::warn!("duplicate node id '{}', keeping the first", external_id);
                continue;
            }
            let gid = graph.add_node(node);
            by_id.insert(external_id, gid);
        }

        // Wire edges in a second pass so forward references resolve.
        let mut edges = Vec::new();
        let mut dangling = Vec::new();
        for gid in graph.node_indices() {
            let consumer = &graph[gid];
            for input in &consumer.input_nodes {
                match by_id.get(&input.id) {
                    Some(&src) => edges.push((src, gid)),
                    None => dangling.push((consumer.id.clone(), input.id.clone())),
                }
            }
        }
        for (src, dst) in edges {
            graph.update_edge(src, dst, ());
        }

        Self { graph, by_id, dangling }
    }

    pub fn len(&self) -> usize {
        self.graph.node_count()
    }

    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }

    pub fn id_of(&self, external_id: &str) -> Option<GraphId> {
        self.by_id.get(external_id).copied()
    }

    pub fn get(&self, external_id: &str) -> Option<&Node> {
        self.id_of(external_id).map(|gid| &self.graph[gid])
    }

    pub fn node(&self, gid: GraphId) -> &Node {
        &self.graph[gid]
    }

    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.graph.node_indices().map(|gid| &self.graph[gid])
    }

    pub fn node_ids(&self) -> impl Iterator<Item = GraphId> + '_ {
        self.graph.node_indices()
    }

    /// Input references that resolved to no loaded node.
    pub fn dangling_inputs(&self) -> &[(String, String)] {
        &self.dangling
    }

    // --- Traversal ---

    /// Topological order (inputs before consumers), or the cycle that
    /// prevents one.
    pub fn topological_order(&self) -> Result<Vec<GraphId>, GraphError> {
        petgraph::algo::toposort(&self.graph, None).map_err(|cycle| GraphError::CycleDetected {
            node_id: self.graph[cycle.node_id()].id.clone(),
        })
    }

    /// Every node reachable by following causal effect away from the
    /// start nodes (the start nodes included).
    pub fn downstream_of(&self, start: &[GraphId]) -> HashSet<GraphId> {
        self.reachable(start, Direction::Outgoing)
    }

    /// Every node feeding (directly or transitively) into the start nodes.
    pub fn upstream_of(&self, start: &[GraphId]) -> HashSet<GraphId> {
        self.reachable(start, Direction::Incoming)
    }

    fn reachable(&self, start: &[GraphId], direction: Direction) -> HashSet<GraphId> {
        let mut visited = HashSet::new();
        let mut queue: VecDeque<GraphId> = start.iter().copied().collect();
        while let Some(gid) = queue.pop_front() {
            if visited.insert(gid) {
                queue.extend(self.graph.neighbors_directed(gid, direction));
            }
        }
        visited
    }

    // --- Card-set selection ---

    /// The direct inputs of a node that are loaded, in declaration order
    /// without repeats. Actions are excluded when `outcomes_only` is set:
    /// the drill-down deck shows the outcome decomposition, not the levers.
    fn resolved_inputs(&self, gid: GraphId, outcomes_only: bool) -> SmallVec<[GraphId; 4]> {
        let mut inputs: SmallVec<[GraphId; 4]> = SmallVec::new();
        for input in &self.graph[gid].input_nodes {
            if let Some(&src) = self.by_id.get(&input.id) {
                if outcomes_only && self.graph[src].is_action {
                    continue;
                }
                if !inputs.contains(&src) {
                    inputs.push(src);
                }
            }
        }
        inputs
    }

    /// The drill-down cards under a root outcome: its loaded non-action
    /// inputs, ordered by explicit weight and then by latest measured
    /// value, largest first.
    pub fn card_nodes(&self, root: GraphId) -> Vec<GraphId> {
        let mut cards: Vec<GraphId> = self.resolved_inputs(root, true).into_vec();
        self.order_by_metric(&mut cards);
        cards
    }

    /// Second-level decomposition: the cards of each card.
    pub fn sub_nodes(&self, card: GraphId) -> Vec<GraphId> {
        self.card_nodes(card)
    }

    /// Input ids of a node referencing nodes outside the loaded set.
    pub fn detached_inputs(&self, gid: GraphId) -> Vec<&str> {
        let consumer_id = &self.graph[gid].id;
        self.dangling
            .iter()
            .filter(|(consumer, _)| consumer == consumer_id)
            .map(|(_, missing)| missing.as_str())
            .collect()
    }

    /// Sorts by the explicit order weight ascending, ties broken by the
    /// latest historical value descending (big emitters first).
    pub fn order_by_metric(&self, ids: &mut [GraphId]) {
        ids.sort_by(|&a, &b| {
            let (na, nb) = (&self.graph[a], &self.graph[b]);
            na.order_weight().cmp(&nb.order_weight()).then_with(|| {
                let va = last_measured(na);
                let vb = last_measured(nb);
                vb.partial_cmp(&va).unwrap_or(std::cmp::Ordering::Equal)
            })
        });
    }

    /// Convenience wrapper resolving ids to nodes.
    pub fn resolve<'a>(&'a self, ids: &[GraphId]) -> Vec<&'a Node> {
        ids.iter().map(|&gid| &self.graph[gid]).collect()
    }
}

fn last_measured(node: &Node) -> f64 {
    node.metric
        .as_ref()
        .and_then(|m| m.latest_historical())
        .and_then(|p| p.value)
        .unwrap_or(0.0)
}

/// Outcome total across a resolved card set at one year.
pub fn card_total(graph: &OutcomeGraph, cards: &[GraphId], year: i32) -> f64 {
    aggregate::outcome_total(&graph.resolve(cards), year)
}
