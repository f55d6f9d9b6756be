use std::collections::BTreeSet;

use hypart_core::{
    errors::{ErrorInfo, HypartError},
    ContractionMemento, HyperedgeId, HyperedgeWeight, Hypergraph, HypernodeId, HypernodeWeight,
    PartitionId,
};

use crate::ids::{edge_index, make_edge, make_node, node_index};

#[derive(Debug, Clone)]
pub(crate) struct NodeRecord {
    enabled: bool,
    weight: HypernodeWeight,
    part: Option<PartitionId>,
    fixed: Option<PartitionId>,
    incident: Vec<HyperedgeId>,
}

impl NodeRecord {
    fn new(weight: HypernodeWeight, fixed: Option<PartitionId>) -> Self {
        Self {
            enabled: true,
            weight,
            part: None,
            fixed,
            incident: Vec::new(),
        }
    }
}

#[derive(Debug, Clone)]
pub(crate) struct EdgeRecord {
    weight: HyperedgeWeight,
    pins: Vec<HypernodeId>,
}

/// Vec-backed undirected weighted hypergraph with reversible contractions.
///
/// Contracting a pair `(u, v)` merges `v` into `u` without freeing any
/// storage: `v` keeps its weight and incidence list as the undo log, and
/// the returned [`ContractionMemento`] records how far `u`'s incidence list
/// reached before the merge. Uncontracting mementos in reverse order of
/// contraction restores the structure exactly, up to pin order within an
/// edge (pin lists are sets).
#[derive(Debug, Clone)]
pub struct IncidenceHypergraph {
    nodes: Vec<NodeRecord>,
    edges: Vec<EdgeRecord>,
    num_enabled: usize,
}

impl IncidenceHypergraph {
    /// Creates an empty hypergraph.
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            edges: Vec::new(),
            num_enabled: 0,
        }
    }

    /// Adds a free vertex with the given weight and returns its id.
    pub fn add_node(&mut self, weight: HypernodeWeight) -> HypernodeId {
        let id = make_node(self.nodes.len());
        self.nodes.push(NodeRecord::new(weight, None));
        self.num_enabled += 1;
        id
    }

    /// Adds a vertex pinned to a fixed partition block and returns its id.
    pub fn add_fixed_node(&mut self, weight: HypernodeWeight, block: PartitionId) -> HypernodeId {
        let id = make_node(self.nodes.len());
        self.nodes.push(NodeRecord::new(weight, Some(block)));
        self.num_enabled += 1;
        id
    }

    /// Adds a hyperedge connecting the given pins.
    ///
    /// Pins must be known, enabled and pairwise distinct. Parallel edges
    /// are allowed; the pin list is stored as given (order is not
    /// semantic).
    pub fn add_hyperedge(
        &mut self,
        weight: HyperedgeWeight,
        pins: &[HypernodeId],
    ) -> Result<HyperedgeId, HypartError> {
        if pins.is_empty() {
            return Err(graph_error(
                "empty-pins",
                "hyperedges require at least one pin",
            ));
        }
        let mut seen = BTreeSet::new();
        for pin in pins {
            self.node(*pin)?;
            if !seen.insert(*pin) {
                return Err(graph_error("duplicate-pin", "hyperedge pins must be distinct")
                    .with_context("node", pin.as_raw()));
            }
        }
        let id = make_edge(self.edges.len());
        for pin in pins {
            self.node_mut(*pin)?.incident.push(id);
        }
        self.edges.push(EdgeRecord {
            weight,
            pins: pins.to_vec(),
        });
        Ok(id)
    }

    /// Returns the ids of all enabled vertices in index order.
    pub(crate) fn node_ids(&self) -> Vec<HypernodeId> {
        self.nodes
            .iter()
            .enumerate()
            .filter(|(_, node)| node.enabled)
            .map(|(idx, _)| make_node(idx))
            .collect()
    }

    /// Returns the stored node payloads in index order.
    pub(crate) fn node_payloads(
        &self,
    ) -> Vec<(HypernodeWeight, Option<PartitionId>, Option<PartitionId>)> {
        self.nodes
            .iter()
            .map(|node| (node.weight, node.part, node.fixed))
            .collect()
    }

    /// Returns the stored edge payloads in index order.
    pub(crate) fn edge_payloads(&self) -> Vec<(HyperedgeWeight, Vec<HypernodeId>)> {
        self.edges
            .iter()
            .map(|edge| (edge.weight, edge.pins.clone()))
            .collect()
    }

    pub(crate) fn node(&self, id: HypernodeId) -> Result<&NodeRecord, HypartError> {
        self.nodes
            .get(node_index(id))
            .filter(|record| record.enabled)
            .ok_or_else(|| {
                graph_error("unknown-node", "node does not exist").with_context("node", id.as_raw())
            })
    }

    pub(crate) fn node_mut(&mut self, id: HypernodeId) -> Result<&mut NodeRecord, HypartError> {
        self.nodes
            .get_mut(node_index(id))
            .filter(|record| record.enabled)
            .ok_or_else(|| {
                graph_error("unknown-node", "node does not exist").with_context("node", id.as_raw())
            })
    }
}

impl Default for IncidenceHypergraph {
    fn default() -> Self {
        Self::new()
    }
}

impl Hypergraph for IncidenceHypergraph {
    fn initial_num_nodes(&self) -> usize {
        self.nodes.len()
    }

    fn current_num_nodes(&self) -> usize {
        self.num_enabled
    }

    fn current_num_edges(&self) -> usize {
        self.edges.len()
    }

    fn nodes(&self) -> Box<dyn std::iter::ExactSizeIterator<Item = HypernodeId> + '_> {
        Box::new(self.node_ids().into_iter())
    }

    fn node_is_enabled(&self, node: HypernodeId) -> bool {
        self.nodes
            .get(node_index(node))
            .map_or(false, |record| record.enabled)
    }

    fn node_weight(&self, node: HypernodeId) -> HypernodeWeight {
        self.nodes[node_index(node)].weight
    }

    fn part_id(&self, node: HypernodeId) -> Option<PartitionId> {
        self.nodes[node_index(node)].part
    }

    fn set_part_id(&mut self, node: HypernodeId, part: Option<PartitionId>) {
        self.nodes[node_index(node)].part = part;
    }

    fn is_fixed(&self, node: HypernodeId) -> bool {
        self.nodes[node_index(node)].fixed.is_some()
    }

    fn fixed_part_id(&self, node: HypernodeId) -> Option<PartitionId> {
        self.nodes[node_index(node)].fixed
    }

    fn incident_edges(&self, node: HypernodeId) -> &[HyperedgeId] {
        &self.nodes[node_index(node)].incident
    }

    fn pins(&self, edge: HyperedgeId) -> &[HypernodeId] {
        &self.edges[edge_index(edge)].pins
    }

    fn edge_weight(&self, edge: HyperedgeId) -> HyperedgeWeight {
        self.edges[edge_index(edge)].weight
    }

    fn edge_size(&self, edge: HyperedgeId) -> usize {
        self.edges[edge_index(edge)].pins.len()
    }

    fn contract(
        &mut self,
        representative: HypernodeId,
        contracted: HypernodeId,
    ) -> ContractionMemento {
        assert_ne!(
            representative, contracted,
            "contraction requires two distinct vertices"
        );
        let u = node_index(representative);
        let v = node_index(contracted);
        assert!(self.nodes[u].enabled, "representative is disabled");
        assert!(self.nodes[v].enabled, "contracted vertex is disabled");
        assert_eq!(
            self.nodes[u].part, self.nodes[v].part,
            "contraction may not cross partition blocks"
        );
        if self.nodes[v].fixed.is_some() {
            assert_eq!(
                self.nodes[u].fixed, self.nodes[v].fixed,
                "fixed vertex absorbed by an incompatible representative"
            );
        }

        let rep_degree_before = self.nodes[u].incident.len();
        self.nodes[u].weight += self.nodes[v].weight;

        // v keeps its incidence list untouched; it is the undo log.
        let v_edges = self.nodes[v].incident.clone();
        for edge in v_edges {
            let idx = edge_index(edge);
            let pos = pin_position(&self.edges[idx].pins, contracted);
            if self.edges[idx].pins.contains(&representative) {
                self.edges[idx].pins.swap_remove(pos);
            } else {
                self.edges[idx].pins[pos] = representative;
                self.nodes[u].incident.push(edge);
            }
        }

        self.nodes[v].enabled = false;
        self.num_enabled -= 1;

        ContractionMemento {
            representative,
            contracted,
            rep_degree_before,
        }
    }

    fn uncontract(&mut self, memento: &ContractionMemento) {
        let u = node_index(memento.representative);
        let v = node_index(memento.contracted);
        assert!(self.nodes[u].enabled, "representative is disabled");
        assert!(
            !self.nodes[v].enabled,
            "memento does not match the contraction history"
        );
        assert!(
            self.nodes[u].incident.len() >= memento.rep_degree_before,
            "memento does not match the contraction history"
        );

        // Entries past the recorded length were transferred from v; give
        // their pin slots back before touching the shared edges.
        for pos in memento.rep_degree_before..self.nodes[u].incident.len() {
            let edge = self.nodes[u].incident[pos];
            let idx = edge_index(edge);
            let pin = pin_position(&self.edges[idx].pins, memento.representative);
            self.edges[idx].pins[pin] = memento.contracted;
        }
        self.nodes[u].incident.truncate(memento.rep_degree_before);

        let v_edges = self.nodes[v].incident.clone();
        for edge in v_edges {
            let idx = edge_index(edge);
            if !self.edges[idx].pins.contains(&memento.contracted) {
                self.edges[idx].pins.push(memento.contracted);
            }
        }

        let v_weight = self.nodes[v].weight;
        self.nodes[u].weight -= v_weight;
        self.nodes[v].part = self.nodes[u].part;
        self.nodes[v].enabled = true;
        self.num_enabled += 1;
    }
}

fn pin_position(pins: &[HypernodeId], node: HypernodeId) -> usize {
    match pins.iter().position(|pin| *pin == node) {
        Some(pos) => pos,
        None => panic!("pin list lost vertex {}", node.as_raw()),
    }
}

fn graph_error(code: impl Into<String>, message: impl Into<String>) -> HypartError {
    HypartError::Graph(ErrorInfo::new(code, message))
}

trait ContextExt {
    fn with_context(self, key: impl Into<String>, value: impl ToString) -> HypartError;
}

impl ContextExt for HypartError {
    fn with_context(self, key: impl Into<String>, value: impl ToString) -> HypartError {
        match self {
            HypartError::Graph(info) => {
                HypartError::Graph(info.with_context(key, value.to_string()))
            }
            other => other,
        }
    }
}
