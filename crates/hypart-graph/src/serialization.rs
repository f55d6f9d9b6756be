use hypart_core::errors::{ErrorInfo, HypartError};
use hypart_core::{HyperedgeWeight, Hypergraph, HypernodeId, HypernodeWeight, PartitionId};
use serde::{Deserialize, Serialize};

use crate::hypergraph::IncidenceHypergraph;

/// Serializes the graph to a compact binary representation using `bincode`.
pub fn graph_to_bytes(graph: &IncidenceHypergraph) -> Result<Vec<u8>, HypartError> {
    let serializable = SerializableGraph::from_graph(graph)?;
    bincode::serialize(&serializable)
        .map_err(|err| HypartError::Serde(ErrorInfo::new("serialize-bytes", err.to_string())))
}

/// Restores a graph from its binary representation.
pub fn graph_from_bytes(bytes: &[u8]) -> Result<IncidenceHypergraph, HypartError> {
    let serializable: SerializableGraph = bincode::deserialize(bytes)
        .map_err(|err| HypartError::Serde(ErrorInfo::new("deserialize-bytes", err.to_string())))?;
    serializable.into_graph()
}

/// Serializes the graph to a JSON string.
pub fn graph_to_json(graph: &IncidenceHypergraph) -> Result<String, HypartError> {
    let serializable = SerializableGraph::from_graph(graph)?;
    serde_json::to_string_pretty(&serializable)
        .map_err(|err| HypartError::Serde(ErrorInfo::new("serialize-json", err.to_string())))
}

/// Restores a graph from a JSON string.
pub fn graph_from_json(json: &str) -> Result<IncidenceHypergraph, HypartError> {
    let serializable: SerializableGraph = serde_json::from_str(json)
        .map_err(|err| HypartError::Serde(ErrorInfo::new("deserialize-json", err.to_string())))?;
    serializable.into_graph()
}

#[derive(Debug, Serialize, Deserialize)]
struct SerializableGraph {
    nodes: Vec<SerializableNode>,
    edges: Vec<SerializableEdge>,
}

impl SerializableGraph {
    fn from_graph(graph: &IncidenceHypergraph) -> Result<Self, HypartError> {
        // Snapshots capture the finest level only; a partially coarsened
        // graph has live undo state that the snapshot format cannot carry.
        if graph.current_num_nodes() != graph.initial_num_nodes() {
            return Err(HypartError::Serde(
                ErrorInfo::new(
                    "snapshot-coarsened",
                    "cannot snapshot a partially coarsened graph",
                )
                .with_hint("uncoarsen back to the finest level before serializing"),
            ));
        }
        let nodes = graph
            .node_payloads()
            .into_iter()
            .map(|(weight, part, fixed)| SerializableNode {
                weight,
                part: part.map(|block| block.as_raw()),
                fixed: fixed.map(|block| block.as_raw()),
            })
            .collect();
        let edges = graph
            .edge_payloads()
            .into_iter()
            .map(|(weight, pins)| SerializableEdge {
                weight,
                pins: pins.iter().map(|pin| pin.as_raw()).collect(),
            })
            .collect();
        Ok(Self { nodes, edges })
    }

    fn into_graph(self) -> Result<IncidenceHypergraph, HypartError> {
        let mut graph = IncidenceHypergraph::new();
        for node in self.nodes {
            let id = match node.fixed {
                Some(block) => graph.add_fixed_node(node.weight, PartitionId::from_raw(block)),
                None => graph.add_node(node.weight),
            };
            graph.set_part_id(id, node.part.map(PartitionId::from_raw));
        }
        for edge in self.edges {
            let pins: Vec<HypernodeId> =
                edge.pins.into_iter().map(HypernodeId::from_raw).collect();
            graph.add_hyperedge(edge.weight, &pins)?;
        }
        Ok(graph)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct SerializableNode {
    weight: HypernodeWeight,
    part: Option<u32>,
    fixed: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct SerializableEdge {
    weight: HyperedgeWeight,
    pins: Vec<u64>,
}
