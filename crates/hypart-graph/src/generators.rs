use hypart_core::errors::{ErrorInfo, HypartError};
use hypart_core::rng::RngHandle;
use hypart_core::{HypernodeId, HypernodeWeight};
use rand::seq::SliceRandom;
use rand::Rng;

use crate::hypergraph::IncidenceHypergraph;

/// Generates a random hypergraph with deterministic randomness.
///
/// Vertices draw weights uniformly from `1..=max_node_weight`; every edge
/// carries weight 1 and connects between 2 and `max_edge_size` distinct
/// vertices. A graph with fewer than two vertices gets no edges.
pub fn gen_uniform(
    n_nodes: usize,
    n_edges: usize,
    max_edge_size: usize,
    max_node_weight: HypernodeWeight,
    rng: &mut RngHandle,
) -> Result<IncidenceHypergraph, HypartError> {
    if n_nodes == 0 {
        return Err(HypartError::Graph(ErrorInfo::new(
            "empty-graph",
            "generator requires at least one vertex",
        )));
    }
    let mut graph = IncidenceHypergraph::new();
    let weight_cap = max_node_weight.max(1);
    let nodes: Vec<HypernodeId> = (0..n_nodes)
        .map(|_| graph.add_node(rng.gen_range(1..=weight_cap)))
        .collect();
    if n_nodes < 2 {
        return Ok(graph);
    }
    let size_cap = max_edge_size.clamp(2, n_nodes);
    for _ in 0..n_edges {
        let size = rng.gen_range(2..=size_cap);
        let pins = sample_subset(&nodes, size, rng);
        graph.add_hyperedge(1, &pins)?;
    }
    Ok(graph)
}

fn sample_subset(nodes: &[HypernodeId], count: usize, rng: &mut RngHandle) -> Vec<HypernodeId> {
    let mut buffer: Vec<HypernodeId> = nodes.to_vec();
    buffer.shuffle(rng);
    buffer.truncate(count.min(buffer.len()));
    buffer.sort_by_key(|id| id.as_raw());
    buffer
}
