use hypart_core::{Hypergraph, PartitionId};
use sha2::{Digest, Sha256};

use crate::hypergraph::IncidenceHypergraph;

/// Computes the canonical structural hash for the provided graph.
///
/// The hash covers the enabled vertices (id, weight, partition, fixed
/// block) and the multiset of edge signatures (weight plus sorted pin ids).
/// Two graphs hash equal exactly when they are structurally identical up to
/// pin order within an edge.
pub fn canonical_hash(graph: &IncidenceHypergraph) -> String {
    let mut hasher = Sha256::new();

    let nodes: Vec<_> = graph.nodes().collect();
    hasher.update((nodes.len() as u64).to_le_bytes());
    for node in nodes {
        hasher.update(node.as_raw().to_le_bytes());
        hasher.update(graph.node_weight(node).to_le_bytes());
        encode_block("part", graph.part_id(node), &mut hasher);
        encode_block("fixed", graph.fixed_part_id(node), &mut hasher);
    }

    let mut signatures: Vec<(u64, Vec<u64>)> = graph
        .edge_payloads()
        .into_iter()
        .map(|(weight, pins)| {
            let mut raw: Vec<u64> = pins.iter().map(|pin| pin.as_raw()).collect();
            raw.sort_unstable();
            (weight, raw)
        })
        .collect();
    signatures.sort();
    hasher.update((signatures.len() as u64).to_le_bytes());
    for (weight, pins) in signatures {
        hasher.update(weight.to_le_bytes());
        update_slice(&pins, &mut hasher);
    }

    format!("{:x}", hasher.finalize())
}

fn encode_block(label: &str, value: Option<PartitionId>, hasher: &mut Sha256) {
    match value {
        Some(block) => {
            hasher.update(label.as_bytes());
            hasher.update(b":some");
            hasher.update(block.as_raw().to_le_bytes());
        }
        None => {
            hasher.update(label.as_bytes());
            hasher.update(b":none");
        }
    }
}

fn update_slice(values: &[u64], hasher: &mut Sha256) {
    hasher.update((values.len() as u64).to_le_bytes());
    for value in values {
        hasher.update(value.to_le_bytes());
    }
}
