use hypart_core::errors::HypartError;
use hypart_core::{Hypergraph, PartitionId};
use hypart_graph::{
    canonical_hash, graph_from_bytes, graph_from_json, graph_to_bytes, graph_to_json,
    IncidenceHypergraph,
};

fn fixture() -> IncidenceHypergraph {
    let mut graph = IncidenceHypergraph::new();
    let a = graph.add_node(2);
    let b = graph.add_node(1);
    let c = graph.add_fixed_node(4, PartitionId::from_raw(1));
    graph.set_part_id(a, Some(PartitionId::from_raw(0)));
    graph.add_hyperedge(3, &[a, b]).unwrap();
    graph.add_hyperedge(1, &[a, b, c]).unwrap();
    graph
}

#[test]
fn json_roundtrip_preserves_structure() {
    let graph = fixture();
    let json = graph_to_json(&graph).unwrap();
    let restored = graph_from_json(&json).unwrap();
    assert_eq!(canonical_hash(&restored), canonical_hash(&graph));
    assert_eq!(restored.initial_num_nodes(), 3);
    assert_eq!(restored.current_num_edges(), 2);
}

#[test]
fn bytes_roundtrip_preserves_structure() {
    let graph = fixture();
    let bytes = graph_to_bytes(&graph).unwrap();
    let restored = graph_from_bytes(&bytes).unwrap();
    assert_eq!(canonical_hash(&restored), canonical_hash(&graph));
}

#[test]
fn coarsened_graph_refuses_to_snapshot() {
    let mut graph = IncidenceHypergraph::new();
    let a = graph.add_node(1);
    let b = graph.add_node(1);
    graph.add_hyperedge(1, &[a, b]).unwrap();
    graph.contract(a, b);

    let err = graph_to_json(&graph).unwrap_err();
    match err {
        HypartError::Serde(info) => assert_eq!(info.code, "snapshot-coarsened"),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn malformed_json_surfaces_serde_error() {
    let err = graph_from_json("{not json").unwrap_err();
    match err {
        HypartError::Serde(info) => assert_eq!(info.code, "deserialize-json"),
        other => panic!("unexpected error: {other:?}"),
    }
}
