use hypart_core::{HyperedgeId, HypernodeId};

/// Converts a [`HypernodeId`] into its underlying index within storage arrays.
pub(crate) fn node_index(id: HypernodeId) -> usize {
    id.as_raw() as usize
}

/// Converts a [`HyperedgeId`] into its underlying index within storage arrays.
pub(crate) fn edge_index(id: HyperedgeId) -> usize {
    id.as_raw() as usize
}

/// Creates a [`HypernodeId`] from an index.
pub(crate) fn make_node(index: usize) -> HypernodeId {
    HypernodeId::from_raw(index as u64)
}

/// Creates a [`HyperedgeId`] from an index.
pub(crate) fn make_edge(index: usize) -> HyperedgeId {
    HyperedgeId::from_raw(index as u64)
}
