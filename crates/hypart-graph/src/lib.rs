#![deny(missing_docs)]

//! Undirected weighted hypergraph storage with reversible vertex-pair
//! contractions, implementing the `hypart-core` contracts.

mod generators;
mod hash;
mod hypergraph;
mod ids;
mod serialization;

pub use generators::gen_uniform;
pub use hash::canonical_hash;
pub use hypergraph::IncidenceHypergraph;

/// Re-export serialization helpers for downstream crates.
pub use serialization::{graph_from_bytes, graph_from_json, graph_to_bytes, graph_to_json};
