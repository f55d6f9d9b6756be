#![deny(missing_docs)]
#![doc = "Core identifiers, capability traits and configuration shared by the hypart crates."]

use std::iter::ExactSizeIterator;

use serde::{Deserialize, Serialize};

pub mod config;
pub mod errors;
pub mod rng;

pub use config::{CoarseningConfig, CommunityConfig, ReportingConfig, SeedPolicy};
pub use errors::{ErrorInfo, HypartError};
pub use rng::{derive_substream_seed, RngHandle};

/// Weight carried by a hypernode. Contractions sum weights.
pub type HypernodeWeight = u64;

/// Weight carried by a hyperedge.
pub type HyperedgeWeight = u64;

/// Numeric type of a contraction rating.
pub type RatingValue = f64;

/// Identifier for a vertex ("hypernode") of a [`Hypergraph`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct HypernodeId(u64);

impl HypernodeId {
    /// Reserved sentinel: never the id of a real vertex. Used as the target
    /// of an invalid rating.
    pub const INVALID: HypernodeId = HypernodeId(u64::MAX);

    /// Creates an identifier from its raw integer representation.
    pub fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    /// Returns the raw integer representation of the identifier.
    pub fn as_raw(&self) -> u64 {
        self.0
    }
}

/// Identifier for a hyperedge of a [`Hypergraph`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct HyperedgeId(u64);

impl HyperedgeId {
    /// Creates an identifier from its raw integer representation.
    pub fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    /// Returns the raw integer representation of the identifier.
    pub fn as_raw(&self) -> u64 {
        self.0
    }
}

/// Identifier of a partition block. Vertices start out unassigned
/// (`Option::<PartitionId>::None`); two unassigned vertices count as being
/// in the same block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PartitionId(u32);

impl PartitionId {
    /// Creates a block identifier from its raw integer representation.
    pub fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    /// Returns the raw integer representation of the block identifier.
    pub fn as_raw(&self) -> u32 {
        self.0
    }
}

/// Community label assigned to a vertex by a clustering preprocessing step.
/// Contractions never cross community boundaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ClusterId(u32);

impl ClusterId {
    /// Creates a community label from its raw integer representation.
    pub fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    /// Returns the raw integer representation of the label.
    pub fn as_raw(&self) -> u32 {
        self.0
    }
}

/// Undo record for one contraction.
///
/// `rep_degree_before` is the length of the representative's incidence list
/// at the moment the contraction started; every edge appended past that
/// index was transferred from the contracted vertex and must be rewritten
/// back on uncontraction. Together with the pair itself this is all the
/// state a storage needs to restore the previous level exactly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContractionMemento {
    /// The surviving vertex.
    pub representative: HypernodeId,
    /// The vertex absorbed into the representative.
    pub contracted: HypernodeId,
    /// Incidence-list length of the representative before the contraction.
    pub rep_degree_before: usize,
}

/// Storage contract consumed by the coarsening engine.
///
/// The engine never touches node or pin storage directly; everything it
/// needs from a hypergraph is behind this trait. Implementations must keep
/// `contract` and `uncontract` exactly inverse under LIFO discipline: after
/// uncontracting the most recent memento, every observable property
/// (weights, incidences, pin sets, partition ids, enabled flags) equals the
/// state before the corresponding contraction, except that both vertices of
/// the pair carry the representative's *current* partition id.
pub trait Hypergraph: Send + Sync {
    /// Total number of vertices ever created, enabled or not. Sizes the
    /// per-vertex scratch structures of the engine.
    fn initial_num_nodes(&self) -> usize;

    /// Number of currently enabled vertices.
    fn current_num_nodes(&self) -> usize;

    /// Number of currently enabled hyperedges.
    fn current_num_edges(&self) -> usize;

    /// Iterator over the ids of all enabled vertices.
    fn nodes(&self) -> Box<dyn ExactSizeIterator<Item = HypernodeId> + '_>;

    /// Returns whether the vertex is enabled (not contracted away).
    fn node_is_enabled(&self, node: HypernodeId) -> bool;

    /// Returns the weight of an enabled vertex.
    fn node_weight(&self, node: HypernodeId) -> HypernodeWeight;

    /// Returns the partition block of the vertex, `None` while unassigned.
    fn part_id(&self, node: HypernodeId) -> Option<PartitionId>;

    /// Assigns (or clears) the partition block of an enabled vertex.
    fn set_part_id(&mut self, node: HypernodeId, part: Option<PartitionId>);

    /// Returns whether the vertex is pinned to a fixed block.
    fn is_fixed(&self, node: HypernodeId) -> bool;

    /// Returns the fixed block of the vertex, `None` for free vertices.
    fn fixed_part_id(&self, node: HypernodeId) -> Option<PartitionId>;

    /// Hyperedges incident to an enabled vertex.
    fn incident_edges(&self, node: HypernodeId) -> &[HyperedgeId];

    /// Vertices connected by the hyperedge. Unordered; may shrink to a
    /// single pin through contraction.
    fn pins(&self, edge: HyperedgeId) -> &[HypernodeId];

    /// Returns the weight of the hyperedge.
    fn edge_weight(&self, edge: HyperedgeId) -> HyperedgeWeight;

    /// Number of pins of the hyperedge.
    fn edge_size(&self, edge: HyperedgeId) -> usize;

    /// Absorbs `contracted` into `representative`: sums weights, unifies
    /// incidence, disables `contracted`. Panics if the two ids are equal,
    /// either vertex is disabled, or their partition ids differ; such calls
    /// indicate a broken invariant upstream, not a recoverable condition.
    fn contract(
        &mut self,
        representative: HypernodeId,
        contracted: HypernodeId,
    ) -> ContractionMemento;

    /// Reverses the contraction described by `memento`. Callers must
    /// uncontract in strict reverse order of contraction; anything else is
    /// unsupported and panics or corrupts silently.
    fn uncontract(&mut self, memento: &ContractionMemento);
}
