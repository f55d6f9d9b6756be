use hypart_core::{ClusterId, Hypergraph, HypernodeId, PartitionId};

/// Community admissibility check applied to every candidate target.
pub trait CommunityPolicy {
    /// Returns whether the two vertices may be contracted given the
    /// community labels of the finest level.
    fn same_community(labels: &[ClusterId], u: HypernodeId, v: HypernodeId) -> bool;
}

/// Contractions never cross community boundaries.
pub struct UseCommunities;

impl CommunityPolicy for UseCommunities {
    fn same_community(labels: &[ClusterId], u: HypernodeId, v: HypernodeId) -> bool {
        labels[u.as_raw() as usize] == labels[v.as_raw() as usize]
    }
}

/// Ignores community structure entirely.
pub struct IgnoreCommunities;

impl CommunityPolicy for IgnoreCommunities {
    fn same_community(_labels: &[ClusterId], _u: HypernodeId, _v: HypernodeId) -> bool {
        true
    }
}

/// Partition admissibility check applied while scores accumulate.
pub trait PartitionPolicy {
    /// Returns whether a vertex in `part_u` may absorb one in `part_v`.
    fn accept(part_u: Option<PartitionId>, part_v: Option<PartitionId>) -> bool;
}

/// Restricts contractions to pairs within the same block. Two unassigned
/// vertices count as being in the same block, so this is a no-op until a
/// partition exists.
pub struct SamePartition;

impl PartitionPolicy for SamePartition {
    fn accept(part_u: Option<PartitionId>, part_v: Option<PartitionId>) -> bool {
        part_u == part_v
    }
}

/// Ignores partition assignments. Only safe on unpartitioned graphs; the
/// storage refuses cross-block contractions.
pub struct AnyPartition;

impl PartitionPolicy for AnyPartition {
    fn accept(_part_u: Option<PartitionId>, _part_v: Option<PartitionId>) -> bool {
        true
    }
}

/// Fixed-vertex admissibility check applied to every candidate target.
pub trait FixedVertexPolicy {
    /// Returns whether `representative` may absorb `candidate`.
    fn accept<H: Hypergraph>(
        hg: &H,
        representative: HypernodeId,
        candidate: HypernodeId,
    ) -> bool;
}

/// Keeps fixed assignments intact: a free representative never absorbs a
/// fixed vertex, and two fixed vertices merge only within the same block.
pub struct PreserveFixedBlocks;

impl FixedVertexPolicy for PreserveFixedBlocks {
    fn accept<H: Hypergraph>(
        hg: &H,
        representative: HypernodeId,
        candidate: HypernodeId,
    ) -> bool {
        match (
            hg.fixed_part_id(representative),
            hg.fixed_part_id(candidate),
        ) {
            (_, None) => true,
            (Some(rep_block), Some(candidate_block)) => rep_block == candidate_block,
            (None, Some(_)) => false,
        }
    }
}

/// Skips the check for graphs known to carry no fixed vertices.
pub struct NoFixedVertices;

impl FixedVertexPolicy for NoFixedVertices {
    fn accept<H: Hypergraph>(
        _hg: &H,
        _representative: HypernodeId,
        _candidate: HypernodeId,
    ) -> bool {
        true
    }
}
