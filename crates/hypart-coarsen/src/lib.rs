#![deny(missing_docs)]

//! Multilevel hypergraph coarsening engine: heavy-edge vertex-pair ratings,
//! pass-based contraction and LIFO uncoarsening with pluggable refinement.

/// Rating acceptance and tie-breaking policies.
pub mod acceptance;
/// Pass-based contraction driver and uncoarsening.
pub mod coarsener;
/// Community detection collaborator surface.
pub mod community;
/// Community, partition and fixed-vertex admissibility policies.
pub mod constraints;
/// Deterministic seed derivation helpers.
pub mod determinism;
/// Scratch data structures sized to the finest level.
pub mod ds;
/// Vertex weight penalty policies.
pub mod penalty;
/// Vertex-pair rating engine.
pub mod rater;
/// Refinement collaborator surface.
pub mod refine;
/// Per-hyperedge scoring policies.
pub mod score;

pub use acceptance::{
    AcceptancePolicy, BestRatingPreferringUnmatched, BestRatingWithTieBreaking, FirstWins,
    LastWins, RandomWins, TieBreakingPolicy,
};
pub use coarsener::{CoarseningReport, LevelState, MultilevelCoarsener};
pub use community::{CommunityAssignment, CommunityDetector, CommunityReport, SingleCommunity};
pub use constraints::{
    AnyPartition, CommunityPolicy, FixedVertexPolicy, IgnoreCommunities, NoFixedVertices,
    PartitionPolicy, PreserveFixedBlocks, SamePartition, UseCommunities,
};
pub use ds::FastResetBitvec;
pub use penalty::{HeavyNodePenaltyPolicy, MultiplicativePenalty, NoWeightPenalty};
pub use rater::{Rater, Rating, StandardRater, VertexPairRater};
pub use refine::{NoOpRefiner, Refiner};
pub use score::{HeavyEdgeScore, ScorePolicy};
