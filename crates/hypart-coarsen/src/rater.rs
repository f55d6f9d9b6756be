use std::marker::PhantomData;

use hypart_core::errors::{ErrorInfo, HypartError};
use hypart_core::rng::RngHandle;
use hypart_core::{
    ClusterId, CoarseningConfig, Hypergraph, HypernodeId, HypernodeWeight, RatingValue,
};

use crate::acceptance::{AcceptancePolicy, BestRatingPreferringUnmatched, RandomWins};
use crate::community::{CommunityDetector, CommunityReport};
use crate::constraints::{
    CommunityPolicy, FixedVertexPolicy, PartitionPolicy, PreserveFixedBlocks, SamePartition,
    UseCommunities,
};
use crate::determinism;
use crate::ds::{FastResetBitvec, ScoreAccumulator};
use crate::penalty::{HeavyNodePenaltyPolicy, MultiplicativePenalty};
use crate::score::{HeavyEdgeScore, ScorePolicy};

/// Outcome of rating one vertex.
///
/// Invalid ratings carry the sentinel target and `f64::MIN` as value;
/// callers check `valid` before contracting. Not `Clone`: a rating is
/// consumed by the one contraction decision it informs.
#[derive(Debug)]
pub struct Rating {
    /// Best contraction partner found, or [`HypernodeId::INVALID`].
    pub target: HypernodeId,
    /// Normalized score of the best partner.
    pub value: RatingValue,
    /// Whether any admissible partner exists.
    pub valid: bool,
}

impl Rating {
    /// The rating returned when no admissible partner exists.
    pub fn invalid() -> Self {
        Self {
            target: HypernodeId::INVALID,
            value: RatingValue::MIN,
            valid: false,
        }
    }
}

/// Rating contract consumed by the coarsening driver.
pub trait Rater<H: Hypergraph> {
    /// Rates the given enabled vertex against its neighborhood.
    fn rate(&mut self, hg: &H, node: HypernodeId) -> Rating;

    /// Records that the vertex was paired during the current pass.
    fn mark_as_matched(&mut self, node: HypernodeId);

    /// Forgets all matches. Called at the start of every pass.
    fn reset_matches(&mut self);

    /// Hard cap on the summed weight of an admissible pair.
    fn threshold_node_weight(&self) -> HypernodeWeight;
}

/// Heavy-edge vertex-pair rater composed from static policies.
///
/// For a vertex `u`, walks the pins of every non-degenerate incident edge
/// and accumulates the edge score onto each co-pin that passes the weight
/// threshold and the partition policy. Candidates are then scanned in
/// reverse discovery order, normalized by the penalty policy, filtered by
/// the community and fixed-vertex policies, and arbitrated by the
/// acceptance policy.
pub struct VertexPairRater<
    H,
    S = HeavyEdgeScore,
    P = MultiplicativePenalty,
    C = UseCommunities,
    R = SamePartition,
    A = BestRatingPreferringUnmatched<RandomWins>,
    F = PreserveFixedBlocks,
> {
    communities: Vec<ClusterId>,
    community_report: CommunityReport,
    scores: ScoreAccumulator,
    matched: FastResetBitvec,
    rng: RngHandle,
    max_allowed_node_weight: HypernodeWeight,
    _marker: PhantomData<(H, S, P, C, R, A, F)>,
}

/// The default policy composition of the multilevel pipeline.
pub type StandardRater<H> = VertexPairRater<H>;

impl<H, S, P, C, R, A, F> VertexPairRater<H, S, P, C, R, A, F>
where
    H: Hypergraph,
    S: ScorePolicy,
    P: HeavyNodePenaltyPolicy,
    C: CommunityPolicy,
    R: PartitionPolicy,
    A: AcceptancePolicy,
    F: FixedVertexPolicy,
{
    /// Builds a rater over the finest level of `hg`.
    ///
    /// Runs the community detector once when community structure is
    /// enabled; a disabled detector leaves every vertex in one community.
    /// Scratch structures are sized to the full vertex range, so the rater
    /// stays valid across all coarsening levels of the same graph.
    pub fn new<D>(
        hg: &H,
        config: &CoarseningConfig,
        detector: &mut D,
    ) -> Result<Self, HypartError>
    where
        D: CommunityDetector<H>,
    {
        let (communities, community_report) = if config.community.enabled {
            let assignment = detector.detect(hg, config)?;
            if assignment.labels.len() != hg.initial_num_nodes() {
                return Err(HypartError::Community(
                    ErrorInfo::new(
                        "community-label-length",
                        "detector labeled a different vertex range than the graph",
                    )
                    .with_context("expected", hg.initial_num_nodes().to_string())
                    .with_context("actual", assignment.labels.len().to_string()),
                ));
            }
            (assignment.labels, assignment.report)
        } else {
            (
                vec![ClusterId::from_raw(0); hg.initial_num_nodes()],
                CommunityReport::single(),
            )
        };
        Ok(Self {
            communities,
            community_report,
            scores: ScoreAccumulator::with_capacity(hg.initial_num_nodes()),
            matched: FastResetBitvec::new(hg.initial_num_nodes()),
            rng: RngHandle::from_seed(determinism::tie_break_seed(config.seed.master_seed)),
            max_allowed_node_weight: config.max_allowed_node_weight,
            _marker: PhantomData,
        })
    }

    /// Diagnostics of the community preprocessing step.
    pub fn community_report(&self) -> &CommunityReport {
        &self.community_report
    }

    fn below_threshold(&self, weight_u: HypernodeWeight, weight_v: HypernodeWeight) -> bool {
        weight_u + weight_v <= self.max_allowed_node_weight
    }
}

impl<H, S, P, C, R, A, F> Rater<H> for VertexPairRater<H, S, P, C, R, A, F>
where
    H: Hypergraph,
    S: ScorePolicy,
    P: HeavyNodePenaltyPolicy,
    C: CommunityPolicy,
    R: PartitionPolicy,
    A: AcceptancePolicy,
    F: FixedVertexPolicy,
{
    fn rate(&mut self, hg: &H, node: HypernodeId) -> Rating {
        let weight_u = hg.node_weight(node);
        let part_u = hg.part_id(node);
        for &edge in hg.incident_edges(node) {
            let size = hg.edge_size(edge);
            // Contraction can shrink edges to a single pin; they carry no
            // pairing information.
            if size <= 1 {
                continue;
            }
            let score = S::score(hg.edge_weight(edge), size);
            for &pin in hg.pins(edge) {
                if pin != node
                    && self.below_threshold(weight_u, hg.node_weight(pin))
                    && R::accept(part_u, hg.part_id(pin))
                {
                    self.scores.add(pin, score);
                }
            }
        }

        let mut best_value = RatingValue::MIN;
        let mut best_target = HypernodeId::INVALID;
        for (candidate, raw_score) in self.scores.iter_rev() {
            let value = raw_score / P::penalty(weight_u, hg.node_weight(candidate));
            if C::same_community(&self.communities, node, candidate)
                && A::accept_rating(
                    value,
                    best_value,
                    best_target,
                    candidate,
                    &self.matched,
                    &mut self.rng,
                )
                && F::accept(hg, node, candidate)
            {
                best_value = value;
                best_target = candidate;
            }
        }
        self.scores.clear();

        if best_target == HypernodeId::INVALID {
            return Rating::invalid();
        }
        Rating {
            target: best_target,
            value: best_value,
            valid: true,
        }
    }

    fn mark_as_matched(&mut self, node: HypernodeId) {
        self.matched.set(node.as_raw() as usize);
    }

    fn reset_matches(&mut self) {
        self.matched.reset();
    }

    fn threshold_node_weight(&self) -> HypernodeWeight {
        self.max_allowed_node_weight
    }
}
