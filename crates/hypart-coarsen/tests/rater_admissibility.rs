use hypart_coarsen::{
    AcceptancePolicy, BestRatingPreferringUnmatched, BestRatingWithTieBreaking,
    CommunityAssignment, CommunityDetector, CommunityReport, FastResetBitvec, FirstWins,
    HeavyEdgeScore, LastWins, MultiplicativePenalty, NoWeightPenalty, PreserveFixedBlocks, Rater,
    SamePartition, SingleCommunity, StandardRater, UseCommunities, VertexPairRater,
};
use hypart_core::rng::RngHandle;
use hypart_core::{
    ClusterId, CoarseningConfig, Hypergraph, HypartError, HypernodeId, PartitionId, RatingValue,
};
use hypart_graph::IncidenceHypergraph;

fn config_with_threshold(threshold: u64) -> CoarseningConfig {
    let mut config = CoarseningConfig::default();
    config.max_allowed_node_weight = threshold;
    config
}

#[test]
fn heavy_edge_scores_accumulate_across_shared_edges() {
    let mut graph = IncidenceHypergraph::new();
    let n0 = graph.add_node(1);
    let n1 = graph.add_node(1);
    let n2 = graph.add_node(1);
    graph.add_hyperedge(2, &[n0, n1]).unwrap();
    graph.add_hyperedge(3, &[n0, n1, n2]).unwrap();

    let config = CoarseningConfig::default();
    let mut rater = StandardRater::new(&graph, &config, &mut SingleCommunity).unwrap();

    // n1 collects 2/1 + 3/2, n2 only 3/2; unit weights leave scores raw.
    let rating = rater.rate(&graph, n0);
    assert!(rating.valid);
    assert_eq!(rating.target, n1);
    assert_eq!(rating.value, 3.5);
    assert_ne!(rating.target, n0);

    // No ties, so repeating the rating consumes no randomness.
    let again = rater.rate(&graph, n0);
    assert_eq!(again.target, rating.target);
    assert_eq!(again.value, rating.value);
}

#[test]
fn weight_threshold_is_a_hard_filter() {
    let mut graph = IncidenceHypergraph::new();
    let n0 = graph.add_node(5);
    let n1 = graph.add_node(6);
    let n2 = graph.add_node(1);
    graph.add_hyperedge(10, &[n0, n1]).unwrap();
    graph.add_hyperedge(1, &[n0, n2]).unwrap();

    let config = config_with_threshold(10);
    let mut rater = StandardRater::new(&graph, &config, &mut SingleCommunity).unwrap();
    assert_eq!(rater.threshold_node_weight(), 10);

    // 5 + 6 exceeds the cap, so the heavy edge never reaches the
    // accumulator and the light neighbor wins.
    let rating = rater.rate(&graph, n0);
    assert!(rating.valid);
    assert_eq!(rating.target, n2);
    assert_eq!(rating.value, 1.0 / 5.0);

    // With no admissible partner at all the rating is invalid.
    let rating = rater.rate(&graph, n1);
    assert!(!rating.valid);
    assert_eq!(rating.target, HypernodeId::INVALID);
    assert_eq!(rating.value, RatingValue::MIN);
}

#[test]
fn partition_filter_applies_while_accumulating() {
    let mut graph = IncidenceHypergraph::new();
    let n0 = graph.add_node(1);
    let n1 = graph.add_node(1);
    let n2 = graph.add_node(1);
    graph.add_hyperedge(5, &[n0, n1]).unwrap();
    graph.add_hyperedge(1, &[n0, n2]).unwrap();
    graph.set_part_id(n0, Some(PartitionId::from_raw(0)));
    graph.set_part_id(n1, Some(PartitionId::from_raw(1)));
    graph.set_part_id(n2, Some(PartitionId::from_raw(0)));

    let config = CoarseningConfig::default();
    let mut rater = StandardRater::new(&graph, &config, &mut SingleCommunity).unwrap();

    let rating = rater.rate(&graph, n0);
    assert!(rating.valid);
    assert_eq!(rating.target, n2);

    // n1 sees only a cross-block neighbor.
    let rating = rater.rate(&graph, n1);
    assert!(!rating.valid);
}

struct SplitDetector {
    boundary: u64,
}

impl CommunityDetector<IncidenceHypergraph> for SplitDetector {
    fn detect(
        &mut self,
        hg: &IncidenceHypergraph,
        _config: &CoarseningConfig,
    ) -> Result<CommunityAssignment, HypartError> {
        let labels = (0..hg.initial_num_nodes() as u64)
            .map(|id| ClusterId::from_raw(u32::from(id >= self.boundary)))
            .collect();
        Ok(CommunityAssignment {
            labels,
            report: CommunityReport {
                community_count: 2,
                modularity: Some(0.5),
            },
        })
    }
}

struct TruncatedDetector;

impl CommunityDetector<IncidenceHypergraph> for TruncatedDetector {
    fn detect(
        &mut self,
        _hg: &IncidenceHypergraph,
        _config: &CoarseningConfig,
    ) -> Result<CommunityAssignment, HypartError> {
        Ok(CommunityAssignment {
            labels: vec![ClusterId::from_raw(0)],
            report: CommunityReport::single(),
        })
    }
}

#[test]
fn community_filter_rejects_cross_labels() {
    let mut graph = IncidenceHypergraph::new();
    let n0 = graph.add_node(1);
    let n1 = graph.add_node(1);
    let n2 = graph.add_node(1);
    graph.add_hyperedge(1, &[n0, n1]).unwrap();
    graph.add_hyperedge(10, &[n0, n2]).unwrap();

    let config = CoarseningConfig::default();
    let mut detector = SplitDetector { boundary: 2 };
    let mut rater = StandardRater::new(&graph, &config, &mut detector).unwrap();
    assert_eq!(rater.community_report().community_count, 2);
    assert_eq!(rater.community_report().modularity, Some(0.5));

    // The heavy edge crosses the community boundary; only n1 remains.
    let rating = rater.rate(&graph, n0);
    assert!(rating.valid);
    assert_eq!(rating.target, n1);
    assert_eq!(rating.value, 1.0);

    // n2 has no neighbor inside its own community.
    let rating = rater.rate(&graph, n2);
    assert!(!rating.valid);
}

#[test]
fn detector_label_length_must_cover_the_vertex_range() {
    let mut graph = IncidenceHypergraph::new();
    let n0 = graph.add_node(1);
    let n1 = graph.add_node(1);
    graph.add_hyperedge(1, &[n0, n1]).unwrap();

    let config = CoarseningConfig::default();
    let result = StandardRater::new(&graph, &config, &mut TruncatedDetector);
    assert!(matches!(
        result,
        Err(HypartError::Community(info)) if info.code == "community-label-length"
    ));
}

#[test]
fn disabled_community_detection_skips_the_detector() {
    struct PanickingDetector;
    impl CommunityDetector<IncidenceHypergraph> for PanickingDetector {
        fn detect(
            &mut self,
            _hg: &IncidenceHypergraph,
            _config: &CoarseningConfig,
        ) -> Result<CommunityAssignment, HypartError> {
            panic!("detector must not run when community detection is disabled");
        }
    }

    let mut graph = IncidenceHypergraph::new();
    let n0 = graph.add_node(1);
    let n1 = graph.add_node(1);
    graph.add_hyperedge(4, &[n0, n1]).unwrap();

    let mut config = CoarseningConfig::default();
    config.community.enabled = false;
    let mut rater = StandardRater::new(&graph, &config, &mut PanickingDetector).unwrap();
    assert_eq!(rater.community_report(), &CommunityReport::single());

    let rating = rater.rate(&graph, n0);
    assert!(rating.valid);
    assert_eq!(rating.target, n1);
}

#[test]
fn fixed_vertices_merge_only_within_their_block() {
    let mut graph = IncidenceHypergraph::new();
    let free = graph.add_node(1);
    let fixed_a = graph.add_fixed_node(1, PartitionId::from_raw(0));
    let fixed_b = graph.add_fixed_node(1, PartitionId::from_raw(1));
    graph.add_hyperedge(2, &[free, fixed_a]).unwrap();
    graph.add_hyperedge(3, &[fixed_a, fixed_b]).unwrap();

    let config = CoarseningConfig::default();
    let mut rater = StandardRater::new(&graph, &config, &mut SingleCommunity).unwrap();

    // A free representative may not absorb a fixed vertex.
    let rating = rater.rate(&graph, free);
    assert!(!rating.valid);

    // A fixed representative absorbs the free neighbor, not the fixed one
    // from the other block, despite the heavier edge.
    let rating = rater.rate(&graph, fixed_a);
    assert!(rating.valid);
    assert_eq!(rating.target, free);
    assert_eq!(rating.value, 2.0);
}

#[test]
fn penalty_divides_by_weight_product() {
    let mut graph = IncidenceHypergraph::new();
    let n0 = graph.add_node(2);
    let n1 = graph.add_node(3);
    graph.add_hyperedge(6, &[n0, n1]).unwrap();

    let config = CoarseningConfig::default();
    let mut rater = StandardRater::new(&graph, &config, &mut SingleCommunity).unwrap();
    let rating = rater.rate(&graph, n0);
    assert!(rating.valid);
    assert_eq!(rating.value, 1.0);

    type UnpenalizedRater = VertexPairRater<IncidenceHypergraph, HeavyEdgeScore, NoWeightPenalty>;
    let mut raw = UnpenalizedRater::new(&graph, &config, &mut SingleCommunity).unwrap();
    let rating = raw.rate(&graph, n0);
    assert!(rating.valid);
    assert_eq!(rating.value, 6.0);
}

#[test]
fn matched_candidates_lose_equal_ties() {
    let mut graph = IncidenceHypergraph::new();
    let n0 = graph.add_node(1);
    let n1 = graph.add_node(1);
    let n2 = graph.add_node(1);
    graph.add_hyperedge(1, &[n0, n1]).unwrap();
    graph.add_hyperedge(1, &[n0, n2]).unwrap();

    let config = CoarseningConfig::default();
    let mut rater = StandardRater::new(&graph, &config, &mut SingleCommunity).unwrap();

    rater.mark_as_matched(n1);
    let rating = rater.rate(&graph, n0);
    assert!(rating.valid);
    assert_eq!(rating.target, n2);
    assert_eq!(rating.value, 1.0);

    // After the per-pass reset both candidates are fair game again.
    rater.reset_matches();
    let rating = rater.rate(&graph, n0);
    assert!(rating.valid);
    assert!(rating.target == n1 || rating.target == n2);
}

#[test]
fn degenerate_and_isolated_vertices_rate_invalid() {
    let mut graph = IncidenceHypergraph::new();
    let n0 = graph.add_node(1);
    let n1 = graph.add_node(1);
    let isolated = graph.add_node(1);
    let looped = graph.add_node(1);
    graph.add_hyperedge(4, &[n0, n1]).unwrap();
    graph.add_hyperedge(5, &[looped]).unwrap();

    let config = CoarseningConfig::default();
    let mut rater = StandardRater::new(&graph, &config, &mut SingleCommunity).unwrap();

    let rating = rater.rate(&graph, isolated);
    assert!(!rating.valid);
    assert_eq!(rating.target, HypernodeId::INVALID);

    // A single-pin edge carries no partner and must not be scored.
    let rating = rater.rate(&graph, looped);
    assert!(!rating.valid);

    let rating = rater.rate(&graph, n0);
    assert!(rating.valid);
    assert_eq!(rating.target, n1);
}

#[test]
fn first_wins_composition_is_reproducible_on_ties() {
    type FirstWinsRater = VertexPairRater<
        IncidenceHypergraph,
        HeavyEdgeScore,
        MultiplicativePenalty,
        UseCommunities,
        SamePartition,
        BestRatingWithTieBreaking<FirstWins>,
        PreserveFixedBlocks,
    >;

    let mut graph = IncidenceHypergraph::new();
    let n0 = graph.add_node(1);
    let n1 = graph.add_node(1);
    let n2 = graph.add_node(1);
    graph.add_hyperedge(1, &[n0, n1]).unwrap();
    graph.add_hyperedge(1, &[n0, n2]).unwrap();

    let config = CoarseningConfig::default();
    let mut rater = FirstWinsRater::new(&graph, &config, &mut SingleCommunity).unwrap();

    let first = rater.rate(&graph, n0);
    let second = rater.rate(&graph, n0);
    assert!(first.valid && second.valid);
    assert_eq!(first.target, second.target);
    assert_eq!(first.value, second.value);
}

#[test]
fn acceptance_orders_by_value_before_tie_breaks() {
    let mut rng = RngHandle::from_seed(11);
    let matched = FastResetBitvec::new(4);
    let a = HypernodeId::from_raw(0);
    let b = HypernodeId::from_raw(1);

    assert!(BestRatingWithTieBreaking::<FirstWins>::accept_rating(
        2.0, 1.0, a, b, &matched, &mut rng
    ));
    assert!(!BestRatingWithTieBreaking::<FirstWins>::accept_rating(
        0.5, 1.0, a, b, &matched, &mut rng
    ));
    assert!(!BestRatingWithTieBreaking::<FirstWins>::accept_rating(
        1.0, 1.0, a, b, &matched, &mut rng
    ));
    assert!(BestRatingWithTieBreaking::<LastWins>::accept_rating(
        1.0, 1.0, a, b, &matched, &mut rng
    ));
}

#[test]
fn unmatched_preference_only_breaks_ties() {
    let mut rng = RngHandle::from_seed(11);
    let mut matched = FastResetBitvec::new(4);
    let a = HypernodeId::from_raw(0);
    let b = HypernodeId::from_raw(1);
    let c = HypernodeId::from_raw(2);
    matched.set(0);

    // On a tie the unmatched side wins, whichever slot it occupies.
    assert!(BestRatingPreferringUnmatched::<FirstWins>::accept_rating(
        1.0, 1.0, a, b, &matched, &mut rng
    ));
    assert!(!BestRatingPreferringUnmatched::<FirstWins>::accept_rating(
        1.0, 1.0, b, a, &matched, &mut rng
    ));

    // A strictly better value beats any matched state.
    assert!(BestRatingPreferringUnmatched::<FirstWins>::accept_rating(
        2.0, 1.0, b, a, &matched, &mut rng
    ));

    // Equal matched state falls through to the tie-breaking policy.
    assert!(!BestRatingPreferringUnmatched::<FirstWins>::accept_rating(
        1.0, 1.0, b, c, &matched, &mut rng
    ));
    assert!(BestRatingPreferringUnmatched::<LastWins>::accept_rating(
        1.0, 1.0, b, c, &matched, &mut rng
    ));
}
