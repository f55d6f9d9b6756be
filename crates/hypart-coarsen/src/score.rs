use hypart_core::{HyperedgeWeight, RatingValue};

/// Scoring policy evaluated once per incident hyperedge during a rating.
///
/// Callers never pass degenerate edges; the rating walk skips hyperedges
/// with fewer than two pins.
pub trait ScorePolicy {
    /// Returns the contribution of one hyperedge to every co-pin of the
    /// rated vertex.
    fn score(edge_weight: HyperedgeWeight, edge_size: usize) -> RatingValue;
}

/// Classic heavy-edge score: edge weight divided by `size - 1`.
///
/// Distributes an edge's weight over the contractions needed to collapse
/// it, so small heavy edges dominate the rating.
pub struct HeavyEdgeScore;

impl ScorePolicy for HeavyEdgeScore {
    fn score(edge_weight: HyperedgeWeight, edge_size: usize) -> RatingValue {
        edge_weight as RatingValue / (edge_size - 1) as RatingValue
    }
}
