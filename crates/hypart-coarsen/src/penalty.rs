use hypart_core::{HypernodeWeight, RatingValue};

/// Normalization applied to an accumulated score before comparison.
///
/// Penalizing heavy pairs keeps vertex weights balanced across the
/// coarsening levels.
pub trait HeavyNodePenaltyPolicy {
    /// Returns the divisor for a pair with the given weights. Must be
    /// strictly positive.
    fn penalty(weight_u: HypernodeWeight, weight_v: HypernodeWeight) -> RatingValue;
}

/// Divides by the product of the two vertex weights, clamped to at least 1.
pub struct MultiplicativePenalty;

impl HeavyNodePenaltyPolicy for MultiplicativePenalty {
    fn penalty(weight_u: HypernodeWeight, weight_v: HypernodeWeight) -> RatingValue {
        (weight_u * weight_v).max(1) as RatingValue
    }
}

/// Leaves the accumulated score untouched.
pub struct NoWeightPenalty;

impl HeavyNodePenaltyPolicy for NoWeightPenalty {
    fn penalty(_weight_u: HypernodeWeight, _weight_v: HypernodeWeight) -> RatingValue {
        1.0
    }
}
