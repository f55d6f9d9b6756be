use std::marker::PhantomData;

use hypart_core::rng::RngHandle;
use hypart_core::{HypernodeId, RatingValue};
use rand::Rng;

use crate::ds::FastResetBitvec;

/// Decides whether a candidate whose rating ties the current best replaces
/// it.
pub trait TieBreakingPolicy {
    /// Returns true when the tied candidate should win.
    fn accept_equal(rng: &mut RngHandle) -> bool;
}

/// Fair coin flip per tie. The only source of randomness in a rating.
pub struct RandomWins;

impl TieBreakingPolicy for RandomWins {
    fn accept_equal(rng: &mut RngHandle) -> bool {
        rng.gen()
    }
}

/// Keeps the candidate seen first.
pub struct FirstWins;

impl TieBreakingPolicy for FirstWins {
    fn accept_equal(_rng: &mut RngHandle) -> bool {
        false
    }
}

/// Prefers the candidate seen last.
pub struct LastWins;

impl TieBreakingPolicy for LastWins {
    fn accept_equal(_rng: &mut RngHandle) -> bool {
        true
    }
}

/// Arbitrates between the running best rating and a new candidate.
///
/// The matched set carries which vertices were already paired during the
/// current pass; policies may consult it to spread matches more evenly.
pub trait AcceptancePolicy {
    /// Returns true when the candidate replaces the current best.
    fn accept_rating(
        candidate_value: RatingValue,
        best_value: RatingValue,
        best_target: HypernodeId,
        candidate_target: HypernodeId,
        matched: &FastResetBitvec,
        rng: &mut RngHandle,
    ) -> bool;
}

/// Accepts strictly better ratings; ties go to the tie-breaking policy.
pub struct BestRatingWithTieBreaking<T = RandomWins>(PhantomData<T>);

impl<T: TieBreakingPolicy> AcceptancePolicy for BestRatingWithTieBreaking<T> {
    fn accept_rating(
        candidate_value: RatingValue,
        best_value: RatingValue,
        _best_target: HypernodeId,
        _candidate_target: HypernodeId,
        _matched: &FastResetBitvec,
        rng: &mut RngHandle,
    ) -> bool {
        best_value < candidate_value
            || (best_value == candidate_value && T::accept_equal(rng))
    }
}

/// Accepts strictly better ratings; among ties, prefers a candidate not yet
/// matched during the current pass. Only when both sides have the same
/// matched state does the tie-breaking policy run.
pub struct BestRatingPreferringUnmatched<T = RandomWins>(PhantomData<T>);

impl<T: TieBreakingPolicy> AcceptancePolicy for BestRatingPreferringUnmatched<T> {
    fn accept_rating(
        candidate_value: RatingValue,
        best_value: RatingValue,
        best_target: HypernodeId,
        candidate_target: HypernodeId,
        matched: &FastResetBitvec,
        rng: &mut RngHandle,
    ) -> bool {
        if best_value < candidate_value {
            return true;
        }
        if best_value > candidate_value {
            return false;
        }
        let best_matched = matched.is_set(best_target.as_raw() as usize);
        let candidate_matched = matched.is_set(candidate_target.as_raw() as usize);
        match (best_matched, candidate_matched) {
            (true, false) => true,
            (false, true) => false,
            _ => T::accept_equal(rng),
        }
    }
}
