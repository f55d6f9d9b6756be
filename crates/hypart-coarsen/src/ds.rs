use hypart_core::{HypernodeId, RatingValue};
use indexmap::IndexMap;

/// Sparse score accumulator keyed by candidate vertex.
///
/// Entries keep their insertion order, so the rating scan can traverse
/// candidates in the order the pin walk discovered them. Clearing touches
/// only the entries of the current rating, never the whole vertex range.
#[derive(Debug)]
pub(crate) struct ScoreAccumulator {
    scores: IndexMap<HypernodeId, RatingValue>,
}

impl ScoreAccumulator {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            scores: IndexMap::with_capacity(capacity),
        }
    }

    pub(crate) fn add(&mut self, target: HypernodeId, score: RatingValue) {
        *self.scores.entry(target).or_insert(0.0) += score;
    }

    /// Iterates entries in reverse insertion order.
    pub(crate) fn iter_rev(&self) -> impl Iterator<Item = (HypernodeId, RatingValue)> + '_ {
        self.scores.iter().rev().map(|(id, score)| (*id, *score))
    }

    pub(crate) fn clear(&mut self) {
        self.scores.clear();
    }

    #[cfg(test)]
    pub(crate) fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }
}

/// Bit set over a fixed vertex range with O(1) bulk reset.
///
/// Each slot stores the version at which it was last set; bumping the
/// version invalidates every slot at once.
#[derive(Debug)]
pub struct FastResetBitvec {
    stamps: Vec<u64>,
    version: u64,
}

impl FastResetBitvec {
    /// Creates a set covering `size` indices, all unset.
    pub fn new(size: usize) -> Self {
        Self {
            stamps: vec![0; size],
            version: 1,
        }
    }

    /// Marks the index as set until the next `reset`.
    pub fn set(&mut self, index: usize) {
        self.stamps[index] = self.version;
    }

    /// Returns whether the index was set since the last `reset`.
    pub fn is_set(&self, index: usize) -> bool {
        self.stamps[index] == self.version
    }

    /// Unsets every index.
    pub fn reset(&mut self) {
        self.version += 1;
    }
}
