use hypart_core::rng::RngHandle;
use hypart_core::{CoarseningConfig, ContractionMemento, Hypergraph, HypernodeId};
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

use crate::determinism;
use crate::rater::Rater;
use crate::refine::Refiner;

/// Phase of the multilevel hierarchy. Transitions are one-way:
/// `Coarsening` to `Uncoarsening` to `Done`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LevelState {
    /// Contraction history is growing.
    Coarsening,
    /// Contraction history is draining.
    Uncoarsening,
    /// History empty, the finest level is restored.
    Done,
}

/// Summary returned to callers after a `coarsen` call completes.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CoarseningReport {
    /// Number of passes executed, including a final stalled pass.
    pub passes: usize,
    /// Number of contractions performed.
    pub contractions: usize,
    /// Live vertex count when the call started.
    pub nodes_before: usize,
    /// Live vertex count when the call returned.
    pub nodes_after: usize,
    /// Whether the call stopped because a pass made no progress.
    pub stalled: bool,
}

/// Pass-based contraction driver over an exclusively owned hypergraph.
///
/// Owns the graph, the rater, the contraction history and the shuffle RNG
/// for the lifetime of the session. Collaborators observe the hierarchy
/// through three callbacks: one after every contraction, one after every
/// pass, one after every restoration (before the refiner runs). Determinism
/// rests solely on the master seed; the shuffle RNG is the only source of
/// vertex-ordering randomness.
pub struct MultilevelCoarsener<H, R, CF, EF, UF> {
    hg: H,
    rater: R,
    history: Vec<ContractionMemento>,
    rng: RngHandle,
    contraction_func: CF,
    end_of_pass_func: EF,
    uncontraction_func: UF,
    state: LevelState,
}

impl<H, R, CF, EF, UF> MultilevelCoarsener<H, R, CF, EF, UF>
where
    H: Hypergraph,
    R: Rater<H>,
    CF: FnMut(HypernodeId, HypernodeId),
    EF: FnMut(),
    UF: FnMut(HypernodeId, HypernodeId),
{
    /// Creates a driver over `hg`, seeding the pass shuffle from the
    /// configured master seed.
    pub fn new(
        hg: H,
        rater: R,
        config: &CoarseningConfig,
        contraction_func: CF,
        end_of_pass_func: EF,
        uncontraction_func: UF,
    ) -> Self {
        Self {
            hg,
            rater,
            history: Vec::new(),
            rng: RngHandle::from_seed(determinism::shuffle_seed(config.seed.master_seed)),
            contraction_func,
            end_of_pass_func,
            uncontraction_func,
            state: LevelState::Coarsening,
        }
    }

    /// Contracts vertex pairs until at most `limit` vertices remain or a
    /// pass makes no progress. A stall below the limit is a graceful stop,
    /// not an error. Panics if uncoarsening has already begun.
    pub fn coarsen(&mut self, limit: usize) -> CoarseningReport {
        assert_eq!(
            self.state,
            LevelState::Coarsening,
            "contraction is not permitted once uncoarsening has begun"
        );
        let nodes_before = self.hg.current_num_nodes();
        let mut passes = 0;
        let mut contractions = 0;
        let mut stalled = false;
        let mut current_hns: Vec<HypernodeId> = Vec::new();

        while self.hg.current_num_nodes() > limit {
            self.rater.reset_matches();
            let num_hns_before_pass = self.hg.current_num_nodes();
            current_hns.clear();
            current_hns.extend(self.hg.nodes());
            current_hns.shuffle(&mut self.rng);

            for &hn in &current_hns {
                // Absorbed earlier in this same pass.
                if self.hg.node_is_enabled(hn) {
                    let rating = self.rater.rate(&self.hg, hn);
                    if rating.valid {
                        self.rater.mark_as_matched(hn);
                        self.rater.mark_as_matched(rating.target);
                        self.perform_contraction(hn, rating.target);
                        (self.contraction_func)(hn, rating.target);
                        contractions += 1;
                    }
                    if self.hg.current_num_nodes() <= limit {
                        break;
                    }
                }
            }

            (self.end_of_pass_func)();
            passes += 1;

            if num_hns_before_pass == self.hg.current_num_nodes() {
                stalled = true;
                break;
            }
        }

        CoarseningReport {
            passes,
            contractions,
            nodes_before,
            nodes_after: self.hg.current_num_nodes(),
            stalled,
        }
    }

    /// Replays an ordered sequence of contraction pairs, growing the
    /// history exactly as `coarsen` would have. Only the contraction
    /// callback fires; nothing is rated or matched. Used to mirror a
    /// recorded hierarchy onto an auxiliary structure. Panics if a pair
    /// does not name two distinct enabled vertices.
    pub fn simulate_contractions(&mut self, pairs: &[(HypernodeId, HypernodeId)]) {
        assert_eq!(
            self.state,
            LevelState::Coarsening,
            "contraction is not permitted once uncoarsening has begun"
        );
        for &(representative, contracted) in pairs {
            assert_ne!(
                representative, contracted,
                "replayed pair must name two distinct vertices"
            );
            assert!(
                self.hg.node_is_enabled(representative),
                "replayed representative is disabled"
            );
            assert!(
                self.hg.node_is_enabled(contracted),
                "replayed contracted vertex is disabled"
            );
            self.perform_contraction(representative, contracted);
            (self.contraction_func)(representative, contracted);
        }
    }

    /// Drains the contraction history in reverse, restoring one level at a
    /// time. After every restoration the uncontraction callback fires,
    /// then the refiner runs over the restored pair. Returns `true` once
    /// the finest level is reached; refinement outcomes stay within the
    /// refiner. Panics if the history was already drained.
    pub fn uncoarsen<Rf: Refiner<H>>(&mut self, refiner: &mut Rf) -> bool {
        assert_ne!(self.state, LevelState::Done, "history already drained");
        self.state = LevelState::Uncoarsening;
        refiner.initialize(&self.hg);
        while let Some(memento) = self.history.pop() {
            self.hg.uncontract(&memento);
            (self.uncontraction_func)(memento.representative, memento.contracted);
            refiner.refine(&mut self.hg, [memento.representative, memento.contracted]);
        }
        self.state = LevelState::Done;
        true
    }

    /// The hypergraph at the current level.
    pub fn hypergraph(&self) -> &H {
        &self.hg
    }

    /// Mutable access for collaborator setup between phases (assigning
    /// partition ids before uncoarsening, for instance). Must not be used
    /// while a pass is in progress.
    pub fn hypergraph_mut(&mut self) -> &mut H {
        &mut self.hg
    }

    /// The contraction history, oldest first.
    pub fn history(&self) -> &[ContractionMemento] {
        &self.history
    }

    /// Current phase of the hierarchy.
    pub fn state(&self) -> LevelState {
        self.state
    }

    /// Releases the hypergraph to the caller.
    pub fn into_hypergraph(self) -> H {
        self.hg
    }

    fn perform_contraction(&mut self, representative: HypernodeId, contracted: HypernodeId) {
        assert!(
            self.hg.node_weight(representative) + self.hg.node_weight(contracted)
                <= self.rater.threshold_node_weight(),
            "contracted weight would exceed the configured threshold"
        );
        assert_eq!(
            self.hg.part_id(representative),
            self.hg.part_id(contracted),
            "contraction partners must share a partition block"
        );
        let memento = self.hg.contract(representative, contracted);
        self.history.push(memento);
    }
}
