use hypart_core::{Hypergraph, HypernodeId};

/// Local-search collaborator driven by the uncoarsening loop.
///
/// After every restoration the driver hands the refiner the graph and the
/// pair that just reappeared, so the search can stay local to the vertices
/// whose neighborhood actually changed.
pub trait Refiner<H: Hypergraph> {
    /// Called once, before the first restoration.
    fn initialize(&mut self, _hg: &H) {}

    /// Refines the partition around the restored pair. Returns whether an
    /// improvement was found; what counts as improvement is the refiner's
    /// own contract.
    fn refine(&mut self, hg: &mut H, just_restored: [HypernodeId; 2]) -> bool;
}

/// Refiner that never moves a vertex. Uncoarsening with it restores the
/// input exactly.
pub struct NoOpRefiner;

impl<H: Hypergraph> Refiner<H> for NoOpRefiner {
    fn refine(&mut self, _hg: &mut H, _just_restored: [HypernodeId; 2]) -> bool {
        false
    }
}
