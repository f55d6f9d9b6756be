use hypart_core::{ClusterId, CoarseningConfig, Hypergraph, HypartError};
use serde::{Deserialize, Serialize};

/// Community labels for the finest level plus detection diagnostics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommunityAssignment {
    /// One label per vertex of the finest level, indexed by raw id.
    pub labels: Vec<ClusterId>,
    /// Diagnostics describing the detected clustering.
    pub report: CommunityReport,
}

/// Diagnostics emitted by a community detector.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommunityReport {
    /// Number of distinct communities.
    pub community_count: usize,
    /// Modularity of the clustering, when the detector computes one.
    pub modularity: Option<f64>,
}

impl CommunityReport {
    /// Report for the trivial single-community assignment.
    pub fn single() -> Self {
        Self {
            community_count: 1,
            modularity: None,
        }
    }
}

/// Clustering preprocessing collaborator.
///
/// Invoked exactly once, when a rater is constructed over the finest
/// level. Detectors may use internal randomness; determinism is their own
/// contract.
pub trait CommunityDetector<H: Hypergraph> {
    /// Assigns a community label to every vertex of the graph.
    fn detect(
        &mut self,
        hg: &H,
        config: &CoarseningConfig,
    ) -> Result<CommunityAssignment, HypartError>;
}

/// Places every vertex in one community.
pub struct SingleCommunity;

impl<H: Hypergraph> CommunityDetector<H> for SingleCommunity {
    fn detect(
        &mut self,
        hg: &H,
        _config: &CoarseningConfig,
    ) -> Result<CommunityAssignment, HypartError> {
        Ok(CommunityAssignment {
            labels: vec![ClusterId::from_raw(0); hg.initial_num_nodes()],
            report: CommunityReport::single(),
        })
    }
}
