//! YAML-configurable parameters consumed by the coarsening engine.

use serde::{Deserialize, Serialize};

use crate::errors::{ErrorInfo, HypartError};
use crate::HypernodeWeight;

/// Configuration surface of a coarsening session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoarseningConfig {
    /// Hard cap on the weight of a contracted vertex. A pair whose summed
    /// weight would exceed this is never rated as a match.
    #[serde(default = "default_max_node_weight")]
    pub max_allowed_node_weight: HypernodeWeight,
    /// Community detection preprocessing.
    #[serde(default)]
    pub community: CommunityConfig,
    /// Master seed and substream policy.
    #[serde(default)]
    pub seed: SeedPolicy,
    /// Reporting flags, forwarded to surrounding tooling and never
    /// interpreted by the engine itself.
    #[serde(default)]
    pub reporting: ReportingConfig,
}

fn default_max_node_weight() -> HypernodeWeight {
    HypernodeWeight::MAX
}

impl Default for CoarseningConfig {
    fn default() -> Self {
        Self {
            max_allowed_node_weight: default_max_node_weight(),
            community: CommunityConfig::default(),
            seed: SeedPolicy::default(),
            reporting: ReportingConfig::default(),
        }
    }
}

impl CoarseningConfig {
    /// Parses a configuration from a YAML document.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, HypartError> {
        serde_yaml::from_str(yaml).map_err(|err| {
            HypartError::Config(
                ErrorInfo::new("config-parse", err.to_string())
                    .with_hint("see CoarseningConfig for the accepted fields"),
            )
        })
    }
}

/// Controls the community detection preprocessing step.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommunityConfig {
    /// When disabled, every vertex is placed in a single community and the
    /// detector collaborator is never invoked.
    #[serde(default = "default_community_enabled")]
    pub enabled: bool,
}

fn default_community_enabled() -> bool {
    true
}

impl Default for CommunityConfig {
    fn default() -> Self {
        Self {
            enabled: default_community_enabled(),
        }
    }
}

/// Deterministic seeding configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeedPolicy {
    /// Master seed for the session. Pass-order shuffling and rating
    /// tie-breaking derive their streams from it.
    #[serde(default = "default_master_seed")]
    pub master_seed: u64,
    /// Optional label recorded alongside derived substreams in diagnostics.
    #[serde(default)]
    pub label: Option<String>,
}

fn default_master_seed() -> u64 {
    0xC0A2_5ECA_FE15_5EED_u64
}

impl Default for SeedPolicy {
    fn default() -> Self {
        Self {
            master_seed: default_master_seed(),
            label: None,
        }
    }
}

/// Verbosity and reporting flags. The engine forwards these untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReportingConfig {
    /// Whether surrounding tooling should emit verbose progress output.
    #[serde(default)]
    pub verbose: bool,
}
