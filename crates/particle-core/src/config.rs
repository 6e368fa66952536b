use crate::constants::DEFAULT_SEED;
use crate::tier::ProfileThresholds;
use crate::viewport::ReconcilerConfig;

/// Everything a mount needs beyond what it probes from the environment.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RendererConfig {
    pub seed: u32,
    pub thresholds: ProfileThresholds,
    pub reconciler: ReconcilerConfig,
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            seed: DEFAULT_SEED,
            thresholds: ProfileThresholds::default(),
            reconciler: ReconcilerConfig::default(),
        }
    }
}
