use serde::Deserialize;

use nodemesh_lighting::{DEFAULT_AO_GAMMA, clamp_gamma};

/// What the collector does when a buffer would pass the 16-bit index range.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IndexOverflow {
    /// Open a fresh buffer for the same tile.
    #[default]
    Split,
    /// Warn and keep appending; indices wrap.
    Append,
}

/// Per-build switches, usually read from a `[mesh]` table.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct MeshOptions {
    pub smooth_lighting: bool,
    pub ao_gamma: f32,
    pub desync_animation: bool,
    pub index_overflow: IndexOverflow,
    pub default_daynight_ratio: u32,
}

impl Default for MeshOptions {
    fn default() -> Self {
        Self {
            smooth_lighting: false,
            ao_gamma: DEFAULT_AO_GAMMA,
            desync_animation: true,
            index_overflow: IndexOverflow::Split,
            default_daynight_ratio: 1000,
        }
    }
}

impl MeshOptions {
    #[inline]
    pub fn gamma(&self) -> f32 {
        clamp_gamma(self.ao_gamma)
    }

    #[inline]
    pub fn daynight_ratio(&self) -> u32 {
        self.default_daynight_ratio.min(1000)
    }
}
