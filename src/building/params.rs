//! Tunables for the partitioner

use serde::{Deserialize, Serialize};

use super::BuildingError;

/// Smallest extent a leaf may be split down to along its split axis.
pub const MIN_LEAF_SIZE: usize = 8;

/// Chance that a leaf below the skip-exempt depth declines to split.
pub const SKIP_CHANCE: f32 = 0.2;

/// Aspect ratio above which the split axis is forced.
pub const MAX_ASPECT_RATIO: f32 = 1.25;

/// Leaves shallower than this always attempt their split (root and its children).
pub const SKIP_EXEMPT_DEPTH: usize = 2;

/// How the aspect ratio of a leaf is computed before comparing it to
/// [`SplitParams::max_aspect_ratio`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AxisRatioMode {
    /// Integer division, truncated before the comparison. `12 / 8` reads as `1`.
    #[default]
    Truncating,
    /// Real-valued division. `12 / 8` reads as `1.5`.
    Exact,
}

impl AxisRatioMode {
    pub fn ratio(&self, numerator: usize, denominator: usize) -> f32 {
        match self {
            AxisRatioMode::Truncating => (numerator / denominator) as f32,
            AxisRatioMode::Exact => numerator as f32 / denominator as f32,
        }
    }
}

/// Parameters controlling how leaves split.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SplitParams {
    pub min_leaf_size: usize,
    pub skip_chance: f32,
    pub max_aspect_ratio: f32,
    pub skip_exempt_depth: usize,
    pub ratio_mode: AxisRatioMode,
}

impl Default for SplitParams {
    fn default() -> Self {
        Self {
            min_leaf_size: MIN_LEAF_SIZE,
            skip_chance: SKIP_CHANCE,
            max_aspect_ratio: MAX_ASPECT_RATIO,
            skip_exempt_depth: SKIP_EXEMPT_DEPTH,
            ratio_mode: AxisRatioMode::Truncating,
        }
    }
}

impl SplitParams {
    /// Reject parameter sets the partitioner cannot run with.
    pub fn validate(&self) -> Result<(), BuildingError> {
        if self.min_leaf_size == 0 {
            return Err(BuildingError::InvalidParams(
                "min_leaf_size must be at least 1".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&self.skip_chance) {
            return Err(BuildingError::InvalidParams(format!(
                "skip_chance {} outside [0, 1]",
                self.skip_chance
            )));
        }
        if !self.max_aspect_ratio.is_finite() || self.max_aspect_ratio <= 0.0 {
            return Err(BuildingError::InvalidParams(format!(
                "max_aspect_ratio {} must be a positive number",
                self.max_aspect_ratio
            )));
        }
        Ok(())
    }
}
