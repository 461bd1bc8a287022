//! Configuration for building generation.

use std::error::Error;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::building::{Building, BuildingError, RandomSource, SplitParams};

/// Everything a host needs to generate a building.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    /// Footprint width in tiles (default: 64).
    pub width: i64,

    /// Footprint height in tiles (default: 64).
    pub height: i64,

    /// Master seed. `None` picks one at random.
    pub seed: Option<u64>,

    /// Partitioner tunables.
    pub split: SplitParams,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            width: 64,
            height: 64,
            seed: None,
            split: SplitParams::default(),
        }
    }
}

impl GenerationConfig {
    /// Load from a JSON file. Missing fields take their defaults.
    pub fn load(path: &Path) -> Result<Self, Box<dyn Error>> {
        let contents = fs::read_to_string(path)?;
        let config = serde_json::from_str(&contents)?;
        Ok(config)
    }

    pub fn save(&self, path: &Path) -> Result<(), Box<dyn Error>> {
        fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }

    /// Generate a building at the origin with these settings.
    pub fn generate<R: RandomSource + ?Sized>(
        &self,
        rng: &mut R,
    ) -> Result<Building, BuildingError> {
        Building::generate(0, 0, self.width, self.height, &self.split, rng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::building::AxisRatioMode;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: GenerationConfig =
            serde_json::from_str(r#"{"width": 30, "split": {"ratio_mode": "Exact"}}"#).unwrap();
        assert_eq!(config.width, 30);
        assert_eq!(config.height, 64);
        assert_eq!(config.seed, None);
        assert_eq!(config.split.ratio_mode, AxisRatioMode::Exact);
        assert_eq!(config.split.skip_chance, 0.2);
    }

    #[test]
    fn test_save_then_load() {
        let config = GenerationConfig {
            width: 40,
            height: 24,
            seed: Some(9),
            ..Default::default()
        };
        let path = std::env::temp_dir().join("building_generator_config_test.json");
        config.save(&path).unwrap();
        let loaded = GenerationConfig::load(&path).unwrap();
        assert_eq!(loaded, config);
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_generate_rejects_bad_size() {
        let config = GenerationConfig {
            width: 0,
            ..Default::default()
        };
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        assert!(config.generate(&mut rng).is_err());
    }
}
