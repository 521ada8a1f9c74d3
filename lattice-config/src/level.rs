use serde::{Deserialize, Serialize};

use crate::ConfigLoadError;

/// Cells in one 16x16x16 section.
const SECTION_VOLUME: u32 = 16 * 16 * 16;

/// Tuning of a single simulated level.
#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct LevelConfig {
    /// Seed of the level's random source. Drives random tick sampling.
    pub seed: i64,
    /// Positions sampled per loaded section on every tick.
    pub random_tick_speed: u32,
    /// Scheduled ticks fired per level tick. Entries beyond this stay queued.
    pub max_scheduled_ticks_per_tick: usize,
    /// Neighbor updates a single cascade may process before the rest are dropped.
    pub max_chained_neighbor_updates: usize,
}

impl Default for LevelConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            random_tick_speed: 3,
            max_scheduled_ticks_per_tick: 65536,
            max_chained_neighbor_updates: 1_000_000,
        }
    }
}

impl LevelConfig {
    pub fn validate(&self) -> Result<(), ConfigLoadError> {
        if self.random_tick_speed > SECTION_VOLUME {
            return Err(ConfigLoadError::Invalid(format!(
                "random_tick_speed must be at most {SECTION_VOLUME}, got {}",
                self.random_tick_speed
            )));
        }
        if self.max_scheduled_ticks_per_tick == 0 {
            return Err(ConfigLoadError::Invalid(
                "max_scheduled_ticks_per_tick must be positive".into(),
            ));
        }
        if self.max_chained_neighbor_updates == 0 {
            return Err(ConfigLoadError::Invalid(
                "max_chained_neighbor_updates must be positive".into(),
            ));
        }
        Ok(())
    }
}
