//! Roller configuration and user preferences.
//!
//! Both structs deserialize with `#[serde(default)]`, so a config file only
//! needs the keys it wants to override.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::error::DiceError;

/// Choices exposed on the preferences screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Preferences {
    /// Dice shown: 1 or 2.
    pub dice_count: usize,
    /// Raise a `Doubles` event when every die lands on the same face.
    pub doubles_callout: bool,
    /// Suppress the roll sound.
    pub muted: bool,
    /// Ask the host to keep the display awake. Not interpreted by the simulator.
    pub keep_screen_on: bool,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            dice_count: DEFAULT_DICE_COUNT,
            doubles_callout: false,
            muted: false,
            keep_screen_on: false,
        }
    }
}

impl Preferences {
    pub fn validate(&self) -> Result<(), DiceError> {
        if self.dice_count == 0 || self.dice_count > MAX_DICE_COUNT {
            return Err(DiceError::InvalidDiceCount(self.dice_count));
        }
        Ok(())
    }
}

/// Configuration for a roll simulator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RollConfig {
    /// RNG seed. Same seed = same sequence of rolls. `None` seeds from entropy.
    pub seed: Option<u64>,
    /// Seconds between animation ticks.
    pub tick_interval_secs: f64,
    /// Ticks per roll; the last one draws the result.
    pub total_ticks: u32,
    pub preferences: Preferences,
}

impl Default for RollConfig {
    fn default() -> Self {
        Self {
            seed: None,
            tick_interval_secs: TICK_INTERVAL_SECS,
            total_ticks: TOTAL_TICKS,
            preferences: Preferences::default(),
        }
    }
}

impl RollConfig {
    /// Parse a JSON config and validate it.
    pub fn from_json_str(json: &str) -> Result<Self, DiceError> {
        let config: RollConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, DiceError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| DiceError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    pub fn validate(&self) -> Result<(), DiceError> {
        let interval = self.tick_interval_secs;
        if !interval.is_finite()
            || !(MIN_TICK_INTERVAL_SECS..=MAX_TICK_INTERVAL_SECS).contains(&interval)
        {
            return Err(DiceError::InvalidTickInterval(interval));
        }
        if self.total_ticks == 0 || self.total_ticks > MAX_TOTAL_TICKS {
            return Err(DiceError::InvalidTotalTicks(self.total_ticks));
        }
        self.preferences.validate()
    }

    /// Wall-clock length of one roll in seconds.
    pub fn roll_duration_secs(&self) -> f64 {
        self.tick_interval_secs * f64::from(self.total_ticks)
    }
}
