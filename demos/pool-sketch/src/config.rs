//! Host-supplied settings, read from JSON via `game_configure`.

use serde::Deserialize;
use thiserror::Error;

use crate::table::{Table, TableError};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid config JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error(transparent)]
    Table(#[from] TableError),
    #[error("shot power must be a non-negative finite number, got {0}")]
    InvalidPower(f32),
    #[error("shot strength must be finite, got {0}")]
    InvalidStrength(f32),
    #[error("aim step must be finite, got {0}")]
    InvalidAimStep(f32),
}

/// Every field is optional in JSON; missing ones take the defaults below.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct PoolConfig {
    pub table_width: f32,
    pub shot_power: f32,
    /// Impulse per unit of power.
    pub shot_strength: f32,
    /// Radians per rotate key press in keyboard mode.
    pub aim_step: f32,
    /// Seed for the random rack layouts.
    pub seed: u64,
    pub start_in_mouse_mode: bool,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            table_width: Table::DEFAULT_WIDTH,
            shot_power: crate::cue::DEFAULT_POWER,
            shot_strength: crate::cue::SHOT_STRENGTH,
            aim_step: std::f32::consts::PI / 90.0,
            seed: 0x5EED,
            start_in_mouse_mode: true,
        }
    }
}

impl PoolConfig {
    /// Parse and validate a JSON config.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: PoolConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        Table::new(self.table_width)?;
        if !self.shot_power.is_finite() || self.shot_power < 0.0 {
            return Err(ConfigError::InvalidPower(self.shot_power));
        }
        if !self.shot_strength.is_finite() {
            return Err(ConfigError::InvalidStrength(self.shot_strength));
        }
        if !self.aim_step.is_finite() {
            return Err(ConfigError::InvalidAimStep(self.aim_step));
        }
        Ok(())
    }

    /// Table geometry for this config.
    pub fn table(&self) -> Result<Table, TableError> {
        Table::new(self.table_width)
    }
}
