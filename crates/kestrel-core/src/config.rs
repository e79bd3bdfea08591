//! Runtime configuration.
//!
//! Every struct has sane defaults; [`AppConfig::load`] overlays a JSON file
//! on top of them. Values are validated after loading.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::enums::{Direction4, Layer};
use crate::error::ConfigError;
use crate::types::Point;

/// Configuration for a simulation session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// RNG seed. Same seed and same inputs = same simulation.
    pub seed: u64,
    /// Simulated milliseconds per step. Must match the scheduler.
    pub timestep_ms: u64,
    pub start_position: Point,
    pub start_layer: Layer,
    pub start_direction: Direction4,
    pub max_life: u32,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            timestep_ms: DEFAULT_TIMESTEP_MS,
            start_position: Point::new(64, 64),
            start_layer: Layer::Low,
            start_direction: Direction4::Down,
            max_life: DEFAULT_MAX_LIFE,
        }
    }
}

/// Fixed-timestep scheduler tuning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchedulerConfig {
    pub timestep_ms: u64,
    /// Steps beyond this cap are deferred to the next frame so that a slow
    /// machine still renders now and then.
    pub max_steps_per_frame: u32,
    pub stall_threshold_ms: u64,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            timestep_ms: DEFAULT_TIMESTEP_MS,
            max_steps_per_frame: DEFAULT_MAX_STEPS_PER_FRAME,
            stall_threshold_ms: DEFAULT_STALL_THRESHOLD_MS,
        }
    }
}

impl SchedulerConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.timestep_ms == 0 {
            return Err(ConfigError::Invalid {
                field: "timestep_ms",
                reason: "must be positive".into(),
            });
        }
        if self.max_steps_per_frame == 0 {
            return Err(ConfigError::Invalid {
                field: "max_steps_per_frame",
                reason: "must be positive".into(),
            });
        }
        if self.stall_threshold_ms <= self.timestep_ms {
            return Err(ConfigError::Invalid {
                field: "stall_threshold_ms",
                reason: format!(
                    "must exceed the timestep ({} ms), got {}",
                    self.timestep_ms, self.stall_threshold_ms
                ),
            });
        }
        Ok(())
    }
}

/// Top-level application configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub sim: SimConfig,
    pub scheduler: SchedulerConfig,
    /// Number of real frames to run before exiting (`None` = until closed).
    pub max_frames: Option<u64>,
}

impl AppConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: AppConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&json)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.scheduler.validate()?;
        if self.sim.timestep_ms != self.scheduler.timestep_ms {
            return Err(ConfigError::Invalid {
                field: "sim.timestep_ms",
                reason: format!(
                    "{} differs from scheduler.timestep_ms {}",
                    self.sim.timestep_ms, self.scheduler.timestep_ms
                ),
            });
        }
        if self.sim.max_life == 0 {
            return Err(ConfigError::Invalid {
                field: "sim.max_life",
                reason: "must be positive".into(),
            });
        }
        Ok(())
    }
}
