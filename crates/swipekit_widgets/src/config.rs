//! Swipe cell configuration (swipekit.toml)
//!
//! Every field is optional in the file; missing values take the defaults
//! below, which reproduce the stock swipe feel.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use swipekit_animation::SettleCurve;
use swipekit_core::DragConfig;

use crate::error::{ConfigError, Result};

/// Tunables for [`SwipeableCell`](crate::cell::SwipeableCell)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SwipeConfig {
    /// Duration of the settle transition (milliseconds)
    pub settle_duration_ms: u64,
    /// Divisor applied to drag deltas once the panel is fully revealed
    pub resistance: f32,
    /// Divisor turning release velocity into a distance comparable with the panel width
    pub velocity_scale: f32,
    /// Fraction of the panel width past which a slow release opens the cell
    pub open_threshold: f32,
    /// Panel emphasis at zero reveal
    pub emphasis_floor: f32,
    /// Shape of the settle transition
    pub curve: SettleCurve,
    /// Pointer tracking for hosts that feed raw events
    pub drag: DragConfig,
}

impl Default for SwipeConfig {
    fn default() -> Self {
        Self {
            settle_duration_ms: 300,
            resistance: 1.8,
            velocity_scale: 3.0,
            open_threshold: 0.5,
            emphasis_floor: 0.3,
            curve: SettleCurve::default(),
            drag: DragConfig::default(),
        }
    }
}

fn positive(value: f32) -> bool {
    value.is_finite() && value > 0.0
}

fn unit(value: f32) -> bool {
    (0.0..=1.0).contains(&value)
}

impl SwipeConfig {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    /// Parse and validate configuration from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: SwipeConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize to TOML string
    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Settle duration in seconds
    pub fn settle_duration(&self) -> f32 {
        self.settle_duration_ms as f32 / 1000.0
    }

    /// Check every value is inside its allowed range
    pub fn validate(&self) -> Result<()> {
        let invalid = |msg: &str| Err(ConfigError::Invalid(msg.to_string()));

        if self.settle_duration_ms == 0 {
            return invalid("settle_duration_ms must be greater than zero");
        }
        if !positive(self.resistance) {
            return invalid("resistance must be a positive number");
        }
        if !positive(self.velocity_scale) {
            return invalid("velocity_scale must be a positive number");
        }
        if !unit(self.open_threshold) {
            return invalid("open_threshold must be within [0, 1]");
        }
        if !unit(self.emphasis_floor) {
            return invalid("emphasis_floor must be within [0, 1]");
        }
        if let SettleCurve::Spring {
            damping_ratio,
            initial_velocity,
        } = self.curve
        {
            if !positive(damping_ratio) {
                return invalid("curve.damping_ratio must be a positive number");
            }
            if !initial_velocity.is_finite() {
                return invalid("curve.initial_velocity must be finite");
            }
        }
        if !(self.drag.slop.is_finite() && self.drag.slop >= 0.0) {
            return invalid("drag.slop must be zero or more");
        }
        if !(positive(self.drag.velocity_smoothing) && self.drag.velocity_smoothing <= 1.0) {
            return invalid("drag.velocity_smoothing must be within (0, 1]");
        }
        Ok(())
    }
}
