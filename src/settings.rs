//! Simulation settings
//!
//! Everything tunable lives here, set before the frame loop starts.
//! Missing fields fall back to defaults when loading JSON.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::{MAX_SUBSTEPS, SIM_DT};
use crate::sim::{BounceConfig, FixedStep, OrbitConfig, PrismConfig, WakeConfig};

/// Settings (de)serialization failure
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("invalid settings JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

/// All simulation settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Fixed simulation timestep (seconds)
    pub sim_dt: f32,
    /// Maximum fixed steps per rendered frame
    pub max_substeps: u32,

    pub bounce: BounceConfig,
    pub prism: PrismConfig,
    pub orbit: OrbitConfig,
    pub wake: WakeConfig,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            sim_dt: SIM_DT,
            max_substeps: MAX_SUBSTEPS,
            bounce: BounceConfig::default(),
            prism: PrismConfig::default(),
            orbit: OrbitConfig::default(),
            wake: WakeConfig::default(),
        }
    }
}

impl Settings {
    /// Parse settings, filling unspecified fields with defaults
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String, SettingsError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Frame driver clock for these settings
    pub fn clock(&self) -> FixedStep {
        FixedStep::new(self.sim_dt, self.max_substeps)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip() {
        let mut settings = Settings::default();
        settings.bounce.restitution = 0.5;
        settings.wake.seed = 42;

        let json = settings.to_json().unwrap();
        let loaded = Settings::from_json(&json).unwrap();
        assert_eq!(loaded.bounce.restitution, 0.5);
        assert_eq!(loaded.wake.seed, 42);
        assert_eq!(loaded.orbit.planets.len(), 2);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let loaded = Settings::from_json(r#"{ "bounce": { "friction": 0.0 } }"#).unwrap();
        assert_eq!(loaded.bounce.friction, 0.0);
        assert_eq!(loaded.bounce.ball_radius, crate::consts::BALL_RADIUS);
        assert_eq!(loaded.sim_dt, SIM_DT);
    }

    #[test]
    fn test_malformed_json_is_an_error() {
        let err = Settings::from_json("{ not json").unwrap_err();
        assert!(matches!(err, SettingsError::Parse(_)));
        assert!(err.to_string().starts_with("invalid settings JSON"));
    }

    #[test]
    fn test_clock_uses_timestep() {
        let settings = Settings {
            sim_dt: 0.005,
            max_substeps: 3,
            ..Default::default()
        };
        let clock = settings.clock();
        assert_eq!(clock.dt, 0.005);
        assert_eq!(clock.max_substeps, 3);
    }
}
