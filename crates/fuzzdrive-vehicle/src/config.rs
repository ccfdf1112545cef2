//! Configuration for the vehicle controller

use crate::error::{Result, VehicleError};
use fuzzdrive_engine::Defuzzification;
use serde::{Deserialize, Serialize};

/// Largest usable sample step: the narrowest universe (acceleration, span 20)
/// still gets three samples.
pub const MAX_STEP: f64 = 10.0;

/// Smallest usable sample step: the widest universe (steering, span 180)
/// stays at 180 001 samples.
pub const MIN_STEP: f64 = 0.001;

/// Tuning for the three control systems
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VehicleConfig {
    /// Sample spacing of every universe
    pub step: f64,

    /// Clamp readings into their universe before inference
    pub clip_to_bounds: bool,

    /// Defuzzification method applied to every output
    #[serde(with = "method")]
    pub defuzzification: Defuzzification,
}

impl VehicleConfig {
    /// Validate the configuration
    pub fn validate(&self) -> std::result::Result<(), String> {
        if !self.step.is_finite() || self.step <= 0.0 {
            return Err(format!("step must be a positive number, got {}", self.step));
        }
        if self.step > MAX_STEP {
            return Err(format!("step cannot exceed {}, got {}", MAX_STEP, self.step));
        }
        if self.step < MIN_STEP {
            return Err(format!("step cannot be below {}, got {}", MIN_STEP, self.step));
        }
        Ok(())
    }

    /// Coarse preset: 5-unit sampling for fast, low-precision sweeps
    pub fn coarse() -> Self {
        Self {
            step: 5.0,
            ..Self::default()
        }
    }

    /// Fine preset: 0.1-unit sampling for precise centroids
    pub fn fine() -> Self {
        Self {
            step: 0.1,
            ..Self::default()
        }
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self> {
        let config: Self = toml::from_str(toml_str)
            .map_err(|e| VehicleError::Format(format!("Failed to parse TOML: {}", e)))?;
        config.validate().map_err(VehicleError::InvalidConfig)?;
        Ok(config)
    }

    /// Serialize configuration to TOML string
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self)
            .map_err(|e| VehicleError::Format(format!("Failed to serialize to TOML: {}", e)))
    }
}

impl Default for VehicleConfig {
    fn default() -> Self {
        Self {
            step: 1.0,
            clip_to_bounds: true,
            defuzzification: Defuzzification::Centroid,
        }
    }
}

/// Serde adapter storing a method by its short name
mod method {
    use fuzzdrive_engine::Defuzzification;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(method: &Defuzzification, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(method.as_str())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Defuzzification, D::Error> {
        let name = String::deserialize(deserializer)?;
        name.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = VehicleConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.step, 1.0);
        assert!(config.clip_to_bounds);
        assert_eq!(config.defuzzification, Defuzzification::Centroid);
    }

    #[test]
    fn test_presets_are_valid() {
        assert!(VehicleConfig::coarse().validate().is_ok());
        assert!(VehicleConfig::fine().validate().is_ok());
    }

    #[test]
    fn test_invalid_step() {
        let mut config = VehicleConfig::default();
        config.step = 0.0;
        assert!(config.validate().is_err());
        config.step = f64::NAN;
        assert!(config.validate().is_err());
        config.step = 25.0;
        assert!(config.validate().is_err());
        config.step = 1e-12;
        assert!(config.validate().is_err());
        config.step = MIN_STEP;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_toml_roundtrip() {
        let mut config = VehicleConfig::coarse();
        config.defuzzification = Defuzzification::MeanOfMaximum;
        let toml_str = config.to_toml().unwrap();
        assert!(toml_str.contains("defuzzification = \"mom\""));

        let parsed = VehicleConfig::from_toml(&toml_str).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config = VehicleConfig::from_toml("step = 0.5").unwrap();
        assert_eq!(config.step, 0.5);
        assert!(config.clip_to_bounds);
    }

    #[test]
    fn test_invalid_toml() {
        assert!(matches!(
            VehicleConfig::from_toml("defuzzification = \"median\""),
            Err(VehicleError::Format(_))
        ));
        assert!(matches!(
            VehicleConfig::from_toml("step = -1.0"),
            Err(VehicleError::InvalidConfig(_))
        ));
        assert!(matches!(
            VehicleConfig::from_toml("step = 1e-12"),
            Err(VehicleError::InvalidConfig(_))
        ));
    }
}
