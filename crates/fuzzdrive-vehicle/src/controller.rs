//! Vehicle controller - three inference engines behind one entry point
//!
//! Each control system owns its own engine. A compute over
//! [`VehicleReadings`] runs every system independently, so one system
//! failing (missing reading, no active rules) leaves the others intact.

use crate::config::VehicleConfig;
use crate::error::{Result, VehicleError};
use crate::rules::{acceleration_rules, braking_rules, steering_rules};
use crate::variables::{
    self, ACCELERATION, BRAKING_FORCE, DISTANCE_TO_OBSTACLE, ROAD_CONDITIONS, STEERING_ANGLE,
    VEHICLE_SPEED,
};
use fuzzdrive_engine::{FuzzyError, Inference, InferenceEngine, Simulation};
use std::fmt;
use std::str::FromStr;
use tracing::{debug, info};

/// One of the three control systems
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum System {
    /// Braking force from distance and speed
    Braking,
    /// Steering angle from road conditions
    Steering,
    /// Acceleration from speed and road conditions
    Acceleration,
}

impl System {
    /// Every system, in reporting order
    pub const ALL: [System; 3] = [System::Braking, System::Steering, System::Acceleration];

    /// Get the system name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            System::Braking => "braking",
            System::Steering => "steering",
            System::Acceleration => "acceleration",
        }
    }

    /// Parse a system from a string
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "braking" | "brake" => Some(System::Braking),
            "steering" | "steer" => Some(System::Steering),
            "acceleration" | "accel" => Some(System::Acceleration),
            _ => None,
        }
    }

    /// Readings the system consumes
    pub fn inputs(&self) -> &'static [&'static str] {
        match self {
            System::Braking => &[DISTANCE_TO_OBSTACLE, VEHICLE_SPEED],
            System::Steering => &[ROAD_CONDITIONS],
            System::Acceleration => &[VEHICLE_SPEED, ROAD_CONDITIONS],
        }
    }

    /// Output variable the system produces
    pub fn output(&self) -> &'static str {
        match self {
            System::Braking => BRAKING_FORCE,
            System::Steering => STEERING_ANGLE,
            System::Acceleration => ACCELERATION,
        }
    }

    /// Unit of the output, for display
    pub fn unit(&self) -> &'static str {
        match self {
            System::Braking => "%",
            System::Steering => "degrees",
            System::Acceleration => "m/s^2",
        }
    }
}

impl fmt::Display for System {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for System {
    type Err = VehicleError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| VehicleError::UnknownSystem(s.to_string()))
    }
}

/// Crisp sensor readings; absent readings are reported, never defaulted
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct VehicleReadings {
    /// Road condition score
    pub road_conditions: Option<f64>,
    /// Vehicle speed
    pub vehicle_speed: Option<f64>,
    /// Distance to the nearest obstacle
    pub distance_to_obstacle: Option<f64>,
}

impl VehicleReadings {
    /// No readings
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the road condition score
    pub fn road(mut self, value: f64) -> Self {
        self.road_conditions = Some(value);
        self
    }

    /// Set the vehicle speed
    pub fn speed(mut self, value: f64) -> Self {
        self.vehicle_speed = Some(value);
        self
    }

    /// Set the distance to the nearest obstacle
    pub fn distance(mut self, value: f64) -> Self {
        self.distance_to_obstacle = Some(value);
        self
    }

    /// Reading for a named input variable
    pub fn get(&self, name: &str) -> Option<f64> {
        match name {
            ROAD_CONDITIONS => self.road_conditions,
            VEHICLE_SPEED => self.vehicle_speed,
            DISTANCE_TO_OBSTACLE => self.distance_to_obstacle,
            _ => None,
        }
    }
}

/// Per-system results of one controller compute
#[derive(Debug, Clone, PartialEq)]
pub struct ControlOutputs {
    /// Braking force, percent
    pub braking_force: std::result::Result<f64, FuzzyError>,
    /// Steering angle, degrees
    pub steering_angle: std::result::Result<f64, FuzzyError>,
    /// Acceleration, m/s²
    pub acceleration: std::result::Result<f64, FuzzyError>,
}

impl ControlOutputs {
    /// Result for one system
    pub fn get(&self, system: System) -> &std::result::Result<f64, FuzzyError> {
        match system {
            System::Braking => &self.braking_force,
            System::Steering => &self.steering_angle,
            System::Acceleration => &self.acceleration,
        }
    }

    /// Every system with its result, in reporting order
    pub fn iter(&self) -> impl Iterator<Item = (System, &std::result::Result<f64, FuzzyError>)> {
        System::ALL.into_iter().map(move |s| (s, self.get(s)))
    }

    /// Check if every system produced a crisp value
    pub fn is_complete(&self) -> bool {
        self.iter().all(|(_, r)| r.is_ok())
    }
}

/// Braking, steering and acceleration engines built from one configuration
#[derive(Debug, Clone)]
pub struct VehicleController {
    config: VehicleConfig,
    braking: InferenceEngine,
    steering: InferenceEngine,
    acceleration: InferenceEngine,
}

impl VehicleController {
    /// Build all three engines
    ///
    /// # Errors
    /// `InvalidConfig` when the configuration fails validation; a wrapped
    /// `ConfigError` if an engine rejects its variables or rules.
    pub fn new(config: VehicleConfig) -> Result<Self> {
        config.validate().map_err(VehicleError::InvalidConfig)?;
        let step = config.step;
        let method = config.defuzzification;

        let braking = InferenceEngine::builder()
            .variable(variables::distance_to_obstacle(step)?)
            .variable(variables::vehicle_speed(step)?)
            .variable(variables::braking_force(step, method)?)
            .rules(braking_rules())
            .build()?;

        let steering = InferenceEngine::builder()
            .variable(variables::road_conditions(step)?)
            .variable(variables::steering_angle(step, method)?)
            .rules(steering_rules())
            .build()?;

        let acceleration = InferenceEngine::builder()
            .variable(variables::vehicle_speed(step)?)
            .variable(variables::road_conditions(step)?)
            .variable(variables::acceleration(step, method)?)
            .rules(acceleration_rules())
            .build()?;

        info!(
            "Vehicle controller ready (step {}, {}, clip_to_bounds {})",
            step, method, config.clip_to_bounds
        );

        Ok(Self {
            config,
            braking,
            steering,
            acceleration,
        })
    }

    /// Configuration the engines were built from
    pub fn config(&self) -> &VehicleConfig {
        &self.config
    }

    /// Engine of one system
    pub fn engine(&self, system: System) -> &InferenceEngine {
        match system {
            System::Braking => &self.braking,
            System::Steering => &self.steering,
            System::Acceleration => &self.acceleration,
        }
    }

    /// New session on one system's engine, honoring `clip_to_bounds`
    pub fn session(&self, system: System) -> Simulation<'_> {
        Simulation::new(self.engine(system)).with_clip_to_bounds(self.config.clip_to_bounds)
    }

    /// Run one system on the readings it needs
    ///
    /// # Errors
    /// `MissingInput` when a needed reading is absent, `InvalidInput` when
    /// one is not finite.
    pub fn infer(&self, system: System, readings: &VehicleReadings) -> std::result::Result<Inference, FuzzyError> {
        let mut session = self.session(system);
        for &name in system.inputs() {
            if let Some(value) = readings.get(name) {
                session.set_input(name, value)?;
            }
        }
        session.compute()?;
        let inference = session.take_outputs()?;
        debug!("{} computed: {:?}", system, inference.output(system.output()));
        Ok(inference)
    }

    /// Crisp output of one system
    pub fn compute_system(&self, system: System, readings: &VehicleReadings) -> std::result::Result<f64, FuzzyError> {
        self.infer(system, readings)?.output(system.output())
    }

    /// Run every system; each result stands on its own
    pub fn compute(&self, readings: &VehicleReadings) -> ControlOutputs {
        ControlOutputs {
            braking_force: self.compute_system(System::Braking, readings),
            steering_angle: self.compute_system(System::Steering, readings),
            acceleration: self.compute_system(System::Acceleration, readings),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn controller() -> VehicleController {
        VehicleController::new(VehicleConfig::default()).unwrap()
    }

    #[test]
    fn test_system_parse() {
        assert_eq!(System::parse("Braking"), Some(System::Braking));
        assert_eq!(System::parse("steer"), Some(System::Steering));
        assert_eq!("accel".parse::<System>().unwrap(), System::Acceleration);
        assert_eq!(
            "hover".parse::<System>().unwrap_err(),
            VehicleError::UnknownSystem("hover".to_string())
        );
    }

    #[test]
    fn test_system_names_roundtrip() {
        for system in System::ALL {
            assert_eq!(System::parse(system.as_str()), Some(system));
        }
    }

    #[test]
    fn test_engines_require_their_inputs() {
        let controller = controller();
        for system in System::ALL {
            let mut required: Vec<&str> = controller
                .engine(system)
                .required_inputs()
                .iter()
                .map(String::as_str)
                .collect();
            let mut expected = system.inputs().to_vec();
            required.sort();
            expected.sort();
            assert_eq!(required, expected, "{}", system);
        }
    }

    #[test]
    fn test_readings_lookup() {
        let readings = VehicleReadings::new().road(75.0).distance(15.0);
        assert_eq!(readings.get(ROAD_CONDITIONS), Some(75.0));
        assert_eq!(readings.get(VEHICLE_SPEED), None);
        assert_eq!(readings.get("altitude"), None);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = VehicleConfig {
            step: -1.0,
            ..VehicleConfig::default()
        };
        assert!(matches!(
            VehicleController::new(config),
            Err(VehicleError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_tiny_step_rejected_before_sampling() {
        let config = VehicleConfig {
            step: 1e-12,
            ..VehicleConfig::default()
        };
        assert!(matches!(
            VehicleController::new(config),
            Err(VehicleError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_partial_readings_give_partial_outputs() {
        let outputs = controller().compute(&VehicleReadings::new().road(75.0));
        assert!(outputs.steering_angle.is_ok());
        assert_eq!(
            outputs.braking_force,
            Err(FuzzyError::MissingInput(DISTANCE_TO_OBSTACLE.to_string()))
        );
        assert_eq!(
            outputs.acceleration,
            Err(FuzzyError::MissingInput(VEHICLE_SPEED.to_string()))
        );
        assert!(!outputs.is_complete());
    }

    #[test]
    fn test_non_finite_reading() {
        let result = controller().compute_system(System::Steering, &VehicleReadings::new().road(f64::NAN));
        assert!(matches!(result, Err(FuzzyError::InvalidInput { .. })));
    }
}
