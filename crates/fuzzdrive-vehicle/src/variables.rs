//! Linguistic variables of the vehicle model
//!
//! Three sensor readings feed three actuator outputs. Every universe is
//! sampled at the configured step; term breakpoints are fixed.

use fuzzdrive_engine::{ConfigError, Defuzzification, LinguisticVariable, Universe};

/// Road condition score, 0 (poor) to 100 (good)
pub const ROAD_CONDITIONS: &str = "road_conditions";
/// Vehicle speed, km/h
pub const VEHICLE_SPEED: &str = "vehicle_speed";
/// Distance to the nearest obstacle, m
pub const DISTANCE_TO_OBSTACLE: &str = "distance_to_obstacle";
/// Braking force, percent
pub const BRAKING_FORCE: &str = "braking_force";
/// Steering angle, degrees (negative is left)
pub const STEERING_ANGLE: &str = "steering_angle";
/// Acceleration, m/s²
pub const ACCELERATION: &str = "acceleration";

type Result<T> = std::result::Result<T, ConfigError>;

fn universe(variable: &str, min: f64, max: f64, step: f64) -> Result<Universe> {
    Universe::range(min, max, step).map_err(|e| e.for_variable(variable))
}

/// `road_conditions`: poor, average, good over 0..=100
pub fn road_conditions(step: f64) -> Result<LinguisticVariable> {
    LinguisticVariable::antecedent(ROAD_CONDITIONS, universe(ROAD_CONDITIONS, 0.0, 100.0, step)?)
        .triangle("poor", 0.0, 0.0, 30.0)?
        .triangle("average", 20.0, 50.0, 80.0)?
        .triangle("good", 70.0, 100.0, 100.0)
}

/// `vehicle_speed`: slow, moderate, fast over 0..=100
pub fn vehicle_speed(step: f64) -> Result<LinguisticVariable> {
    LinguisticVariable::antecedent(VEHICLE_SPEED, universe(VEHICLE_SPEED, 0.0, 100.0, step)?)
        .triangle("slow", 0.0, 0.0, 40.0)?
        .triangle("moderate", 30.0, 60.0, 90.0)?
        .triangle("fast", 80.0, 100.0, 100.0)
}

/// `distance_to_obstacle`: close, medium, far over 0..=50
pub fn distance_to_obstacle(step: f64) -> Result<LinguisticVariable> {
    LinguisticVariable::antecedent(
        DISTANCE_TO_OBSTACLE,
        universe(DISTANCE_TO_OBSTACLE, 0.0, 50.0, step)?,
    )
    .triangle("close", 0.0, 0.0, 10.0)?
    .triangle("medium", 5.0, 20.0, 35.0)?
    .triangle("far", 30.0, 50.0, 50.0)
}

/// `braking_force`: low, moderate, high over 0..=100
pub fn braking_force(step: f64, method: Defuzzification) -> Result<LinguisticVariable> {
    Ok(
        LinguisticVariable::consequent(BRAKING_FORCE, universe(BRAKING_FORCE, 0.0, 100.0, step)?)
            .triangle("low", 0.0, 0.0, 30.0)?
            .triangle("moderate", 20.0, 50.0, 80.0)?
            .triangle("high", 70.0, 100.0, 100.0)?
            .with_defuzzification(method),
    )
}

/// `steering_angle`: five headings from sharp_left to sharp_right over -90..=90
pub fn steering_angle(step: f64, method: Defuzzification) -> Result<LinguisticVariable> {
    Ok(
        LinguisticVariable::consequent(STEERING_ANGLE, universe(STEERING_ANGLE, -90.0, 90.0, step)?)
            .triangle("sharp_left", -90.0, -90.0, -45.0)?
            .triangle("slight_left", -60.0, -30.0, 0.0)?
            .triangle("straight", -15.0, 0.0, 15.0)?
            .triangle("slight_right", 0.0, 30.0, 60.0)?
            .triangle("sharp_right", 45.0, 90.0, 90.0)?
            .with_defuzzification(method),
    )
}

/// `acceleration`: decelerate, maintain, accelerate over -10..=10
pub fn acceleration(step: f64, method: Defuzzification) -> Result<LinguisticVariable> {
    Ok(
        LinguisticVariable::consequent(ACCELERATION, universe(ACCELERATION, -10.0, 10.0, step)?)
            .triangle("decelerate", -10.0, -10.0, -5.0)?
            .triangle("maintain", -5.0, 0.0, 5.0)?
            .triangle("accelerate", 5.0, 10.0, 10.0)?
            .with_defuzzification(method),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_universe_sizes_at_unit_step() {
        assert_eq!(road_conditions(1.0).unwrap().universe().len(), 101);
        assert_eq!(distance_to_obstacle(1.0).unwrap().universe().len(), 51);
        let steering = steering_angle(1.0, Defuzzification::Centroid).unwrap();
        assert_eq!(steering.universe().len(), 181);
        assert_eq!(steering.universe().min(), -90.0);
        assert_eq!(acceleration(1.0, Defuzzification::Centroid).unwrap().universe().len(), 21);
    }

    #[test]
    fn test_term_order() {
        let steering = steering_angle(1.0, Defuzzification::Centroid).unwrap();
        assert_eq!(
            steering.term_names().collect::<Vec<_>>(),
            ["sharp_left", "slight_left", "straight", "slight_right", "sharp_right"]
        );
    }

    #[test]
    fn test_invalid_step_names_the_variable() {
        let err = vehicle_speed(0.0).unwrap_err();
        match err {
            ConfigError::InvalidUniverse { variable, .. } => assert_eq!(variable, VEHICLE_SPEED),
            other => panic!("Expected InvalidUniverse, got {:?}", other),
        }
    }

    #[test]
    fn test_shoulder_terms_peak_at_bounds() {
        let distance = distance_to_obstacle(1.0).unwrap();
        let close = distance.term("close").unwrap();
        assert_eq!(close.degree(0.0), 1.0);
        assert_eq!(close.degree(5.0), 0.5);
        assert_eq!(close.degree(10.0), 0.0);
    }
}
