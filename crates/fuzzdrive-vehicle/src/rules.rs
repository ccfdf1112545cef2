//! Rule tables for braking, steering and acceleration
//!
//! Each table pairs a few narrow two-reading rules with broad single-reading
//! coverage rules. The overlaps are kept as configured; max-aggregation
//! decides their combined effect.

use crate::variables::{
    ACCELERATION, BRAKING_FORCE, DISTANCE_TO_OBSTACLE, ROAD_CONDITIONS, STEERING_ANGLE,
    VEHICLE_SPEED,
};
use fuzzdrive_engine::{Expr, Rule};

fn distance(term: &str) -> Expr {
    Expr::is(DISTANCE_TO_OBSTACLE, term)
}

fn speed(term: &str) -> Expr {
    Expr::is(VEHICLE_SPEED, term)
}

fn road(term: &str) -> Expr {
    Expr::is(ROAD_CONDITIONS, term)
}

/// Braking force from distance and speed
pub fn braking_rules() -> Vec<Rule> {
    let brake = |label: &str, when: Expr, term: &str| Rule::new(when, BRAKING_FORCE, term).labelled(label);
    vec![
        brake("rule1", distance("close") & speed("fast"), "high"),
        brake("rule2", distance("medium") & speed("moderate"), "moderate"),
        brake("rule3", distance("far") & speed("slow"), "low"),
        brake("rule3a", distance("close"), "high"),
        brake("rule3b", distance("medium"), "moderate"),
        brake("rule3c", distance("far"), "low"),
        brake("rule3d", speed("fast"), "moderate"),
        brake("rule3e", speed("moderate"), "moderate"),
        brake("rule3f", speed("slow"), "low"),
    ]
}

/// Steering angle from road conditions
pub fn steering_rules() -> Vec<Rule> {
    let steer = |label: &str, when: Expr, term: &str| Rule::new(when, STEERING_ANGLE, term).labelled(label);
    vec![
        steer("rule4", road("poor"), "slight_left"),
        steer("rule5", road("good"), "straight"),
        steer("rule5a", road("average"), "straight"),
    ]
}

/// Acceleration from speed and road conditions
pub fn acceleration_rules() -> Vec<Rule> {
    let accel = |label: &str, when: Expr, term: &str| Rule::new(when, ACCELERATION, term).labelled(label);
    vec![
        accel("rule6", speed("slow") & road("poor"), "maintain"),
        accel("rule7", speed("fast") & road("good"), "accelerate"),
        accel("rule7a", speed("moderate") & road("average"), "maintain"),
        accel("rule7b", speed("slow"), "accelerate"),
        accel("rule7c", speed("moderate"), "maintain"),
        accel("rule7d", speed("fast"), "decelerate"),
        accel("rule7e", road("poor"), "maintain"),
        accel("rule7f", road("average"), "maintain"),
        accel("rule7g", road("good"), "accelerate"),
    ]
}
