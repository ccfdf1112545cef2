//! Fuzzdrive Vehicle
//!
//! Fuzzy control of a vehicle's braking, steering and acceleration from
//! three sensor readings: road condition score, speed, and distance to the
//! nearest obstacle.
//!
//! # Example
//!
//! ```
//! use fuzzdrive_vehicle::{System, VehicleConfig, VehicleController, VehicleReadings};
//!
//! let controller = VehicleController::new(VehicleConfig::default())?;
//! let readings = VehicleReadings::new().distance(15.0).speed(60.0).road(75.0);
//! let outputs = controller.compute(&readings);
//!
//! let braking = outputs.get(System::Braking).clone()?;
//! assert!((braking - 50.0).abs() < 1e-9);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod controller;
pub mod error;
pub mod rules;
pub mod variables;

pub use config::VehicleConfig;
pub use controller::{ControlOutputs, System, VehicleController, VehicleReadings};
pub use error::{Result, VehicleError};
