//! CLI command definitions and argument parsing.

use clap::{Args, Parser, Subcommand};
use fuzzdrive_vehicle::{System, VehicleReadings};
use std::path::PathBuf;

/// Fuzzdrive - fuzzy braking, steering and acceleration control.
#[derive(Debug, Parser)]
#[command(name = "fuzzdrive")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<CliFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Configuration file path
    #[arg(short, long, global = true, env = "FUZZDRIVE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Log at debug level regardless of RUST_LOG and the configured level
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Output format options.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum CliFormat {
    /// Table format (default)
    Table,
    /// JSON format
    Json,
    /// Quiet format (values only)
    Quiet,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Compute every system whose readings are given
    Compute(ReadingArgs),

    /// Compute braking force
    Braking(BrakingArgs),

    /// Compute steering angle
    Steering(SteeringArgs),

    /// Compute acceleration
    Acceleration(AccelerationArgs),

    /// Show the membership curves of a variable
    Terms(TermsArgs),

    /// List a system's rules, with firing strengths when readings are given
    Rules(SystemArgs),

    /// Show the aggregated output set of a system
    Aggregate(SystemArgs),

    /// Manage the configuration file
    Config(ConfigArgs),

    /// Enter interactive session mode
    Repl,
}

/// Optional sensor readings.
#[derive(Debug, Clone, Default, Args)]
pub struct ReadingArgs {
    /// Road condition score (0-100)
    #[arg(short, long)]
    pub road: Option<f64>,

    /// Vehicle speed (0-100)
    #[arg(short, long)]
    pub speed: Option<f64>,

    /// Distance to obstacle (0-50)
    #[arg(short, long)]
    pub distance: Option<f64>,
}

impl From<&ReadingArgs> for VehicleReadings {
    fn from(args: &ReadingArgs) -> Self {
        VehicleReadings {
            road_conditions: args.road,
            vehicle_speed: args.speed,
            distance_to_obstacle: args.distance,
        }
    }
}

impl ReadingArgs {
    /// Check if no reading was given
    pub fn is_empty(&self) -> bool {
        self.road.is_none() && self.speed.is_none() && self.distance.is_none()
    }
}

/// Arguments for the braking command.
#[derive(Debug, Parser)]
pub struct BrakingArgs {
    /// Distance to obstacle (0-50)
    #[arg(short, long)]
    pub distance: f64,

    /// Vehicle speed (0-100)
    #[arg(short, long)]
    pub speed: f64,
}

/// Arguments for the steering command.
#[derive(Debug, Parser)]
pub struct SteeringArgs {
    /// Road condition score (0-100)
    #[arg(short, long)]
    pub road: f64,
}

/// Arguments for the acceleration command.
#[derive(Debug, Parser)]
pub struct AccelerationArgs {
    /// Vehicle speed (0-100)
    #[arg(short, long)]
    pub speed: f64,

    /// Road condition score (0-100)
    #[arg(short, long)]
    pub road: f64,
}

/// Arguments for the terms command.
#[derive(Debug, Parser)]
pub struct TermsArgs {
    /// Variable name (e.g. vehicle_speed, steering_angle)
    pub variable: String,
}

/// A system plus optional readings.
#[derive(Debug, Parser)]
pub struct SystemArgs {
    /// Control system
    #[arg(value_enum)]
    pub system: SystemArg,

    #[command(flatten)]
    pub readings: ReadingArgs,
}

/// Arguments for configuration management.
#[derive(Debug, Parser)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: ConfigAction,
}

/// Configuration actions.
#[derive(Debug, Subcommand)]
pub enum ConfigAction {
    /// Print the effective configuration
    Show,

    /// Write the default configuration file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

/// System argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum SystemArg {
    /// Braking force from distance and speed
    Braking,
    /// Steering angle from road conditions
    Steering,
    /// Acceleration from speed and road conditions
    Acceleration,
}

impl From<CliFormat> for crate::config::OutputFormat {
    fn from(format: CliFormat) -> Self {
        match format {
            CliFormat::Table => crate::config::OutputFormat::Table,
            CliFormat::Json => crate::config::OutputFormat::Json,
            CliFormat::Quiet => crate::config::OutputFormat::Quiet,
        }
    }
}

impl From<SystemArg> for System {
    fn from(system: SystemArg) -> Self {
        match system {
            SystemArg::Braking => System::Braking,
            SystemArg::Steering => System::Steering,
            SystemArg::Acceleration => System::Acceleration,
        }
    }
}
