//! Fuzzdrive CLI - fuzzy vehicle control from the command line.

use clap::Parser;
use fuzzdrive_cli::commands;
use fuzzdrive_cli::repl;
use fuzzdrive_cli::{Cli, Command, Config, Formatter};
use fuzzdrive_vehicle::{System, VehicleController, VehicleReadings};
use tracing::debug;
use tracing_subscriber::EnvFilter;

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> fuzzdrive_cli::Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Load config from --config or the default location
    let config_path = match cli.config.clone() {
        Some(path) => path,
        None => Config::path()?,
    };
    let config = Config::load_from(&config_path)?;

    init_tracing(&config.settings.log_level, cli.verbose);
    debug!("Using configuration at {}", config_path.display());

    // Determine output format
    let format = cli
        .format
        .map(Into::into)
        .unwrap_or(config.settings.format);

    // Determine color setting
    let color_enabled = !cli.no_color && config.settings.color;

    let formatter = Formatter::new(format, color_enabled);

    // Config management does not need a controller
    let command = match cli.command {
        Some(Command::Config(args)) => {
            return commands::execute_config(args, &config, &config_path, &formatter);
        }
        other => other,
    };

    let controller = VehicleController::new(config.vehicle.clone())?;

    match command {
        None | Some(Command::Repl) => {
            repl::run_repl(&controller, &config, &formatter)?;
        }
        Some(Command::Compute(args)) => {
            commands::execute_compute(args, &controller, &formatter)?;
        }
        Some(Command::Braking(args)) => {
            let readings = VehicleReadings::new().distance(args.distance).speed(args.speed);
            commands::execute_system(System::Braking, readings, &controller, &formatter)?;
        }
        Some(Command::Steering(args)) => {
            let readings = VehicleReadings::new().road(args.road);
            commands::execute_system(System::Steering, readings, &controller, &formatter)?;
        }
        Some(Command::Acceleration(args)) => {
            let readings = VehicleReadings::new().speed(args.speed).road(args.road);
            commands::execute_system(System::Acceleration, readings, &controller, &formatter)?;
        }
        Some(Command::Terms(args)) => {
            commands::execute_terms(args, &controller, &formatter)?;
        }
        Some(Command::Rules(args)) => {
            commands::execute_rules(args, &controller, &formatter)?;
        }
        Some(Command::Aggregate(args)) => {
            commands::execute_aggregate(args, &controller, &formatter)?;
        }
        Some(Command::Config(_)) => unreachable!(),
    }

    Ok(())
}

/// Log to stderr. RUST_LOG wins over the configured level; --verbose wins over both.
fn init_tracing(level: &str, verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level))
    };

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .with_target(false)
        .init();
}
