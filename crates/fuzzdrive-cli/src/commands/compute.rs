//! Compute command implementations.

use crate::cli::ReadingArgs;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use fuzzdrive_vehicle::{System, VehicleController, VehicleReadings};

/// Execute the compute command: every system, each result reported on its own.
pub fn execute_compute(
    args: ReadingArgs,
    controller: &VehicleController,
    formatter: &Formatter,
) -> Result<()> {
    if args.is_empty() {
        return Err(CliError::InvalidInput(
            "Give at least one of --road, --speed, --distance".to_string(),
        ));
    }

    let outputs = controller.compute(&VehicleReadings::from(&args));
    let results: Vec<_> = outputs.iter().collect();
    println!("{}", formatter.format_results(&results)?);

    Ok(())
}

/// Execute a single-system command.
pub fn execute_system(
    system: System,
    readings: VehicleReadings,
    controller: &VehicleController,
    formatter: &Formatter,
) -> Result<()> {
    let result = controller.compute_system(system, &readings);
    println!("{}", formatter.format_results(&[(system, &result)])?);
    Ok(())
}
