//! Aggregate command implementation.

use crate::cli::SystemArgs;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use fuzzdrive_vehicle::{System, VehicleController, VehicleReadings};

/// Execute the aggregate command.
pub fn execute_aggregate(
    args: SystemArgs,
    controller: &VehicleController,
    formatter: &Formatter,
) -> Result<()> {
    let system = System::from(args.system);
    let inference = controller.infer(system, &VehicleReadings::from(&args.readings))?;

    let set = inference.aggregated(system.output()).ok_or_else(|| {
        CliError::InvalidInput(format!("No aggregated set for {}", system.output()))
    })?;
    println!("{}", formatter.format_aggregate(set, &inference.output(system.output()))?);

    for warning in inference.warnings() {
        eprintln!(
            "{}",
            formatter.warning(&format!(
                "{}={} lies outside [{}, {}]",
                warning.variable, warning.value, warning.min, warning.max
            ))
        );
    }

    Ok(())
}
