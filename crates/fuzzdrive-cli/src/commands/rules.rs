//! Rules command implementation.

use crate::cli::SystemArgs;
use crate::error::Result;
use crate::output::Formatter;
use fuzzdrive_vehicle::{System, VehicleController, VehicleReadings};

/// Execute the rules command.
///
/// Without readings, only the rule table is listed. With readings, the
/// system is inferred first and each rule's firing strength is shown.
pub fn execute_rules(
    args: SystemArgs,
    controller: &VehicleController,
    formatter: &Formatter,
) -> Result<()> {
    let system = System::from(args.system);
    let rules = controller.engine(system).rules();

    if args.readings.is_empty() {
        println!("{}", formatter.format_rules(rules, None)?);
        return Ok(());
    }

    let inference = controller.infer(system, &VehicleReadings::from(&args.readings))?;
    println!("{}", formatter.format_rules(rules, Some(inference.activations()))?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::{ReadingArgs, SystemArg};
    use crate::config::OutputFormat;
    use crate::error::CliError;
    use fuzzdrive_engine::FuzzyError;
    use fuzzdrive_vehicle::VehicleConfig;

    #[test]
    fn test_rules_listing() {
        let controller = VehicleController::new(VehicleConfig::default()).unwrap();
        let formatter = Formatter::new(OutputFormat::Quiet, false);
        let args = SystemArgs {
            system: SystemArg::Braking,
            readings: ReadingArgs::default(),
        };
        assert!(execute_rules(args, &controller, &formatter).is_ok());
    }

    #[test]
    fn test_rules_with_incomplete_readings() {
        let controller = VehicleController::new(VehicleConfig::default()).unwrap();
        let formatter = Formatter::new(OutputFormat::Quiet, false);
        let args = SystemArgs {
            system: SystemArg::Braking,
            readings: ReadingArgs {
                distance: Some(15.0),
                ..ReadingArgs::default()
            },
        };
        assert!(matches!(
            execute_rules(args, &controller, &formatter),
            Err(CliError::Fuzzy(FuzzyError::MissingInput(_)))
        ));
    }
}
