//! Terms command implementation.

use crate::cli::TermsArgs;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use fuzzdrive_engine::LinguisticVariable;
use fuzzdrive_vehicle::{System, VehicleController};

/// Execute the terms command.
pub fn execute_terms(
    args: TermsArgs,
    controller: &VehicleController,
    formatter: &Formatter,
) -> Result<()> {
    let variable = find_variable(controller, &args.variable)?;
    println!("{}", formatter.format_terms(variable)?);
    Ok(())
}

/// Look a variable up across all three systems.
pub fn find_variable<'c>(controller: &'c VehicleController, name: &str) -> Result<&'c LinguisticVariable> {
    System::ALL
        .iter()
        .find_map(|&system| controller.engine(system).variable(name))
        .ok_or_else(|| {
            CliError::InvalidInput(format!(
                "Unknown variable '{}'. Known variables: {}",
                name,
                known_variables(controller).join(", ")
            ))
        })
}

fn known_variables(controller: &VehicleController) -> Vec<String> {
    let mut names: Vec<String> = System::ALL
        .iter()
        .flat_map(|&system| {
            let engine = controller.engine(system);
            engine
                .antecedents()
                .iter()
                .chain(engine.consequents())
                .map(|v| v.name().to_string())
                .collect::<Vec<_>>()
        })
        .collect();
    names.sort();
    names.dedup();
    names
}
