//! Interactive REPL (Read-Eval-Print Loop) mode.
//!
//! The REPL drives one [`Simulation`] session at a time: readings are bound
//! with `set`, `compute` runs inference, and `take` ends the cycle so the
//! readings can be bound again.

use crate::config::Config;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use fuzzdrive_engine::Simulation;
use fuzzdrive_vehicle::{System, VehicleController};
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use std::path::PathBuf;

/// Run the interactive REPL.
pub fn run_repl(controller: &VehicleController, config: &Config, formatter: &Formatter) -> Result<()> {
    println!("{}", formatter.info("Fuzzdrive REPL - Type 'help' for commands, 'exit' to quit"));
    println!();

    let editor_config = rustyline::Config::builder()
        .max_history_size(config.settings.history_size)
        .map_err(editor_error)?
        .build();
    let mut editor = DefaultEditor::with_config(editor_config).map_err(editor_error)?;

    // Load history
    let history_path = get_history_path()?;
    let _ = editor.load_history(&history_path);

    let mut state = ReplState::new(controller, System::Braking);

    loop {
        let prompt = format!("fuzzdrive:{}> ", state.system);

        match editor.readline(&prompt) {
            Ok(line) => {
                let line = line.trim();

                if line.is_empty() {
                    continue;
                }

                editor.add_history_entry(line).ok();

                match parse_repl_command(line) {
                    Ok(ReplCommand::Exit) => {
                        println!("{}", formatter.info("Goodbye!"));
                        break;
                    }
                    Ok(ReplCommand::Help) => {
                        print_help(formatter);
                    }
                    Ok(cmd) => match state.execute(cmd) {
                        Ok(message) => println!("{}", render(&message, formatter)?),
                        Err(e) => eprintln!("{}", formatter.error(&e.to_string())),
                    },
                    Err(e) => {
                        eprintln!("{}", formatter.error(&e.to_string()));
                    }
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("{}", formatter.info("Use 'exit' to quit"));
            }
            Err(ReadlineError::Eof) => {
                break;
            }
            Err(err) => {
                eprintln!("{}", formatter.error(&format!("Error: {}", err)));
                break;
            }
        }
    }

    // Save history
    editor.save_history(&history_path).ok();

    Ok(())
}

/// REPL command type.
#[derive(Debug, Clone, PartialEq)]
enum ReplCommand {
    Exit,
    Help,
    Use(System),
    Set { variable: String, value: f64 },
    Compute,
    Show,
    Take,
    Reset,
}

/// What a command produced, before formatting.
#[derive(Debug, PartialEq)]
enum ReplOutput {
    Info(String),
    Success(String),
    Result(System, std::result::Result<f64, fuzzdrive_engine::FuzzyError>),
}

/// Parse a REPL command line.
fn parse_repl_command(line: &str) -> Result<ReplCommand> {
    let parts: Vec<&str> = line.split_whitespace().collect();

    if parts.is_empty() {
        return Err(CliError::InvalidInput("Empty command".to_string()));
    }

    match parts[0] {
        "exit" | "quit" | "q" => Ok(ReplCommand::Exit),
        "help" | "?" => Ok(ReplCommand::Help),
        "use" => {
            let name = parts
                .get(1)
                .ok_or_else(|| CliError::InvalidInput("Usage: use <braking|steering|acceleration>".to_string()))?;
            Ok(ReplCommand::Use(name.parse::<System>()?))
        }
        "set" => {
            if parts.len() != 3 {
                return Err(CliError::InvalidInput("Usage: set <variable> <value>".to_string()));
            }
            let value = parts[2]
                .parse::<f64>()
                .map_err(|_| CliError::InvalidInput(format!("Not a number: {}", parts[2])))?;
            Ok(ReplCommand::Set {
                variable: parts[1].to_string(),
                value,
            })
        }
        "compute" | "run" => Ok(ReplCommand::Compute),
        "show" => Ok(ReplCommand::Show),
        "take" => Ok(ReplCommand::Take),
        "reset" => Ok(ReplCommand::Reset),
        _ => Err(CliError::InvalidInput(format!(
            "Unknown command: {}. Type 'help' for available commands.",
            parts[0]
        ))),
    }
}

/// Session state carried across REPL lines.
struct ReplState<'c> {
    controller: &'c VehicleController,
    system: System,
    session: Simulation<'c>,
}

impl<'c> ReplState<'c> {
    fn new(controller: &'c VehicleController, system: System) -> Self {
        Self {
            controller,
            system,
            session: controller.session(system),
        }
    }

    fn execute(&mut self, cmd: ReplCommand) -> Result<ReplOutput> {
        match cmd {
            ReplCommand::Use(system) => {
                *self = Self::new(self.controller, system);
                Ok(ReplOutput::Success(format!(
                    "Using {} (inputs: {})",
                    system,
                    system.inputs().join(", ")
                )))
            }
            ReplCommand::Set { variable, value } => {
                self.session.set_input(&variable, value)?;
                let bound = self.session.input(&variable).unwrap_or(value);
                Ok(ReplOutput::Success(format!("{} = {}", variable, bound)))
            }
            ReplCommand::Compute => {
                let inference = self.session.compute()?;
                Ok(ReplOutput::Result(self.system, inference.output(self.system.output())))
            }
            ReplCommand::Show => Ok(ReplOutput::Info(self.describe())),
            ReplCommand::Take => {
                let inference = self.session.take_outputs()?;
                Ok(ReplOutput::Result(self.system, inference.output(self.system.output())))
            }
            ReplCommand::Reset => {
                self.session.reset();
                Ok(ReplOutput::Success("Session reset".to_string()))
            }
            ReplCommand::Exit | ReplCommand::Help => Ok(ReplOutput::Info(String::new())),
        }
    }

    fn describe(&self) -> String {
        let bindings: Vec<String> = self
            .system
            .inputs()
            .iter()
            .map(|name| match self.session.input(name) {
                Some(value) => format!("{} = {}", name, value),
                None => format!("{} unbound", name),
            })
            .collect();
        let output = match self.session.output(self.system.output()) {
            Ok(value) => format!("{} = {:.4}", self.system.output(), value),
            Err(e) => format!("{}: {}", self.system.output(), e),
        };
        format!("{} | {} | {}", self.system, bindings.join(", "), output)
    }
}

fn render(output: &ReplOutput, formatter: &Formatter) -> Result<String> {
    match output {
        ReplOutput::Info(message) => Ok(formatter.info(message)),
        ReplOutput::Success(message) => Ok(formatter.success(message)),
        ReplOutput::Result(system, result) => formatter.format_results(&[(*system, result)]),
    }
}

fn editor_error(err: ReadlineError) -> CliError {
    CliError::Io(std::io::Error::other(format!("Failed to initialize editor: {}", err)))
}

fn get_history_path() -> Result<PathBuf> {
    let dir = Config::dir()?;
    std::fs::create_dir_all(&dir)?;
    Ok(dir.join("history.txt"))
}

fn print_help(formatter: &Formatter) {
    println!("{}", formatter.info("Available commands:"));
    println!();
    println!("  use <system>            - Switch to braking, steering or acceleration");
    println!("  set <variable> <value>  - Bind a reading for this cycle");
    println!("  compute, run            - Run inference on the bound readings");
    println!("  show                    - Show bindings and the last output");
    println!("  take                    - Print the output and end the cycle");
    println!("  reset                   - Discard bindings and outputs");
    println!("  help, ?                 - Show this help");
    println!("  exit, quit, q           - Exit REPL");
    println!();
}
