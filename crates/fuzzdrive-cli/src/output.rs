//! Output formatting for the CLI.

use crate::config::OutputFormat;
use crate::error::Result;
use colored::*;
use fuzzdrive_engine::{AggregatedSet, FuzzyError, LinguisticVariable, Rule, RuleActivation};
use fuzzdrive_vehicle::System;
use serde_json::json;
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
};

/// Result of one control system, as handed to the formatter.
pub type SystemResult<'a> = (System, &'a std::result::Result<f64, FuzzyError>);

/// Output formatter.
pub struct Formatter {
    format: OutputFormat,
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: OutputFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
        }
    }

    /// Format crisp outputs (or their failures) of one or more systems.
    pub fn format_results(&self, results: &[SystemResult<'_>]) -> Result<String> {
        match self.format {
            OutputFormat::Json => {
                let entries: Vec<serde_json::Value> = results
                    .iter()
                    .map(|(system, result)| match result {
                        Ok(value) => json!({
                            "system": system.as_str(),
                            "output": system.output(),
                            "value": value,
                            "unit": system.unit(),
                        }),
                        Err(e) => json!({
                            "system": system.as_str(),
                            "output": system.output(),
                            "error": {
                                "kind": error_kind(e),
                                "message": e.to_string(),
                            },
                        }),
                    })
                    .collect();
                Ok(serde_json::to_string_pretty(&entries)?)
            }
            OutputFormat::Quiet => Ok(results
                .iter()
                .map(|(_, result)| match result {
                    Ok(value) => value.to_string(),
                    Err(e) => error_kind(e).to_string(),
                })
                .collect::<Vec<_>>()
                .join("\n")),
            OutputFormat::Table => {
                let mut builder = Builder::default();
                builder.push_record(["System", "Output", "Value", "Status"]);

                for (system, result) in results {
                    let (value, status) = match result {
                        Ok(v) => (format!("{:.2} {}", v, system.unit()), self.colorize("ok", "green")),
                        Err(e) => ("-".to_string(), self.colorize(&e.to_string(), "red")),
                    };
                    builder.push_record([
                        system.as_str().to_string(),
                        system.output().to_string(),
                        value,
                        status,
                    ]);
                }

                Ok(self.render(builder))
            }
        }
    }

    /// Format the membership curves of a variable.
    pub fn format_terms(&self, variable: &LinguisticVariable) -> Result<String> {
        match self.format {
            OutputFormat::Json => {
                let terms: Vec<serde_json::Value> = variable
                    .terms()
                    .map(|term| {
                        let curve: Vec<[f64; 2]> = variable
                            .curve(&term.name)
                            .unwrap_or_default()
                            .into_iter()
                            .map(|(x, mu)| [x, mu])
                            .collect();
                        json!({
                            "name": term.name,
                            "breakpoints": term.membership.breakpoints(),
                            "curve": curve,
                        })
                    })
                    .collect();
                let universe = variable.universe();
                Ok(serde_json::to_string_pretty(&json!({
                    "variable": variable.name(),
                    "role": variable.role().as_str(),
                    "min": universe.min(),
                    "max": universe.max(),
                    "samples": universe.len(),
                    "terms": terms,
                }))?)
            }
            OutputFormat::Quiet => Ok(variable
                .terms()
                .map(|term| {
                    let [left, peak, right] = term.membership.breakpoints();
                    format!("{} {} {} {}", term.name, left, peak, right)
                })
                .collect::<Vec<_>>()
                .join("\n")),
            OutputFormat::Table => {
                let mut builder = Builder::default();
                let mut header = vec![variable.name().to_string()];
                header.extend(variable.term_names().map(str::to_string));
                builder.push_record(header);

                for &x in variable.universe().samples() {
                    let mut row = vec![format!("{}", x)];
                    row.extend(variable.terms().map(|t| format!("{:.3}", t.membership.degree(x))));
                    builder.push_record(row);
                }

                Ok(self.render(builder))
            }
        }
    }

    /// Format a rule table, with firing strengths when available.
    pub fn format_rules(&self, rules: &[Rule], activations: Option<&[RuleActivation]>) -> Result<String> {
        let activation = |idx: usize| activations.and_then(|a| a.iter().find(|r| r.index == idx));

        match self.format {
            OutputFormat::Json => {
                let entries: Vec<serde_json::Value> = rules
                    .iter()
                    .enumerate()
                    .map(|(idx, rule)| {
                        let mut entry = json!({
                            "index": idx,
                            "label": rule.label(),
                            "rule": rule.to_string(),
                            "weight": rule.weight(),
                        });
                        if let Some(a) = activation(idx) {
                            entry["firing_strength"] = json!(a.firing_strength);
                            entry["activation"] = json!(a.activation);
                        }
                        entry
                    })
                    .collect();
                Ok(serde_json::to_string_pretty(&entries)?)
            }
            OutputFormat::Quiet => Ok(rules
                .iter()
                .enumerate()
                .map(|(idx, rule)| {
                    let label = rule_label(rule, idx);
                    match activation(idx) {
                        Some(a) => format!("{} {}", label, a.firing_strength),
                        None => label,
                    }
                })
                .collect::<Vec<_>>()
                .join("\n")),
            OutputFormat::Table => {
                let mut builder = Builder::default();
                let mut header = vec!["Label", "Rule", "Weight"];
                if activations.is_some() {
                    header.extend(["Strength", "Activation"]);
                }
                builder.push_record(header);

                for (idx, rule) in rules.iter().enumerate() {
                    let mut row = vec![
                        rule_label(rule, idx),
                        rule.to_string(),
                        format!("{:.2}", rule.weight()),
                    ];
                    if let Some(a) = activation(idx) {
                        let color = if a.activation > 0.0 { "green" } else { "" };
                        row.push(self.colorize(&format!("{:.3}", a.firing_strength), color));
                        row.push(self.colorize(&format!("{:.3}", a.activation), color));
                    }
                    builder.push_record(row);
                }

                Ok(self.render(builder))
            }
        }
    }

    /// Format an aggregated output set and its crisp value.
    pub fn format_aggregate(
        &self,
        set: &AggregatedSet,
        output: &std::result::Result<f64, FuzzyError>,
    ) -> Result<String> {
        match self.format {
            OutputFormat::Json => {
                let points: Vec<[f64; 2]> = set.points().map(|(x, mu)| [x, mu]).collect();
                let mut value = json!({
                    "variable": set.variable(),
                    "area": set.area(),
                    "points": points,
                });
                match output {
                    Ok(v) => value["value"] = json!(v),
                    Err(e) => {
                        value["error"] = json!({ "kind": error_kind(e), "message": e.to_string() })
                    }
                }
                Ok(serde_json::to_string_pretty(&value)?)
            }
            OutputFormat::Quiet => Ok(set
                .points()
                .map(|(x, mu)| format!("{} {}", x, mu))
                .collect::<Vec<_>>()
                .join("\n")),
            OutputFormat::Table => {
                if set.is_empty() {
                    return Ok(self.warning(&format!("No active rules for {}", set.variable())));
                }

                let mut builder = Builder::default();
                builder.push_record([set.variable(), "membership"]);
                for (x, mu) in set.points().filter(|(_, mu)| *mu > 0.0) {
                    builder.push_record([format!("{}", x), format!("{:.4}", mu)]);
                }

                let summary = match output {
                    Ok(v) => self.success(&format!("{} = {:.4}", set.variable(), v)),
                    Err(e) => self.error(&e.to_string()),
                };
                Ok(format!("{}\n{}", self.render(builder), summary))
            }
        }
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), "green")
    }

    /// Format an error message.
    pub fn error(&self, message: &str) -> String {
        self.colorize(&format!("✗ {}", message), "red")
    }

    /// Format an info message.
    pub fn info(&self, message: &str) -> String {
        self.colorize(&format!("ℹ {}", message), "blue")
    }

    /// Format a warning message.
    pub fn warning(&self, message: &str) -> String {
        self.colorize(&format!("⚠ {}", message), "yellow")
    }

    fn render(&self, builder: Builder) -> String {
        let mut table = builder.build();
        table
            .with(Style::rounded())
            .with(Modify::new(Rows::first()).with(Alignment::center()));
        table.to_string()
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "red" => text.red().to_string(),
            "green" => text.green().to_string(),
            "blue" => text.blue().to_string(),
            "yellow" => text.yellow().to_string(),
            "cyan" => text.cyan().to_string(),
            _ => text.to_string(),
        }
    }
}

/// Stable machine-readable name of an inference failure.
pub fn error_kind(err: &FuzzyError) -> &'static str {
    match err {
        FuzzyError::Config(_) => "configuration",
        FuzzyError::UnknownTerm { .. } => "unknown_term",
        FuzzyError::UnknownVariable(_) => "unknown_variable",
        FuzzyError::InvalidInput { .. } => "invalid_input",
        FuzzyError::MissingInput(_) => "missing_input",
        FuzzyError::AlreadyBound(_) => "already_bound",
        FuzzyError::NoActiveRules(_) => "no_active_rules",
        FuzzyError::NotComputed => "not_computed",
    }
}

fn rule_label(rule: &Rule, idx: usize) -> String {
    rule.label().map(str::to_string).unwrap_or_else(|| format!("#{}", idx))
}

#[cfg(test)]
mod tests {
    use super::*;
    use fuzzdrive_vehicle::{VehicleConfig, VehicleController, VehicleReadings};

    fn controller() -> VehicleController {
        VehicleController::new(VehicleConfig::default()).unwrap()
    }

    #[test]
    fn test_results_json() {
        let formatter = Formatter::new(OutputFormat::Json, false);
        let ok = Ok(50.0);
        let missing = Err(FuzzyError::MissingInput("vehicle_speed".to_string()));
        let output = formatter
            .format_results(&[(System::Braking, &ok), (System::Acceleration, &missing)])
            .unwrap();

        let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(parsed[0]["value"], 50.0);
        assert_eq!(parsed[0]["unit"], "%");
        assert_eq!(parsed[1]["error"]["kind"], "missing_input");
    }

    #[test]
    fn test_results_quiet() {
        let formatter = Formatter::new(OutputFormat::Quiet, false);
        let ok = Ok(1.5);
        let none = Err(FuzzyError::NoActiveRules("steering_angle".to_string()));
        let output = formatter
            .format_results(&[(System::Acceleration, &ok), (System::Steering, &none)])
            .unwrap();
        assert_eq!(output, "1.5\nno_active_rules");
    }

    #[test]
    fn test_results_table() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        let ok = Ok(50.0);
        let output = formatter.format_results(&[(System::Braking, &ok)]).unwrap();
        assert!(output.contains("braking_force"));
        assert!(output.contains("50.00 %"));
    }

    #[test]
    fn test_terms_table() {
        let controller = controller();
        let variable = controller.engine(System::Steering).variable("road_conditions").unwrap();
        let output = Formatter::new(OutputFormat::Table, false).format_terms(variable).unwrap();
        assert!(output.contains("poor"));
        assert!(output.contains("good"));
        assert!(output.contains("1.000"));
    }

    #[test]
    fn test_terms_json_has_curves() {
        let controller = controller();
        let variable = controller.engine(System::Acceleration).variable("acceleration").unwrap();
        let output = Formatter::new(OutputFormat::Json, false).format_terms(variable).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(parsed["samples"], 21);
        assert_eq!(parsed["terms"][1]["name"], "maintain");
        assert_eq!(parsed["terms"][1]["curve"].as_array().unwrap().len(), 21);
    }

    #[test]
    fn test_rules_with_strengths() {
        let controller = controller();
        let readings = VehicleReadings::new().road(75.0);
        let inference = controller.infer(System::Steering, &readings).unwrap();
        let output = Formatter::new(OutputFormat::Quiet, false)
            .format_rules(controller.engine(System::Steering).rules(), Some(inference.activations()))
            .unwrap();
        assert_eq!(output.lines().next(), Some("rule4 0"));
        assert!(output.contains("rule5 0.16"));
    }

    #[test]
    fn test_aggregate_table() {
        let controller = controller();
        let readings = VehicleReadings::new().speed(30.0).road(50.0);
        let inference = controller.infer(System::Acceleration, &readings).unwrap();
        let set = inference.aggregated("acceleration").unwrap();
        let output = Formatter::new(OutputFormat::Table, false)
            .format_aggregate(set, &inference.output("acceleration"))
            .unwrap();
        assert!(output.contains("membership"));
        assert!(output.contains("✓ acceleration = 1.56"));
    }

    #[test]
    fn test_colorize_disabled() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        assert_eq!(formatter.success("test"), "✓ test");
        assert_eq!(formatter.warning("careful"), "⚠ careful");
    }

    #[test]
    fn test_error_kinds() {
        assert_eq!(error_kind(&FuzzyError::NotComputed), "not_computed");
        assert_eq!(
            error_kind(&FuzzyError::AlreadyBound("vehicle_speed".to_string())),
            "already_bound"
        );
    }
}
