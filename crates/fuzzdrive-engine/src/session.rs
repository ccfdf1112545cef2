//! Simulation sessions - per-caller input/output bindings over a shared engine

use crate::engine::{InferenceEngine, Inference};
use crate::error::{FuzzyError, Result};
use std::collections::HashMap;
use tracing::debug;

/// A compute cycle bound to one engine.
///
/// Inputs are bound once per cycle; binding the same input again fails with
/// `AlreadyBound` until the outputs are taken with [`take_outputs`] or the
/// session is [`reset`]. The session owns all per-call state, so any number
/// of sessions may share one engine across threads.
///
/// [`take_outputs`]: Simulation::take_outputs
/// [`reset`]: Simulation::reset
///
/// # Examples
///
/// ```
/// use fuzzdrive_engine::{Expr, InferenceEngine, LinguisticVariable, Rule, Simulation, Universe};
///
/// let engine = InferenceEngine::builder()
///     .variable(
///         LinguisticVariable::antecedent("road_conditions", Universe::range(0.0, 100.0, 1.0)?)
///             .triangle("good", 70.0, 100.0, 100.0)?,
///     )
///     .variable(
///         LinguisticVariable::consequent("steering_angle", Universe::range(-90.0, 90.0, 1.0)?)
///             .triangle("straight", -15.0, 0.0, 15.0)?,
///     )
///     .rule(Rule::new(Expr::is("road_conditions", "good"), "steering_angle", "straight"))
///     .build()?;
///
/// let mut sim = Simulation::new(&engine);
/// sim.set_input("road_conditions", 90.0)?;
/// sim.compute()?;
/// assert!(sim.output("steering_angle")?.abs() < 1e-9);
/// # Ok::<(), fuzzdrive_engine::FuzzyError>(())
/// ```
#[derive(Debug)]
pub struct Simulation<'e> {
    engine: &'e InferenceEngine,
    clip_to_bounds: bool,
    inputs: HashMap<String, f64>,
    last: Option<Inference>,
}

impl<'e> Simulation<'e> {
    /// Create a session; inputs are clamped into their universe by default
    pub fn new(engine: &'e InferenceEngine) -> Self {
        Self {
            engine,
            clip_to_bounds: true,
            inputs: HashMap::new(),
            last: None,
        }
    }

    /// Choose whether out-of-universe inputs are clamped (true) or passed
    /// through and reported as warnings (false)
    pub fn with_clip_to_bounds(mut self, clip: bool) -> Self {
        self.clip_to_bounds = clip;
        self
    }

    /// Engine this session runs against
    pub fn engine(&self) -> &'e InferenceEngine {
        self.engine
    }

    /// Bind a crisp input for the current cycle
    pub fn set_input(&mut self, name: &str, value: f64) -> Result<()> {
        let variable = self
            .engine
            .antecedents()
            .iter()
            .find(|v| v.name() == name)
            .ok_or_else(|| FuzzyError::UnknownVariable(name.to_string()))?;

        if !value.is_finite() {
            return Err(FuzzyError::InvalidInput {
                variable: name.to_string(),
                value,
            });
        }
        if self.inputs.contains_key(name) {
            return Err(FuzzyError::AlreadyBound(name.to_string()));
        }

        let universe = variable.universe();
        let bound = if self.clip_to_bounds && !universe.contains(value) {
            let clamped = universe.clamp(value);
            debug!("Clamped input {}={} to {}", name, value, clamped);
            clamped
        } else {
            value
        };

        self.inputs.insert(name.to_string(), bound);
        Ok(())
    }

    /// Bind several inputs; stops at the first failure
    pub fn set_inputs<'a>(&mut self, inputs: impl IntoIterator<Item = (&'a str, f64)>) -> Result<()> {
        for (name, value) in inputs {
            self.set_input(name, value)?;
        }
        Ok(())
    }

    /// Value bound to an input in this cycle (after clamping)
    pub fn input(&self, name: &str) -> Option<f64> {
        self.inputs.get(name).copied()
    }

    /// Run inference on the bound inputs
    ///
    /// On failure the bindings are kept so the caller can bind what is
    /// missing and compute again.
    pub fn compute(&mut self) -> Result<&Inference> {
        let inference = self.engine.compute(&self.inputs)?;
        Ok(&*self.last.insert(inference))
    }

    /// Crisp value of one consequent from the last compute
    pub fn output(&self, name: &str) -> Result<f64> {
        self.last
            .as_ref()
            .ok_or(FuzzyError::NotComputed)?
            .output(name)
    }

    /// Crisp values of every consequent that resolved in the last compute
    pub fn outputs(&self) -> Result<HashMap<String, f64>> {
        self.last
            .as_ref()
            .map(Inference::crisp)
            .ok_or(FuzzyError::NotComputed)
    }

    /// Full result of the last compute, if any
    pub fn last_inference(&self) -> Option<&Inference> {
        self.last.as_ref()
    }

    /// Consume the outputs and end the cycle, unbinding every input
    pub fn take_outputs(&mut self) -> Result<Inference> {
        let inference = self.last.take().ok_or(FuzzyError::NotComputed)?;
        self.inputs.clear();
        Ok(inference)
    }

    /// Discard bindings and outputs
    pub fn reset(&mut self) {
        self.inputs.clear();
        self.last = None;
    }
}
