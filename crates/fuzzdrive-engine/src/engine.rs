//! Mamdani inference engine
//!
//! Implements the five-step inference pipeline:
//! 1. Fuzzification of every supplied antecedent
//! 2. Rule firing (Zadeh min/max over the antecedent tree)
//! 3. Implication by clipping each consequent term at the rule's activation
//! 4. Aggregation of the clipped sets by pointwise max
//! 5. Defuzzification of each aggregated set
//!
//! The engine holds only immutable configuration. Every call to
//! [`InferenceEngine::compute`] works on its own buffers, so one engine can
//! serve any number of threads without locking.

use crate::error::{ConfigError, FuzzyError, Result};
use crate::expression::Fuzzification;
use crate::rule::Rule;
use crate::variable::{LinguisticVariable, Role};
use std::collections::{BTreeSet, HashMap, HashSet};
use tracing::{debug, info, warn};

/// Builder collecting variables and rules before validation
#[derive(Debug, Default)]
pub struct EngineBuilder {
    variables: Vec<LinguisticVariable>,
    rules: Vec<Rule>,
}

impl EngineBuilder {
    /// Add a variable (antecedent or consequent)
    pub fn variable(mut self, variable: LinguisticVariable) -> Self {
        self.variables.push(variable);
        self
    }

    /// Add several variables
    pub fn variables(mut self, variables: impl IntoIterator<Item = LinguisticVariable>) -> Self {
        self.variables.extend(variables);
        self
    }

    /// Add a rule
    pub fn rule(mut self, rule: Rule) -> Self {
        self.rules.push(rule);
        self
    }

    /// Add several rules
    pub fn rules(mut self, rules: impl IntoIterator<Item = Rule>) -> Self {
        self.rules.extend(rules);
        self
    }

    /// Validate the configuration and build the engine
    pub fn build(self) -> std::result::Result<InferenceEngine, ConfigError> {
        InferenceEngine::new(self.variables, self.rules)
    }
}

/// A consequent term resolved at build time, with its curve pre-sampled
#[derive(Debug, Clone)]
struct Target {
    consequent: usize,
    curve: Vec<f64>,
}

/// Validated, immutable rule base over a fixed set of variables
#[derive(Debug, Clone)]
pub struct InferenceEngine {
    antecedents: Vec<LinguisticVariable>,
    consequents: Vec<LinguisticVariable>,
    rules: Vec<Rule>,
    targets: Vec<Vec<Target>>,
    required: Vec<String>,
}

impl InferenceEngine {
    /// Start building an engine
    pub fn builder() -> EngineBuilder {
        EngineBuilder::default()
    }

    /// Validate variables and rules and build the engine
    ///
    /// # Errors
    /// Any [`ConfigError`]: duplicate names, references to unknown variables
    /// or terms, variables used on the wrong side of a rule, invalid weights,
    /// empty combinators, or a consequent no rule targets.
    pub fn new(
        variables: Vec<LinguisticVariable>,
        rules: Vec<Rule>,
    ) -> std::result::Result<Self, ConfigError> {
        let mut seen = HashSet::new();
        for variable in &variables {
            if !seen.insert(variable.name().to_string()) {
                return Err(ConfigError::DuplicateVariable(variable.name().to_string()));
            }
        }

        let (antecedents, consequents): (Vec<_>, Vec<_>) = variables
            .into_iter()
            .partition(|v| v.role() == Role::Antecedent);

        if consequents.is_empty() {
            return Err(ConfigError::NoConsequents);
        }

        let mut required = BTreeSet::new();
        let mut targets = Vec::with_capacity(rules.len());
        let mut covered = vec![false; consequents.len()];

        for (index, rule) in rules.iter().enumerate() {
            let rule_name = rule
                .label()
                .map(str::to_string)
                .unwrap_or_else(|| format!("#{}", index));

            if let Some(kind) = rule.antecedent().find_empty() {
                return Err(ConfigError::EmptyRule(format!(
                    "{} without operands in rule {}",
                    kind, rule_name
                )));
            }
            if rule.consequents().is_empty() {
                return Err(ConfigError::EmptyRule(format!(
                    "rule {} has no consequents",
                    rule_name
                )));
            }
            if !(0.0..=1.0).contains(&rule.weight()) {
                return Err(ConfigError::InvalidWeight(rule.weight()));
            }

            for (variable, term) in rule.antecedent().leaves() {
                let resolved = resolve(&antecedents, &consequents, variable, Role::Antecedent)?;
                if resolved.term(term).is_none() {
                    return Err(unknown_term(variable, term));
                }
                required.insert(variable.to_string());
            }

            let mut rule_targets = Vec::with_capacity(rule.consequents().len());
            for target in rule.consequents() {
                resolve(&antecedents, &consequents, &target.variable, Role::Consequent)?;
                let consequent = consequents
                    .iter()
                    .position(|v| v.name() == target.variable)
                    .ok_or_else(|| ConfigError::UnknownVariable(target.variable.clone()))?;
                let variable = &consequents[consequent];
                let membership = variable
                    .term(&target.term)
                    .ok_or_else(|| unknown_term(&target.variable, &target.term))?;

                covered[consequent] = true;
                rule_targets.push(Target {
                    consequent,
                    curve: variable
                        .universe()
                        .samples()
                        .iter()
                        .map(|&x| membership.degree(x))
                        .collect(),
                });
            }
            targets.push(rule_targets);
        }

        if let Some(idx) = covered.iter().position(|c| !c) {
            return Err(ConfigError::UncoveredConsequent(
                consequents[idx].name().to_string(),
            ));
        }

        info!(
            "Built inference engine: {} antecedent(s), {} consequent(s), {} rule(s)",
            antecedents.len(),
            consequents.len(),
            rules.len()
        );

        Ok(Self {
            antecedents,
            consequents,
            rules,
            targets,
            required: required.into_iter().collect(),
        })
    }

    /// Input-side variables
    pub fn antecedents(&self) -> &[LinguisticVariable] {
        &self.antecedents
    }

    /// Output-side variables
    pub fn consequents(&self) -> &[LinguisticVariable] {
        &self.consequents
    }

    /// Look up any variable by name
    pub fn variable(&self, name: &str) -> Option<&LinguisticVariable> {
        self.antecedents
            .iter()
            .chain(&self.consequents)
            .find(|v| v.name() == name)
    }

    /// Configured rules in the order given
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Antecedents referenced by at least one rule, in name order
    pub fn required_inputs(&self) -> &[String] {
        &self.required
    }

    /// Convenience wrapper around [`compute`](Self::compute) for borrowed pairs
    pub fn compute_with<'a>(
        &self,
        inputs: impl IntoIterator<Item = (&'a str, f64)>,
    ) -> Result<Inference> {
        let inputs: HashMap<String, f64> = inputs
            .into_iter()
            .map(|(name, value)| (name.to_string(), value))
            .collect();
        self.compute(&inputs)
    }

    /// Run Mamdani inference for one set of crisp inputs
    ///
    /// # Errors
    /// Fails as a whole for unknown or non-finite inputs and for a missing
    /// required input. An output whose aggregated set is empty does not fail
    /// the call; it is reported as `NoActiveRules` in [`Inference::output`].
    pub fn compute(&self, inputs: &HashMap<String, f64>) -> Result<Inference> {
        let mut warnings = Vec::new();

        for (name, &value) in inputs {
            let variable = self
                .antecedents
                .iter()
                .find(|v| v.name() == name)
                .ok_or_else(|| FuzzyError::UnknownVariable(name.clone()))?;
            if !value.is_finite() {
                return Err(FuzzyError::InvalidInput {
                    variable: name.clone(),
                    value,
                });
            }
            let universe = variable.universe();
            if !universe.contains(value) {
                warn!(
                    "Input {}={} lies outside its universe [{}, {}]",
                    name,
                    value,
                    universe.min(),
                    universe.max()
                );
                warnings.push(InputWarning {
                    variable: name.clone(),
                    value,
                    min: universe.min(),
                    max: universe.max(),
                });
            }
        }

        if let Some(missing) = self.required.iter().find(|name| !inputs.contains_key(*name)) {
            return Err(FuzzyError::MissingInput(missing.clone()));
        }

        // Step 1: fuzzification
        let mut fuzzification = Fuzzification::new();
        for variable in &self.antecedents {
            if let Some(&x) = inputs.get(variable.name()) {
                let degrees = variable.fuzzify(x);
                debug!("Fuzzified {}={}: {:?}", variable.name(), x, degrees);
                fuzzification.insert(variable.name(), degrees);
            }
        }

        let mut aggregated: Vec<AggregatedSet> = self
            .consequents
            .iter()
            .map(AggregatedSet::empty)
            .collect();
        let mut activations = Vec::with_capacity(self.rules.len());

        for (index, (rule, targets)) in self.rules.iter().zip(&self.targets).enumerate() {
            // Step 2: firing strength
            let firing_strength = rule.firing_strength(&fuzzification)?;
            let activation = firing_strength * rule.weight();
            activations.push(RuleActivation {
                index,
                label: rule.label().map(str::to_string),
                firing_strength,
                activation,
            });

            if activation <= 0.0 {
                continue;
            }
            debug!(
                "Rule {} fired: strength {}, activation {}",
                rule.label().map_or_else(|| index.to_string(), str::to_string),
                firing_strength,
                activation
            );

            // Steps 3 and 4: clip, then merge by max
            for target in targets {
                aggregated[target.consequent].absorb(&target.curve, activation);
            }
        }

        debug!(
            "Fired {} of {} rule(s)",
            activations.iter().filter(|a| a.activation > 0.0).count(),
            activations.len()
        );

        // Step 5: defuzzification, per consequent
        let outputs = self
            .consequents
            .iter()
            .zip(&aggregated)
            .map(|(variable, set)| {
                let value = variable
                    .defuzzification()
                    .apply(&set.samples, &set.membership);
                let result = match value {
                    Some(crisp) => {
                        debug!("{} = {}", variable.name(), crisp);
                        Ok(crisp)
                    }
                    None => {
                        warn!("No active rules for consequent {}", variable.name());
                        Err(FuzzyError::NoActiveRules(variable.name().to_string()))
                    }
                };
                (variable.name().to_string(), result)
            })
            .collect();

        Ok(Inference {
            fuzzification,
            activations,
            aggregated,
            outputs,
            warnings,
        })
    }
}

fn resolve<'a>(
    antecedents: &'a [LinguisticVariable],
    consequents: &'a [LinguisticVariable],
    name: &str,
    expected: Role,
) -> std::result::Result<&'a LinguisticVariable, ConfigError> {
    let variable = antecedents
        .iter()
        .chain(consequents)
        .find(|v| v.name() == name)
        .ok_or_else(|| ConfigError::UnknownVariable(name.to_string()))?;

    if variable.role() != expected {
        return Err(ConfigError::RoleMismatch {
            variable: name.to_string(),
            expected: expected.as_str(),
            actual: variable.role().as_str(),
        });
    }
    Ok(variable)
}

fn unknown_term(variable: &str, term: &str) -> ConfigError {
    ConfigError::UnknownTerm {
        variable: variable.to_string(),
        term: term.to_string(),
    }
}

/// Pointwise-max union of all clipped sets targeting one consequent
#[derive(Debug, Clone, PartialEq)]
pub struct AggregatedSet {
    variable: String,
    samples: Vec<f64>,
    membership: Vec<f64>,
}

impl AggregatedSet {
    fn empty(variable: &LinguisticVariable) -> Self {
        let samples = variable.universe().samples().to_vec();
        let membership = vec![0.0; samples.len()];
        Self {
            variable: variable.name().to_string(),
            samples,
            membership,
        }
    }

    fn absorb(&mut self, curve: &[f64], activation: f64) {
        for (mu, &degree) in self.membership.iter_mut().zip(curve) {
            *mu = mu.max(degree.min(activation));
        }
    }

    /// Consequent variable name
    pub fn variable(&self) -> &str {
        &self.variable
    }

    /// Universe samples
    pub fn samples(&self) -> &[f64] {
        &self.samples
    }

    /// Aggregated membership at each sample
    pub fn membership(&self) -> &[f64] {
        &self.membership
    }

    /// `(sample, membership)` pairs
    pub fn points(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.samples.iter().copied().zip(self.membership.iter().copied())
    }

    /// Total membership over the samples
    pub fn area(&self) -> f64 {
        self.membership.iter().sum()
    }

    /// Check if no rule contributed to this set
    pub fn is_empty(&self) -> bool {
        self.area() == 0.0
    }
}

/// Firing record of one rule during a compute call
#[derive(Debug, Clone, PartialEq)]
pub struct RuleActivation {
    /// Position of the rule in the engine
    pub index: usize,
    /// Rule label, if any
    pub label: Option<String>,
    /// Antecedent firing strength
    pub firing_strength: f64,
    /// Firing strength times the rule weight
    pub activation: f64,
}

/// An input outside its variable's universe
#[derive(Debug, Clone, PartialEq)]
pub struct InputWarning {
    /// Antecedent name
    pub variable: String,
    /// Supplied value
    pub value: f64,
    /// Universe lower bound
    pub min: f64,
    /// Universe upper bound
    pub max: f64,
}

/// Result of one compute call, with the intermediate fuzzy state
#[derive(Debug, Clone)]
pub struct Inference {
    fuzzification: Fuzzification,
    activations: Vec<RuleActivation>,
    aggregated: Vec<AggregatedSet>,
    outputs: Vec<(String, Result<f64>)>,
    warnings: Vec<InputWarning>,
}

impl Inference {
    /// Crisp value of one consequent, or why it is undefined
    pub fn output(&self, name: &str) -> Result<f64> {
        self.outputs
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, r)| r.clone())
            .unwrap_or_else(|| Err(FuzzyError::UnknownVariable(name.to_string())))
    }

    /// Every consequent with its result, in engine order
    pub fn outputs(&self) -> impl Iterator<Item = (&str, &Result<f64>)> {
        self.outputs.iter().map(|(n, r)| (n.as_str(), r))
    }

    /// Successfully defuzzified outputs only
    pub fn crisp(&self) -> HashMap<String, f64> {
        self.outputs
            .iter()
            .filter_map(|(n, r)| r.as_ref().ok().map(|v| (n.clone(), *v)))
            .collect()
    }

    /// Check if every consequent resolved to a crisp value
    pub fn is_complete(&self) -> bool {
        self.outputs.iter().all(|(_, r)| r.is_ok())
    }

    /// Aggregated set of one consequent
    pub fn aggregated(&self, name: &str) -> Option<&AggregatedSet> {
        self.aggregated.iter().find(|s| s.variable == name)
    }

    /// All aggregated sets, in engine order
    pub fn aggregated_sets(&self) -> &[AggregatedSet] {
        &self.aggregated
    }

    /// Per-rule firing strengths, in rule order
    pub fn activations(&self) -> &[RuleActivation] {
        &self.activations
    }

    /// Fuzzified inputs
    pub fn fuzzification(&self) -> &Fuzzification {
        &self.fuzzification
    }

    /// Inputs that fell outside their universe
    pub fn warnings(&self) -> &[InputWarning] {
        &self.warnings
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::defuzz::Defuzzification;
    use crate::expression::Expr;
    use crate::universe::Universe;

    fn distance() -> LinguisticVariable {
        LinguisticVariable::antecedent("distance_to_obstacle", Universe::range(0.0, 50.0, 1.0).unwrap())
            .triangle("close", 0.0, 0.0, 10.0)
            .unwrap()
            .triangle("medium", 5.0, 20.0, 35.0)
            .unwrap()
            .triangle("far", 30.0, 50.0, 50.0)
            .unwrap()
    }

    fn braking() -> LinguisticVariable {
        LinguisticVariable::consequent("braking_force", Universe::range(0.0, 100.0, 1.0).unwrap())
            .triangle("low", 0.0, 0.0, 30.0)
            .unwrap()
            .triangle("moderate", 20.0, 50.0, 80.0)
            .unwrap()
            .triangle("high", 70.0, 100.0, 100.0)
            .unwrap()
    }

    fn distance_rules() -> Vec<Rule> {
        vec![
            Rule::new(Expr::is("distance_to_obstacle", "close"), "braking_force", "high"),
            Rule::new(Expr::is("distance_to_obstacle", "medium"), "braking_force", "moderate"),
            Rule::new(Expr::is("distance_to_obstacle", "far"), "braking_force", "low"),
        ]
    }

    fn engine() -> InferenceEngine {
        InferenceEngine::builder()
            .variable(distance())
            .variable(braking())
            .rules(distance_rules())
            .build()
            .unwrap()
    }

    #[test]
    fn test_single_full_term_reduces_to_its_centroid() {
        let inference = engine().compute_with([("distance_to_obstacle", 20.0)]).unwrap();
        let value = inference.output("braking_force").unwrap();
        assert!((value - 50.0).abs() < 1e-9);
        assert!(inference.is_complete());
    }

    #[test]
    fn test_activations_recorded() {
        let inference = engine().compute_with([("distance_to_obstacle", 15.0)]).unwrap();
        let strengths: Vec<f64> = inference.activations().iter().map(|a| a.firing_strength).collect();
        assert_eq!(strengths.len(), 3);
        assert_eq!(strengths[0], 0.0);
        assert!((strengths[1] - 10.0 / 15.0).abs() < 1e-12);
        assert_eq!(strengths[2], 0.0);
    }

    #[test]
    fn test_aggregated_set_is_clipped() {
        let inference = engine().compute_with([("distance_to_obstacle", 15.0)]).unwrap();
        let set = inference.aggregated("braking_force").unwrap();
        let peak = set.membership().iter().cloned().fold(0.0, f64::max);
        assert!((peak - 10.0 / 15.0).abs() < 1e-12);
        assert_eq!(set.samples().len(), 101);
    }

    #[test]
    fn test_missing_input() {
        let err = engine().compute(&HashMap::new()).unwrap_err();
        assert_eq!(err, FuzzyError::MissingInput("distance_to_obstacle".to_string()));
    }

    #[test]
    fn test_unknown_input() {
        let err = engine()
            .compute_with([("distance_to_obstacle", 10.0), ("altitude", 3.0)])
            .unwrap_err();
        assert_eq!(err, FuzzyError::UnknownVariable("altitude".to_string()));
    }

    #[test]
    fn test_consequent_is_not_an_input() {
        let err = engine()
            .compute_with([("distance_to_obstacle", 10.0), ("braking_force", 3.0)])
            .unwrap_err();
        assert_eq!(err, FuzzyError::UnknownVariable("braking_force".to_string()));
    }

    #[test]
    fn test_non_finite_input() {
        let err = engine().compute_with([("distance_to_obstacle", f64::NAN)]).unwrap_err();
        assert!(matches!(err, FuzzyError::InvalidInput { .. }));
    }

    #[test]
    fn test_out_of_universe_warns_and_is_undefined() {
        let inference = engine().compute_with([("distance_to_obstacle", 80.0)]).unwrap();
        assert_eq!(inference.warnings().len(), 1);
        assert_eq!(inference.warnings()[0].max, 50.0);
        assert_eq!(
            inference.output("braking_force").unwrap_err(),
            FuzzyError::NoActiveRules("braking_force".to_string())
        );
        assert!(inference.aggregated("braking_force").unwrap().is_empty());
        assert!(inference.crisp().is_empty());
    }

    #[test]
    fn test_unknown_output_name() {
        let inference = engine().compute_with([("distance_to_obstacle", 20.0)]).unwrap();
        assert_eq!(
            inference.output("steering_angle").unwrap_err(),
            FuzzyError::UnknownVariable("steering_angle".to_string())
        );
    }

    #[test]
    fn test_partial_failure_keeps_other_outputs() {
        let alarm = LinguisticVariable::consequent("alarm", Universe::range(0.0, 1.0, 0.1).unwrap())
            .triangle("on", 0.5, 1.0, 1.0)
            .unwrap();
        let engine = InferenceEngine::builder()
            .variable(distance())
            .variable(braking())
            .variable(alarm)
            .rules(distance_rules())
            .rule(Rule::new(Expr::is("distance_to_obstacle", "close"), "alarm", "on"))
            .build()
            .unwrap();

        let inference = engine.compute_with([("distance_to_obstacle", 40.0)]).unwrap();
        assert!(inference.output("braking_force").is_ok());
        assert_eq!(
            inference.output("alarm").unwrap_err(),
            FuzzyError::NoActiveRules("alarm".to_string())
        );
        assert!(!inference.is_complete());
        assert_eq!(inference.crisp().len(), 1);
    }

    #[test]
    fn test_multiple_consequents_per_rule() {
        let alarm = LinguisticVariable::consequent("alarm", Universe::range(0.0, 1.0, 0.1).unwrap())
            .triangle("on", 0.5, 1.0, 1.0)
            .unwrap();
        let engine = InferenceEngine::builder()
            .variables([distance(), braking(), alarm])
            .rule(
                Rule::new(Expr::is("distance_to_obstacle", "close"), "braking_force", "high")
                    .also("alarm", "on"),
            )
            .build()
            .unwrap();

        let inference = engine.compute_with([("distance_to_obstacle", 0.0)]).unwrap();
        assert!(inference.output("braking_force").unwrap() > 80.0);
        assert!(inference.output("alarm").unwrap() > 0.8);
    }

    #[test]
    fn test_weight_lowers_clip_level() {
        let engine = InferenceEngine::builder()
            .variables([distance(), braking()])
            .rule(
                Rule::new(Expr::is("distance_to_obstacle", "medium"), "braking_force", "moderate")
                    .with_weight(0.5)
                    .unwrap(),
            )
            .build()
            .unwrap();

        let inference = engine.compute_with([("distance_to_obstacle", 20.0)]).unwrap();
        let set = inference.aggregated("braking_force").unwrap();
        let peak = set.membership().iter().cloned().fold(0.0, f64::max);
        assert_eq!(peak, 0.5);
        assert_eq!(inference.activations()[0].firing_strength, 1.0);
        assert_eq!(inference.activations()[0].activation, 0.5);
    }

    #[test]
    fn test_defuzzification_method_is_per_variable() {
        let engine = InferenceEngine::builder()
            .variables([
                distance(),
                braking().with_defuzzification(Defuzzification::LargestOfMaximum),
            ])
            .rules(distance_rules())
            .build()
            .unwrap();

        let inference = engine.compute_with([("distance_to_obstacle", 20.0)]).unwrap();
        assert_eq!(inference.output("braking_force").unwrap(), 50.0);
    }

    #[test]
    fn test_unreferenced_antecedent_is_optional() {
        let speed = LinguisticVariable::antecedent("vehicle_speed", Universe::range(0.0, 100.0, 1.0).unwrap())
            .triangle("slow", 0.0, 0.0, 40.0)
            .unwrap();
        let engine = InferenceEngine::builder()
            .variables([distance(), speed, braking()])
            .rules(distance_rules())
            .build()
            .unwrap();

        assert_eq!(engine.required_inputs(), &["distance_to_obstacle".to_string()]);
        assert!(engine.compute_with([("distance_to_obstacle", 20.0)]).is_ok());
    }

    #[test]
    fn test_duplicate_variable() {
        let err = InferenceEngine::builder()
            .variables([distance(), distance(), braking()])
            .rules(distance_rules())
            .build()
            .unwrap_err();
        assert_eq!(err, ConfigError::DuplicateVariable("distance_to_obstacle".to_string()));
    }

    #[test]
    fn test_unknown_variable_in_rule() {
        let err = InferenceEngine::builder()
            .variables([distance(), braking()])
            .rules(distance_rules())
            .rule(Rule::new(Expr::is("vehicle_speed", "fast"), "braking_force", "high"))
            .build()
            .unwrap_err();
        assert_eq!(err, ConfigError::UnknownVariable("vehicle_speed".to_string()));
    }

    #[test]
    fn test_unknown_term_in_rule() {
        let err = InferenceEngine::builder()
            .variables([distance(), braking()])
            .rule(Rule::new(Expr::is("distance_to_obstacle", "touching"), "braking_force", "high"))
            .build()
            .unwrap_err();
        assert_eq!(
            err,
            ConfigError::UnknownTerm {
                variable: "distance_to_obstacle".to_string(),
                term: "touching".to_string(),
            }
        );

        let err = InferenceEngine::builder()
            .variables([distance(), braking()])
            .rule(Rule::new(Expr::is("distance_to_obstacle", "close"), "braking_force", "maximum"))
            .build()
            .unwrap_err();
        assert!(matches!(err, ConfigError::UnknownTerm { .. }));
    }

    #[test]
    fn test_role_mismatch() {
        let err = InferenceEngine::builder()
            .variables([distance(), braking()])
            .rule(Rule::new(Expr::is("braking_force", "low"), "braking_force", "high"))
            .build()
            .unwrap_err();
        assert!(matches!(err, ConfigError::RoleMismatch { expected: "antecedent", .. }));

        let err = InferenceEngine::builder()
            .variables([distance(), braking()])
            .rule(Rule::new(Expr::is("distance_to_obstacle", "close"), "distance_to_obstacle", "far"))
            .build()
            .unwrap_err();
        assert!(matches!(err, ConfigError::RoleMismatch { expected: "consequent", .. }));
    }

    #[test]
    fn test_uncovered_consequent() {
        let err = InferenceEngine::builder()
            .variables([distance(), braking()])
            .build()
            .unwrap_err();
        assert_eq!(err, ConfigError::UncoveredConsequent("braking_force".to_string()));
    }

    #[test]
    fn test_no_consequents() {
        let err = InferenceEngine::builder().variable(distance()).build().unwrap_err();
        assert_eq!(err, ConfigError::NoConsequents);
    }

    #[test]
    fn test_empty_combinator() {
        let err = InferenceEngine::builder()
            .variables([distance(), braking()])
            .rule(Rule::new(Expr::And(vec![]), "braking_force", "high").labelled("broken"))
            .build()
            .unwrap_err();
        match err {
            ConfigError::EmptyRule(msg) => assert!(msg.contains("broken")),
            other => panic!("Expected EmptyRule, got {:?}", other),
        }
    }

    #[test]
    fn test_engine_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<InferenceEngine>();
        assert_send_sync::<Inference>();
    }

    #[derive(Clone, Default)]
    struct LogBuffer(std::sync::Arc<std::sync::Mutex<Vec<u8>>>);

    impl std::io::Write for LogBuffer {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_compute_logs_degrees_and_fired_rules() {
        let engine = InferenceEngine::builder()
            .variable(distance())
            .variable(braking())
            .rules([
                Rule::new(Expr::is("distance_to_obstacle", "close"), "braking_force", "high")
                    .labelled("rule_close"),
                Rule::new(Expr::is("distance_to_obstacle", "medium"), "braking_force", "moderate")
                    .labelled("rule_medium"),
                Rule::new(Expr::is("distance_to_obstacle", "far"), "braking_force", "low")
                    .labelled("rule_far"),
            ])
            .build()
            .unwrap();

        let buffer = LogBuffer::default();
        let writer = buffer.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .finish();

        tracing::subscriber::with_default(subscriber, || {
            engine.compute_with([("distance_to_obstacle", 20.0)]).unwrap();
        });

        let logs = String::from_utf8(buffer.0.lock().unwrap().clone()).unwrap();
        assert!(logs.contains("Fuzzified distance_to_obstacle=20"));
        assert!(logs.contains("(\"medium\", 1.0)"));
        assert!(logs.contains("Rule rule_medium fired: strength 1"));
        assert!(!logs.contains("Rule rule_close fired"));
        assert!(!logs.contains("Rule rule_far fired"));
    }
}
