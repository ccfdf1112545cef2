//! Fuzzy rules - an antecedent condition bound to consequent terms

use crate::error::{ConfigError, Result};
use crate::expression::{Expr, Fuzzification};
use std::fmt;

/// One conclusion of a rule: `variable` is `term`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Consequent {
    /// Consequent variable
    pub variable: String,
    /// Term of that variable
    pub term: String,
}

/// IF `antecedent` THEN each consequent, scaled by an implication weight.
///
/// Rules are independent of each other; the order they are given to an
/// engine has no effect on its outputs.
#[derive(Debug, Clone, PartialEq)]
pub struct Rule {
    label: Option<String>,
    antecedent: Expr,
    consequents: Vec<Consequent>,
    weight: f64,
}

impl Rule {
    /// Create a rule with a single conclusion and weight 1.0
    ///
    /// # Examples
    ///
    /// ```
    /// use fuzzdrive_engine::{Expr, Rule};
    ///
    /// let rule = Rule::new(
    ///     Expr::is("distance_to_obstacle", "close") & Expr::is("vehicle_speed", "fast"),
    ///     "braking_force",
    ///     "high",
    /// );
    /// assert_eq!(rule.weight(), 1.0);
    /// assert_eq!(rule.consequents().len(), 1);
    /// ```
    pub fn new(antecedent: Expr, variable: impl Into<String>, term: impl Into<String>) -> Self {
        Self {
            label: None,
            antecedent,
            consequents: vec![Consequent {
                variable: variable.into(),
                term: term.into(),
            }],
            weight: 1.0,
        }
    }

    /// Add another conclusion fired by the same antecedent
    pub fn also(mut self, variable: impl Into<String>, term: impl Into<String>) -> Self {
        self.consequents.push(Consequent {
            variable: variable.into(),
            term: term.into(),
        });
        self
    }

    /// Set the implication weight; must lie in [0, 1]
    pub fn with_weight(mut self, weight: f64) -> std::result::Result<Self, ConfigError> {
        if !(0.0..=1.0).contains(&weight) {
            return Err(ConfigError::InvalidWeight(weight));
        }
        self.weight = weight;
        Ok(self)
    }

    /// Attach a human-readable label
    pub fn labelled(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Label, if any
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    /// Condition tree
    pub fn antecedent(&self) -> &Expr {
        &self.antecedent
    }

    /// Conclusions
    pub fn consequents(&self) -> &[Consequent] {
        &self.consequents
    }

    /// Implication weight
    pub fn weight(&self) -> f64 {
        self.weight
    }

    /// Firing strength of the antecedent for the given fuzzified inputs
    pub fn firing_strength(&self, table: &Fuzzification) -> Result<f64> {
        self.antecedent.evaluate(table)
    }

    /// Strength applied to the consequent sets: firing strength times weight
    pub fn activation(&self, table: &Fuzzification) -> Result<f64> {
        Ok(self.firing_strength(table)? * self.weight)
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "IF {} THEN ", self.antecedent)?;
        for (idx, c) in self.consequents.iter().enumerate() {
            if idx > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}[{}]", c.variable, c.term)?;
        }
        if self.weight != 1.0 {
            write!(f, " (weight {})", self.weight)?;
        }
        Ok(())
    }
}
