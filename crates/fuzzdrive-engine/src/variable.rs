//! Linguistic variables - named quantities with fuzzy terms

use crate::defuzz::Defuzzification;
use crate::error::ConfigError;
use crate::membership::MembershipFunction;
use crate::universe::Universe;

/// Side of a rule a variable belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    /// Consumes a crisp input
    Antecedent,
    /// Produces a crisp output
    Consequent,
}

impl Role {
    /// Get the role name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Antecedent => "antecedent",
            Role::Consequent => "consequent",
        }
    }
}

/// A named fuzzy set within a variable
#[derive(Debug, Clone, PartialEq)]
pub struct Term {
    /// Term name, unique within its variable
    pub name: String,
    /// Shape of the set
    pub membership: MembershipFunction,
}

/// A measurable quantity discretized over a universe, with named terms.
///
/// Immutable once handed to an engine. Terms keep their declaration order.
#[derive(Debug, Clone, PartialEq)]
pub struct LinguisticVariable {
    name: String,
    role: Role,
    universe: Universe,
    terms: Vec<Term>,
    defuzzification: Defuzzification,
}

impl LinguisticVariable {
    /// Create an input-side variable
    pub fn antecedent(name: impl Into<String>, universe: Universe) -> Self {
        Self::with_role(name.into(), Role::Antecedent, universe)
    }

    /// Create an output-side variable, defuzzified by centroid
    pub fn consequent(name: impl Into<String>, universe: Universe) -> Self {
        Self::with_role(name.into(), Role::Consequent, universe)
    }

    fn with_role(name: String, role: Role, universe: Universe) -> Self {
        Self {
            name,
            role,
            universe,
            terms: Vec::new(),
            defuzzification: Defuzzification::default(),
        }
    }

    /// Add a triangular term `[left, peak, right]`
    ///
    /// # Examples
    ///
    /// ```
    /// use fuzzdrive_engine::{LinguisticVariable, Universe};
    ///
    /// let speed = LinguisticVariable::antecedent("vehicle_speed", Universe::range(0.0, 100.0, 1.0)?)
    ///     .triangle("slow", 0.0, 0.0, 40.0)?
    ///     .triangle("moderate", 30.0, 60.0, 90.0)?;
    /// assert_eq!(speed.term_names().collect::<Vec<_>>(), ["slow", "moderate"]);
    /// # Ok::<(), fuzzdrive_engine::ConfigError>(())
    /// ```
    pub fn triangle(
        self,
        term: impl Into<String>,
        left: f64,
        peak: f64,
        right: f64,
    ) -> Result<Self, ConfigError> {
        let term = term.into();
        let membership = MembershipFunction::triangular(left, peak, right).map_err(|e| match e {
            ConfigError::InvalidBreakpoints { left, peak, right, .. } => {
                ConfigError::InvalidBreakpoints {
                    term: format!("{}.{}", self.name, term),
                    left,
                    peak,
                    right,
                }
            }
            other => other,
        })?;
        self.with_term(term, membership)
    }

    /// Add a term with an existing membership function
    pub fn with_term(
        mut self,
        term: impl Into<String>,
        membership: MembershipFunction,
    ) -> Result<Self, ConfigError> {
        let name = term.into();
        if self.term(&name).is_some() {
            return Err(ConfigError::DuplicateTerm {
                variable: self.name.clone(),
                term: name,
            });
        }
        self.terms.push(Term { name, membership });
        Ok(self)
    }

    /// Select the defuzzification method (only meaningful for consequents)
    pub fn with_defuzzification(mut self, method: Defuzzification) -> Self {
        self.defuzzification = method;
        self
    }

    /// Variable name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Antecedent or consequent
    pub fn role(&self) -> Role {
        self.role
    }

    /// Discretized domain
    pub fn universe(&self) -> &Universe {
        &self.universe
    }

    /// Defuzzification method
    pub fn defuzzification(&self) -> Defuzzification {
        self.defuzzification
    }

    /// Terms in declaration order
    pub fn terms(&self) -> impl Iterator<Item = &Term> {
        self.terms.iter()
    }

    /// Term names in declaration order
    pub fn term_names(&self) -> impl Iterator<Item = &str> {
        self.terms.iter().map(|t| t.name.as_str())
    }

    /// Look up a term's membership function
    pub fn term(&self, name: &str) -> Option<&MembershipFunction> {
        self.terms
            .iter()
            .find(|t| t.name == name)
            .map(|t| &t.membership)
    }

    /// Degree of every term at `x`, zeros included, in declaration order.
    ///
    /// Values outside the universe are evaluated as-is; the engine decides
    /// whether that deserves a warning.
    pub fn fuzzify(&self, x: f64) -> Vec<(&str, f64)> {
        self.terms
            .iter()
            .map(|t| (t.name.as_str(), t.membership.degree(x)))
            .collect()
    }

    /// Membership curve of a term as `(sample, degree)` pairs over the universe
    pub fn curve(&self, term: &str) -> Option<Vec<(f64, f64)>> {
        let membership = self.term(term)?;
        Some(
            self.universe
                .samples()
                .iter()
                .map(|&x| (x, membership.degree(x)))
                .collect(),
        )
    }
}
