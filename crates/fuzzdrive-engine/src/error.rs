//! Error types for the fuzzy inference engine
//!
//! Setup failures are classified by [`ConfigError`] and are fatal: the
//! engine is never built from an invalid configuration. Everything that can
//! go wrong while computing is a [`FuzzyError`].

use thiserror::Error;

/// Result type alias for engine operations.
pub type Result<T> = std::result::Result<T, FuzzyError>;

/// Errors raised while constructing universes, variables, rules or engines.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Universe samples are not usable
    #[error("Invalid universe: {0}")]
    InvalidSamples(String),

    /// Universe of a named variable is not usable
    #[error("Invalid universe for '{variable}': {reason}")]
    InvalidUniverse {
        /// Variable the universe was built for
        variable: String,
        /// What is wrong with the samples
        reason: String,
    },

    /// Triangle breakpoints violate left <= peak <= right
    #[error("Invalid breakpoints for term '{term}': [{left}, {peak}, {right}] (expected left <= peak <= right)")]
    InvalidBreakpoints {
        /// Term name
        term: String,
        /// Left foot
        left: f64,
        /// Peak
        peak: f64,
        /// Right foot
        right: f64,
    },

    /// Two variables share a name
    #[error("Duplicate variable '{0}'")]
    DuplicateVariable(String),

    /// Two terms of one variable share a name
    #[error("Duplicate term '{term}' in variable '{variable}'")]
    DuplicateTerm {
        /// Owning variable
        variable: String,
        /// Repeated term
        term: String,
    },

    /// A rule references a variable the engine does not know
    #[error("Unknown variable '{0}'")]
    UnknownVariable(String),

    /// A rule references a term its variable does not define
    #[error("Unknown term '{term}' in variable '{variable}'")]
    UnknownTerm {
        /// Referenced variable
        variable: String,
        /// Missing term
        term: String,
    },

    /// A variable is used on the wrong side of a rule
    #[error("Variable '{variable}' is {actual} but was used as {expected}")]
    RoleMismatch {
        /// Offending variable
        variable: String,
        /// Role required at the use site
        expected: &'static str,
        /// Role the variable was declared with
        actual: &'static str,
    },

    /// Implication weight outside [0, 1]
    #[error("Invalid weight {0} (must be in [0, 1])")]
    InvalidWeight(f64),

    /// Combinator without children or rule without consequents
    #[error("Empty rule component: {0}")]
    EmptyRule(String),

    /// Engine built without any consequent variable
    #[error("Engine has no consequent variables")]
    NoConsequents,

    /// A consequent variable is not targeted by any rule
    #[error("No rule targets consequent '{0}'")]
    UncoveredConsequent(String),
}

impl ConfigError {
    /// Name the variable an unnamed universe failure belongs to
    pub fn for_variable(self, variable: &str) -> Self {
        match self {
            Self::InvalidSamples(reason) => Self::InvalidUniverse {
                variable: variable.to_string(),
                reason,
            },
            other => other,
        }
    }
}

/// Errors raised by rule evaluation, `compute` and simulation sessions.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FuzzyError {
    /// Setup-time failure
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// A rule leaf was evaluated against a table without its (variable, term)
    #[error("Unknown term '{term}' in variable '{variable}'")]
    UnknownTerm {
        /// Referenced variable
        variable: String,
        /// Referenced term
        term: String,
    },

    /// An input or output name the engine does not know
    #[error("Unknown variable '{0}'")]
    UnknownVariable(String),

    /// A crisp input that is NaN or infinite
    #[error("Invalid input for '{variable}': {value}")]
    InvalidInput {
        /// Antecedent name
        variable: String,
        /// Supplied value
        value: f64,
    },

    /// A required antecedent has no bound value
    #[error("Missing input for antecedent '{0}'")]
    MissingInput(String),

    /// An input was bound twice within one compute cycle
    #[error("Input '{0}' is already bound in this cycle")]
    AlreadyBound(String),

    /// The aggregated set of a consequent has zero area
    #[error("No active rules for consequent '{0}'")]
    NoActiveRules(String),

    /// Outputs were read before a successful compute
    #[error("No outputs computed yet")]
    NotComputed,
}
