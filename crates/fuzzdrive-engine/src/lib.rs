//! Fuzzdrive Engine
//!
//! Mamdani-style fuzzy inference over triangular membership functions.
//! Crisp inputs are fuzzified, rules fire with Zadeh AND/OR, consequent
//! terms are clipped and aggregated by max, and each aggregated set is
//! defuzzified into a crisp output.
//!
//! ## Key Concepts
//!
//! - **Universe**: discretized domain of a variable; its spacing sets the
//!   precision of defuzzification
//! - **LinguisticVariable**: antecedent (input) or consequent (output) with
//!   named triangular terms
//! - **Expr / Rule**: condition tree over (variable, term) pairs and the
//!   consequent terms it activates
//! - **InferenceEngine**: validated, immutable rule base; `compute` is pure
//! - **Simulation**: per-caller input bindings and outputs over a shared engine
//!
//! ## Architecture
//!
//! Configuration is validated once at build time and never mutated after.
//! The crate performs no I/O; callers own presentation and persistence.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod defuzz;
pub mod engine;
pub mod error;
pub mod expression;
pub mod membership;
pub mod rule;
pub mod session;
pub mod universe;
pub mod variable;

// Re-exports for convenience
pub use defuzz::Defuzzification;
pub use engine::{AggregatedSet, EngineBuilder, Inference, InferenceEngine, InputWarning, RuleActivation};
pub use error::{ConfigError, FuzzyError, Result};
pub use expression::{Expr, Fuzzification};
pub use membership::MembershipFunction;
pub use rule::{Consequent, Rule};
pub use session::Simulation;
pub use universe::{Universe, MAX_SAMPLES};
pub use variable::{LinguisticVariable, Role, Term};
