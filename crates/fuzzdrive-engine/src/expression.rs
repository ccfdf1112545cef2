//! Rule antecedent expressions
//!
//! An [`Expr`] is a closed tree of fuzzy propositions combined with Zadeh
//! operators: AND is `min`, OR is `max`, NOT is `1 - x`. Trees are built
//! with [`Expr::is`] and the `&`, `|` and `!` operators:
//!
//! ```
//! use fuzzdrive_engine::Expr;
//!
//! let condition = Expr::is("distance_to_obstacle", "close") & Expr::is("vehicle_speed", "fast");
//! assert_eq!(condition.to_string(), "distance_to_obstacle[close] & vehicle_speed[fast]");
//! ```

use crate::error::{FuzzyError, Result};
use std::collections::BTreeMap;
use std::fmt;
use std::ops::{BitAnd, BitOr, Not};

/// Fuzzified inputs: per antecedent variable, the degree of each of its terms
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Fuzzification {
    degrees: BTreeMap<String, Vec<(String, f64)>>,
}

impl Fuzzification {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the term degrees of one variable, replacing earlier ones
    pub fn insert<'a>(
        &mut self,
        variable: impl Into<String>,
        degrees: impl IntoIterator<Item = (&'a str, f64)>,
    ) {
        let degrees = degrees
            .into_iter()
            .map(|(term, degree)| (term.to_string(), degree))
            .collect();
        self.degrees.insert(variable.into(), degrees);
    }

    /// Degree of `variable` being `term`, if that pair was fuzzified
    pub fn degree(&self, variable: &str, term: &str) -> Option<f64> {
        self.degrees
            .get(variable)?
            .iter()
            .find(|(t, _)| t == term)
            .map(|(_, d)| *d)
    }

    /// Term degrees of one variable in declaration order
    pub fn variable(&self, variable: &str) -> Option<&[(String, f64)]> {
        self.degrees.get(variable).map(Vec::as_slice)
    }

    /// Fuzzified variables in name order
    pub fn variables(&self) -> impl Iterator<Item = &str> {
        self.degrees.keys().map(String::as_str)
    }
}

/// A fuzzy condition tree
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// `variable` is `term`
    Is {
        /// Antecedent variable
        variable: String,
        /// Term of that variable
        term: String,
    },
    /// Minimum over children
    And(Vec<Expr>),
    /// Maximum over children
    Or(Vec<Expr>),
    /// Complement of the child
    Not(Box<Expr>),
}

impl Expr {
    /// Leaf proposition
    pub fn is(variable: impl Into<String>, term: impl Into<String>) -> Self {
        Expr::Is {
            variable: variable.into(),
            term: term.into(),
        }
    }

    /// Firing strength of this condition, in [0, 1]
    ///
    /// # Errors
    /// `UnknownTerm` if a leaf's (variable, term) pair is absent from the table.
    pub fn evaluate(&self, table: &Fuzzification) -> Result<f64> {
        match self {
            Expr::Is { variable, term } => {
                table
                    .degree(variable, term)
                    .ok_or_else(|| FuzzyError::UnknownTerm {
                        variable: variable.clone(),
                        term: term.clone(),
                    })
            }
            Expr::And(children) => children
                .iter()
                .try_fold(1.0_f64, |acc, child| -> Result<f64> {
                    Ok(acc.min(child.evaluate(table)?))
                }),
            Expr::Or(children) => children
                .iter()
                .try_fold(0.0_f64, |acc, child| -> Result<f64> {
                    Ok(acc.max(child.evaluate(table)?))
                }),
            Expr::Not(child) => Ok(1.0 - child.evaluate(table)?),
        }
    }

    /// Every (variable, term) leaf in the tree, left to right
    pub fn leaves(&self) -> Vec<(&str, &str)> {
        let mut out = Vec::new();
        self.collect_leaves(&mut out);
        out
    }

    fn collect_leaves<'a>(&'a self, out: &mut Vec<(&'a str, &'a str)>) {
        match self {
            Expr::Is { variable, term } => out.push((variable.as_str(), term.as_str())),
            Expr::And(children) | Expr::Or(children) => {
                for child in children {
                    child.collect_leaves(out);
                }
            }
            Expr::Not(child) => child.collect_leaves(out),
        }
    }

    /// First combinator without children, if any
    pub(crate) fn find_empty(&self) -> Option<&'static str> {
        match self {
            Expr::Is { .. } => None,
            Expr::And(children) if children.is_empty() => Some("AND"),
            Expr::Or(children) if children.is_empty() => Some("OR"),
            Expr::And(children) | Expr::Or(children) => {
                children.iter().find_map(Expr::find_empty)
            }
            Expr::Not(child) => child.find_empty(),
        }
    }
}

impl BitAnd for Expr {
    type Output = Expr;

    fn bitand(self, rhs: Expr) -> Expr {
        match self {
            Expr::And(mut children) => {
                children.push(rhs);
                Expr::And(children)
            }
            lhs => Expr::And(vec![lhs, rhs]),
        }
    }
}

impl BitOr for Expr {
    type Output = Expr;

    fn bitor(self, rhs: Expr) -> Expr {
        match self {
            Expr::Or(mut children) => {
                children.push(rhs);
                Expr::Or(children)
            }
            lhs => Expr::Or(vec![lhs, rhs]),
        }
    }
}

impl Not for Expr {
    type Output = Expr;

    fn not(self) -> Expr {
        Expr::Not(Box::new(self))
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Is { variable, term } => write!(f, "{}[{}]", variable, term),
            Expr::And(children) => write_joined(f, children, " & "),
            Expr::Or(children) => write_joined(f, children, " | "),
            Expr::Not(child) => match &**child {
                Expr::Is { .. } => write!(f, "~{}", child),
                _ => write!(f, "~({})", child),
            },
        }
    }
}

fn write_joined(f: &mut fmt::Formatter<'_>, children: &[Expr], sep: &str) -> fmt::Result {
    for (idx, child) in children.iter().enumerate() {
        if idx > 0 {
            f.write_str(sep)?;
        }
        match child {
            Expr::And(_) | Expr::Or(_) => write!(f, "({})", child)?,
            _ => write!(f, "{}", child)?,
        }
    }
    Ok(())
}
