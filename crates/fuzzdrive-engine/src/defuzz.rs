//! Defuzzification - collapsing an aggregated fuzzy set into a crisp value

use std::fmt;
use std::str::FromStr;

/// Method used to turn an aggregated set into a crisp output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Defuzzification {
    /// Center of gravity: `Σ(x·μ) / Σμ`
    #[default]
    Centroid,
    /// First sample where the cumulative membership reaches half the total
    Bisector,
    /// Mean of the samples with maximal membership
    MeanOfMaximum,
    /// Smallest sample with maximal membership
    SmallestOfMaximum,
    /// Largest sample with maximal membership
    LargestOfMaximum,
}

impl Defuzzification {
    /// Get the method name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            Defuzzification::Centroid => "centroid",
            Defuzzification::Bisector => "bisector",
            Defuzzification::MeanOfMaximum => "mom",
            Defuzzification::SmallestOfMaximum => "som",
            Defuzzification::LargestOfMaximum => "lom",
        }
    }

    /// Parse a method from a string
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "centroid" => Some(Defuzzification::Centroid),
            "bisector" => Some(Defuzzification::Bisector),
            "mom" => Some(Defuzzification::MeanOfMaximum),
            "som" => Some(Defuzzification::SmallestOfMaximum),
            "lom" => Some(Defuzzification::LargestOfMaximum),
            _ => None,
        }
    }

    /// Crisp value of the set `membership` sampled at `samples`.
    ///
    /// Returns `None` when the set has zero total membership: the result is
    /// undefined there and must not be reported as 0.
    pub fn apply(&self, samples: &[f64], membership: &[f64]) -> Option<f64> {
        debug_assert_eq!(samples.len(), membership.len());

        let total: f64 = membership.iter().sum();
        if total == 0.0 {
            return None;
        }

        match self {
            Defuzzification::Centroid => {
                let moment: f64 = samples.iter().zip(membership).map(|(x, mu)| x * mu).sum();
                Some(moment / total)
            }
            Defuzzification::Bisector => {
                let half = total / 2.0;
                let mut running = 0.0;
                samples.iter().zip(membership).find_map(|(x, mu)| {
                    running += mu;
                    (running >= half).then_some(*x)
                })
            }
            Defuzzification::MeanOfMaximum => {
                let maxima = maxima(samples, membership);
                Some(maxima.iter().sum::<f64>() / maxima.len() as f64)
            }
            Defuzzification::SmallestOfMaximum => maxima(samples, membership).first().copied(),
            Defuzzification::LargestOfMaximum => maxima(samples, membership).last().copied(),
        }
    }
}

fn maxima(samples: &[f64], membership: &[f64]) -> Vec<f64> {
    let peak = membership.iter().cloned().fold(0.0, f64::max);
    samples
        .iter()
        .zip(membership)
        .filter(|(_, mu)| **mu == peak)
        .map(|(x, _)| *x)
        .collect()
}

impl fmt::Display for Defuzzification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Defuzzification {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Invalid defuzzification method: {}", s))
    }
}
