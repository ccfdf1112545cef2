//! Universe of discourse - the discretized domain of a linguistic variable

use crate::error::ConfigError;

/// Most samples a single universe may hold
pub const MAX_SAMPLES: usize = 1_000_000;

/// Strictly increasing sample points, at least two of them.
///
/// The sample spacing controls defuzzification precision: centroids are
/// computed over these points only.
#[derive(Debug, Clone, PartialEq)]
pub struct Universe {
    samples: Vec<f64>,
}

impl Universe {
    /// Create a universe from explicit sample points
    ///
    /// # Errors
    /// Fails when fewer than two or more than [`MAX_SAMPLES`] samples are
    /// given, a sample is not finite, or the samples are not strictly
    /// increasing.
    pub fn new(samples: Vec<f64>) -> Result<Self, ConfigError> {
        if samples.len() < 2 {
            return Err(invalid(format!(
                "needs at least 2 samples, got {}",
                samples.len()
            )));
        }
        if samples.len() > MAX_SAMPLES {
            return Err(too_many(samples.len()));
        }
        if let Some(bad) = samples.iter().find(|x| !x.is_finite()) {
            return Err(invalid(format!("sample {} is not finite", bad)));
        }
        if let Some(pair) = samples.windows(2).find(|w| w[0] >= w[1]) {
            return Err(invalid(format!(
                "samples must be strictly increasing ({} followed by {})",
                pair[0], pair[1]
            )));
        }

        Ok(Self { samples })
    }

    /// Evenly spaced samples `min, min + step, ...` up to and including `max`
    /// when `max` lands on the grid.
    ///
    /// # Examples
    ///
    /// ```
    /// use fuzzdrive_engine::Universe;
    ///
    /// let u = Universe::range(0.0, 100.0, 1.0).unwrap();
    /// assert_eq!(u.len(), 101);
    /// assert_eq!(u.max(), 100.0);
    /// ```
    pub fn range(min: f64, max: f64, step: f64) -> Result<Self, ConfigError> {
        if !step.is_finite() || step <= 0.0 {
            return Err(invalid(format!("step must be positive, got {}", step)));
        }
        if !min.is_finite() || !max.is_finite() || min >= max {
            return Err(invalid(format!("min {} must be below max {}", min, max)));
        }

        // Tolerance keeps `max` on the grid despite representation error
        let intervals = ((max - min) / step + 1e-9).floor();
        if !intervals.is_finite() || intervals >= MAX_SAMPLES as f64 {
            return Err(invalid(format!(
                "step {} over [{}, {}] exceeds {} samples",
                step, min, max, MAX_SAMPLES
            )));
        }
        let count = intervals as usize + 1;
        let samples = (0..count).map(|i| min + i as f64 * step).collect();
        Self::new(samples)
    }

    /// `count` evenly spaced samples from `min` to `max` inclusive
    pub fn linspace(min: f64, max: f64, count: usize) -> Result<Self, ConfigError> {
        if count < 2 {
            return Err(invalid(format!("needs at least 2 samples, got {}", count)));
        }
        if count > MAX_SAMPLES {
            return Err(too_many(count));
        }
        let span = max - min;
        let last = (count - 1) as f64;
        let samples = (0..count)
            .map(|i| if i == count - 1 { max } else { min + span * i as f64 / last })
            .collect();
        Self::new(samples)
    }

    /// Sample points
    pub fn samples(&self) -> &[f64] {
        &self.samples
    }

    /// Number of samples
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Always false; kept for API symmetry with `len`
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Lowest sample
    pub fn min(&self) -> f64 {
        self.samples[0]
    }

    /// Highest sample
    pub fn max(&self) -> f64 {
        self.samples[self.samples.len() - 1]
    }

    /// Check if a value lies within [min, max]
    pub fn contains(&self, x: f64) -> bool {
        x >= self.min() && x <= self.max()
    }

    /// Clamp a value into [min, max]
    pub fn clamp(&self, x: f64) -> f64 {
        x.clamp(self.min(), self.max())
    }
}

fn invalid(reason: String) -> ConfigError {
    ConfigError::InvalidSamples(reason)
}

fn too_many(count: usize) -> ConfigError {
    invalid(format!("{} samples exceeds the limit of {}", count, MAX_SAMPLES))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_range_includes_upper_bound() {
        let u = Universe::range(0.0, 50.0, 1.0).unwrap();
        assert_eq!(u.len(), 51);
        assert_eq!(u.min(), 0.0);
        assert_eq!(u.max(), 50.0);
    }

    #[test]
    fn test_range_negative_start() {
        let u = Universe::range(-90.0, 90.0, 1.0).unwrap();
        assert_eq!(u.len(), 181);
        assert_eq!(u.samples()[90], 0.0);
    }

    #[test]
    fn test_range_off_grid_upper_bound() {
        let u = Universe::range(0.0, 1.0, 0.3).unwrap();
        assert_eq!(u.len(), 4);
        assert!((u.max() - 0.9).abs() < 1e-12);
    }

    #[test]
    fn test_linspace() {
        let u = Universe::linspace(0.0, 1.0, 5).unwrap();
        assert_eq!(u.samples(), &[0.0, 0.25, 0.5, 0.75, 1.0]);
    }

    #[test]
    fn test_rejects_too_few_samples() {
        assert!(Universe::new(vec![1.0]).is_err());
        assert!(Universe::linspace(0.0, 1.0, 1).is_err());
    }

    #[test]
    fn test_rejects_non_increasing() {
        assert!(Universe::new(vec![0.0, 1.0, 1.0]).is_err());
        assert!(Universe::new(vec![0.0, 2.0, 1.0]).is_err());
    }

    #[test]
    fn test_rejects_bad_step() {
        assert!(Universe::range(0.0, 10.0, 0.0).is_err());
        assert!(Universe::range(0.0, 10.0, -1.0).is_err());
        assert!(Universe::range(10.0, 0.0, 1.0).is_err());
    }

    #[test]
    fn test_rejects_oversized_grids() {
        assert!(matches!(
            Universe::range(0.0, 100.0, 1e-12),
            Err(ConfigError::InvalidSamples(_))
        ));
        // Ratio overflows to infinity
        assert!(matches!(
            Universe::range(0.0, 1e300, 1e-300),
            Err(ConfigError::InvalidSamples(_))
        ));
        assert!(Universe::linspace(0.0, 1.0, MAX_SAMPLES + 1).is_err());

        let u = Universe::linspace(0.0, 1.0, MAX_SAMPLES).unwrap();
        assert_eq!(u.len(), MAX_SAMPLES);
    }

    #[test]
    fn test_contains_and_clamp() {
        let u = Universe::range(0.0, 100.0, 1.0).unwrap();
        assert!(u.contains(0.0));
        assert!(u.contains(100.0));
        assert!(!u.contains(100.5));
        assert_eq!(u.clamp(150.0), 100.0);
        assert_eq!(u.clamp(-3.0), 0.0);
    }
}
