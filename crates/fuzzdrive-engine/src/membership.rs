//! Triangular membership functions

use crate::error::ConfigError;

/// Piecewise-linear triangle defined by `left <= peak <= right`.
///
/// The degree is 0 outside `(left, right)`, rises linearly to 1 at `peak`
/// and falls linearly after it. When `left == peak` or `peak == right` the
/// triangle becomes a shoulder; the peak itself always has degree 1.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MembershipFunction {
    left: f64,
    peak: f64,
    right: f64,
}

impl MembershipFunction {
    /// Create a triangular membership function
    ///
    /// # Examples
    ///
    /// ```
    /// use fuzzdrive_engine::MembershipFunction;
    ///
    /// let mf = MembershipFunction::triangular(20.0, 50.0, 80.0).unwrap();
    /// assert_eq!(mf.degree(50.0), 1.0);
    /// assert_eq!(mf.degree(35.0), 0.5);
    /// assert_eq!(mf.degree(90.0), 0.0);
    /// ```
    pub fn triangular(left: f64, peak: f64, right: f64) -> Result<Self, ConfigError> {
        let finite = left.is_finite() && peak.is_finite() && right.is_finite();
        if !finite || left > peak || peak > right {
            return Err(ConfigError::InvalidBreakpoints {
                term: String::new(),
                left,
                peak,
                right,
            });
        }

        Ok(Self { left, peak, right })
    }

    /// Membership degree of `x`, always in [0, 1]
    pub fn degree(&self, x: f64) -> f64 {
        if x == self.peak {
            return 1.0;
        }
        // Also catches NaN
        if !(x > self.left && x < self.right) {
            return 0.0;
        }

        if x < self.peak {
            (x - self.left) / (self.peak - self.left)
        } else {
            (self.right - x) / (self.right - self.peak)
        }
    }

    /// Breakpoints as `[left, peak, right]`
    pub fn breakpoints(&self) -> [f64; 3] {
        [self.left, self.peak, self.right]
    }

    /// Left foot
    pub fn left(&self) -> f64 {
        self.left
    }

    /// Peak
    pub fn peak(&self) -> f64 {
        self.peak
    }

    /// Right foot
    pub fn right(&self) -> f64 {
        self.right
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn breakpoints() -> impl Strategy<Value = (f64, f64, f64)> {
        (-1000.0..1000.0f64, 0.0..500.0f64, 0.0..500.0f64)
            .prop_map(|(left, rise, fall)| (left, left + rise, left + rise + fall))
    }

    proptest! {
        /// Property: degree is always within [0, 1]
        #[test]
        fn test_degree_in_unit_interval((l, p, r) in breakpoints(), x in -2000.0..2000.0f64) {
            let mf = MembershipFunction::triangular(l, p, r).unwrap();
            let d = mf.degree(x);
            prop_assert!((0.0..=1.0).contains(&d));
        }

        /// Property: feet are 0 unless they coincide with the peak, peak is 1
        #[test]
        fn test_breakpoint_values((l, p, r) in breakpoints()) {
            let mf = MembershipFunction::triangular(l, p, r).unwrap();
            prop_assert_eq!(mf.degree(p), 1.0);
            if l < p {
                prop_assert_eq!(mf.degree(l), 0.0);
            }
            if p < r {
                prop_assert_eq!(mf.degree(r), 0.0);
            }
        }

        /// Property: zero outside [left, right]
        #[test]
        fn test_zero_outside_support((l, p, r) in breakpoints(), offset in 0.001..1000.0f64) {
            let mf = MembershipFunction::triangular(l, p, r).unwrap();
            prop_assert_eq!(mf.degree(l - offset), 0.0);
            prop_assert_eq!(mf.degree(r + offset), 0.0);
        }

        /// Property: non-decreasing on [left, peak], non-increasing on [peak, right]
        #[test]
        fn test_monotonic_sides((l, p, r) in breakpoints(), a in 0.0..1.0f64, b in 0.0..1.0f64) {
            let mf = MembershipFunction::triangular(l, p, r).unwrap();
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };

            let x1 = (l + (p - l) * lo).clamp(l, p);
            let x2 = (l + (p - l) * hi).clamp(l, p);
            prop_assert!(mf.degree(x1) <= mf.degree(x2) + 1e-12);

            let y1 = (p + (r - p) * lo).clamp(p, r);
            let y2 = (p + (r - p) * hi).clamp(p, r);
            prop_assert!(mf.degree(y1) + 1e-12 >= mf.degree(y2));
        }
    }
}
