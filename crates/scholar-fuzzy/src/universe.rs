//! Discretized universes of discourse.
//!
//! A [`Universe`] is the finite, strictly ascending sequence of sample
//! points over which a variable's terms are tabulated and over which the
//! inference engine clips, aggregates, and defuzzifies. It is immutable
//! once built.

use crate::error::FuzzyError;

/// Upper bound on the number of sample points in one universe.
const MAX_POINTS: usize = 1_000_000;

/// A finite, strictly ascending set of sample points.
#[derive(Debug, Clone, PartialEq)]
pub struct Universe {
    points: Vec<f64>,
    min: f64,
    max: f64,
}

impl Universe {
    /// Build an evenly spaced universe from `low` to `high` inclusive.
    ///
    /// `Universe::range(0.0, 60.0, 1.0)` yields the 61 integers `0..=60`.
    /// A final step that would overshoot `high` is dropped.
    pub fn range(low: f64, high: f64, step: f64) -> Result<Self, FuzzyError> {
        if !(low.is_finite() && high.is_finite() && step.is_finite()) {
            return Err(FuzzyError::InvalidUniverse(
                "range bounds and step must be finite".to_owned(),
            ));
        }
        if step <= 0.0 {
            return Err(FuzzyError::InvalidUniverse(format!(
                "step must be positive, got {step}"
            )));
        }
        if low > high {
            return Err(FuzzyError::InvalidUniverse(format!(
                "lower bound {low} is greater than upper bound {high}"
            )));
        }

        // Absorb accumulated rounding on the last sample.
        let tolerance = step * 1e-9;
        let mut points = Vec::new();
        let mut i: u32 = 0;
        loop {
            let x = step.mul_add(f64::from(i), low);
            if x > high + tolerance {
                break;
            }
            points.push(x.min(high));
            if points.len() > MAX_POINTS {
                return Err(FuzzyError::InvalidUniverse(format!(
                    "more than {MAX_POINTS} sample points"
                )));
            }
            i = i.saturating_add(1);
        }
        Self::from_points(points)
    }

    /// Build a universe from arbitrary sample points.
    ///
    /// The points must be finite, non-empty, and strictly ascending.
    pub fn from_points(points: Vec<f64>) -> Result<Self, FuzzyError> {
        let (Some(&min), Some(&max)) = (points.first(), points.last()) else {
            return Err(FuzzyError::InvalidUniverse("no sample points".to_owned()));
        };
        if points.len() > MAX_POINTS {
            return Err(FuzzyError::InvalidUniverse(format!(
                "more than {MAX_POINTS} sample points"
            )));
        }
        if points.iter().any(|p| !p.is_finite()) {
            return Err(FuzzyError::InvalidUniverse(
                "sample points must be finite".to_owned(),
            ));
        }
        if points.windows(2).any(|w| matches!(w, [lo, hi] if lo >= hi)) {
            return Err(FuzzyError::InvalidUniverse(
                "sample points must be strictly ascending".to_owned(),
            ));
        }
        Ok(Self { points, min, max })
    }

    /// The sample points in ascending order.
    pub fn points(&self) -> &[f64] {
        &self.points
    }

    /// Number of sample points.
    pub const fn len(&self) -> usize {
        self.points.len()
    }

    /// Always `false`: construction rejects empty universes.
    pub const fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Smallest sample point.
    pub const fn min(&self) -> f64 {
        self.min
    }

    /// Largest sample point.
    pub const fn max(&self) -> f64 {
        self.max
    }

    /// Whether `x` lies within `[min, max]`.
    pub fn contains(&self, x: f64) -> bool {
        (self.min..=self.max).contains(&x)
    }

    /// Linearly interpolate a tabulated function at `x`.
    ///
    /// `values[i]` is the function's value at `points()[i]`. Between two
    /// sample points the result is the straight line joining them; beyond
    /// either end it is the value at that end.
    pub fn interpolate(&self, values: &[f64], x: f64) -> Result<f64, FuzzyError> {
        if values.len() != self.points.len() {
            return Err(FuzzyError::LengthMismatch {
                expected: self.points.len(),
                actual: values.len(),
            });
        }
        let first = values.first().copied().unwrap_or(0.0);
        let last = values.last().copied().unwrap_or(0.0);
        if x.is_nan() {
            return Ok(0.0);
        }
        if x <= self.min {
            return Ok(first);
        }
        if x >= self.max {
            return Ok(last);
        }

        // First index whose point is >= x; lies in 1..len because min < x < max.
        let hi = self.points.partition_point(|&p| p < x);
        let lo = hi.saturating_sub(1);
        let (Some(&x0), Some(&x1), Some(&y0), Some(&y1)) = (
            self.points.get(lo),
            self.points.get(hi),
            values.get(lo),
            values.get(hi),
        ) else {
            return Ok(last);
        };
        let t = (x - x0) / (x1 - x0);
        Ok((y1 - y0).mul_add(t, y0))
    }
}
