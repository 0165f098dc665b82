//! Parametric membership functions.
//!
//! Two shapes are supported, matching the shapes used by the scholarship
//! rule base:
//!
//! - **Triangular** `(a, b, c)`: zero outside `[a, c]`, rising linearly to
//!   1.0 at the apex `b`, then falling back to zero at `c`.
//! - **Trapezoidal** `(a, b, c, d)`: zero outside `[a, d]`, rising on
//!   `[a, b]`, flat at 1.0 on `[b, c]`, falling on `[c, d]`.
//!
//! A zero-width ramp (`a == b`, `b == c`, `c == d`) is an instantaneous
//! step: the ramp branch is never entered, so no division by zero occurs.

use serde::Serialize;

use crate::error::FuzzyError;

/// A membership function mapping a crisp value to a degree in `[0, 1]`.
///
/// Constructed through [`MembershipFunction::triangular`] or
/// [`MembershipFunction::trapezoidal`], which reject unordered or
/// non-finite parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "shape", rename_all = "snake_case")]
pub enum MembershipFunction {
    /// Triangle with feet at `a` and `c` and apex at `b`.
    Triangular {
        /// Left foot.
        a: f64,
        /// Apex.
        b: f64,
        /// Right foot.
        c: f64,
    },
    /// Trapezoid with feet at `a` and `d` and plateau on `[b, c]`.
    Trapezoidal {
        /// Left foot.
        a: f64,
        /// Plateau start.
        b: f64,
        /// Plateau end.
        c: f64,
        /// Right foot.
        d: f64,
    },
}

impl MembershipFunction {
    /// Build a triangular function. Requires finite `a <= b <= c`.
    pub fn triangular(a: f64, b: f64, c: f64) -> Result<Self, FuzzyError> {
        check_params("triangular", &[a, b, c])?;
        Ok(Self::Triangular { a, b, c })
    }

    /// Build a trapezoidal function. Requires finite `a <= b <= c <= d`.
    pub fn trapezoidal(a: f64, b: f64, c: f64, d: f64) -> Result<Self, FuzzyError> {
        check_params("trapezoidal", &[a, b, c, d])?;
        Ok(Self::Trapezoidal { a, b, c, d })
    }

    /// Evaluate the membership degree at `x`.
    ///
    /// Always returns a value in `[0, 1]`. Non-finite `x` has degree 0.
    pub fn evaluate(&self, x: f64) -> f64 {
        if !x.is_finite() {
            return 0.0;
        }
        let degree = match *self {
            Self::Triangular { a, b, c } => {
                if x < a || x > c {
                    0.0
                } else if x < b {
                    (x - a) / (b - a)
                } else if x > b {
                    (c - x) / (c - b)
                } else {
                    1.0
                }
            }
            Self::Trapezoidal { a, b, c, d } => {
                if x < a || x > d {
                    0.0
                } else if x < b {
                    (x - a) / (b - a)
                } else if x <= c {
                    1.0
                } else {
                    (d - x) / (d - c)
                }
            }
        };
        degree.clamp(0.0, 1.0)
    }

    /// Evaluate the function at every point, preserving length and order.
    pub fn evaluate_all(&self, points: &[f64]) -> Vec<f64> {
        points.iter().map(|&x| self.evaluate(x)).collect()
    }

    /// The closed interval outside of which the degree is zero.
    pub const fn support(&self) -> (f64, f64) {
        match *self {
            Self::Triangular { a, c, .. } => (a, c),
            Self::Trapezoidal { a, d, .. } => (a, d),
        }
    }

    /// The closed interval on which the degree is exactly 1.0.
    pub const fn core(&self) -> (f64, f64) {
        match *self {
            Self::Triangular { b, .. } => (b, b),
            Self::Trapezoidal { b, c, .. } => (b, c),
        }
    }

    /// Short shape name for logs and error messages.
    pub const fn shape(&self) -> &'static str {
        match self {
            Self::Triangular { .. } => "triangular",
            Self::Trapezoidal { .. } => "trapezoidal",
        }
    }
}

fn check_params(shape: &'static str, params: &[f64]) -> Result<(), FuzzyError> {
    let invalid = |reason| FuzzyError::InvalidShape {
        shape,
        params: params.to_vec(),
        reason,
    };
    if params.iter().any(|p| !p.is_finite()) {
        return Err(invalid("parameters must be finite"));
    }
    if params.windows(2).any(|w| matches!(w, [lo, hi] if lo > hi)) {
        return Err(invalid("parameters must be non-decreasing"));
    }
    Ok(())
}
