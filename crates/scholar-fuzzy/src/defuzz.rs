//! Defuzzification: collapsing an aggregated fuzzy set to one crisp value.
//!
//! The default is the discrete centroid
//! `sum(x_i * mu_i) / sum(mu_i)` over the universe sample points. The
//! bisector and the maximum-based methods are also available. Every method
//! fails with [`FuzzyError::DegenerateOutput`] when the set has zero area,
//! and every successful result lies within the universe bounds.

use serde::Deserialize;

use crate::error::FuzzyError;
use crate::universe::Universe;
use crate::variable::Variable;

/// Tolerance for "equal to the height" in the maximum-based methods.
const PLATEAU_TOLERANCE: f64 = 1e-12;

/// Defuzzification method.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Defuzzification {
    /// Center of gravity of the sampled set.
    #[default]
    Centroid,
    /// Point splitting the sampled mass in half.
    Bisector,
    /// Mean of the points at maximum membership.
    #[serde(alias = "mom")]
    MeanOfMaximum,
    /// Smallest point at maximum membership.
    #[serde(alias = "som")]
    SmallestOfMaximum,
    /// Largest point at maximum membership.
    #[serde(alias = "lom")]
    LargestOfMaximum,
}

impl Defuzzification {
    /// Collapse `membership`, tabulated over `variable`'s universe.
    ///
    /// A zero-area set is reported as degenerate for `variable`.
    pub fn apply(self, membership: &[f64], variable: &Variable) -> Result<f64, FuzzyError> {
        let universe = variable.universe();
        let result = match self {
            Self::Centroid => centroid(membership, universe),
            Self::Bisector => bisector(membership, universe),
            Self::MeanOfMaximum => mean_of_maximum(membership, universe),
            Self::SmallestOfMaximum => maximum_extreme(membership, universe, Extreme::Smallest),
            Self::LargestOfMaximum => maximum_extreme(membership, universe, Extreme::Largest),
        };
        result.map_err(|e| match e {
            FuzzyError::DegenerateOutput(_) => {
                FuzzyError::DegenerateOutput(variable.name().to_owned())
            }
            other => other,
        })
    }

    /// Lower-case method name for logs.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Centroid => "centroid",
            Self::Bisector => "bisector",
            Self::MeanOfMaximum => "mom",
            Self::SmallestOfMaximum => "som",
            Self::LargestOfMaximum => "lom",
        }
    }
}

/// Discrete center of gravity of `membership` over `universe`.
pub fn centroid(membership: &[f64], universe: &Universe) -> Result<f64, FuzzyError> {
    check(membership, universe)?;
    let (weighted, area) = universe
        .points()
        .iter()
        .zip(membership)
        .fold((0.0_f64, 0.0_f64), |(weighted, area), (&x, &mu)| {
            (x.mul_add(mu, weighted), area + mu)
        });
    if area <= 0.0 {
        return Err(degenerate(universe));
    }
    Ok((weighted / area).clamp(universe.min(), universe.max()))
}

/// First sample point at which the cumulative mass reaches half the total.
pub fn bisector(membership: &[f64], universe: &Universe) -> Result<f64, FuzzyError> {
    check(membership, universe)?;
    let area: f64 = membership.iter().sum();
    if area <= 0.0 {
        return Err(degenerate(universe));
    }
    let half = area / 2.0;
    let mut cumulative = 0.0;
    for (&x, &mu) in universe.points().iter().zip(membership) {
        cumulative += mu;
        if cumulative >= half {
            return Ok(x);
        }
    }
    Ok(universe.max())
}

/// Mean of the sample points where membership equals the set's height.
pub fn mean_of_maximum(membership: &[f64], universe: &Universe) -> Result<f64, FuzzyError> {
    let plateau = plateau(membership, universe)?;
    let (sum, count) = plateau
        .iter()
        .fold((0.0_f64, 0.0_f64), |(sum, count), &x| (sum + x, count + 1.0));
    Ok((sum / count).clamp(universe.min(), universe.max()))
}

#[derive(Clone, Copy)]
enum Extreme {
    Smallest,
    Largest,
}

fn maximum_extreme(
    membership: &[f64],
    universe: &Universe,
    extreme: Extreme,
) -> Result<f64, FuzzyError> {
    let plateau = plateau(membership, universe)?;
    let picked = match extreme {
        Extreme::Smallest => plateau.first(),
        Extreme::Largest => plateau.last(),
    };
    picked.copied().ok_or_else(|| degenerate(universe))
}

/// Sample points at the set's height, in ascending order. Never empty on `Ok`.
fn plateau(membership: &[f64], universe: &Universe) -> Result<Vec<f64>, FuzzyError> {
    check(membership, universe)?;
    let height = membership.iter().copied().fold(0.0, f64::max);
    if height <= 0.0 {
        return Err(degenerate(universe));
    }
    Ok(universe
        .points()
        .iter()
        .zip(membership)
        .filter(|&(_, &mu)| height - mu <= PLATEAU_TOLERANCE)
        .map(|(&x, _)| x)
        .collect())
}

fn check(membership: &[f64], universe: &Universe) -> Result<(), FuzzyError> {
    if membership.len() == universe.len() {
        Ok(())
    } else {
        Err(FuzzyError::LengthMismatch {
            expected: universe.len(),
            actual: membership.len(),
        })
    }
}

fn degenerate(universe: &Universe) -> FuzzyError {
    FuzzyError::DegenerateOutput(format!("universe [{}, {}]", universe.min(), universe.max()))
}
