//! Mapping a crisp output back onto its variable's terms.
//!
//! The degree of each term at the crisp value is read from the term's
//! tabulated samples by linear interpolation, the same discretization the
//! inference engine aggregated over. The best term is the one with the
//! highest degree; on a tie the term declared first wins.

use crate::error::FuzzyError;
use crate::variable::Variable;

/// Degree of every term at one crisp value, plus the winning term.
#[derive(Debug, Clone, PartialEq)]
pub struct Interpretation {
    value: f64,
    degrees: Vec<(String, f64)>,
    best: usize,
}

impl Interpretation {
    /// The crisp value that was interpreted.
    pub const fn value(&self) -> f64 {
        self.value
    }

    /// `(term name, degree)` pairs in declaration order.
    pub fn degrees(&self) -> &[(String, f64)] {
        &self.degrees
    }

    /// Degree of the named term, if it exists.
    pub fn degree(&self, term: &str) -> Option<f64> {
        self.degrees
            .iter()
            .find(|(name, _)| name == term)
            .map(|&(_, d)| d)
    }

    /// Name of the term with the highest degree.
    pub fn best(&self) -> &str {
        self.degrees
            .get(self.best)
            .map_or("", |(name, _)| name.as_str())
    }

    /// Declaration index of the best term.
    pub const fn best_index(&self) -> usize {
        self.best
    }
}

/// Interpret crisp value `y` against every term of `variable`.
pub fn interpret(variable: &Variable, y: f64) -> Result<Interpretation, FuzzyError> {
    if variable.terms().is_empty() {
        return Err(FuzzyError::NoTerms(variable.name().to_owned()));
    }
    let universe = variable.universe();
    let mut degrees = Vec::with_capacity(variable.terms().len());
    let mut best = 0;
    let mut best_degree = f64::NEG_INFINITY;
    for (index, term) in variable.terms().iter().enumerate() {
        let degree = universe.interpolate(term.samples(), y)?.clamp(0.0, 1.0);
        // Strict comparison keeps the earliest term on ties.
        if degree > best_degree {
            best = index;
            best_degree = degree;
        }
        degrees.push((term.name().to_owned(), degree));
    }
    Ok(Interpretation {
        value: y,
        degrees,
        best,
    })
}
