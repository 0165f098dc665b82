//! Antecedent expressions and crisp input bindings.
//!
//! An [`Expr`] is a tree of [`Clause`]s ("poverty is low") combined with
//! AND (minimum), OR (maximum), and NOT (complement). The `&`, `|`, and `!`
//! operators build the tree:
//!
//! ```rust,ignore
//! let cond = Expr::is(&poverty, "low")? & Expr::is(&education, "tertiary")?;
//! ```
//!
//! Evaluating an expression against [`Inputs`] yields the rule's firing
//! strength in `[0, 1]`.

use std::collections::{BTreeMap, BTreeSet};
use std::ops::{BitAnd, BitOr, Not};
use std::sync::Arc;

use crate::error::FuzzyError;
use crate::variable::{Role, TermId, Variable};

/// Crisp values bound to antecedent variables for one evaluation.
///
/// Values are keyed by variable name and range-checked against the
/// variable's universe when bound. [`RuleBase::new`](crate::RuleBase::new)
/// rejects rule bases in which one name refers to two different variables.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Inputs {
    values: BTreeMap<String, f64>,
}

impl Inputs {
    /// Create an empty binding set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind a crisp value to an antecedent, replacing any previous value.
    ///
    /// Fails with [`FuzzyError::RoleMismatch`] for a consequent and with
    /// [`FuzzyError::InputOutOfRange`] for a value outside the universe.
    pub fn bind(&mut self, variable: &Variable, value: f64) -> Result<(), FuzzyError> {
        if variable.role() != Role::Antecedent {
            return Err(FuzzyError::RoleMismatch {
                variable: variable.name().to_owned(),
                expected: Role::Antecedent,
                actual: variable.role(),
            });
        }
        let value = variable.check_input(value)?;
        self.values.insert(variable.name().to_owned(), value);
        Ok(())
    }

    /// The value bound to the named antecedent, if any.
    pub fn get(&self, variable: &str) -> Option<f64> {
        self.values.get(variable).copied()
    }

    /// Number of bound antecedents.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether nothing has been bound yet.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// A single "variable is term" test.
#[derive(Debug, Clone, PartialEq)]
pub struct Clause {
    variable: Arc<Variable>,
    term: TermId,
}

impl Clause {
    /// Resolve `term` on `variable`, which must be an antecedent.
    pub fn new(variable: &Arc<Variable>, term: &str) -> Result<Self, FuzzyError> {
        if variable.role() != Role::Antecedent {
            return Err(FuzzyError::RoleMismatch {
                variable: variable.name().to_owned(),
                expected: Role::Antecedent,
                actual: variable.role(),
            });
        }
        let term = variable.term_id(term)?;
        Ok(Self {
            variable: Arc::clone(variable),
            term,
        })
    }

    /// The tested variable.
    pub fn variable(&self) -> &Variable {
        &self.variable
    }

    /// The tested term.
    pub const fn term(&self) -> TermId {
        self.term
    }

    /// Membership of the bound input in this clause's term.
    pub fn evaluate(&self, inputs: &Inputs) -> Result<f64, FuzzyError> {
        let x = inputs
            .get(self.variable.name())
            .ok_or_else(|| FuzzyError::MissingInput(self.variable.name().to_owned()))?;
        self.variable.membership(self.term, x)
    }
}

/// A boolean combination of clauses.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// A leaf test.
    Is(Clause),
    /// Complement: `1 - x`.
    Not(Box<Self>),
    /// Conjunction: minimum of both sides.
    And(Box<Self>, Box<Self>),
    /// Disjunction: maximum of both sides.
    Or(Box<Self>, Box<Self>),
}

impl Expr {
    /// Leaf expression "`variable` is `term`".
    pub fn is(variable: &Arc<Variable>, term: &str) -> Result<Self, FuzzyError> {
        Clause::new(variable, term).map(Self::Is)
    }

    /// Degree to which the expression holds for `inputs`.
    pub fn evaluate(&self, inputs: &Inputs) -> Result<f64, FuzzyError> {
        match self {
            Self::Is(clause) => clause.evaluate(inputs),
            Self::Not(inner) => Ok(1.0 - inner.evaluate(inputs)?),
            Self::And(lhs, rhs) => Ok(lhs.evaluate(inputs)?.min(rhs.evaluate(inputs)?)),
            Self::Or(lhs, rhs) => Ok(lhs.evaluate(inputs)?.max(rhs.evaluate(inputs)?)),
        }
    }

    /// Names of all antecedents the expression reads.
    pub fn variables(&self) -> BTreeSet<&str> {
        self.clauses().into_iter().map(|c| c.variable.name()).collect()
    }

    /// Every leaf clause, left to right.
    pub fn clauses(&self) -> Vec<&Clause> {
        let mut clauses = Vec::new();
        self.collect_clauses(&mut clauses);
        clauses
    }

    fn collect_clauses<'a>(&'a self, clauses: &mut Vec<&'a Clause>) {
        match self {
            Self::Is(clause) => clauses.push(clause),
            Self::Not(inner) => inner.collect_clauses(clauses),
            Self::And(lhs, rhs) | Self::Or(lhs, rhs) => {
                lhs.collect_clauses(clauses);
                rhs.collect_clauses(clauses);
            }
        }
    }
}

impl BitAnd for Expr {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self {
        Self::And(Box::new(self), Box::new(rhs))
    }
}

impl BitOr for Expr {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self::Or(Box::new(self), Box::new(rhs))
    }
}

impl Not for Expr {
    type Output = Self;

    fn not(self) -> Self {
        Self::Not(Box::new(self))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::membership::MembershipFunction;
    use crate::universe::Universe;

    const EPS: f64 = 1e-12;

    fn input(name: &str, terms: &[(&str, f64, f64, f64)]) -> Arc<Variable> {
        let mut v = Variable::antecedent(name, Universe::range(0.0, 100.0, 1.0).unwrap());
        for &(term, a, b, c) in terms {
            v.add_term(term, MembershipFunction::triangular(a, b, c).unwrap())
                .unwrap();
        }
        Arc::new(v)
    }

    fn fixture() -> (Arc<Variable>, Arc<Variable>, Inputs) {
        let x = input("x", &[("low", 0.0, 0.0, 50.0), ("high", 50.0, 100.0, 100.0)]);
        let y = input("y", &[("low", 0.0, 0.0, 50.0), ("high", 50.0, 100.0, 100.0)]);
        let mut inputs = Inputs::new();
        inputs.bind(&x, 25.0).unwrap(); // low 0.5, high 0.0
        inputs.bind(&y, 80.0).unwrap(); // low 0.0, high 0.6
        (x, y, inputs)
    }

    #[test]
    fn and_takes_minimum() {
        let (x, y, inputs) = fixture();
        let e = Expr::is(&x, "low").unwrap() & Expr::is(&y, "high").unwrap();
        assert!((e.evaluate(&inputs).unwrap() - 0.5).abs() < EPS);
    }

    #[test]
    fn or_takes_maximum() {
        let (x, y, inputs) = fixture();
        let e = Expr::is(&x, "low").unwrap() | Expr::is(&y, "high").unwrap();
        assert!((e.evaluate(&inputs).unwrap() - 0.6).abs() < EPS);
    }

    #[test]
    fn not_complements() {
        let (x, _, inputs) = fixture();
        let e = !Expr::is(&x, "low").unwrap();
        assert!((e.evaluate(&inputs).unwrap() - 0.5).abs() < EPS);
    }

    #[test]
    fn nested_expression() {
        let (x, y, inputs) = fixture();
        // (x low OR x high) AND NOT y low  ->  min(max(0.5, 0), 1 - 0) = 0.5
        let e = (Expr::is(&x, "low").unwrap() | Expr::is(&x, "high").unwrap())
            & !Expr::is(&y, "low").unwrap();
        assert!((e.evaluate(&inputs).unwrap() - 0.5).abs() < EPS);
        assert_eq!(e.variables().into_iter().collect::<Vec<_>>(), ["x", "y"]);
    }

    #[test]
    fn missing_input_is_reported() {
        let (x, _, _) = fixture();
        let z = input("z", &[("low", 0.0, 0.0, 50.0)]);
        let mut inputs = Inputs::new();
        inputs.bind(&x, 10.0).unwrap();
        let e = Expr::is(&x, "low").unwrap() & Expr::is(&z, "low").unwrap();
        assert_eq!(e.evaluate(&inputs), Err(FuzzyError::MissingInput("z".to_owned())));
    }

    #[test]
    fn unknown_term_fails_at_construction() {
        let (x, _, _) = fixture();
        assert!(matches!(
            Expr::is(&x, "medium"),
            Err(FuzzyError::UnknownTerm { .. })
        ));
    }

    #[test]
    fn consequent_cannot_be_tested_or_bound() {
        let out = Arc::new(
            Variable::consequent("out", Universe::range(0.0, 10.0, 1.0).unwrap())
                .with_term("on", MembershipFunction::triangular(0.0, 5.0, 10.0).unwrap())
                .unwrap(),
        );
        assert!(matches!(
            Expr::is(&out, "on"),
            Err(FuzzyError::RoleMismatch { .. })
        ));
        let mut inputs = Inputs::new();
        assert!(inputs.bind(&out, 1.0).is_err());
    }

    #[test]
    fn out_of_range_input_is_rejected() {
        let (x, _, _) = fixture();
        let mut inputs = Inputs::new();
        assert!(matches!(
            inputs.bind(&x, 101.0),
            Err(FuzzyError::InputOutOfRange { .. })
        ));
        assert!(inputs.is_empty());
    }
}
