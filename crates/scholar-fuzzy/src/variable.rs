//! Fuzzy variables and their terms.
//!
//! A [`Variable`] is a named axis (an input [`Role::Antecedent`] or an
//! output [`Role::Consequent`]) with a [`Universe`] and an ordered list of
//! [`Term`]s. Each term owns its membership function and a tabulation of
//! that function over the universe, computed once when the term is added.
//!
//! Terms are addressed by [`TermId`] after construction. Names are resolved
//! to ids once while rules are being built, so evaluation never performs a
//! name lookup.

use crate::error::FuzzyError;
use crate::membership::MembershipFunction;
use crate::universe::Universe;

/// Whether a variable is read from inputs or produced by rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    /// An input variable used in rule conditions.
    Antecedent,
    /// An output variable produced by rule conclusions.
    Consequent,
}

/// Index of a term within its owning variable, in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TermId(usize);

impl TermId {
    /// Position of the term in declaration order.
    pub const fn index(self) -> usize {
        self.0
    }
}

/// A named fuzzy set on a variable.
#[derive(Debug, Clone, PartialEq)]
pub struct Term {
    name: String,
    function: MembershipFunction,
    samples: Vec<f64>,
}

impl Term {
    /// The term's name, unique within its variable.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The analytic membership function.
    pub const fn function(&self) -> &MembershipFunction {
        &self.function
    }

    /// The membership function tabulated over the owning universe.
    pub fn samples(&self) -> &[f64] {
        &self.samples
    }

    /// Membership degree at `x`, from the analytic shape.
    pub fn membership(&self, x: f64) -> f64 {
        self.function.evaluate(x)
    }
}

/// A fuzzy variable: a role, a universe, and an ordered set of terms.
#[derive(Debug, Clone, PartialEq)]
pub struct Variable {
    name: String,
    role: Role,
    universe: Universe,
    terms: Vec<Term>,
}

impl Variable {
    /// Create an input variable with no terms.
    pub fn antecedent(name: impl Into<String>, universe: Universe) -> Self {
        Self::new(name, Role::Antecedent, universe)
    }

    /// Create an output variable with no terms.
    pub fn consequent(name: impl Into<String>, universe: Universe) -> Self {
        Self::new(name, Role::Consequent, universe)
    }

    fn new(name: impl Into<String>, role: Role, universe: Universe) -> Self {
        Self {
            name: name.into(),
            role,
            universe,
            terms: Vec::new(),
        }
    }

    /// Register a term. Fails if the name is already taken.
    pub fn add_term(
        &mut self,
        name: impl Into<String>,
        function: MembershipFunction,
    ) -> Result<TermId, FuzzyError> {
        let name = name.into();
        if self.terms.iter().any(|t| t.name == name) {
            return Err(FuzzyError::DuplicateTerm {
                variable: self.name.clone(),
                term: name,
            });
        }
        let samples = function.evaluate_all(self.universe.points());
        let id = TermId(self.terms.len());
        self.terms.push(Term {
            name,
            function,
            samples,
        });
        Ok(id)
    }

    /// Builder form of [`add_term`](Self::add_term).
    pub fn with_term(
        mut self,
        name: impl Into<String>,
        function: MembershipFunction,
    ) -> Result<Self, FuzzyError> {
        self.add_term(name, function)?;
        Ok(self)
    }

    /// The variable's name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Input or output.
    pub const fn role(&self) -> Role {
        self.role
    }

    /// The discretized domain.
    pub const fn universe(&self) -> &Universe {
        &self.universe
    }

    /// All terms in declaration order.
    pub fn terms(&self) -> &[Term] {
        &self.terms
    }

    /// Resolve a term name to its id.
    pub fn term_id(&self, name: &str) -> Result<TermId, FuzzyError> {
        self.terms
            .iter()
            .position(|t| t.name == name)
            .map(TermId)
            .ok_or_else(|| FuzzyError::UnknownTerm {
                variable: self.name.clone(),
                term: name.to_owned(),
            })
    }

    /// Look up a term by id.
    pub fn term(&self, id: TermId) -> Option<&Term> {
        self.terms.get(id.0)
    }

    /// Membership of `x` in the named term.
    pub fn term_membership(&self, name: &str, x: f64) -> Result<f64, FuzzyError> {
        let id = self.term_id(name)?;
        self.membership(id, x)
    }

    /// Membership of `x` in the term with the given id.
    pub fn membership(&self, id: TermId, x: f64) -> Result<f64, FuzzyError> {
        self.term(id)
            .map(|t| t.membership(x))
            .ok_or_else(|| FuzzyError::UnknownTerm {
                variable: self.name.clone(),
                term: format!("#{}", id.0),
            })
    }

    /// Degree of `x` in every term, in declaration order.
    pub fn fuzzify(&self, x: f64) -> Vec<(&str, f64)> {
        self.terms
            .iter()
            .map(|t| (t.name.as_str(), t.membership(x)))
            .collect()
    }

    /// Accept `x` only if it lies within the universe bounds.
    pub fn check_input(&self, x: f64) -> Result<f64, FuzzyError> {
        if self.universe.contains(x) {
            Ok(x)
        } else {
            Err(FuzzyError::InputOutOfRange {
                variable: self.name.clone(),
                value: x,
                min: self.universe.min(),
                max: self.universe.max(),
            })
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-12;

    fn poverty() -> Variable {
        let universe = Universe::range(0.0, 60.0, 1.0).unwrap();
        Variable::antecedent("poverty", universe)
            .with_term("low", MembershipFunction::triangular(0.0, 5.0, 15.0).unwrap())
            .unwrap()
            .with_term(
                "medium",
                MembershipFunction::trapezoidal(10.0, 15.0, 40.0, 50.0).unwrap(),
            )
            .unwrap()
    }

    #[test]
    fn terms_keep_declaration_order() {
        let v = poverty();
        let names: Vec<&str> = v.terms().iter().map(Term::name).collect();
        assert_eq!(names, ["low", "medium"]);
        assert_eq!(v.term_id("medium").unwrap().index(), 1);
    }

    #[test]
    fn duplicate_term_is_rejected() {
        let mut v = poverty();
        let err = v.add_term("low", MembershipFunction::triangular(0.0, 1.0, 2.0).unwrap());
        assert_eq!(
            err,
            Err(FuzzyError::DuplicateTerm {
                variable: "poverty".to_owned(),
                term: "low".to_owned()
            })
        );
        assert_eq!(v.terms().len(), 2);
    }

    #[test]
    fn unknown_term_is_rejected() {
        let v = poverty();
        assert!(matches!(
            v.term_membership("extreme", 3.0),
            Err(FuzzyError::UnknownTerm { .. })
        ));
    }

    #[test]
    fn term_membership_evaluates_shape() {
        let v = poverty();
        assert!((v.term_membership("low", 10.0).unwrap() - 0.5).abs() < EPS);
        assert!((v.term_membership("medium", 45.0).unwrap() - 0.5).abs() < EPS);
    }

    #[test]
    fn samples_cover_the_universe() {
        let v = poverty();
        let low = v.term(v.term_id("low").unwrap()).unwrap();
        assert_eq!(low.samples().len(), v.universe().len());
        assert!((low.samples().get(5).copied().unwrap() - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn fuzzify_reports_every_term() {
        let v = poverty();
        let degrees = v.fuzzify(12.0);
        assert_eq!(degrees.len(), 2);
        let (name, low) = degrees.first().copied().unwrap();
        assert_eq!(name, "low");
        assert!((low - 0.3).abs() < EPS);
    }

    #[test]
    fn check_input_enforces_bounds() {
        let v = poverty();
        assert!(v.check_input(0.0).is_ok());
        assert!(v.check_input(60.0).is_ok());
        assert!(matches!(
            v.check_input(60.5),
            Err(FuzzyError::InputOutOfRange { .. })
        ));
        assert!(v.check_input(f64::NAN).is_err());
    }
}
