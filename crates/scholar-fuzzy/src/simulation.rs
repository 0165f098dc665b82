//! Per-call evaluation of one rule base.
//!
//! A [`Simulation`] borrows an immutable [`RuleBase`], collects crisp inputs,
//! and computes the crisp output together with the aggregated set it was
//! derived from. It is created for a single evaluation and never shared, so
//! any number of simulations can run against the same rule base at once.

use tracing::warn;

use crate::defuzz::Defuzzification;
use crate::error::FuzzyError;
use crate::expr::Inputs;
use crate::inference::{Aggregate, infer};
use crate::rule::RuleBase;
use crate::variable::Variable;

/// One evaluation of a rule base.
#[derive(Debug, Clone)]
pub struct Simulation<'a> {
    rule_base: &'a RuleBase,
    inputs: Inputs,
    aggregate: Option<Aggregate>,
    output: Option<f64>,
}

impl<'a> Simulation<'a> {
    /// Start an evaluation with no inputs bound.
    pub fn new(rule_base: &'a RuleBase) -> Self {
        Self::with_inputs(rule_base, Inputs::new())
    }

    /// Start an evaluation with pre-bound inputs.
    pub const fn with_inputs(rule_base: &'a RuleBase, inputs: Inputs) -> Self {
        Self {
            rule_base,
            inputs,
            aggregate: None,
            output: None,
        }
    }

    /// Bind a crisp value to an antecedent.
    pub fn input(&mut self, variable: &Variable, value: f64) -> Result<&mut Self, FuzzyError> {
        self.inputs.bind(variable, value)?;
        Ok(self)
    }

    /// Run inference and defuzzify the result.
    ///
    /// Every antecedent read by the rule base must be bound. When no rule
    /// fires the aggregated set is still recorded and
    /// [`FuzzyError::DegenerateOutput`] is returned.
    pub fn compute(&mut self, method: Defuzzification) -> Result<f64, FuzzyError> {
        if let Some(missing) = self
            .rule_base
            .antecedents()
            .into_iter()
            .find(|name| self.inputs.get(name).is_none())
        {
            return Err(FuzzyError::MissingInput(missing.to_owned()));
        }

        let aggregate = infer(self.rule_base, &self.inputs)?;
        let consequent = self.rule_base.consequent();
        let result = method.apply(aggregate.membership(), consequent);
        self.aggregate = Some(aggregate);

        match result {
            Ok(value) => {
                self.output = Some(value);
                Ok(value)
            }
            Err(e) => {
                if matches!(e, FuzzyError::DegenerateOutput(_)) {
                    warn!(
                        consequent = consequent.name(),
                        method = method.as_str(),
                        "no rule fired; crisp output undefined"
                    );
                }
                self.output = None;
                Err(e)
            }
        }
    }

    /// The bound inputs.
    pub const fn inputs(&self) -> &Inputs {
        &self.inputs
    }

    /// The aggregated set from the last [`compute`](Self::compute).
    pub const fn aggregate(&self) -> Option<&Aggregate> {
        self.aggregate.as_ref()
    }

    /// The crisp output from the last successful [`compute`](Self::compute).
    pub const fn output(&self) -> Option<f64> {
        self.output
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::expr::Expr;
    use crate::membership::MembershipFunction;
    use crate::rule::{Conclusion, Rule};
    use crate::universe::Universe;

    fn tri(a: f64, b: f64, c: f64) -> MembershipFunction {
        MembershipFunction::triangular(a, b, c).unwrap()
    }

    fn system() -> (Arc<Variable>, Arc<Variable>, RuleBase) {
        let quality = Arc::new(
            Variable::antecedent("quality", Universe::range(0.0, 10.0, 1.0).unwrap())
                .with_term("poor", tri(0.0, 0.0, 5.0))
                .unwrap()
                .with_term("good", tri(5.0, 10.0, 10.0))
                .unwrap(),
        );
        let service = Arc::new(
            Variable::antecedent("service", Universe::range(0.0, 10.0, 1.0).unwrap())
                .with_term("poor", tri(0.0, 0.0, 5.0))
                .unwrap()
                .with_term("good", tri(5.0, 10.0, 10.0))
                .unwrap(),
        );
        let tip = Arc::new(
            Variable::consequent("tip", Universe::range(0.0, 25.0, 1.0).unwrap())
                .with_term("low", tri(0.0, 0.0, 13.0))
                .unwrap()
                .with_term("high", tri(13.0, 25.0, 25.0))
                .unwrap(),
        );
        let rules = vec![
            Rule::new(
                Expr::is(&quality, "poor").unwrap() | Expr::is(&service, "poor").unwrap(),
                Conclusion::new(&tip, "low").unwrap(),
            ),
            Rule::new(
                Expr::is(&quality, "good").unwrap() & Expr::is(&service, "good").unwrap(),
                Conclusion::new(&tip, "high").unwrap(),
            ),
        ];
        let base = RuleBase::new(&tip, rules).unwrap();
        (quality, service, base)
    }

    #[test]
    fn computes_and_records_output() {
        let (quality, service, base) = system();
        let mut sim = Simulation::new(&base);
        sim.input(&quality, 10.0).unwrap().input(&service, 9.0).unwrap();
        let tip = sim.compute(Defuzzification::Centroid).unwrap();
        assert!(tip > 13.0 && tip <= 25.0, "tip = {tip}");
        assert_eq!(sim.output(), Some(tip));
        assert_eq!(sim.aggregate().unwrap().fired(), 1);
    }

    #[test]
    fn unbound_antecedent_is_missing() {
        let (quality, _, base) = system();
        let mut sim = Simulation::new(&base);
        sim.input(&quality, 3.0).unwrap();
        assert_eq!(
            sim.compute(Defuzzification::Centroid),
            Err(FuzzyError::MissingInput("service".to_owned()))
        );
        assert!(sim.aggregate().is_none());
    }

    #[test]
    fn nothing_fired_is_degenerate_but_aggregate_is_kept() {
        let (quality, service, base) = system();
        let mut sim = Simulation::new(&base);
        // Exactly 5 is zero in both "poor" and "good".
        sim.input(&quality, 5.0).unwrap().input(&service, 5.0).unwrap();
        assert_eq!(
            sim.compute(Defuzzification::Centroid),
            Err(FuzzyError::DegenerateOutput("tip".to_owned()))
        );
        assert!(sim.aggregate().unwrap().is_degenerate());
        assert_eq!(sim.output(), None);
    }

    #[test]
    fn repeated_compute_is_identical() {
        let (quality, service, base) = system();
        let mut inputs = Inputs::new();
        inputs.bind(&quality, 2.0).unwrap();
        inputs.bind(&service, 7.0).unwrap();
        let a = Simulation::with_inputs(&base, inputs.clone())
            .compute(Defuzzification::Centroid)
            .unwrap();
        let b = Simulation::with_inputs(&base, inputs)
            .compute(Defuzzification::Centroid)
            .unwrap();
        assert_eq!(a.to_bits(), b.to_bits());
    }
}
