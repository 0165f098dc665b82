//! Mamdani inference: min-implication and max-aggregation.
//!
//! For every rule in a [`RuleBase`]:
//!
//! 1. The firing strength is the antecedent's degree for the inputs.
//! 2. Each concluded term's tabulated shape is clipped at that strength
//!    (`min(strength, mu(x))` at every universe point).
//! 3. The clipped sets of all rules are combined by pointwise maximum.
//!
//! Both operators are commutative and associative, so rule order never
//! affects the result. A rule with zero strength contributes nothing.

use tracing::debug;

use crate::error::FuzzyError;
use crate::expr::Inputs;
use crate::rule::RuleBase;

/// The aggregated output fuzzy set of one rule base for one set of inputs.
#[derive(Debug, Clone, PartialEq)]
pub struct Aggregate {
    membership: Vec<f64>,
    activations: Vec<f64>,
}

impl Aggregate {
    /// Aggregated membership at each point of the consequent's universe.
    pub fn membership(&self) -> &[f64] {
        &self.membership
    }

    /// Firing strength of each rule, in rule-base order.
    pub fn activations(&self) -> &[f64] {
        &self.activations
    }

    /// Number of rules with non-zero firing strength.
    pub fn fired(&self) -> usize {
        self.activations.iter().filter(|&&s| s > 0.0).count()
    }

    /// Sum of the aggregated membership samples.
    pub fn area(&self) -> f64 {
        self.membership.iter().sum()
    }

    /// Largest aggregated membership value.
    pub fn height(&self) -> f64 {
        self.membership.iter().copied().fold(0.0, f64::max)
    }

    /// Whether the aggregated set is identically zero.
    pub fn is_degenerate(&self) -> bool {
        self.membership.iter().all(|&m| m <= 0.0)
    }
}

/// Run every rule of `rule_base` against `inputs` and aggregate the results.
///
/// Fails if a rule reads an antecedent that has no bound value.
pub fn infer(rule_base: &RuleBase, inputs: &Inputs) -> Result<Aggregate, FuzzyError> {
    let consequent = rule_base.consequent();
    let universe_len = consequent.universe().len();
    let mut membership = vec![0.0_f64; universe_len];
    let mut activations = Vec::with_capacity(rule_base.len());

    for rule in rule_base.rules() {
        let strength = rule.firing_strength(inputs)?;
        activations.push(strength);
        if strength <= 0.0 {
            continue;
        }
        for conclusion in rule
            .conclusions()
            .iter()
            .filter(|c| c.variable().name() == consequent.name())
        {
            let variable = conclusion.variable();
            let term = variable
                .term(conclusion.term())
                .ok_or_else(|| FuzzyError::UnknownTerm {
                    variable: variable.name().to_owned(),
                    term: format!("#{}", conclusion.term().index()),
                })?;
            let samples = term.samples();
            if samples.len() != universe_len {
                return Err(FuzzyError::LengthMismatch {
                    expected: universe_len,
                    actual: samples.len(),
                });
            }
            for (slot, &mu) in membership.iter_mut().zip(samples) {
                *slot = slot.max(strength.min(mu));
            }
        }
    }

    let aggregate = Aggregate {
        membership,
        activations,
    };
    debug!(
        consequent = consequent.name(),
        rules = rule_base.len(),
        fired = aggregate.fired(),
        height = aggregate.height(),
        "rule base evaluated"
    );
    Ok(aggregate)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;

    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use rand::seq::SliceRandom;

    use super::*;
    use crate::expr::Expr;
    use crate::membership::MembershipFunction;
    use crate::rule::{Conclusion, Rule};
    use crate::universe::Universe;
    use crate::variable::Variable;

    const EPS: f64 = 1e-12;

    fn tri(a: f64, b: f64, c: f64) -> MembershipFunction {
        MembershipFunction::triangular(a, b, c).unwrap()
    }

    struct Fixture {
        temp: Arc<Variable>,
        fan: Arc<Variable>,
        rules: Vec<Rule>,
    }

    fn fixture() -> Fixture {
        let temp = Arc::new(
            Variable::antecedent("temp", Universe::range(0.0, 40.0, 1.0).unwrap())
                .with_term("cold", tri(0.0, 0.0, 20.0))
                .unwrap()
                .with_term("warm", tri(10.0, 20.0, 30.0))
                .unwrap()
                .with_term("hot", tri(20.0, 40.0, 40.0))
                .unwrap(),
        );
        let fan = Arc::new(
            Variable::consequent("fan", Universe::range(0.0, 100.0, 1.0).unwrap())
                .with_term("slow", tri(0.0, 0.0, 50.0))
                .unwrap()
                .with_term("medium", tri(25.0, 50.0, 75.0))
                .unwrap()
                .with_term("fast", tri(50.0, 100.0, 100.0))
                .unwrap(),
        );
        let rule = |t: &str, f: &str| {
            Rule::new(
                Expr::is(&temp, t).unwrap(),
                Conclusion::new(&fan, f).unwrap(),
            )
        };
        let rules = vec![
            rule("cold", "slow"),
            rule("warm", "medium"),
            rule("hot", "fast"),
            // Conflicting duplicate: blended, not deduplicated.
            rule("warm", "slow"),
        ];
        Fixture { temp, fan, rules }
    }

    fn inputs_for(temp: &Variable, value: f64) -> Inputs {
        let mut inputs = Inputs::new();
        inputs.bind(temp, value).unwrap();
        inputs
    }

    #[test]
    fn clips_and_takes_pointwise_max() {
        let f = fixture();
        let base = RuleBase::new(&f.fan, f.rules).unwrap();
        // temp 15: cold 0.25, warm 0.5, hot 0.
        let agg = infer(&base, &inputs_for(&f.temp, 15.0)).unwrap();
        assert_eq!(agg.activations().len(), 4);
        assert_eq!(agg.fired(), 3);
        let m = agg.membership();
        assert_eq!(m.len(), 101);
        // x = 0: slow is 1.0, clipped by max(0.25, 0.5) from the two slow rules.
        assert!((m.first().copied().unwrap() - 0.5).abs() < EPS);
        // x = 50: medium apex clipped at 0.5.
        assert!((m.get(50).copied().unwrap() - 0.5).abs() < EPS);
        // x = 90: only fast covers it, and hot did not fire.
        assert!(m.get(90).copied().unwrap().abs() < EPS);
        assert!((agg.height() - 0.5).abs() < EPS);
    }

    #[test]
    fn aggregate_never_exceeds_strongest_rule() {
        let f = fixture();
        let base = RuleBase::new(&f.fan, f.rules).unwrap();
        for t in 0..=40 {
            let agg = infer(&base, &inputs_for(&f.temp, f64::from(t))).unwrap();
            let strongest = agg.activations().iter().copied().fold(0.0, f64::max);
            assert!(agg.height() <= strongest + EPS);
            assert!(agg.membership().iter().all(|m| (0.0..=1.0).contains(m)));
        }
    }

    #[test]
    fn rule_order_does_not_matter() {
        let f = fixture();
        let base = RuleBase::new(&f.fan, f.rules.clone()).unwrap();
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..20 {
            let mut shuffled = f.rules.clone();
            shuffled.shuffle(&mut rng);
            let permuted = RuleBase::new(&f.fan, shuffled).unwrap();
            for t in [3.0, 12.5, 20.0, 27.0, 39.0] {
                let inputs = inputs_for(&f.temp, t);
                let a = infer(&base, &inputs).unwrap();
                let b = infer(&permuted, &inputs).unwrap();
                assert_eq!(a.membership(), b.membership());
            }
        }
    }

    #[test]
    fn no_rule_fired_is_degenerate() {
        let f = fixture();
        // Only the "hot" rule; a cold reading fires nothing.
        let hot = f.rules.get(2).cloned().unwrap();
        let base = RuleBase::new(&f.fan, vec![hot]).unwrap();
        let agg = infer(&base, &inputs_for(&f.temp, 5.0)).unwrap();
        assert!(agg.is_degenerate());
        assert_eq!(agg.fired(), 0);
        assert!(agg.area().abs() < EPS);
    }

    #[test]
    fn missing_input_propagates() {
        let f = fixture();
        let base = RuleBase::new(&f.fan, f.rules).unwrap();
        assert_eq!(
            infer(&base, &Inputs::new()),
            Err(FuzzyError::MissingInput("temp".to_owned()))
        );
    }
}
