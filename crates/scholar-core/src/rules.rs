//! The two rule tables and their compiled rule bases.
//!
//! Both tables list the same 27 antecedent combinations in the same order.
//! Several combinations appear more than once, and some of the repeats
//! conclude differently (`low` poverty, `below_upper` education, `low`
//! employment is asserted to imply both `high` and `medium` eligibility).
//! The tables are kept exactly as written; max-aggregation blends the
//! conflicting conclusions.

use std::sync::Arc;

use scholar_fuzzy::{Conclusion, Expr, FuzzyError, Rule, RuleBase, Variable};
use scholar_types::ScholarshipType as S;

use crate::linguistic::{
    EducationLevel as E, EligibilityLevel as L, EmploymentLevel as M, Linguistic, PovertyLevel as P,
};
use crate::variables::Variables;

/// Poverty, education, employment => eligibility.
pub const ELIGIBILITY_RULES: [(P, E, M, L); 27] = [
    (P::Low, E::BelowUpper, M::Low, L::High),
    (P::Low, E::BelowUpper, M::Medium, L::High),
    (P::Low, E::BelowUpper, M::High, L::Medium),
    (P::Low, E::UpperSecond, M::Low, L::High),
    (P::Low, E::UpperSecond, M::Medium, L::Medium),
    (P::Low, E::UpperSecond, M::High, L::Medium),
    (P::Low, E::Tertiary, M::Low, L::High),
    (P::Low, E::Tertiary, M::Medium, L::Medium),
    (P::Low, E::Tertiary, M::High, L::Medium),
    (P::Medium, E::BelowUpper, M::Low, L::High),
    (P::Medium, E::BelowUpper, M::Medium, L::High),
    (P::Low, E::BelowUpper, M::High, L::Medium),
    (P::Medium, E::UpperSecond, M::Low, L::High),
    (P::Medium, E::UpperSecond, M::Medium, L::Medium),
    (P::Medium, E::UpperSecond, M::High, L::Low),
    (P::Medium, E::Tertiary, M::Low, L::High),
    (P::Medium, E::Tertiary, M::Medium, L::Medium),
    (P::Medium, E::Tertiary, M::High, L::Low),
    (P::Low, E::BelowUpper, M::Low, L::Medium),
    (P::Low, E::BelowUpper, M::Medium, L::Medium),
    (P::Low, E::BelowUpper, M::High, L::Low),
    (P::Low, E::UpperSecond, M::Low, L::Medium),
    (P::Low, E::UpperSecond, M::Medium, L::Medium),
    (P::Low, E::UpperSecond, M::High, L::Low),
    (P::Low, E::Tertiary, M::Low, L::Low),
    (P::Low, E::Tertiary, M::Medium, L::Medium),
    (P::Low, E::Tertiary, M::High, L::Low),
];

/// Poverty, education, employment => scholarship type. The conclusion
/// follows the education term alone.
pub const SCHOLARSHIP_RULES: [(P, E, M, S); 27] = [
    (P::Low, E::BelowUpper, M::Low, S::Vocational),
    (P::Low, E::BelowUpper, M::Medium, S::Vocational),
    (P::Low, E::BelowUpper, M::High, S::Vocational),
    (P::Low, E::UpperSecond, M::Low, S::Academic),
    (P::Low, E::UpperSecond, M::Medium, S::Academic),
    (P::Low, E::UpperSecond, M::High, S::Academic),
    (P::Low, E::Tertiary, M::Low, S::Research),
    (P::Low, E::Tertiary, M::Medium, S::Research),
    (P::Low, E::Tertiary, M::High, S::Research),
    (P::Medium, E::BelowUpper, M::Low, S::Vocational),
    (P::Medium, E::BelowUpper, M::Medium, S::Vocational),
    (P::Low, E::BelowUpper, M::High, S::Vocational),
    (P::Medium, E::UpperSecond, M::Low, S::Academic),
    (P::Medium, E::UpperSecond, M::Medium, S::Academic),
    (P::Medium, E::UpperSecond, M::High, S::Academic),
    (P::Medium, E::Tertiary, M::Low, S::Research),
    (P::Medium, E::Tertiary, M::Medium, S::Research),
    (P::Medium, E::Tertiary, M::High, S::Research),
    (P::Low, E::BelowUpper, M::Low, S::Vocational),
    (P::Low, E::BelowUpper, M::Medium, S::Vocational),
    (P::Low, E::BelowUpper, M::High, S::Vocational),
    (P::Low, E::UpperSecond, M::Low, S::Academic),
    (P::Low, E::UpperSecond, M::Medium, S::Academic),
    (P::Low, E::UpperSecond, M::High, S::Academic),
    (P::Low, E::Tertiary, M::Low, S::Research),
    (P::Low, E::Tertiary, M::Medium, S::Research),
    (P::Low, E::Tertiary, M::High, S::Research),
];

/// Compile [`ELIGIBILITY_RULES`] against `variables`.
///
/// # Errors
///
/// Returns [`FuzzyError`] if a term is not registered on its variable.
pub fn eligibility_rules(variables: &Variables) -> Result<RuleBase, FuzzyError> {
    compile(variables, &variables.eligibility, &ELIGIBILITY_RULES)
}

/// Compile [`SCHOLARSHIP_RULES`] against `variables`.
///
/// # Errors
///
/// Returns [`FuzzyError`] if a term is not registered on its variable.
pub fn scholarship_rules(variables: &Variables) -> Result<RuleBase, FuzzyError> {
    compile(variables, &variables.scholarship, &SCHOLARSHIP_RULES)
}

fn compile<C: Linguistic>(
    variables: &Variables,
    consequent: &Arc<Variable>,
    table: &[(P, E, M, C)],
) -> Result<RuleBase, FuzzyError> {
    let rules = table
        .iter()
        .map(|&(poverty, education, employment, conclusion)| {
            let antecedent = Expr::is(&variables.poverty, poverty.name())?
                & Expr::is(&variables.education, education.name())?
                & Expr::is(&variables.employment, employment.name())?;
            Ok(Rule::new(antecedent, Conclusion::new(consequent, conclusion.name())?))
        })
        .collect::<Result<Vec<_>, FuzzyError>>()?;
    RuleBase::new(consequent, rules)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::BTreeSet;

    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use rand::seq::SliceRandom;
    use scholar_fuzzy::{Defuzzification, Simulation};

    use super::*;

    #[test]
    fn both_tables_compile_in_full() {
        let v = Variables::new().unwrap();
        assert_eq!(eligibility_rules(&v).unwrap().len(), 27);
        assert_eq!(scholarship_rules(&v).unwrap().len(), 27);
    }

    #[test]
    fn duplicates_are_preserved() {
        let distinct: BTreeSet<(&str, &str, &str)> = ELIGIBILITY_RULES
            .iter()
            .map(|&(p, e, m, _)| (p.name(), e.name(), m.name()))
            .collect();
        assert_eq!(distinct.len(), 17);
    }

    #[test]
    fn conflicting_conclusions_are_kept() {
        let conclusions: BTreeSet<&str> = ELIGIBILITY_RULES
            .iter()
            .filter(|&&(p, e, m, _)| p == P::Low && e == E::BelowUpper && m == M::Low)
            .map(|&(_, _, _, c)| c.name())
            .collect();
        assert_eq!(conclusions, BTreeSet::from(["high", "medium"]));
    }

    #[test]
    fn tables_share_antecedents() {
        for (elig, schol) in ELIGIBILITY_RULES.iter().zip(&SCHOLARSHIP_RULES) {
            assert_eq!((elig.0, elig.1, elig.2), (schol.0, schol.1, schol.2));
        }
    }

    #[test]
    fn scholarship_follows_education() {
        for &(_, education, _, kind) in &SCHOLARSHIP_RULES {
            let expected = match education {
                E::BelowUpper => S::Vocational,
                E::UpperSecond => S::Academic,
                E::Tertiary => S::Research,
            };
            assert_eq!(kind, expected);
        }
    }

    #[test]
    fn high_poverty_has_no_rules() {
        assert!(ELIGIBILITY_RULES.iter().all(|&(p, ..)| p != P::High));
    }

    #[test]
    fn antecedents_are_the_three_indicators() {
        let v = Variables::new().unwrap();
        let base = eligibility_rules(&v).unwrap();
        assert_eq!(
            base.antecedents(),
            BTreeSet::from(["education", "employment", "poverty"])
        );
    }

    #[test]
    fn table_order_does_not_change_outputs() {
        let v = Variables::new().unwrap();
        let declared = eligibility_rules(&v).unwrap();
        let mut rng = StdRng::seed_from_u64(11);
        let samples = [(5.0, 10.0, 10.0), (30.0, 40.0, 60.0), (12.0, 70.0, 22.0)];
        for _ in 0..10 {
            let mut table = ELIGIBILITY_RULES;
            table.shuffle(&mut rng);
            let shuffled = compile(&v, &v.eligibility, &table).unwrap();
            for &(p, e, m) in &samples {
                let run = |base: &RuleBase| {
                    let mut sim = Simulation::new(base);
                    sim.input(&v.poverty, p).unwrap();
                    sim.input(&v.education, e).unwrap();
                    sim.input(&v.employment, m).unwrap();
                    sim.compute(Defuzzification::Centroid).unwrap()
                };
                assert_eq!(run(&declared).to_bits(), run(&shuffled).to_bits());
            }
        }
    }
}
