//! Rules and rule bases.
//!
//! A [`Rule`] pairs an antecedent [`Expr`] with one or more
//! [`Conclusion`]s. A [`RuleBase`] groups the rules that produce one
//! consequent variable; the inference engine evaluates one rule base at a
//! time.
//!
//! Rule bases may contain several rules with identical antecedents and
//! different conclusions. Max-aggregation blends their implicated sets; no
//! deduplication is attempted.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use crate::error::FuzzyError;
use crate::expr::{Expr, Inputs};
use crate::variable::{Role, TermId, Variable};

/// "Consequent is term", the right-hand side of a rule.
#[derive(Debug, Clone, PartialEq)]
pub struct Conclusion {
    variable: Arc<Variable>,
    term: TermId,
}

impl Conclusion {
    /// Resolve `term` on `variable`, which must be a consequent.
    pub fn new(variable: &Arc<Variable>, term: &str) -> Result<Self, FuzzyError> {
        if variable.role() != Role::Consequent {
            return Err(FuzzyError::RoleMismatch {
                variable: variable.name().to_owned(),
                expected: Role::Consequent,
                actual: variable.role(),
            });
        }
        let term = variable.term_id(term)?;
        Ok(Self {
            variable: Arc::clone(variable),
            term,
        })
    }

    /// The concluded variable.
    pub fn variable(&self) -> &Variable {
        &self.variable
    }

    /// The concluded term.
    pub const fn term(&self) -> TermId {
        self.term
    }
}

/// An antecedent expression mapped to one or more conclusions.
#[derive(Debug, Clone, PartialEq)]
pub struct Rule {
    antecedent: Expr,
    conclusions: Vec<Conclusion>,
}

impl Rule {
    /// Create a rule with a single conclusion.
    pub fn new(antecedent: Expr, conclusion: Conclusion) -> Self {
        Self {
            antecedent,
            conclusions: vec![conclusion],
        }
    }

    /// Add another conclusion drawn from the same antecedent.
    #[must_use]
    pub fn also(mut self, conclusion: Conclusion) -> Self {
        self.conclusions.push(conclusion);
        self
    }

    /// The rule's condition.
    pub const fn antecedent(&self) -> &Expr {
        &self.antecedent
    }

    /// All conclusions, in the order they were added.
    pub fn conclusions(&self) -> &[Conclusion] {
        &self.conclusions
    }

    /// Terms this rule concludes on the named consequent.
    pub fn terms_for<'a>(&'a self, consequent: &'a str) -> impl Iterator<Item = TermId> + 'a {
        self.conclusions
            .iter()
            .filter(move |c| c.variable.name() == consequent)
            .map(|c| c.term)
    }

    /// Degree in `[0, 1]` to which the antecedent holds for `inputs`.
    pub fn firing_strength(&self, inputs: &Inputs) -> Result<f64, FuzzyError> {
        self.antecedent.evaluate(inputs)
    }
}

/// The ordered rules producing one consequent.
#[derive(Debug, Clone, PartialEq)]
pub struct RuleBase {
    consequent: Arc<Variable>,
    rules: Vec<Rule>,
}

impl RuleBase {
    /// Group `rules` under `consequent`.
    ///
    /// Fails if there are no rules, if `consequent` is not an output
    /// variable, if a rule concludes nothing about `consequent`, or if two
    /// different antecedent definitions share a name.
    pub fn new(consequent: &Arc<Variable>, rules: Vec<Rule>) -> Result<Self, FuzzyError> {
        if consequent.role() != Role::Consequent {
            return Err(FuzzyError::RoleMismatch {
                variable: consequent.name().to_owned(),
                expected: Role::Consequent,
                actual: consequent.role(),
            });
        }
        if rules.is_empty() {
            return Err(FuzzyError::EmptyRuleBase(consequent.name().to_owned()));
        }
        if let Some(index) = rules
            .iter()
            .position(|r| r.terms_for(consequent.name()).next().is_none())
        {
            return Err(FuzzyError::UnrelatedRule {
                index,
                consequent: consequent.name().to_owned(),
            });
        }
        let mut seen: BTreeMap<&str, &Variable> = BTreeMap::new();
        for clause in rules.iter().flat_map(|r| r.antecedent.clauses()) {
            let variable = clause.variable();
            match seen.get(variable.name()) {
                Some(&known) if known != variable => {
                    return Err(FuzzyError::ConflictingAntecedent(variable.name().to_owned()));
                }
                Some(_) => {}
                None => {
                    seen.insert(variable.name(), variable);
                }
            }
        }
        Ok(Self {
            consequent: Arc::clone(consequent),
            rules,
        })
    }

    /// The output variable.
    pub fn consequent(&self) -> &Variable {
        &self.consequent
    }

    /// The rules in declaration order.
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Number of rules.
    pub const fn len(&self) -> usize {
        self.rules.len()
    }

    /// Always `false`: construction rejects empty rule bases.
    pub const fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Names of every antecedent read by any rule.
    pub fn antecedents(&self) -> BTreeSet<&str> {
        self.rules
            .iter()
            .flat_map(|r| r.antecedent.variables())
            .collect()
    }
}
