//! Error types for the `scholar-fuzzy` crate.
//!
//! Construction errors ([`FuzzyError::DuplicateTerm`],
//! [`FuzzyError::UnknownTerm`], [`FuzzyError::EmptyRuleBase`], ...) are
//! configuration defects and surface once at startup. Evaluation errors
//! ([`FuzzyError::InputOutOfRange`], [`FuzzyError::MissingInput`],
//! [`FuzzyError::DegenerateOutput`]) depend on the crisp inputs of a
//! single call and are recoverable by the caller.

use crate::variable::Role;

/// Errors that can occur while building or evaluating a fuzzy system.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FuzzyError {
    /// Membership function parameters are non-finite or out of order.
    #[error("invalid {shape} parameters {params:?}: {reason}")]
    InvalidShape {
        /// Shape name (`triangular` or `trapezoidal`).
        shape: &'static str,
        /// The rejected parameters.
        params: Vec<f64>,
        /// Why the parameters were rejected.
        reason: &'static str,
    },

    /// A universe could not be built from the given points or range.
    #[error("invalid universe: {0}")]
    InvalidUniverse(String),

    /// A term name was registered twice on the same variable.
    #[error("term '{term}' is already defined on variable '{variable}'")]
    DuplicateTerm {
        /// The owning variable.
        variable: String,
        /// The duplicated term name.
        term: String,
    },

    /// A term name is not registered on the variable.
    #[error("variable '{variable}' has no term '{term}'")]
    UnknownTerm {
        /// The variable that was searched.
        variable: String,
        /// The missing term name.
        term: String,
    },

    /// A variable has no terms to interpret an output against.
    #[error("variable '{0}' has no terms")]
    NoTerms(String),

    /// A variable was used in a position its role does not allow.
    #[error("variable '{variable}' is {actual:?}, expected {expected:?}")]
    RoleMismatch {
        /// The offending variable.
        variable: String,
        /// The role required at this position.
        expected: Role,
        /// The role the variable was declared with.
        actual: Role,
    },

    /// A rule references an antecedent with no bound crisp value.
    #[error("no input bound for antecedent '{0}'")]
    MissingInput(String),

    /// A crisp input lies outside its variable's universe.
    #[error("input {value} for '{variable}' is outside [{min}, {max}]")]
    InputOutOfRange {
        /// The antecedent the value was bound to.
        variable: String,
        /// The rejected value.
        value: f64,
        /// Lower universe bound.
        min: f64,
        /// Upper universe bound.
        max: f64,
    },

    /// A rule base was built with no rules.
    #[error("rule base for '{0}' contains no rules")]
    EmptyRuleBase(String),

    /// A rule in a rule base draws no conclusion about that base's consequent.
    #[error("rule {index} concludes nothing about consequent '{consequent}'")]
    UnrelatedRule {
        /// Position of the rule in the supplied list.
        index: usize,
        /// The rule base's consequent.
        consequent: String,
    },

    /// Two different antecedent definitions share one name in a rule base.
    #[error("antecedent name '{0}' refers to more than one variable definition")]
    ConflictingAntecedent(String),

    /// No rule fired, so the aggregated set has zero area.
    #[error("no rule fired for consequent '{0}'; output is undefined")]
    DegenerateOutput(String),

    /// A membership array does not match its universe in length.
    #[error("membership array has {actual} samples, universe has {expected}")]
    LengthMismatch {
        /// Number of universe points.
        expected: usize,
        /// Number of membership samples supplied.
        actual: usize,
    },
}
