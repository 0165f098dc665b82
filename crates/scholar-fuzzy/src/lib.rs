//! Mamdani fuzzy inference engine.
//!
//! This crate is domain-free: it knows about membership functions, fuzzy
//! variables, rules, and how to turn crisp inputs into a crisp output. The
//! scholarship domain in `scholar-core` is built entirely on top of it.
//!
//! # Pipeline
//!
//! ```text
//! crisp inputs --> firing strengths --> clipped term sets --> max aggregate --> defuzzify
//! ```
//!
//! # Modules
//!
//! - [`membership`] -- Triangular and trapezoidal membership functions.
//! - [`universe`] -- Discretized domains and linear interpolation.
//! - [`variable`] -- [`Variable`]s with named, tabulated [`Term`]s.
//! - [`expr`] -- Antecedent expression trees and input bindings.
//! - [`rule`] -- [`Rule`]s and per-consequent [`RuleBase`]s.
//! - [`inference`] -- Min-implication, max-aggregation.
//! - [`defuzz`] -- Centroid and the other defuzzification methods.
//! - [`interpret`] -- Reading a crisp output back as term degrees.
//! - [`simulation`] -- One evaluation of one rule base.
//! - [`error`] -- [`FuzzyError`].
//!
//! Everything built here is immutable after construction and `Send + Sync`,
//! so a rule base can be shared behind an `Arc` by concurrent callers.

pub mod defuzz;
pub mod error;
pub mod expr;
pub mod inference;
pub mod interpret;
pub mod membership;
pub mod rule;
pub mod simulation;
pub mod universe;
pub mod variable;

// Re-export primary types at crate root.
pub use defuzz::{Defuzzification, centroid};
pub use error::FuzzyError;
pub use expr::{Clause, Expr, Inputs};
pub use inference::{Aggregate, infer};
pub use interpret::{Interpretation, interpret};
pub use membership::MembershipFunction;
pub use rule::{Conclusion, Rule, RuleBase};
pub use simulation::Simulation;
pub use universe::Universe;
pub use variable::{Role, Term, TermId, Variable};
