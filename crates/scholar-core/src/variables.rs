//! The five fuzzy variables of the scholarship system.
//!
//! Three antecedents describe a country (poverty, education, employment);
//! two consequents score it (eligibility, scholarship type). Every term set
//! is driven by its [`Linguistic`] enum, so the registered terms always
//! match the enum exactly.

use std::sync::Arc;

use scholar_fuzzy::{FuzzyError, MembershipFunction, Universe, Variable};
use scholar_types::ScholarshipType;

use crate::linguistic::{EducationLevel, EligibilityLevel, EmploymentLevel, Linguistic, PovertyLevel};

/// Upper bound of the poverty universe.
pub const POVERTY_MAX: f64 = 60.0;
/// Upper bound of the education universe.
pub const EDUCATION_MAX: f64 = 100.0;
/// Upper bound of the employment universe.
pub const EMPLOYMENT_MAX: f64 = 80.0;
/// Upper bound of both output universes.
pub const OUTPUT_MAX: f64 = 100.0;

/// Immutable variable definitions, built once and shared by every call.
#[derive(Debug, Clone)]
pub struct Variables {
    /// Poverty rate, `0..=60`.
    pub poverty: Arc<Variable>,
    /// Education level, `0..=100`.
    pub education: Arc<Variable>,
    /// Employment rate, `0..=80`.
    pub employment: Arc<Variable>,
    /// Eligibility score, `0..=100`.
    pub eligibility: Arc<Variable>,
    /// Scholarship-type axis, `0..=100`.
    pub scholarship: Arc<Variable>,
}

impl Variables {
    /// Build all five variables with their terms.
    ///
    /// # Errors
    ///
    /// Returns [`FuzzyError`] if a universe or shape is malformed.
    pub fn new() -> Result<Self, FuzzyError> {
        Ok(Self {
            poverty: define(
                Variable::antecedent("poverty", integers(POVERTY_MAX)?),
                poverty_shape,
            )?,
            education: define(
                Variable::antecedent("education", integers(EDUCATION_MAX)?),
                education_shape,
            )?,
            employment: define(
                Variable::antecedent("employment", integers(EMPLOYMENT_MAX)?),
                employment_shape,
            )?,
            eligibility: define(
                Variable::consequent("eligibility", integers(OUTPUT_MAX)?),
                eligibility_shape,
            )?,
            scholarship: define(
                Variable::consequent("scholarship_type", integers(OUTPUT_MAX)?),
                scholarship_shape,
            )?,
        })
    }
}

/// Integer sample points `0..=max`.
fn integers(max: f64) -> Result<Universe, FuzzyError> {
    Universe::range(0.0, max, 1.0)
}

/// Register one term per enum variant, in declaration order.
fn define<L: Linguistic>(
    mut variable: Variable,
    shape: fn(L) -> Result<MembershipFunction, FuzzyError>,
) -> Result<Arc<Variable>, FuzzyError> {
    for &term in L::ALL {
        variable.add_term(term.name(), shape(term)?)?;
    }
    Ok(Arc::new(variable))
}

// ---------------------------------------------------------------------------
// Shapes
// ---------------------------------------------------------------------------

fn poverty_shape(level: PovertyLevel) -> Result<MembershipFunction, FuzzyError> {
    match level {
        PovertyLevel::Low => MembershipFunction::triangular(0.0, 5.0, 15.0),
        PovertyLevel::Medium => MembershipFunction::trapezoidal(10.0, 15.0, 40.0, 50.0),
        PovertyLevel::High => MembershipFunction::triangular(40.0, 50.0, 60.0),
    }
}

fn education_shape(level: EducationLevel) -> Result<MembershipFunction, FuzzyError> {
    match level {
        EducationLevel::BelowUpper => MembershipFunction::triangular(0.0, 0.0, 33.0),
        EducationLevel::UpperSecond => MembershipFunction::triangular(25.0, 50.0, 75.0),
        EducationLevel::Tertiary => MembershipFunction::triangular(67.0, 100.0, 100.0),
    }
}

fn employment_shape(level: EmploymentLevel) -> Result<MembershipFunction, FuzzyError> {
    match level {
        EmploymentLevel::Low => MembershipFunction::triangular(0.0, 15.0, 20.0),
        EmploymentLevel::Medium => MembershipFunction::trapezoidal(18.0, 25.0, 45.0, 50.0),
        EmploymentLevel::High => MembershipFunction::triangular(50.0, 65.0, 80.0),
    }
}

fn eligibility_shape(level: EligibilityLevel) -> Result<MembershipFunction, FuzzyError> {
    match level {
        EligibilityLevel::Low => MembershipFunction::triangular(0.0, 0.0, 50.0),
        EligibilityLevel::Medium => MembershipFunction::triangular(25.0, 50.0, 75.0),
        EligibilityLevel::High => MembershipFunction::triangular(50.0, 100.0, 100.0),
    }
}

fn scholarship_shape(kind: ScholarshipType) -> Result<MembershipFunction, FuzzyError> {
    match kind {
        ScholarshipType::Vocational => MembershipFunction::triangular(0.0, 0.0, 50.0),
        ScholarshipType::Academic => MembershipFunction::triangular(25.0, 50.0, 75.0),
        ScholarshipType::Research => MembershipFunction::triangular(50.0, 100.0, 100.0),
    }
}
