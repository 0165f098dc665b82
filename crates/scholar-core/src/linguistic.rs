//! Closed term sets for the five scholarship variables.
//!
//! Every variable's terms are an enum rather than free-form strings, so a
//! rule table that names a term the variable does not have fails to
//! compile. The [`Linguistic`] trait links each enum to the term names
//! registered on the fuzzy variable.

use scholar_types::ScholarshipType;

/// A closed set of linguistic terms for one variable.
pub trait Linguistic: Copy + 'static {
    /// Every term, in declaration order.
    const ALL: &'static [Self];

    /// The term name registered on the fuzzy variable.
    fn name(self) -> &'static str;
}

/// Share of the population below the poverty line (`0..=60`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PovertyLevel {
    /// Around 5%.
    Low,
    /// 15% to 40%.
    Medium,
    /// Around 50%.
    High,
}

impl Linguistic for PovertyLevel {
    const ALL: &'static [Self] = &[Self::Low, Self::Medium, Self::High];

    fn name(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

/// Education attainment index (`0..=100`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EducationLevel {
    /// Below upper secondary.
    BelowUpper,
    /// Upper secondary.
    UpperSecond,
    /// Tertiary.
    Tertiary,
}

impl Linguistic for EducationLevel {
    const ALL: &'static [Self] = &[Self::BelowUpper, Self::UpperSecond, Self::Tertiary];

    fn name(self) -> &'static str {
        match self {
            Self::BelowUpper => "below_upper",
            Self::UpperSecond => "upper_second",
            Self::Tertiary => "tertiary",
        }
    }
}

/// Employment rate (`0..=80`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EmploymentLevel {
    /// Around 15%.
    Low,
    /// 25% to 45%.
    Medium,
    /// Around 65%.
    High,
}

impl Linguistic for EmploymentLevel {
    const ALL: &'static [Self] = &[Self::Low, Self::Medium, Self::High];

    fn name(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

/// Scholarship eligibility (`0..=100`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EligibilityLevel {
    /// Weak case for funding.
    Low,
    /// Moderate case.
    Medium,
    /// Strong case.
    High,
}

impl Linguistic for EligibilityLevel {
    const ALL: &'static [Self] = &[Self::Low, Self::Medium, Self::High];

    fn name(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

impl Linguistic for ScholarshipType {
    const ALL: &'static [Self] = &Self::ALL;

    fn name(self) -> &'static str {
        self.term_name()
    }
}
