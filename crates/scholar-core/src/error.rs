//! Error types for the `scholar-core` crate.

use scholar_fuzzy::FuzzyError;

use crate::config::ConfigError;

/// Errors that can occur while scoring a country.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// The fuzzy engine rejected the inputs or could not produce an output.
    #[error(transparent)]
    Fuzzy(#[from] FuzzyError),

    /// A unit-scaled indicator is outside `[0, 1]` or not finite.
    #[error("{field} must be within [0, 1], got {value}")]
    InvalidRate {
        /// The wire name of the indicator.
        field: &'static str,
        /// The rejected value.
        value: f64,
    },

    /// Configuration could not be loaded.
    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl CoreError {
    /// Whether the error is a no-rule-fired outcome for valid inputs.
    pub const fn is_degenerate(&self) -> bool {
        matches!(self, Self::Fuzzy(FuzzyError::DegenerateOutput(_)))
    }

    /// Whether the caller supplied bad input, as opposed to an engine fault.
    pub const fn is_invalid_input(&self) -> bool {
        matches!(
            self,
            Self::InvalidRate { .. }
                | Self::Fuzzy(FuzzyError::InputOutOfRange { .. } | FuzzyError::MissingInput(_))
        )
    }
}
