//! Shared type definitions for the Scholar scoring engine.
//!
//! These records cross the boundary between the scoring core and the HTTP
//! service. They flow downstream to `TypeScript` via `ts-rs` for the
//! dashboard.
//!
//! # Modules
//!
//! - [`enums`] -- [`ScholarshipType`] and its readable labels
//! - [`structs`] -- Indicator inputs, predictions, and country evaluations

pub mod enums;
pub mod structs;

// Re-export all public types at crate root for convenience.
pub use enums::ScholarshipType;
pub use structs::{CountryEvaluation, CountryInput, EvaluationDetails, IndicatorRates, Prediction};

#[cfg(test)]
mod tests {
    //! `TypeScript` binding generation.

    #[test]
    fn export_bindings() {
        // Writes the files to `bindings/` relative to the crate root.
        use ts_rs::TS;

        let _ = crate::enums::ScholarshipType::export_all();
        let _ = crate::structs::IndicatorRates::export_all();
        let _ = crate::structs::CountryInput::export_all();
        let _ = crate::structs::Prediction::export_all();
        let _ = crate::structs::EvaluationDetails::export_all();
        let _ = crate::structs::CountryEvaluation::export_all();
    }
}
