//! Request and result records.
//!
//! Field names follow the wire format the dashboard already consumes:
//! request bodies and country evaluations are `camelCase`, the single
//! prediction record is `snake_case`.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::enums::ScholarshipType;

// ---------------------------------------------------------------------------
// Inputs
// ---------------------------------------------------------------------------

/// The three socio-economic indicators, each scaled to `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub struct IndicatorRates {
    /// Share of the population below the poverty line.
    pub poverty_rate: f64,
    /// Education attainment index.
    pub education_level: f64,
    /// Share of the working-age population in employment.
    pub employment_rate: f64,
}

/// A country submitted for batch evaluation.
///
/// Missing indicators default to zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub struct CountryInput {
    /// Country name; reported as `"Unknown"` when absent.
    #[serde(default)]
    pub name: Option<String>,
    /// Poverty rate in `[0, 1]`.
    #[serde(default)]
    pub poverty_rate: f64,
    /// Education level in `[0, 1]`.
    #[serde(default)]
    pub education_level: f64,
    /// Employment rate in `[0, 1]`.
    #[serde(default)]
    pub employment_rate: f64,
}

impl CountryInput {
    /// The indicator triple of this country.
    pub const fn rates(&self) -> IndicatorRates {
        IndicatorRates {
            poverty_rate: self.poverty_rate,
            education_level: self.education_level,
            employment_rate: self.employment_rate,
        }
    }

    /// The country name, or `"Unknown"`.
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("Unknown")
    }
}

// ---------------------------------------------------------------------------
// Results
// ---------------------------------------------------------------------------

/// Output of one predictor call.
///
/// Both scores are normalized to `[0, 1]`. Membership degrees are
/// independent per category and need not sum to one. When `fallback` is
/// set the eligibility score is the configured fallback, the scholarship
/// fields are `null`, and every membership is zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Prediction {
    /// Normalized eligibility score.
    pub eligibility_score: f64,
    /// Normalized position on the scholarship-type axis.
    pub scholarship_score: Option<f64>,
    /// The category with the highest membership degree.
    pub scholarship_type: Option<ScholarshipType>,
    /// Membership degree per category, keyed by readable label.
    pub scholarship_memberships: BTreeMap<String, f64>,
    /// Whether no rule fired and the eligibility score is a fallback.
    #[serde(default)]
    pub fallback: bool,
}

/// Raw indicator values echoed back in a country evaluation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub struct EvaluationDetails {
    /// Poverty rate as submitted.
    pub poverty_rate: String,
    /// Education level as submitted.
    pub education_level: String,
    /// Employment rate as submitted.
    pub employment_rate: String,
}

/// Evaluation of one country, as returned by the batch endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub struct CountryEvaluation {
    /// Country name.
    pub country: String,
    /// Normalized eligibility score; results are ranked by it.
    pub score: f64,
    /// Membership degree per category, keyed by readable label.
    pub scholarship_types: BTreeMap<String, f64>,
    /// The recommended category, absent when no rule fired.
    pub recommended_type: Option<ScholarshipType>,
    /// Whether the score is a configured fallback.
    #[serde(default)]
    pub fallback: bool,
    /// The submitted indicators.
    pub details: EvaluationDetails,
}
