//! The [`Predictor`] seam and its fuzzy implementation.
//!
//! The HTTP layer talks only to `dyn Predictor`, so scoring engines can be
//! registered and swapped by name. Every predictor accepts indicators on
//! the engine's native ranges via [`Predictor::predict`]; the provided
//! methods handle the unit-scaled rates that clients send.

use std::sync::Arc;

use scholar_types::{CountryEvaluation, CountryInput, EvaluationDetails, IndicatorRates, Prediction};
use tracing::debug;

use crate::error::CoreError;
use crate::pipeline::ScholarshipPipeline;
use crate::variables::{EDUCATION_MAX, EMPLOYMENT_MAX, POVERTY_MAX};

/// A scoring engine that maps three indicators to a [`Prediction`].
pub trait Predictor: Send + Sync {
    /// Registry name, matched case-insensitively (e.g. `"FIS"`).
    fn name(&self) -> &str;

    /// Score indicators given on the engine ranges: poverty `0..=60`,
    /// education `0..=100`, employment `0..=80`.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError`] if an input is out of range or no output can
    /// be produced.
    fn predict(&self, poverty: f64, education: f64, employment: f64) -> Result<Prediction, CoreError>;

    /// Score unit-scaled rates, each in `[0, 1]`.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidRate`] for a rate outside `[0, 1]`,
    /// otherwise whatever [`predict`](Self::predict) returns.
    fn predict_rates(&self, rates: &IndicatorRates) -> Result<Prediction, CoreError> {
        let poverty = check_rate("povertyRate", rates.poverty_rate)?;
        let education = check_rate("educationLevel", rates.education_level)?;
        let employment = check_rate("employmentRate", rates.employment_rate)?;
        self.predict(
            poverty * POVERTY_MAX,
            education * EDUCATION_MAX,
            employment * EMPLOYMENT_MAX,
        )
    }

    /// Score one country for the batch endpoints.
    ///
    /// # Errors
    ///
    /// Same as [`predict_rates`](Self::predict_rates).
    fn evaluate_country(&self, country: &CountryInput) -> Result<CountryEvaluation, CoreError> {
        let prediction = self.predict_rates(&country.rates())?;
        Ok(CountryEvaluation {
            country: country.display_name().to_owned(),
            score: prediction.eligibility_score,
            scholarship_types: prediction.scholarship_memberships,
            recommended_type: prediction.scholarship_type,
            fallback: prediction.fallback,
            details: EvaluationDetails {
                poverty_rate: country.poverty_rate.to_string(),
                education_level: country.education_level.to_string(),
                employment_rate: country.employment_rate.to_string(),
            },
        })
    }
}

fn check_rate(field: &'static str, value: f64) -> Result<f64, CoreError> {
    if (0.0..=1.0).contains(&value) {
        Ok(value)
    } else {
        Err(CoreError::InvalidRate { field, value })
    }
}

/// Evaluate every country and rank by eligibility, highest first.
///
/// Countries with equal scores keep their submitted order.
///
/// # Errors
///
/// Returns the first [`CoreError`] encountered.
pub fn evaluate_countries(
    predictor: &dyn Predictor,
    countries: &[CountryInput],
) -> Result<Vec<CountryEvaluation>, CoreError> {
    let mut results = countries
        .iter()
        .map(|country| predictor.evaluate_country(country))
        .collect::<Result<Vec<_>, _>>()?;
    results.sort_by(|a, b| b.score.total_cmp(&a.score));
    debug!(
        predictor = predictor.name(),
        countries = results.len(),
        "batch evaluated"
    );
    Ok(results)
}

// ---------------------------------------------------------------------------
// Fuzzy predictor
// ---------------------------------------------------------------------------

/// [`Predictor`] backed by the Mamdani [`ScholarshipPipeline`].
#[derive(Debug, Clone)]
pub struct FuzzyPredictor {
    pipeline: Arc<ScholarshipPipeline>,
}

impl FuzzyPredictor {
    /// Registry name of the fuzzy predictor.
    pub const NAME: &'static str = "FIS";

    /// Wrap a shared pipeline.
    pub const fn new(pipeline: Arc<ScholarshipPipeline>) -> Self {
        Self { pipeline }
    }

    /// The underlying pipeline.
    pub fn pipeline(&self) -> &ScholarshipPipeline {
        &self.pipeline
    }
}

impl Predictor for FuzzyPredictor {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn predict(&self, poverty: f64, education: f64, employment: f64) -> Result<Prediction, CoreError> {
        Ok(self
            .pipeline
            .evaluate(poverty, education, employment)?
            .into_prediction())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use scholar_fuzzy::FuzzyError;
    use scholar_types::ScholarshipType;

    use super::*;
    use crate::config::EngineConfig;

    const EPS: f64 = 1e-4;

    fn fis() -> FuzzyPredictor {
        FuzzyPredictor::new(Arc::new(ScholarshipPipeline::new().unwrap()))
    }

    fn country(name: &str, poverty: f64, education: f64, employment: f64) -> CountryInput {
        CountryInput {
            name: Some(name.to_owned()),
            poverty_rate: poverty,
            education_level: education,
            employment_rate: employment,
        }
    }

    #[test]
    fn rates_are_scaled_to_engine_ranges() {
        let p = fis();
        let direct = p.predict(45.0, 90.0, 70.0).unwrap();
        let scaled = p
            .predict_rates(&IndicatorRates {
                poverty_rate: 0.75,
                education_level: 0.9,
                employment_rate: 0.875,
            })
            .unwrap();
        assert_eq!(direct, scaled);
        assert_eq!(scaled.scholarship_type, Some(ScholarshipType::Research));
    }

    #[test]
    fn rate_outside_unit_interval_is_rejected() {
        let err = fis()
            .predict_rates(&IndicatorRates {
                poverty_rate: 1.2,
                education_level: 0.5,
                employment_rate: 0.5,
            })
            .unwrap_err();
        assert!(matches!(err, CoreError::InvalidRate { field: "povertyRate", .. }));
        assert!(err.is_invalid_input());
    }

    #[test]
    fn degenerate_output_is_reported() {
        let err = fis().predict(0.0, 10.0, 10.0).unwrap_err();
        assert!(err.is_degenerate());
        assert!(matches!(err, CoreError::Fuzzy(FuzzyError::DegenerateOutput(_))));
    }

    #[test]
    fn fallback_country_has_no_recommendation() {
        let pipeline = ScholarshipPipeline::from_config(&EngineConfig {
            degenerate_fallback: Some(0.4),
            ..EngineConfig::default()
        })
        .unwrap();
        let eval = FuzzyPredictor::new(Arc::new(pipeline))
            .evaluate_country(&country("Nauru", 0.0, 0.1, 0.125))
            .unwrap();
        assert!(eval.fallback);
        assert_eq!(eval.recommended_type, None);
        assert!((eval.score - 0.4).abs() < EPS);
        assert!(eval.scholarship_types.values().all(|d| d.abs() < f64::EPSILON));
    }

    #[test]
    fn evaluate_country_echoes_details() {
        let eval = fis().evaluate_country(&country("Chad", 0.5, 0.3, 0.5)).unwrap();
        assert_eq!(eval.country, "Chad");
        assert_eq!(eval.details.poverty_rate, "0.5");
        assert_eq!(eval.details.education_level, "0.3");
        assert_eq!(eval.scholarship_types.len(), 3);
        assert!((0.0..=1.0).contains(&eval.score));
    }

    #[test]
    fn unnamed_country_is_unknown() {
        let mut c = country("x", 0.1, 0.1, 0.125);
        c.name = None;
        assert_eq!(fis().evaluate_country(&c).unwrap().country, "Unknown");
    }

    #[test]
    fn batch_is_sorted_by_score_descending() {
        let countries = vec![
            country("Research", 0.75, 0.9, 0.875),
            country("Vocational", 0.5 / 6.0, 0.1, 0.125),
            country("Academic", 1.0 / 6.0, 0.5, 0.375),
        ];
        let results = evaluate_countries(&fis(), &countries).unwrap();
        assert_eq!(results.len(), 3);
        for pair in results.windows(2) {
            if let [a, b] = pair {
                assert!(a.score >= b.score);
            }
        }
        assert_eq!(results.first().unwrap().country, "Vocational");
        assert_eq!(results.last().unwrap().country, "Research");
    }

    #[test]
    fn ties_keep_submitted_order() {
        let countries = vec![
            country("First", 0.2, 0.5, 0.5),
            country("Second", 0.2, 0.5, 0.5),
        ];
        let results = evaluate_countries(&fis(), &countries).unwrap();
        let names: Vec<&str> = results.iter().map(|r| r.country.as_str()).collect();
        assert_eq!(names, ["First", "Second"]);
    }

    #[test]
    fn empty_batch_is_empty() {
        assert!(evaluate_countries(&fis(), &[]).unwrap().is_empty());
    }

    #[test]
    fn fuzzy_predictor_reports_its_name() {
        let p = fis();
        assert_eq!(p.name(), "FIS");
        assert!((p.predict(5.0, 10.0, 10.0).unwrap().eligibility_score - 0.664_707).abs() < EPS);
    }
}
