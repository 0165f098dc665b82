//! The evaluation pipeline: two rule bases over one set of inputs.
//!
//! [`ScholarshipPipeline`] owns the variables and both compiled rule bases.
//! It is built once and then only read, so a single instance behind an
//! `Arc` serves every request. Each [`evaluate`](ScholarshipPipeline::evaluate)
//! call binds its own inputs and runs one [`Simulation`] per output axis;
//! the two axes never read each other's result and can run on separate
//! threads.

use std::collections::BTreeMap;

use scholar_fuzzy::{Defuzzification, FuzzyError, Inputs, RuleBase, Simulation, Variable, interpret};
use scholar_types::{Prediction, ScholarshipType};
use tracing::{debug, trace, warn};

use crate::config::EngineConfig;
use crate::rules::{eligibility_rules, scholarship_rules};
use crate::variables::Variables;

/// Result of one pipeline evaluation.
#[derive(Debug, Clone, PartialEq)]
pub struct Assessment {
    /// Eligibility score normalized to `[0, 1]`.
    pub eligibility_score: f64,
    /// Scholarship-axis position normalized to `[0, 1]`; `None` when no
    /// scholarship rule fired.
    pub scholarship_score: Option<f64>,
    /// Category with the highest membership degree; `None` when no
    /// scholarship rule fired.
    pub recommended: Option<ScholarshipType>,
    /// Degree of every category, in declaration order.
    pub distribution: Vec<(ScholarshipType, f64)>,
    /// Whether the configured fallback replaced an undefined eligibility.
    pub fallback: bool,
}

impl Assessment {
    /// Degree of one category.
    pub fn degree(&self, kind: ScholarshipType) -> f64 {
        self.distribution
            .iter()
            .find(|(k, _)| *k == kind)
            .map_or(0.0, |&(_, d)| d)
    }

    /// Convert to the wire record, keying memberships by readable label.
    pub fn into_prediction(self) -> Prediction {
        let scholarship_memberships: BTreeMap<String, f64> = self
            .distribution
            .iter()
            .map(|(kind, degree)| (kind.label().to_owned(), *degree))
            .collect();
        Prediction {
            eligibility_score: self.eligibility_score,
            scholarship_score: self.scholarship_score,
            scholarship_type: self.recommended,
            scholarship_memberships,
            fallback: self.fallback,
        }
    }
}

/// The scholarship scoring system.
#[derive(Debug, Clone)]
pub struct ScholarshipPipeline {
    variables: Variables,
    eligibility: RuleBase,
    scholarship: RuleBase,
    method: Defuzzification,
    parallel_axes: bool,
    degenerate_fallback: Option<f64>,
}

impl ScholarshipPipeline {
    /// Build the pipeline with centroid defuzzification and no fallback.
    ///
    /// # Errors
    ///
    /// Returns [`FuzzyError`] if the variables or rule tables are malformed.
    pub fn new() -> Result<Self, FuzzyError> {
        Self::from_config(&EngineConfig::default())
    }

    /// Build the pipeline with the given engine settings.
    ///
    /// # Errors
    ///
    /// Returns [`FuzzyError`] if the variables or rule tables are malformed.
    pub fn from_config(config: &EngineConfig) -> Result<Self, FuzzyError> {
        let variables = Variables::new()?;
        let eligibility = eligibility_rules(&variables)?;
        let scholarship = scholarship_rules(&variables)?;
        debug!(
            eligibility_rules = eligibility.len(),
            scholarship_rules = scholarship.len(),
            method = config.defuzzification.as_str(),
            parallel_axes = config.parallel_axes,
            "scholarship pipeline built"
        );
        Ok(Self {
            variables,
            eligibility,
            scholarship,
            method: config.defuzzification,
            parallel_axes: config.parallel_axes,
            degenerate_fallback: config.degenerate_fallback,
        })
    }

    /// The variable definitions.
    pub const fn variables(&self) -> &Variables {
        &self.variables
    }

    /// The eligibility rule base.
    pub const fn eligibility_rules(&self) -> &RuleBase {
        &self.eligibility
    }

    /// The scholarship-type rule base.
    pub const fn scholarship_rules(&self) -> &RuleBase {
        &self.scholarship
    }

    /// Score one country from indicators on the engine's own ranges
    /// (poverty `0..=60`, education `0..=100`, employment `0..=80`).
    ///
    /// When no eligibility rule fires and a fallback is configured, the
    /// eligibility score is the fallback and the assessment is flagged. The
    /// scholarship axis never falls back: if none of its rules fire, the
    /// assessment carries no recommendation and every category has degree 0.
    ///
    /// # Errors
    ///
    /// - [`FuzzyError::InputOutOfRange`] if an indicator is outside its range.
    /// - [`FuzzyError::DegenerateOutput`] if no eligibility rule fires and no
    ///   fallback is configured.
    pub fn evaluate(
        &self,
        poverty: f64,
        education: f64,
        employment: f64,
    ) -> Result<Assessment, FuzzyError> {
        let mut inputs = Inputs::new();
        inputs.bind(&self.variables.poverty, poverty)?;
        inputs.bind(&self.variables.education, education)?;
        inputs.bind(&self.variables.employment, employment)?;
        trace!(
            poverty = ?self.variables.poverty.fuzzify(poverty),
            education = ?self.variables.education.fuzzify(education),
            employment = ?self.variables.employment.fuzzify(employment),
            "inputs fuzzified"
        );

        let (eligibility, scholarship) = if self.parallel_axes {
            std::thread::scope(|scope| {
                let handle = scope.spawn(|| self.compute(&self.eligibility, &inputs));
                let scholarship = self.compute(&self.scholarship, &inputs);
                let eligibility = handle
                    .join()
                    .unwrap_or_else(|panic| std::panic::resume_unwind(panic));
                (eligibility, scholarship)
            })
        } else {
            (
                self.compute(&self.eligibility, &inputs),
                self.compute(&self.scholarship, &inputs),
            )
        };
        let (eligibility, fallback) = self.eligibility_or_fallback(eligibility)?;
        let scholarship = match scholarship {
            Ok(value) => Some(value),
            Err(FuzzyError::DegenerateOutput(axis)) if fallback => {
                warn!(%axis, "no rule fired; no category recommended");
                None
            }
            Err(e) => return Err(e),
        };

        let (recommended, distribution): (Option<ScholarshipType>, Vec<_>) = scholarship
            .map(|value| self.categorize(value))
            .transpose()?
            .map_or_else(
                || (None, ScholarshipType::ALL.iter().map(|&kind| (kind, 0.0)).collect()),
                |(kind, distribution)| (Some(kind), distribution),
            );

        let assessment = Assessment {
            eligibility_score: normalize(eligibility, &self.variables.eligibility),
            scholarship_score: scholarship
                .map(|value| normalize(value, &self.variables.scholarship)),
            recommended,
            distribution,
            fallback,
        };
        debug!(
            poverty,
            education,
            employment,
            eligibility = assessment.eligibility_score,
            scholarship = ?assessment.scholarship_score,
            recommended = recommended.map_or("none", ScholarshipType::term_name),
            fallback,
            "country evaluated"
        );
        Ok(assessment)
    }

    fn compute(&self, rule_base: &RuleBase, inputs: &Inputs) -> Result<f64, FuzzyError> {
        Simulation::with_inputs(rule_base, inputs.clone()).compute(self.method)
    }

    /// Map an undefined eligibility onto the configured fallback, if any.
    fn eligibility_or_fallback(
        &self,
        result: Result<f64, FuzzyError>,
    ) -> Result<(f64, bool), FuzzyError> {
        match (result, self.degenerate_fallback) {
            (Ok(value), _) => Ok((value, false)),
            (Err(FuzzyError::DegenerateOutput(axis)), Some(score)) => {
                let universe = self.variables.eligibility.universe();
                let value = score.mul_add(universe.max() - universe.min(), universe.min());
                warn!(%axis, score, "no rule fired; using configured fallback");
                Ok((value, true))
            }
            (Err(e), _) => Err(e),
        }
    }

    /// Read category degrees off the scholarship axis at `value`.
    fn categorize(
        &self,
        value: f64,
    ) -> Result<(ScholarshipType, Vec<(ScholarshipType, f64)>), FuzzyError> {
        let interpretation = interpret(&self.variables.scholarship, value)?;
        let distribution = interpretation
            .degrees()
            .iter()
            .map(|(name, degree)| {
                ScholarshipType::from_term_name(name)
                    .map(|kind| (kind, *degree))
                    .ok_or_else(|| FuzzyError::UnknownTerm {
                        variable: self.variables.scholarship.name().to_owned(),
                        term: name.clone(),
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;
        let recommended = distribution
            .get(interpretation.best_index())
            .map_or(ScholarshipType::Vocational, |&(kind, _)| kind);
        Ok((recommended, distribution))
    }
}

/// Divide by the universe maximum, clamped to `[0, 1]`.
fn normalize(value: f64, variable: &Variable) -> f64 {
    let max = variable.universe().max();
    if max > 0.0 {
        (value / max).clamp(0.0, 1.0)
    } else {
        0.0
    }
}
