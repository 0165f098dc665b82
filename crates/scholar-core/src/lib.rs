//! Scholarship eligibility scoring on top of the `scholar-fuzzy` engine.
//!
//! Three country indicators (poverty rate, education level, employment
//! rate) are scored on two axes: how strong the case for funding is, and
//! which kind of scholarship fits best.
//!
//! # Modules
//!
//! - [`linguistic`] -- Closed term enums and the [`Linguistic`] trait.
//! - [`variables`] -- The five fuzzy variables and their shapes.
//! - [`rules`] -- Both 27-entry rule tables.
//! - [`pipeline`] -- [`ScholarshipPipeline`], the two-axis evaluation.
//! - [`predictor`] -- [`Predictor`] trait, [`FuzzyPredictor`], batch ranking.
//! - [`config`] -- Loading `scholar-config.yaml` into typed structs.
//! - [`error`] -- [`CoreError`].
//!
//! [`Linguistic`]: linguistic::Linguistic
//! [`ScholarshipPipeline`]: pipeline::ScholarshipPipeline
//! [`Predictor`]: predictor::Predictor
//! [`FuzzyPredictor`]: predictor::FuzzyPredictor
//! [`CoreError`]: error::CoreError

pub mod config;
pub mod error;
pub mod linguistic;
pub mod pipeline;
pub mod predictor;
pub mod rules;
pub mod variables;

pub use config::{ConfigError, EngineConfig, ScholarConfig};
pub use error::CoreError;
pub use pipeline::{Assessment, ScholarshipPipeline};
pub use predictor::{FuzzyPredictor, Predictor, evaluate_countries};
