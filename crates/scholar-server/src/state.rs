//! Shared application state for the scoring API.
//!
//! [`AppState`] holds the registry of scoring engines. It is built once at
//! startup and only read afterwards, so handlers share it without locking.

use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use scholar_core::Predictor;

/// Registered predictors plus process metadata.
pub struct AppState {
    predictors: Vec<Arc<dyn Predictor>>,
    started_at: DateTime<Utc>,
}

impl AppState {
    /// Create a state with no predictors registered.
    pub fn new() -> Self {
        Self {
            predictors: Vec::new(),
            started_at: Utc::now(),
        }
    }

    /// Register a predictor, replacing any with the same name.
    pub fn register(&mut self, predictor: Arc<dyn Predictor>) {
        self.predictors
            .retain(|p| !p.name().eq_ignore_ascii_case(predictor.name()));
        self.predictors.push(predictor);
    }

    /// Builder form of [`register`](Self::register).
    #[must_use]
    pub fn with_predictor(mut self, predictor: Arc<dyn Predictor>) -> Self {
        self.register(predictor);
        self
    }

    /// Look up a predictor by name, ignoring ASCII case.
    pub fn predictor(&self, name: &str) -> Option<Arc<dyn Predictor>> {
        self.predictors
            .iter()
            .find(|p| p.name().eq_ignore_ascii_case(name))
            .cloned()
    }

    /// Registered predictor names in registration order.
    pub fn predictor_names(&self) -> impl Iterator<Item = &str> {
        self.predictors.iter().map(|p| p.name())
    }

    /// When the state was created.
    pub const fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for AppState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppState")
            .field("predictors", &self.predictor_names().collect::<Vec<_>>())
            .field("started_at", &self.started_at)
            .finish()
    }
}
