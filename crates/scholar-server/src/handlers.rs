//! REST endpoint handlers for the scoring API.
//!
//! # Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | `GET` | `/health` | Liveness plus the registered models |
//! | `POST` | `/predict/{model}` | Score one indicator triple |
//! | `POST` | `/evaluate/countries` | Rank countries, model named in the body |
//! | `POST` | `/evaluate/{model}/countries` | Rank countries with the given model |
//!
//! Indicator rates on the wire are unit-scaled (`0..=1`). Model names are
//! matched case-insensitively.

use std::collections::BTreeMap;
use std::sync::Arc;

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use chrono::{DateTime, Utc};
use scholar_core::evaluate_countries;
use scholar_types::{CountryEvaluation, CountryInput, IndicatorRates, Prediction};
use serde::{Deserialize, Serialize};
use tracing::info;
use validator::Validate;

use crate::error::ApiError;
use crate::state::AppState;

/// Model used by `/evaluate/countries` when the body names none.
pub const DEFAULT_MODEL: &str = "FIS";

/// NGO identifier echoed when the body carries none.
pub const DEFAULT_NGO_ID: &str = "1";

// ---------------------------------------------------------------------------
// Request and response bodies
// ---------------------------------------------------------------------------

/// Body of `POST /predict/{model}`.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct PredictRequest {
    /// Poverty rate in `[0, 1]`.
    #[validate(range(min = 0.0, max = 1.0))]
    pub poverty_rate: f64,
    /// Education level in `[0, 1]`.
    #[validate(range(min = 0.0, max = 1.0))]
    pub education_level: f64,
    /// Employment rate in `[0, 1]`.
    #[validate(range(min = 0.0, max = 1.0))]
    pub employment_rate: f64,
}

impl PredictRequest {
    const fn rates(&self) -> IndicatorRates {
        IndicatorRates {
            poverty_rate: self.poverty_rate,
            education_level: self.education_level,
            employment_rate: self.employment_rate,
        }
    }
}

/// Response of `POST /predict/{model}`.
#[derive(Debug, Clone, Serialize)]
pub struct PredictResponse {
    /// The predictor's output.
    pub result: Prediction,
    /// Upper-cased model name from the path.
    pub model: String,
    /// When the prediction was made.
    pub timestamp: DateTime<Utc>,
    /// The submitted rates.
    pub input: IndicatorRates,
}

/// Body of the batch evaluation endpoints.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct EvaluateRequest {
    /// Model name; ignored by `/evaluate/{model}/countries`.
    #[serde(default)]
    pub model_type: Option<String>,
    /// Requesting NGO, echoed back unchanged.
    #[serde(default)]
    pub ngo_id: Option<serde_json::Value>,
    /// Countries to score.
    #[serde(default)]
    #[validate(length(min = 1, message = "No countries provided"))]
    pub countries: Vec<CountryInput>,
}

/// Response of the batch evaluation endpoints.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EvaluateResponse {
    /// The requesting NGO.
    pub ngo_id: serde_json::Value,
    /// Upper-cased model name.
    pub model_type: String,
    /// When the ranking was produced.
    pub generated_at: DateTime<Utc>,
    /// Evaluations, highest score first.
    pub results: Vec<CountryEvaluation>,
}

// ---------------------------------------------------------------------------
// GET /health
// ---------------------------------------------------------------------------

/// Report liveness and which models can be used.
pub async fn health(State(state): State<Arc<AppState>>) -> Json<serde_json::Value> {
    let services: BTreeMap<String, &str> = state
        .predictor_names()
        .map(|name| (name.to_ascii_lowercase(), "available"))
        .collect();

    Json(serde_json::json!({
        "status": "ok",
        "timestamp": Utc::now(),
        "startedAt": state.started_at(),
        "services": services,
    }))
}

// ---------------------------------------------------------------------------
// POST /predict/{model}
// ---------------------------------------------------------------------------

/// Score one indicator triple with the named model.
pub async fn predict(
    State(state): State<Arc<AppState>>,
    Path(model): Path<String>,
    payload: Result<Json<PredictRequest>, JsonRejection>,
) -> Result<Json<PredictResponse>, ApiError> {
    let Json(request) = payload.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    request.validate()?;
    let predictor = state
        .predictor(&model)
        .ok_or_else(|| ApiError::UnknownModel(model.clone()))?;

    let input = request.rates();
    let result = predictor.predict_rates(&input)?;
    info!(
        model = predictor.name(),
        eligibility = result.eligibility_score,
        recommended = ?result.scholarship_type,
        fallback = result.fallback,
        "prediction served"
    );

    Ok(Json(PredictResponse {
        result,
        model: model.to_ascii_uppercase(),
        timestamp: Utc::now(),
        input,
    }))
}

// ---------------------------------------------------------------------------
// POST /evaluate/countries, POST /evaluate/{model}/countries
// ---------------------------------------------------------------------------

/// Rank countries with the model named in the body (default `FIS`).
pub async fn evaluate(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<EvaluateRequest>, JsonRejection>,
) -> Result<Json<EvaluateResponse>, ApiError> {
    let Json(request) = payload.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    let model = request
        .model_type
        .clone()
        .unwrap_or_else(|| DEFAULT_MODEL.to_owned());
    rank(&state, &model, request).map(Json)
}

/// Rank countries with the model named in the path.
pub async fn evaluate_with_model(
    State(state): State<Arc<AppState>>,
    Path(model): Path<String>,
    payload: Result<Json<EvaluateRequest>, JsonRejection>,
) -> Result<Json<EvaluateResponse>, ApiError> {
    let Json(request) = payload.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    rank(&state, &model, request).map(Json)
}

fn rank(state: &AppState, model: &str, request: EvaluateRequest) -> Result<EvaluateResponse, ApiError> {
    request.validate()?;
    let predictor = state
        .predictor(model)
        .ok_or_else(|| ApiError::UnknownModel(model.to_owned()))?;

    let results = evaluate_countries(predictor.as_ref(), &request.countries)?;
    info!(
        model = predictor.name(),
        countries = results.len(),
        top = results.first().map_or("", |r| r.country.as_str()),
        "countries ranked"
    );

    Ok(EvaluateResponse {
        ngo_id: request
            .ngo_id
            .unwrap_or_else(|| serde_json::Value::from(DEFAULT_NGO_ID)),
        model_type: model.to_ascii_uppercase(),
        generated_at: Utc::now(),
        results,
    })
}
