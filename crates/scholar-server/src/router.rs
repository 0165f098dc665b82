//! Axum router construction for the scoring API.

use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;

/// Build the complete Axum router.
///
/// The router includes:
/// - `GET /health` -- liveness and available models
/// - `POST /predict/{model}` -- single prediction
/// - `POST /evaluate/countries` -- batch ranking, model from the body
/// - `POST /evaluate/{model}/countries` -- batch ranking, model from the path
///
/// CORS allows any origin so the dashboard can call the API directly.
pub fn build_router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(handlers::health))
        .route("/predict/{model}", post(handlers::predict))
        .route("/evaluate/countries", post(handlers::evaluate))
        .route("/evaluate/{model}/countries", post(handlers::evaluate_with_model))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
