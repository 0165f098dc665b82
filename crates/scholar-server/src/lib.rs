//! HTTP scoring API for the Scholar eligibility engine.
//!
//! An Axum server in front of the registered [`Predictor`]s. Clients send
//! unit-scaled indicator rates and receive predictions or ranked country
//! evaluations as JSON.
//!
//! # Modules
//!
//! - [`handlers`] -- Endpoint handlers and request/response bodies.
//! - [`router`] -- Route table, CORS, request tracing.
//! - [`server`] -- Binding and graceful shutdown.
//! - [`state`] -- [`AppState`], the predictor registry.
//! - [`error`] -- [`ApiError`] and its HTTP mapping.
//!
//! [`Predictor`]: scholar_core::Predictor
//! [`AppState`]: state::AppState
//! [`ApiError`]: error::ApiError

pub mod error;
pub mod handlers;
pub mod router;
pub mod server;
pub mod state;

// Re-export primary types for convenience.
pub use error::ApiError;
pub use router::build_router;
pub use server::{ServerConfig, ServerError, start_server};
pub use state::AppState;
