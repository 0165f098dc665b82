//! Error types for the scoring API.
//!
//! [`ApiError`] unifies all failure modes into a single enum that can be
//! converted into an Axum HTTP response via its
//! [`IntoResponse`](axum::response::IntoResponse) implementation.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use scholar_core::CoreError;

/// Errors that can occur in the API layer.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// No predictor is registered under the requested name.
    #[error("Invalid model type: {0}")]
    UnknownModel(String),

    /// The request body could not be parsed.
    #[error("invalid request body: {0}")]
    BadRequest(String),

    /// The request body parsed but failed validation.
    #[error("validation failed: {0}")]
    Validation(#[from] validator::ValidationErrors),

    /// The predictor rejected the input or could not score it.
    #[error(transparent)]
    Core(#[from] CoreError),
}

impl ApiError {
    /// The HTTP status this error maps to.
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::UnknownModel(_) | Self::BadRequest(_) | Self::Validation(_) => {
                StatusCode::BAD_REQUEST
            }
            Self::Core(e) if e.is_invalid_input() => StatusCode::BAD_REQUEST,
            Self::Core(e) if e.is_degenerate() => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Core(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        } else {
            tracing::debug!(error = %self, status = status.as_u16(), "request rejected");
        }

        let body = serde_json::json!({
            "error": self.to_string(),
            "status": status.as_u16(),
        });

        (status, axum::Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use scholar_fuzzy::FuzzyError;

    use super::*;

    #[test]
    fn invalid_input_is_bad_request() {
        assert_eq!(
            ApiError::UnknownModel("ann".to_owned()).status(),
            StatusCode::BAD_REQUEST
        );
        let rate = CoreError::InvalidRate {
            field: "povertyRate",
            value: 2.0,
        };
        assert_eq!(ApiError::Core(rate).status(), StatusCode::BAD_REQUEST);
        let range = CoreError::Fuzzy(FuzzyError::InputOutOfRange {
            variable: "poverty".to_owned(),
            value: 61.0,
            min: 0.0,
            max: 60.0,
        });
        assert_eq!(ApiError::Core(range).status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn degenerate_is_unprocessable() {
        let err = CoreError::Fuzzy(FuzzyError::DegenerateOutput("eligibility".to_owned()));
        assert_eq!(ApiError::Core(err).status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn engine_faults_are_internal() {
        let err = CoreError::Fuzzy(FuzzyError::EmptyRuleBase("eligibility".to_owned()));
        assert_eq!(ApiError::Core(err).status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
