// src/errors.rs
// DOCUMENTATION: Custom error types and HTTP responses
// PURPOSE: Centralized error handling for entire application

use actix_web::{error::ResponseError, http::header::ContentType, http::StatusCode, HttpResponse};
use thiserror::Error;

/// Application-specific error types
/// DOCUMENTATION: Every user-visible failure of a search or export request
/// Each variant maps to an HTTP status code and a plain-text message
#[derive(Error, Debug)]
pub enum ReviewsError {
    /// Geocoding returned no usable location for the postal code
    #[error("Invalid zip code. Please try again.")]
    InvalidLocation,

    /// Nearby search returned a non-OK status or no results
    #[error("No businesses found for the given search term and zip code.")]
    NoBusinessesFound,

    /// Every business found had zero usable reviews
    #[error("No reviews found for the businesses in this area.")]
    NoReviewsFound,

    /// Transport-level failure talking to an external service
    #[error("Upstream service unavailable: {0}")]
    UpstreamUnavailable(String),

    /// External service answered with a payload we could not decode
    #[error("Malformed upstream response: {0}")]
    MalformedUpstreamResponse(String),

    #[error("Invalid input: {0}")]
    ValidationError(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Failure inside the service itself, e.g. rendering a page
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Failure of the spreadsheet export adapter
/// DOCUMENTATION: Carries how many rows were appended before the failing one
#[derive(Error, Debug, Clone, PartialEq)]
#[error("{message} ({rows_written} rows written)")]
pub struct ExportError {
    pub rows_written: usize,
    pub message: String,
}

impl ExportError {
    pub fn new(rows_written: usize, message: impl Into<String>) -> Self {
        Self {
            rows_written,
            message: message.into(),
        }
    }
}

/// Convert ReviewsError to HTTP response
/// DOCUMENTATION: The search form expects plain-text error bodies
impl ResponseError for ReviewsError {
    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code())
            .content_type(ContentType::plaintext())
            .body(self.to_string())
    }

    fn status_code(&self) -> StatusCode {
        match self {
            ReviewsError::InvalidLocation => StatusCode::BAD_REQUEST,
            ReviewsError::NoBusinessesFound => StatusCode::NOT_FOUND,
            ReviewsError::NoReviewsFound => StatusCode::NOT_FOUND,
            ReviewsError::UpstreamUnavailable(_) => StatusCode::BAD_GATEWAY,
            ReviewsError::MalformedUpstreamResponse(_) => StatusCode::BAD_GATEWAY,
            ReviewsError::ValidationError(_) => StatusCode::BAD_REQUEST,
            ReviewsError::Configuration(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ReviewsError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}
