//! Error types for a single comparison.
//!
//! Every variant is terminal: a comparison either produces a full report or
//! fails with exactly one of these. Nothing is retried or patched up.

use axum::http::StatusCode;

#[derive(Debug, thiserror::Error)]
pub enum CompareError {
    /// Transport failure, non-success status, or an empty/unparsable body.
    #[error("Failed to fetch {source_name} data for '{identifier}': {message}")]
    Fetch {
        source_name: &'static str,
        identifier: String,
        message: String,
    },

    /// The profile has no "All" entry in `totalSubmissions`.
    #[error("Profile data has no aggregate submission totals")]
    MissingAggregate,

    /// The "All" entry reports zero submissions, so no acceptance rate exists.
    #[error("Profile has no submissions to compute an acceptance rate from")]
    NoSubmissions,

    #[error("Profile has no submission history")]
    EmptyCalendar,

    #[error("Submission calendar has a malformed day key: '{0}'")]
    MalformedCalendar(String),

    #[error("Invalid profile identifier: {0}")]
    InvalidIdentifier(String),

    #[error("Settings store error: {0}")]
    Storage(#[from] sqlx::Error),
}

impl CompareError {
    /// HTTP status used when this error ends a request.
    pub fn status_code(&self) -> StatusCode {
        match self {
            CompareError::Fetch { .. } => StatusCode::BAD_GATEWAY,
            CompareError::MissingAggregate
            | CompareError::NoSubmissions
            | CompareError::EmptyCalendar
            | CompareError::MalformedCalendar(_) => StatusCode::UNPROCESSABLE_ENTITY,
            CompareError::InvalidIdentifier(_) => StatusCode::BAD_REQUEST,
            CompareError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}
