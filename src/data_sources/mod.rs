//! Clients for the public, read-only statistics APIs.
//!
//! # Data Sources
//!
//! - [`profile`]: solved counts, submission totals and the submission calendar
//! - [`contest`]: contest attendance, rating, global ranking and percentile
//!
//! Both clients fail with [`CompareError::Fetch`] on a transport error, a
//! non-success status, an empty body, or a body that does not parse.

pub mod contest;
pub mod profile;

pub use contest::ContestClient;
pub use profile::ProfileClient;

use serde::de::DeserializeOwned;
use tracing::debug;

use crate::error::CompareError;

/// Longest slice of an error body carried into a fetch error.
const BODY_PREVIEW_CHARS: usize = 180;

/// GET `url` and decode the JSON body as `T`.
pub(crate) async fn get_json<T: DeserializeOwned>(
    client: &reqwest::Client,
    url: &str,
    source_name: &'static str,
    identifier: &str,
) -> Result<T, CompareError> {
    let fetch_error = |message: String| CompareError::Fetch {
        source_name,
        identifier: identifier.to_string(),
        message,
    };

    let response = client
        .get(url)
        .send()
        .await
        .map_err(|e| fetch_error(e.to_string()))?;
    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(|e| fetch_error(format!("failed reading response body: {e}")))?;

    debug!(source = source_name, %url, %status, bytes = body.len(), "Fetched");

    if !status.is_success() {
        let preview: String = body.chars().take(BODY_PREVIEW_CHARS).collect();
        return Err(fetch_error(format!("{status}: {preview}")));
    }

    let trimmed = body.trim();
    if trimmed.is_empty() || trimmed == "null" {
        return Err(fetch_error("empty response body".to_string()));
    }

    serde_json::from_str(trimmed).map_err(|e| fetch_error(format!("invalid JSON response: {e}")))
}
