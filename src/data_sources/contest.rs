//! Contest history API client.
//!
//! The API answers `GET /{username}/contest` with attendance and, for users
//! who have taken part in rated contests, rating, global ranking and top
//! percentage.

use crate::error::CompareError;
use crate::model::RawContest;

use super::get_json;

/// Base URL for the contest API.
const CONTEST_API_BASE: &str = "https://alfa-leetcode-api.onrender.com";

/// Client for the contest history API.
#[derive(Clone)]
pub struct ContestClient {
    client: reqwest::Client,
    base_url: String,
}

impl Default for ContestClient {
    fn default() -> Self {
        Self::new()
    }
}

impl ContestClient {
    pub fn new() -> Self {
        Self::with_base_url(CONTEST_API_BASE)
    }

    /// Create a contest client with a custom base URL (for testing or mirrors).
    pub fn with_base_url(base_url: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Fetch the raw contest summary for `identifier`.
    pub async fn fetch_contest(&self, identifier: &str) -> Result<RawContest, CompareError> {
        let url = self.contest_url(identifier);
        get_json(&self.client, &url, "contest", identifier).await
    }

    fn contest_url(&self, identifier: &str) -> String {
        format!(
            "{}/{}/contest",
            self.base_url,
            urlencoding::encode(identifier)
        )
    }
}
