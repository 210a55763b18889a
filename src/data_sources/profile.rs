//! Profile statistics API client.
//!
//! The API answers `GET /{username}` with the user's ranking, solved counts
//! per difficulty, submission totals and a sparse submission calendar.

use crate::error::CompareError;
use crate::model::RawProfile;

use super::get_json;

/// Base URL for the profile API.
const PROFILE_API_BASE: &str = "https://leetcode-api-faisalshohag.vercel.app";

/// Client for the profile statistics API.
#[derive(Clone)]
pub struct ProfileClient {
    client: reqwest::Client,
    base_url: String,
}

impl Default for ProfileClient {
    fn default() -> Self {
        Self::new()
    }
}

impl ProfileClient {
    /// Create a new profile client with default settings.
    pub fn new() -> Self {
        Self::with_base_url(PROFILE_API_BASE)
    }

    /// Create a profile client with a custom base URL (for testing or mirrors).
    pub fn with_base_url(base_url: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Fetch the raw profile for `identifier`.
    pub async fn fetch_profile(&self, identifier: &str) -> Result<RawProfile, CompareError> {
        let url = self.profile_url(identifier);
        get_json(&self.client, &url, "profile", identifier).await
    }

    fn profile_url(&self, identifier: &str) -> String {
        format!("{}/{}", self.base_url, urlencoding::encode(identifier))
    }
}
