//! Data models for Rivalry.
//!
//! Raw payloads mirror the JSON served by the public profile and contest
//! APIs. Everything derived from them (`ProfileMetrics`, `SubmissionRate`,
//! `ComparisonResult`, `ComparisonReport`) is plain immutable data.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Difficulty bucket of a submission total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Difficulty {
    All,
    Easy,
    Medium,
    Hard,
}

/// One entry of `totalSubmissions`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmissionTotal {
    pub difficulty: Difficulty,

    /// Number of submissions made in this bucket.
    pub submissions: u64,

    /// Number of accepted submissions in this bucket.
    pub count: u64,
}

/// Sparse map from Unix timestamp (seconds, as a string) to submission count.
pub type SubmissionCalendar = BTreeMap<String, u64>;

/// Profile payload as returned by the profile API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawProfile {
    pub ranking: u64,
    pub total_solved: u64,
    pub total_submissions: Vec<SubmissionTotal>,
    pub easy_solved: u64,
    pub medium_solved: u64,
    pub hard_solved: u64,

    /// Accepted either as a JSON object or as a string holding one.
    #[serde(deserialize_with = "deserialize_calendar")]
    pub submission_calendar: SubmissionCalendar,
}

/// Contest payload as returned by the contest API.
///
/// Profiles without contest history omit some or all of the rating fields.
/// They stay `None` all the way to the presentation layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawContest {
    pub contest_attend: u64,

    #[serde(default)]
    pub contest_rating: Option<f64>,

    #[serde(default)]
    pub contest_global_ranking: Option<u64>,

    #[serde(default)]
    pub contest_top_percentage: Option<f64>,
}

/// Canonical per-user statistics derived from a profile and contest payload.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProfileMetrics {
    pub rank: u64,
    pub total_solved: u64,

    /// Accepted / total submissions as a percentage, rounded to 2 decimals.
    pub acceptance_rate: f64,
    pub solved_easy: u64,
    pub solved_medium: u64,
    pub solved_hard: u64,
    pub submission_calendar: SubmissionCalendar,
    pub contest_attend: u64,
    pub contest_rating: Option<f64>,
    pub contest_global_ranking: Option<u64>,
    pub contest_top_percentage: Option<f64>,
}

/// Average daily submissions over the user's active span.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SubmissionRate {
    pub average_submissions: f64,

    /// Whole days between the earliest and latest calendar entry, rounded up.
    pub days_difference: i64,
}

/// The two sides of a comparison. `mine` is never swapped with `competitor`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonResult {
    pub mine: ProfileMetrics,
    pub competitor: ProfileMetrics,
}

/// Everything the presentation layer needs to render one comparison.
#[derive(Debug, Clone, Serialize)]
pub struct ComparisonReport {
    pub mine_identifier: String,
    pub competitor_identifier: String,
    pub result: ComparisonResult,
    pub mine_rate: SubmissionRate,
    pub competitor_rate: SubmissionRate,
    pub advice: String,
    pub generated_at: DateTime<Utc>,
}

/// Form body for POST /compare.
#[derive(Debug, Clone, Deserialize)]
pub struct CompareForm {
    pub my_profile: String,
    pub competitor_profile: String,
}

/// Query parameters for GET /api/compare.
#[derive(Debug, Deserialize)]
pub struct CompareQuery {
    pub mine: String,
    pub competitor: String,
}

/// The two identifiers remembered between visits.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedProfiles {
    pub my_profile: Option<String>,
    pub competitor_profile: Option<String>,
}

fn deserialize_calendar<'de, D>(deserializer: D) -> Result<SubmissionCalendar, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum CalendarRepr {
        Map(SubmissionCalendar),
        Encoded(String),
    }

    match CalendarRepr::deserialize(deserializer)? {
        CalendarRepr::Map(map) => Ok(map),
        CalendarRepr::Encoded(text) => {
            serde_json::from_str(&text).map_err(serde::de::Error::custom)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn profile_json(calendar: serde_json::Value) -> serde_json::Value {
        json!({
            "ranking": 120000,
            "totalSolved": 35,
            "totalSubmissions": [
                { "difficulty": "All", "submissions": 80, "count": 40 },
                { "difficulty": "Easy", "submissions": 30, "count": 20 }
            ],
            "easySolved": 20,
            "mediumSolved": 10,
            "hardSolved": 5,
            "submissionCalendar": calendar
        })
    }

    #[test]
    fn test_profile_calendar_as_object() {
        let raw: RawProfile =
            serde_json::from_value(profile_json(json!({ "1700000000": 3 }))).unwrap();

        assert_eq!(raw.ranking, 120000);
        assert_eq!(raw.total_submissions[0].difficulty, Difficulty::All);
        assert_eq!(raw.submission_calendar.get("1700000000"), Some(&3));
    }

    #[test]
    fn test_profile_calendar_as_encoded_string() {
        let raw: RawProfile = serde_json::from_value(profile_json(json!(
            "{\"1700000000\": 3, \"1700086400\": 1}"
        )))
        .unwrap();

        assert_eq!(raw.submission_calendar.len(), 2);
        assert_eq!(raw.submission_calendar.get("1700086400"), Some(&1));
    }

    #[test]
    fn test_contest_missing_rating_fields() {
        let contest: RawContest = serde_json::from_value(json!({ "contestAttend": 0 })).unwrap();

        assert_eq!(contest.contest_attend, 0);
        assert!(contest.contest_rating.is_none());
        assert!(contest.contest_global_ranking.is_none());
        assert!(contest.contest_top_percentage.is_none());
    }
}
