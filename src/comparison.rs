//! Two-sided comparison and the advice derived from it.
//!
//! [`compare`] and [`advise`] are pure. [`Rivalry`] wires them to the data
//! sources: it fetches both profiles and both contest summaries
//! concurrently, waits for all four, then runs the engine once.

use chrono::{DateTime, Utc};
use tracing::{info, instrument};

use crate::data_sources::{ContestClient, ProfileClient};
use crate::error::CompareError;
use crate::metrics::{average_daily_submissions, normalize};
use crate::model::{ComparisonReport, ComparisonResult, ProfileMetrics};

/// Pair two metrics records. `mine` and `competitor` keep their roles.
pub fn compare(mine: ProfileMetrics, competitor: ProfileMetrics) -> ComparisonResult {
    ComparisonResult { mine, competitor }
}

/// Problem difficulty category used in advice text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolvedCategory {
    Easy,
    Medium,
    Hard,
}

impl SolvedCategory {
    pub fn label(&self) -> &'static str {
        match self {
            SolvedCategory::Easy => "easy",
            SolvedCategory::Medium => "medium",
            SolvedCategory::Hard => "hard",
        }
    }
}

/// Categories where `mine` has solved fewer problems, in easy/medium/hard order.
pub fn less_solved_categories(result: &ComparisonResult) -> Vec<SolvedCategory> {
    let ComparisonResult { mine, competitor } = result;

    [
        (SolvedCategory::Easy, mine.solved_easy, competitor.solved_easy),
        (SolvedCategory::Medium, mine.solved_medium, competitor.solved_medium),
        (SolvedCategory::Hard, mine.solved_hard, competitor.solved_hard),
    ]
    .into_iter()
    .filter(|(_, ours, theirs)| ours < theirs)
    .map(|(category, _, _)| category)
    .collect()
}

/// Recommendation based on solved-category and contest-attendance deltas only.
///
/// Acceptance rate, rank, and contest rating/percentile do not influence it.
pub fn advise(result: &ComparisonResult) -> String {
    let less_solved = less_solved_categories(result);
    let attend_behind = result.mine.contest_attend < result.competitor.contest_attend;

    match (attend_behind, less_solved.is_empty()) {
        (false, true) => "You are good in all aspects.".to_string(),
        (true, true) => "Give more contests.".to_string(),
        (true, false) => format!(
            "Give more contests and focus more on {} problems.",
            join_categories(&less_solved)
        ),
        (false, false) => format!("Focus more on {} problems.", join_categories(&less_solved)),
    }
}

/// "a", "a and b", "a, b, and c".
fn join_categories(categories: &[SolvedCategory]) -> String {
    let labels: Vec<&str> = categories.iter().map(SolvedCategory::label).collect();

    match labels.as_slice() {
        [] => String::new(),
        [only] => only.to_string(),
        [first, second] => format!("{first} and {second}"),
        [init @ .., last] => format!("{}, and {}", init.join(", "), last),
    }
}

/// Fetches both sides and produces a full [`ComparisonReport`].
#[derive(Clone, Default)]
pub struct Rivalry {
    profiles: ProfileClient,
    contests: ContestClient,
}

impl Rivalry {
    pub fn new(profiles: ProfileClient, contests: ContestClient) -> Self {
        Self { profiles, contests }
    }

    /// Compare `mine` against `competitor` as of `now`.
    ///
    /// The four fetches run concurrently; the first failure aborts the rest
    /// and is returned unchanged.
    #[instrument(skip(self, now))]
    pub async fn compare_profiles(
        &self,
        mine: &str,
        competitor: &str,
        now: DateTime<Utc>,
    ) -> Result<ComparisonReport, CompareError> {
        let mine = validate_identifier(mine)?;
        let competitor = validate_identifier(competitor)?;

        let (mine_profile, competitor_profile, mine_contest, competitor_contest) = tokio::try_join!(
            self.profiles.fetch_profile(mine),
            self.profiles.fetch_profile(competitor),
            self.contests.fetch_contest(mine),
            self.contests.fetch_contest(competitor),
        )?;

        let mine_metrics = normalize(&mine_profile, &mine_contest)?;
        let competitor_metrics = normalize(&competitor_profile, &competitor_contest)?;
        let mine_rate = average_daily_submissions(&mine_metrics.submission_calendar, now)?;
        let competitor_rate =
            average_daily_submissions(&competitor_metrics.submission_calendar, now)?;

        let result = compare(mine_metrics, competitor_metrics);
        let advice = advise(&result);

        info!(
            mine = %mine,
            competitor = %competitor,
            advice = %advice,
            "Comparison complete"
        );

        Ok(ComparisonReport {
            mine_identifier: mine.to_string(),
            competitor_identifier: competitor.to_string(),
            result,
            mine_rate,
            competitor_rate,
            advice,
            generated_at: now,
        })
    }
}

fn validate_identifier(identifier: &str) -> Result<&str, CompareError> {
    let trimmed = identifier.trim();
    if trimmed.is_empty() {
        return Err(CompareError::InvalidIdentifier(
            "profile identifier must not be blank".to_string(),
        ));
    }
    Ok(trimmed)
}
