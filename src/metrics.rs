//! Per-profile derived metrics.
//!
//! Both functions here are pure: the same payloads (and the same `now`)
//! always yield the same result.

use chrono::{DateTime, Duration, Utc};

use crate::error::CompareError;
use crate::model::{
    Difficulty, ProfileMetrics, RawContest, RawProfile, SubmissionCalendar, SubmissionRate,
    SubmissionTotal,
};

const SECONDS_PER_DAY: u64 = 86_400;

/// Build the canonical metrics record for one user.
///
/// Fails with [`CompareError::MissingAggregate`] when the payload has no
/// "All" submission totals, and with [`CompareError::NoSubmissions`] when
/// that entry reports zero submissions.
pub fn normalize(raw: &RawProfile, contest: &RawContest) -> Result<ProfileMetrics, CompareError> {
    Ok(ProfileMetrics {
        rank: raw.ranking,
        total_solved: raw.total_solved,
        acceptance_rate: acceptance_rate(&raw.total_submissions)?,
        solved_easy: raw.easy_solved,
        solved_medium: raw.medium_solved,
        solved_hard: raw.hard_solved,
        submission_calendar: raw.submission_calendar.clone(),
        contest_attend: contest.contest_attend,
        contest_rating: contest.contest_rating,
        contest_global_ranking: contest.contest_global_ranking,
        contest_top_percentage: contest.contest_top_percentage,
    })
}

/// Percentage of accepted submissions from the "All" entry, 2-decimal rounded.
pub fn acceptance_rate(totals: &[SubmissionTotal]) -> Result<f64, CompareError> {
    let all = totals
        .iter()
        .find(|t| t.difficulty == Difficulty::All)
        .ok_or(CompareError::MissingAggregate)?;

    if all.submissions == 0 {
        return Err(CompareError::NoSubmissions);
    }

    let rate = all.count as f64 / all.submissions as f64 * 100.0;
    Ok(round2(rate))
}

/// Average daily submissions over the trailing window ending at `now`.
///
/// The window length is the span between the earliest and latest calendar
/// entry (in whole days, rounded up), but the window itself always ends at
/// `now`. Entries older than `now - days_difference` are not counted even
/// though they define the span.
///
/// A history confined to a single day has `days_difference == 0`; the
/// average is then that day's total.
pub fn average_daily_submissions(
    calendar: &SubmissionCalendar,
    now: DateTime<Utc>,
) -> Result<SubmissionRate, CompareError> {
    let mut days = calendar
        .iter()
        .map(|(key, count)| parse_day(key).map(|day| (day, *count)))
        .collect::<Result<Vec<_>, _>>()?;

    days.sort_by_key(|(day, _)| *day);

    let (Some((earliest, _)), Some((latest, _))) = (days.first(), days.last()) else {
        return Err(CompareError::EmptyCalendar);
    };

    let span_seconds = (*latest - *earliest).num_seconds().unsigned_abs();
    let days_difference = span_seconds.div_ceil(SECONDS_PER_DAY) as i64;

    // Counts are summed as f64: upstream values are unbounded and a u64 sum can overflow.
    if days_difference == 0 {
        let total: f64 = days.iter().map(|(_, count)| *count as f64).sum();
        return Ok(SubmissionRate {
            average_submissions: total,
            days_difference,
        });
    }

    // A span reaching past chrono's range starts the window at the earliest representable instant.
    let window_start = Duration::try_days(days_difference)
        .and_then(|span| now.checked_sub_signed(span))
        .unwrap_or(DateTime::<Utc>::MIN_UTC);
    let total: f64 = days
        .iter()
        .filter(|(day, _)| *day >= window_start && *day <= now)
        .map(|(_, count)| *count as f64)
        .sum();

    Ok(SubmissionRate {
        average_submissions: total / days_difference as f64,
        days_difference,
    })
}

fn parse_day(key: &str) -> Result<DateTime<Utc>, CompareError> {
    key.trim()
        .parse::<i64>()
        .ok()
        .and_then(|secs| DateTime::from_timestamp(secs, 0))
        .ok_or_else(|| CompareError::MalformedCalendar(key.to_string()))
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    const DAY0: i64 = 1_700_006_400;

    fn day(n: i64) -> i64 {
        DAY0 + n * SECONDS_PER_DAY as i64
    }

    fn at(secs: i64) -> DateTime<Utc> {
        DateTime::from_timestamp(secs, 0).unwrap()
    }

    fn calendar(entries: &[(i64, u64)]) -> SubmissionCalendar {
        entries
            .iter()
            .map(|(ts, count)| (ts.to_string(), *count))
            .collect()
    }

    fn totals(submissions: u64, count: u64) -> Vec<SubmissionTotal> {
        vec![
            SubmissionTotal {
                difficulty: Difficulty::All,
                submissions,
                count,
            },
            SubmissionTotal {
                difficulty: Difficulty::Easy,
                submissions: 10,
                count: 10,
            },
        ]
    }

    fn raw_profile() -> RawProfile {
        RawProfile {
            ranking: 5000,
            total_solved: 60,
            total_submissions: totals(300, 123),
            easy_solved: 30,
            medium_solved: 25,
            hard_solved: 5,
            submission_calendar: calendar(&[(day(0), 2), (day(3), 4)]),
        }
    }

    #[test]
    fn test_acceptance_rate_rounds_to_two_decimals() {
        assert_eq!(acceptance_rate(&totals(300, 123)).unwrap(), 41.0);
        assert_eq!(acceptance_rate(&totals(3, 1)).unwrap(), 33.33);
        assert_eq!(acceptance_rate(&totals(3, 2)).unwrap(), 66.67);
    }

    #[test]
    fn test_acceptance_rate_missing_all_entry() {
        let only_easy = vec![SubmissionTotal {
            difficulty: Difficulty::Easy,
            submissions: 10,
            count: 5,
        }];

        assert!(matches!(
            acceptance_rate(&only_easy),
            Err(CompareError::MissingAggregate)
        ));
    }

    #[test]
    fn test_acceptance_rate_zero_submissions() {
        assert!(matches!(
            acceptance_rate(&totals(0, 0)),
            Err(CompareError::NoSubmissions)
        ));
    }

    #[test]
    fn test_normalize_passes_fields_through() {
        let contest = RawContest {
            contest_attend: 4,
            contest_rating: Some(1534.7),
            contest_global_ranking: None,
            contest_top_percentage: None,
        };

        let metrics = normalize(&raw_profile(), &contest).unwrap();

        assert_eq!(metrics.rank, 5000);
        assert_eq!(metrics.total_solved, 60);
        assert_eq!(metrics.acceptance_rate, 41.0);
        assert_eq!(metrics.solved_easy, 30);
        assert_eq!(metrics.solved_medium, 25);
        assert_eq!(metrics.solved_hard, 5);
        assert_eq!(metrics.submission_calendar, raw_profile().submission_calendar);
        assert_eq!(metrics.contest_attend, 4);
        assert_eq!(metrics.contest_rating, Some(1534.7));
        assert_eq!(metrics.contest_global_ranking, None);
        assert_eq!(metrics.contest_top_percentage, None);
    }

    #[test]
    fn test_normalize_is_deterministic() {
        let contest = RawContest {
            contest_attend: 1,
            contest_rating: None,
            contest_global_ranking: Some(9000),
            contest_top_percentage: Some(12.5),
        };

        let first = normalize(&raw_profile(), &contest).unwrap();
        let second = normalize(&raw_profile(), &contest).unwrap();

        assert_eq!(first, second);
        assert_eq!(
            first.acceptance_rate.to_bits(),
            second.acceptance_rate.to_bits()
        );
    }

    #[test]
    fn test_average_over_full_span() {
        let cal = calendar(&[(day(0), 5), (day(10), 3)]);

        let rate = average_daily_submissions(&cal, at(day(10))).unwrap();

        assert_eq!(rate.days_difference, 10);
        assert!((rate.average_submissions - 0.8).abs() < 1e-9);
    }

    #[test]
    fn test_trailing_window_excludes_old_activity() {
        // Inactive for 5 days: the window is [day 5, day 15], so day 0 drops out.
        let cal = calendar(&[(day(0), 5), (day(10), 3)]);

        let rate = average_daily_submissions(&cal, at(day(15))).unwrap();

        assert_eq!(rate.days_difference, 10);
        assert!((rate.average_submissions - 0.3).abs() < 1e-9);
    }

    #[test]
    fn test_partial_day_span_rounds_up() {
        let cal = calendar(&[(day(0), 2), (day(2) + 3600, 4)]);

        let rate = average_daily_submissions(&cal, at(day(2) + 3600)).unwrap();

        assert_eq!(rate.days_difference, 3);
        assert!((rate.average_submissions - 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_single_day_history_uses_day_total() {
        let cal = calendar(&[(day(0), 7)]);

        let rate = average_daily_submissions(&cal, at(day(30))).unwrap();

        assert_eq!(rate.days_difference, 0);
        assert_eq!(rate.average_submissions, 7.0);
    }

    #[test]
    fn test_span_beyond_date_range_clamps_window() {
        let cal: SubmissionCalendar = [
            ("-8000000000000".to_string(), 1),
            ("8000000000000".to_string(), 1),
        ]
        .into_iter()
        .collect();

        let rate = average_daily_submissions(&cal, at(1_760_000_000)).unwrap();

        // Only the far-past entry lies inside [MIN, now].
        assert_eq!(rate.days_difference, 185_185_186);
        assert!((rate.average_submissions - 1.0 / 185_185_186.0).abs() < 1e-15);
    }

    #[test]
    fn test_huge_counts_do_not_overflow() {
        let cal = calendar(&[(day(0), u64::MAX), (day(1), 1)]);

        let rate = average_daily_submissions(&cal, at(day(1))).unwrap();

        assert_eq!(rate.days_difference, 1);
        assert!(rate.average_submissions.is_finite());
        assert!(rate.average_submissions >= u64::MAX as f64);
    }

    #[test]
    fn test_huge_counts_single_day() {
        let cal = calendar(&[(day(0), u64::MAX)]);

        let rate = average_daily_submissions(&cal, at(day(0))).unwrap();

        assert_eq!(rate.average_submissions, u64::MAX as f64);
    }

    #[test]
    fn test_empty_calendar() {
        let result = average_daily_submissions(&SubmissionCalendar::new(), at(day(0)));

        assert!(matches!(result, Err(CompareError::EmptyCalendar)));
    }

    #[test]
    fn test_malformed_calendar_key() {
        let mut cal = calendar(&[(day(0), 1)]);
        cal.insert("yesterday".to_string(), 2);

        let result = average_daily_submissions(&cal, at(day(1)));

        assert!(matches!(result, Err(CompareError::MalformedCalendar(key)) if key == "yesterday"));
    }
}
