//! HTML presentation of a comparison.
//!
//! Turns a [`ComparisonReport`] into table rows and renders the popup page.
//! Differences are signed so that a positive value always means "mine is
//! better": counts and ratings use mine − competitor, rankings and top
//! percentage use competitor − mine.

use askama::Template;

use crate::model::{ComparisonReport, SavedProfiles};

/// Shown wherever a value is unknown.
const NOT_AVAILABLE: &str = "N/A";

/// How a difference reads for the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Better,
    Worse,
    Even,
}

impl Tone {
    /// CSS class used by the page template.
    pub fn as_class(&self) -> &'static str {
        match self {
            Tone::Better => "better",
            Tone::Worse => "worse",
            Tone::Even => "even",
        }
    }
}

impl std::fmt::Display for Tone {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_class())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DifferenceCell {
    pub text: String,
    pub tone: Tone,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TableRow {
    pub label: String,
    pub mine: String,
    pub competitor: String,
    pub difference: DifferenceCell,
}

#[derive(Debug, Clone)]
pub struct ReportView {
    pub rows: Vec<TableRow>,
    pub advice: String,
}

#[derive(Template)]
#[template(path = "page.html")]
pub struct PageTemplate {
    pub my_profile: String,
    pub competitor_profile: String,
    pub report: Option<ReportView>,
    pub error: Option<String>,
}

/// The page with the form prefilled from `saved`.
pub fn form_page(saved: &SavedProfiles) -> PageTemplate {
    page(saved, None, None)
}

/// The page with a finished comparison below the form.
pub fn report_page(saved: &SavedProfiles, report: &ComparisonReport) -> PageTemplate {
    let view = ReportView {
        rows: comparison_rows(report),
        advice: report.advice.clone(),
    };
    page(saved, Some(view), None)
}

/// The page with a single error message below the form.
pub fn error_page(saved: &SavedProfiles, message: &str) -> PageTemplate {
    page(saved, None, Some(message.to_string()))
}

fn page(saved: &SavedProfiles, report: Option<ReportView>, error: Option<String>) -> PageTemplate {
    PageTemplate {
        my_profile: saved.my_profile.clone().unwrap_or_default(),
        competitor_profile: saved.competitor_profile.clone().unwrap_or_default(),
        report,
        error,
    }
}

/// Build every table row for `report`, in display order.
pub fn comparison_rows(report: &ComparisonReport) -> Vec<TableRow> {
    let mine = &report.result.mine;
    let theirs = &report.result.competitor;

    vec![
        row(
            "Rank",
            mine.rank.to_string(),
            theirs.rank.to_string(),
            difference(Some(theirs.rank as f64 - mine.rank as f64), ""),
        ),
        count_row("Total Problems Solved", mine.total_solved, theirs.total_solved),
        row(
            "Acceptance Rate (%)",
            format!("{:.2}", mine.acceptance_rate),
            format!("{:.2}", theirs.acceptance_rate),
            difference(Some(mine.acceptance_rate - theirs.acceptance_rate), ""),
        ),
        count_row("Easy Problems Solved", mine.solved_easy, theirs.solved_easy),
        count_row("Medium Problems Solved", mine.solved_medium, theirs.solved_medium),
        count_row("Hard Problems Solved", mine.solved_hard, theirs.solved_hard),
        row(
            &format!(
                "Average Submissions in Last {} Days",
                report.mine_rate.days_difference
            ),
            format!("{:.2}", report.mine_rate.average_submissions),
            format!("{:.2}", report.competitor_rate.average_submissions),
            difference(
                Some(
                    report.mine_rate.average_submissions
                        - report.competitor_rate.average_submissions,
                ),
                "",
            ),
        ),
        count_row("Contest Attendance", mine.contest_attend, theirs.contest_attend),
        row(
            "Contest Rating",
            optional(mine.contest_rating.map(|r| format!("{r:.2}"))),
            optional(theirs.contest_rating.map(|r| format!("{r:.2}"))),
            difference(delta(mine.contest_rating, theirs.contest_rating), ""),
        ),
        row(
            "Contest Global Ranking",
            optional(mine.contest_global_ranking.map(|r| r.to_string())),
            optional(theirs.contest_global_ranking.map(|r| r.to_string())),
            difference(
                delta(
                    theirs.contest_global_ranking.map(|r| r as f64),
                    mine.contest_global_ranking.map(|r| r as f64),
                ),
                "",
            ),
        ),
        row(
            "Top Percentage",
            optional(mine.contest_top_percentage.map(|p| format!("{p:.2}%"))),
            optional(theirs.contest_top_percentage.map(|p| format!("{p:.2}%"))),
            difference(
                delta(theirs.contest_top_percentage, mine.contest_top_percentage),
                "%",
            ),
        ),
    ]
}

/// Absolute value of `value`, coloured by its sign.
///
/// Whole numbers print without decimals, everything else with two.
pub fn difference(value: Option<f64>, suffix: &str) -> DifferenceCell {
    let Some(value) = value.filter(|v| v.is_finite()) else {
        return DifferenceCell {
            text: NOT_AVAILABLE.to_string(),
            tone: Tone::Even,
        };
    };

    let tone = if value > 0.0 {
        Tone::Better
    } else if value < 0.0 {
        Tone::Worse
    } else {
        Tone::Even
    };

    let magnitude = value.abs();
    let text = if magnitude.fract() == 0.0 {
        format!("{magnitude:.0}{suffix}")
    } else {
        format!("{magnitude:.2}{suffix}")
    };

    DifferenceCell { text, tone }
}

fn row(label: &str, mine: String, competitor: String, difference: DifferenceCell) -> TableRow {
    TableRow {
        label: label.to_string(),
        mine,
        competitor,
        difference,
    }
}

fn count_row(label: &str, mine: u64, competitor: u64) -> TableRow {
    row(
        label,
        mine.to_string(),
        competitor.to_string(),
        difference(Some(mine as f64 - competitor as f64), ""),
    )
}

fn delta(a: Option<f64>, b: Option<f64>) -> Option<f64> {
    Some(a? - b?)
}

fn optional(value: Option<String>) -> String {
    value.unwrap_or_else(|| NOT_AVAILABLE.to_string())
}
