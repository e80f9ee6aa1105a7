//! Average and status calculation
//!
//! One fixed policy: three term grades, one optional makeup grade that
//! replaces the lowest term grade when it is higher, pass threshold 6.0.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Minimum average for a course to count as approved
pub const PASSING_AVERAGE: f64 = 6.0;

/// Course status derived from the grade tuple
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Status {
    /// No grade entered at all
    Pending,
    /// Below passing with the final term not yet recorded
    InProgress,
    /// Below passing with complete data
    Failed,
    /// Average at or above [`PASSING_AVERAGE`]
    Approved,
}

impl Status {
    /// Wire representation (`PENDING`, `IN_PROGRESS`, `FAILED`, `APPROVED`)
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Pending => "PENDING",
            Status::InProgress => "IN_PROGRESS",
            Status::Failed => "FAILED",
            Status::Approved => "APPROVED",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of [`calculate`]
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GradeSummary {
    /// Mean of the three (possibly substituted) terms, rounded to 2 decimals
    pub average: f64,
    pub status: Status,
}

/// Compute average and status for one course
///
/// Never fails: if any input is not a finite number, all four inputs are
/// treated as zero.
///
/// When `makeup > 0` and it exceeds the lowest term grade, the first
/// occurrence of that lowest grade is replaced for the average only.
/// Status is derived from the unrounded mean.
pub fn calculate(term1: f64, term2: f64, term3: f64, makeup: f64) -> GradeSummary {
    let (term1, term2, term3, makeup) = if [term1, term2, term3, makeup]
        .iter()
        .all(|v| v.is_finite())
    {
        (term1, term2, term3, makeup)
    } else {
        (0.0, 0.0, 0.0, 0.0)
    };

    let mut terms = [term1, term2, term3];
    if makeup > 0.0 {
        let lowest = terms.iter().copied().fold(f64::INFINITY, f64::min);
        if makeup > lowest {
            if let Some(idx) = terms.iter().position(|&t| t == lowest) {
                terms[idx] = makeup;
            }
        }
    }

    let average = terms.iter().sum::<f64>() / 3.0;

    let status = if term1 == 0.0 && term2 == 0.0 && term3 == 0.0 && makeup == 0.0 {
        Status::Pending
    } else if average >= PASSING_AVERAGE {
        Status::Approved
    } else if average > 0.0 {
        if term3 == 0.0 && makeup == 0.0 {
            Status::InProgress
        } else {
            Status::Failed
        }
    } else {
        // Only reachable with negative grades
        Status::Pending
    };

    GradeSummary {
        average: round2(average),
        status,
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
