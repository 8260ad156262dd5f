//! Completion percentage vs. a rough linear expectation.
//!
//! The expectation rises as the end date approaches; it is a heuristic, not a
//! model of the plan's actual task distribution.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::store::TaskRecord;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaceStatus {
    NoTasks,
    Ahead,
    OnTrack,
    Behind,
}

impl PaceStatus {
    pub fn label(&self) -> &'static str {
        match self {
            PaceStatus::NoTasks => "No Tasks",
            PaceStatus::Ahead => "Ahead",
            PaceStatus::OnTrack => "On Track",
            PaceStatus::Behind => "Behind",
        }
    }

    pub fn suggestion(&self) -> &'static str {
        match self {
            PaceStatus::NoTasks => "Create a plan to start.",
            PaceStatus::Ahead => "You are ahead! Use extra time for revision or practice.",
            PaceStatus::OnTrack => "Good pace! Keep going consistently.",
            PaceStatus::Behind => {
                "You are behind. Add 30-45 minutes or one extra study day this week."
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProgressReport {
    /// 0-100, two decimals.
    pub percent: f64,
    pub status: PaceStatus,
}

impl ProgressReport {
    pub fn suggestion(&self) -> &'static str {
        self.status.suggestion()
    }
}

/// Days from `today` until `end`, never negative.
pub fn compute_days_left(end: NaiveDate, today: NaiveDate) -> i64 {
    (end - today).num_days().max(0)
}

pub fn compute_status(total: usize, done: usize, days_left: i64) -> ProgressReport {
    if total == 0 {
        return ProgressReport {
            percent: 0.0,
            status: PaceStatus::NoTasks,
        };
    }

    let percent = round2(done as f64 / total as f64 * 100.0);

    let days_left = days_left.max(0) as f64;
    let expected = 100.0 - days_left * (100.0 / (days_left + 1.0));

    let status = if percent >= expected + 10.0 {
        PaceStatus::Ahead
    } else if percent >= expected {
        PaceStatus::OnTrack
    } else {
        PaceStatus::Behind
    };

    ProgressReport { percent, status }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeekProgress {
    pub week_no: u32,
    pub done: usize,
    pub total: usize,
    pub percent: f64,
}

/// Per-week completion, ascending by week number.
pub fn weekly_progress<'a, I>(tasks: I) -> Vec<WeekProgress>
where
    I: IntoIterator<Item = &'a TaskRecord>,
{
    let mut by_week: BTreeMap<u32, (usize, usize)> = BTreeMap::new();
    for t in tasks {
        let entry = by_week.entry(t.task.week_no).or_default();
        entry.1 += 1;
        if t.task.status.is_done() {
            entry.0 += 1;
        }
    }

    by_week
        .into_iter()
        .map(|(week_no, (done, total))| WeekProgress {
            week_no,
            done,
            total,
            percent: if total == 0 {
                0.0
            } else {
                round2(done as f64 / total as f64 * 100.0)
            },
        })
        .collect()
}

fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}
