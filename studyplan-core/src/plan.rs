//! Week plan: the abstract, possibly sparse input to the scheduler.
//!
//! Produced upstream (LLM-backed or static fallback generator); read-only here.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One week of an abstract plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeekEntry {
    pub week_no: u32,
    #[serde(default)]
    pub milestone: String,
    #[serde(default)]
    pub subtopics: Vec<String>,
}

impl WeekEntry {
    pub fn new(week_no: u32, milestone: impl Into<String>, subtopics: Vec<String>) -> Self {
        Self {
            week_no,
            milestone: milestone.into(),
            subtopics,
        }
    }
}

/// Single-week stand-in used when the upstream plan is empty.
pub fn default_plan() -> Vec<WeekEntry> {
    vec![WeekEntry::new(
        1,
        "Foundations",
        ["Basics", "Core concepts", "Practice", "Revision"]
            .iter()
            .map(|s| s.to_string())
            .collect(),
    )]
}

/// Lookup of week entries by number. The first entry for a week wins.
#[derive(Debug, Clone)]
pub struct WeekIndex<'a> {
    by_week: HashMap<u32, &'a WeekEntry>,
}

impl<'a> WeekIndex<'a> {
    pub fn new(weeks: &'a [WeekEntry]) -> Self {
        let mut by_week = HashMap::new();
        for w in weeks {
            by_week.entry(w.week_no).or_insert(w);
        }
        Self { by_week }
    }

    pub fn get(&self, week_no: u32) -> Option<&'a WeekEntry> {
        self.by_week.get(&week_no).copied()
    }
}

/// Milestone label for a week with no usable entry.
pub fn placeholder_milestone(week_no: u32) -> String {
    format!("Week {week_no} milestone")
}
