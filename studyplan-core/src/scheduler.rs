//! Plan-to-schedule conversion.
//!
//! Walks every calendar day of the plan range in order, keeps the preferred
//! weekdays, and emits one labeled task per kept day:
//! - week resolution by day offset (`offset / 7 + 1`), independent of skipping
//! - subtopic rotation by the number of tasks already emitted in that week
//! - a trailing revision period, and a learn/practice/revise cycle before it
//!
//! Pure and deterministic: same inputs, same output, no clock reads.

use chrono::{Datelike, Days, NaiveDate};
use tracing::debug;

use crate::generic::is_generic;
use crate::goal::GoalType;
use crate::plan::{default_plan, placeholder_milestone, WeekEntry, WeekIndex};
use crate::schedule_config::SchedulingConfig;
use crate::synth::synthesize;
use crate::task::StudyTask;

/// Length of one step of the active cycle.
pub const CYCLE_LEN: usize = 5;

/// How a scheduled day is labeled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DayKind {
    /// Inside the trailing revision window.
    Revision,
    Learn,
    Practice,
    Revise,
}

/// Classify a day given its offset and how many tasks its week already holds.
pub fn classify(
    day_offset: u32,
    duration_days: u32,
    revision_days: u32,
    prior_in_week: usize,
) -> DayKind {
    // Signed so a duration shorter than the window puts every day in revision.
    if i64::from(day_offset) >= i64::from(duration_days) - i64::from(revision_days) {
        return DayKind::Revision;
    }
    match prior_in_week % CYCLE_LEN {
        0 | 1 => DayKind::Learn,
        2 | 3 => DayKind::Practice,
        _ => DayKind::Revise,
    }
}

/// Title and details for a day of the given kind.
pub fn label(kind: DayKind, goal_type: GoalType, subtopic: &str) -> (String, String) {
    use GoalType::*;

    match kind {
        DayKind::Revision => {
            let title = match goal_type {
                SkillCompletion => "Review & Improve",
                ExamPreparation | Certification => "Revision & Mock Practice",
            };
            let details = match goal_type {
                ExamPreparation => {
                    format!("Revise: {subtopic} + timed PYQs/mock + analyze mistakes.")
                }
                Certification => {
                    format!("Revise: {subtopic} + practice test + review weak areas.")
                }
                SkillCompletion => {
                    format!("Review: {subtopic} + refactor + fix gaps + summarize learnings.")
                }
            };
            (title.to_string(), details)
        }
        DayKind::Learn => {
            let details = match goal_type {
                SkillCompletion => "Learn + follow a guided example.",
                ExamPreparation | Certification => "Learn concepts + make short notes.",
            };
            (format!("Learn: {subtopic}"), details.to_string())
        }
        DayKind::Practice => {
            let details = match goal_type {
                ExamPreparation => "Solve PYQs + practice questions + review errors.",
                Certification => "Do hands-on tasks + scenario questions + review errors.",
                SkillCompletion => "Implement/coding task + test + fix bugs.",
            };
            (format!("Practice: {subtopic}"), details.to_string())
        }
        DayKind::Revise => match goal_type {
            SkillCompletion => (
                format!("Improve: {subtopic}"),
                "Improve solution + clean code + add notes.".to_string(),
            ),
            ExamPreparation | Certification => (
                format!("Revise: {subtopic}"),
                "Quick revision + 10-minute recall test.".to_string(),
            ),
        },
    }
}

/// Milestone and usable subtopics for a week.
///
/// Missing weeks get a placeholder milestone; empty or generic subtopic lists
/// are replaced with the goal-type template.
pub fn resolve_week(
    index: &WeekIndex<'_>,
    week_no: u32,
    goal_type: GoalType,
) -> (String, Vec<String>) {
    let (milestone, subtopics) = match index.get(week_no) {
        Some(w) if !w.milestone.trim().is_empty() => (w.milestone.clone(), w.subtopics.clone()),
        Some(w) => (placeholder_milestone(week_no), w.subtopics.clone()),
        None => (placeholder_milestone(week_no), Vec::new()),
    };

    if subtopics.is_empty() || is_generic(&subtopics) {
        debug!(week_no, milestone = %milestone, "synthesizing subtopics");
        let synthesized = synthesize(&milestone, goal_type);
        return (milestone, synthesized);
    }

    (milestone, subtopics)
}

/// Expand a week plan into dated tasks, ascending by date.
pub fn schedule(plan: &[WeekEntry], config: &SchedulingConfig) -> Vec<StudyTask> {
    let fallback;
    let weeks = if plan.is_empty() {
        fallback = default_plan();
        fallback.as_slice()
    } else {
        plan
    };
    let index = WeekIndex::new(weeks);

    let revision_days = config.revision_days();
    let minutes = config.intensity.minutes();

    let mut tasks = Vec::new();
    let mut current_week = 0u32;
    let mut subtopics: Vec<String> = Vec::new();
    let mut prior_in_week = 0usize;

    for day_offset in 0..config.duration_days {
        let Some(day) = day_at(config.start_date, day_offset) else {
            break;
        };
        if !config.is_preferred(day.weekday()) {
            continue;
        }

        let week_no = day_offset / 7 + 1;
        if week_no != current_week {
            current_week = week_no;
            prior_in_week = 0;
            subtopics = resolve_week(&index, week_no, config.goal_type).1;
        }

        let subtopic = &subtopics[prior_in_week % subtopics.len()];
        let kind = classify(day_offset, config.duration_days, revision_days, prior_in_week);
        let (title, details) = label(kind, config.goal_type, subtopic);

        tasks.push(
            StudyTask::new(day, week_no, title)
                .with_details(details)
                .with_minutes(minutes),
        );
        prior_in_week += 1;
    }

    debug!(
        tasks = tasks.len(),
        duration_days = config.duration_days,
        revision_days,
        "schedule built"
    );
    tasks
}

fn day_at(start: NaiveDate, offset: u32) -> Option<NaiveDate> {
    start.checked_add_days(Days::new(u64::from(offset)))
}
