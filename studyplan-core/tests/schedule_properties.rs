use chrono::{Datelike, NaiveDate, Weekday};
use std::collections::HashSet;
use studyplan_core::{revision_days, schedule, GoalType, Intensity, SchedulingConfig, WeekEntry};

fn start() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
}

fn config(duration: i64, days: &[Weekday], goal_type: GoalType) -> SchedulingConfig {
    SchedulingConfig::new(
        start(),
        duration,
        days.iter().copied().collect::<HashSet<_>>(),
        Intensity::Light,
        goal_type,
    )
    .unwrap()
}

fn sample_plan() -> Vec<WeekEntry> {
    vec![
        WeekEntry::new(
            2,
            "Medieval India",
            vec![
                "Delhi Sultanate".into(),
                "Mughal administration".into(),
                "Bhakti movement".into(),
            ],
        ),
        WeekEntry::new(
            1,
            "Ancient India",
            vec!["Fundamentals".into(), "Overview".into(), "FAQs".into()],
        ),
    ]
}

fn offset(d: NaiveDate) -> i64 {
    (d - start()).num_days()
}

fn weekday_sets() -> Vec<Vec<Weekday>> {
    vec![
        vec![],
        vec![Weekday::Mon, Weekday::Wed, Weekday::Fri],
        vec![Weekday::Sat, Weekday::Sun],
        vec![Weekday::Thu],
    ]
}

/// Task count equals the number of eligible calendar days.
#[test]
fn test_count_matches_eligible_days() {
    for duration in [1, 7, 10, 30, 61, 365] {
        for days in weekday_sets() {
            let cfg = config(duration, &days, GoalType::ExamPreparation);
            let tasks = schedule(&sample_plan(), &cfg);

            let expected = (0..duration)
                .map(|o| start() + chrono::Duration::days(o))
                .filter(|d| days.is_empty() || days.contains(&d.weekday()))
                .count();
            assert_eq!(tasks.len(), expected, "duration={duration} days={days:?}");
        }
    }
}

#[test]
fn test_dates_strictly_ascending_and_in_range() {
    let cfg = config(90, &[Weekday::Tue, Weekday::Sat], GoalType::Certification);
    let tasks = schedule(&sample_plan(), &cfg);

    for w in tasks.windows(2) {
        assert!(w[0].task_date < w[1].task_date);
    }
    assert!(tasks.iter().all(|t| t.task_date >= start() && t.task_date < cfg.end_date()));
}

#[test]
fn test_week_no_depends_only_on_offset() {
    for days in weekday_sets() {
        let cfg = config(45, &days, GoalType::SkillCompletion);
        for t in schedule(&[], &cfg) {
            assert_eq!(i64::from(t.week_no), offset(t.task_date) / 7 + 1);
        }
    }
}

#[test]
fn test_revision_monotonic() {
    let cfg = config(120, &[Weekday::Mon, Weekday::Thu], GoalType::ExamPreparation);
    let tasks = schedule(&sample_plan(), &cfg);

    let flags: Vec<bool> = tasks
        .iter()
        .map(|t| t.title == "Revision & Mock Practice")
        .collect();
    let first = flags.iter().position(|f| *f).unwrap();
    assert!(flags[first..].iter().all(|f| *f));
    assert!(flags[..first].iter().all(|f| !*f));
}

#[test]
fn test_deterministic() {
    let cfg = config(60, &[Weekday::Mon, Weekday::Wed], GoalType::Certification);
    let a = schedule(&sample_plan(), &cfg);
    let b = schedule(&sample_plan(), &cfg);
    assert_eq!(a, b);
}

#[test]
fn test_generic_replaced_specific_preserved() {
    let cfg = config(14, &[], GoalType::ExamPreparation);
    let tasks = schedule(&sample_plan(), &cfg);

    let week1: Vec<_> = tasks.iter().filter(|t| t.week_no == 1).collect();
    assert_eq!(week1[0].title, "Learn: Ancient India - Key concepts & notes");
    assert_eq!(week1[4].title, "Revise: Ancient India - Revision & recall");

    let week2: Vec<_> = tasks.iter().filter(|t| t.week_no == 2).collect();
    assert_eq!(week2[0].title, "Learn: Delhi Sultanate");
    assert_eq!(week2[1].title, "Learn: Mughal administration");
    assert_eq!(week2[2].title, "Practice: Bhakti movement");
}

#[test]
fn test_thirty_day_revision_tail() {
    let cfg = config(30, &[], GoalType::SkillCompletion);
    assert_eq!(revision_days(30), 3);

    let tasks = schedule(&sample_plan(), &cfg);
    assert_eq!(tasks.len(), 30);
    for t in &tasks {
        let in_tail = offset(t.task_date) >= 27;
        assert_eq!(t.title == "Review & Improve", in_tail, "{:?}", t.task_date);
    }
}

#[test]
fn test_revision_tail_respects_weekday_filter() {
    // 2024-01-28 (Sun) .. 2024-01-30 (Tue) form the tail; only Mon 01-29 is kept.
    let cfg = config(30, &[Weekday::Mon], GoalType::ExamPreparation);
    let tasks = schedule(&[], &cfg);
    let last = tasks.last().unwrap();
    assert_eq!(last.task_date, NaiveDate::from_ymd_opt(2024, 1, 29).unwrap());
    assert_eq!(last.title, "Revision & Mock Practice");
    assert!(tasks[..tasks.len() - 1]
        .iter()
        .all(|t| t.title != "Revision & Mock Practice"));
}

#[test]
fn test_single_day_plan_is_revision() {
    let cfg = config(1, &[], GoalType::Certification);
    let tasks = schedule(&[], &cfg);
    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0].title, "Revision & Mock Practice");
    assert_eq!(tasks[0].details, "Revise: Basics + practice test + review weak areas.");
    assert_eq!(tasks[0].estimated_minutes, 55);
}
