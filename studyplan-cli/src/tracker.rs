use anyhow::{bail, Result};
use chrono::{NaiveDate, Utc};
use clap::ValueEnum;
use studyplan_core::{
    compute_days_left, compute_status, weekly_progress, PlanStore, TaskRecord, TaskStatus,
};
use tracing::info;

use crate::config::Config;
use crate::state::{load_store, resolve_plan_id, save_store, store_path};

const SHORT_ID: usize = 8;
const BAR_WIDTH: usize = 20;

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ShowBy {
    #[default]
    Week,
    Date,
}

fn short_id(id: &str) -> &str {
    id.get(..SHORT_ID).unwrap_or(id)
}

fn checkbox(t: &TaskRecord) -> &'static str {
    if t.task.status.is_done() { "[x]" } else { "[ ]" }
}

fn task_line(t: &TaskRecord) -> String {
    format!(
        "{} {} {} (~{} mins)",
        checkbox(t),
        short_id(&t.task_id),
        t.task.title,
        t.task.estimated_minutes
    )
}

/// `##########----------` for a 0-100 percentage.
pub fn progress_bar(percent: f64) -> String {
    let filled = ((percent.clamp(0.0, 100.0) / 100.0) * BAR_WIDTH as f64).round() as usize;
    format!("{}{}", "#".repeat(filled), "-".repeat(BAR_WIDTH - filled))
}

pub fn render_day(store: &PlanStore, plan_id: &str, date: NaiveDate) -> String {
    let rows = store.tasks_by_date(plan_id, date);
    if rows.is_empty() {
        return format!("No tasks for {date}.\n");
    }

    let mut out = format!("# Tasks for {date}\n\n");
    for t in rows {
        out.push_str(&format!("{} | Week {}\n", task_line(t), t.task.week_no));
        if !t.task.details.is_empty() {
            out.push_str(&format!("      {}\n", t.task.details));
        }
    }
    out
}

pub fn render_plan(
    store: &PlanStore,
    plan_id: &str,
    by: ShowBy,
    hide_done: bool,
) -> Result<String> {
    let plan = store.plan(plan_id)?;
    let rows: Vec<&TaskRecord> = store
        .all_tasks(plan_id)
        .into_iter()
        .filter(|t| !(hide_done && t.task.status.is_done()))
        .collect();

    let mut out = format!(
        "# {}\n{} to {} | {} | {}\n",
        plan.plan.goal,
        plan.plan.start_date,
        plan.plan.end_date,
        plan.plan.intensity,
        plan.plan.preferred_days
    );
    if rows.is_empty() {
        out.push_str("\nNothing to show.\n");
        return Ok(out);
    }

    let mut current: Option<String> = None;
    for t in rows {
        let (header, line) = match by {
            ShowBy::Week => (
                format!("Week {}", t.task.week_no),
                format!("{} | {}", t.task.task_date, task_line(t)),
            ),
            ShowBy::Date => (t.task.task_date.to_string(), task_line(t)),
        };
        if current.as_deref() != Some(header.as_str()) {
            out.push_str(&format!("\n## {header}\n"));
            current = Some(header);
        }
        out.push_str(&format!("- {line}\n"));
    }
    Ok(out)
}

pub fn render_dashboard(store: &PlanStore, plan_id: &str, today: NaiveDate) -> Result<String> {
    let plan = store.plan(plan_id)?;
    let tasks = store.all_tasks(plan_id);
    let (total, done) = store.progress_counts(plan_id);

    let last_day = tasks
        .last()
        .map(|t| t.task.task_date)
        .unwrap_or(plan.plan.end_date);
    let days_left = compute_days_left(last_day, today);
    let report = compute_status(total, done, days_left);

    let mut out = format!("# Dashboard: {}\n\n", plan.plan.goal);
    out.push_str(&format!("Completed: {done}/{total}\n"));
    out.push_str(&format!("Progress:  {:.2}%\n", report.percent));
    out.push_str(&format!("Days left: {days_left}\n"));
    out.push_str(&format!("Status:    {}\n", report.status.label()));
    out.push_str(&format!("\n{}\n", report.suggestion()));

    let weeks = weekly_progress(tasks);
    if !weeks.is_empty() {
        out.push_str("\n## Weekly progress\n\n");
        for w in weeks {
            out.push_str(&format!(
                "Week {:>2} [{}] {}/{} ({:.0}%)\n",
                w.week_no,
                progress_bar(w.percent),
                w.done,
                w.total,
                w.percent
            ));
        }
    }
    Ok(out)
}

/// Set a task's status by full id or unique prefix; returns the full id.
pub fn set_status(store: &mut PlanStore, task: &str, status: TaskStatus) -> Result<String> {
    let task_id = store.resolve_task_id(task)?;
    store.update_task_status(&task_id, status, Utc::now())?;
    info!(task_id = %task_id, status = %status, "task status updated");
    Ok(task_id)
}

pub fn run_tasks(cfg: &Config, plan: Option<&str>, date: Option<NaiveDate>) -> Result<()> {
    let store = load_store(&store_path()?)?;
    let plan_id = resolve_plan_id(&store, plan)?;
    let date = match date {
        Some(d) => d,
        None => cfg.profile.today()?,
    };
    print!("{}", render_day(&store, &plan_id, date));
    Ok(())
}

pub fn run_set_status(task: &str, status: TaskStatus) -> Result<()> {
    let path = store_path()?;
    let mut store = load_store(&path)?;
    let task_id = set_status(&mut store, task, status)?;
    save_store(&path, &store)?;
    println!("{} -> {}", short_id(&task_id), status);
    Ok(())
}

pub fn run_show(plan: Option<&str>, by: ShowBy, hide_done: bool) -> Result<()> {
    let store = load_store(&store_path()?)?;
    let plan_id = resolve_plan_id(&store, plan)?;
    print!("{}", render_plan(&store, &plan_id, by, hide_done)?);
    Ok(())
}

pub fn run_dashboard(cfg: &Config, plan: Option<&str>) -> Result<()> {
    let store = load_store(&store_path()?)?;
    let plan_id = resolve_plan_id(&store, plan)?;
    print!("{}", render_dashboard(&store, &plan_id, cfg.profile.today()?)?);
    Ok(())
}

pub fn run_reset(yes: bool) -> Result<()> {
    if !yes {
        bail!("This deletes every plan and task. Re-run with --yes to confirm.");
    }
    let path = store_path()?;
    let mut store = load_store(&path)?;
    store.reset();
    save_store(&path, &store)?;
    println!("All plans cleared.");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use studyplan_core::{NewPlan, StudyTask};

    fn d(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, day).unwrap()
    }

    fn seeded() -> (PlanStore, String, Vec<String>) {
        let mut store = PlanStore::new();
        let plan_id = store.create_plan(
            NewPlan {
                goal: "SQL (Skill/topic completion)".to_string(),
                start_date: d(1),
                end_date: d(15),
                duration_days: 14,
                hours_per_week: 5.0,
                preferred_days: "Mon,Wed,Fri".to_string(),
                intensity: "moderate".to_string(),
                learning_pref: "practice".to_string(),
            },
            Utc.with_ymd_and_hms(2024, 1, 1, 9, 0, 0).unwrap(),
        );
        let ids = store
            .add_tasks(
                &plan_id,
                vec![
                    StudyTask::new(d(1), 1, "Learn: Joins")
                        .with_details("Learn + follow a guided example."),
                    StudyTask::new(d(3), 1, "Learn: Indexes"),
                    StudyTask::new(d(8), 2, "Practice: Window functions"),
                    StudyTask::new(d(10), 2, "Review & Improve"),
                ],
            )
            .unwrap();
        (store, plan_id, ids)
    }

    #[test]
    fn test_progress_bar() {
        assert_eq!(progress_bar(0.0), "-".repeat(20));
        assert_eq!(progress_bar(50.0), format!("{}{}", "#".repeat(10), "-".repeat(10)));
        assert_eq!(progress_bar(250.0), "#".repeat(20));
    }

    #[test]
    fn test_render_day() {
        let (store, plan_id, ids) = seeded();
        let out = render_day(&store, &plan_id, d(1));
        assert!(out.contains("# Tasks for 2024-01-01"));
        assert!(out.contains(&format!("[ ] {} Learn: Joins (~75 mins) | Week 1", &ids[0][..8])));
        assert!(out.contains("Learn + follow a guided example."));

        assert_eq!(render_day(&store, &plan_id, d(2)), "No tasks for 2024-01-02.\n");
    }

    #[test]
    fn test_done_then_undo_by_prefix() {
        let (mut store, plan_id, ids) = seeded();
        let full = set_status(&mut store, &ids[2], TaskStatus::Done).unwrap();
        assert_eq!(full, ids[2]);
        assert_eq!(store.progress_counts(&plan_id), (4, 1));

        set_status(&mut store, &ids[2], TaskStatus::Pending).unwrap();
        assert_eq!(store.progress_counts(&plan_id), (4, 0));

        assert!(set_status(&mut store, "zzzz-not-a-task", TaskStatus::Done).is_err());
    }

    #[test]
    fn test_render_plan_groups_and_hides_done() {
        let (mut store, plan_id, ids) = seeded();
        set_status(&mut store, &ids[0], TaskStatus::Done).unwrap();

        let by_week = render_plan(&store, &plan_id, ShowBy::Week, false).unwrap();
        assert!(by_week.starts_with("# SQL (Skill/topic completion)\n2024-01-01 to 2024-01-15"));
        assert_eq!(by_week.matches("## Week").count(), 2);
        assert!(by_week.contains("[x]"));

        let pending = render_plan(&store, &plan_id, ShowBy::Date, true).unwrap();
        assert!(!pending.contains("Learn: Joins"));
        assert!(pending.contains("## 2024-01-03"));
        assert_eq!(pending.matches("## ").count(), 3);
    }

    #[test]
    fn test_dashboard() {
        let (mut store, plan_id, ids) = seeded();
        set_status(&mut store, &ids[0], TaskStatus::Done).unwrap();
        set_status(&mut store, &ids[1], TaskStatus::Done).unwrap();

        // last task is on the 10th, so five days remain from the 5th
        let out = render_dashboard(&store, &plan_id, d(5)).unwrap();
        assert!(out.contains("Completed: 2/4"));
        assert!(out.contains("Progress:  50.00%"));
        assert!(out.contains("Days left: 5"));
        assert!(out.contains("Status:    Ahead"));
        assert!(out.contains("Week  1 [####################] 2/2 (100%)"));
        assert!(out.contains("Week  2 [--------------------] 0/2 (0%)"));
    }

    #[test]
    fn test_dashboard_behind_near_end() {
        let (store, plan_id, _) = seeded();
        let out = render_dashboard(&store, &plan_id, d(9)).unwrap();
        assert!(out.contains("Days left: 1"));
        assert!(out.contains("Status:    Behind"));
        assert!(out.contains("You are behind."));
    }

    #[test]
    fn test_dashboard_unknown_plan() {
        let (store, _, _) = seeded();
        assert!(render_dashboard(&store, "missing", d(5)).is_err());
    }
}
