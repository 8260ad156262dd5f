//! Plan and task records with the mutations the tracker needs.
//!
//! The store is plain data (serde) so callers decide where it lives; the CLI
//! keeps it in a JSON file. Timestamps are passed in, never read from the clock.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::task::{StudyTask, TaskStatus};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("unknown plan: {0}")]
    UnknownPlan(String),

    #[error("no task matches id {0:?}")]
    UnknownTask(String),

    #[error("task id prefix {prefix:?} is ambiguous ({matches} matches)")]
    AmbiguousTask { prefix: String, matches: usize },
}

/// Everything recorded about a plan at creation time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewPlan {
    pub goal: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub duration_days: u32,
    pub hours_per_week: f64,
    /// Comma-separated weekday labels, as entered.
    pub preferred_days: String,
    pub intensity: String,
    pub learning_pref: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanRecord {
    pub plan_id: String,
    #[serde(flatten)]
    pub plan: NewPlan,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskRecord {
    pub task_id: String,
    pub plan_id: String,
    #[serde(flatten)]
    pub task: StudyTask,
    pub completed_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlanStore {
    #[serde(default)]
    pub plans: Vec<PlanRecord>,
    #[serde(default)]
    pub tasks: Vec<TaskRecord>,
}

impl PlanStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn create_plan(&mut self, plan: NewPlan, now: DateTime<Utc>) -> String {
        let plan_id = Uuid::new_v4().to_string();
        self.plans.push(PlanRecord {
            plan_id: plan_id.clone(),
            plan,
            created_at: now,
        });
        plan_id
    }

    pub fn plan(&self, plan_id: &str) -> Result<&PlanRecord, StoreError> {
        self.plans
            .iter()
            .find(|p| p.plan_id == plan_id)
            .ok_or_else(|| StoreError::UnknownPlan(plan_id.to_string()))
    }

    /// Store scheduled tasks under a plan. Status is reset to pending.
    pub fn add_tasks(
        &mut self,
        plan_id: &str,
        tasks: Vec<StudyTask>,
    ) -> Result<Vec<String>, StoreError> {
        self.plan(plan_id)?;

        let mut ids = Vec::with_capacity(tasks.len());
        for mut task in tasks {
            task.status = TaskStatus::Pending;
            let task_id = Uuid::new_v4().to_string();
            ids.push(task_id.clone());
            self.tasks.push(TaskRecord {
                task_id,
                plan_id: plan_id.to_string(),
                task,
                completed_at: None,
            });
        }
        Ok(ids)
    }

    /// Tasks of a plan on one date, ordered by week then title.
    pub fn tasks_by_date(&self, plan_id: &str, date: NaiveDate) -> Vec<&TaskRecord> {
        let mut rows: Vec<&TaskRecord> = self
            .tasks
            .iter()
            .filter(|t| t.plan_id == plan_id && t.task.task_date == date)
            .collect();
        rows.sort_by(|a, b| {
            a.task
                .week_no
                .cmp(&b.task.week_no)
                .then_with(|| a.task.title.cmp(&b.task.title))
        });
        rows
    }

    /// All tasks of a plan, ordered by date.
    pub fn all_tasks(&self, plan_id: &str) -> Vec<&TaskRecord> {
        let mut rows: Vec<&TaskRecord> =
            self.tasks.iter().filter(|t| t.plan_id == plan_id).collect();
        rows.sort_by_key(|t| t.task.task_date);
        rows
    }

    pub fn update_task_status(
        &mut self,
        task_id: &str,
        status: TaskStatus,
        now: DateTime<Utc>,
    ) -> Result<(), StoreError> {
        let record = self
            .tasks
            .iter_mut()
            .find(|t| t.task_id == task_id)
            .ok_or_else(|| StoreError::UnknownTask(task_id.to_string()))?;

        record.task.status = status;
        record.completed_at = match status {
            TaskStatus::Done => Some(now),
            TaskStatus::Pending => None,
        };
        Ok(())
    }

    /// `(total, done)` for a plan.
    pub fn progress_counts(&self, plan_id: &str) -> (usize, usize) {
        let mut total = 0;
        let mut done = 0;
        for t in self.tasks.iter().filter(|t| t.plan_id == plan_id) {
            total += 1;
            if t.task.status.is_done() {
                done += 1;
            }
        }
        (total, done)
    }

    /// Most recently created plan, if any.
    pub fn latest_plan_id(&self) -> Option<&str> {
        self.plans
            .iter()
            .max_by_key(|p| p.created_at)
            .map(|p| p.plan_id.as_str())
    }

    /// One-plan mode: clear everything.
    pub fn reset(&mut self) {
        self.plans.clear();
        self.tasks.clear();
    }

    /// Resolve a full task id or a unique prefix of one.
    pub fn resolve_task_id(&self, prefix: &str) -> Result<String, StoreError> {
        let prefix = prefix.trim();
        if prefix.is_empty() {
            return Err(StoreError::UnknownTask(prefix.to_string()));
        }
        if let Some(t) = self.tasks.iter().find(|t| t.task_id == prefix) {
            return Ok(t.task_id.clone());
        }

        let matches: Vec<&TaskRecord> = self
            .tasks
            .iter()
            .filter(|t| t.task_id.starts_with(prefix))
            .collect();
        match matches.as_slice() {
            [] => Err(StoreError::UnknownTask(prefix.to_string())),
            [only] => Ok(only.task_id.clone()),
            many => Err(StoreError::AmbiguousTask {
                prefix: prefix.to_string(),
                matches: many.len(),
            }),
        }
    }
}
