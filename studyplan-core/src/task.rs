//! Dated study task: the scheduler's sole output type.
//!
//! Storage identity (task id, plan id, completion time) lives in `crate::store`.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TaskStatus {
    #[serde(rename = "pending")]
    Pending,
    #[serde(rename = "done")]
    Done,
}

impl TaskStatus {
    pub fn is_done(&self) -> bool {
        matches!(self, TaskStatus::Done)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Pending => "pending",
            TaskStatus::Done => "done",
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single study session on a calendar date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudyTask {
    pub task_date: NaiveDate,
    pub week_no: u32,
    pub title: String,
    pub details: String,
    /// Minutes.
    pub estimated_minutes: u32,
    pub status: TaskStatus,
}

impl StudyTask {
    pub fn new(task_date: NaiveDate, week_no: u32, title: impl Into<String>) -> Self {
        Self {
            task_date,
            week_no,
            title: title.into(),
            details: String::new(),
            status: TaskStatus::Pending,
            estimated_minutes: 75,
        }
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = details.into();
        self
    }

    pub fn with_minutes(mut self, minutes: u32) -> Self {
        self.estimated_minutes = minutes;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_task_is_pending() {
        let d = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let t = StudyTask::new(d, 1, "Learn: Basics")
            .with_details("Learn concepts + make short notes.")
            .with_minutes(55);
        assert_eq!(t.status, TaskStatus::Pending);
        assert_eq!(t.estimated_minutes, 55);
        assert!(!t.status.is_done());
    }

    #[test]
    fn test_status_serde_lowercase() {
        assert_eq!(serde_json::to_string(&TaskStatus::Done).unwrap(), "\"done\"");
        assert_eq!(
            serde_json::from_str::<TaskStatus>("\"pending\"").unwrap(),
            TaskStatus::Pending
        );
        assert_eq!(TaskStatus::Done.to_string(), "done");
    }

    #[test]
    fn test_task_date_serializes_iso() {
        let d = NaiveDate::from_ymd_opt(2024, 3, 9).unwrap();
        let json = serde_json::to_string(&StudyTask::new(d, 2, "x")).unwrap();
        assert!(json.contains("\"task_date\":\"2024-03-09\""));
    }
}
