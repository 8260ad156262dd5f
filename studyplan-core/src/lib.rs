//! studyplan-core: week plans, the plan-to-schedule engine, and progress tracking.

pub mod generic;
pub mod goal;
pub mod plan;
pub mod progress;
pub mod schedule_config;
pub mod scheduler;
pub mod store;
pub mod synth;
pub mod task;

pub use generic::{is_generic, GENERIC_MARKERS};
pub use goal::{GoalType, Intensity};
pub use plan::{default_plan, WeekEntry, WeekIndex};
pub use progress::{
    compute_days_left, compute_status, weekly_progress, PaceStatus, ProgressReport, WeekProgress,
};
pub use schedule_config::{
    format_weekdays, parse_weekdays, revision_days, ConfigError, SchedulingConfig,
    SchedulingInput,
};
pub use scheduler::{classify, label, schedule, DayKind};
pub use store::{NewPlan, PlanRecord, PlanStore, StoreError, TaskRecord};
pub use synth::synthesize;
pub use task::{StudyTask, TaskStatus};
