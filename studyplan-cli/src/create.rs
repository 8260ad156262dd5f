use anyhow::{bail, Result};
use chrono::{DateTime, Utc};
use clap::Args;
use studyplan_core::{
    format_weekdays, schedule, NewPlan, PlanStore, SchedulingConfig, SchedulingInput, StudyTask,
    WeekEntry,
};
use studyplan_ingest::{generate_fallback_plan, PlanPrompt};
use tracing::{info, warn};

use crate::config::Config;
use crate::llm;
use crate::state::{load_store, save_store, store_path};

#[derive(Args, Debug, Clone, Default)]
pub struct CreateArgs {
    /// Learning goal / subject, e.g. "CDS History", "SQL", "Python"
    #[arg(long)]
    pub goal: String,

    /// exam | skill | certification (default from config)
    #[arg(long)]
    pub goal_type: Option<String>,

    /// Start date YYYY-MM-DD (default: today)
    #[arg(long)]
    pub start: Option<String>,

    /// Plan length in days
    #[arg(long, value_parser = clap::value_parser!(i64).range(7..=365))]
    pub duration: Option<i64>,

    #[arg(long, value_parser = clap::value_parser!(u32).range(1..=40))]
    pub hours_per_week: Option<u32>,

    /// Preferred study days, comma separated (Mon,Wed,Fri)
    #[arg(long, value_delimiter = ',', conflicts_with = "all_days")]
    pub days: Option<Vec<String>>,

    /// Study on every day of the week
    #[arg(long, default_value_t = false)]
    pub all_days: bool,

    /// light | relaxed | moderate | balanced | intensive
    #[arg(long)]
    pub intensity: Option<String>,

    /// reading | practice | mixed
    #[arg(long)]
    pub learning_pref: Option<String>,

    /// Skip the model call and use the built-in plan template
    #[arg(long, default_value_t = false)]
    pub offline: bool,
}

/// Which generator produced the week plan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlannerUsed {
    Model,
    Fallback { reason: Option<String> },
}

impl PlannerUsed {
    pub fn label(&self) -> &'static str {
        match self {
            PlannerUsed::Model => "Hugging Face",
            PlannerUsed::Fallback { .. } => "Fallback",
        }
    }
}

/// A validated create request, with config defaults applied.
#[derive(Debug, Clone)]
pub struct PlanRequest {
    pub goal: String,
    pub config: SchedulingConfig,
    pub hours_per_week: f64,
    pub learning_pref: String,
}

impl PlanRequest {
    pub fn from_args(args: &CreateArgs, cfg: &Config, today: chrono::NaiveDate) -> Result<Self> {
        let goal = args.goal.trim();
        if goal.is_empty() {
            bail!("Please enter a learning goal/subject.");
        }

        let d = &cfg.defaults;
        let preferred_days = if args.all_days {
            Vec::new()
        } else {
            args.days.clone().unwrap_or_else(|| d.preferred_days.clone())
        };

        let input = SchedulingInput {
            start_date: Some(args.start.clone().unwrap_or_else(|| today.to_string())),
            duration_days: args.duration.unwrap_or(d.duration_days),
            preferred_days,
            intensity: args.intensity.clone().unwrap_or_else(|| d.intensity.clone()),
            goal_type: args.goal_type.clone().unwrap_or_else(|| d.goal_type.clone()),
        };

        Ok(Self {
            goal: goal.to_string(),
            config: input.validate()?,
            hours_per_week: args.hours_per_week.map(f64::from).unwrap_or(d.hours_per_week),
            learning_pref: args
                .learning_pref
                .clone()
                .unwrap_or_else(|| d.learning_pref.clone()),
        })
    }

    /// Goal text as stored and sent to the model, tagged with the goal type.
    pub fn goal_for_ai(&self) -> String {
        format!("{} ({})", self.goal, self.config.goal_type.label())
    }

    pub fn new_plan(&self) -> NewPlan {
        NewPlan {
            goal: self.goal_for_ai(),
            start_date: self.config.start_date,
            end_date: self.config.end_date(),
            duration_days: self.config.duration_days,
            hours_per_week: self.hours_per_week,
            preferred_days: format_weekdays(&self.config.preferred_weekdays),
            intensity: self.config.intensity.label().to_string(),
            learning_pref: self.learning_pref.clone(),
        }
    }

    pub fn prompt(&self) -> PlanPrompt {
        PlanPrompt {
            goal: self.goal_for_ai(),
            duration_days: self.config.duration_days,
            hours_per_week: self.hours_per_week,
            intensity: self.config.intensity.label().to_string(),
            learning_pref: self.learning_pref.clone(),
        }
    }
}

/// Week plan from the model, or the static template when the model is
/// skipped or fails.
pub fn generate_weeks(
    req: &PlanRequest,
    cfg: &Config,
    offline: bool,
) -> (Vec<WeekEntry>, PlannerUsed) {
    if offline {
        return (
            generate_fallback_plan(&req.goal_for_ai(), req.config.duration_days),
            PlannerUsed::Fallback { reason: None },
        );
    }

    match llm::generate_plan(&cfg.llm, &req.prompt()) {
        Ok(weeks) => (weeks, PlannerUsed::Model),
        Err(e) => {
            warn!(error = %e, "plan generation failed; using fallback planner");
            (
                generate_fallback_plan(&req.goal_for_ai(), req.config.duration_days),
                PlannerUsed::Fallback {
                    reason: Some(e.to_string()),
                },
            )
        }
    }
}

/// Record the plan, expand it into tasks and store them.
pub fn plan_and_store(
    store: &mut PlanStore,
    req: &PlanRequest,
    weeks: &[WeekEntry],
    now: DateTime<Utc>,
) -> Result<(String, Vec<StudyTask>)> {
    let plan_id = store.create_plan(req.new_plan(), now);
    let tasks = schedule(weeks, &req.config);
    store.add_tasks(&plan_id, tasks.clone())?;
    info!(plan_id = %plan_id, tasks = tasks.len(), "plan created");
    Ok((plan_id, tasks))
}

pub fn run(args: CreateArgs, cfg: &Config) -> Result<()> {
    let today = cfg.profile.today()?;
    let req = PlanRequest::from_args(&args, cfg, today)?;

    let (weeks, planner) = generate_weeks(&req, cfg, args.offline);

    let path = store_path()?;
    let mut store = load_store(&path)?;
    let (plan_id, tasks) = plan_and_store(&mut store, &req, &weeks, Utc::now())?;
    save_store(&path, &store)?;

    println!("Planner used: {}", planner.label());
    if let PlannerUsed::Fallback {
        reason: Some(reason),
    } = &planner
    {
        println!("AI error (why fallback): {}", llm::truncate(reason, 180));
    }

    println!("\nPlan created: {plan_id}");
    println!(
        "{} tasks from {} to {}\n",
        tasks.len(),
        req.config.start_date,
        req.config.end_date()
    );
    println!("## Plan preview (first 10 tasks)\n");
    for t in tasks.iter().take(10) {
        println!(
            "- {} | Week {} | {} (~{} mins)",
            t.task_date, t.week_no, t.title, t.estimated_minutes
        );
    }

    Ok(())
}
