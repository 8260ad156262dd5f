use anyhow::Result;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use studyplan_core::TaskStatus;
use tracing_subscriber::EnvFilter;

mod config;
mod create;
mod llm;
mod state;
mod tracker;

use create::CreateArgs;
use tracker::ShowBy;

#[derive(Parser, Debug)]
#[command(name = "studyplan", version, about = "Turn a learning goal into a dated study schedule")]
struct Cli {
    /// Plan id to act on (default: the most recently created plan)
    #[arg(long, global = true)]
    plan: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate a week plan for a goal and schedule it day by day
    Create(CreateArgs),

    /// Tasks scheduled for a day
    Tasks {
        /// YYYY-MM-DD (default: today in the configured timezone)
        #[arg(long)]
        date: Option<NaiveDate>,
    },

    /// Mark a task done (full id or unique prefix)
    Done { task: String },

    /// Mark a task pending again
    Undo { task: String },

    /// Full plan, grouped by week or by date
    Show {
        #[arg(long, value_enum, default_value_t = ShowBy::Week)]
        by: ShowBy,

        #[arg(long, default_value_t = false)]
        hide_done: bool,
    },

    /// Completion, pace and per-week progress
    Dashboard,

    /// Delete every plan and task
    Reset {
        #[arg(long, default_value_t = false)]
        yes: bool,
    },

    /// Config file helpers
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Write a default ~/.studyplan/config.toml if none exists
    Init,

    /// Print the effective config (token redacted)
    Show,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let plan = cli.plan.as_deref();

    match cli.command {
        Command::Create(args) => {
            let cfg = config::load_config()?;
            create::run(args, &cfg)?;
        }
        Command::Tasks { date } => {
            let cfg = config::load_config()?;
            tracker::run_tasks(&cfg, plan, date)?;
        }
        Command::Done { task } => tracker::run_set_status(&task, TaskStatus::Done)?,
        Command::Undo { task } => tracker::run_set_status(&task, TaskStatus::Pending)?,
        Command::Show { by, hide_done } => tracker::run_show(plan, by, hide_done)?,
        Command::Dashboard => {
            let cfg = config::load_config()?;
            tracker::run_dashboard(&cfg, plan)?;
        }
        Command::Reset { yes } => tracker::run_reset(yes)?,
        Command::Config { command } => match command {
            ConfigCommand::Init => config::init_config()?,
            ConfigCommand::Show => config::show_config()?,
        },
    }

    Ok(())
}
