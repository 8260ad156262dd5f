//! studyplan-ingest: producers of week plans (LLM text parsing, static fallback)
//! and the prompt that asks for them.

pub mod fallback;
pub mod parsers;
pub mod prompt;

pub use fallback::generate_fallback_plan;
pub use parsers::week_text::parse_week_plan;
pub use prompt::{build_plan_prompt, PlanPrompt};
