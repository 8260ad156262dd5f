//! Prompt asking a chat model for a week-block plan that `parse_week_plan` understands.

use crate::fallback::week_count;

pub const SYSTEM_PROMPT: &str = "You are a study planner. Follow the output format exactly.";

/// Inputs that shape the requested plan.
#[derive(Debug, Clone, PartialEq)]
pub struct PlanPrompt {
    pub goal: String,
    pub duration_days: u32,
    pub hours_per_week: f64,
    pub intensity: String,
    pub learning_pref: String,
}

/// `(system, user)` messages for the plan request.
pub fn build_plan_prompt(p: &PlanPrompt) -> (String, String) {
    let weeks = week_count(p.duration_days);

    let user = format!(
        r#"Create a topic-specific study plan for: {goal}
Duration: {days} days (~{weeks} weeks)
Time available: {hours} hours per week
Intensity: {intensity}
Preference: {pref}

Return in EXACT TEXT FORMAT (no JSON, no markdown fences):

WEEK 1: <milestone>
- <subtopic 1>
- <subtopic 2>
- <subtopic 3>
- <subtopic 4>
- <subtopic 5>

WEEK 2: <milestone>
- ...

Rules:
- Make subtopics syllabus-like and specific to the goal (real units/topics).
- For Indian History, include Ancient/Medieval/Modern style units and key events.
- Avoid generic labels like fundamentals/examples/FAQs/terminology.
- 5 to 7 subtopics per week.
- Final week must include Revision, Mock Practice, Error Analysis.
"#,
        goal = p.goal,
        days = p.duration_days,
        hours = p.hours_per_week,
        intensity = p.intensity,
        pref = p.learning_pref,
    );

    (SYSTEM_PROMPT.to_string(), user)
}
