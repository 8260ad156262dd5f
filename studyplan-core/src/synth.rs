//! Goal-type-aware subtopic synthesis.
//!
//! Every template walks the same five phases: learn, practice, apply, test, review.

use crate::goal::GoalType;

/// Number of subtopics produced by [`synthesize`].
pub const SYNTH_LEN: usize = 5;

fn template(goal_type: GoalType) -> [&'static str; SYNTH_LEN] {
    match goal_type {
        GoalType::ExamPreparation => [
            "Key concepts & notes",
            "High-yield points",
            "PYQ practice",
            "Mock-style questions",
            "Revision & recall",
        ],
        GoalType::Certification => [
            "Concepts for exam objectives",
            "Hands-on labs/tasks",
            "Scenario-based questions",
            "Practice test set",
            "Review weak areas",
        ],
        GoalType::SkillCompletion => [
            "Learn core concepts",
            "Guided implementation",
            "Mini-exercise / coding task",
            "Build a small project piece",
            "Debug + reflect + improve",
        ],
    }
}

/// Five subtopics of the form `"{milestone} - {phase}"`.
pub fn synthesize(milestone: &str, goal_type: GoalType) -> Vec<String> {
    template(goal_type)
        .iter()
        .map(|phase| format!("{milestone} - {phase}"))
        .collect()
}
