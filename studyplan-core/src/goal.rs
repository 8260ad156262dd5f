//! Goal type and intensity: the two per-plan knobs that shape task wording and length.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::schedule_config::ConfigError;

/// What the learner is working towards. Governs title/detail phrasing and
/// the synthesized subtopic templates.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum GoalType {
    #[serde(rename = "exam-preparation")]
    ExamPreparation,
    #[serde(rename = "skill-completion")]
    SkillCompletion,
    #[serde(rename = "certification")]
    Certification,
}

impl GoalType {
    pub const ALL: [GoalType; 3] = [
        GoalType::ExamPreparation,
        GoalType::SkillCompletion,
        GoalType::Certification,
    ];

    /// Human-facing label, as shown in the create form.
    pub fn label(&self) -> &'static str {
        match self {
            GoalType::ExamPreparation => "Exam preparation",
            GoalType::SkillCompletion => "Skill/topic completion",
            GoalType::Certification => "Certification",
        }
    }
}

impl fmt::Display for GoalType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for GoalType {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_lowercase();
        match key.as_str() {
            "exam preparation" | "exam-preparation" | "exam" => Ok(GoalType::ExamPreparation),
            "skill/topic completion" | "skill-completion" | "skill" | "topic" => {
                Ok(GoalType::SkillCompletion)
            }
            "certification" | "cert" => Ok(GoalType::Certification),
            _ => Err(ConfigError::UnknownGoalType(s.to_string())),
        }
    }
}

/// Study intensity. Five accepted labels collapse into three duration buckets.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Intensity {
    #[serde(rename = "light")]
    Light,
    #[serde(rename = "moderate")]
    Moderate,
    #[serde(rename = "intensive")]
    Intensive,
}

impl Intensity {
    /// Fixed per-task duration in minutes.
    pub fn minutes(&self) -> u32 {
        match self {
            Intensity::Light => 55,
            Intensity::Moderate => 75,
            Intensity::Intensive => 105,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Intensity::Light => "light",
            Intensity::Moderate => "moderate",
            Intensity::Intensive => "intensive",
        }
    }
}

impl fmt::Display for Intensity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Intensity {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "light" | "relaxed" => Ok(Intensity::Light),
            "moderate" | "balanced" => Ok(Intensity::Moderate),
            "intensive" => Ok(Intensity::Intensive),
            _ => Err(ConfigError::UnknownIntensity(s.to_string())),
        }
    }
}
