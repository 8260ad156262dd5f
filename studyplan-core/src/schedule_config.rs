//! Scheduling constraints and their validation.
//!
//! Raw user input arrives as strings ([`SchedulingInput`]); everything is
//! checked here so the scheduler itself can stay total.

use chrono::{Days, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use thiserror::Error;

use crate::goal::{GoalType, Intensity};

/// Caller contract violations, reported before any task is produced.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("duration must be at least 1 day (got {0})")]
    InvalidDuration(i64),

    #[error("start date is not set")]
    MissingStartDate,

    #[error("invalid start date {0:?} (expected YYYY-MM-DD)")]
    InvalidStartDate(String),

    #[error("unknown goal type {0:?} (expected exam preparation, skill/topic completion, or certification)")]
    UnknownGoalType(String),

    #[error("unknown intensity {0:?} (expected light, relaxed, moderate, balanced, or intensive)")]
    UnknownIntensity(String),

    #[error("unknown weekday {0:?} (expected Mon..Sun)")]
    UnknownWeekday(String),

    #[error("{duration_days} days from {start} is past the last supported date")]
    DateOutOfRange { start: NaiveDate, duration_days: u32 },
}

/// Validated scheduling constraints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchedulingConfig {
    pub start_date: NaiveDate,
    pub duration_days: u32,
    /// Empty means every weekday is eligible.
    pub preferred_weekdays: HashSet<Weekday>,
    pub intensity: Intensity,
    pub goal_type: GoalType,
}

impl SchedulingConfig {
    pub fn new(
        start_date: NaiveDate,
        duration_days: i64,
        preferred_weekdays: HashSet<Weekday>,
        intensity: Intensity,
        goal_type: GoalType,
    ) -> Result<Self, ConfigError> {
        if duration_days < 1 {
            return Err(ConfigError::InvalidDuration(duration_days));
        }
        let duration_days =
            u32::try_from(duration_days).map_err(|_| ConfigError::InvalidDuration(duration_days))?;
        if start_date.checked_add_days(Days::new(u64::from(duration_days))).is_none() {
            return Err(ConfigError::DateOutOfRange {
                start: start_date,
                duration_days,
            });
        }

        Ok(Self {
            start_date,
            duration_days,
            preferred_weekdays,
            intensity,
            goal_type,
        })
    }

    /// Exclusive end of the scheduled range. Saturates at `NaiveDate::MAX` for
    /// configs built without [`SchedulingConfig::new`].
    pub fn end_date(&self) -> NaiveDate {
        self.start_date
            .checked_add_days(Days::new(u64::from(self.duration_days)))
            .unwrap_or(NaiveDate::MAX)
    }

    pub fn is_preferred(&self, day: Weekday) -> bool {
        self.preferred_weekdays.is_empty() || self.preferred_weekdays.contains(&day)
    }

    /// Trailing window of the plan given over to revision.
    pub fn revision_days(&self) -> u32 {
        revision_days(self.duration_days)
    }
}

/// `clamp(round(duration * 0.10), 2, 14)`, rounding half to even.
pub fn revision_days(duration_days: u32) -> u32 {
    let rev = (f64::from(duration_days) * 0.10).round_ties_even();
    (rev as u32).clamp(2, 14)
}

/// Unvalidated scheduling input as it comes from a form or the command line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SchedulingInput {
    pub start_date: Option<String>,
    pub duration_days: i64,
    pub preferred_days: Vec<String>,
    pub intensity: String,
    pub goal_type: String,
}

impl SchedulingInput {
    pub fn validate(&self) -> Result<SchedulingConfig, ConfigError> {
        let raw_start = self
            .start_date
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .ok_or(ConfigError::MissingStartDate)?;
        let start_date = NaiveDate::parse_from_str(raw_start, "%Y-%m-%d")
            .map_err(|_| ConfigError::InvalidStartDate(raw_start.to_string()))?;

        let goal_type: GoalType = self.goal_type.parse()?;
        let intensity: Intensity = self.intensity.parse()?;
        let weekdays = parse_weekdays(&self.preferred_days)?;

        SchedulingConfig::new(start_date, self.duration_days, weekdays, intensity, goal_type)
    }
}

/// Parse weekday labels ("Mon", "monday", ...). Blank entries are ignored.
pub fn parse_weekdays<S: AsRef<str>>(labels: &[S]) -> Result<HashSet<Weekday>, ConfigError> {
    let mut out = HashSet::new();
    for label in labels {
        let l = label.as_ref().trim();
        if l.is_empty() {
            continue;
        }
        let day: Weekday = l
            .parse()
            .map_err(|_| ConfigError::UnknownWeekday(l.to_string()))?;
        out.insert(day);
    }
    Ok(out)
}

/// Short labels in Monday-first order, e.g. "Mon,Wed,Fri".
pub fn format_weekdays(days: &HashSet<Weekday>) -> String {
    WEEK.iter()
        .filter(|d| days.contains(d))
        .map(|d| d.to_string())
        .collect::<Vec<_>>()
        .join(",")
}

const WEEK: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

#[cfg(test)]
mod tests {
    use super::*;

    fn input() -> SchedulingInput {
        SchedulingInput {
            start_date: Some("2024-01-01".to_string()),
            duration_days: 30,
            preferred_days: vec!["Mon".into(), "Wed".into()],
            intensity: "moderate".into(),
            goal_type: "Exam preparation".into(),
        }
    }

    #[test]
    fn test_revision_days_clamped() {
        assert_eq!(revision_days(1), 2);
        assert_eq!(revision_days(7), 2);
        assert_eq!(revision_days(30), 3);
        assert_eq!(revision_days(90), 9);
        assert_eq!(revision_days(365), 14);
    }

    #[test]
    fn test_revision_days_half_to_even() {
        // 45 * 0.1 = 4.5 -> 4, 55 * 0.1 = 5.5 -> 6
        assert_eq!(revision_days(45), 4);
        assert_eq!(revision_days(55), 6);
    }

    #[test]
    fn test_validate_ok() {
        let cfg = input().validate().unwrap();
        assert_eq!(cfg.duration_days, 30);
        assert_eq!(cfg.intensity, Intensity::Moderate);
        assert_eq!(cfg.goal_type, GoalType::ExamPreparation);
        assert!(cfg.is_preferred(Weekday::Mon));
        assert!(!cfg.is_preferred(Weekday::Tue));
        assert_eq!(cfg.end_date(), NaiveDate::from_ymd_opt(2024, 1, 31).unwrap());
    }

    #[test]
    fn test_validate_rejects_zero_duration() {
        let mut i = input();
        i.duration_days = 0;
        assert_eq!(i.validate().unwrap_err(), ConfigError::InvalidDuration(0));
    }

    #[test]
    fn test_validate_rejects_range_past_max_date() {
        let mut i = input();
        i.start_date = Some("+262142-12-20".to_string());
        i.duration_days = 30;
        assert!(matches!(
            i.validate(),
            Err(ConfigError::DateOutOfRange { duration_days: 30, .. })
        ));

        let last = NaiveDate::MAX - Days::new(1);
        let cfg = SchedulingConfig::new(
            last,
            1,
            HashSet::new(),
            Intensity::Light,
            GoalType::Certification,
        );
        assert_eq!(cfg.unwrap().end_date(), NaiveDate::MAX);
    }

    #[test]
    fn test_end_date_saturates_for_deserialized_config() {
        let cfg = SchedulingConfig {
            start_date: NaiveDate::MAX,
            duration_days: 5,
            preferred_weekdays: HashSet::new(),
            intensity: Intensity::Moderate,
            goal_type: GoalType::ExamPreparation,
        };
        assert_eq!(cfg.end_date(), NaiveDate::MAX);
    }

    #[test]
    fn test_validate_rejects_missing_start() {
        let mut i = input();
        i.start_date = None;
        assert_eq!(i.validate().unwrap_err(), ConfigError::MissingStartDate);

        i.start_date = Some("  ".into());
        assert_eq!(i.validate().unwrap_err(), ConfigError::MissingStartDate);

        i.start_date = Some("01/02/2024".into());
        assert!(matches!(i.validate(), Err(ConfigError::InvalidStartDate(_))));
    }

    #[test]
    fn test_validate_rejects_unknown_labels() {
        let mut i = input();
        i.preferred_days = vec!["Funday".into()];
        assert_eq!(
            i.validate().unwrap_err(),
            ConfigError::UnknownWeekday("Funday".into())
        );

        let mut i = input();
        i.intensity = "max".into();
        assert!(matches!(i.validate(), Err(ConfigError::UnknownIntensity(_))));
    }

    #[test]
    fn test_empty_weekdays_means_all() {
        let mut i = input();
        i.preferred_days.clear();
        let cfg = i.validate().unwrap();
        for d in [Weekday::Mon, Weekday::Sat, Weekday::Sun] {
            assert!(cfg.is_preferred(d));
        }
    }

    #[test]
    fn test_format_weekdays_monday_first() {
        let days = parse_weekdays(&["Fri", "mon", "Wednesday"]).unwrap();
        assert_eq!(format_weekdays(&days), "Mon,Wed,Fri");
    }
}
