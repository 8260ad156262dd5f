//! Week-block text parser.
//!
//! Expected model output:
//!   WEEK 1: Ancient India
//!   - Harappan civilisation
//!   - Vedic period
//!   WEEK 2: Medieval India
//!   - ...
//!
//! Best effort: anything that does not fit is dropped, never an error.

use anyhow::Result;
use regex::Regex;
use studyplan_core::WeekEntry;
use tracing::debug;

/// Subtopics kept per week.
pub const MAX_SUBTOPICS: usize = 7;

/// Parse week blocks out of free text. Weeks without a milestone or without
/// any subtopic are skipped.
pub fn parse_week_plan(text: &str) -> Result<Vec<WeekEntry>> {
    let header_re = Regex::new(r"(?i)\bWEEK\s+(\d+)\s*:\s*")?;
    let bullet_re = Regex::new(r"^[-•*]\s*(.+)$")?;

    let headers: Vec<(usize, usize, &str)> = header_re
        .captures_iter(text)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            let num = caps.get(1)?;
            Some((whole.start(), whole.end(), num.as_str()))
        })
        .collect();

    let mut weeks = Vec::new();

    for (i, (_, body_start, num)) in headers.iter().enumerate() {
        let body_end = headers.get(i + 1).map(|h| h.0).unwrap_or(text.len());
        let body = &text[*body_start..body_end];

        let week_no: u32 = match num.parse() {
            Ok(n) => n,
            Err(_) => {
                debug!(week = %num, "skipping week with unparseable number");
                continue;
            }
        };

        let lines: Vec<&str> = body
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .collect();
        let Some((milestone, rest)) = lines.split_first() else {
            continue;
        };

        let mut subtopics: Vec<String> = rest
            .iter()
            .filter_map(|l| bullet_re.captures(l))
            .map(|caps| caps[1].trim().to_string())
            .collect();

        // No bullets: fall back to comma-separated text.
        if subtopics.is_empty() {
            subtopics = rest
                .join(" ")
                .split(',')
                .map(str::trim)
                .filter(|p| !p.is_empty())
                .take(MAX_SUBTOPICS)
                .map(str::to_string)
                .collect();
        }

        let subtopics: Vec<String> = subtopics
            .into_iter()
            .filter(|s| s.chars().count() > 2)
            .take(MAX_SUBTOPICS)
            .collect();

        if milestone.is_empty() || subtopics.is_empty() {
            continue;
        }

        weeks.push(WeekEntry::new(week_no, *milestone, subtopics));
    }

    debug!(weeks = weeks.len(), "parsed week plan text");
    Ok(weeks)
}
