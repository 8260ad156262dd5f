//! Static plan generator used when no model output is available.

use studyplan_core::WeekEntry;

const WEEK_THEMES: [&str; 6] = [
    "Introduction & Foundations",
    "Core Concepts",
    "Important Areas / High-weight topics",
    "Advanced / Applied Concepts",
    "Practice & PYQs",
    "Revision & Mock Tests",
];

const THEME_ITEMS: [&str; 5] = [
    "Concept overview",
    "Key points & notes",
    "Important facts / examples",
    "Practice questions",
    "Revision checklist",
];

const FINAL_WEEK_ITEMS: [&str; 4] = [
    "Full syllabus revision",
    "Mock test / timed practice",
    "Error analysis & weak areas",
    "Final summary & quick recall",
];

/// Number of plan weeks covering `duration_days` (at least one).
pub fn week_count(duration_days: u32) -> u32 {
    duration_days.div_ceil(7).max(1)
}

/// One entry per week, themes cycling; the last week is always revision.
pub fn generate_fallback_plan(goal: &str, duration_days: u32) -> Vec<WeekEntry> {
    let weeks = week_count(duration_days);

    (1..=weeks)
        .map(|w| {
            let theme = WEEK_THEMES[(w as usize - 1) % WEEK_THEMES.len()];
            let milestone = format!("{goal}: {theme}");

            let subtopics = if w == weeks {
                FINAL_WEEK_ITEMS
                    .iter()
                    .map(|item| format!("{goal} - {item}"))
                    .collect()
            } else {
                THEME_ITEMS
                    .iter()
                    .map(|item| format!("{goal} - {theme}: {item}"))
                    .collect()
            };

            WeekEntry::new(w, milestone, subtopics)
        })
        .collect()
}
