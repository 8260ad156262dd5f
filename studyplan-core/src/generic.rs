//! Detection of generic, non-syllabus subtopic lists.

/// Broad vocabulary that signals an upstream plan did not name real topics.
pub const GENERIC_MARKERS: [&str; 14] = [
    "fundamentals",
    "core theory",
    "terminology",
    "types",
    "categories",
    "examples",
    "applications",
    "faqs",
    "common mistakes",
    "overview",
    "key concepts",
    "important points",
    "practice set",
    "quick revision",
];

/// True when the joined, lower-cased subtopic text contains any generic marker.
///
/// An empty list is not generic; callers treat emptiness as "missing".
pub fn is_generic<S: AsRef<str>>(subtopics: &[S]) -> bool {
    let text = subtopics
        .iter()
        .map(|s| s.as_ref().to_lowercase())
        .collect::<Vec<_>>()
        .join(" ");
    GENERIC_MARKERS.iter().any(|m| text.contains(m))
}
