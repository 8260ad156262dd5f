//! Free-text plan parsers.

pub mod week_text;
